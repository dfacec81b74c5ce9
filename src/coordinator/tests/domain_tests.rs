//! Coordinator domain tests.

use crate::coordinator::domain::{AgentManifest, AgentName, CoordinatorDomainError, ExecutionStatus};
use rstest::rstest;

#[rstest]
#[case("ingest", "ingest")]
#[case("  transform ", "transform")]
fn agent_names_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let name = AgentName::new(raw).expect("valid name");

    assert_eq!(name.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_agent_names_are_rejected(#[case] raw: &str) {
    assert_eq!(AgentName::new(raw), Err(CoordinatorDomainError::EmptyAgentName));
}

#[rstest]
#[case(ExecutionStatus::Running, ExecutionStatus::Completed, true)]
#[case(ExecutionStatus::Running, ExecutionStatus::Failed, true)]
#[case(ExecutionStatus::Running, ExecutionStatus::Running, false)]
#[case(ExecutionStatus::Completed, ExecutionStatus::Failed, false)]
#[case(ExecutionStatus::Completed, ExecutionStatus::Running, false)]
#[case(ExecutionStatus::Failed, ExecutionStatus::Completed, false)]
fn only_running_executions_may_finish(
    #[case] from: ExecutionStatus,
    #[case] to: ExecutionStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[test]
fn manifest_fills_optional_fields() {
    let manifest = AgentManifest::from_json(
        r#"{
            "agents": [
                {"name": "ingest", "notebook": "notebooks/ingest.py"},
                {
                    "name": "transform",
                    "notebook": "notebooks/transform.py",
                    "description": "Joins staged tables",
                    "depends_on": ["ingest"],
                    "env": {"DATASET": "sales"}
                }
            ]
        }"#,
    )
    .expect("manifest should parse");

    let agents = manifest.agents();
    assert_eq!(agents.len(), 2);
    let ingest = agents.first().expect("ingest agent");
    assert!(ingest.depends_on().is_empty());
    assert!(ingest.description().is_empty());
    let transform = agents.get(1).expect("transform agent");
    assert_eq!(transform.notebook().as_str(), "notebooks/transform.py");
    assert_eq!(
        transform.depends_on(),
        [AgentName::new("ingest").expect("valid name")]
    );
    assert_eq!(
        transform.env().get("DATASET").map(String::as_str),
        Some("sales")
    );
}

#[test]
fn manifest_with_blank_name_is_rejected() {
    let result = AgentManifest::from_json(r#"{"agents": [{"name": " ", "notebook": "a.py"}]}"#);

    assert!(result.is_err());
}
