//! Coordinator service tests against a mocked launcher.

use crate::config::FleetConfig;
use crate::coordinator::{
    domain::{AgentName, AnalysisAgent, CoordinatorDomainError, ExecutionStatus},
    services::{
        AGENT_NAME_VAR, AGENT_PORT_VAR, CoordinatorError, ParallelCoordinator, REPORTS_DIR_VAR,
    },
};
use crate::launcher::{
    domain::{LaunchRequest, LaunchResult, display_url},
    ports::{LaunchError, LauncherResult, MockNotebookLaunch},
};
use crate::port_allocation::{
    adapters::memory::InMemoryPortProbe,
    domain::{PortAllocationError, PortPolicy, PortRange},
};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

type TestCoordinator = ParallelCoordinator<MockNotebookLaunch, InMemoryPortProbe>;

struct TestContext {
    _temp: TempDir,
    root: Utf8PathBuf,
    config: FleetConfig,
    ports: InMemoryPortProbe,
}

impl TestContext {
    fn coordinator(&self, launcher: MockNotebookLaunch) -> TestCoordinator {
        ParallelCoordinator::new(
            &self.config,
            Utf8Path::new("reports"),
            launcher,
            self.ports.clone(),
        )
        .expect("coordinator should build")
    }
}

#[fixture]
fn context() -> TestContext {
    let temp = tempfile::tempdir().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("UTF-8 temp path");
    let policy =
        PortPolicy::new().with_range(PortRange::new(6000, 6005).expect("valid range"));
    let config = FleetConfig::new(root.clone()).with_port_policy(policy);

    TestContext {
        _temp: temp,
        root,
        config,
        ports: InMemoryPortProbe::new(),
    }
}

fn name(value: &str) -> AgentName {
    AgentName::new(value).expect("valid agent name")
}

fn agent(value: &str) -> AnalysisAgent {
    AnalysisAgent::new(name(value), format!("notebooks/{value}.py"), "")
}

fn fake_launch(request: &LaunchRequest, pid: u32) -> LaunchResult {
    let port = u16::try_from(pid).unwrap_or(u16::MAX);
    LaunchResult::new(
        request.notebook().to_string(),
        port,
        pid,
        display_url(request.host(), port),
        vec!["marimo".to_owned(), request.notebook().to_string()],
    )
}

/// Launcher that succeeds with sequential pids, failing notebooks that
/// contain `failing`.
fn launcher_failing_on(failing: Option<&'static str>) -> MockNotebookLaunch {
    let mut launcher = MockNotebookLaunch::new();
    let mut next_pid = 7000;
    launcher
        .expect_launch()
        .returning(move |request| -> LauncherResult<LaunchResult> {
            if failing.is_some_and(|fragment| request.notebook().as_str().contains(fragment)) {
                return Err(LaunchError::NotebookNotFound(request.notebook().to_owned()));
            }
            next_pid += 1;
            Ok(fake_launch(request, next_pid))
        });
    launcher
}

#[rstest]
fn relative_reports_dir_is_created_under_root(context: TestContext) {
    let coordinator = context.coordinator(MockNotebookLaunch::new());

    let expected = context.root.join("reports");
    assert_eq!(coordinator.reports_dir(), expected.as_path());
    assert!(context.root.join("reports").is_dir());
}

#[rstest]
fn unknown_agent_fails_loudly(context: TestContext) {
    let mut launcher = MockNotebookLaunch::new();
    launcher.expect_launch().never();
    let mut coordinator = context.coordinator(launcher);

    let result = coordinator.launch_agent("ghost");

    assert!(matches!(
        result,
        Err(CoordinatorError::UnknownAgent(ref unknown)) if unknown == "ghost"
    ));
}

#[rstest]
fn dependent_agent_waits_for_completion(context: TestContext) {
    let mut coordinator = context.coordinator(launcher_failing_on(None));
    coordinator.register_agent(agent("ingest"));
    coordinator.register_agent(agent("transform").with_dependencies([name("ingest")]));

    let before_ingest = coordinator.launch_agent("transform");
    assert!(matches!(
        before_ingest,
        Err(CoordinatorError::UnmetDependency { ref dependency, .. }) if dependency == "ingest"
    ));

    coordinator.launch_agent("ingest").expect("ingest should launch");
    let while_running = coordinator.launch_agent("transform");
    assert!(matches!(
        while_running,
        Err(CoordinatorError::UnmetDependency { .. })
    ));
    assert!(coordinator.execution("transform").is_none());

    coordinator
        .mark_completed("ingest", ["reports/ingest.parquet"])
        .expect("ingest should complete");
    let execution = coordinator
        .launch_agent("transform")
        .expect("transform should launch");

    assert_eq!(execution.status(), ExecutionStatus::Running);
    assert_eq!(coordinator.status_summary().total_agents, 2);
}

#[rstest]
fn injected_environment_is_overlaid_by_agent_env(context: TestContext) {
    let reports = context.root.join("reports").to_string();
    let mut launcher = MockNotebookLaunch::new();
    launcher
        .expect_launch()
        .withf(move |request| {
            let env = request.env();
            env.get(AGENT_NAME_VAR).map(String::as_str) == Some("ingest")
                && env.get(REPORTS_DIR_VAR) == Some(&reports)
                && env.get(AGENT_PORT_VAR).map(String::as_str) == Some("6001")
                && env.get("DATASET").map(String::as_str) == Some("sales")
        })
        .times(1)
        .returning(|request| Ok(fake_launch(request, 7001)));
    context.ports.occupy([6000]);
    let mut coordinator = context.coordinator(launcher);
    coordinator.register_agent(agent("ingest").with_env([
        ("DATASET".to_owned(), "sales".to_owned()),
    ]));

    coordinator.launch_agent("ingest").expect("ingest should launch");
}

#[rstest]
fn agent_env_wins_over_injected_variables(context: TestContext) {
    let mut launcher = MockNotebookLaunch::new();
    launcher
        .expect_launch()
        .withf(|request| request.env().get(AGENT_PORT_VAR).map(String::as_str) == Some("9999"))
        .times(1)
        .returning(|request| Ok(fake_launch(request, 7001)));
    let mut coordinator = context.coordinator(launcher);
    coordinator.register_agent(
        agent("ingest").with_env([(AGENT_PORT_VAR.to_owned(), "9999".to_owned())]),
    );

    coordinator.launch_agent("ingest").expect("ingest should launch");
}

#[rstest]
fn batch_continues_past_a_failing_agent(context: TestContext) {
    let mut coordinator = context.coordinator(launcher_failing_on(Some("beta")));
    for agent_name in ["alpha", "beta", "gamma"] {
        coordinator.register_agent(agent(agent_name));
    }

    let report = coordinator.launch_parallel(["alpha", "beta", "gamma"]);

    let launched: Vec<&str> = report
        .launched
        .iter()
        .map(|execution| execution.agent().name().as_str())
        .collect();
    assert_eq!(launched, ["alpha", "gamma"]);
    assert_eq!(report.failed.len(), 1);
    let failure = report.failed.first().expect("one failure");
    assert_eq!(failure.agent, "beta");
    assert!(matches!(failure.error, CoordinatorError::Launch(_)));
    assert!(!report.is_complete());

    let summary = coordinator.status_summary();
    assert_eq!(summary.total_agents, 3);
    assert_eq!(summary.running, 2);
    assert_eq!(summary.executions.len(), 2);
}

#[rstest]
fn failed_launch_leaves_previous_execution(context: TestContext) {
    let mut coordinator = context.coordinator(launcher_failing_on(Some("ingest")));
    coordinator.register_agent(agent("ingest"));

    let result = coordinator.launch_agent("ingest");

    assert!(matches!(result, Err(CoordinatorError::Launch(_))));
    assert!(coordinator.execution("ingest").is_none());
    assert_eq!(coordinator.status_summary().running, 0);
}

#[rstest]
fn exhausted_preflight_port_skips_launcher(context: TestContext) {
    let mut launcher = MockNotebookLaunch::new();
    launcher.expect_launch().never();
    context.ports.occupy(6000..=6005);
    let mut coordinator = context.coordinator(launcher);
    coordinator.register_agent(agent("ingest"));

    let result = coordinator.launch_agent("ingest");

    assert!(matches!(
        result,
        Err(CoordinatorError::PortAllocation(
            PortAllocationError::RangeExhausted { .. }
        ))
    ));
}

#[rstest]
fn status_hooks_enforce_running_to_terminal(context: TestContext) {
    let mut coordinator = context.coordinator(launcher_failing_on(None));
    coordinator.register_agent(agent("ingest"));

    let never_launched = coordinator.mark_failed("ingest");
    assert!(matches!(never_launched, Err(CoordinatorError::NotLaunched(_))));

    coordinator.launch_agent("ingest").expect("ingest should launch");
    coordinator
        .set_status("ingest", ExecutionStatus::Failed)
        .expect("running agent may fail");
    let reopened = coordinator.mark_completed("ingest", Vec::<Utf8PathBuf>::new());

    assert!(matches!(
        reopened,
        Err(CoordinatorError::Domain(
            CoordinatorDomainError::InvalidStatusTransition { .. }
        ))
    ));
    let summary = coordinator.status_summary();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.count(ExecutionStatus::Failed), 1);
}

#[rstest]
fn outputs_accumulate_on_the_execution(context: TestContext) {
    let mut coordinator = context.coordinator(launcher_failing_on(None));
    coordinator.register_agent(agent("ingest"));
    coordinator.launch_agent("ingest").expect("ingest should launch");

    coordinator
        .record_output("ingest", "reports/rows.csv")
        .expect("output should be recorded");
    let execution = coordinator
        .mark_completed("ingest", ["reports/summary.html"])
        .expect("ingest should complete");

    assert_eq!(
        execution.outputs(),
        [
            Utf8PathBuf::from("reports/rows.csv"),
            Utf8PathBuf::from("reports/summary.html"),
        ]
    );
}

#[rstest]
fn re_registering_replaces_the_agent(context: TestContext) {
    let mut coordinator = context.coordinator(MockNotebookLaunch::new());
    coordinator.register_agent(agent("ingest"));
    coordinator.register_agent(AnalysisAgent::new(
        name("ingest"),
        "notebooks/ingest_v2.py",
        "second revision",
    ));

    let registered = coordinator.agent("ingest").expect("agent registered");

    assert_eq!(registered.notebook().as_str(), "notebooks/ingest_v2.py");
    assert_eq!(coordinator.status_summary().total_agents, 1);
}
