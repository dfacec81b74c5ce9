//! Validation tests for port ranges and policies.

use crate::port_allocation::domain::{PortConfigError, PortPolicy, PortRange, parse_port};
use rstest::rstest;
use std::collections::BTreeMap;

#[rstest]
#[case(1, 1)]
#[case(1, 65_535)]
#[case(41_000, 41_999)]
#[case(65_535, 65_535)]
fn valid_range_yields_every_port_in_order(#[case] start: u32, #[case] end: u32) {
    let range = PortRange::new(start, end).expect("range should be valid");

    let ports: Vec<u32> = range.iter().map(u32::from).collect();

    assert_eq!(ports.len(), usize::try_from(end - start + 1).expect("fits usize"));
    assert_eq!(range.port_count(), end - start + 1);
    assert_eq!(ports.first().copied(), Some(start));
    assert_eq!(ports.last().copied(), Some(end));
    assert!(ports.windows(2).all(|pair| pair.first() < pair.last()));
}

#[rstest]
#[case(0, 10, PortConfigError::PortOutOfRange(0))]
#[case(10, 65_536, PortConfigError::PortOutOfRange(65_536))]
#[case(20, 10, PortConfigError::InvertedRange { start: 20, end: 10 })]
fn invalid_range_is_rejected(
    #[case] start: u32,
    #[case] end: u32,
    #[case] expected: PortConfigError,
) {
    assert_eq!(PortRange::new(start, end), Err(expected));
}

#[rstest]
#[case("5000-5010", 5000, 5010)]
#[case(" 7000 - 7001 ", 7000, 7001)]
#[case("8080", 8080, 8080)]
fn range_spec_parses(#[case] spec: &str, #[case] start: u16, #[case] end: u16) {
    let range: PortRange = spec.parse().expect("spec should parse");

    assert_eq!((range.start(), range.end()), (start, end));
}

#[rstest]
#[case("")]
#[case("a-b")]
#[case("5000-")]
#[case("-5000")]
#[case("1-2-3")]
fn malformed_range_spec_is_rejected(#[case] spec: &str) {
    assert!(matches!(
        spec.parse::<PortRange>(),
        Err(PortConfigError::InvalidSpec(_))
    ));
}

#[test]
fn default_range_is_41000_to_41999() {
    let range = PortRange::default();

    assert_eq!(range.to_string(), "41000-41999");
    assert!(range.contains(41_500));
    assert!(!range.contains(42_000));
}

#[rstest]
#[case("8080", Ok(8080))]
#[case("0", Err(PortConfigError::PortOutOfRange(0)))]
#[case("nope", Err(PortConfigError::InvalidSpec("nope".to_owned())))]
fn parse_port_validates(#[case] value: &str, #[case] expected: Result<u16, PortConfigError>) {
    assert_eq!(parse_port(value), expected);
}

#[test]
fn policy_from_env_prefers_fixed_port_and_keeps_range() {
    let env: BTreeMap<String, String> = [
        ("MARIMO_PORT_RANGE".to_owned(), "6000-6005".to_owned()),
        ("MARIMO_PORT".to_owned(), "6100".to_owned()),
        ("MARIMO_HOST".to_owned(), "0.0.0.0".to_owned()),
    ]
    .into_iter()
    .collect();

    let policy = PortPolicy::from_env(&env).expect("policy should parse");

    assert_eq!(policy.fixed_port(), Some(6100));
    assert_eq!(policy.range().to_string(), "6000-6005");
    assert_eq!(policy.host(), "0.0.0.0");
}

#[test]
fn policy_from_env_ignores_blank_values() {
    let env: BTreeMap<String, String> = [
        ("MARIMO_PORT_RANGE".to_owned(), "  ".to_owned()),
        ("MARIMO_PORT".to_owned(), String::new()),
    ]
    .into_iter()
    .collect();

    let policy = PortPolicy::from_env(&env).expect("policy should parse");

    assert_eq!(policy, PortPolicy::new());
}
