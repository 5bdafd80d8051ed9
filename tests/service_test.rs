//! Tests for PartyService: JSON decoding and end-to-end planning

use rstest::rstest;

use office_party::application::services::PartyService;
use office_party::application::ApplicationError;
use office_party::config::{FieldNames, Settings};
use office_party::domain::{DomainError, Parent, RequiredSet, Strategy};

const ORG_CHART: &str = r#"[
    {"name": "Alice", "party-animal-score": 10, "boss": null},
    {"name": "Bob", "party-animal-score": 20, "boss": "Alice"},
    {"name": "Carol", "party-animal-score": 30, "boss": "Bob"}
]"#;

fn service() -> PartyService {
    PartyService::new(Settings::default())
}

// ============================================================
// Decoding
// ============================================================

#[test]
fn given_org_chart_when_parsing_then_decodes_all_fields() {
    let records = service().parse_records(ORG_CHART).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].id.as_deref(), Some("Alice"));
    assert_eq!(records[0].value, Some(10.0));
    assert_eq!(records[0].parent, Some(Parent::Root));
    assert_eq!(records[2].parent, Some(Parent::Node("Bob".into())));
}

#[test]
fn given_custom_field_names_when_parsing_then_uses_them() {
    // Arrange
    let settings = Settings {
        strategy: Strategy::Iterative,
        fields: FieldNames {
            id: "id".into(),
            value: "score".into(),
            parent: "manager".into(),
        },
    };
    let content = r#"[{"id": "x", "score": -2.5, "manager": null, "name": "ignored"}]"#;

    // Act
    let records = PartyService::new(settings).parse_records(content).unwrap();

    // Assert
    assert_eq!(records[0].id.as_deref(), Some("x"));
    assert_eq!(records[0].value, Some(-2.5));
    assert_eq!(records[0].parent, Some(Parent::Root));
}

#[test]
fn given_missing_fields_when_parsing_then_leaves_them_for_the_builder() {
    let records = service()
        .parse_records(r#"[{"boss": null}, {"name": "b", "party-animal-score": null}]"#)
        .unwrap();

    assert_eq!(records[0].id, None);
    assert_eq!(records[0].value, None);
    assert_eq!(records[1].value, None);
    assert_eq!(records[1].parent, None);
}

#[rstest]
#[case::malformed("[{", "malformed JSON")]
#[case::not_array(r#"{"name": "a"}"#, "expected a JSON array")]
#[case::not_object(r#"[1, 2]"#, "record #0 is not an object")]
#[case::bool_id(
    r#"[{"name": true, "party-animal-score": 1, "boss": null}]"#,
    "field 'name'"
)]
#[case::string_value(
    r#"[{"name": "a", "party-animal-score": "high", "boss": null}]"#,
    "field 'party-animal-score' must be a number"
)]
#[case::float_parent(
    r#"[{"name": "a", "party-animal-score": 1, "boss": 1.5}]"#,
    "field 'boss'"
)]
fn given_invalid_json_when_parsing_then_invalid_input(#[case] content: &str, #[case] expected: &str) {
    let err = service().parse_records(content).unwrap_err();

    match err {
        ApplicationError::InvalidInput { message } => {
            assert!(message.contains(expected), "got: {message}");
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ============================================================
// Planning
// ============================================================

#[rstest]
#[case(Strategy::Iterative)]
#[case(Strategy::Recursive)]
fn given_org_chart_when_planning_then_returns_best_selection(#[case] strategy: Strategy) {
    let service = PartyService::new(Settings {
        strategy,
        ..Settings::default()
    });

    let plan = service.plan(ORG_CHART, &RequiredSet::new()).unwrap();

    assert_eq!(plan.solution.value, 40.0);
    assert_eq!(plan.solution.ids, vec!["Alice", "Carol"]);
    assert!(plan.missing_required.is_empty());
    assert_eq!(plan.tree.len(), 3);
}

#[test]
fn given_required_middle_when_planning_then_reports_it_missing() {
    let required: RequiredSet = ["Bob"].into_iter().collect();

    let plan = service().plan(ORG_CHART, &required).unwrap();

    assert_eq!(plan.solution.ids, vec!["Alice", "Carol"]);
    assert_eq!(plan.missing_required, vec!["Bob".to_string()]);
}

#[test]
fn given_integer_ids_when_planning_then_required_matches_text_form() {
    let content = r#"[
        {"name": 1, "party-animal-score": 1, "boss": null},
        {"name": 2, "party-animal-score": 5, "boss": 1}
    ]"#;
    let required: RequiredSet = ["1"].into_iter().collect();

    let plan = service().plan(content, &required).unwrap();

    assert_eq!(plan.solution.ids, vec!["1"]);
}

#[test]
fn given_two_roots_when_planning_then_domain_error() {
    let content = r#"[
        {"name": "a", "party-animal-score": 1, "boss": null},
        {"name": "b", "party-animal-score": 1, "boss": null}
    ]"#;

    let err = service().plan(content, &RequiredSet::new()).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::MultipleRootsFound(_))
    ));
}

#[test]
fn given_unknown_required_when_planning_then_domain_error() {
    let required: RequiredSet = ["Mallory"].into_iter().collect();

    let err = service().plan(ORG_CHART, &required).unwrap_err();

    assert_eq!(
        err.to_string(),
        ApplicationError::Domain(DomainError::UnknownRequiredId("Mallory".into())).to_string()
    );
}

#[test]
fn given_empty_array_when_planning_then_no_root() {
    let err = service().plan("[]", &RequiredSet::new()).unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::NoRootFound)));
}
