//! Integration tests for error classification and field logic.

use serde_json::json;

use formwork_core::{
    classify, AccordionField, ErrorMessage, ErrorNode, Feedback, FormSnapshot, FormState,
    MessageItem, SelectField, SelectOption,
};

/// Test a deposit form error payload as returned by a records backend.
#[test]
fn test_deposit_form_errors_end_to_end() {
    let errors = json!({
        "metadata": {
            "title": "Missing data for required field.",
            "creators": [
                {"person_or_org": {"family_name": "Missing data for required field."}},
                {"affiliations": ["Invalid affiliation", "Unknown ROR id"]}
            ],
            "description": {"message": "A longer description helps discovery", "severity": "info"}
        }
    });
    let form = FormSnapshot::new(json!({"metadata": {"title": ""}})).with_errors(errors.clone());

    let classified = classify(&ErrorNode::from(errors));
    assert_eq!(classified.blocking_count(), 4);
    assert_eq!(classified.severity_checks.len(), 1);
    assert_eq!(
        classified.flattened["metadata.creators[1].affiliations[1]"],
        "Unknown ROR id"
    );

    let basics = AccordionField::new("Basic information")
        .include("metadata.title")
        .include("metadata.description");
    assert!(basics.has_error(&form));

    let affiliations = AccordionField::new("Affiliations").include("metadata.funding");
    assert!(!affiliations.has_error(&form));

    let message = ErrorMessage::from_classified("The form contains errors", &classified);
    let items = message.items();
    assert_eq!(items.len(), 4);
    assert!(matches!(
        &items[0],
        MessageItem::Inline { label: Some(label), .. } if label == "metadata.title"
    ));
}

/// Test that advisories render as labels without blocking.
#[test]
fn test_feedback_for_field_with_advisory() {
    let form = FormSnapshot::default().with_errors(json!({
        "metadata": {
            "resource_type": {"message": "Consider a more specific type", "severity": "warning"}
        }
    }));
    let field = SelectField::new(
        "metadata.resource_type",
        vec![SelectOption::new("dataset", "Dataset", "dataset")],
    );

    let feedback = field.feedback(&form, None).unwrap();
    assert_eq!(feedback.class_name(), "warning");
    assert!(!feedback.prompt);
    assert_eq!(feedback.text, "Consider a more specific type");
}

/// Test error trees loaded from YAML fixtures.
#[test]
fn test_error_tree_from_yaml() {
    let yaml = r#"
metadata:
  subjects:
    - "Unknown subject"
    - message: "Deprecated vocabulary"
      severity: "warning"
files: "At least one file is required"
"#;
    let node: ErrorNode = serde_yaml::from_str(yaml).unwrap();
    let classified = classify(&node);

    assert_eq!(classified.flattened["metadata.subjects[0]"], "Unknown subject");
    assert_eq!(
        classified.severity_checks["metadata.subjects[1]"].message,
        "Deprecated vocabulary"
    );
    assert_eq!(classified.flattened["files"], "At least one file is required");

    let feedback = Feedback::from_error(&node).unwrap();
    assert_eq!(feedback.text, "Unknown subject");
}

/// Test select additions flow back into the form.
#[test]
fn test_select_addition_updates_form() {
    let mut field = SelectField::new("metadata.keywords", Vec::new())
        .multiple(true)
        .allow_additions(true);
    let mut form = FormSnapshot::default();

    field.add_item(&mut form, "open science").unwrap();
    field.add_item(&mut form, "forms").unwrap();

    assert_eq!(
        form.values(),
        &json!({"metadata": {"keywords": ["open science", "forms"]}})
    );
    assert_eq!(field.dropdown_options(&form).len(), 2);
}
