#![cfg(feature = "serde")]

use promptvars::{AnswerSet, AnswerValue, Config, ResponseMode, VariableDefinition, VariableKind};

#[test]
fn test_definition_uses_form_labels() {
    let json = r#"{
        "name": "tone",
        "type": "string",
        "question": "Which tone?",
        "responseType": "multiple choice",
        "options": ["formal", "casual"]
    }"#;
    let var: VariableDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(var.kind, VariableKind::Text);
    assert_eq!(var.response_mode, ResponseMode::SingleChoice);
    assert_eq!(var.options, vec!["formal", "casual"]);

    let value = serde_json::to_value(&var).unwrap();
    assert_eq!(value["type"], "string");
    assert_eq!(value["responseType"], "multiple choice");
}

#[test]
fn test_answers_deserialize_by_shape() {
    let answers: AnswerSet =
        serde_json::from_str(r#"{"tone": "formal", "topics": ["b", "a"]}"#).unwrap();
    assert_eq!(answers.get("tone"), Some(&AnswerValue::from("formal")));
    assert_eq!(answers.get("topics"), Some(&AnswerValue::from(vec!["b", "a"])));
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let config: Config = serde_json::from_str(r#"{"strict_choices": true}"#).unwrap();
    assert!(config.strict_choices);
    assert_eq!(config.delimiter, "%%");
    assert_eq!(config.list_separator, ", ");
}
