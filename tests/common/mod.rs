use promptvars::{
    PromptBuilder, ResponseMode, VariableDefinition, VariableDraft, VariableKind, VariableStore,
};

#[allow(dead_code)]
pub fn text_var(name: &str) -> VariableDefinition {
    define(name, VariableKind::Text, ResponseMode::FreeResponse, &[])
}

#[allow(dead_code)]
pub fn file_var(name: &str) -> VariableDefinition {
    define(name, VariableKind::File, ResponseMode::FreeResponse, &[])
}

#[allow(dead_code)]
pub fn choice_var(name: &str, mode: ResponseMode, options: &[&str]) -> VariableDefinition {
    define(name, VariableKind::Text, mode, options)
}

#[allow(dead_code)]
pub fn define(
    name: &str,
    kind: VariableKind,
    mode: ResponseMode,
    options: &[&str],
) -> VariableDefinition {
    let mut store = VariableStore::new();
    let mut draft = VariableDraft::new(name, kind, format!("What is {name}?"))
        .with_response_mode(mode);
    for option in options {
        draft = draft.with_option(*option);
    }
    store.add_variable(&mut draft).unwrap();
    store.get(0).unwrap().clone()
}

#[allow(dead_code)]
pub fn create_builder() -> PromptBuilder {
    let mut builder = PromptBuilder::new();
    builder.set_template("Write a %%tone%% summary of %%document%% covering %%topics%%.");

    let mut draft = VariableDraft::new("tone", VariableKind::Text, "Which tone?")
        .with_response_mode(ResponseMode::SingleChoice)
        .with_option("formal")
        .with_option("casual");
    builder.add_variable(&mut draft).unwrap();

    let mut draft = VariableDraft::new("document", VariableKind::File, "Upload the document");
    builder.add_variable(&mut draft).unwrap();

    let mut draft = VariableDraft::new("topics", VariableKind::Text, "Which topics?")
        .with_response_mode(ResponseMode::MultiChoice)
        .with_option("costs")
        .with_option("risks")
        .with_option("timeline");
    builder.add_variable(&mut draft).unwrap();

    builder
}
