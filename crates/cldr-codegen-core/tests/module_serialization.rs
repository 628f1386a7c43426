use cldr_codegen_core::{GeneratedModule, GenerationFailure, LocaleDocuments};

#[test]
fn serializes_module_deterministically() {
    let module = GeneratedModule::new(["Cldr", "Locale"], "En.elm", "module Cldr.Locale.En");

    let json = serde_json::to_string_pretty(&module).expect("serialize module");
    let expected = r#"{
  "directory": [
    "Cldr",
    "Locale"
  ],
  "filename": "En.elm",
  "content": "module Cldr.Locale.En"
}"#;
    assert_eq!(json, expected);
}

#[test]
fn accepts_worker_field_names() {
    let module: GeneratedModule =
        serde_json::from_str(r#"{"directory":["Cldr"],"name":"Fr.elm","content":"x"}"#)
            .expect("parse module with name");
    assert_eq!(module.filename, "Fr.elm");
    assert_eq!(module.relative_path(), std::path::Path::new("Cldr").join("Fr.elm"));

    let flat: GeneratedModule = serde_json::from_str(r#"{"filename":"En.elm","content":"y"}"#)
        .expect("parse module without directory");
    assert!(flat.directory.is_empty());
    assert_eq!(flat.relative_path(), std::path::Path::new("En.elm"));
}

#[test]
fn locale_documents_use_camel_case_keys() {
    let docs = LocaleDocuments {
        numbers: "{}".to_string(),
        currencies: "{}".to_string(),
        delimiters: "{}".to_string(),
        list_patterns: "{}".to_string(),
    };
    let value = serde_json::to_value(&docs).expect("serialize documents");
    assert!(value.get("listPatterns").is_some());
}

#[test]
fn failure_lines_split_on_both_newline_forms() {
    let failure = GenerationFailure::new("first\nsecond\\nthird");
    assert_eq!(failure.lines(), vec!["first", "second", "third"]);
}
