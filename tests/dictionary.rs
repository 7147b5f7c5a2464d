use icd_assistant::{
    cli::MatchMode,
    coding::dictionary::{CodeDictionary, DictionaryError, DictionaryOptions},
};

#[test]
fn builtin_substring_lookup_dedupes_codes() {
    let dictionary = CodeDictionary::builtin(DictionaryOptions::default());
    // "hypertension" and "essential (primary) hypertension" both map to I10;
    // the code is still emitted once.
    assert_eq!(
        dictionary.matching_codes("essential (primary) hypertension"),
        vec!["I10"]
    );
}

#[test]
fn nested_terms_emit_all_codes_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.csv");
    std::fs::write(
        &path,
        "term,code\ndiabetes mellitus,E14\ntype 2 diabetes mellitus,E11\n",
    )
    .unwrap();
    let dictionary = CodeDictionary::from_csv(&path, DictionaryOptions::default()).unwrap();
    assert_eq!(
        dictionary.matching_codes("type 2 diabetes mellitus"),
        vec!["E14", "E11"]
    );
}

#[test]
fn repeated_terms_accumulate_codes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.csv");
    std::fs::write(&path, "term,code\nstroke,I63\nstroke,I63.9\n").unwrap();
    let dictionary = CodeDictionary::from_csv(&path, DictionaryOptions::default()).unwrap();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary.matching_codes("stroke"), vec!["I63", "I63.9"]);
}

#[test]
fn exact_mode_requires_equality() {
    let options = DictionaryOptions {
        match_mode: MatchMode::Exact,
        ..Default::default()
    };
    let dictionary = CodeDictionary::builtin(options);
    assert!(dictionary.matching_codes("epistaxis posterior").is_empty());
    assert_eq!(dictionary.matching_codes("Epistaxis"), vec!["R04.0"]);
}

#[test]
fn empty_dictionary_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.csv");
    std::fs::write(&path, "term,code\n").unwrap();
    let err = CodeDictionary::from_csv(&path, DictionaryOptions::default()).unwrap_err();
    assert!(matches!(err, DictionaryError::Empty { .. }));
}

#[test]
fn missing_dictionary_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = CodeDictionary::from_csv(&path, DictionaryOptions::default()).unwrap_err();
    assert!(matches!(err, DictionaryError::Read { .. }));
}
