use icd_assistant::coding::report::{CorpusReport, RecordResult};

fn result(id: &str, entities: &[&str], matched: bool) -> RecordResult {
    RecordResult::new(
        id.to_string(),
        "narrative".to_string(),
        entities.iter().map(|e| e.to_string()).collect(),
        Vec::new(),
        "reference".to_string(),
        matched,
    )
}

#[test]
fn empty_corpus_has_zero_ratios() {
    let report = CorpusReport::build(Vec::new());
    assert_eq!(report.summary.total_records, 0);
    assert_eq!(report.summary.total_entities, 0);
    assert_eq!(report.summary.average_entities, 0.0);
    assert_eq!(report.summary.accuracy, 0.0);
}

#[test]
fn accuracy_is_an_exact_ratio() {
    let report = CorpusReport::build(vec![
        result("P1", &["fever"], true),
        result("P2", &[], false),
        result("P3", &["cough"], true),
    ]);
    assert_eq!(report.summary.accuracy, 2.0 / 3.0);
    assert_eq!(report.summary.matched_records, 2);
    assert_eq!(report.summary.unmatched_records, 1);
}

#[test]
fn result_order_equals_input_order() {
    let report = CorpusReport::build(vec![
        result("P3", &[], false),
        result("P1", &[], false),
        result("P2", &[], false),
    ]);
    let ids: Vec<&str> = report.results.iter().map(|r| r.patient_id.as_str()).collect();
    assert_eq!(ids, vec!["P3", "P1", "P2"]);
}

#[test]
fn summary_shape() {
    let report = CorpusReport::build(vec![
        result("P1", &["fever", "cough"], true),
        result("P2", &["headache"], false),
    ]);
    insta::assert_json_snapshot!(report.summary, @r###"
    {
      "total_records": 2,
      "total_entities": 3,
      "matched_records": 1,
      "unmatched_records": 1,
      "average_entities": 1.5,
      "accuracy": 0.5
    }
    "###);
}
