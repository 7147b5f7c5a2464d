use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use icd_assistant::{
    api::{
        routes::{get_result, get_summary, list_results, ResultsQuery},
        AppState,
    },
    cli::EvalBasis,
    coding::report::{CorpusReport, RecordResult},
    config::Settings,
    data::export,
};

fn state(dir: &tempfile::TempDir) -> State<AppState> {
    let settings = Settings {
        data_dir: dir.path().join("data"),
        outputs_dir: dir.path().join("outputs"),
        ner_endpoint: None,
        concurrency: 1,
    };
    std::fs::create_dir_all(&settings.outputs_dir).unwrap();
    State(AppState { settings })
}

fn result(id: &str, matched: bool) -> RecordResult {
    RecordResult::new(
        id.to_string(),
        "narrative".to_string(),
        vec!["fever".to_string()],
        vec!["R50.9".to_string()],
        "Fever".to_string(),
        matched,
    )
}

#[tokio::test]
async fn summary_is_404_until_artifacts_exist() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);

    let err = get_summary(state.clone()).await.unwrap_err();
    assert_eq!(err.0, StatusCode::NOT_FOUND);

    let report = CorpusReport::build(vec![result("P1", true)]);
    export::export_all(&report, EvalBasis::Entities, &state.settings).unwrap();

    let summary = get_summary(state).await.unwrap();
    assert_eq!(summary.0["summary"]["total_records"], 1);
    assert_eq!(summary.0["eval_basis"], "entities");
}

#[tokio::test]
async fn results_are_empty_until_artifacts_exist() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);

    let rows = list_results(state, Query(ResultsQuery { matched: None }))
        .await
        .unwrap();
    assert!(rows.0.is_empty());
}

#[tokio::test]
async fn results_honor_the_matched_filter() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let report = CorpusReport::build(vec![
        result("P1", true),
        result("P2", false),
        result("P3", true),
    ]);
    export::export_all(&report, EvalBasis::Entities, &state.settings).unwrap();

    let matched = list_results(state.clone(), Query(ResultsQuery { matched: Some(true) }))
        .await
        .unwrap();
    let ids: Vec<&str> = matched.0.iter().map(|r| r.patient_id.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P3"]);

    let unmatched = list_results(state, Query(ResultsQuery { matched: Some(false) }))
        .await
        .unwrap();
    assert_eq!(unmatched.0.len(), 1);
    assert_eq!(unmatched.0[0].patient_id, "P2");
}

#[tokio::test]
async fn results_are_capped_at_200_rows() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let report = CorpusReport::build(
        (0..205).map(|i| result(&format!("P{i}"), i % 2 == 0)).collect(),
    );
    export::export_all(&report, EvalBasis::Entities, &state.settings).unwrap();

    let rows = list_results(state, Query(ResultsQuery { matched: None }))
        .await
        .unwrap();
    assert_eq!(rows.0.len(), 200);
}

#[tokio::test]
async fn result_by_id_finds_or_404s() {
    let dir = tempfile::tempdir().unwrap();
    let state = state(&dir);
    let report = CorpusReport::build(vec![result("P1", true), result("P2", false)]);
    export::export_all(&report, EvalBasis::Entities, &state.settings).unwrap();

    let found = get_result(Path("P2".to_string()), state.clone())
        .await
        .unwrap();
    assert_eq!(found.0.patient_id, "P2");
    assert!(!found.0.matched);

    let err = get_result(Path("P999".to_string()), state).await.unwrap_err();
    assert_eq!(err.0, StatusCode::NOT_FOUND);
}
