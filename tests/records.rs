use chrono::NaiveDate;
use icd_assistant::data::records::{load_records, validate_columns, IngestError};

const HEADER: &str = "id_pasien,nm_pasien,jk,umur_pasien,id_kunjungan,tgl_registrasi,nm_dokter,rekam_medis_narasi,diagnosis_structured";

fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.csv");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn loads_well_formed_rows() {
    let (_dir, path) = write_csv(&format!(
        "{HEADER}\nP001,Budi Santoso,L,54,V100,2025-03-14,dr. Rahma,\"mimisan sejak jam 22.00, epistaksis posterior\",\"Epistaxis, Hypertension\"\n"
    ));
    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.patient_id, "P001");
    assert_eq!(record.age, 54);
    assert_eq!(
        record.visit_date,
        Some(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    );
    assert_eq!(
        record.narrative,
        "mimisan sejak jam 22.00, epistaksis posterior"
    );
    assert_eq!(record.reference_diagnosis, "Epistaxis, Hypertension");
}

#[test]
fn missing_columns_abort_before_any_record() {
    let (_dir, path) = write_csv(
        "id_pasien,nm_pasien,jk,umur_pasien,id_kunjungan,tgl_registrasi,nm_dokter,rekam_medis_narasi\nP001,Budi,L,54,V100,2025-03-14,dr. Rahma,text\n",
    );
    let err = load_records(&path).unwrap_err();
    match err {
        IngestError::MissingColumns { missing } => {
            assert_eq!(missing, vec!["diagnosis_structured".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other}"),
    }
}

#[test]
fn zero_rows_is_a_valid_empty_corpus() {
    let (_dir, path) = write_csv(&format!("{HEADER}\n"));
    assert!(validate_columns(&path).is_ok());
    assert!(load_records(&path).unwrap().is_empty());
}

#[test]
fn unparseable_date_keeps_the_record() {
    let (_dir, path) = write_csv(&format!(
        "{HEADER}\nP002,Siti,P,33,V101,not-a-date,dr. Rahma,demam tinggi,Fever\n"
    ));
    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].visit_date, None);
}
