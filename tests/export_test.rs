//! JSON/Excel出力の統合テスト

use coffee_match::batch::{self, ScoreReport};
use coffee_match::cli::ReportFormat;
use coffee_match::export;
use coffee_match::journal::JournalRecord;
use coffee_match_common::{MatchEngine, TastingInput};
use tempfile::tempdir;

fn create_test_report() -> ScoreReport {
    let records: Vec<JournalRecord> = [
        ("오렌지, 상큼하고 부드러워요", "citrus, bright and smooth"),
        ("cocoa, nutty", "dark chocolate, hazelnut, 70% cacao"),
        ("", "jasmine"),
    ]
    .iter()
    .enumerate()
    .map(|(index, (taste, note))| JournalRecord {
        source: "journal.json".to_string(),
        index,
        input: TastingInput::new(*taste, *note).with_coffee(format!("Coffee {}", index), "Roastery"),
    })
    .collect();

    batch::build_report(&MatchEngine::default(), &records, false).expect("採点に失敗")
}

#[test]
fn test_json_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = create_test_report();

    let paths = export::export_report(&report, ReportFormat::Json, dir.path(), "scores").unwrap();
    assert_eq!(paths, vec![dir.path().join("scores.json")]);

    let content = std::fs::read_to_string(&paths[0]).unwrap();
    let loaded: ScoreReport = serde_json::from_str(&content).expect("JSONとして読めない");
    assert_eq!(loaded.entries, report.entries);
    assert!(content.contains("\"flavorMatching\""));
    assert!(content.contains("\"taxonomyFingerprint\""));
}

#[test]
fn test_excel_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("out").join("scores.xlsx");
    let report = create_test_report();

    let paths = export::export_report(&report, ReportFormat::Excel, &output_path, "ignored").unwrap();
    assert_eq!(paths, vec![output_path.clone()]);

    let bytes = std::fs::read(&output_path).expect("Excelファイルが作成されていない");
    assert!(bytes.starts_with(b"PK"), "xlsx は zip 形式のはず");
}

#[test]
fn test_both_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = create_test_report();

    let paths = export::export_report(&report, ReportFormat::Both, dir.path(), "match").unwrap();
    assert_eq!(paths.len(), 2);
    assert!(dir.path().join("match.json").exists());
    assert!(dir.path().join("match.xlsx").exists());
}

#[test]
fn test_empty_report_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = batch::build_report(&MatchEngine::default(), &[], false).unwrap();

    let paths = export::export_report(&report, ReportFormat::Both, dir.path(), "empty").unwrap();
    for path in paths {
        let metadata = std::fs::metadata(&path).expect("ファイルメタデータ取得失敗");
        assert!(metadata.len() > 0, "{} が空", path.display());
    }
}
