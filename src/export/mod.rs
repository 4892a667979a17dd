pub mod excel;

use crate::batch::ScoreReport;
use crate::cli::ReportFormat;
use crate::error::Result;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let json_path = output.join(format!("{}.json", title));
        let excel_path = output.join(format!("{}.xlsx", title));
        (json_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        let json_path = parent.join(format!("{}.json", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (json_path, excel_path)
    }
}

/// レポートを書き出し、出力したパスを返す
pub fn export_report(
    report: &ScoreReport,
    format: ReportFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    let paths = match format {
        ReportFormat::Json => {
            let output_path = output_path_for_format(output, title, "json");
            write_json(report, &output_path)?;
            vec![output_path]
        }
        ReportFormat::Excel => {
            let output_path = output_path_for_format(output, title, "xlsx");
            excel::generate_excel(&report.entries, &output_path)?;
            vec![output_path]
        }
        ReportFormat::Both => {
            let (json_path, excel_path) = output_paths_for_both(output, title);
            write_json(report, &json_path)?;
            excel::generate_excel(&report.entries, &excel_path)?;
            vec![json_path, excel_path]
        }
    };

    for path in &paths {
        tracing::info!("report written: {}", path.display());
    }
    Ok(paths)
}

fn write_json(report: &ScoreReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_directory_like() {
        let path = output_path_for_format(Path::new("out"), "report", "json");
        assert_eq!(path, PathBuf::from("out/report.json"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/scores.json"), "report", "json");
        assert_eq!(path, PathBuf::from("out/scores.json"));
    }

    #[test]
    fn test_output_paths_for_both_uses_stem() {
        let (json, excel) = output_paths_for_both(Path::new("out/scores.json"), "report");
        assert_eq!(json, PathBuf::from("out/scores.json"));
        assert_eq!(excel, PathBuf::from("out/scores.xlsx"));
    }
}
