//! テイスティング記録の読み込み
//!
//! JSONファイル1つ、またはJSONファイルを含むフォルダから記録を集める。
//! 各ファイルは `TastingInput` の配列か単一オブジェクト。

use crate::error::{CoffeeMatchError, Result};
use coffee_match_common::TastingInput;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 読み込んだ記録1件
#[derive(Debug, Clone, PartialEq)]
pub struct JournalRecord {
    /// 読み込み元ファイル名
    pub source: String,
    /// ファイル内の位置（0始まり）
    pub index: usize,
    pub input: TastingInput,
}

/// パス（ファイルまたはフォルダ）から記録を読み込む
pub fn load_records(path: &Path, recursive: bool) -> Result<Vec<JournalRecord>> {
    if path.is_file() {
        return load_file(path);
    }
    if !path.exists() {
        return Err(CoffeeMatchError::FolderNotFound(path.display().to_string()));
    }

    let mut records = Vec::new();
    for file in scan_folder(path, recursive) {
        records.extend(load_file(&file)?);
    }
    Ok(records)
}

/// フォルダ内のJSONファイル（ファイル名順）
pub fn scan_folder(folder: &Path, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_json(p))
        .collect();

    files.sort();
    files
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn load_file(path: &Path) -> Result<Vec<JournalRecord>> {
    let content = std::fs::read_to_string(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let records = parse_records(&content, &source)?;
    tracing::debug!("{}: {} records", source, records.len());
    Ok(records)
}

/// JSON文字列を記録に変換
pub fn parse_records(json: &str, source: &str) -> Result<Vec<JournalRecord>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| CoffeeMatchError::InvalidJournal(format!("{}: {}", source, e)))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        obj @ serde_json::Value::Object(_) => vec![obj],
        _ => {
            return Err(CoffeeMatchError::InvalidJournal(format!(
                "{}: 配列またはオブジェクトが必要です",
                source
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let input: TastingInput = serde_json::from_value(item).map_err(|e| {
                CoffeeMatchError::InvalidJournal(format!("{}[{}]: {}", source, index, e))
            })?;
            Ok(JournalRecord {
                source: source.to_string(),
                index,
                input,
            })
        })
        .collect()
}
