//! 一括採点
//!
//! 記録ごとの採点は独立しているので rayon で並列に回す。
//! 出力順は入力順と同じ。

use crate::error::Result;
use crate::fingerprint;
use crate::journal::JournalRecord;
use coffee_match_common::export::excel_core::ScoreRow;
use coffee_match_common::{MatchEngine, MatchScoreResult};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// レポートの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub source: String,
    pub index: usize,
    pub coffee_name: String,
    pub roastery: String,
    pub result: MatchScoreResult,
}

impl ScoreRow for ReportEntry {
    fn source(&self) -> &str {
        &self.source
    }
    fn coffee_name(&self) -> &str {
        &self.coffee_name
    }
    fn roastery(&self) -> &str {
        &self.roastery
    }
    fn result(&self) -> &MatchScoreResult {
        &self.result
    }
}

/// 一括採点レポート
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub generated_at: String,
    pub taxonomy_fingerprint: String,
    pub entries: Vec<ReportEntry>,
}

impl ScoreReport {
    pub fn average_overall(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u32 = self.entries.iter().map(|e| u32::from(e.result.overall)).sum();
        Some(f64::from(total) / self.entries.len() as f64)
    }
}

/// 記録を採点する
pub fn score_records(engine: &MatchEngine, records: &[JournalRecord], show_progress: bool) -> Vec<ReportEntry> {
    let progress = if show_progress {
        let pb = ProgressBar::new(records.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("  {bar:40} {pos}/{len}") {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let entries = records
        .par_iter()
        .map(|record| {
            let result = engine.calculate_match_score(&record.input);
            progress.inc(1);
            ReportEntry {
                source: record.source.clone(),
                index: record.index,
                coffee_name: record.input.coffee_name.clone(),
                roastery: record.input.roastery.clone(),
                result,
            }
        })
        .collect();

    progress.finish_and_clear();
    entries
}

/// 採点してレポートにまとめる
pub fn build_report(engine: &MatchEngine, records: &[JournalRecord], show_progress: bool) -> Result<ScoreReport> {
    Ok(ScoreReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        taxonomy_fingerprint: fingerprint::engine_fingerprint(engine)?,
        entries: score_records(engine, records, show_progress),
    })
}
