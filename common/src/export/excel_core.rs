//! Excel生成（共通ライブラリ）
//!
//! スコアレポートを1シートの表として出力する。

use crate::types::MatchScoreResult;
use rust_xlsxwriter::*;

/// シート名
pub const SHEET_NAME: &str = "scores";

/// 列定義
pub struct ReportColumn {
    pub key: &'static str,
    pub label: &'static str,
    pub width: f64,
}

pub const REPORT_COLUMNS: &[ReportColumn] = &[
    ReportColumn { key: "source", label: "파일", width: 18.0 },
    ReportColumn { key: "coffeeName", label: "커피", width: 24.0 },
    ReportColumn { key: "roastery", label: "로스터리", width: 16.0 },
    ReportColumn { key: "overall", label: "종합", width: 8.0 },
    ReportColumn { key: "flavorMatching", label: "향미", width: 8.0 },
    ReportColumn { key: "sensoryMatching", label: "감각", width: 8.0 },
    ReportColumn { key: "communityScore", label: "커뮤니티", width: 10.0 },
    ReportColumn { key: "matchedFlavors", label: "일치 향미", width: 28.0 },
    ReportColumn { key: "matchedSensory", label: "일치 감각", width: 22.0 },
    ReportColumn { key: "message", label: "요약", width: 14.0 },
    ReportColumn { key: "insights", label: "인사이트", width: 60.0 },
];

/// レポート行のトレイト（呼び出し側のレポート型に対応）
pub trait ScoreRow {
    fn source(&self) -> &str;
    fn coffee_name(&self) -> &str;
    fn roastery(&self) -> &str;
    fn result(&self) -> &MatchScoreResult;
}

enum Cell {
    Text(String),
    Number(u8),
    Empty,
}

fn cell_value<T: ScoreRow>(row: &T, key: &str) -> Cell {
    let result = row.result();
    match key {
        "source" => Cell::Text(row.source().to_string()),
        "coffeeName" => Cell::Text(row.coffee_name().to_string()),
        "roastery" => Cell::Text(row.roastery().to_string()),
        "overall" => Cell::Number(result.overall),
        "flavorMatching" => Cell::Number(result.flavor_matching),
        "sensoryMatching" => Cell::Number(result.sensory_matching),
        "communityScore" => result.community_score.map(Cell::Number).unwrap_or(Cell::Empty),
        "matchedFlavors" => Cell::Text(result.matched_flavors.join(", ")),
        "matchedSensory" => Cell::Text(result.matched_sensory.join(", ")),
        "message" => Cell::Text(result.message.clone()),
        "insights" => Cell::Text(result.insights.join("\n")),
        _ => Cell::Empty,
    }
}

/// Excelをバッファに生成
pub fn generate_excel_buffer<T: ScoreRow>(rows: &[T]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_font_size(10.0)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let number_format = Format::new()
        .set_font_size(10.0)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, column) in REPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, column.width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, column.label, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (idx, row) in rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, column) in REPORT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            match cell_value(row, column.key) {
                Cell::Text(text) => {
                    worksheet
                        .write_string_with_format(row_num, col, text, &text_format)
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
                Cell::Number(n) => {
                    worksheet
                        .write_number_with_format(row_num, col, f64::from(n), &number_format)
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
                Cell::Empty => {
                    worksheet
                        .write_blank(row_num, col, &number_format)
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
