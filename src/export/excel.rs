//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに保存する。

use crate::batch::ReportEntry;
use crate::error::{CoffeeMatchError, Result};
use coffee_match_common::export::excel_core::generate_excel_buffer;
use std::path::Path;

pub fn generate_excel(entries: &[ReportEntry], output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(entries).map_err(CoffeeMatchError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)
        .map_err(|e| CoffeeMatchError::ExcelGeneration(format!("保存エラー: {}", e)))?;

    Ok(())
}
