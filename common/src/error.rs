//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// スコア計算そのものは失敗しない。エラーになるのは辞書の読み込みのみ。
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
