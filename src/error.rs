use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoffeeMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("テイスティング記録が見つかりません: {0}")]
    NoRecordsFound(String),

    #[error("テイスティング記録が不正: {0}")]
    InvalidJournal(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    InvalidInput(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] coffee_match_common::Error),
}

pub type Result<T> = std::result::Result<T, CoffeeMatchError>;
