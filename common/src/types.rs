//! 入出力の型定義
//!
//! - TastingInput: 1回のテイスティング記録（エンジンへの入力）
//! - MatchScoreResult: マッチスコア（エンジンの唯一の出力）

use serde::{Deserialize, Deserializer, Serialize};

/// テイスティング入力
///
/// JSONでは camelCase。`userTaste` / `roasterNote` が文字列以外なら「データなし」、
/// `communityScore` が数値以外なら「値なし」として読み込む。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TastingInput {
    /// テイスターのメモ
    #[serde(deserialize_with = "lenient_string")]
    pub user_taste: Option<String>,
    /// ロースターの説明
    #[serde(deserialize_with = "lenient_string")]
    pub roaster_note: Option<String>,
    #[serde(deserialize_with = "lenient_label")]
    pub coffee_name: String,
    #[serde(deserialize_with = "lenient_label")]
    pub roastery: String,
    /// 同じコーヒーのコミュニティ集計（呼び出し側で取得済みのもの）
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub community_score: Option<f64>,
}

impl TastingInput {
    pub fn new(user_taste: impl Into<String>, roaster_note: impl Into<String>) -> Self {
        Self {
            user_taste: Some(user_taste.into()),
            roaster_note: Some(roaster_note.into()),
            ..Default::default()
        }
    }

    pub fn with_coffee(mut self, coffee_name: impl Into<String>, roastery: impl Into<String>) -> Self {
        self.coffee_name = coffee_name.into();
        self.roastery = roastery.into();
        self
    }

    pub fn with_community_score(mut self, score: f64) -> Self {
        self.community_score = Some(score);
        self
    }

    pub fn user_taste(&self) -> &str {
        self.user_taste.as_deref().unwrap_or("")
    }

    pub fn roaster_note(&self) -> &str {
        self.roaster_note.as_deref().unwrap_or("")
    }
}

/// マッチスコア結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreResult {
    pub overall: u8,
    pub flavor_matching: u8,
    pub sensory_matching: u8,
    #[serde(default)]
    pub community_score: Option<u8>,
    /// 一致した香味カテゴリ（タクソノミー順、重複なし）
    #[serde(default)]
    pub matched_flavors: Vec<String>,
    /// 一致した感覚カテゴリ（タクソノミー順、重複なし）
    #[serde(default)]
    pub matched_sensory: Vec<String>,
    pub insights: Vec<String>,
    pub message: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}
