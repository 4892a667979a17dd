//! マッチスコア計算（エントリポイント）
//!
//! ## 処理フロー
//! 1. 香味・感覚をそれぞれ独立に採点
//! 2. overall = round(0.7 × 香味 + 0.3 × 感覚)
//! 3. コミュニティスコアがあればブレンド
//! 4. 全数値を 0〜100 に収める
//! 5. インサイトとサマリを付けて返す
//!
//! 状態を持たない一回きりのパイプライン。同じ入力には常に同じ結果を返す。

use crate::blender::{self, DEFAULT_COMMUNITY_WEIGHT};
use crate::insights::{self, MatchBand};
use crate::scorer::{clamp_score, DimensionScore, DimensionScorer};
use crate::taxonomy::Taxonomy;
use crate::types::{MatchScoreResult, TastingInput};
use serde::{Deserialize, Serialize};

/// overall に占める香味の比率
pub const FLAVOR_WEIGHT: f64 = 0.7;

/// overall に占める感覚の比率
pub const SENSORY_WEIGHT: f64 = 0.3;

/// スコアリング方針
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringPolicy {
    /// コミュニティスコアの重み（0.0〜1.0）
    pub community_weight: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            community_weight: DEFAULT_COMMUNITY_WEIGHT,
        }
    }
}

/// 次元別の内訳付き結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    pub result: MatchScoreResult,
    pub flavor: DimensionScore,
    pub sensory: DimensionScore,
}

/// マッチスコアエンジン
#[derive(Debug, Clone)]
pub struct MatchEngine {
    flavor: DimensionScorer,
    sensory: DimensionScorer,
    policy: ScoringPolicy,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(Taxonomy::flavor_preset(), Taxonomy::sensory_preset())
    }
}

impl MatchEngine {
    pub fn new(flavor: Taxonomy, sensory: Taxonomy) -> Self {
        Self::with_policy(flavor, sensory, ScoringPolicy::default())
    }

    pub fn with_policy(flavor: Taxonomy, sensory: Taxonomy, policy: ScoringPolicy) -> Self {
        Self {
            flavor: DimensionScorer::new(flavor),
            sensory: DimensionScorer::new(sensory),
            policy,
        }
    }

    pub fn flavor_taxonomy(&self) -> &Taxonomy {
        self.flavor.taxonomy()
    }

    pub fn sensory_taxonomy(&self) -> &Taxonomy {
        self.sensory.taxonomy()
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// マッチスコアを計算する
    pub fn calculate_match_score(&self, input: &TastingInput) -> MatchScoreResult {
        self.explain(input).result
    }

    /// 内訳付きでマッチスコアを計算する
    pub fn explain(&self, input: &TastingInput) -> MatchExplanation {
        let user_taste = input.user_taste();
        let roaster_note = input.roaster_note();

        let flavor = self.flavor.score(user_taste, roaster_note);
        let sensory = self.sensory.score(user_taste, roaster_note);

        let flavor_matching = flavor.score.min(100);
        let sensory_matching = sensory.score.min(100);

        let base = clamp_score(
            FLAVOR_WEIGHT * f64::from(flavor_matching) + SENSORY_WEIGHT * f64::from(sensory_matching),
        );
        let community_score = blender::sanitize_community_score(input.community_score);
        let overall = blender::blend(base, community_score, self.policy.community_weight).min(100);

        let insights =
            insights::generate_insights(overall, flavor_matching, sensory_matching, community_score);
        let message = insights::band_message(MatchBand::from_score(overall)).to_string();

        tracing::debug!(
            "match score for '{}' ({}): overall {} (flavor {}, sensory {}, community {:?})",
            input.coffee_name,
            input.roastery,
            overall,
            flavor_matching,
            sensory_matching,
            community_score
        );

        let result = MatchScoreResult {
            overall,
            flavor_matching,
            sensory_matching,
            community_score,
            matched_flavors: flavor.matched.clone(),
            matched_sensory: sensory.matched.clone(),
            insights,
            message,
        };

        MatchExplanation {
            result,
            flavor,
            sensory,
        }
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_ENGINE: MatchEngine = MatchEngine::default();
}

/// 組み込みタクソノミーでマッチスコアを計算する
pub fn calculate_match_score(input: &TastingInput) -> MatchScoreResult {
    DEFAULT_ENGINE.calculate_match_score(input)
}
