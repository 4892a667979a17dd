//! コミュニティスコアのブレンド
//!
//! 同じコーヒーに対する集計スコアは呼び出し側が取得して渡す。
//! ここでは取得処理を一切行わない。

use crate::scorer::clamp_score;

/// コミュニティスコアの既定の重み
pub const DEFAULT_COMMUNITY_WEIGHT: f64 = 0.3;

/// 基本スコアとコミュニティスコアの加重平均
///
/// コミュニティスコアがなければ `base` をそのまま返す。
/// `weight` は 0.0〜1.0 に収める（NaNは0.0扱い）。
pub fn blend(base: u8, community: Option<u8>, weight: f64) -> u8 {
    let Some(community) = community else {
        return base.min(100);
    };

    let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
    let blended = (1.0 - weight) * f64::from(base) + weight * f64::from(community);
    clamp_score(blended)
}

/// 外部から渡された集計値を 0〜100 の整数にそろえる
///
/// NaN・無限大は「値なし」とみなす。
pub fn sanitize_community_score(score: Option<f64>) -> Option<u8> {
    score.filter(|s| s.is_finite()).map(clamp_score)
}
