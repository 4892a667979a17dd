//! インサイト生成
//!
//! 数値スコアを、テイスター向けの短い文（称賛・所見・改善提案）へ変換する。
//! 表示文言は韓国語。

use serde::{Deserialize, Serialize};

/// 高評価帯の下限
pub const EXCELLENT_THRESHOLD: u8 = 85;

/// 中評価帯の下限
pub const GOOD_THRESHOLD: u8 = 60;

/// 香味と感覚の差がこれ以上なら次元別の所見を追加
pub const DIVERGENCE_GAP: u8 = 20;

/// コミュニティ平均と「同程度」とみなす幅
pub const COMMUNITY_SIMILAR_GAP: u8 = 10;

/// 高評価帯の文に必ず含まれる語
pub const EXCELLENT_MARKER: &str = "훌륭";

/// 改善提案の文に必ず含まれる語
pub const IMPROVE_MARKER: &str = "더";

/// スコア帯
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchBand {
    NeedsImprovement,
    Good,
    Excellent,
}

impl MatchBand {
    pub fn from_score(score: u8) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            MatchBand::Excellent
        } else if score >= GOOD_THRESHOLD {
            MatchBand::Good
        } else {
            MatchBand::NeedsImprovement
        }
    }
}

/// スコア帯ごとの一行サマリ
pub fn band_message(band: MatchBand) -> &'static str {
    match band {
        MatchBand::Excellent => "완벽한 매치!",
        MatchBand::Good => "좋은 매치!",
        MatchBand::NeedsImprovement => "새로운 발견!",
    }
}

/// インサイトの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Praise,
    Observation,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub text: String,
}

impl Insight {
    fn new(kind: InsightKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// インサイト文のリスト（空にはならない）
pub fn generate_insights(
    overall: u8,
    flavor_matching: u8,
    sensory_matching: u8,
    community_score: Option<u8>,
) -> Vec<String> {
    generate_insight_details(overall, flavor_matching, sensory_matching, community_score)
        .into_iter()
        .map(|i| i.text)
        .collect()
}

/// 種類付きのインサイト
pub fn generate_insight_details(
    overall: u8,
    flavor_matching: u8,
    sensory_matching: u8,
    community_score: Option<u8>,
) -> Vec<Insight> {
    let band = MatchBand::from_score(overall);
    let mut insights = vec![band_insight(band)];

    // 次元間の乖離
    if flavor_matching.abs_diff(sensory_matching) >= DIVERGENCE_GAP {
        if flavor_matching > sensory_matching {
            insights.push(Insight::new(
                InsightKind::Observation,
                "향미는 잘 잡아냈지만, 산미·바디 같은 질감 표현은 로스터 노트와 차이가 있어요.",
            ));
        } else {
            insights.push(Insight::new(
                InsightKind::Observation,
                "산미·바디 같은 질감은 잘 느꼈지만, 향미 표현은 로스터 노트와 차이가 있어요.",
            ));
        }
    }

    if band == MatchBand::NeedsImprovement {
        if flavor_matching == 0 {
            insights.push(Insight::new(
                InsightKind::Suggestion,
                "과일, 초콜릿, 견과류처럼 떠오르는 향미를 더 구체적으로 적어보세요.",
            ));
        }
        if sensory_matching == 0 {
            insights.push(Insight::new(
                InsightKind::Suggestion,
                "산미, 바디, 단맛 같은 감각 표현을 더 적어보세요.",
            ));
        }
    }

    if let Some(community) = community_score {
        insights.push(community_insight(overall, community));
    }

    insights
}

fn band_insight(band: MatchBand) -> Insight {
    match band {
        MatchBand::Excellent => Insight::new(
            InsightKind::Praise,
            "훌륭해요! 로스터의 의도를 정확하게 짚어냈어요.",
        ),
        MatchBand::Good => Insight::new(
            InsightKind::Observation,
            "주요 특징을 잘 포착했어요. 세부적인 표현에서 약간의 차이가 있어요.",
        ),
        MatchBand::NeedsImprovement => Insight::new(
            InsightKind::Suggestion,
            "로스터 노트와 다른 관점으로 맛을 느꼈어요. 다양한 향미 표현을 더 탐색해보세요.",
        ),
    }
}

fn community_insight(overall: u8, community: u8) -> Insight {
    if overall >= community.saturating_add(COMMUNITY_SIMILAR_GAP) {
        Insight::new(
            InsightKind::Praise,
            format!("커뮤니티 평균({}점)보다 높은 일치도예요.", community),
        )
    } else if overall.saturating_add(COMMUNITY_SIMILAR_GAP) <= community {
        Insight::new(
            InsightKind::Observation,
            format!("다른 테이스터들은 평균 {}점으로 이 커피를 더 가깝게 읽었어요.", community),
        )
    } else {
        Insight::new(
            InsightKind::Observation,
            format!("커뮤니티 평균({}점)과 비슷한 일치도예요.", community),
        )
    }
}
