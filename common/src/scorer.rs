//! 香味・感覚スコアラー
//!
//! 同じアルゴリズムを注入されたタクソノミーで動かす。
//!
//! ## 処理フロー
//! 1. 両テキストを正規化（トークン＋フレーズ）
//! 2. 各語をタクソノミーの表記とファジー照合し、高信頼のみ正規カテゴリへ
//! 3. カテゴリごとに最大重み（intensity × 類似度）を保持
//! 4. 重み付きJaccardで 0〜100 のサブスコアを算出

use crate::fuzzy::{self, Confidence};
use crate::normalizer;
use crate::taxonomy::Taxonomy;
use serde::Serialize;
use std::collections::HashSet;

/// 採用する最低類似度（高信頼のみ）
pub const ACCEPT_SIMILARITY: f64 = fuzzy::HIGH_CONFIDENCE;

lazy_static::lazy_static! {
    /// 表記に綴りが近いが香味・感覚を表さない語
    static ref NON_DESCRIPTORS: HashSet<&'static str> = [
        "roaster", "roasters", "roastery", "roasteries", "roasting",
        "taste", "tasted", "taster", "tasters", "tasting", "tastes",
        "coffee", "coffees", "note", "notes", "cup", "cups",
    ]
    .into_iter()
    .collect();
}

/// 片側で検出されたカテゴリ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHit {
    pub category: String,
    /// intensity × 類似度
    pub weight: f64,
    /// 根拠になった語
    pub evidence: String,
    pub matched_variant: String,
    pub similarity: f64,
    pub confidence: Confidence,
}

/// 1次元分のスコアと内訳
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub score: u8,
    /// 両側で検出されたカテゴリ（タクソノミー順、重複なし）
    pub matched: Vec<String>,
    pub user_hits: Vec<CategoryHit>,
    pub roaster_hits: Vec<CategoryHit>,
}

impl DimensionScore {
    fn empty(user_hits: Vec<CategoryHit>, roaster_hits: Vec<CategoryHit>) -> Self {
        Self {
            score: 0,
            matched: Vec::new(),
            user_hits,
            roaster_hits,
        }
    }

    /// テイスターだけが挙げたカテゴリ
    pub fn user_only(&self) -> Vec<&str> {
        only_in(&self.user_hits, &self.roaster_hits)
    }

    /// ロースターのノートにあってテイスターが拾えなかったカテゴリ
    pub fn roaster_only(&self) -> Vec<&str> {
        only_in(&self.roaster_hits, &self.user_hits)
    }
}

fn only_in<'a>(side: &'a [CategoryHit], other: &[CategoryHit]) -> Vec<&'a str> {
    side.iter()
        .filter(|h| !other.iter().any(|o| o.category == h.category))
        .map(|h| h.category.as_str())
        .collect()
}

/// タクソノミー1つ分のスコアラー
#[derive(Debug, Clone)]
pub struct DimensionScorer {
    taxonomy: Taxonomy,
}

impl DimensionScorer {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// テイスターのメモとロースターのノートを比較する
    pub fn score(&self, user_taste: &str, roaster_note: &str) -> DimensionScore {
        let user_hits = self.detect(user_taste);
        let roaster_hits = self.detect(roaster_note);

        if user_hits.is_empty() || roaster_hits.is_empty() {
            return DimensionScore::empty(user_hits, roaster_hits);
        }

        let mut shared = 0.0;
        let mut union = 0.0;
        let mut matched = Vec::new();

        // どちらもタクソノミー順に並んでいる
        for entry in self.taxonomy.entries() {
            let user = find_weight(&user_hits, &entry.category);
            let roaster = find_weight(&roaster_hits, &entry.category);
            if user > 0.0 && roaster > 0.0 {
                matched.push(entry.category.clone());
            }
            shared += user.min(roaster);
            union += user.max(roaster);
        }

        if union <= 0.0 {
            return DimensionScore::empty(user_hits, roaster_hits);
        }

        let score = clamp_score(100.0 * shared / union);
        tracing::debug!(
            "{} score {} (matched: {:?}, user: {}, roaster: {})",
            self.taxonomy.kind(),
            score,
            matched,
            user_hits.len(),
            roaster_hits.len()
        );

        DimensionScore {
            score,
            matched,
            user_hits,
            roaster_hits,
        }
    }

    /// テキスト中のカテゴリを検出（タクソノミー順）
    pub fn detect(&self, text: &str) -> Vec<CategoryHit> {
        let terms = normalizer::normalize(Some(text));
        if terms.is_empty() {
            return Vec::new();
        }

        let entries = self.taxonomy.entries();
        let mut best: Vec<Option<CategoryHit>> = vec![None; entries.len()];

        for term in terms.iter().filter(|t| !NON_DESCRIPTORS.contains(t.as_str())) {
            let Some(candidate) = fuzzy::best_match(term, self.taxonomy.variants()) else {
                continue;
            };
            if candidate.similarity < ACCEPT_SIMILARITY {
                continue;
            }
            let Some(owner) = self.taxonomy.owner_of(candidate.dictionary_index) else {
                continue;
            };

            let entry = &entries[owner];
            let weight = entry.intensity * candidate.similarity;
            let replace = match &best[owner] {
                Some(current) => weight > current.weight,
                None => true,
            };
            if replace {
                tracing::debug!(
                    "'{}' -> {} via '{}' ({:.2}, {})",
                    term,
                    entry.category,
                    candidate.matched_variant,
                    candidate.similarity,
                    candidate.confidence
                );
                best[owner] = Some(CategoryHit {
                    category: entry.category.clone(),
                    weight,
                    evidence: term.clone(),
                    matched_variant: candidate.matched_variant,
                    similarity: candidate.similarity,
                    confidence: candidate.confidence,
                });
            }
        }

        best.into_iter().flatten().collect()
    }
}

fn find_weight(hits: &[CategoryHit], category: &str) -> f64 {
    hits.iter()
        .find(|h| h.category == category)
        .map(|h| h.weight)
        .unwrap_or(0.0)
}

/// 0〜100に丸めて収める（NaNは0）
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
