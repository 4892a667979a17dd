//! ファジー照合
//!
//! トークンと辞書の表記を比較し、類似度と信頼度を付けて返す。
//! 類似度は次の2つの最大値:
//! - 正規化レーベンシュタイン類似度（綴りの揺れ、`MIN_EDIT_CHARS` 文字以上の語のみ）
//! - 語幹一致（"오렌지와" → "오렌지", "chocolatey" → "chocolate" のような活用・助詞付き）
//!
//! 短い英単語は1文字違いで別の一般語になる（"like"/"lime", "hint"/"mint"）ため、
//! 編集距離は短い語に適用しない。英語の語幹一致も既知の語尾に限る。

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// この類似度以上で高信頼
pub const HIGH_CONFIDENCE: f64 = 0.85;

/// この類似度以上で中信頼
pub const MEDIUM_CONFIDENCE: f64 = 0.7;

/// 候補として残す最低類似度（これ以上〜中信頼未満は低信頼）
pub const MIN_SIMILARITY: f64 = 0.55;

/// 編集距離で比較する語の最小文字数（短い方の語）
pub const MIN_EDIT_CHARS: usize = 5;

/// 語幹一致とみなす表記の最小文字数
pub const MIN_PREFIX_CHARS: usize = 2;

/// 語幹一致の基礎類似度（表記がトークン全体を覆うほど1.0に近づく）
pub const PREFIX_BASE_SIMILARITY: f64 = 0.8;

/// 英語の表記に付いてよい語尾
const ENGLISH_SUFFIXES: &[&str] = &[
    "s", "es", "y", "ey", "ly", "d", "ed", "ish", "ness", "er", "est",
];

/// 照合の信頼度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= HIGH_CONFIDENCE {
            Confidence::High
        } else if similarity >= MEDIUM_CONFIDENCE {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// 照合候補
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// 入力トークン（小文字化済み）
    pub term: String,
    /// 一致した辞書の表記
    pub matched_variant: String,
    /// 辞書内の位置
    #[serde(skip)]
    pub dictionary_index: usize,
    pub similarity: f64,
    pub confidence: Confidence,
}

/// 辞書から類似する表記を探す
///
/// 類似度の降順。同値は辞書順、さらに表記の辞書式順で並べる。
/// `MIN_SIMILARITY` を超える候補がなければ空のVec。
/// 表記は小文字・前後空白なしならそのまま使う（`Taxonomy::variants()` はこの形）。
pub fn find_best_matches<S: AsRef<str>>(token: &str, dictionary_terms: &[S]) -> Vec<MatchCandidate> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<MatchCandidate> = dictionary_terms
        .iter()
        .enumerate()
        .filter_map(|(idx, term)| {
            let variant = normalize_term(term.as_ref());
            let similarity = similarity(&token, &variant)?;
            Some(MatchCandidate {
                term: token.clone(),
                matched_variant: variant.into_owned(),
                dictionary_index: idx,
                similarity,
                confidence: Confidence::from_similarity(similarity),
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then(a.dictionary_index.cmp(&b.dictionary_index))
            .then_with(|| a.matched_variant.cmp(&b.matched_variant))
    });

    candidates
}

/// 最良の1件
pub fn best_match<S: AsRef<str>>(token: &str, dictionary_terms: &[S]) -> Option<MatchCandidate> {
    find_best_matches(token, dictionary_terms).into_iter().next()
}

fn normalize_term(term: &str) -> Cow<'_, str> {
    let trimmed = term.trim();
    if trimmed.len() == term.len() && !term.chars().any(char::is_uppercase) {
        Cow::Borrowed(term)
    } else {
        Cow::Owned(trimmed.to_lowercase())
    }
}

/// 2語の類似度（`MIN_SIMILARITY` 未満なら None）
///
/// 引数は小文字化済みであること。
pub fn similarity(token: &str, variant: &str) -> Option<f64> {
    if variant.is_empty() {
        return None;
    }
    if token == variant {
        return Some(1.0);
    }

    let token_len = token.chars().count();
    let variant_len = variant.chars().count();
    let prefix = prefix_similarity(token, token_len, variant, variant_len);
    let edit = edit_similarity(token, token_len, variant, variant_len);

    let score = prefix.unwrap_or(0.0).max(edit.unwrap_or(0.0));
    (score >= MIN_SIMILARITY).then_some(score.min(1.0))
}

/// 綴りの揺れとしての類似度
///
/// 両方が `MIN_EDIT_CHARS` 文字以上で、先頭の文字が同じ場合のみ。
fn edit_similarity(token: &str, token_len: usize, variant: &str, variant_len: usize) -> Option<f64> {
    if token_len.min(variant_len) < MIN_EDIT_CHARS || token.chars().next() != variant.chars().next() {
        return None;
    }

    // 長さの差だけで閾値に届かない組は編集距離を計算しない
    let max_len = token_len.max(variant_len) as f64;
    let length_bound = 1.0 - token_len.abs_diff(variant_len) as f64 / max_len;
    if length_bound < MIN_SIMILARITY {
        return None;
    }

    Some(strsim::normalized_levenshtein(token, variant))
}

/// 語幹一致の類似度
///
/// 単語トークンが表記で始まり、表記がトークンの半分以上を占める場合のみ。
/// ハングルの表記は助詞・語尾が何でも付くので接頭一致でよい。
/// それ以外は `ENGLISH_SUFFIXES` の語尾（y→i の変化を含む）に限る。
fn prefix_similarity(token: &str, token_len: usize, variant: &str, variant_len: usize) -> Option<f64> {
    if token.contains(' ')
        || variant_len < MIN_PREFIX_CHARS
        || variant_len >= token_len
        || variant_len * 2 < token_len
    {
        return None;
    }

    let matched = if variant.chars().any(is_hangul) {
        token.starts_with(variant)
    } else {
        has_english_suffix(token, variant)
    };
    if !matched {
        return None;
    }

    let coverage = variant_len as f64 / token_len as f64;
    Some(PREFIX_BASE_SIMILARITY + (1.0 - PREFIX_BASE_SIMILARITY) * coverage)
}

fn has_english_suffix(token: &str, variant: &str) -> bool {
    let suffix_ok = |stem: &str| {
        token
            .strip_prefix(stem)
            .map(|rest| ENGLISH_SUFFIXES.contains(&rest))
            .unwrap_or(false)
    };

    if suffix_ok(variant) {
        return true;
    }
    // juicy → juicier, fruity → fruitiness
    match variant.strip_suffix('y') {
        Some(stem) if !stem.is_empty() => suffix_ok(&format!("{}i", stem)),
        _ => false,
    }
}

fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_high_confidence() {
        let matches = find_best_matches("ETHIOPIAN", &["ethiopian", "kenyan"]);
        assert_eq!(matches[0].matched_variant, "ethiopian");
        assert_eq!(matches[0].confidence, Confidence::High);
        assert!((matches[0].similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_typo_tolerance() {
        let best = best_match("chocolat", &["chocolate", "caramel"]).unwrap();
        assert_eq!(best.matched_variant, "chocolate");
        assert_eq!(best.confidence, Confidence::High);

        let best = best_match("carmel", &["chocolate", "caramel"]).unwrap();
        assert_eq!(best.matched_variant, "caramel");
        assert!(best.confidence >= Confidence::Medium);
    }

    #[test]
    fn test_no_match_below_threshold() {
        assert!(find_best_matches("and", &["chocolate", "berry"]).is_empty());
        assert!(find_best_matches("", &["berry"]).is_empty());
        assert!(find_best_matches("berry", &[""]).is_empty());
    }

    #[test]
    fn test_hangul_stem_match() {
        let best = best_match("오렌지와", &["레몬", "오렌지"]).unwrap();
        assert_eq!(best.matched_variant, "오렌지");
        assert_eq!(best.confidence, Confidence::High);

        let best = best_match("상큼하고", &["상큼", "산미"]).unwrap();
        assert_eq!(best.matched_variant, "상큼");
        assert!(best.confidence >= Confidence::Medium);
    }

    #[test]
    fn test_prefix_requires_coverage() {
        // "tea" は "teaspoon" の半分未満
        assert!(similarity("teaspoon", "tea").is_none());
        assert!(similarity("chocolatey", "chocolate").is_some());
    }

    #[test]
    fn test_prefix_not_applied_to_phrases() {
        assert!(prefix_similarity("dark chocolate", 14, "dark", 4).is_none());
    }

    #[test]
    fn test_english_prefix_needs_known_suffix() {
        assert!(similarity("teas", "tea").is_some());
        assert!(similarity("brighter", "bright").is_some());
        assert!(similarity("juicier", "juicy").is_some());
        assert!(similarity("team", "tea").is_none());
        assert!(similarity("teach", "tea").is_none());
        assert!(similarity("plump", "plum").is_none());
        assert!(similarity("winery", "wine").is_none());
    }

    #[test]
    fn test_short_words_are_not_typos() {
        for (word, variant) in [
            ("like", "lime"),
            ("hint", "mint"),
            ("here", "herb"),
            ("fine", "wine"),
            ("salt", "malt"),
        ] {
            assert!(similarity(word, variant).is_none(), "{} ~ {}", word, variant);
        }
        assert!(find_best_matches("like", &["lime", "lemon"]).is_empty());
    }

    #[test]
    fn test_typo_must_keep_first_letter() {
        assert!(similarity("boasted", "roasted").is_none());
        assert!(similarity("sounded", "rounded").is_none());
        assert!(similarity("velvet", "velvety").is_some());
    }

    #[test]
    fn test_variants_used_as_is() {
        assert!(matches!(normalize_term("orange"), Cow::Borrowed(_)));
        assert_eq!(normalize_term(" Orange "), "orange");
        let best = best_match("orange", &[" ORANGE "]).unwrap();
        assert_eq!(best.matched_variant, "orange");
    }

    #[test]
    fn test_sorted_by_similarity() {
        let matches = find_best_matches("berri", &["strawberry", "berry", "berries"]);
        assert_eq!(matches[0].matched_variant, "berry");
        for pair in matches.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_ties_follow_dictionary_order() {
        let matches = find_best_matches("abcde", &["abcdx", "abcdz", "abcdy"]);
        let variants: Vec<&str> = matches.iter().map(|m| m.matched_variant.as_str()).collect();
        assert_eq!(variants, vec!["abcdx", "abcdz", "abcdy"]);
    }

    #[test]
    fn test_deterministic() {
        let dictionary = ["citrus", "citrusy", "cider"];
        assert_eq!(
            find_best_matches("citris", &dictionary),
            find_best_matches("citris", &dictionary)
        );
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(Confidence::from_similarity(0.9), Confidence::High);
        assert_eq!(Confidence::from_similarity(0.75), Confidence::Medium);
        assert_eq!(Confidence::from_similarity(0.6), Confidence::Low);
    }
}
