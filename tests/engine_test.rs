//! マッチスコアエンジンの統合テスト
//!
//! 組み込みタクソノミーで公開APIだけを使って検証する。

use coffee_match_common::insights::{EXCELLENT_MARKER, IMPROVE_MARKER};
use coffee_match_common::{calculate_match_score, MatchBand, MatchEngine, ScoringPolicy, TastingInput, Taxonomy};

fn score(taste: &str, note: &str) -> coffee_match_common::MatchScoreResult {
    calculate_match_score(&TastingInput::new(taste, note))
}

/// すべての数値は 0〜100
#[test]
fn test_scores_are_bounded() {
    let cases = [
        ("", ""),
        ("citrus", "citrus"),
        ("citrus citrus citrus orange lemon lime", "citrus"),
        ("오렌지와 초콜릿 맛이 상큼하고 부드러워요", "citrus and chocolate, bright and smooth"),
        ("!!!???", "..."),
        ("random words with no coffee meaning", "jasmine bergamot silky"),
    ];

    for (taste, note) in cases {
        let result = score(taste, note);
        assert!(result.overall <= 100, "{} / {}", taste, note);
        assert!(result.flavor_matching <= 100);
        assert!(result.sensory_matching <= 100);
    }

    let result = calculate_match_score(&TastingInput::new("citrus", "citrus").with_community_score(250.0));
    assert_eq!(result.community_score, Some(100));
    assert!(result.overall <= 100);
}

/// 両方空なら 0 点
#[test]
fn test_empty_inputs_score_zero() {
    let result = score("", "");
    assert_eq!(result.overall, 0);
    assert_eq!(result.flavor_matching, 0);
    assert_eq!(result.sensory_matching, 0);
    assert!(result.matched_flavors.is_empty());
    assert!(result.matched_sensory.is_empty());
    assert!(!result.insights.is_empty());
    assert_eq!(result.message, "새로운 발견!");
}

/// 欠損フィールドは空文字として扱う
#[test]
fn test_missing_fields_from_json() {
    let input: TastingInput = serde_json::from_str(r#"{ "roasterNote": "citrus" }"#).unwrap();
    let result = calculate_match_score(&input);
    assert_eq!(result.overall, 0);
    assert!(!result.insights.is_empty());
}

/// 片側だけに記述がある場合
#[test]
fn test_one_sided_input_scores_zero() {
    let result = score("", "citrus, chocolate, bright acidity");
    assert_eq!(result.flavor_matching, 0);
    assert_eq!(result.sensory_matching, 0);

    let result = score("citrus, chocolate, bright acidity", "");
    assert_eq!(result.overall, 0);
}

/// 韓国語のメモと英語のノートでも高得点になる
#[test]
fn test_cross_language_match() {
    let result = score(
        "오렌지와 초콜릿 맛이 상큼하고 부드러워요",
        "citrus and chocolate, bright and smooth",
    );
    assert!(result.overall > 60, "overall = {}", result.overall);
    assert!(result.matched_flavors.contains(&"citrus".to_string()));
    assert!(result.matched_flavors.contains(&"chocolate".to_string()));
    assert!(result.matched_sensory.contains(&"acidity".to_string()));
    assert!(result.matched_sensory.contains(&"body".to_string()));
}

/// 同じ入力には同じ結果
#[test]
fn test_deterministic() {
    let taste = "jasmine, peach and honey, juicy and silky";
    let note = "floral, stone fruit, caramel sweetness, vibrant";
    let first = score(taste, note);
    for _ in 0..10 {
        assert_eq!(score(taste, note), first);
    }

    let engine = MatchEngine::default();
    assert_eq!(engine.calculate_match_score(&TastingInput::new(taste, note)), first);
}

/// 大文字小文字は区別しない
#[test]
fn test_case_insensitive() {
    let lower = score("ethiopian citrus and jasmine", "ethiopian lemon, floral");
    let upper = score("ETHIOPIAN CITRUS AND JASMINE", "Ethiopian Lemon, FLORAL");
    assert_eq!(lower, upper);
}

/// 一致カテゴリに重複がない
#[test]
fn test_matched_categories_unique() {
    let result = score(
        "orange lemon lime citrus grapefruit, bright bright tart",
        "citrus orange lemon, bright acidity",
    );
    let mut flavors = result.matched_flavors.clone();
    flavors.sort();
    flavors.dedup();
    assert_eq!(flavors.len(), result.matched_flavors.len());
    assert_eq!(result.matched_flavors, vec!["citrus".to_string()]);
    assert_eq!(result.matched_sensory, vec!["acidity".to_string()]);
}

/// スコア帯とインサイトの対応
#[test]
fn test_insight_bands() {
    let excellent = score("citrus, bright", "citrus, bright");
    assert_eq!(MatchBand::from_score(excellent.overall), MatchBand::Excellent);
    assert_eq!(excellent.message, "완벽한 매치!");
    assert!(excellent.insights.iter().any(|s| s.contains(EXCELLENT_MARKER)));

    let low = score("mango", "cedar tobacco");
    assert!(low.overall < 60);
    assert!(low.insights.iter().any(|s| s.contains(IMPROVE_MARKER)));
}

/// コミュニティスコアの重みは設定できる
#[test]
fn test_community_weight_policy() {
    let input = TastingInput::new("citrus bright", "citrus bright").with_community_score(0.0);

    let default = calculate_match_score(&input);
    assert_eq!(default.overall, 70);

    let engine = MatchEngine::with_policy(
        Taxonomy::flavor_preset(),
        Taxonomy::sensory_preset(),
        ScoringPolicy { community_weight: 0.0 },
    );
    assert_eq!(engine.calculate_match_score(&input).overall, 100);
}

/// 非有限のコミュニティスコアは無視される
#[test]
fn test_non_finite_community_ignored() {
    let base = score("citrus", "citrus");
    let nan = calculate_match_score(&TastingInput::new("citrus", "citrus").with_community_score(f64::NAN));
    assert_eq!(nan.community_score, None);
    assert_eq!(nan.overall, base.overall);
}

/// 長すぎる入力でも完走する
#[test]
fn test_long_input() {
    let taste = "citrus chocolate ".repeat(2000);
    let result = score(&taste, "citrus, chocolate");
    assert!(result.overall <= 100);
    assert!(result.matched_flavors.contains(&"citrus".to_string()));
}

/// 辞書照合は大文字小文字を無視して高信頼になる
#[test]
fn test_fuzzy_uppercase_token() {
    let candidates = coffee_match_common::find_best_matches("ETHIOPIAN", &["kenyan", "ethiopian"]);
    assert_eq!(candidates[0].matched_variant, "ethiopian");
    assert_eq!(candidates[0].confidence, coffee_match_common::Confidence::High);
}

/// インサイト生成の帯域ごとの文言
#[test]
fn test_generate_insights_directly() {
    use coffee_match_common::generate_insights;

    assert!(generate_insights(90, 90, 90, None).iter().any(|s| s.contains(EXCELLENT_MARKER)));
    assert!(generate_insights(30, 30, 30, None).iter().any(|s| s.contains(IMPROVE_MARKER)));
    assert!(!generate_insights(0, 0, 0, None).is_empty());
}

/// 香味を表さない一般語はカテゴリにならない
#[test]
fn test_plain_words_do_not_match() {
    let cases = [
        ("I like it", "lime"),
        ("a hint of something", "mint"),
        ("here it is", "herb"),
        ("fine", "wine"),
        ("salt", "malt"),
        ("the team", "black tea"),
    ];

    for (taste, note) in cases {
        let result = score(taste, note);
        assert_eq!(result.flavor_matching, 0, "{} / {}", taste, note);
        assert!(result.matched_flavors.is_empty(), "{} / {}", taste, note);
    }
}

/// ノート中の "roaster" は "roasted" として検出されない
#[test]
fn test_roaster_word_is_not_a_descriptor() {
    let explanation = MatchEngine::default().explain(&TastingInput::new(
        "roasted and smoky",
        "Our roaster tasted cherry and jasmine",
    ));
    assert!(explanation
        .flavor
        .roaster_hits
        .iter()
        .all(|h| h.evidence != "roaster" && h.evidence != "tasted"));
    assert!(!explanation.result.matched_flavors.contains(&"roasted".to_string()));
}

/// 活用形は引き続き検出される
#[test]
fn test_inflected_descriptors_still_match() {
    let result = score("chocolatey, lemony and brighter", "chocolate, lemon, bright");
    assert_eq!(result.matched_flavors, vec!["citrus".to_string(), "chocolate".to_string()]);
    assert_eq!(result.matched_sensory, vec!["acidity".to_string()]);
}
