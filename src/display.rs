//! 端末向けの結果表示

use coffee_match_common::{CategoryHit, DimensionScore, MatchExplanation, MatchScoreResult, Taxonomy};

pub fn print_result(result: &MatchScoreResult) {
    println!("☕ {} ({}点)", result.message, result.overall);
    println!("  香味: {}点  感覚: {}点", result.flavor_matching, result.sensory_matching);
    if let Some(community) = result.community_score {
        println!("  コミュニティ: {}点", community);
    }
    if !result.matched_flavors.is_empty() {
        println!("  一致した香味: {}", result.matched_flavors.join(", "));
    }
    if !result.matched_sensory.is_empty() {
        println!("  一致した感覚: {}", result.matched_sensory.join(", "));
    }
    println!();
    for insight in &result.insights {
        println!("  - {}", insight);
    }
}

pub fn print_explanation(explanation: &MatchExplanation) {
    print_result(&explanation.result);
    println!();
    print_dimension("香味", &explanation.flavor);
    print_dimension("感覚", &explanation.sensory);
}

fn print_dimension(label: &str, dimension: &DimensionScore) {
    println!("[{}] {}点", label, dimension.score);
    print_hits("  メモ", &dimension.user_hits);
    print_hits("  ノート", &dimension.roaster_hits);
    let missed = dimension.roaster_only();
    if !missed.is_empty() {
        println!("  見落とし: {}", missed.join(", "));
    }
}

fn print_hits(label: &str, hits: &[CategoryHit]) {
    if hits.is_empty() {
        println!("{}: (なし)", label);
        return;
    }
    let parts: Vec<String> = hits
        .iter()
        .map(|h| {
            format!(
                "{} ← '{}' ({:.2}, {})",
                h.category, h.evidence, h.similarity, h.confidence
            )
        })
        .collect();
    println!("{}: {}", label, parts.join(" / "));
}

pub fn print_taxonomy(taxonomy: &Taxonomy, fingerprint: &str) {
    println!(
        "{} ({}カテゴリ, fingerprint {})",
        taxonomy.kind(),
        taxonomy.len(),
        fingerprint
    );
    for entry in taxonomy.entries() {
        println!(
            "  {:<12} {:.2}  {}",
            entry.category,
            entry.intensity,
            entry.variants.join(", ")
        );
    }
}
