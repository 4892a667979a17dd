//! タクソノミーのフィンガープリント
//!
//! 辞書はエンジンと一緒に版管理されるため、レポートにはどの辞書で
//! 採点したかを SHA-256 で残す。

use crate::error::Result;
use coffee_match_common::{MatchEngine, Taxonomy};
use sha2::{Digest, Sha256};

/// タクソノミー1つのフィンガープリント（先頭12桁）
pub fn taxonomy_fingerprint(taxonomy: &Taxonomy) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(taxonomy.kind().to_string().as_bytes());
    hasher.update(taxonomy.to_json()?.as_bytes());
    Ok(short(&hasher.finalize()))
}

/// エンジンが使う両タクソノミーをまとめたフィンガープリント
pub fn engine_fingerprint(engine: &MatchEngine) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(engine.flavor_taxonomy().to_json()?.as_bytes());
    hasher.update(b"\n");
    hasher.update(engine.sensory_taxonomy().to_json()?.as_bytes());
    Ok(short(&hasher.finalize()))
}

fn short(digest: &[u8]) -> String {
    let mut hex = hex::encode(digest);
    hex.truncate(12);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffee_match_common::{TaxonomyEntry, TaxonomyKind};

    #[test]
    fn test_fingerprint_is_stable() {
        let a = taxonomy_fingerprint(&Taxonomy::flavor_preset()).unwrap();
        let b = taxonomy_fingerprint(&Taxonomy::flavor_preset()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let small = Taxonomy::new(
            TaxonomyKind::Flavor,
            vec![TaxonomyEntry::new("citrus", &["orange"], 0.8)],
        )
        .unwrap();
        assert_ne!(
            taxonomy_fingerprint(&small).unwrap(),
            taxonomy_fingerprint(&Taxonomy::flavor_preset()).unwrap()
        );
    }

    #[test]
    fn test_engine_fingerprint() {
        let engine = MatchEngine::default();
        assert_eq!(
            engine_fingerprint(&engine).unwrap(),
            engine_fingerprint(&MatchEngine::default()).unwrap()
        );
    }
}
