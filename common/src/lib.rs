//! Coffee Match Common Library
//!
//! テイスターの自由記述メモとロースターのノートを照合し、
//! 0〜100 のマッチスコアとフィードバックを返すエンジン。
//! I/Oは行わない（辞書ファイルの読み込みを除く）。

pub mod types;
pub mod error;
pub mod taxonomy;
pub mod normalizer;
pub mod fuzzy;
pub mod scorer;
pub mod blender;
pub mod insights;
pub mod engine;
pub mod export;

pub use types::{MatchScoreResult, TastingInput};
pub use error::{Error, Result};
pub use taxonomy::{Taxonomy, TaxonomyEntry, TaxonomyKind};
pub use fuzzy::{find_best_matches, Confidence, MatchCandidate};
pub use scorer::{CategoryHit, DimensionScore, DimensionScorer};
pub use blender::blend;
pub use insights::{generate_insights, MatchBand};
pub use engine::{calculate_match_score, MatchEngine, MatchExplanation, ScoringPolicy};
