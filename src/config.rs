use crate::cli::ReportFormat;
use crate::error::{CoffeeMatchError, Result};
use coffee_match_common::blender::DEFAULT_COMMUNITY_WEIGHT;
use coffee_match_common::{MatchEngine, ScoringPolicy, Taxonomy, TaxonomyKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 香味タクソノミーJSON（未設定なら組み込みプリセット）
    pub flavor_taxonomy: Option<PathBuf>,
    /// 感覚タクソノミーJSON（未設定なら組み込みプリセット）
    pub sensory_taxonomy: Option<PathBuf>,
    pub community_weight: f64,
    pub default_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flavor_taxonomy: None,
            sensory_taxonomy: None,
            community_weight: DEFAULT_COMMUNITY_WEIGHT,
            default_format: ReportFormat::Json,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoffeeMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("coffee-match").join("config.json"))
    }

    pub fn set_community_weight(&mut self, weight: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(CoffeeMatchError::Config(format!(
                "コミュニティの重みは0.0〜1.0で指定してください: {}",
                weight
            )));
        }
        self.community_weight = weight;
        Ok(())
    }

    pub fn set_taxonomy(&mut self, kind: TaxonomyKind, path: Option<PathBuf>) -> Result<()> {
        if let Some(p) = &path {
            if !p.exists() {
                return Err(CoffeeMatchError::FileNotFound(p.display().to_string()));
            }
            // 保存前に読めることを確認
            Taxonomy::from_file(kind, p)?;
        }
        match kind {
            TaxonomyKind::Flavor => self.flavor_taxonomy = path,
            TaxonomyKind::Sensory => self.sensory_taxonomy = path,
        }
        Ok(())
    }

    /// 設定されたタクソノミーを読み込む
    pub fn load_taxonomy(&self, kind: TaxonomyKind) -> Result<Taxonomy> {
        let path = match kind {
            TaxonomyKind::Flavor => self.flavor_taxonomy.as_ref(),
            TaxonomyKind::Sensory => self.sensory_taxonomy.as_ref(),
        };

        match path {
            Some(p) if !p.exists() => Err(CoffeeMatchError::FileNotFound(p.display().to_string())),
            Some(p) => Ok(Taxonomy::from_file(kind, p)?),
            None => Ok(match kind {
                TaxonomyKind::Flavor => Taxonomy::flavor_preset(),
                TaxonomyKind::Sensory => Taxonomy::sensory_preset(),
            }),
        }
    }

    pub fn build_engine(&self) -> Result<MatchEngine> {
        let flavor = self.load_taxonomy(TaxonomyKind::Flavor)?;
        let sensory = self.load_taxonomy(TaxonomyKind::Sensory)?;
        let policy = ScoringPolicy {
            community_weight: self.community_weight,
        };
        Ok(MatchEngine::with_policy(flavor, sensory, policy))
    }
}
