//! 風味・感覚タクソノミー
//!
//! 正規カテゴリ（例: "citrus"）と、そこへ解決される表記ゆれ
//! （"오렌지", "레몬", "citrusy" など）の対応表。
//! 一度構築したら変更しない。スコアラーへは値として注入する。
//!
//! ## JSON形式
//! ```json
//! {
//!   "citrus": { "variants": ["citrus", "orange", "오렌지"], "intensity": 0.85 },
//!   "chocolate": { "variants": ["chocolate", "초콜릿"], "intensity": 0.7 }
//! }
//! ```
//! キーの順序がそのままカテゴリの反復順になる。

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// タクソノミーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    /// 香味（フルーツ、チョコレート、ナッツ…）
    Flavor,
    /// 口当たり・構造（酸味、ボディ、甘さ…）
    Sensory,
}

impl std::fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxonomyKind::Flavor => write!(f, "flavor"),
            TaxonomyKind::Sensory => write!(f, "sensory"),
        }
    }
}

impl std::str::FromStr for TaxonomyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flavor" | "flavour" | "향미" => Ok(TaxonomyKind::Flavor),
            "sensory" | "감각" => Ok(TaxonomyKind::Sensory),
            _ => Err(format!("Unknown taxonomy: {}. Use flavor or sensory", s)),
        }
    }
}

/// カテゴリ1件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyEntry {
    /// 正規カテゴリ名
    pub category: String,
    /// 同義語（小文字、重複なし、登録順）
    pub variants: Vec<String>,
    /// 特徴の強さ（0より大きく1.0以下）
    pub intensity: f64,
}

impl TaxonomyEntry {
    pub fn new<S: AsRef<str>>(category: &str, variants: &[S], intensity: f64) -> Self {
        let mut seen = HashSet::new();
        let variants = variants
            .iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .filter(|v| !v.is_empty() && seen.insert(v.clone()))
            .collect();

        Self {
            category: category.trim().to_lowercase(),
            variants,
            intensity,
        }
    }
}

/// JSON上のカテゴリ定義
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryData {
    variants: Vec<String>,
    intensity: f64,
}

/// 不変のタクソノミー
#[derive(Debug, Clone)]
pub struct Taxonomy {
    kind: TaxonomyKind,
    entries: Vec<TaxonomyEntry>,
    /// 全カテゴリの表記をフラットに並べたもの（ファジー照合用）
    variants: Vec<String>,
    /// `variants[i]` が属するカテゴリの添字
    owners: Vec<usize>,
}

impl Taxonomy {
    /// 検証付きで構築
    pub fn new(kind: TaxonomyKind, entries: Vec<TaxonomyEntry>) -> Result<Self> {
        let taxonomy = Self::from_entries(kind, entries);
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    fn from_entries(kind: TaxonomyKind, entries: Vec<TaxonomyEntry>) -> Self {
        let mut variants = Vec::new();
        let mut owners = Vec::new();
        for (idx, entry) in entries.iter().enumerate() {
            for variant in &entry.variants {
                variants.push(variant.clone());
                owners.push(idx);
            }
        }

        Self {
            kind,
            entries,
            variants,
            owners,
        }
    }

    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.parse::<TaxonomyKind>().ok()? {
            TaxonomyKind::Flavor => Some(Self::flavor_preset()),
            TaxonomyKind::Sensory => Some(Self::sensory_preset()),
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(kind: TaxonomyKind, path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_json(kind, &content)?;
        tracing::info!(
            "Loaded {} taxonomy from {} ({} categories)",
            kind,
            path.display(),
            taxonomy.len()
        );
        Ok(taxonomy)
    }

    /// JSON文字列から読み込み
    pub fn from_json(kind: TaxonomyKind, json: &str) -> Result<Self> {
        let data: IndexMap<String, EntryData> = serde_json::from_str(json)?;
        let entries = data
            .iter()
            .map(|(category, d)| TaxonomyEntry::new(category, &d.variants, d.intensity))
            .collect();
        Self::new(kind, entries)
    }

    /// JSON文字列へ書き出し（`from_json` と同じ形式）
    pub fn to_json(&self) -> Result<String> {
        let data: IndexMap<&str, EntryData> = self
            .entries
            .iter()
            .map(|e| {
                (
                    e.category.as_str(),
                    EntryData {
                        variants: e.variants.clone(),
                        intensity: e.intensity,
                    },
                )
            })
            .collect();
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// 整合性チェック
    pub fn validate(&self) -> Result<()> {
        let mut categories = HashSet::new();
        let mut variants: std::collections::HashMap<&str, &str> = std::collections::HashMap::new();

        for entry in &self.entries {
            if entry.category.is_empty() {
                return Err(Error::InvalidTaxonomy(format!(
                    "{}: empty category name",
                    self.kind
                )));
            }
            if !categories.insert(entry.category.as_str()) {
                return Err(Error::InvalidTaxonomy(format!(
                    "{}: duplicate category '{}'",
                    self.kind, entry.category
                )));
            }
            if entry.variants.is_empty() {
                return Err(Error::InvalidTaxonomy(format!(
                    "{}: category '{}' has no variants",
                    self.kind, entry.category
                )));
            }
            // 0 だと両側で検出しても重みが付かない
            if !(entry.intensity > 0.0 && entry.intensity <= 1.0) {
                return Err(Error::InvalidTaxonomy(format!(
                    "{}: category '{}' intensity {} is outside (0, 1]",
                    self.kind, entry.category, entry.intensity
                )));
            }
            for variant in &entry.variants {
                if let Some(other) = variants.insert(variant.as_str(), entry.category.as_str()) {
                    return Err(Error::InvalidTaxonomy(format!(
                        "{}: variant '{}' belongs to both '{}' and '{}'",
                        self.kind, variant, other, entry.category
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// カテゴリ名で検索
    pub fn entry(&self, category: &str) -> Option<&TaxonomyEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// 照合対象の全表記（カテゴリ順 → 登録順）
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// `variants()[variant_idx]` が属するカテゴリの添字
    pub fn owner_of(&self, variant_idx: usize) -> Option<usize> {
        self.owners.get(variant_idx).copied()
    }

    /// 香味プリセット
    pub fn flavor_preset() -> Self {
        let entries = vec![
            TaxonomyEntry::new(
                "fruity",
                &["fruity", "fruit", "fruits", "fruitiness", "과일", "과일향", "과일맛", "프루티"],
                0.6,
            ),
            TaxonomyEntry::new(
                "berry",
                &[
                    "berry", "berries", "strawberry", "blueberry", "raspberry", "blackberry",
                    "cranberry", "blackcurrant", "베리", "딸기", "블루베리", "라즈베리",
                    "블랙베리", "크랜베리",
                ],
                0.9,
            ),
            TaxonomyEntry::new(
                "citrus",
                &[
                    "citrus", "citrusy", "orange", "lemon", "lime", "grapefruit", "tangerine",
                    "mandarin", "bergamot", "yuzu", "시트러스", "오렌지", "레몬", "라임", "자몽",
                    "귤", "감귤", "유자",
                ],
                0.85,
            ),
            TaxonomyEntry::new(
                "stone_fruit",
                &[
                    "stone fruit", "peach", "apricot", "plum", "cherry", "nectarine", "복숭아",
                    "천도복숭아", "살구", "자두", "체리",
                ],
                0.85,
            ),
            TaxonomyEntry::new(
                "tropical",
                &[
                    "tropical", "mango", "pineapple", "passion fruit", "passionfruit", "banana",
                    "papaya", "melon", "lychee", "열대과일", "망고", "파인애플", "패션후르츠",
                    "바나나", "멜론", "리치",
                ],
                0.85,
            ),
            TaxonomyEntry::new(
                "floral",
                &[
                    "floral", "flower", "flowers", "jasmine", "rose", "lavender", "hibiscus",
                    "orange blossom", "elderflower", "플로럴", "꽃향", "꽃향기", "자스민",
                    "재스민", "장미", "라벤더", "히비스커스",
                ],
                0.9,
            ),
            TaxonomyEntry::new(
                "tea",
                &[
                    "tea", "tea-like", "black tea", "green tea", "earl grey", "oolong", "홍차",
                    "녹차", "얼그레이", "우롱",
                ],
                0.75,
            ),
            TaxonomyEntry::new(
                "herbal",
                &[
                    "herbal", "herb", "herbs", "mint", "basil", "rosemary", "grassy", "허브",
                    "민트", "바질", "풀향",
                ],
                0.75,
            ),
            TaxonomyEntry::new(
                "chocolate",
                &[
                    "chocolate", "chocolatey", "dark chocolate", "milk chocolate", "cocoa",
                    "cacao", "초콜릿", "초콜렛", "초코", "다크초콜릿", "카카오", "코코아",
                ],
                0.7,
            ),
            TaxonomyEntry::new(
                "caramel",
                &[
                    "caramel", "toffee", "honey", "molasses", "brown sugar", "maple",
                    "butterscotch", "카라멜", "캐러멜", "토피", "꿀향", "흑설탕", "메이플", "당밀",
                ],
                0.65,
            ),
            TaxonomyEntry::new(
                "nutty",
                &[
                    "nutty", "nut", "nuts", "almond", "hazelnut", "walnut", "peanut", "pecan",
                    "견과", "견과류", "고소", "고소한", "아몬드", "헤이즐넛", "호두", "땅콩",
                ],
                0.6,
            ),
            TaxonomyEntry::new(
                "spicy",
                &[
                    "spicy", "spice", "cinnamon", "clove", "pepper", "cardamom", "nutmeg",
                    "ginger", "스파이시", "향신료", "시나몬", "계피", "정향", "후추", "생강",
                ],
                0.8,
            ),
            TaxonomyEntry::new(
                "winey",
                &[
                    "winey", "wine", "wine-like", "red wine", "fermented", "boozy", "rum",
                    "whiskey", "와인", "와이니", "발효", "럼",
                ],
                0.8,
            ),
            TaxonomyEntry::new(
                "earthy",
                &[
                    "earthy", "earth", "woody", "cedar", "tobacco", "leather", "흙내음", "얼씨",
                    "우디", "나무향", "삼나무", "담배",
                ],
                0.7,
            ),
            TaxonomyEntry::new(
                "roasted",
                &[
                    "roasted", "roasty", "smoky", "toasted", "toast", "burnt", "cereal", "malt",
                    "로스티", "스모키", "구운", "토스트", "탄맛", "곡물", "몰트",
                ],
                0.5,
            ),
        ];

        Self::from_entries(TaxonomyKind::Flavor, entries)
    }

    /// 感覚プリセット
    pub fn sensory_preset() -> Self {
        let entries = vec![
            TaxonomyEntry::new(
                "acidity",
                &[
                    "acidity", "acidic", "acid", "bright", "brightness", "lively", "tart",
                    "tangy", "zesty", "crisp", "juicy", "vibrant", "산미", "산도", "상큼",
                    "새콤", "산뜻", "밝은", "밝고", "신맛", "시큼", "쥬시",
                ],
                0.9,
            ),
            TaxonomyEntry::new(
                "body",
                &[
                    "body", "bodied", "full-bodied", "full body", "smooth", "silky", "creamy",
                    "velvety", "syrupy", "heavy", "rich", "mouthfeel", "바디", "바디감",
                    "부드러", "부드럽", "묵직", "묵직한", "크리미", "실키", "매끄러", "무게감",
                    "질감",
                ],
                0.8,
            ),
            TaxonomyEntry::new(
                "sweetness",
                &[
                    "sweet", "sweetness", "sugary", "단맛", "달콤", "달콤한", "달달", "당도",
                ],
                0.7,
            ),
            TaxonomyEntry::new(
                "balance",
                &[
                    "balance", "balanced", "harmonious", "harmony", "rounded", "well-rounded",
                    "균형", "균형감", "밸런스", "조화", "조화로운",
                ],
                0.6,
            ),
            TaxonomyEntry::new(
                "complexity",
                &[
                    "complex", "complexity", "layered", "nuanced", "multi-layered", "depth",
                    "복합", "복합적", "복잡", "다채", "다채로운", "풍부",
                ],
                0.7,
            ),
            TaxonomyEntry::new(
                "aftertaste",
                &[
                    "aftertaste", "finish", "lingering", "long finish", "여운", "후미", "뒷맛",
                    "애프터테이스트", "피니시",
                ],
                0.6,
            ),
            TaxonomyEntry::new(
                "bitterness",
                &["bitter", "bitterness", "쓴맛", "씁쓸", "쌉싸름", "쌉쌀"],
                0.5,
            ),
            TaxonomyEntry::new(
                "clarity",
                &["clean", "clarity", "clear", "transparent", "깔끔", "깔끔한", "깨끗", "클린"],
                0.6,
            ),
        ];

        Self::from_entries(TaxonomyKind::Sensory, entries)
    }
}
