use clap::{Parser, Subcommand};
use coffee_match_common::TaxonomyKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coffee-match")]
#[command(about = "コーヒーテイスティングメモのマッチスコアツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テイスティングメモを1件採点
    Score {
        /// テイスターのメモ
        #[arg(short, long, default_value = "")]
        taste: String,

        /// ロースターのノート
        #[arg(short, long, default_value = "")]
        note: String,

        /// コーヒー名
        #[arg(long, default_value = "")]
        coffee_name: String,

        /// ロースタリー名
        #[arg(long, default_value = "")]
        roastery: String,

        /// コミュニティ集計スコア（0-100）
        #[arg(short, long)]
        community: Option<f64>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 検出カテゴリの内訳を表示
        #[arg(long)]
        explain: bool,
    },

    /// テイスティング記録（JSON）を一括採点
    Batch {
        /// 入力JSONファイルまたはフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/excel/both)、省略時は設定値
        #[arg(short, long)]
        format: Option<ReportFormat>,

        /// レポート名
        #[arg(short, long, default_value = "match-report")]
        title: String,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 対話的にメモを入力して採点
    Taste,

    /// タクソノミーを表示/書き出し
    Taxonomy {
        /// 対象 (flavor/sensory)、省略時は両方
        #[arg(short, long)]
        kind: Option<TaxonomyKind>,

        /// JSONを書き出すディレクトリ
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// コミュニティスコアの重み (0.0-1.0)
        #[arg(long)]
        set_community_weight: Option<f64>,

        /// 香味タクソノミーJSONを設定
        #[arg(long)]
        set_flavor_taxonomy: Option<PathBuf>,

        /// 感覚タクソノミーJSONを設定
        #[arg(long)]
        set_sensory_taxonomy: Option<PathBuf>,

        /// 既定の出力形式を設定
        #[arg(long)]
        set_default_format: Option<ReportFormat>,

        /// タクソノミーを組み込みプリセットに戻す
        #[arg(long)]
        reset_taxonomies: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Excel,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Excel => write!(f, "excel"),
            ReportFormat::Both => write!(f, "both"),
        }
    }
}
