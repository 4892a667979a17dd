use clap::Parser;
use coffee_match::{batch, cli, config, display, error, export, fingerprint, journal, taste};
use cli::{Cli, Commands};
use coffee_match_common::{TastingInput, TaxonomyKind};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;

    match cli.command {
        Commands::Score { taste, note, coffee_name, roastery, community, json, explain } => {
            let engine = config.build_engine()?;
            let mut input = TastingInput::new(taste, note).with_coffee(coffee_name, roastery);
            input.community_score = community;

            if json {
                if explain {
                    println!("{}", serde_json::to_string_pretty(&engine.explain(&input))?);
                } else {
                    println!("{}", serde_json::to_string_pretty(&engine.calculate_match_score(&input))?);
                }
            } else if explain {
                display::print_explanation(&engine.explain(&input));
            } else {
                display::print_result(&engine.calculate_match_score(&input));
            }
        }

        Commands::Batch { input, output, format, title, recursive } => {
            println!("☕ coffee-match - 一括採点\n");

            // 1. 記録の読み込み
            println!("[1/3] テイスティング記録を読み込み中...");
            let records = journal::load_records(&input, recursive)?;
            if records.is_empty() {
                return Err(error::CoffeeMatchError::NoRecordsFound(
                    input.display().to_string(),
                ));
            }
            println!("✔ {}件の記録を検出\n", records.len());

            // 2. 採点
            println!("[2/3] 採点中...");
            let engine = config.build_engine()?;
            let report = batch::build_report(&engine, &records, true)?;
            if let Some(avg) = report.average_overall() {
                println!("✔ 採点完了（平均 {:.1}点）\n", avg);
            }

            // 3. 出力
            let format = format.unwrap_or(config.default_format);
            println!("[3/3] レポートを出力中... ({})", format);
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            for path in export::export_report(&report, format, &output_dir, &title)? {
                println!("✔ 出力: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Taste => {
            println!("☕ coffee-match - テイスティング入力\n");
            let engine = config.build_engine()?;
            let input = taste::prompt_tasting()?;
            println!();
            display::print_result(&engine.calculate_match_score(&input));
        }

        Commands::Taxonomy { kind, export } => {
            let kinds = match kind {
                Some(k) => vec![k],
                None => vec![TaxonomyKind::Flavor, TaxonomyKind::Sensory],
            };

            for kind in kinds {
                let taxonomy = config.load_taxonomy(kind)?;
                if let Some(dir) = &export {
                    std::fs::create_dir_all(dir)?;
                    let path = dir.join(format!("{}.json", kind));
                    std::fs::write(&path, taxonomy.to_json()?)?;
                    println!("✔ {} を書き出しました: {}", kind, path.display());
                } else {
                    display::print_taxonomy(&taxonomy, &fingerprint::taxonomy_fingerprint(&taxonomy)?);
                    println!();
                }
            }
        }

        Commands::Config {
            show,
            set_community_weight,
            set_flavor_taxonomy,
            set_sensory_taxonomy,
            set_default_format,
            reset_taxonomies,
        } => {
            let mut changed = false;

            if let Some(weight) = set_community_weight {
                config.set_community_weight(weight)?;
                changed = true;
            }
            if reset_taxonomies {
                config.set_taxonomy(TaxonomyKind::Flavor, None)?;
                config.set_taxonomy(TaxonomyKind::Sensory, None)?;
                changed = true;
            }
            if let Some(path) = set_flavor_taxonomy {
                config.set_taxonomy(TaxonomyKind::Flavor, Some(path))?;
                changed = true;
            }
            if let Some(path) = set_sensory_taxonomy {
                config.set_taxonomy(TaxonomyKind::Sensory, Some(path))?;
                changed = true;
            }
            if let Some(format) = set_default_format {
                config.default_format = format;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let preset = "組み込みプリセット".to_string();
                println!("設定:");
                println!(
                    "  香味タクソノミー: {}",
                    config.flavor_taxonomy.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| preset.clone())
                );
                println!(
                    "  感覚タクソノミー: {}",
                    config.sensory_taxonomy.as_ref().map(|p| p.display().to_string()).unwrap_or(preset)
                );
                println!("  コミュニティの重み: {}", config.community_weight);
                println!("  既定の出力形式: {}", config.default_format);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
