use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, FeedbackAction};
use config::Config;
use design_feedback::{cli, config, error, prompt, render, storage};
use design_feedback_common::display::format_average;
use design_feedback_common::feedback::sort_standalone;
use design_feedback_common::{
    filter_designs, sort_feedback, timestamp, GalleryQuery, NewDesign, NewStandaloneFeedback,
    CATEGORIES,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("ログの初期化に失敗しました")?;

    let mut config = Config::load().context("設定の読み込みに失敗しました")?;
    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => config.resolve_data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    match cli.command {
        Commands::Post { title, image_url, category, designer, description } => {
            let mut store = storage::design_store(&data_dir);
            let design = store.add(NewDesign {
                title,
                designer_name: designer,
                description,
                image_url,
                category,
            })?;

            println!("✔ デザインを投稿しました");
            println!("  ID: {}", design.id);
            println!(
                "  {} [{}] by {}",
                design.title,
                design.category,
                design.designer_display_name()
            );
        }

        Commands::List { query, category, sort } => {
            let store = storage::design_store(&data_dir);
            let designs = store.get_all()?;
            let query = GalleryQuery {
                text: query,
                category,
                sort: sort.unwrap_or(config.default_sort),
            };

            let filtered = filter_designs(&designs, &query);
            if filtered.is_empty() && !designs.is_empty() {
                println!("条件に一致するデザインがありません（全{}件）", designs.len());
            } else {
                print!("{}", render::render_design_list(&filtered));
            }
        }

        Commands::Show { id, sort } => {
            let store = storage::design_store(&data_dir);
            let Some(design) = store.get_by_id(&id)? else {
                println!("デザインが見つかりません: {}", id);
                return Ok(());
            };

            let sorted = sort_feedback(&design.feedback, sort.unwrap_or(config.default_sort));
            print!("{}", render::render_design_detail(&design, &sorted, timestamp::now()));
        }

        Commands::Rate { design_id, clarity, visual_appeal, brand_fit, comment, author } => {
            let mut store = storage::design_store(&data_dir);

            // 対話入力の前に存在確認
            if store.get_by_id(&design_id)?.is_none() {
                println!("デザインが見つかりません: {}", design_id);
                return Ok(());
            }

            let feedback = prompt::complete_feedback(prompt::PartialFeedback {
                author,
                clarity,
                visual_appeal,
                brand_fit,
                comment,
            })?;

            match store.add_feedback(&design_id, feedback) {
                Ok(design) => {
                    println!("✔ フィードバックを追加しました（{}件目）", design.feedback.len());
                    println!("  平均: {}", format_average(design.average()));
                }
                Err(e) => {
                    let e = error::AppError::from(e);
                    if e.is_not_found() {
                        println!("デザインが見つかりません: {}", design_id);
                    } else {
                        return Err(e.into());
                    }
                }
            }
        }

        Commands::Delete { id } => {
            let mut store = storage::design_store(&data_dir);
            let before = store.get_all()?.len();
            let remaining = store.delete(&id)?;

            if remaining.len() < before {
                println!("✔ デザインを削除しました: {}", id);
            } else {
                println!("デザインが見つかりません: {}", id);
            }
            println!("  残り: {}件", remaining.len());
        }

        Commands::Categories => {
            for category in CATEGORIES {
                println!("{}", category);
            }
        }

        Commands::Feedback { action } => {
            let mut store = storage::feedback_store(&data_dir);

            match action {
                FeedbackAction::Submit {
                    design_name,
                    image_url,
                    clarity,
                    visual_appeal,
                    brand_fit,
                    comment,
                } => {
                    let feedback = store.add(NewStandaloneFeedback {
                        design_name,
                        image_url,
                        clarity,
                        visual_appeal,
                        brand_fit,
                        comment,
                    })?;
                    println!("✔ フィードバックを送信しました");
                    println!("  ID: {}", feedback.id);
                    println!("  平均: {}", format_average(feedback.average()));
                }
                FeedbackAction::List { sort } => {
                    let order = sort.unwrap_or(config.default_sort);
                    let items = sort_standalone(&store.get_all()?, order);
                    print!("{}", render::render_feedback_list(&items, timestamp::now()));
                }
                FeedbackAction::Delete { id } => {
                    let before = store.get_all()?.len();
                    let remaining = store.delete(&id)?;
                    if remaining.len() < before {
                        println!("✔ フィードバックを削除しました: {}", id);
                    } else {
                        println!("フィードバックが見つかりません: {}", id);
                    }
                }
            }
        }

        Commands::Storage { clear, info } => {
            if info || !clear {
                // デフォルトまたは--info: 情報表示
                let info = storage::storage_info(&data_dir)?;
                println!("保存データ情報:");
                println!("  パス: {}", info.dir.display());
                println!("  デザイン: {}件（フィードバック {}件）", info.designs, info.design_feedback);
                println!("  単独フィードバック: {}件", info.standalone_feedback);
                println!("  サイズ: {} bytes", info.bytes);
            }

            if clear {
                let removed = storage::clear_storage(&data_dir)
                    .with_context(|| format!("保存データ削除エラー: {}", data_dir.display()))?;
                if removed {
                    println!("✔ 保存データを削除しました: {}", data_dir.display());
                } else {
                    println!("保存データが存在しません");
                }
            }
        }

        Commands::Config { set_data_dir, set_default_sort, show } => {
            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データ保存先を設定しました");
            }

            if let Some(sort) = set_default_sort {
                config.default_sort = sort;
                config.save()?;
                println!("✔ 既定の並び順を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  データ保存先: {}", config.resolve_data_dir()?.display());
                println!("  既定の並び順: {}", config.default_sort);
            }
        }
    }

    Ok(())
}
