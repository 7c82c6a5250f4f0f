use anyhow::Context;
use clap::Parser;
use mapa_rust::{cli, config, inventory, pipeline};
use cli::{Cli, Commands, RenderArgs};
use config::Config;
use pipeline::RenderOptions;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("設定ファイルを読み込めません: {}", path.display()))?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or_else(|| Commands::Render(RenderArgs::default())) {
        Commands::Render(args) => {
            println!("🗺  mapa - 地図生成\n");

            let (options, config) = apply_render_args(args, config);
            let report = pipeline::render_map(&options, &config)
                .with_context(|| format!("地図を生成できません: {}", options.input.display()))?;

            println!(
                "\n✅ 完了 ({}/{}件を配置)",
                report.marker_ids.len(),
                report.total_places
            );
        }

        Commands::Icons { icons_dir } => {
            let dir = icons_dir.unwrap_or_else(|| config.icons_dir.clone());
            let icons = config.icon_table()?;
            let inventory = inventory::check_icons(&icons, &dir)?;

            println!("アイコン対応表 ({}):", dir.display());
            for entry in &inventory.entries {
                let mark = if entry.exists { "✔" } else { "✘" };
                let category = entry.category.as_deref().unwrap_or("(既定)");
                println!("  {} {} → {}", mark, category, entry.path.display());
            }

            if !inventory.unused.is_empty() {
                println!("\n未使用の画像:");
                for path in &inventory.unused {
                    println!("  - {}", path.display());
                }
            }

            if inventory.missing_count() > 0 {
                println!("\n{}件のアイコンが見つかりません", inventory.missing_count());
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = match &cli.config {
                    Some(path) => {
                        Config::default().save_to(path)?;
                        path.clone()
                    }
                    None => Config::default().save()?,
                };
                println!("✔ 設定ファイルを作成しました: {}", path.display());
            }

            if show || !init {
                println!("設定:");
                println!("  緯度/経度列: {} / {}", config.fields.latitude, config.fields.longitude);
                println!("  名前列: {}", config.fields.name);
                println!("  凡例列: {}", config.fields.category);
                println!("  アイコンフォルダ: {}", config.icons_dir.display());
                if let Some(path) = &config.icons_file {
                    println!("  アイコン対応表: {}", path.display());
                }
                let icons = config.icon_table()?;
                println!("  アイコン数: {}", icons.len());
                println!("  既定アイコン: {}", icons.default_icon());
                println!("  タイル: {}", config.tiles);
                println!("  ズーム: {} (選択時 {})", config.zoom_start, config.focus_zoom);
                println!("  HTMLエスケープ: {}", if config.trusted_html { "無効" } else { "有効" });
            }
        }
    }

    Ok(())
}

/// コマンドライン指定で設定を上書き
fn apply_render_args(args: RenderArgs, mut config: Config) -> (RenderOptions, Config) {
    if let Some(dir) = args.icons_dir {
        config.icons_dir = dir;
    }
    if let Some(zoom) = args.zoom {
        config.zoom_start = zoom;
    }
    if let Some(tiles) = args.tiles {
        config.tiles = tiles.to_string();
    }
    if let Some(title) = args.title {
        config.title = title;
    }
    if args.trusted_html {
        config.trusted_html = true;
    }

    let options = RenderOptions {
        input: args.input,
        output: args.output,
        sheet: args.sheet,
    };
    (options, config)
}
