use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use version_menu::config::PluginConfig;
use version_menu::dom::{NodeTree, render_dropdown};
use version_menu::logging::{LogOptions, init_tracing};
use version_menu::menu::DropdownBuilder;
use version_menu::sync::{VersionSync, build_asset, read_asset, write_asset};
use version_menu::version::registries::create_registry;

#[derive(Parser)]
#[command(name = "version-menu")]
#[command(version, about = "Versions dropdown for documentation sites")]
struct Cli {
    /// Log filter directives (defaults to RUST_LOG, then info)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr (the data directory's log file when no path is given)
    #[arg(long, global = true, num_args = 0..=1, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the package versions and write the build asset
    Prefetch {
        /// Plugin config file (JSON)
        #[arg(long, default_value = "version-menu.json")]
        config: PathBuf,

        /// Asset to write
        #[arg(long, default_value = "versions.json")]
        out: PathBuf,
    },
    /// Resolve the dropdown from a build asset, as a page would
    Render {
        /// Asset written by `prefetch`
        #[arg(long, default_value = "versions.json")]
        asset: PathBuf,

        /// Origin the docs are served from (e.g. https://www.chartjs.org)
        #[arg(long, default_value = "")]
        origin: String,

        /// Don't refresh the versions from the registry
        #[arg(long)]
        offline: bool,

        /// Print the rendered dropdown HTML
        #[arg(long)]
        html: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_options = LogOptions {
        level: cli.log_level,
        file: None,
        json: cli.log_json,
    };
    if let Some(file) = cli.log_file {
        log_options = log_options.with_file(file);
    }
    let _guard = init_tracing(&log_options)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Prefetch { config, out } => {
            let config = PluginConfig::load(&config)?;
            let registry = create_registry(&config.registry);
            let asset = build_asset(registry.as_ref(), &config)
                .await
                .context("Cannot build the versions asset")?;
            write_asset(&out, &asset)?;
        }
        Command::Render {
            asset,
            origin,
            offline,
            html,
        } => {
            let asset = read_asset(&asset)?;
            info!("Using versions generated at {}", asset.generated_at);

            let config = asset.config;
            let builder = DropdownBuilder::from_config(&config, &origin);
            let registry = create_registry(&config.registry);
            let mut sync = VersionSync::new(config, builder, registry);

            sync.seed();
            println!("{}", serde_json::to_string_pretty(&sync.data())?);

            if !offline {
                sync.refresh().await;
                println!("{}", serde_json::to_string_pretty(&sync.data())?);
            }

            if html {
                let mut tree = NodeTree::new();
                let el = render_dropdown(&mut tree, &sync.data());
                println!("{}", tree.outer_html(el));
            }
        }
    }

    Ok(())
}
