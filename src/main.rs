//! streamliner-tools: helpers for the stream fusion evaluation.
//!
//! - `build` clones the evaluation corpus at pinned revisions and compiles it
//! - `plot` compares JMH benchmark results as a table or a bar chart

mod app;
mod build;
mod cli;
mod data;
mod logging;
mod ui;

use anyhow::{Context, Result};
use tracing::info;

use build::{parse_manifest, Driver, SystemRunner};
use cli::{BuildConfig, Cli, Commands, PlotConfig, PlotOutput, RUNTIMES_ENV};
use ui::{render_table, render_vm_line, save_svg, ChartModel, Theme};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    logging::init_cli_logging();

    match cli.command {
        Commands::Build {
            manifest,
            repos_dir,
            runtimes,
        } => {
            let config = BuildConfig::from_build_command(
                manifest,
                repos_dir,
                runtimes,
                std::env::var(RUNTIMES_ENV).ok(),
            )?;
            run_build(&config)?;
        }
        Commands::Plot {
            files,
            exclude,
            include,
            include_groups,
            ylim,
            figsize,
            table,
            pdf,
            keep_zero,
        } => {
            let config = PlotConfig::from_plot_command(
                files,
                exclude,
                include,
                include_groups,
                ylim,
                figsize,
                table,
                pdf,
                keep_zero,
            );
            run_plot(&config)?;
        }
    }

    Ok(())
}

fn run_build(config: &BuildConfig) -> Result<()> {
    let text = std::fs::read_to_string(&config.manifest)
        .with_context(|| format!("Failed to read manifest: {:?}", config.manifest))?;
    let entries = parse_manifest(&text)?;

    let runtimes: Vec<&str> = config.runtimes.iter().map(|r| r.name.as_str()).collect();
    info!(repositories = entries.len(), runtimes = ?runtimes, "starting");

    let runner = SystemRunner;
    Driver::new(&runner, &config.runtimes, config.repos_dir.clone()).run(&entries)?;
    Ok(())
}

fn run_plot(config: &PlotConfig) -> Result<()> {
    let set = data::load_results(&config.files, &config.filter, config.zero)?;
    let theme = Theme::default();

    match &config.output {
        PlotOutput::Table => {
            println!("{}", render_vm_line(set.vm.as_ref()));
            println!("{}", render_table(&set)?);
        }
        PlotOutput::Screen => {
            let model = ChartModel::build(&set, &theme, config.y_limit)?;
            app::run(&model, &config.title(), &theme)?;
        }
        PlotOutput::File(path) => {
            let model = ChartModel::build(&set, &theme, config.y_limit)?;
            save_svg(&model, config.figsize, &config.title(), path)?;
            info!(path = ?path, "saved chart");
        }
    }

    Ok(())
}
