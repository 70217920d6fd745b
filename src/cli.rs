//! Command-line interface argument parsing for streamliner-tools.
//!
//! - `streamliner-tools build --manifest repos.txt`
//! - `streamliner-tools plot out.json --table`
//! - `streamliner-tools plot a.json b.json -x megamorphic --ylim 200 --pdf`

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::build::{default_runtimes, BuildError, RuntimeEnv};
use crate::data::{BenchmarkFilter, PlotError, ZeroPolicy};

/// Environment variable holding `NAME=JAVA_HOME` pairs, comma separated
pub const RUNTIMES_ENV: &str = "STREAMLINER_RUNTIMES";

/// Directory receiving vector charts
const CHART_DIR: &str = "pdfs";

/// Research helpers for the stream fusion evaluation.
#[derive(Parser, Debug)]
#[command(name = "streamliner-tools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone the repositories of a manifest and compile them
    Build {
        /// Manifest with one `URL REVISION` pair per line
        #[arg(short, long, default_value = "repos.txt")]
        manifest: PathBuf,

        /// Where repositories are cloned.
        /// Defaults to a `repos` directory next to the manifest
        #[arg(long)]
        repos_dir: Option<PathBuf>,

        /// Java runtime to try, as NAME=JAVA_HOME. Repeat to set the
        /// fallback order. Overrides $STREAMLINER_RUNTIMES
        #[arg(short, long = "runtime")]
        runtimes: Vec<String>,
    },

    /// Compare JMH benchmark results as a chart or a table
    Plot {
        /// JMH result files in JSON format
        #[arg(default_value = "out.json")]
        files: Vec<PathBuf>,

        /// Blacklist benchmarks
        #[arg(short = 'x', long, num_args = 1..)]
        exclude: Vec<String>,

        /// Whitelist benchmarks
        #[arg(short, long, num_args = 1..)]
        include: Vec<String>,

        /// Whitelist groups
        #[arg(short = 'g', long = "includeg", num_args = 1..)]
        include_groups: Vec<String>,

        /// Cut the y axis off at this value
        #[arg(short, long)]
        ylim: Option<u32>,

        /// Figure size as a comma separated list of width and height. E.g. 8,5
        #[arg(long, default_value = "16,10", value_parser = parse_figsize)]
        figsize: (u32, u32),

        /// Print a table instead of drawing a chart
        #[arg(long)]
        table: bool,

        /// Save the chart as a vector file instead of showing it
        #[arg(long)]
        pdf: bool,

        /// Treat a score of exactly 0 as a measurement rather than missing
        #[arg(long)]
        keep_zero: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Parse `W,H`
pub fn parse_figsize(s: &str) -> Result<(u32, u32), PlotError> {
    let invalid = || PlotError::InvalidFigsize(s.to_string());
    let (w, h) = s.split_once(',').ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

/// Configuration for the build subcommand
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub manifest: PathBuf,
    pub repos_dir: PathBuf,
    pub runtimes: Vec<RuntimeEnv>,
}

impl BuildConfig {
    /// Runtimes come from the flags, then the environment, then the defaults
    pub fn from_build_command(
        manifest: PathBuf,
        repos_dir: Option<PathBuf>,
        runtimes: Vec<String>,
        env_runtimes: Option<String>,
    ) -> Result<Self, BuildError> {
        let repos_dir = repos_dir.unwrap_or_else(|| {
            manifest
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("repos")
        });

        let runtimes = if !runtimes.is_empty() {
            runtimes
                .iter()
                .map(|r| RuntimeEnv::parse(r))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            match env_runtimes.filter(|v| !v.trim().is_empty()) {
                Some(list) => RuntimeEnv::parse_list(&list)?,
                None => default_runtimes(),
            }
        };

        Ok(BuildConfig {
            manifest,
            repos_dir,
            runtimes,
        })
    }
}

/// Output of the plot subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotOutput {
    Table,
    /// Interactive terminal chart
    Screen,
    File(PathBuf),
}

/// Configuration for the plot subcommand
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub files: Vec<PathBuf>,
    pub filter: BenchmarkFilter,
    pub zero: ZeroPolicy,
    pub y_limit: Option<f64>,
    pub figsize: (u32, u32),
    pub output: PlotOutput,
}

impl PlotConfig {
    /// Create PlotConfig from CLI Commands
    #[allow(clippy::too_many_arguments)]
    pub fn from_plot_command(
        files: Vec<PathBuf>,
        exclude: Vec<String>,
        include: Vec<String>,
        include_groups: Vec<String>,
        ylim: Option<u32>,
        figsize: (u32, u32),
        table: bool,
        pdf: bool,
        keep_zero: bool,
    ) -> Self {
        // Table mode wins over pdf
        let output = if table {
            PlotOutput::Table
        } else if pdf {
            let stem = files
                .first()
                .and_then(|f| f.file_stem())
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "out".to_string());
            PlotOutput::File(Path::new(CHART_DIR).join(format!("{stem}.svg")))
        } else {
            PlotOutput::Screen
        };

        PlotConfig {
            files,
            filter: BenchmarkFilter {
                include_groups,
                exclude,
                include,
            },
            zero: if keep_zero {
                ZeroPolicy::Keep
            } else {
                ZeroPolicy::Missing
            },
            // 0 means no cut-off
            y_limit: ylim.filter(|&y| y > 0).map(f64::from),
            figsize,
            output,
        }
    }

    /// Name shown as chart title
    pub fn title(&self) -> String {
        self.files
            .first()
            .map(|f| f.display().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build_config() {
        let config =
            BuildConfig::from_build_command(PathBuf::from("RQ2/repos.txt"), None, vec![], None)
                .unwrap();
        assert_eq!(config.repos_dir, PathBuf::from("RQ2/repos"));
        assert_eq!(config.runtimes, default_runtimes());

        let bare = BuildConfig::from_build_command(PathBuf::from("repos.txt"), None, vec![], None)
            .unwrap();
        assert_eq!(bare.repos_dir, PathBuf::from("repos"));
    }

    #[test]
    fn test_runtime_precedence() {
        let from_env = BuildConfig::from_build_command(
            PathBuf::from("repos.txt"),
            None,
            vec![],
            Some("jdk17=/opt/jdk17".to_string()),
        )
        .unwrap();
        assert_eq!(from_env.runtimes, vec![RuntimeEnv::new("jdk17", "/opt/jdk17")]);

        let from_flags = BuildConfig::from_build_command(
            PathBuf::from("repos.txt"),
            Some(PathBuf::from("/tmp/corpus")),
            vec!["jdk21=/opt/jdk21".to_string(), "jdk11=/opt/jdk11".to_string()],
            Some("jdk17=/opt/jdk17".to_string()),
        )
        .unwrap();
        assert_eq!(from_flags.repos_dir, PathBuf::from("/tmp/corpus"));
        assert_eq!(from_flags.runtimes[0].name, "jdk21");
        assert_eq!(from_flags.runtimes.len(), 2);

        assert!(BuildConfig::from_build_command(
            PathBuf::from("repos.txt"),
            None,
            vec!["broken".to_string()],
            None,
        )
        .is_err());
    }

    #[test]
    fn test_parse_figsize() {
        assert_eq!(parse_figsize("8,5").unwrap(), (8, 5));
        assert_eq!(parse_figsize("16, 10").unwrap(), (16, 10));
        assert!(parse_figsize("8").is_err());
        assert!(parse_figsize("0,5").is_err());
        assert!(parse_figsize("a,b").is_err());
    }

    #[test]
    fn test_plot_cli_defaults() {
        let cli = Cli::try_parse_from(["streamliner-tools", "plot"]).unwrap();
        let Commands::Plot {
            files,
            figsize,
            table,
            pdf,
            ..
        } = cli.command
        else {
            panic!("expected plot command");
        };
        assert_eq!(files, vec![PathBuf::from("out.json")]);
        assert_eq!(figsize, (16, 10));
        assert!(!table && !pdf);
    }

    #[test]
    fn test_plot_cli_lists() {
        let cli = Cli::try_parse_from([
            "streamliner-tools",
            "plot",
            "a.json",
            "b.json",
            "-x",
            "sum",
            "cart",
            "-g",
            "TestPush",
            "--ylim",
            "200",
            "--pdf",
        ])
        .unwrap();
        let Commands::Plot {
            files,
            exclude,
            include_groups,
            ylim,
            pdf,
            ..
        } = cli.command
        else {
            panic!("expected plot command");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(exclude, ["sum", "cart"]);
        assert_eq!(include_groups, ["TestPush"]);
        assert_eq!(ylim, Some(200));
        assert!(pdf);
    }

    #[test]
    fn test_plot_output_selection() {
        let files = vec![PathBuf::from("results/run1.json")];
        let pdf = PlotConfig::from_plot_command(
            files.clone(),
            vec![],
            vec![],
            vec![],
            None,
            (16, 10),
            false,
            true,
            false,
        );
        assert_eq!(pdf.output, PlotOutput::File(PathBuf::from("pdfs/run1.svg")));
        assert_eq!(pdf.zero, ZeroPolicy::Missing);
        assert_eq!(pdf.title(), "results/run1.json");

        let table =
            PlotConfig::from_plot_command(files, vec![], vec![], vec![], Some(50), (8, 5), true, true, true);
        assert_eq!(table.output, PlotOutput::Table);
        assert_eq!(table.zero, ZeroPolicy::Keep);
        assert_eq!(table.y_limit, Some(50.0));
    }

    #[test]
    fn test_zero_ylim_means_no_cutoff() {
        let config = PlotConfig::from_plot_command(
            vec![PathBuf::from("run.json")],
            vec![],
            vec![],
            vec![],
            Some(0),
            (16, 10),
            false,
            false,
            false,
        );
        assert_eq!(config.y_limit, None);
    }
}
