//! Command-line driver for replaying Game of Life patterns

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use life_replay::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_patterns, EdgePolicy},
    replay_from_settings,
    utils::{ColorOutput, PatternFormatter},
};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "life_replay")]
#[command(about = "Replay and analyze Game of Life patterns")]
#[command(version = "0.1.0")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a pattern for a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Edge policy (overrides config)
        #[arg(short, long, value_enum)]
        edge: Option<EdgeArg>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the replay to the output directory
        #[arg(long)]
        save: bool,
    },

    /// Report what becomes of a pattern
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Generations to examine (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Edge policy (overrides config)
        #[arg(short, long, value_enum)]
        edge: Option<EdgeArg>,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EdgeArg {
    Bounded,
    Toroidal,
}

impl From<EdgeArg> for EdgePolicy {
    fn from(arg: EdgeArg) -> Self {
        match arg {
            EdgeArg::Bounded => EdgePolicy::Bounded,
            EdgeArg::Toroidal => EdgePolicy::Toroidal,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Visual,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Visual => OutputFormat::Visual,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            pattern,
            generations,
            edge,
            format,
            output,
            save,
        } => {
            let overrides = CliOverrides {
                generations,
                edge_policy: edge.map(Into::into),
                pattern_file: pattern,
                output_dir: output,
                format: format.map(Into::into),
            };
            run_command(&config, &overrides, save)
        }
        Commands::Analyze {
            config,
            pattern,
            generations,
            edge,
        } => {
            let overrides = CliOverrides {
                generations,
                edge_policy: edge.map(Into::into),
                pattern_file: pattern,
                ..CliOverrides::default()
            };
            analyze_command(&config, &overrides)
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over the `-v` count
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .init();

    tracing::debug!(?level, "logging initialized");
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        tracing::warn!(
            path = %config_path.display(),
            "config file not found, using defaults"
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn run_command(config_path: &Path, overrides: &CliOverrides, save: bool) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;

    println!("{}", ColorOutput::heading("▶ Replaying pattern"));
    let replay = replay_from_settings(&settings).context("Failed to replay pattern")?;

    println!("{}", PatternFormatter::format_replay(&replay, settings.output.show_grid));
    println!("{}", ColorOutput::success(&replay.summary().to_string()));

    if save {
        let written = PatternFormatter::save_replay(
            &replay,
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save replay")?;

        for path in written {
            println!("Saved: {}", path.display());
        }
    }

    Ok(())
}

fn analyze_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;

    println!("{}", ColorOutput::heading("🔬 Analyzing pattern..."));
    let replay = replay_from_settings(&settings).context("Failed to replay pattern")?;

    if let Some(initial) = replay.initial_state() {
        println!("Initial State ({}):", replay.board);
        println!(
            "{}",
            PatternFormatter::format_generation_with_coords(initial, &replay.board)
        );
    }

    println!("{}", replay.analysis);
    println!("{}", PatternFormatter::format_population_table(&replay));

    println!("Fate: {}", ColorOutput::fate(&replay.analysis.fate));
    if !replay.analysis.is_periodic() {
        println!(
            "{}",
            ColorOutput::warning("No repetition found; try more generations")
        );
    }

    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::heading("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");
    let output_dir = directory.join("output/replays");

    for dir in [&config_dir, &pattern_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut torus = Settings::default();
    torus.board.width = 16;
    torus.board.height = 16;
    torus.board.edge_policy = EdgePolicy::Toroidal;
    torus.simulation.generations = 64;
    torus.to_file(examples_dir.join("glider_torus.yaml"))?;

    let mut r_pentomino = Settings::default();
    r_pentomino.board.width = 64;
    r_pentomino.board.height = 64;
    r_pentomino.simulation.generations = 200;
    r_pentomino.input.pattern_file = PathBuf::from("patterns/r_pentomino.txt");
    r_pentomino.input.offset_x = 30;
    r_pentomino.input.offset_y = 30;
    r_pentomino.output.show_grid = false;
    r_pentomino.to_file(examples_dir.join("r_pentomino.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", pattern_dir.display());
    println!("3. Run: life_replay run --config config/default.yaml");

    Ok(())
}
