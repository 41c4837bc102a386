//! sbom-preflight: check and repair SBOMs before uploading them to Dependency-Track.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use sbom_preflight::{
    cli::{self, CheckOverrides},
    config::{self, AppConfig, CONFIG_DIR_NAME, CONFIG_FILE_NAMES, DEFAULT_CONFIG_FILE_NAME},
    diagnostics::SpdxPolicy,
    normalize::FixRequest,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sbom-preflight")]
#[command(version)]
#[command(about = "Check and repair SBOMs before uploading them to Dependency-Track", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  All SBOMs valid / fixed SBOM written
    1  An SBOM is missing, malformed, unsupported or empty, or an error occurred

EXAMPLES:
    # Check Android and iOS SBOMs
    sbom-preflight check sbomAndroid.json sbomiOS.json

    # Machine-readable diagnostics
    sbom-preflight check sbomAndroid.json -o json -O report.json

    # Repair a Syft SBOM with an explicit project name and version
    sbom-preflight fix sbomiOS.json -n \"My iOS App\" -p 2.1.0")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// SBOM files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Report format (default from config, else summary)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// How SPDX documents are treated
    #[arg(long)]
    spdx_policy: Option<SpdxPolicy>,

    /// Number of sample components listed per SBOM
    #[arg(long)]
    samples: Option<usize>,
}

/// Arguments for the `fix` subcommand
#[derive(Parser)]
struct FixArgs {
    /// Syft CycloneDX SBOM to repair
    input: PathBuf,

    /// Output file (`-` for stdout); default is <stem>_fixed<ext> next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Project name (default: derived from the file name)
    #[arg(short, long)]
    name: Option<String>,

    /// Project version (default: 1.0.0)
    #[arg(short = 'p', long)]
    project_version: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose one or more SBOMs
    Check(CheckArgs),

    /// Repair the root component and dependency graph of a Syft SBOM
    Fix(FixArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (defaults merged with file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-preflight.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let code = if err.use_stderr() {
                exit_codes::FAILURE
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Check(args) => {
            let mut app_config = load_config(cli.config.as_deref())?;
            CheckOverrides {
                format: args.output,
                spdx_policy: args.spdx_policy,
                sample_size: args.samples,
                no_color: cli.no_color,
            }
            .apply(&mut app_config);

            let exit_code = cli::run_check(&args.files, &app_config, args.output_file)?;
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Fix(args) => {
            let app_config = load_config(cli.config.as_deref())?;
            let mut request = FixRequest::new(args.input);
            request.output = args.output;
            request.name = args.name;
            request.version = args.project_version;

            let exit_code = cli::run_fix(&request, &app_config.fix, cli.quiet)?;
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-preflight", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to serialize schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (app_config, loaded_from) = config::load_or_default(cli.config.as_deref())
                    .context("failed to load configuration")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml_ng::to_string(&app_config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    ::dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).display().to_string()),
                    ::dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order, git root after the first):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(DEFAULT_CONFIG_FILE_NAME);
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

/// Load the discovered config file (or defaults)
fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let (app_config, loaded_from) =
        config::load_or_default(explicit).context("failed to load configuration")?;
    if let Some(path) = loaded_from {
        tracing::debug!("using config file {}", path.display());
    }
    Ok(app_config)
}
