use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use rsv_core::config::{self, CONFIG_FILE_NAME, ReportFormat, RsvConfig};
use rsv_core::json_spec::{self, JsonSpecMap};
use rsv_core::model::{self, Model};
use rsv_core::{Diagnostics, LogSink, PropertyResolver, ReconcileOptions};

#[derive(Parser)]
#[command(
    name = "rsv",
    about = "Check a REST API type model against its JSON spec",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the type model with the JSON spec and report mismatches
    Check {
        /// Path to the type model document
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Directory of JSON spec files, or a single JSON spec document
        #[arg(short, long)]
        json_spec: Option<PathBuf>,

        /// Report format
        #[arg(long)]
        format: Option<CheckFormat>,
    },

    /// Print the flattened properties of a request or interface
    Resolve {
        /// Name of the request or interface
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Path to the type model document
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: ResolveFormat,
    },

    /// Initialize a new rsv configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CheckFormat {
    Text,
    Json,
    Log,
}

impl From<CheckFormat> for ReportFormat {
    fn from(format: CheckFormat) -> Self {
        match format {
            CheckFormat::Text => ReportFormat::Text,
            CheckFormat::Json => ReportFormat::Json,
            CheckFormat::Log => ReportFormat::Log,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum ResolveFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            model,
            json_spec,
            format,
        } => cmd_check(model, json_spec, format),

        Commands::Resolve {
            type_name,
            model,
            format,
        } => cmd_resolve(&type_name, model, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "rsv", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn load_config() -> Result<RsvConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    Ok(cfg.unwrap_or_default())
}

fn load_model(path: &Path) -> Result<Model> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let model =
        model::from_json(&content).with_context(|| format!("invalid model {}", path.display()))?;
    Ok(model)
}

fn load_json_spec(path: &Path) -> Result<JsonSpecMap> {
    let specs = if path.is_dir() {
        json_spec::load_dir(path)?
    } else {
        json_spec::load_file(path)?
    };
    Ok(specs)
}

fn cmd_check(
    model: Option<PathBuf>,
    json_spec: Option<PathBuf>,
    format: Option<CheckFormat>,
) -> Result<()> {
    let cfg = load_config()?;
    let model_path = model.unwrap_or_else(|| PathBuf::from(&cfg.model));
    let spec_path = json_spec.unwrap_or_else(|| PathBuf::from(&cfg.json_spec));
    let format = format.map(ReportFormat::from).unwrap_or(cfg.format);

    log::debug!(
        "model: {}, json spec: {}",
        model_path.display(),
        spec_path.display()
    );

    let model = load_model(&model_path)?;
    let specs = load_json_spec(&spec_path)?;
    eprintln!(
        "Checking {} endpoints against {} json spec entries",
        model.endpoints.len(),
        specs.len()
    );

    let options = ReconcileOptions {
        body_merge: cfg.body_merge,
    };
    let mut diagnostics = Diagnostics::new();
    rsv_core::reconcile_with_options(&model, &specs, &mut diagnostics, &options)?;

    match format {
        ReportFormat::Text => print!("{}", diagnostics.render()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&diagnostics)?),
        ReportFormat::Log => diagnostics.clone().drain_into(&mut LogSink),
    }

    if diagnostics.is_empty() {
        eprintln!("No mismatches found.");
    } else {
        eprintln!("{} mismatch(es) found.", diagnostics.len());
    }
    Ok(())
}

fn cmd_resolve(type_name: &str, model: Option<PathBuf>, format: ResolveFormat) -> Result<()> {
    let cfg = load_config()?;
    let model_path = model.unwrap_or_else(|| PathBuf::from(&cfg.model));
    let model = load_model(&model_path)?;

    let props = PropertyResolver::with_body_merge(&model, cfg.body_merge).resolve(type_name)?;

    match format {
        ResolveFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&props)?),
        ResolveFormat::Json => println!("{}", serde_json::to_string_pretty(&props)?),
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
