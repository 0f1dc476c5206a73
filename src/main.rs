// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediabot CLI - accessibility rule checks for HTML content

use clap::{Parser, Subcommand, ValueEnum};
use remediabot::config::{default_config_path, load_config, EngineConfig};
use remediabot::i18n::{MessageCatalog, PassthroughTranslator, Translator};
use remediabot::report::{generate_report, OutputFormat};
use remediabot::rules::RuleContext;
use remediabot::runner::RuleRunner;
use remediabot::scanner;
use remediabot::violation::WcagLevel;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Accessibility rule engine for HTML content
#[derive(Parser)]
#[command(name = "remediabot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON message catalog used for rule text
    #[arg(long, global = true)]
    locale_catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an HTML file or a directory of HTML files
    Check {
        /// File or directory to scan
        path: PathBuf,

        /// Highest WCAG level to check (overrides the config file)
        #[arg(long)]
        level: Option<WcagLevelArg>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the enabled rules
    Rules,

    /// Show what a rule checks and why
    Explain {
        /// Rule identifier, e.g. img-alt-filename
        rule_id: String,
    },
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WcagLevelArg {
    A,
    Aa,
    Aaa,
}

impl From<WcagLevelArg> for WcagLevel {
    fn from(arg: WcagLevelArg) -> Self {
        match arg {
            WcagLevelArg::A => WcagLevel::A,
            WcagLevelArg::Aa => WcagLevel::AA,
            WcagLevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("remediabot=debug")
    } else {
        EnvFilter::new("remediabot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path)?;
    debug!("Loaded configuration from {}", config_path.display());
    if let Some(catalog) = cli.locale_catalog.clone() {
        config.locale_catalog = Some(catalog);
    }

    match cli.command {
        Commands::Check { path, level, format, output } => {
            if let Some(level) = level {
                config.level = level.into();
            }
            let runner = build_runner(&config)?;
            let violations = scanner::scan_path(&path, &runner, &config.exclude)?;
            let report = generate_report(&violations, format.into());
            write_output(&report, output.as_deref())?;

            if violations.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Rules => {
            let runner = build_runner(&config)?;
            let ctx = runner.context();
            for rule in runner.rules() {
                println!(
                    "{:<20} {:<8} WCAG {} ({})  {}",
                    rule.id(),
                    rule.severity().to_string(),
                    rule.criterion(),
                    rule.level(),
                    rule.display_name(ctx)
                );
            }
        }

        Commands::Explain { rule_id } => {
            let runner = build_runner(&config)?;
            let ctx = runner.context();
            let rule = runner
                .rule(&rule_id)
                .ok_or_else(|| anyhow::anyhow!("Unknown rule: {}", rule_id))?;
            println!("{} ({})", rule.display_name(ctx), rule.id());
            println!();
            println!("{}", rule.message(ctx));
            println!();
            println!("{}", rule.why(ctx));
            println!();
            println!("WCAG {} (Level {}): {}", rule.criterion(), rule.level(), rule.link());
        }
    }

    Ok(())
}

fn build_runner(config: &EngineConfig) -> anyhow::Result<RuleRunner> {
    let translator: Arc<dyn Translator> = match &config.locale_catalog {
        Some(path) => {
            let catalog = MessageCatalog::load(path)?;
            debug!("Using {} catalog with {} messages", catalog.locale(), catalog.len());
            Arc::new(catalog)
        }
        None => Arc::new(PassthroughTranslator),
    };
    Ok(RuleRunner::from_config(config, RuleContext::new(translator)))
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
