//! tex-compose CLI
//!
//! Entry point for the `texc` command-line tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use tex_compose::config::REPO_CONFIG_FILE;
use tex_compose::{
    BuildRecord, BuilderRegistry, Composer, ConsoleReporter, EffectiveConfig, FsEditorGateway,
    OutputFormat,
};

#[derive(Parser)]
#[command(name = "texc")]
#[command(about = "LaTeX build/clean orchestration lane", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the document rooted at FILE
    Build {
        /// The file to build (its actual root is resolved first)
        file: PathBuf,

        /// Path to repo config file (default: .texcompose.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Verbose progress output
        #[arg(long, short = 'v')]
        verbose: bool,

        /// Write build_record.json next to the artifact
        #[arg(long)]
        record: bool,

        /// Override the configured builder (latexmk, pdflatex)
        #[arg(long)]
        builder: Option<String>,

        /// Override the configured output directory
        #[arg(long)]
        output_directory: Option<String>,
    },

    /// Delete the generated files associated with FILE's root document
    Clean {
        /// The file whose root document's artifacts are removed
        file: PathBuf,

        /// Path to repo config file (default: .texcompose.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved root document without building
    Resolve {
        /// The file to resolve
        file: PathBuf,
    },

    /// Print the effective configuration with provenance
    Config {
        /// Path to repo config file (default: .texcompose.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            file,
            config,
            json,
            verbose,
            record,
            builder,
            output_directory,
        } => run_build(file, config, json, verbose, record, builder, output_directory),
        Commands::Clean { file, config, json } => run_clean(file, config, json),
        Commands::Resolve { file } => run_resolve(file),
        Commands::Config { config } => run_config(config),
    }
}

/// Build CLI overrides as a TOML table (layer 4)
fn cli_overrides(builder: Option<String>, output_directory: Option<String>) -> Option<toml::Value> {
    let mut table = toml::map::Map::new();
    if let Some(builder) = builder {
        table.insert("builder".to_string(), toml::Value::String(builder));
    }
    if let Some(dir) = output_directory {
        table.insert("output_directory".to_string(), toml::Value::String(dir));
    }

    if table.is_empty() {
        None
    } else {
        Some(toml::Value::Table(table))
    }
}

fn load_effective(
    config_path: Option<PathBuf>,
    overrides: Option<toml::Value>,
) -> EffectiveConfig {
    let user = EffectiveConfig::user_config_path();
    let repo = config_path.unwrap_or_else(|| PathBuf::from(REPO_CONFIG_FILE));

    match EffectiveConfig::build(user.as_deref(), Some(&repo), overrides) {
        Ok(effective) => effective,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    }
}

fn make_composer(file: PathBuf, effective: &EffectiveConfig, json: bool, verbose: bool) -> Composer {
    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let registry = BuilderRegistry::standard(&effective.config);

    Composer::new(
        effective.config.clone(),
        Box::new(FsEditorGateway::new(file)),
        registry,
        Box::new(ConsoleReporter::new(format)),
    )
    .with_verbose(verbose)
}

fn run_build(
    file: PathBuf,
    config: Option<PathBuf>,
    json: bool,
    verbose: bool,
    record: bool,
    builder: Option<String>,
    output_directory: Option<String>,
) {
    let effective = load_effective(config, cli_overrides(builder, output_directory));
    let composer = make_composer(file, &effective, json, verbose);

    match composer.build() {
        Ok(build) => {
            if record {
                write_record(&composer, &build);
            }
        }
        Err(e) => {
            // Silent no-ops print nothing unless asked
            if e.is_silent() && verbose {
                eprintln!("Nothing to build: no buildable document");
            }
            process::exit(e.exit_code());
        }
    }
}

fn write_record(composer: &Composer, build: &tex_compose::CompletedBuild) {
    let root = match composer.resolve_root() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error resolving root for record: {e}");
            return;
        }
    };

    let record_path = build
        .output_file_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."))
        .join("build_record.json");

    match BuildRecord::from_build(&root, build).and_then(|r| r.write(&record_path)) {
        Ok(()) => {}
        Err(e) => eprintln!("Error writing {}: {e}", record_path.display()),
    }
}

fn run_clean(file: PathBuf, config: Option<PathBuf>, json: bool) {
    let effective = load_effective(config, None);
    let composer = make_composer(file, &effective, json, false);

    match composer.clean() {
        Ok(resolutions) => {
            if json {
                match serde_json::to_string_pretty(&resolutions) {
                    Ok(out) => println!("{out}"),
                    Err(e) => {
                        eprintln!("Error serializing resolutions: {e}");
                        process::exit(1);
                    }
                }
            } else {
                for resolution in &resolutions {
                    let verb = if resolution.removed { "removed" } else { "skipped" };
                    println!("{verb} {}", resolution.file_path.display());
                }
            }
        }
        Err(e) => process::exit(e.exit_code()),
    }
}

fn run_resolve(file: PathBuf) {
    let effective = load_effective(None, None);
    let composer = make_composer(file, &effective, false, false);

    match composer.resolve_root() {
        Ok(root) => println!("{}", root.display()),
        Err(e) => process::exit(e.exit_code()),
    }
}

fn run_config(config: Option<PathBuf>) {
    let effective = load_effective(config, None);
    match serde_json::to_string_pretty(&effective) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing config: {e}");
            process::exit(1);
        }
    }
}
