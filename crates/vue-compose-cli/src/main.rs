//! vue-compose CLI.
//!
//! Generates Vue composition functions from GraphQL documents described by a
//! `codegen.json` project file.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vue_compose_codegen::frontend::DOCUMENT_EXTENSIONS;
use vue_compose_codegen::{Compiler, ProjectConfig};

mod ui;

const DEFAULT_CONFIG: &str = "codegen.json";

#[derive(Parser)]
#[command(name = "vue-compose")]
#[command(about = "Generate Vue composition functions from GraphQL documents")]
#[command(version)]
struct Cli {
    /// Log what the generator does (overridden by VUE_COMPOSE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter codegen.json
    Init {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Generate TypeScript modules
    Generate {
        /// Project file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Validate documents without writing anything
    Check {
        /// Project file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Regenerate whenever the schema or a document changes
    Watch {
        /// Project file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => init_project(&path)?,
        Commands::Generate { config } => generate(&config)?,
        Commands::Check { config } => check(&config)?,
        Commands::Watch { config } => run_watch_mode(&config).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("VUE_COMPOSE_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

/// Write a starter project file.
fn init_project(path: &Path) -> miette::Result<()> {
    let file = path.join(DEFAULT_CONFIG);
    if file.exists() {
        return Err(miette::miette!("{} already exists", file.display()));
    }

    std::fs::create_dir_all(path)
        .map_err(|e| miette::miette!("Failed to create {}: {}", path.display(), e))?;

    let starter = serde_json::json!({
        "schema": "schema.graphql",
        "documents": ["src"],
        "output": "src/generated/operations.ts",
        "preset": "single-file",
        "config": {
            "target": "vue-apollo",
            "dedupeOperationSuffix": true,
            "addDocBlocks": true,
            "documentMode": "graphQLTag"
        }
    });
    let text = serde_json::to_string_pretty(&starter).map_err(|e| miette::miette!("{}", e))?;
    std::fs::write(&file, format!("{}\n", text))
        .map_err(|e| miette::miette!("Failed to write {}: {}", file.display(), e))?;

    ui::success(&format!("Created {}", file.display()));
    println!();
    ui::box_header(&format!("{} Next", ui::symbols::TRIANGLE));
    ui::box_line("");
    ui::box_line("   Point \"schema\" and \"documents\" at your files, then:");
    ui::box_line("   vue-compose generate");
    ui::box_line("");
    ui::box_footer();
    Ok(())
}

fn load_project(config: &Path) -> miette::Result<ProjectConfig> {
    Ok(ProjectConfig::load(config)?)
}

/// Compile once and report.
fn generate(config: &Path) -> miette::Result<()> {
    let start = Instant::now();
    let project = load_project(config)?;
    let spinner = ui::spinner("Generating composition functions...");

    match Compiler::new(project).compile() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success(&ui::counts_line(result.operations, result.fragments));
            for file in &result.files {
                ui::file_line(file);
            }
            println!();
            ui::timing("Done", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::failed_header();
            Err(e.into())
        }
    }
}

fn check(config: &Path) -> miette::Result<()> {
    let project = load_project(config)?;
    let spinner = ui::spinner("Checking documents...");

    match Compiler::new(project).check() {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::looking_good();
            println!();
            println!(
                "    {} operations {} {} fragments",
                result.operations,
                ui::symbols::DOT,
                result.fragments
            );
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::failed_header();
            Err(e.into())
        }
    }
}

/// Whether a changed path should trigger regeneration.
///
/// `project` and `config` hold canonical paths, as do watcher events.
fn is_relevant(path: &Path, project: &ProjectConfig, config: &Path) -> bool {
    if path == project.schema || path == config {
        return true;
    }
    path.extension()
        .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
        .unwrap_or(false)
}

/// Regenerate on every relevant change until Ctrl-C.
async fn run_watch_mode(config: &Path) -> miette::Result<()> {
    let project = load_project(config)?;
    generate(config).unwrap_or_else(|e| ui::error(&format!("{}", e)));

    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
    let watched_project = project.clone();
    let config_path = std::fs::canonicalize(config)
        .map_err(|e| miette::miette!("Failed to resolve {}: {}", config.display(), e))?;
    let watched_config = config_path.clone();

    let on_events = move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                if events
                    .iter()
                    .any(|e| is_relevant(&e.path, &watched_project, &watched_config))
                {
                    let _ = tx.try_send(());
                }
            }
            Err(e) => tracing::warn!(error = %e, "file watcher error"),
        }
    };
    let mut debouncer = new_debouncer(Duration::from_millis(500), on_events)
        .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    let mut watched = project.watched_paths();
    watched.push(config_path);
    for path in &watched {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer
            .watcher()
            .watch(path, mode)
            .map_err(|e| miette::miette!("Failed to watch {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "watching");
    }

    println!();
    ui::info("Watching for changes...");

    loop {
        tokio::select! {
            _ = rx.recv() => {
                println!();
                if let Err(e) = generate(config) {
                    ui::error(&format!("{}", e));
                }
                println!();
                ui::info("Watching for changes...");
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                ui::dim("Stopping watch mode.");
                break;
            }
        }
    }

    Ok(())
}
