//! marktree - render markdown into a styled node tree.
//!
//! # Usage
//!
//! ```bash
//! marktree README.md
//! marktree --format json README.md
//! marktree --watch --styles theme.json README.md
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use marktree::config::{
    ConfigFlags, OutputFormat, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use marktree::markdown::Markdown;
use marktree::perf;
use marktree::render::{Hooks, RenderedNode};
use marktree::watcher::SourceWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Render markdown into a styled tree of presentational nodes
#[derive(Parser, Debug)]
#[command(name = "marktree", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Watch the file and print a new tree on every change
    #[arg(short, long)]
    watch: bool,

    /// Parse as inline content (no paragraph blocks at the top level)
    #[arg(long)]
    inline: bool,

    /// Log unsupported node kinds and every rendered tree
    #[arg(long)]
    debug: bool,

    /// Start from an empty style sheet instead of the built-in one
    #[arg(long)]
    no_default_styles: bool,

    /// JSON file of named style overrides
    #[arg(long, value_name = "PATH")]
    styles: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "outline")]
    format: OutputFormat,

    /// Log parse and render timings
    #[arg(long)]
    perf: bool,

    /// Write detailed render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn print_tree(tree: &RenderedNode, format: OutputFormat) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match format {
        OutputFormat::Outline => out.write_all(tree.outline().as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, tree).context("Failed to serialize tree")?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn read_source(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn watch(mut markdown: Markdown, path: &std::path::Path, format: OutputFormat) -> Result<()> {
    let mut watcher = SourceWatcher::new(path, WATCH_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", path.display()))?;
    let overrides = markdown.options().markdown_styles.clone();

    loop {
        if !watcher.wait_for_change(WATCH_POLL_INTERVAL, None) {
            continue;
        }
        let source = match watcher.read() {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable source");
                continue;
            }
        };
        if !markdown.should_update(&source, &overrides) {
            tracing::debug!("source saved without changes");
            continue;
        }
        let tree = markdown.present(&source, &overrides);
        println!("---");
        print_tree(tree, format)?;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("MARKTREE_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            path = ?render_debug_log_path,
            error = %err,
            "failed to open render debug log"
        );
    }

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let options = effective.render_options()?;
    let format = effective.format.unwrap_or(cli.format);
    let source = read_source(&cli.file)?;
    let mut markdown = {
        let _scope = perf::scope("startup.parse");
        Markdown::new(source.clone(), options, Hooks::new())
    };
    let overrides = markdown.options().markdown_styles.clone();
    print_tree(markdown.present(&source, &overrides), format)?;

    if effective.watch {
        watch(markdown, &cli.file, format)?;
    }
    Ok(())
}
