//! quire CLI: build-time content pipeline for a markdown blog
//!
//! Commands: check, crawl, prerender, render, watch, completions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use quire_content::ContentWatcher;
use quire_core::frontmatter::split_frontmatter;
use quire_core::Post;
use quire_markdown::render_markdown;
use quire_site::{
    build, dangling_series_links, format_summary, prerender_pages, OutputFormat, SiteConfig,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quire")]
#[command(version)]
#[command(about = "Build-time content pipeline for a prerendered markdown blog")]
struct Cli {
    /// Site config file (default: ./quire.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Validate every post and print a listing
    Check {
        /// Content directory (overrides the config)
        dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Print the enriched, sorted posts as JSON
    Crawl {
        /// Content directory (overrides the config)
        dir: Option<PathBuf>,
    },
    /// Emit the page descriptors for the prerender step
    Prerender {
        /// Content directory (overrides the config)
        dir: Option<PathBuf>,
        /// Write JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render one markdown file to HTML with its table of contents
    Render {
        file: PathBuf,
        /// Print only the HTML
        #[arg(long)]
        html: bool,
    },
    /// Rebuild the page descriptors whenever a post changes
    Watch {
        /// Content directory (overrides the config)
        dir: Option<PathBuf>,
        /// Write JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
    Markdown,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Table => OutputFormat::Table,
            Format::Markdown => OutputFormat::Markdown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { dir, format } => {
            let config = load_config(cli.config.as_deref(), dir)?;
            let posts = build(&config)?;
            for (post, target) in dangling_series_links(&posts) {
                warn!(%post, %target, "series link points to an unknown post");
            }
            println!("{}", format_summary(&posts, format.into()));
        }
        Commands::Crawl { dir } => {
            let config = load_config(cli.config.as_deref(), dir)?;
            let posts = build(&config)?;
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        Commands::Prerender { dir, out } => {
            let config = load_config(cli.config.as_deref(), dir)?;
            let posts = build(&config)?;
            emit_pages(&posts, &config, out.as_deref())?;
        }
        Commands::Render { file, html } => {
            let content =
                fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let (_, body) = split_frontmatter(&content)
                .with_context(|| format!("splitting frontmatter of {}", file.display()))?;
            let rendered = render_markdown(body);
            if html {
                print!("{}", rendered.html);
            } else {
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            }
        }
        Commands::Watch { dir, out } => {
            let config = load_config(cli.config.as_deref(), dir)?;
            watch(&config, out.as_deref())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "quire", &mut io::stdout());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, dir: Option<PathBuf>) -> Result<SiteConfig> {
    let mut config = match path {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::load_or_default(Path::new("."))?,
    };
    if let Some(dir) = dir {
        config.content_dir = dir;
    }
    Ok(config)
}

fn emit_pages(posts: &[Post], config: &SiteConfig, out: Option<&Path>) -> Result<()> {
    let pages = prerender_pages(posts, config);
    let json = serde_json::to_string_pretty(&pages)?;
    match out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
            info!(out = %out.display(), pages = pages.len(), "wrote page descriptors");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Full rebuild on every change; a failed build is logged and the previous
/// output is left in place.
fn watch(config: &SiteConfig, out: Option<&Path>) -> Result<()> {
    let watcher = ContentWatcher::start(&config.content_dir)?;
    eprintln!("watching {}", config.content_dir.display());

    let rebuild = || match build(config) {
        Ok(posts) => emit_pages(&posts, config, out),
        Err(err) => {
            error!("{err}");
            Ok(())
        }
    };

    rebuild()?;
    loop {
        let Some(event) = watcher.recv_timeout(Duration::from_secs(1)) else {
            continue;
        };
        // Let editors finish writing before collapsing the burst into one build.
        std::thread::sleep(Duration::from_millis(100));
        let burst = watcher.drain().len() + 1;
        info!(path = %event.path().display(), events = burst, "content changed");
        rebuild()?;
    }
}
