//! Thin CLI over the library.
//!
//! Run:
//! - `cargo run -- classify 'गति क्या है?' '$$E = mc^2$$'`
//! - `cargo run -- layout notebook.toml`
//! - `cargo run -- fonts "Noto Sans"`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use deva_notebook::config::Config;
use deva_notebook::font::SystemFonts;
use deva_notebook::font::metrics::FontMetrics;
use deva_notebook::measure::{EstimatedMetrics, Measure};

#[derive(Parser)]
#[command(name = "deva-notebook")]
#[command(version)]
#[command(about = "Devanagari/English notebook layouts for educational videos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the presentation mode and script of each argument
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Lay out a notebook document and print the positioned blocks
    Layout {
        file: PathBuf,

        /// Measure with grapheme estimates instead of system fonts
        #[arg(long)]
        estimate: bool,

        /// Also print the TeX source of LaTeX blocks
        #[arg(long)]
        tex: bool,
    },

    /// Resolve a font family against the installed fonts
    Fonts { name: Vec<String> },
}

fn main() -> Result<()> {
    // Keep logging setup in the binary so the library remains unopinionated.
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("load config {}", path.display()))?
        }
        None => Config::default(),
    };

    match cli.command {
        Commands::Classify { text } => classify(&config, &text),
        Commands::Layout {
            file,
            estimate,
            tex,
        } => layout(&config, &file, estimate, tex),
        Commands::Fonts { name } => fonts(&config, &name),
    }
}

fn classify(config: &Config, texts: &[String]) -> Result<()> {
    for text in texts {
        let block = deva_notebook::wrap_content(text.as_str(), config)?;
        println!(
            "{}\t{}\t{}pt\t{}",
            block.mode(),
            block.script(),
            block.style.font_size,
            text
        );
    }
    Ok(())
}

fn layout(config: &Config, file: &Path, estimate: bool, tex: bool) -> Result<()> {
    let measure: Box<dyn Measure> = if estimate {
        Box::new(EstimatedMetrics::default())
    } else {
        let fonts = SystemFonts::new();
        log::info!("loaded {} font faces", fonts.face_count());
        Box::new(FontMetrics::new(fonts, config.font_fallbacks.clone()))
    };

    let notebook = deva_notebook::layout_file(file, config, measure.as_ref())
        .with_context(|| format!("lay out {}", file.display()))?;

    for (block, bounds, depth) in notebook.blocks() {
        println!(
            "{:indent$}{:<12} {:<12} [{:7.3}, {:7.3}] - [{:7.3}, {:7.3}]  {}",
            "",
            block.name,
            block.mode().to_string(),
            bounds.min[0],
            bounds.min[1],
            bounds.max[0],
            bounds.max[1],
            block.text(),
            indent = depth * 2,
        );
        if tex {
            if let Some(source) = block.tex_source(&config.template_font) {
                println!("{source}");
            }
        }
    }

    if notebook.overflows() {
        log::warn!(
            "notebook does not fit the {}x{} frame",
            config.frame.width,
            config.frame.height
        );
    }
    Ok(())
}

fn fonts(config: &Config, names: &[String]) -> Result<()> {
    let fonts = SystemFonts::new();
    log::info!("loaded {} font faces", fonts.face_count());

    if names.is_empty() {
        for family in deva_notebook::font::FontCatalog::families(&fonts) {
            println!("{family}");
        }
        return Ok(());
    }

    for name in names {
        let r = deva_notebook::resolve_system_font(name, config, &fonts);
        let status = match (r.resolved, r.fallback) {
            (true, false) => "installed",
            (true, true) => "fallback",
            _ => "missing",
        };
        println!("{name}\t{}\t{status}", r.family);
    }
    Ok(())
}
