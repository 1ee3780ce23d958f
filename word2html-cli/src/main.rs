//! word2html CLI
//!
//! Converts a Word document into styled HTML: a standalone page by default,
//! or the embeddable body fragment.
//!
//! - word2html report.docx -o report.html
//! - word2html --fragment --font georgia report.docx

mod preset;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use word2html_core::pipeline::common::warning::{clear_warnings, set_quiet};
use word2html_core::pipeline::dom::print_tree;
use word2html_core::{Conversion, ConversionOptions, convert_file};

use preset::FontPreset;

/// word2html - convert Word documents to clean, styled HTML
#[derive(Parser, Debug)]
#[command(name = "word2html")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Standalone page next to the input
    word2html report.docx -o report.html

    # Body fragment for embedding, with a font override
    word2html --fragment --font georgia --font-size 16px report.docx

    # HTML-escaped fragment, for pasting into a code view
    word2html --escaped report.docx

    # Options from a JSON file, e.g. {"fontFamily": "Arial, sans-serif", "maxImageWidth": 640}
    word2html --config options.json report.docx

    # Inspect the enriched tree
    word2html --tree report.docx -o /dev/null
"#)]
struct Cli {
    /// Word document to convert (.docx)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write only the body fragment instead of a standalone document
    #[arg(long, conflicts_with = "escaped")]
    fragment: bool,

    /// Write the body fragment HTML-escaped, for display as source code
    #[arg(long)]
    escaped: bool,

    /// Print the enriched element tree to stdout
    #[arg(long)]
    tree: bool,

    /// Load conversion options from a JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Font preset: arial, times-new-roman, calibri, verdana, georgia, courier-new
    #[arg(long, value_name = "PRESET", value_parser = parse_preset, conflicts_with = "font_family")]
    font: Option<FontPreset>,

    /// CSS font stack applied to the whole document
    #[arg(long, value_name = "FAMILY")]
    font_family: Option<String>,

    /// CSS font size applied to the whole document (e.g. 14px)
    #[arg(long, value_name = "SIZE")]
    font_size: Option<String>,

    /// Downsample images wider than this many pixels
    #[arg(long, value_name = "PIXELS")]
    max_image_width: Option<u32>,

    /// Title of the standalone document
    #[arg(long)]
    title: Option<String>,

    /// Suppress warnings and the summary line
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Options from `--config`, then individual flags on top.
    fn options(&self) -> anyhow::Result<ConversionOptions> {
        let mut options = match &self.config {
            Some(path) => load_options(path)?,
            None => ConversionOptions::default(),
        };
        if let Some(preset) = self.font {
            options.font_family = preset.family().to_string();
        }
        if let Some(family) = &self.font_family {
            options.font_family.clone_from(family);
        }
        if let Some(size) = &self.font_size {
            options.font_size.clone_from(size);
        }
        if let Some(width) = self.max_image_width {
            options.max_image_width = width;
        }
        if let Some(title) = &self.title {
            options.title.clone_from(title);
        }
        Ok(options)
    }

    /// The text to write, according to the output mode flags.
    fn render(&self, conversion: &Conversion) -> String {
        if self.escaped {
            conversion.result.escaped_fragment()
        } else if self.fragment {
            conversion.result.body_fragment_html().to_string()
        } else {
            conversion.result.standalone_document_html().to_string()
        }
    }
}

fn parse_preset(value: &str) -> Result<FontPreset, String> {
    FontPreset::from_str(value)
        .map_err(|_| format!("unknown preset {value:?} (expected one of: {})", FontPreset::names()))
}

fn load_options(path: &Path) -> anyhow::Result<ConversionOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}

fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .context("cannot write to stdout")
        }
    }
}

/// One line on stderr: images, lists and warnings of the conversion.
fn print_summary(input: &Path, conversion: &Conversion) {
    let mut line = format!(
        "{} {}: {} image(s) inlined, {} list(s) rebuilt",
        "converted".green().bold(),
        input.display(),
        conversion.images_converted,
        conversion.lists_rebuilt,
    );
    if conversion.images_failed > 0 {
        line.push_str(&format!(
            ", {}",
            format!("{} image(s) replaced by placeholders", conversion.images_failed).red()
        ));
    }
    if !conversion.warnings.is_empty() {
        line.push_str(&format!(
            ", {}",
            format!("{} warning(s)", conversion.warnings.len()).yellow()
        ));
    }
    eprintln!("{line}");
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);
    clear_warnings();

    let options = cli.options()?;
    let conversion = convert_file(&cli.input, &options)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    if cli.tree {
        println!("=== Element Tree ===");
        print_tree(&conversion.tree, conversion.tree.root(), 0);
    }

    write_output(cli.output.as_deref(), &cli.render(&conversion))?;

    if !cli.quiet {
        print_summary(&cli.input, &conversion);
    }
    Ok(())
}
