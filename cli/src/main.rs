//! relayout CLI - rebuild document structure from positioned text fragments

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use relayout::{
    render, JsonFormat, JsonFragmentSource, LayoutOptions, PageSelection, Reconstruction,
    RenderOptions,
};

#[derive(Parser)]
#[command(name = "relayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild paragraphs, headings and styled runs from PDF text fragments", long_about = None)]
struct Cli {
    /// Input fragment dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Layout switches shared by every conversion command.
#[derive(Args, Clone, Default)]
struct LayoutArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Treat every line as its own paragraph
    #[arg(long)]
    per_line: bool,

    /// Process pages one at a time
    #[arg(long)]
    sequential: bool,
}

impl LayoutArgs {
    fn page_selection(&self) -> Result<PageSelection, Box<dyn std::error::Error>> {
        match self.pages.as_deref() {
            Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
            None => Ok(PageSelection::All),
        }
    }

    fn layout_options(&self) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
        let mut options = LayoutOptions::new().with_pages(self.page_selection()?);
        if self.per_line {
            options = options.per_line();
        }
        if self.sequential {
            options = options.sequential();
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert fragments to all formats (Markdown, text, JSON)
    Convert {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert fragments to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Render page breaks as horizontal rules
        #[arg(long)]
        page_breaks: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert fragments to plain text
    Text {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Mark page breaks with a form feed
        #[arg(long)]
        page_breaks: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert fragments to the JSON paragraph stream
    Json {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document information
    Info {
        /// Input fragment dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            layout,
        }) => cmd_convert(&input, output.as_deref(), &layout),
        Some(Commands::Markdown {
            input,
            output,
            page_breaks,
            max_heading,
            layout,
        }) => cmd_markdown(&input, output.as_deref(), page_breaks, max_heading, &layout),
        Some(Commands::Text {
            input,
            output,
            page_breaks,
            layout,
        }) => cmd_text(&input, output.as_deref(), page_breaks, &layout),
        Some(Commands::Json {
            input,
            output,
            compact,
            layout,
        }) => cmd_json(&input, output.as_deref(), compact, &layout),
        Some(Commands::Info { input, layout }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &LayoutArgs::default())
            } else {
                println!("{}", "Usage: relayout <FILE> [OUTPUT]".yellow());
                println!("       relayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load and reconstruct a fragment dump, reporting dropped fragments.
fn load(input: &Path, layout: &LayoutArgs) -> Result<Reconstruction, Box<dyn std::error::Error>> {
    let source = JsonFragmentSource::open(input)?;
    let result = relayout::reconstruct_source(&source, layout.layout_options()?)?;

    if !result.rejected.is_empty() {
        eprintln!(
            "{} {} malformed fragments dropped",
            "Warning:".yellow().bold(),
            result.rejected.len()
        );
        for err in &result.rejected {
            log::debug!("{}", err);
        }
    }
    if let Err(e) = result.document.ensure_text() {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    Ok(result)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reconstructing layout...");
    let result = load(input, layout)?;
    let render_options = RenderOptions::new()
        .with_page_breaks(true)
        .with_pages(layout.page_selection()?);
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    let markdown = render::to_markdown(&result.document, &render_options)?;
    fs::write(output_dir.join("extract.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = render::to_text(&result.document, &render_options)?;
    fs::write(output_dir.join("extract.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = render::to_json(&result.document, JsonFormat::Pretty)?;
    fs::write(output_dir.join("content.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} extract.md", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "└─".dimmed());

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    page_breaks: bool,
    max_heading: u8,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load(input, layout)?;

    let render_options = RenderOptions::new()
        .with_page_breaks(page_breaks)
        .with_max_heading(max_heading)
        .with_pages(layout.page_selection()?);

    let markdown = render::to_markdown(&result.document, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    page_breaks: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load(input, layout)?;

    let render_options = RenderOptions::new()
        .with_page_breaks(page_breaks)
        .with_pages(layout.page_selection()?);

    let text = render::to_text(&result.document, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load(input, layout)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&result.document, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = load(input, layout)?;
    let stats = result.document.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!(
        "{}: {}",
        "Dropped fragments".bold(),
        result.rejected.len()
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Body".bold(), stats.body_count);
    println!("{}: {}", "Captions".bold(), stats.caption_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Styled runs".bold(), stats.run_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "relayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document structure reconstruction from PDF text fragments");
    println!();
    println!("License: MIT");
}
