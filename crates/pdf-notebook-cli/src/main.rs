use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use pdf_notebook::{
    Color, Margins, NotebookConfig, NotebookStatistics, Orientation, PageSize, PatternKind,
    PatternKindName, PunchHoles,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfn", about = "Printable notebook generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the notebook PDF
    Generate {
        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        notebook: NotebookArgs,
    },

    /// Render one printed sheet as a PNG preview
    Preview {
        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Sheet to render (0-based)
        #[arg(long, default_value = "0")]
        sheet: usize,

        #[command(flatten)]
        notebook: NotebookArgs,
    },

    /// Show page and sheet counts without generating anything
    Stats {
        #[command(flatten)]
        notebook: NotebookArgs,
    },
}

/// Notebook options; each one overrides the preset when given
#[derive(Args)]
struct NotebookArgs {
    /// JSON preset to start from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resulting configuration to a JSON preset
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Sheet size: a4, a5, a6, b5, letter or WIDTHxHEIGHT in mm
    #[arg(long)]
    size: Option<PageSize>,

    /// Sheet orientation: portrait or landscape
    #[arg(long)]
    orientation: Option<Orientation>,

    /// Pattern: lined, dotted, squared, cornell, isometric, hexagonal, blank
    #[arg(long)]
    pattern: Option<PatternKindName>,

    /// Main pattern spacing in mm (line spacing, dot pitch, grid or hexagon size)
    #[arg(long)]
    spacing: Option<f32>,

    /// Number of notebook pages
    #[arg(long)]
    pages: Option<usize>,

    /// Logical pages per printed sheet: 1, 2 or 4
    #[arg(long)]
    pages_per_sheet: Option<usize>,

    /// Draw fold guides between pages on a sheet
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    fold_lines: Option<bool>,

    /// Draw a header line at the top of lined areas
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    header_line: Option<bool>,

    /// Print page numbers
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    page_numbers: Option<bool>,

    /// Punch-hole guides: none, 2-hole or 4-hole
    #[arg(long)]
    punch_holes: Option<PunchHoles>,

    /// Uniform page margin in mm
    #[arg(long)]
    margin: Option<f32>,

    /// Extra margin on the binding side in mm
    #[arg(long)]
    binding_margin: Option<f32>,

    /// Line gray level (0 = black, 1 = white)
    #[arg(long)]
    gray: Option<f32>,

    /// Line weight in points
    #[arg(long)]
    weight: Option<f32>,

    /// Bleed around each sheet in mm
    #[arg(long)]
    bleed: Option<f32>,

    /// Put the binding margin on the right of even pages
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    mirror_margins: Option<bool>,

    /// Outline the drawable area
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    margin_guides: Option<bool>,
}

impl NotebookArgs {
    /// Resolve the preset and overrides into a validated configuration
    async fn into_config(self) -> Result<NotebookConfig> {
        let mut config = match &self.config {
            Some(path) => NotebookConfig::load(path)
                .await
                .with_context(|| format!("Failed to load preset {}", path.display()))?,
            None => NotebookConfig::default(),
        };

        if let Some(size) = self.size {
            config.page_size = size;
        }
        if let Some(orientation) = self.orientation {
            config.orientation = orientation;
        }
        if let Some(name) = self.pattern {
            if name != config.pattern.kind.name() {
                config.pattern.kind = PatternKind::default_for(name);
            }
        }
        if let Some(spacing) = self.spacing {
            config.pattern.kind = respace(config.pattern.kind, spacing)?;
        }
        if let Some(pages) = self.pages {
            config.pages = pages;
        }
        if let Some(pages_per_sheet) = self.pages_per_sheet {
            config.imposition.pages_per_sheet = pages_per_sheet;
        }
        if let Some(fold_lines) = self.fold_lines {
            config.imposition.fold_lines = fold_lines;
        }
        if let Some(header_line) = self.header_line {
            config.pattern.style.header_line = header_line;
        }
        if let Some(page_numbers) = self.page_numbers {
            config.decorations.page_numbers = page_numbers;
        }
        if let Some(punch_holes) = self.punch_holes {
            config.decorations.punch_holes = punch_holes;
        }
        if let Some(margin) = self.margin {
            let binding_mm = config.margins.binding_mm;
            config.margins = Margins {
                binding_mm,
                ..Margins::uniform(margin)
            };
        }
        if let Some(binding) = self.binding_margin {
            config.margins.binding_mm = binding;
        }
        if let Some(gray) = self.gray {
            config.pattern.style.color = Color::gray(gray);
        }
        if let Some(weight) = self.weight {
            config.pattern.style.weight_pt = weight;
        }
        if let Some(bleed) = self.bleed {
            config.bleed_mm = bleed;
        }
        if let Some(mirror) = self.mirror_margins {
            config.decorations.mirror_margins = mirror;
        }
        if let Some(guides) = self.margin_guides {
            config.decorations.margin_guides = guides;
        }

        config.validate()?;

        if let Some(path) = &self.save_config {
            config
                .save(path)
                .await
                .with_context(|| format!("Failed to save preset {}", path.display()))?;
            println!("Saved configuration → {}", path.display());
        }

        Ok(config)
    }
}

/// Apply `--spacing` to a pattern that has a spacing to set
fn respace(kind: PatternKind, spacing: f32) -> Result<PatternKind> {
    if kind.spacing_mm().is_none() {
        bail!("--spacing does not apply to the {} pattern", kind.name());
    }
    Ok(kind.with_spacing_mm(spacing))
}

fn print_statistics(config: &NotebookConfig, stats: &NotebookStatistics) {
    let sheet = config.sheet_size();
    let page = config.page_dimensions();
    println!("Notebook Statistics:");
    println!(
        "  Pattern: {} on {} {}",
        config.pattern.kind.name(),
        config.page_size,
        config.orientation.name()
    );
    println!("  Sheet size: {:.1} x {:.1} mm", sheet.width, sheet.height);
    println!("  Page size: {:.1} x {:.1} mm", page.width, page.height);
    println!("  Notebook pages: {}", stats.logical_pages);
    println!("  Blank pages added: {}", stats.blank_pages_added);
    println!("  Printed sheets: {}", stats.sheets);
    println!("  Output pages: {}", stats.output_pages);
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output, notebook } => {
            let config = notebook.into_config().await?;
            let stats = pdf_notebook::calculate_statistics(&config)?;
            print_statistics(&config, &stats);

            pdf_notebook::generate_pdf(&config, &output).await?;
            println!("Generated notebook → {}", output.display());
        }

        Commands::Preview {
            output,
            sheet,
            notebook,
        } => {
            let config = notebook.into_config().await?;
            pdf_notebook::save_preview(&config, sheet, &output).await?;
            println!("Preview of sheet {} → {}", sheet, output.display());
        }

        Commands::Stats { notebook } => {
            let config = notebook.into_config().await?;
            let stats = pdf_notebook::calculate_statistics(&config)?;
            print_statistics(&config, &stats);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_replaces_main_parameter() {
        let kind = respace(PatternKind::default_for(PatternKindName::Dotted), 4.0).unwrap();
        assert_eq!(
            kind,
            PatternKind::Dotted {
                dot_spacing_mm: 4.0,
                dot_radius_mm: 0.25,
            }
        );
    }

    #[test]
    fn test_spacing_on_blank_is_rejected() {
        let err = respace(PatternKind::Blank, 5.0).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[tokio::test]
    async fn test_blank_pattern_flag_with_spacing_fails() {
        let cli = Cli::try_parse_from(["pdfn", "stats", "--pattern", "blank", "--spacing", "5"])
            .unwrap();
        let Commands::Stats { notebook } = cli.command else {
            panic!("expected the stats command");
        };
        assert!(notebook.into_config().await.is_err());
    }
}
