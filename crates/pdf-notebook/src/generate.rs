//! Notebook generation: pages, imposition and output

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::layout::{Imposition, layout};
use crate::options::NotebookConfig;
use crate::page::render_page;
use crate::render::pdf::PdfSurface;
use crate::render::preview::PreviewSurface;
use crate::render::{render_imposition, render_sheet_at};
use crate::types::*;

/// Render every logical page and arrange them on sheets
pub fn build_imposition(config: &NotebookConfig) -> Result<Imposition> {
    config.validate()?;

    let page_size = config.page_dimensions();
    let pages = (1..=config.pages)
        .map(|n| render_page(config, page_size, n))
        .collect::<Result<Vec<_>>>()?;

    layout(pages, config.sheet_size(), &config.imposition)
}

/// Generate the notebook as PDF bytes
pub fn generate_pdf_bytes(config: &NotebookConfig) -> Result<Vec<u8>> {
    let imposition = build_imposition(config)?;

    let mut surface = PdfSurface::new(document_title(config));
    render_imposition(&imposition, config.bleed_mm, &mut surface)?;
    let bytes = surface.finalize()?;

    log::debug!(
        "Rendered {} sheets into {} bytes",
        imposition.sheet_count(),
        bytes.len()
    );
    Ok(bytes)
}

/// Generate the notebook and write it to `path`
pub async fn generate_pdf(config: &NotebookConfig, path: impl AsRef<Path>) -> Result<()> {
    let config = config.clone();
    let path = path.as_ref().to_owned();

    // PDF generation is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || generate_pdf_bytes(&config)).await??;

    tokio::fs::write(&path, &bytes).await?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Rasterize one printed sheet (0-based)
pub fn render_preview(config: &NotebookConfig, sheet_index: usize) -> Result<RgbaImage> {
    let imposition = build_imposition(config)?;

    let mut surface = PreviewSurface::new();
    render_sheet_at(&imposition, sheet_index, config.bleed_mm, &mut surface)?;
    surface.into_image()
}

/// Rasterize one sheet and write it as a PNG
pub async fn save_preview(
    config: &NotebookConfig,
    sheet_index: usize,
    path: impl AsRef<Path>,
) -> Result<()> {
    let config = config.clone();
    let path = path.as_ref().to_owned();

    let bytes = tokio::task::spawn_blocking(move || {
        let image = render_preview(&config, sheet_index)?;
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok::<_, NotebookError>(png)
    })
    .await??;

    tokio::fs::write(&path, bytes).await?;
    log::info!("Wrote preview of sheet {} to {}", sheet_index, path.display());
    Ok(())
}

fn document_title(config: &NotebookConfig) -> String {
    format!(
        "Notebook {} {} ({} pages)",
        config.page_size.name().to_uppercase(),
        config.pattern.kind.name(),
        config.pages
    )
}
