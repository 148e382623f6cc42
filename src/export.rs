//! Writes the composed figure to the four report files.

use crate::chart::{draw_figure, FIGURE_HEIGHT, FIGURE_WIDTH};
use crate::data::{benchmark_data, Measurements};
use crate::style::Palette;
use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Common stem for every output filename
pub const FILE_STEM: &str = "sme_matmul_performance";

// The base canvas is the 18×6 in figure at 100 px/in, so an integer scale is
// also the output density in multiples of 100 DPI.
const WEB_PNG_SCALE: u32 = 3;
const HIRES_PNG_SCALE: u32 = 6;

/// Render the figure into an in-memory SVG document.
///
/// The SVG is rendered once and reused for both the `.svg` file and the PDF
/// conversion, which also makes re-runs byte-identical.
pub fn render_svg_string(data: &Measurements, palette: &Palette, verbose: bool) -> Result<String> {
    let mut buf = String::new();
    {
        let root =
            SVGBackend::with_string(&mut buf, (FIGURE_WIDTH, FIGURE_HEIGHT)).into_drawing_area();
        draw_figure(&root, data, palette, 1, verbose)?;
        root.present()?;
    }
    Ok(buf)
}

fn render_png(path: &Path, data: &Measurements, palette: &Palette, scale: u32) -> Result<()> {
    let root = BitMapBackend::new(path, (FIGURE_WIDTH * scale, FIGURE_HEIGHT * scale))
        .into_drawing_area();
    draw_figure(&root, data, palette, scale, false)?;
    root.present()?;
    Ok(())
}

/// Render all charts and write the four report files into `output_dir`.
///
/// Returns the written paths in the order they were produced.
pub fn write_outputs(output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;

    let data = benchmark_data();
    let palette = Palette::default();

    println!("\nGenerating performance visualizations...");
    let svg = render_svg_string(&data, &palette, true)?;

    println!("\nSaving visualization files...");
    println!("{:-<70}", "");

    let mut written = Vec::new();

    let png_path = output_dir.join(format!("{}.png", FILE_STEM));
    render_png(&png_path, &data, &palette, WEB_PNG_SCALE)
        .context("Failed to render 300 DPI PNG")?;
    announce(&png_path, "GitHub/Web display (300 DPI)");
    written.push(png_path);

    let pdf_path = output_dir.join(format!("{}.pdf", FILE_STEM));
    let pdf = svg2pdf::convert_str(&svg, svg2pdf::Options::default())
        .map_err(|e| anyhow!("Failed to convert figure to PDF: {}", e))?;
    std::fs::write(&pdf_path, pdf).context("Failed to write PDF output")?;
    announce(&pdf_path, "LaTeX/papers (vector)");
    written.push(pdf_path);

    let svg_path = output_dir.join(format!("{}.svg", FILE_STEM));
    std::fs::write(&svg_path, svg.as_bytes()).context("Failed to write SVG output")?;
    announce(&svg_path, "Vector graphics (editable)");
    written.push(svg_path);

    let hires_path = output_dir.join(format!("{}_hires.png", FILE_STEM));
    render_png(&hires_path, &data, &palette, HIRES_PNG_SCALE)
        .context("Failed to render 600 DPI PNG")?;
    announce(&hires_path, "Publication quality (600 DPI)");
    written.push(hires_path);

    Ok(written)
}

fn announce(path: &Path, desc: &str) {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    println!("  ✓ {:35} - {}", name, desc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_outputs_creates_all_files() {
        let dir = tempdir().unwrap();
        let written = write_outputs(dir.path()).unwrap();

        let names: Vec<&str> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "sme_matmul_performance.png",
                "sme_matmul_performance.pdf",
                "sme_matmul_performance.svg",
                "sme_matmul_performance_hires.png",
            ]
        );

        for path in &written {
            let meta = std::fs::metadata(path).unwrap();
            assert!(meta.len() > 0, "{} is empty", path.display());
        }
    }

    #[test]
    fn test_svg_render_is_deterministic() {
        let data = benchmark_data();
        let palette = Palette::default();

        let first = render_svg_string(&data, &palette, false).unwrap();
        let second = render_svg_string(&data, &palette, false).unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeat_runs_produce_identical_vector_outputs() {
        let first_dir = tempdir().unwrap();
        let second_dir = tempdir().unwrap();

        write_outputs(first_dir.path()).unwrap();
        write_outputs(second_dir.path()).unwrap();

        for name in [
            "sme_matmul_performance.svg",
            "sme_matmul_performance.pdf",
        ] {
            let first = std::fs::read(first_dir.path().join(name)).unwrap();
            let second = std::fs::read(second_dir.path().join(name)).unwrap();
            assert_eq!(first, second, "{} differs between runs", name);
        }
    }

    #[test]
    fn test_svg_contains_all_panel_titles() {
        let data = benchmark_data();
        let palette = Palette::default();
        let svg = render_svg_string(&data, &palette, false).unwrap();

        assert!(svg.contains("Speedup Factor Analysis"));
        assert!(svg.contains("Throughput Performance Comparison"));
        assert!(svg.contains("Execution Time Comparison (Log Scale)"));
        assert!(svg.contains("ARM SME Matrix Multiplication Performance Analysis"));
    }
}
