use crate::data::{MatrixSize, Measurements, Method, MetricTable};
use crate::style::{Palette, FONT_FAMILY};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::element::{DynElement, IntoDynElement, Polygon};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

// Base canvas for the full three-panel figure. 1800×600 px corresponds to the
// 18×6 in layout at 100 px/in; bitmap exports multiply by an integer scale.
pub const FIGURE_WIDTH: u32 = 1800;
pub const FIGURE_HEIGHT: u32 = 600;

// Font sizes at scale 1
const FIGURE_TITLE_FONT_SIZE: u32 = 28;
const TITLE_FONT_SIZE: u32 = 22;
const AXIS_LABEL_FONT_SIZE: u32 = 18;
const TICK_LABEL_FONT_SIZE: u32 = 15;
const LEGEND_FONT_SIZE: u32 = 14;
const DATA_LABEL_FONT_SIZE: u32 = 13;

// Layout tuning
const PANEL_MARGIN: u32 = 12;
const X_LABEL_AREA_SIZE: u32 = 55;
const Y_LABEL_AREA_SIZE: u32 = 70;

/// Marker shapes distinguishing the line series
#[derive(Debug, Clone, Copy)]
enum Marker {
    Circle,
    Square,
    Triangle,
    Diamond,
}

fn method_marker(method: Method) -> Marker {
    match method {
        Method::CpuBaseline => Marker::Circle,
        Method::CpuPrepSingleTile => Marker::Square,
        Method::SmePrepSingleTile => Marker::Triangle,
        Method::SmePrepFourTiles => Marker::Diamond,
    }
}

/// Draw the complete three-panel figure onto `root`.
///
/// `scale` multiplies every pixel-denominated size (fonts, strokes, margins) so
/// the same layout renders correctly at bitmap resolutions above the base
/// canvas. With `verbose` set, a progress line is printed after each panel.
pub fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    data: &Measurements,
    palette: &Palette,
    scale: u32,
    verbose: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let s = scale as i32;
    let titled = root.titled(
        "ARM SME Matrix Multiplication Performance Analysis",
        (FONT_FAMILY, FIGURE_TITLE_FONT_SIZE * scale)
            .into_font()
            .color(&palette.text),
    )?;
    let body = titled.margin(6 * s, 10 * s, 8 * s, 8 * s);
    let panels = body.split_evenly((1, 3));

    draw_speedup_panel(&panels[0], &data.speedup, palette, scale)?;
    if verbose {
        println!("  ✓ Speedup analysis chart created");
    }

    draw_throughput_panel(&panels[1], &data.gflops, palette, scale)?;
    if verbose {
        println!("  ✓ GFLOPS comparison chart created");
    }

    draw_time_panel(&panels[2], &data.time_us, palette, scale)?;
    if verbose {
        println!("  ✓ Execution time chart created");
    }

    Ok(())
}

/// Line chart of speedup factors relative to the CPU baseline
fn draw_speedup_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    speedup: &MetricTable,
    palette: &Palette,
    scale: u32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let s = scale as i32;
    let num_sizes = MatrixSize::all().len();
    let x_max = num_sizes as f64 - 0.7;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Speedup Factor Analysis",
            (FONT_FAMILY, TITLE_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .margin(PANEL_MARGIN * scale)
        .x_label_area_size(X_LABEL_AREA_SIZE * scale)
        .y_label_area_size(Y_LABEL_AREA_SIZE * scale)
        .build_cartesian_2d(-0.3..x_max, 0.5..600.0)?;

    chart
        .configure_mesh()
        .x_labels(num_sizes)
        .x_label_formatter(&|x| size_tick_label(*x))
        .bold_line_style(palette.grid.mix(0.6))
        .light_line_style(palette.grid.mix(0.25))
        .y_desc("Speedup Factor (×)")
        .x_desc("Matrix Size (M×K×N)")
        .label_style(
            (FONT_FAMILY, TICK_LABEL_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .axis_desc_style(
            (FONT_FAMILY, AXIS_LABEL_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .draw()?;

    // Reference line at 1.0 marking baseline parity
    let baseline_color = palette.baseline.mix(0.5);
    chart
        .draw_series(DashedLineSeries::new(
            vec![(-0.3, 1.0), (x_max, 1.0)],
            8 * scale,
            6 * scale,
            baseline_color.stroke_width(2 * scale),
        ))?
        .label(Method::CpuBaseline.speedup_label())
        .legend(move |(x, y)| {
            PathElement::new(
                vec![(x, y), (x + 20 * s, y)],
                baseline_color.stroke_width(2 * scale),
            )
        });

    for &method in Method::all().iter().filter(|m| !m.is_baseline()) {
        let color = palette.method_color(method);
        let points = speedup.points(method);
        let marker = method_marker(method);

        chart
            .draw_series(LineSeries::new(
                points.clone(),
                color.stroke_width(3 * scale),
            ))?
            .label(method.speedup_label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20 * s, y)], color.stroke_width(3 * scale))
            });

        for &p in points.iter() {
            chart
                .plotting_area()
                .draw(&marker_element(p, marker, 5 * s, color.filled()))?;
        }
    }

    // Call out every point of the fastest variant
    let best = palette.method_color(Method::SmePrepFourTiles);
    for (i, &(x, val)) in speedup.points(Method::SmePrepFourTiles).iter().enumerate() {
        // The middle point sits close to its neighbor series, push it higher
        let y = if i == 1 { val * 1.15 } else { val * 1.10 };
        chart.plotting_area().draw(&value_badge(
            (x, y),
            format!("{:.1}×", val),
            best,
            scale,
            true,
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.95))
        .border_style(palette.grid)
        .label_font((FONT_FAMILY, LEGEND_FONT_SIZE * scale).into_font())
        .draw()?;

    Ok(())
}

/// Grouped bar chart of throughput in GFLOPS
fn draw_throughput_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    gflops: &MetricTable,
    palette: &Palette,
    scale: u32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let num_sizes = MatrixSize::all().len();
    let y_max = 1700.0;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Throughput Performance Comparison",
            (FONT_FAMILY, TITLE_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .margin(PANEL_MARGIN * scale)
        .x_label_area_size(X_LABEL_AREA_SIZE * scale)
        .y_label_area_size(Y_LABEL_AREA_SIZE * scale)
        .build_cartesian_2d(-0.5..(num_sizes as f64 - 0.5), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(num_sizes)
        .x_label_formatter(&|x| size_tick_label(*x))
        .bold_line_style(palette.grid.mix(0.6))
        .light_line_style(palette.grid.mix(0.25))
        .y_desc("Throughput (GFLOPS)")
        .x_desc("Matrix Size (M×K×N)")
        .label_style(
            (FONT_FAMILY, TICK_LABEL_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .axis_desc_style(
            (FONT_FAMILY, AXIS_LABEL_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .draw()?;

    let bar_width = 0.2;

    for (method_idx, &method) in Method::all().iter().enumerate() {
        let color = palette.method_color(method);
        // Offsets of -1.5, -0.5, +0.5, +1.5 bar widths around each category
        let offset = (method_idx as f64 - 1.5) * bar_width;

        for (i, &val) in gflops.get(method).iter().enumerate() {
            let x_center = i as f64 + offset;
            let x_left = x_center - bar_width / 2.0 + 0.01;
            let x_right = x_center + bar_width / 2.0 - 0.01;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x_left, 0.0), (x_right, val)],
                color.filled(),
            )))?;

            // Label alternating bars of the fastest variant
            if method == Method::SmePrepFourTiles && i % 2 == 1 {
                chart.draw_series(std::iter::once(Text::new(
                    format!("{:.0}", val),
                    (x_center, val + y_max * 0.015),
                    (FONT_FAMILY, DATA_LABEL_FONT_SIZE * scale)
                        .into_font()
                        .color(&color)
                        .pos(Pos::new(HPos::Center, VPos::Bottom)),
                )))?;
            }
        }
    }

    draw_two_column_legend(&mut chart, palette, scale, y_max)?;

    Ok(())
}

/// Hand-drawn two-column legend for the bar chart; the built-in series label
/// box only supports a single column.
fn draw_two_column_legend<DB>(
    chart: &mut ChartContext<
        '_,
        DB,
        Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>,
    >,
    palette: &Palette,
    scale: u32,
    y_max: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let s = scale as i32;

    // Backing box in data coordinates, anchored upper-left
    chart.draw_series(std::iter::once(Rectangle::new(
        [(-0.46, y_max * 0.995), (1.95, y_max * 0.845)],
        WHITE.mix(0.95).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(-0.46, y_max * 0.995), (1.95, y_max * 0.845)],
        palette.grid.stroke_width(scale),
    )))?;

    let col_x = [-0.40, 0.78];
    let row_y = [y_max * 0.955, y_max * 0.885];

    for (idx, &method) in Method::all().iter().enumerate() {
        let color = palette.method_color(method);
        let anchor = (col_x[idx % 2], row_y[idx / 2]);

        chart.plotting_area().draw(
            &(EmptyElement::at(anchor)
                + Rectangle::new([(0, -5 * s), (14 * s, 5 * s)], color.filled())
                + Text::new(
                    method.short_label().to_string(),
                    (18 * s, 0),
                    (FONT_FAMILY, LEGEND_FONT_SIZE * scale)
                        .into_font()
                        .color(&palette.text)
                        .pos(Pos::new(HPos::Left, VPos::Center)),
                ))
                .into_dyn(),
        )?;
    }

    Ok(())
}

/// Log-scale line chart of raw execution times
fn draw_time_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    time_us: &MetricTable,
    palette: &Palette,
    scale: u32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let s = scale as i32;
    let num_sizes = MatrixSize::all().len();
    let x_max = num_sizes as f64 - 0.7;

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Execution Time Comparison (Log Scale)",
            (FONT_FAMILY, TITLE_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .margin(PANEL_MARGIN * scale)
        .x_label_area_size(X_LABEL_AREA_SIZE * scale)
        .y_label_area_size(Y_LABEL_AREA_SIZE * scale)
        .build_cartesian_2d(-0.3..x_max, (3.0..20000.0).log_scale())?;

    chart
        .configure_mesh()
        .x_labels(num_sizes)
        .x_label_formatter(&|x| size_tick_label(*x))
        .y_label_formatter(&|y| format_log_time_tick(*y))
        .bold_line_style(palette.grid.mix(0.6))
        .light_line_style(palette.grid.mix(0.25))
        .y_desc("Execution Time (µs)")
        .x_desc("Matrix Size (M×K×N)")
        .label_style(
            (FONT_FAMILY, TICK_LABEL_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .axis_desc_style(
            (FONT_FAMILY, AXIS_LABEL_FONT_SIZE * scale)
                .into_font()
                .color(&palette.text),
        )
        .draw()?;

    for &method in Method::all() {
        let color = palette.method_color(method);
        let points = time_us.points(method);
        let marker = method_marker(method);

        chart
            .draw_series(LineSeries::new(
                points.clone(),
                color.stroke_width(3 * scale),
            ))?
            .label(method.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20 * s, y)], color.stroke_width(3 * scale))
            });

        for &p in points.iter() {
            chart
                .plotting_area()
                .draw(&marker_element(p, marker, 5 * s, color.filled()))?;
        }
    }

    // Annotate only the endpoints of the fastest variant; the first sits near
    // the bottom of the axis so its badge hangs below the point.
    let best = palette.method_color(Method::SmePrepFourTiles);
    let best_points = time_us.points(Method::SmePrepFourTiles);
    if let (Some(&(x_first, first)), Some(&(x_last, last))) =
        (best_points.first(), best_points.last())
    {
        chart.plotting_area().draw(&value_badge(
            (x_first, first * 0.6),
            format!("{:.1}µs", first),
            best,
            scale,
            false,
        ))?;
        chart.plotting_area().draw(&value_badge(
            (x_last, last * 1.5),
            format!("{:.1}µs", last),
            best,
            scale,
            true,
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.95))
        .border_style(palette.grid)
        .label_font((FONT_FAMILY, LEGEND_FONT_SIZE * scale).into_font())
        .draw()?;

    Ok(())
}

/// Snap fractional axis positions to category labels, blank elsewhere
fn size_tick_label(x: f64) -> String {
    let idx = x.round() as usize;
    if idx < MatrixSize::all().len() && (x - idx as f64).abs() < 0.3 {
        MatrixSize::all()[idx].name().to_string()
    } else {
        String::new()
    }
}

/// Only label powers of 10 on the log time axis
fn format_log_time_tick(micros: f64) -> String {
    if micros <= 0.0 {
        return String::new();
    }
    let log10 = micros.log10();
    let nearest = log10.round();
    if (log10 - nearest).abs() < 1e-6 {
        format!("{:.0}", micros)
    } else {
        String::new()
    }
}

/// Marker element centered on a data point
fn marker_element<'a, DB>(
    coord: (f64, f64),
    marker: Marker,
    size: i32,
    style: ShapeStyle,
) -> DynElement<'a, DB, (f64, f64)>
where
    DB: DrawingBackend + 'a,
{
    let e = EmptyElement::at(coord);
    match marker {
        Marker::Circle => (e + Circle::new((0, 0), size, style)).into_dyn(),
        Marker::Square => (e + Rectangle::new([(-size, -size), (size, size)], style)).into_dyn(),
        Marker::Triangle => (e + TriangleMarker::new((0, 0), size, style)).into_dyn(),
        Marker::Diamond => {
            (e + Polygon::new(vec![(0, -size), (size, 0), (0, size), (-size, 0)], style)).into_dyn()
        }
    }
}

/// Bordered white label next to a data point, above or below the anchor
fn value_badge<'a, DB>(
    coord: (f64, f64),
    text: String,
    color: RGBColor,
    scale: u32,
    above: bool,
) -> DynElement<'a, DB, (f64, f64)>
where
    DB: DrawingBackend + 'a,
{
    let s = scale as i32;
    let half_w = (5 + 4 * text.chars().count() as i32) * s;
    let height = 16 * s;

    let (box_top, box_bottom, text_y, v_pos) = if above {
        (-height, 0, -2 * s, VPos::Bottom)
    } else {
        (0, height, 2 * s, VPos::Top)
    };

    let font = (FONT_FAMILY, DATA_LABEL_FONT_SIZE * scale)
        .into_font()
        .color(&color)
        .pos(Pos::new(HPos::Center, v_pos));

    (EmptyElement::at(coord)
        + Rectangle::new(
            [(-half_w, box_top), (half_w, box_bottom)],
            WHITE.mix(0.8).filled(),
        )
        + Rectangle::new(
            [(-half_w, box_top), (half_w, box_bottom)],
            color.stroke_width(scale),
        )
        + Text::new(text, (0, text_y), font))
    .into_dyn()
}
