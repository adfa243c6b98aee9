//! Plotting infrastructure for search timing comparison charts
//!
//! This module renders one log-log line chart per distribution using the [`plotters`] crate.
//! All visual settings come from an explicit [`ChartStyle`] handed to every call, so each chart
//! of a run shares one theme without any global plotting state.

use crate::common::data_structures::DistributionGroup;
use crate::common::formatting::format_scientific;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to {}: {message}", path.display())]
    FileSave { path: PathBuf, message: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Wheat, the annotation box background
pub const WHEAT: RGBColor = RGBColor(245, 222, 179);

/// Visual theme shared by every chart of a report run
///
/// Sizes are given in inches and typographic points and converted to pixels through
/// [`ChartStyle::dpi`], so changing the resolution keeps the chart's proportions.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Figure width in inches
    pub width_inches: f64,
    /// Figure height in inches
    pub height_inches: f64,
    /// Output resolution
    pub dpi: u32,
    /// First title line; the second line names the distribution
    pub title_header: String,
    pub x_description: String,
    pub y_description: String,
    /// Legend entry of the binary search series
    pub std_label: String,
    /// Legend entry of the Eytzinger search series
    pub eytzinger_label: String,
    pub std_color: RGBColor,
    pub eytzinger_color: RGBColor,
    pub line_width_points: f64,
    /// Opacity of the major grid lines; minor lines use half of it
    pub grid_alpha: f64,
    pub annotation_color: RGBColor,
    pub annotation_alpha: f64,
    pub font_family: String,
    pub title_font_points: f64,
    pub axis_font_points: f64,
    pub tick_font_points: f64,
    pub legend_font_points: f64,
    pub annotation_font_points: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width_inches: 12.0,
            height_inches: 8.0,
            dpi: 300,
            title_header: "Eytzinger vs Binary Search Performance Comparison".to_string(),
            x_description: "Number of Elements".to_string(),
            y_description: "Time (seconds)".to_string(),
            std_label: "Binary Search (Upper Bound)".to_string(),
            eytzinger_label: "Eytzinger Search (Upper Bound)".to_string(),
            std_color: BLUE,
            eytzinger_color: RED,
            line_width_points: 1.5,
            grid_alpha: 0.2,
            annotation_color: WHEAT,
            annotation_alpha: 0.5,
            font_family: "sans-serif".to_string(),
            title_font_points: 14.0,
            axis_font_points: 12.0,
            tick_font_points: 10.0,
            legend_font_points: 10.0,
            annotation_font_points: 10.0,
        }
    }
}

impl ChartStyle {
    /// Output image dimensions in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_inches * dpi).round() as u32,
            (self.height_inches * dpi).round() as u32,
        )
    }

    /// Converts typographic points (1/72 inch) to pixels at this style's resolution
    pub fn points_to_pixels(&self, points: f64) -> u32 {
        (points * f64::from(self.dpi) / 72.0).round().max(1.0) as u32
    }
}

/// Renders a distribution group's comparison chart to an image file
///
/// Implemented by the PNG renderer below; the report runner only depends on this trait.
pub trait ChartRenderer {
    fn render(
        &self,
        group: &DistributionGroup<'_>,
        style: &ChartStyle,
        output_path: &Path,
    ) -> Result<()>;
}

/// Renders charts as PNG bitmaps through plotters
#[derive(Debug, Default, Clone, Copy)]
pub struct BitmapChartRenderer;

impl ChartRenderer for BitmapChartRenderer {
    fn render(
        &self,
        group: &DistributionGroup<'_>,
        style: &ChartStyle,
        output_path: &Path,
    ) -> Result<()> {
        create_comparison_plot(group, style, output_path)
    }
}

/// Lines of the upper-left annotation box for a group
pub fn annotation_lines(group: &DistributionGroup<'_>) -> Vec<String> {
    let range = match group.size_range() {
        Some((min, max)) => format!(
            "Element range: {} to {}",
            format_scientific(min as f64, 0),
            format_scientific(max as f64, 0)
        ),
        None => "Element range: n/a".to_string(),
    };

    vec![
        "X-axis: Log scale (base 2)".to_string(),
        "Y-axis: Log scale (base 2)".to_string(),
        range,
    ]
}

/// Computes a log axis range covering every positive, finite value
///
/// Adds a quarter binary decade of headroom on each side. A single distinct value gets one
/// full binary decade either side, and no usable value at all falls back to `1..2`.
pub fn log_axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return 1.0..2.0;
    }

    if min >= max {
        return (min / 2.0)..(max * 2.0);
    }

    let pad = 2f64.powf(0.25);
    (min / pad)..(max * pad)
}

/// Drops points a logarithmic axis cannot show
fn plottable(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    points
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && *x > 0.0 && *y > 0.0)
        .collect()
}

/// Outline of a rectangle with rounded corners, clockwise on screen
fn rounded_rectangle(top_left: (i32, i32), bottom_right: (i32, i32), radius: i32) -> Vec<(i32, i32)> {
    const STEPS: i32 = 8;
    let (x0, y0) = top_left;
    let (x1, y1) = bottom_right;
    let r = radius.min((x1 - x0) / 2).min((y1 - y0) / 2).max(0);

    // (corner centre, starting angle in degrees); screen y grows downward
    let corners = [
        ((x1 - r, y0 + r), -90.0),
        ((x1 - r, y1 - r), 0.0),
        ((x0 + r, y1 - r), 90.0),
        ((x0 + r, y0 + r), 180.0),
    ];

    corners
        .iter()
        .flat_map(|&((cx, cy), start): &((i32, i32), f64)| {
            (0..=STEPS).map(move |step| {
                let angle = (start + 90.0 * f64::from(step) / f64::from(STEPS)).to_radians();
                (
                    cx + (f64::from(r) * angle.cos()).round() as i32,
                    cy + (f64::from(r) * angle.sin()).round() as i32,
                )
            })
        })
        .collect()
}

/// Creates the binary vs Eytzinger comparison chart for one distribution and saves it as PNG
///
/// # Chart Properties
/// * Size: [`ChartStyle::pixel_size`] (3600x2400 for the default 12x8in at 300 DPI)
/// * X-axis: `Size`, logarithmic base 2, tick labels in scientific notation (`1e+06`)
/// * Y-axis: seconds, logarithmic base 2
/// * Two line series in table row order, a legend, light grid lines on both axes
/// * Rounded annotation box in the upper-left naming the scales and the element range
///
/// The bitmap surface lives only for the duration of this call; it is flushed by
/// `present` and released when the function returns, whether or not drawing succeeded.
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If the group is empty, drawing failed, or the file could not be written
pub fn create_comparison_plot(
    group: &DistributionGroup<'_>,
    style: &ChartStyle,
    output_path: &Path,
) -> Result<()> {
    if group.rows.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "Distribution '{}' has no rows",
            group.distribution
        )));
    }

    let std_points = plottable(group.std_series());
    let eytzinger_points = plottable(group.eytzinger_series());

    let x_range = log_axis_range(group.rows.iter().map(|row| row.size as f64));
    let y_range = log_axis_range(
        std_points
            .iter()
            .chain(eytzinger_points.iter())
            .map(|(_, y)| *y),
    );

    let family = style.font_family.as_str();
    let title_px = style.points_to_pixels(style.title_font_points);
    let axis_px = style.points_to_pixels(style.axis_font_points);
    let tick_px = style.points_to_pixels(style.tick_font_points);
    let legend_px = style.points_to_pixels(style.legend_font_points);
    let line_px = style.points_to_pixels(style.line_width_points);
    let margin_px = style.points_to_pixels(12.0);

    // Create the drawing area
    let root = BitMapBackend::new(output_path, style.pixel_size()).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    // Two title lines: fixed header, then the distribution
    let area = root
        .titled(&style.title_header, (family, title_px))
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    let area = area
        .titled(
            &format!("Distribution: {}", group.distribution),
            (family, title_px),
        )
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&area)
        .margin(margin_px)
        .x_label_area_size(axis_px * 4)
        .y_label_area_size(tick_px * 8)
        .build_cartesian_2d(
            x_range.log_scale().base(2.0),
            y_range.log_scale().base(2.0),
        )
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(style.x_description.as_str())
        .y_desc(style.y_description.as_str())
        .axis_desc_style((family, axis_px))
        .label_style((family, tick_px))
        .x_label_formatter(&|x| format_scientific(*x, 0))
        .bold_line_style(BLACK.mix(style.grid_alpha).stroke_width(1))
        .light_line_style(BLACK.mix(style.grid_alpha / 2.0).stroke_width(1))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let legend_len = i32::try_from(legend_px * 2).unwrap_or(i32::MAX);

    let std_style = style.std_color.stroke_width(line_px);
    chart
        .draw_series(LineSeries::new(std_points, std_style))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label(style.std_label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], std_style));

    let eytzinger_style = style.eytzinger_color.stroke_width(line_px);
    chart
        .draw_series(LineSeries::new(eytzinger_points, eytzinger_style))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label(style.eytzinger_label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + legend_len, y)], eytzinger_style)
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(margin_px)
        .legend_area_size(legend_px * 3)
        .label_font((family, legend_px))
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3).stroke_width(1))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let (plot_x, plot_y) = chart.plotting_area().get_pixel_range();
    draw_annotation_box(&root, style, &annotation_lines(group), plot_x, plot_y)?;

    // Flush to disk; the backend is dropped on return
    root.present().map_err(|e| PlotError::FileSave {
        path: output_path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

/// Draws the rounded, semi-transparent scale information box at 5% / 5% of the plot area
fn draw_annotation_box<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    style: &ChartStyle,
    lines: &[String],
    plot_x: Range<i32>,
    plot_y: Range<i32>,
) -> Result<()> {
    let font_px = style.points_to_pixels(style.annotation_font_points);
    let font = (style.font_family.as_str(), font_px).into_text_style(root);
    let padding = font_px as i32 / 2;
    let line_height = (f64::from(font_px) * 1.3).round() as i32;

    let mut text_width = 0;
    for line in lines {
        let (width, _) = root
            .estimate_text_size(line, &font)
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        text_width = text_width.max(width as i32);
    }

    let left = plot_x.start + (plot_x.end - plot_x.start) / 20;
    let top = plot_y.start + (plot_y.end - plot_y.start) / 20;
    let right = left + text_width + 2 * padding;
    let bottom = top + line_height * lines.len() as i32 + 2 * padding;

    let outline = rounded_rectangle((left, top), (right, bottom), padding);
    root.draw(&Polygon::new(
        outline,
        style.annotation_color.mix(style.annotation_alpha).filled(),
    ))
    .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, line) in lines.iter().enumerate() {
        let y = top + padding + line_height * index as i32;
        root.draw(&Text::new(line.as_str(), (left + padding, y), font.clone()))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::data_structures::{BenchmarkRow, BenchmarkTable};

    #[test]
    fn default_style_is_12_by_8_at_300_dpi() {
        let style = ChartStyle::default();
        assert_eq!(style.pixel_size(), (3600, 2400));
        assert_eq!(style.points_to_pixels(72.0), 300);
        assert_eq!(style.points_to_pixels(12.0), 50);
    }

    #[test]
    fn log_axis_range_pads_positive_values() {
        let range = log_axis_range([1024.0, 4096.0, 0.0, -3.0, f64::INFINITY]);
        assert!(range.start < 1024.0 && range.start > 512.0);
        assert!(range.end > 4096.0 && range.end < 8192.0);
    }

    #[test]
    fn log_axis_range_widens_single_value() {
        assert_eq!(log_axis_range([8.0, 8.0]), 4.0..16.0);
    }

    #[test]
    fn log_axis_range_falls_back_without_positive_values() {
        assert_eq!(log_axis_range([0.0, -1.0, f64::NAN]), 1.0..2.0);
        assert_eq!(log_axis_range(Vec::new()), 1.0..2.0);
    }

    #[test]
    fn plottable_drops_non_positive_points() {
        let points = vec![(1.0, 2.0), (0.0, 1.0), (2.0, 0.0), (4.0, f64::INFINITY), (8.0, 1e-6)];
        assert_eq!(plottable(points), vec![(1.0, 2.0), (8.0, 1e-6)]);
    }

    #[test]
    fn rounded_rectangle_stays_inside_bounds() {
        let outline = rounded_rectangle((10, 20), (110, 70), 8);
        assert_eq!(outline.len(), 4 * 9);
        for (x, y) in outline {
            assert!((10..=110).contains(&x));
            assert!((20..=70).contains(&y));
        }
    }

    #[test]
    fn annotation_lines_state_scales_and_range() {
        let table = BenchmarkTable::new(vec![
            BenchmarkRow::new("Uniform", 1024, 1.0, 1.0),
            BenchmarkRow::new("Uniform", 268_435_456, 1.0, 1.0),
        ]);
        let groups = table.group_by_distribution();

        assert_eq!(
            annotation_lines(&groups[0]),
            vec![
                "X-axis: Log scale (base 2)".to_string(),
                "Y-axis: Log scale (base 2)".to_string(),
                "Element range: 1e+03 to 3e+08".to_string(),
            ]
        );
    }

    #[test]
    fn empty_group_is_rejected() {
        let group = DistributionGroup {
            distribution: "Uniform",
            rows: Vec::new(),
        };
        let output_path = std::env::temp_dir().join("empty_group_plot.png");

        let result = create_comparison_plot(&group, &ChartStyle::default(), &output_path);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn renders_comparison_plot() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("comparison.png");
        let table = BenchmarkTable::new(vec![
            BenchmarkRow::new("Uniform", 1024, 2.0e-8, 1.5e-8),
            BenchmarkRow::new("Uniform", 2048, 2.4e-8, 1.6e-8),
            BenchmarkRow::new("Uniform", 4096, 3.1e-8, 1.8e-8),
        ]);
        let groups = table.group_by_distribution();

        let result = BitmapChartRenderer.render(&groups[0], &ChartStyle::default(), &output_path);

        assert!(result.is_ok());
        assert!(output_path.exists());
    }
}
