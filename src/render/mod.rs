// File: src/render/mod.rs
//! Calendar heatmap rendering.
//!
//! [`render`] is a pure function of its inputs: the same calendar, palette and
//! configuration always produce byte-identical SVG, and the image dimensions
//! depend on the configuration alone.
pub mod grid;
pub mod scale;
pub mod text;

pub use grid::{Cell, DAYS_PER_WEEK, Grid};
pub use scale::{DEFAULT_THRESHOLDS, Scale};
pub use text::TooltipStyle;

use crate::color_utils::Palette;
use crate::error::{Error, Result};
use crate::model::Calendar;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::warn;

/// Upper bound on `columns` accepted from configuration.
pub const MAX_COLUMNS: u32 = 1000;
/// Upper bound on each other geometry value accepted from configuration.
pub const MAX_LENGTH: u32 = 1000;

const WEEKDAY_LABELS: [(usize, &str); 3] = [(1, "Mon"), (3, "Wed"), (5, "Fri")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub cell_size: u32,
    pub gap: u32,
    pub columns: u32,
    pub padding: u32,
    pub corner_radius: u32,
    pub header_height: u32,
    pub legend_height: u32,
    pub label_gutter: u32,
    pub show_header: bool,
    pub show_legend: bool,
    pub show_month_labels: bool,
    pub show_weekday_labels: bool,
    pub tooltip_style: TooltipStyle,
    /// Inclusive upper bounds of the nonzero levels, see [`Scale`].
    pub thresholds: Vec<u32>,
    pub text_color: String,
    pub background: Option<String>,
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            gap: 3,
            columns: 53,
            padding: 16,
            corner_radius: 2,
            header_height: 28,
            legend_height: 24,
            label_gutter: 28,
            show_header: true,
            show_legend: true,
            show_month_labels: true,
            show_weekday_labels: true,
            tooltip_style: TooltipStyle::Ordinal,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            text_color: "#57606a".to_string(),
            background: None,
            font_family: r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif"#
                .to_string(),
        }
    }
}

impl RenderConfig {
    pub fn rows(&self) -> u32 {
        DAYS_PER_WEEK as u32
    }

    pub fn step(&self) -> u32 {
        self.cell_size.saturating_add(self.gap)
    }

    fn header_band(&self) -> u32 {
        if self.show_header || self.show_month_labels {
            self.header_height
        } else {
            0
        }
    }

    pub fn grid_x(&self) -> u32 {
        let gutter = if self.show_weekday_labels { self.label_gutter } else { 0 };
        self.padding.saturating_add(gutter)
    }

    pub fn grid_y(&self) -> u32 {
        self.padding.saturating_add(self.header_band())
    }

    fn span(&self, n: u32) -> u32 {
        n.saturating_mul(self.step()).saturating_sub(self.gap)
    }

    pub fn width(&self) -> u32 {
        self.grid_x()
            .saturating_add(self.span(self.columns))
            .saturating_add(self.padding)
    }

    pub fn height(&self) -> u32 {
        let legend = if self.show_legend { self.legend_height } else { 0 };
        self.grid_y()
            .saturating_add(self.span(self.rows()))
            .saturating_add(legend)
            .saturating_add(self.padding)
    }

    /// Top-left corner of the cell at (`column`, `row`).
    pub fn cell_origin(&self, column: u32, row: u32) -> (u32, u32) {
        (
            self.grid_x().saturating_add(column.saturating_mul(self.step())),
            self.grid_y().saturating_add(row.saturating_mul(self.step())),
        )
    }

    /// Geometry limits for values read from configuration. Positions
    /// saturate rather than wrap when these are bypassed.
    pub fn check_bounds(&self) -> Result<()> {
        if self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(Error::InvalidConfig(format!(
                "columns must be between 1 and {}, got {}",
                MAX_COLUMNS, self.columns
            )));
        }
        if self.cell_size == 0 {
            return Err(Error::InvalidConfig("cell_size must be at least 1".to_string()));
        }
        let lengths = [
            ("cell_size", self.cell_size),
            ("gap", self.gap),
            ("padding", self.padding),
            ("corner_radius", self.corner_radius),
            ("header_height", self.header_height),
            ("legend_height", self.legend_height),
            ("label_gutter", self.label_gutter),
        ];
        for (name, value) in lengths {
            if value > MAX_LENGTH {
                return Err(Error::InvalidConfig(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_LENGTH, value
                )));
            }
        }
        Ok(())
    }

    /// Scale from the configured thresholds. Mismatched thresholds fall back
    /// to evenly spaced breakpoints so rendering never fails.
    pub fn scale_for(&self, palette: &Palette) -> Scale {
        Scale::new(self.thresholds.clone(), palette.len()).unwrap_or_else(|e| {
            warn!(error = %e, "thresholds do not fit the palette, using evenly spaced levels");
            Scale::for_levels(palette.len()).unwrap_or_default()
        })
    }
}

pub fn render(calendar: &Calendar, palette: &Palette, config: &RenderConfig) -> String {
    let scale = config.scale_for(palette);
    render_with_scale(calendar, palette, &scale, config)
}

pub fn render_with_scale(
    calendar: &Calendar,
    palette: &Palette,
    scale: &Scale,
    config: &RenderConfig,
) -> String {
    let grid = Grid::from_calendar(calendar, config.columns as usize);
    let (width, height) = (config.width(), config.height());
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}" font-size="10" fill="{text}">"#,
        w = width,
        h = height,
        font = text::escape(&config.font_family),
        text = text::escape(&config.text_color),
    );

    if let Some(bg) = &config.background {
        let _ = writeln!(
            out,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            text::escape(bg)
        );
    }

    if config.show_header {
        let _ = writeln!(
            out,
            r#"  <text class="summary" x="{}" y="{}" font-size="12">{}</text>"#,
            config.grid_x(),
            config.padding.saturating_add(12),
            text::escape(&text::summary(calendar.total))
        );
    }

    if config.show_month_labels {
        write_month_labels(&mut out, &grid, config);
    }

    if config.show_weekday_labels {
        out.push_str("  <g class=\"weekdays\">\n");
        for (row, label) in WEEKDAY_LABELS {
            let (_, y) = config.cell_origin(0, row as u32);
            let _ = writeln!(
                out,
                r#"    <text x="{}" y="{}" font-size="9">{}</text>"#,
                config.padding,
                y.saturating_add(config.cell_size.saturating_sub(1)),
                label
            );
        }
        out.push_str("  </g>\n");
    }

    out.push_str("  <g class=\"days\">\n");
    for (x, y, cell) in grid.cells() {
        write_cell(&mut out, x as u32, y as u32, cell, palette, scale, config);
    }
    out.push_str("  </g>\n");

    if config.show_legend {
        write_legend(&mut out, palette, config);
    }

    out.push_str("</svg>\n");
    out
}

fn write_cell(
    out: &mut String,
    x: u32,
    y: u32,
    cell: &Cell,
    palette: &Palette,
    scale: &Scale,
    config: &RenderConfig,
) {
    let level = scale.level(cell.count);
    let (px, py) = config.cell_origin(x, y);
    let _ = write!(
        out,
        r#"    <rect x="{}" y="{}" width="{s}" height="{s}" rx="{r}" ry="{r}" fill="{}" data-level="{}""#,
        px,
        py,
        text::escape(palette.color(level)),
        level,
        s = config.cell_size,
        r = config.corner_radius,
    );
    match &cell.date {
        Some(date) => {
            let _ = writeln!(
                out,
                r#" data-date="{}" data-count="{}"><title>{}</title></rect>"#,
                text::escape(date),
                cell.count,
                text::escape(&text::tooltip(date, cell.count, config.tooltip_style))
            );
        }
        None => out.push_str("/>\n"),
    }
}

fn write_month_labels(out: &mut String, grid: &Grid, config: &RenderConfig) {
    out.push_str("  <g class=\"months\">\n");
    let mut previous = None;
    for column in 0..grid.width() {
        let Some(date) = grid.first_date(column) else {
            continue;
        };
        let key = (date.year(), date.month());
        if previous == Some(key) {
            continue;
        }
        previous = Some(key);
        if let Some(label) = text::month_abbrev(date.month()) {
            let (x, _) = config.cell_origin(column as u32, 0);
            let _ = writeln!(
                out,
                r#"    <text x="{}" y="{}">{}</text>"#,
                x,
                config.grid_y().saturating_sub(5),
                label
            );
        }
    }
    out.push_str("  </g>\n");
}

fn write_legend(out: &mut String, palette: &Palette, config: &RenderConfig) {
    let step = config.step();
    let right = config.width().saturating_sub(config.padding);
    let swatches_end = right.saturating_sub(30);
    let swatches = u32::try_from(palette.len()).unwrap_or(u32::MAX);
    let first_x = swatches_end.saturating_sub(swatches.saturating_mul(step));
    let top = config
        .grid_y()
        .saturating_add(config.span(config.rows()))
        .saturating_add(config.legend_height.saturating_sub(config.cell_size) / 2);
    let baseline = top.saturating_add(config.cell_size.saturating_sub(1));

    out.push_str("  <g class=\"legend\">\n");
    let _ = writeln!(
        out,
        r#"    <text x="{}" y="{}" text-anchor="end">Less</text>"#,
        first_x.saturating_sub(4),
        baseline
    );
    for (i, color) in palette.colors().iter().enumerate() {
        let _ = writeln!(
            out,
            r#"    <rect x="{}" y="{}" width="{s}" height="{s}" rx="{r}" ry="{r}" fill="{}"/>"#,
            first_x.saturating_add((i as u32).saturating_mul(step)),
            top,
            text::escape(color),
            s = config.cell_size,
            r = config.corner_radius,
        );
    }
    let _ = writeln!(
        out,
        r#"    <text x="{}" y="{}" text-anchor="end">More</text>"#,
        right, baseline
    );
    out.push_str("  </g>\n");
}
