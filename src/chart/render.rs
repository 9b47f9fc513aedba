//! Two-panel training-curve renderer.
//!
//! Draws accuracy and loss curves side by side on a single raster canvas
//! using `imageproc` drawing primitives, with the best validation epoch
//! marked and annotated on each panel. Output dimensions are fixed by
//! [`ChartStyle`]; text is rendered with the first system TrueType font
//! found, and skipped entirely when none is available.

use std::path::Path;

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut, text_size};
use tracing::{debug, info};

use crate::chart::{BestEpoch, TrainingHistory};
use crate::core::errors::{PrepError, PrepResult};
use crate::utils::load_font;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TRAIN_COLOR: Rgb<u8> = Rgb([65, 105, 225]); // royal blue
const VALIDATION_COLOR: Rgb<u8> = Rgb([220, 20, 60]); // crimson
const BEST_COLOR: Rgb<u8> = Rgb([0, 100, 0]); // dark green
const GRID_COLOR: Rgb<u8> = Rgb([225, 225, 225]);
const AXIS_COLOR: Rgb<u8> = Rgb([70, 70, 70]);
const TEXT_COLOR: Rgb<u8> = Rgb([40, 40, 40]);

const TITLE_BAND: u32 = 56;
const GUTTER: u32 = 36;
const PLOT_PAD_LEFT: u32 = 58;
const PLOT_PAD_RIGHT: u32 = 14;
const PLOT_PAD_TOP: u32 = 34;
const PLOT_PAD_BOTTOM: u32 = 44;

/// Canvas dimensions and shared title of the rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Title drawn centered above both panels.
    pub title: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 560,
            title: "Training and Validation Accuracy & Loss".to_string(),
        }
    }
}

/// A rectangular drawing region on the canvas.
#[derive(Debug, Clone, Copy)]
struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// One curve of a panel.
struct Series<'a> {
    label: &'a str,
    color: Rgb<u8>,
    values: &'a [f64],
}

/// Renders the two-panel training-curve chart.
///
/// Validates the history first; a missing/empty metric sequence or a length
/// mismatch aborts the render with the corresponding [`PrepError`].
pub fn render_history(history: &TrainingHistory, style: &ChartStyle) -> PrepResult<RgbImage> {
    history.validate()?;
    if style.width < 480 || style.height < 240 {
        return Err(PrepError::invalid_input(format!(
            "chart canvas too small: {}x{}",
            style.width, style.height
        )));
    }

    // validate() guarantees the sequences are non-empty.
    let best_acc = history
        .best_accuracy()
        .ok_or(PrepError::MissingMetric { key: "val_accuracy" })?;
    let best_loss = history
        .best_loss()
        .ok_or(PrepError::MissingMetric { key: "val_loss" })?;

    let mut canvas = RgbImage::from_pixel(style.width, style.height, BACKGROUND);
    let font = load_font();
    if font.is_none() {
        debug!("no system font found, rendering chart without text labels");
    }

    let panel_width = (style.width - 3 * GUTTER) / 2;
    let panel_height = style.height - TITLE_BAND - GUTTER;
    let left = Region {
        x: GUTTER,
        y: TITLE_BAND,
        width: panel_width,
        height: panel_height,
    };
    let right = Region {
        x: 2 * GUTTER + panel_width,
        y: TITLE_BAND,
        width: panel_width,
        height: panel_height,
    };

    if let Some(ref font) = font {
        let scale = 24.0;
        let (text_width, _) = text_size(scale, font, &style.title);
        let x = (style.width.saturating_sub(text_width) / 2) as i32;
        draw_text_mut(&mut canvas, TEXT_COLOR, x, 14, scale, font, &style.title);
    }

    draw_panel(
        &mut canvas,
        left,
        "Accuracy Over Epochs",
        &[
            Series {
                label: "Training Accuracy",
                color: TRAIN_COLOR,
                values: &history.accuracy,
            },
            Series {
                label: "Validation Accuracy",
                color: VALIDATION_COLOR,
                values: &history.val_accuracy,
            },
        ],
        best_acc,
        "Best",
        font.as_ref(),
    );

    draw_panel(
        &mut canvas,
        right,
        "Loss Over Epochs",
        &[
            Series {
                label: "Training Loss",
                color: TRAIN_COLOR,
                values: &history.loss,
            },
            Series {
                label: "Validation Loss",
                color: VALIDATION_COLOR,
                values: &history.val_loss,
            },
        ],
        best_loss,
        "Lowest",
        font.as_ref(),
    );

    Ok(canvas)
}

/// Renders the chart and saves it to `path` (the extension picks the encoder).
pub fn render_history_to_file(
    history: &TrainingHistory,
    style: &ChartStyle,
    path: impl AsRef<Path>,
) -> PrepResult<()> {
    let path = path.as_ref();
    let chart = render_history(history, style)?;
    chart.save(path).map_err(|source| PrepError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    info!("saved training curves to {}", path.display());
    Ok(())
}

fn draw_panel(
    canvas: &mut RgbImage,
    area: Region,
    title: &str,
    series: &[Series<'_>],
    best: BestEpoch,
    best_prefix: &str,
    font: Option<&FontVec>,
) {
    let plot = Region {
        x: area.x + PLOT_PAD_LEFT,
        y: area.y + PLOT_PAD_TOP,
        width: area.width - PLOT_PAD_LEFT - PLOT_PAD_RIGHT,
        height: area.height - PLOT_PAD_TOP - PLOT_PAD_BOTTOM,
    };
    let epochs = series[0].values.len();

    // Value range across all curves, with 5% headroom on both sides.
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for &v in s.values {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    let span = y_max - y_min;
    let headroom = if span > 0.0 { span * 0.05 } else { 0.5 };
    let y_min = y_min - headroom;
    let y_max = y_max + headroom;

    let map_x = |epoch: usize| -> f32 {
        if epochs <= 1 {
            (plot.x + plot.width / 2) as f32
        } else {
            plot.x as f32 + plot.width as f32 * (epoch - 1) as f32 / (epochs - 1) as f32
        }
    };
    let map_y = |value: f64| -> f32 {
        let t = (value - y_min) / (y_max - y_min);
        plot.y as f32 + plot.height as f32 * (1.0 - t as f32)
    };

    // Horizontal gridlines with value tick labels.
    let y_ticks = 5;
    for i in 0..y_ticks {
        let value = y_min + (y_max - y_min) * i as f64 / (y_ticks - 1) as f64;
        let y = map_y(value);
        draw_line_segment_mut(
            canvas,
            (plot.x as f32, y),
            ((plot.x + plot.width) as f32, y),
            GRID_COLOR,
        );
        if let Some(font) = font {
            let label = format!("{value:.2}");
            let (w, h) = text_size(13.0, font, &label);
            let x = (plot.x as i32 - w as i32 - 6).max(0);
            draw_text_mut(canvas, TEXT_COLOR, x, (y as i32 - h as i32 / 2).max(0), 13.0, font, &label);
        }
    }

    // Vertical gridlines with epoch tick labels.
    let x_step = epochs.div_ceil(8).max(1);
    for epoch in (1..=epochs).step_by(x_step) {
        let x = map_x(epoch);
        draw_line_segment_mut(
            canvas,
            (x, plot.y as f32),
            (x, (plot.y + plot.height) as f32),
            GRID_COLOR,
        );
        if let Some(font) = font {
            let label = epoch.to_string();
            let (w, _) = text_size(13.0, font, &label);
            draw_text_mut(
                canvas,
                TEXT_COLOR,
                (x as i32 - w as i32 / 2).max(0),
                (plot.y + plot.height + 8) as i32,
                13.0,
                font,
                &label,
            );
        }
    }

    // Axis lines over the grid.
    draw_line_segment_mut(
        canvas,
        (plot.x as f32, plot.y as f32),
        (plot.x as f32, (plot.y + plot.height) as f32),
        AXIS_COLOR,
    );
    draw_line_segment_mut(
        canvas,
        (plot.x as f32, (plot.y + plot.height) as f32),
        ((plot.x + plot.width) as f32, (plot.y + plot.height) as f32),
        AXIS_COLOR,
    );

    for s in series {
        draw_curve(canvas, s, &map_x, &map_y);
    }

    // Best-epoch marker and annotation.
    let cx = map_x(best.epoch);
    let cy = map_y(best.value);
    draw_filled_circle_mut(canvas, (cx as i32, cy as i32), 4, BEST_COLOR);
    if let Some(font) = font {
        let label = format!("{best_prefix}: {:.2} (epoch {})", best.value, best.epoch);
        let (w, _) = text_size(14.0, font, &label);
        let x = (cx as i32 + 8).min((plot.x + plot.width) as i32 - w as i32).max(plot.x as i32);
        let y = (cy as i32 - 20).max(plot.y as i32);
        draw_text_mut(canvas, BEST_COLOR, x, y, 14.0, font, &label);
    }

    if let Some(font) = font {
        // Panel title centered above the plot.
        let (w, _) = text_size(18.0, font, title);
        let x = plot.x as i32 + (plot.width as i32 - w as i32) / 2;
        draw_text_mut(canvas, TEXT_COLOR, x.max(0), (area.y + 4) as i32, 18.0, font, title);

        // X-axis label.
        let (w, _) = text_size(14.0, font, "Epochs");
        let x = plot.x as i32 + (plot.width as i32 - w as i32) / 2;
        let y = (plot.y + plot.height + 26) as i32;
        draw_text_mut(canvas, TEXT_COLOR, x.max(0), y, 14.0, font, "Epochs");

        // Legend in the top-right corner of the plot.
        let legend_x = (plot.x + plot.width).saturating_sub(170).max(plot.x);
        let mut legend_y = plot.y + 6;
        for s in series {
            let mid = (legend_y + 7) as f32;
            draw_line_segment_mut(
                canvas,
                (legend_x as f32, mid),
                ((legend_x + 22) as f32, mid),
                s.color,
            );
            draw_line_segment_mut(
                canvas,
                (legend_x as f32, mid + 1.0),
                ((legend_x + 22) as f32, mid + 1.0),
                s.color,
            );
            draw_text_mut(
                canvas,
                TEXT_COLOR,
                (legend_x + 28) as i32,
                legend_y as i32,
                13.0,
                font,
                s.label,
            );
            legend_y += 18;
        }
    }
}

/// Draws one curve as a polyline with a two-pixel stroke.
fn draw_curve(
    canvas: &mut RgbImage,
    series: &Series<'_>,
    map_x: &dyn Fn(usize) -> f32,
    map_y: &dyn Fn(f64) -> f32,
) {
    if series.values.len() == 1 {
        let x = map_x(1);
        let y = map_y(series.values[0]);
        draw_filled_circle_mut(canvas, (x as i32, y as i32), 2, series.color);
        return;
    }
    for epoch in 1..series.values.len() {
        let start = (map_x(epoch), map_y(series.values[epoch - 1]));
        let end = (map_x(epoch + 1), map_y(series.values[epoch]));
        draw_line_segment_mut(canvas, start, end, series.color);
        draw_line_segment_mut(
            canvas,
            (start.0, start.1 + 1.0),
            (end.0, end.1 + 1.0),
            series.color,
        );
    }
}
