use std::collections::BTreeSet;

use crate::error::ChartError;
use crate::graph::{BarStyle, LineStyle, PointStyle};
use crate::ir::{Axis, AxisLabel, DrawCommand, LegendEntry, Orientation, SceneGraph, Tick};
use crate::palette::ColorPalette;
use crate::parser::ast::Labels;
use crate::scale::{BandScale, LinearScale, TimeScale};
use crate::transform::{BoxplotDataset, GroupedBarDataset, LineDataset};
use crate::RenderOptions;

const MARGIN_TOP: f64 = 40.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 60.0;

const OUTER_PADDING: f64 = 0.2;
const INNER_PADDING: f64 = 0.05;
const VALUE_TICKS: usize = 10;
const MAX_DATE_TICKS: usize = 10;

const BOX_FILL: &str = "#69b3a2";
const LINE_COLOR: &str = "#ff7f0e";

/// Pixel rectangle the data marks are drawn into, inside the margins.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

fn plot_area(options: &RenderOptions) -> PlotArea {
    PlotArea {
        left: MARGIN_LEFT,
        right: options.width as f64 - MARGIN_RIGHT,
        top: MARGIN_TOP,
        bottom: options.height as f64 - MARGIN_BOTTOM,
    }
}

// =============================================================================
// Boxplot geometry
// =============================================================================

/// Primitive shapes for a single box, already in pixel space.
struct BoxGeometry {
    whisker: Vec<(f64, f64)>,
    box_tl: (f64, f64),
    box_br: (f64, f64),
    median_line: Vec<(f64, f64)>,
}

fn compute_box_geometry(
    x0: f64,
    width: f64,
    summary: &crate::stats::QuantileSummary,
    y: &LinearScale,
) -> BoxGeometry {
    let cx = x0 + width / 2.0;
    BoxGeometry {
        whisker: vec![(cx, y.position(summary.min)), (cx, y.position(summary.max))],
        box_tl: (x0, y.position(summary.q3)),
        box_br: (x0 + width, y.position(summary.q1)),
        median_line: vec![
            (x0, y.position(summary.median)),
            (x0 + width, y.position(summary.median)),
        ],
    }
}

/// Compile a boxplot dataset into a scene: one whisker line, one box and
/// one median line per group.
pub fn compile_boxplot(
    dataset: &BoxplotDataset,
    labels: &Labels,
    options: &RenderOptions,
) -> Result<SceneGraph, ChartError> {
    let area = plot_area(options);
    let keys: Vec<String> = dataset.groups.iter().map(|(k, _)| k.clone()).collect();

    let x = BandScale::new(keys, (area.left, area.right), OUTER_PADDING);
    let y = LinearScale::new((0.0, dataset.value_max), (area.bottom, area.top), true)?;

    let whisker_style = LineStyle {
        color: Some("black".to_string()),
        width: Some(1.0),
        alpha: None,
    };
    let box_style = BarStyle {
        fill: Some(BOX_FILL.to_string()),
        stroke: Some("black".to_string()),
        alpha: None,
    };
    let median_style = LineStyle {
        color: Some("black".to_string()),
        width: Some(2.0),
        alpha: None,
    };

    let mut commands = Vec::new();
    for (key, summary) in &dataset.groups {
        let geom = compute_box_geometry(x.band_start(key)?, x.bandwidth(), summary, &y);

        commands.push(DrawCommand::Line {
            points: geom.whisker,
            style: whisker_style.clone(),
        });
        commands.push(DrawCommand::Rect {
            tl: geom.box_tl,
            br: geom.box_br,
            style: box_style.clone(),
        });
        commands.push(DrawCommand::Line {
            points: geom.median_line,
            style: median_style.clone(),
        });
    }

    Ok(SceneGraph {
        width: options.width,
        height: options.height,
        title: labels.title.clone(),
        axes: vec![band_axis(&x, &area, labels.x.as_deref())?, value_axis(&y, &area, labels.y.as_deref())],
        legend: Vec::new(),
        commands,
    })
}

// =============================================================================
// Grouped bars
// =============================================================================

/// Compile a grouped bar dataset: outer bands per category, one bar per
/// secondary key inside each band, colored from the fixed palette.
pub fn compile_bars(
    dataset: &GroupedBarDataset,
    labels: &Labels,
    options: &RenderOptions,
) -> Result<SceneGraph, ChartError> {
    let area = plot_area(options);

    let x0 = BandScale::new(
        dataset.outer_keys.clone(),
        (area.left, area.right),
        OUTER_PADDING,
    );
    let x1 = BandScale::new(
        dataset.inner_keys.clone(),
        (0.0, x0.bandwidth()),
        INNER_PADDING,
    );
    let y = LinearScale::new((0.0, dataset.value_max), (area.bottom, area.top), true)?;

    let colors = ColorPalette::category10().assign_colors(&dataset.inner_keys);
    let color_for = |key: &str| -> Result<String, ChartError> {
        colors
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| ChartError::UnknownCategory(key.to_string()))
    };

    let baseline = y.position(0.0);
    let mut commands = Vec::new();
    for bar in &dataset.bars {
        let left = x0.band_start(&bar.outer)? + x1.band_start(&bar.inner)?;
        commands.push(DrawCommand::Rect {
            tl: (left, y.position(bar.value)),
            br: (left + x1.bandwidth(), baseline),
            style: BarStyle {
                fill: Some(color_for(&bar.inner)?),
                stroke: None,
                alpha: None,
            },
        });
    }

    let legend = colors
        .into_iter()
        .map(|(label, color)| LegendEntry { label, color })
        .collect();

    Ok(SceneGraph {
        width: options.width,
        height: options.height,
        title: labels.title.clone(),
        axes: vec![band_axis(&x0, &area, labels.x.as_deref())?, value_axis(&y, &area, labels.y.as_deref())],
        legend,
        commands,
    })
}

// =============================================================================
// Line chart
// =============================================================================

/// Compile a dated series into a polyline plus one marker per point.
pub fn compile_line(
    dataset: &LineDataset,
    labels: &Labels,
    options: &RenderOptions,
) -> Result<SceneGraph, ChartError> {
    let area = plot_area(options);

    let x = TimeScale::new(dataset.date_range, (area.left, area.right))?;
    let y = LinearScale::new((0.0, dataset.value_max), (area.bottom, area.top), true)?;

    let points: Vec<(f64, f64)> = dataset
        .points
        .iter()
        .map(|(d, v)| (x.position(*d), y.position(*v)))
        .collect();

    let commands = vec![
        DrawCommand::Line {
            points: points.clone(),
            style: LineStyle {
                color: Some(LINE_COLOR.to_string()),
                width: Some(2.0),
                alpha: None,
            },
        },
        DrawCommand::Points {
            points,
            style: PointStyle {
                color: Some(LINE_COLOR.to_string()),
                size: Some(4.0),
                alpha: None,
            },
        },
    ];

    Ok(SceneGraph {
        width: options.width,
        height: options.height,
        title: labels.title.clone(),
        axes: vec![date_axis(dataset, &x, &area, labels.x.as_deref()), value_axis(&y, &area, labels.y.as_deref())],
        legend: Vec::new(),
        commands,
    })
}

// =============================================================================
// Axis builders
// =============================================================================

fn band_axis(scale: &BandScale, area: &PlotArea, label: Option<&str>) -> Result<Axis, ChartError> {
    let mut ticks = Vec::new();
    for key in scale.domain() {
        ticks.push(Tick {
            at: (scale.band_center(key)?, area.bottom),
            text: key.clone(),
        });
    }
    Ok(horizontal_axis(ticks, area, label))
}

fn date_axis(
    dataset: &LineDataset,
    scale: &TimeScale,
    area: &PlotArea,
    label: Option<&str>,
) -> Axis {
    let dates: BTreeSet<_> = dataset.points.iter().map(|(d, _)| *d).collect();
    let stride = dates.len().div_ceil(MAX_DATE_TICKS);
    let ticks = dates
        .iter()
        .step_by(stride.max(1))
        .map(|d| Tick {
            at: (scale.position(*d), area.bottom),
            text: d.format("%-m/%-d").to_string(),
        })
        .collect();
    horizontal_axis(ticks, area, label)
}

fn horizontal_axis(ticks: Vec<Tick>, area: &PlotArea, label: Option<&str>) -> Axis {
    Axis {
        orientation: Orientation::Horizontal,
        start: (area.left, area.bottom),
        end: (area.right, area.bottom),
        ticks,
        label: label.map(|text| AxisLabel {
            text: text.to_string(),
            at: ((area.left + area.right) / 2.0, area.bottom + MARGIN_BOTTOM - 5.0),
            rotated: false,
        }),
    }
}

fn value_axis(scale: &LinearScale, area: &PlotArea, label: Option<&str>) -> Axis {
    let ticks = scale
        .ticks(VALUE_TICKS)
        .into_iter()
        .map(|t| Tick {
            at: (area.left, scale.position(t)),
            text: format_tick(t),
        })
        .collect();

    Axis {
        orientation: Orientation::Vertical,
        start: (area.left, area.top),
        end: (area.left, area.bottom),
        ticks,
        label: label.map(|text| AxisLabel {
            text: text.to_string(),
            at: (15.0, (area.top + area.bottom) / 2.0),
            rotated: true,
        }),
    }
}

fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::QuantileSummary;
    use crate::transform::BarDatum;
    use crate::OutputFormat;
    use chrono::NaiveDate;

    fn options() -> RenderOptions {
        RenderOptions {
            width: 660,
            height: 490,
            format: OutputFormat::Png,
        }
    }

    fn summary(min: f64, max: f64) -> QuantileSummary {
        QuantileSummary {
            min,
            q1: min,
            median: (min + max) / 2.0,
            q3: max,
            max,
        }
    }

    #[test]
    fn test_compile_boxplot_commands_per_group() {
        let dataset = BoxplotDataset {
            groups: vec![
                ("TikTok".to_string(), summary(10.0, 90.0)),
                ("Twitter".to_string(), summary(5.0, 40.0)),
            ],
            value_max: 90.0,
        };
        let scene = compile_boxplot(&dataset, &Labels::default(), &options()).unwrap();

        // whisker + box + median per group
        assert_eq!(scene.commands.len(), 6);
        assert_eq!(scene.axes.len(), 2);
        assert!(scene.legend.is_empty());
    }

    #[test]
    fn test_compile_boxplot_box_spans_band() {
        let dataset = BoxplotDataset {
            groups: vec![("A".to_string(), summary(0.0, 100.0))],
            value_max: 100.0,
        };
        let scene = compile_boxplot(&dataset, &Labels::default(), &options()).unwrap();

        // Plot width 660-60-30 = 570; one band, padding 0.2 -> width 456,
        // starting 57px into the plot area.
        if let DrawCommand::Rect { tl, br, .. } = &scene.commands[1] {
            assert!((tl.0 - 117.0).abs() < 1e-9);
            assert!((br.0 - 573.0).abs() < 1e-9);
        } else {
            panic!("Expected box rect");
        }
    }

    #[test]
    fn test_compile_bars_rect_count_and_legend() {
        let dataset = GroupedBarDataset {
            outer_keys: vec!["TikTok".to_string(), "Twitter".to_string()],
            inner_keys: vec!["video".to_string(), "image".to_string()],
            bars: vec![
                BarDatum { outer: "TikTok".into(), inner: "video".into(), value: 90.0 },
                BarDatum { outer: "TikTok".into(), inner: "image".into(), value: 60.0 },
                BarDatum { outer: "Twitter".into(), inner: "video".into(), value: 30.0 },
                BarDatum { outer: "Twitter".into(), inner: "image".into(), value: 25.0 },
            ],
            value_max: 90.0,
        };
        let scene = compile_bars(&dataset, &Labels::default(), &options()).unwrap();

        assert_eq!(scene.commands.len(), 4);
        assert_eq!(scene.legend.len(), 2);
        assert_eq!(scene.legend[0].label, "video");
        assert_eq!(scene.legend[0].color, "#1f77b4");

        // Bars sit on the zero baseline.
        for command in &scene.commands {
            if let DrawCommand::Rect { br, .. } = command {
                assert!((br.1 - 440.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_compile_line_polyline_and_markers() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let dataset = LineDataset {
            points: vec![(d(1), 10.0), (d(2), 25.0), (d(3), 15.0)],
            date_range: (d(1), d(3)),
            value_max: 25.0,
        };
        let scene = compile_line(&dataset, &Labels::default(), &options()).unwrap();

        assert_eq!(scene.commands.len(), 2);
        if let DrawCommand::Line { points, .. } = &scene.commands[0] {
            assert_eq!(points.len(), 3);
            // Endpoints of the time domain map to the plot edges.
            assert!((points[0].0 - 60.0).abs() < 1e-9);
            assert!((points[2].0 - 630.0).abs() < 1e-9);
        } else {
            panic!("Expected polyline");
        }

        let date_ticks = &scene.axes[0].ticks;
        assert_eq!(date_ticks.len(), 3);
        assert_eq!(date_ticks[0].text, "3/1");
    }
}
