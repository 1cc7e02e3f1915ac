// Runtime executor: one full compute-and-draw pass per call.

use anyhow::{Context, Result};

use crate::compile;
use crate::data::Table;
use crate::graph;
use crate::parser::ast::{ChartKind, ChartSpec, Labels};
use crate::scale::DATE_FORMAT;
use crate::schema::{apply_schema, ColumnType};
use crate::transform;
use crate::RenderOptions;

/// Render a chart specification against a table of text records.
///
/// Each call re-runs the whole pipeline: coerce, group, summarize, scale,
/// compile, draw. Nothing is cached between calls.
pub fn render_chart(spec: &ChartSpec, table: &Table, options: &RenderOptions) -> Result<Vec<u8>> {
    let date_format = date_format(&spec.kind);
    let schema = schema_for(&spec.kind);

    let data = apply_schema(table, &schema, date_format)
        .context("Failed to coerce input columns")?;

    let labels = effective_labels(spec);

    let scene = match &spec.kind {
        ChartKind::Boxplot(chart) => {
            let dataset = transform::boxplot_rollup(&data, &chart.x, &chart.y)
                .context("Failed to compute per-group summaries")?;
            compile::compile_boxplot(&dataset, &labels, options)?
        }
        ChartKind::Bars(chart) => {
            let dataset = transform::grouped_bar_data(&data, &chart.x, &chart.group, &chart.y)
                .context("Failed to assemble grouped bars")?;
            compile::compile_bars(&dataset, &labels, options)?
        }
        ChartKind::Line(chart) => {
            let dataset = transform::line_series(&data, &chart.x, &chart.y)
                .context("Failed to assemble dated series")?;
            compile::compile_line(&dataset, &labels, options)?
        }
    };

    graph::render_scene(&scene, options)
}

fn date_format(kind: &ChartKind) -> &str {
    match kind {
        ChartKind::Line(chart) => chart.format.as_deref().unwrap_or(DATE_FORMAT),
        _ => DATE_FORMAT,
    }
}

/// Column-type map implied by the chart spec: value columns are numeric,
/// the line chart's x column is a date, everything else stays text.
fn schema_for(kind: &ChartKind) -> Vec<(String, ColumnType)> {
    match kind {
        ChartKind::Boxplot(chart) => vec![(chart.y.clone(), ColumnType::Number)],
        ChartKind::Bars(chart) => vec![(chart.y.clone(), ColumnType::Number)],
        ChartKind::Line(chart) => vec![
            (chart.x.clone(), ColumnType::Date),
            (chart.y.clone(), ColumnType::Number),
        ],
    }
}

/// Axis labels fall back to the column names they describe.
fn effective_labels(spec: &ChartSpec) -> Labels {
    let mut labels = spec.labels.clone().unwrap_or_default();
    let (x_col, y_col) = match &spec.kind {
        ChartKind::Boxplot(chart) => (&chart.x, &chart.y),
        ChartKind::Bars(chart) => (&chart.x, &chart.y),
        ChartKind::Line(chart) => (&chart.x, &chart.y),
    };
    labels.x.get_or_insert_with(|| x_col.clone());
    labels.y.get_or_insert_with(|| y_col.clone());
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::BoxplotChart;

    #[test]
    fn test_effective_labels_fall_back_to_columns() {
        let spec = ChartSpec {
            kind: ChartKind::Boxplot(BoxplotChart {
                x: "Platform".to_string(),
                y: "Likes".to_string(),
            }),
            labels: Some(Labels {
                title: None,
                x: None,
                y: Some("Total likes".to_string()),
            }),
        };

        let labels = effective_labels(&spec);
        assert_eq!(labels.x.as_deref(), Some("Platform"));
        assert_eq!(labels.y.as_deref(), Some("Total likes"));
    }
}
