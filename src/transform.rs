use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDate;

use crate::error::ChartError;
use crate::schema::{date_at, number_at, text_at, Dataset};
use crate::stats::QuantileSummary;

/// Group items by a key, preserving the order in which keys first appear.
/// Callers that want a different display order sort the result explicitly.
pub fn group_by<T, K, F>(items: &[T], key_fn: F) -> Vec<(K, Vec<&T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();

    for item in items {
        let key = key_fn(item);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(item);
    }

    groups
}

/// Distinct values in first-seen order.
fn distinct<I: IntoIterator<Item = String>>(values: I) -> Vec<String> {
    let mut seen = HashMap::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v.clone(), ()).is_none() {
            out.push(v);
        }
    }
    out
}

/// One quantile summary per category, in first-seen category order.
#[derive(Debug, Clone)]
pub struct BoxplotDataset {
    pub groups: Vec<(String, QuantileSummary)>,
    pub value_max: f64,
}

pub fn boxplot_rollup(
    data: &Dataset,
    category: &str,
    value: &str,
) -> Result<BoxplotDataset, ChartError> {
    if data.rows.is_empty() {
        return Err(ChartError::InsufficientData);
    }
    let cat_idx = data.column_index(category)?;
    let val_idx = data.column_index(value)?;

    let mut pairs = Vec::with_capacity(data.rows.len());
    for row in &data.rows {
        pairs.push((
            text_at(row, cat_idx, category)?.to_string(),
            number_at(row, val_idx, value)?,
        ));
    }

    let mut groups = Vec::new();
    for (key, members) in group_by(&pairs, |(k, _)| k.clone()) {
        let values: Vec<f64> = members.iter().map(|(_, v)| *v).collect();
        groups.push((key, QuantileSummary::from_values(&values)?));
    }

    let value_max = groups
        .iter()
        .map(|(_, s)| s.max)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(BoxplotDataset { groups, value_max })
}

/// One bar per row of a pre-aggregated table, keyed by an outer and an
/// inner category.
#[derive(Debug, Clone)]
pub struct BarDatum {
    pub outer: String,
    pub inner: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct GroupedBarDataset {
    pub outer_keys: Vec<String>,
    pub inner_keys: Vec<String>,
    pub bars: Vec<BarDatum>,
    pub value_max: f64,
}

pub fn grouped_bar_data(
    data: &Dataset,
    outer: &str,
    inner: &str,
    value: &str,
) -> Result<GroupedBarDataset, ChartError> {
    if data.rows.is_empty() {
        return Err(ChartError::InsufficientData);
    }
    let outer_idx = data.column_index(outer)?;
    let inner_idx = data.column_index(inner)?;
    let val_idx = data.column_index(value)?;

    let mut bars = Vec::with_capacity(data.rows.len());
    for row in &data.rows {
        bars.push(BarDatum {
            outer: text_at(row, outer_idx, outer)?.to_string(),
            inner: text_at(row, inner_idx, inner)?.to_string(),
            value: number_at(row, val_idx, value)?,
        });
    }

    let outer_keys = distinct(bars.iter().map(|b| b.outer.clone()));
    let inner_keys = distinct(bars.iter().map(|b| b.inner.clone()));
    let value_max = bars.iter().map(|b| b.value).fold(f64::NEG_INFINITY, f64::max);

    Ok(GroupedBarDataset {
        outer_keys,
        inner_keys,
        bars,
        value_max,
    })
}

/// A dated series in source row order (the loader preserves source order).
#[derive(Debug, Clone)]
pub struct LineDataset {
    pub points: Vec<(NaiveDate, f64)>,
    pub date_range: (NaiveDate, NaiveDate),
    pub value_max: f64,
}

pub fn line_series(data: &Dataset, date: &str, value: &str) -> Result<LineDataset, ChartError> {
    if data.rows.is_empty() {
        return Err(ChartError::InsufficientData);
    }
    let date_idx = data.column_index(date)?;
    let val_idx = data.column_index(value)?;

    let mut points = Vec::with_capacity(data.rows.len());
    for row in &data.rows {
        points.push((date_at(row, date_idx, date)?, number_at(row, val_idx, value)?));
    }

    let mut first = points[0].0;
    let mut last = points[0].0;
    for (d, _) in &points {
        if *d < first {
            first = *d;
        }
        if *d > last {
            last = *d;
        }
    }
    let value_max = points.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);

    Ok(LineDataset {
        points,
        date_range: (first, last),
        value_max,
    })
}
