use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::ChartError;

/// Default date pattern for time-axis columns.
pub const DATE_FORMAT: &str = "%m/%d/%Y (%A)";

/// Maps discrete categories to non-overlapping pixel bands within a range.
///
/// Each key owns a slot of `step = range_width / n` pixels. A fraction
/// `padding` of the step is left empty, split half-and-half on each side of
/// the band, so adjacent bands are separated by a full `padding * step` gap
/// and each outer end keeps half of one.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let padding = padding.clamp(0.0, 0.99);
        let n = domain.len().max(1) as f64;
        let step = (range.1 - range.0) / n;
        let bandwidth = step * (1.0 - padding);

        let index = domain
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i))
            .collect();

        BandScale {
            domain,
            index,
            range,
            step,
            bandwidth,
        }
    }

    /// Left edge of the band reserved for `key`.
    pub fn band_start(&self, key: &str) -> Result<f64, ChartError> {
        let idx = self
            .index
            .get(key)
            .ok_or_else(|| ChartError::UnknownCategory(key.to_string()))?;
        let gap = self.step - self.bandwidth;
        Ok(self.range.0 + *idx as f64 * self.step + gap / 2.0)
    }

    /// Center of the band reserved for `key`.
    pub fn band_center(&self, key: &str) -> Result<f64, ChartError> {
        Ok(self.band_start(key)? + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Affine map from a continuous numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// A zero-width domain cannot be mapped and is rejected outright rather
    /// than silently producing a zero-slope mapping.
    pub fn new(domain: (f64, f64), range: (f64, f64), nice: bool) -> Result<Self, ChartError> {
        if domain.0 == domain.1 {
            return Err(ChartError::DegenerateDomain(domain.0));
        }
        let domain = if nice { nice_domain(domain) } else { domain };
        Ok(LinearScale { domain, range })
    }

    pub fn position(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) * (r1 - r0) / (d1 - d0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Tick values at step-aligned positions inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let step = tick_step(d1 - d0, count);
        let first = (d0 / step).ceil() as i64;
        let last = (d1 / step + 1e-9).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Affine map from a date interval onto a pixel range, linear in elapsed days.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Result<Self, ChartError> {
        let span_days = (domain.1 - domain.0).num_days() as f64;
        if span_days == 0.0 {
            return Err(ChartError::DegenerateDomain(0.0));
        }
        Ok(TimeScale {
            domain,
            inner: LinearScale::new((0.0, span_days), range, false)?,
        })
    }

    pub fn position(&self, date: NaiveDate) -> f64 {
        self.inner.position((date - self.domain.0).num_days() as f64)
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }
}

/// Parse date text against a fixed chrono pattern.
///
/// A mismatch (including impossible dates or an inconsistent weekday name)
/// is a hard error; it must never flow downstream as a plottable point.
pub fn parse_date(text: &str, pattern: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(text, pattern).map_err(|_| ChartError::DateParse {
        text: text.to_string(),
        pattern: pattern.to_string(),
    })
}

/// Round a domain outward to multiples of a human-friendly tick step.
fn nice_domain(domain: (f64, f64)) -> (f64, f64) {
    let step = tick_step(domain.1 - domain.0, 10);
    (
        (domain.0 / step).floor() * step,
        (domain.1 / step).ceil() * step,
    )
}

/// Tick step of the form {1, 2, 5} * 10^k that splits `span` into roughly
/// `count` intervals.
fn tick_step(span: f64, count: usize) -> f64 {
    let raw = span / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual >= 7.5 {
        10.0
    } else if residual >= 3.5 {
        5.0
    } else if residual >= 1.5 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}
