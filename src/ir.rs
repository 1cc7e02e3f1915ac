use crate::graph::{BarStyle, LineStyle, PointStyle};

// =============================================================================
// Scene graph
// =============================================================================

/// An append-only list of primitive drawing commands in pixel space, plus
/// the axis and legend descriptions needed to frame them.
/// The backend executes these blindly.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub axes: Vec<Axis>,
    pub legend: Vec<LegendEntry>,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone)]
pub struct Axis {
    pub orientation: Orientation,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub ticks: Vec<Tick>,
    pub label: Option<AxisLabel>,
}

/// A tick anchored at a point on the axis line.
#[derive(Debug, Clone)]
pub struct Tick {
    pub at: (f64, f64),
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct AxisLabel {
    pub text: String,
    pub at: (f64, f64),
    pub rotated: bool,
}

/// Legend entries in display order; the backend decides where to put them.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Line {
        points: Vec<(f64, f64)>,
        style: LineStyle,
    },
    Rect {
        tl: (f64, f64),
        br: (f64, f64),
        style: BarStyle,
    },
    Points {
        points: Vec<(f64, f64)>,
        style: PointStyle,
    },
}
