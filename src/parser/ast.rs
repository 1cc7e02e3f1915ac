// AST for the chart DSL

/// A fully parsed chart request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Boxplot(BoxplotChart),
    Bars(BarsChart),
    Line(LineChart),
}

/// Per-category distribution chart: one box per distinct `x` value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotChart {
    pub x: String,
    pub y: String,
}

/// Grouped bar chart: outer bands by `x`, one bar per `group` value inside.
#[derive(Debug, Clone, PartialEq)]
pub struct BarsChart {
    pub x: String,
    pub group: String,
    pub y: String,
}

/// Dated line chart. `format` overrides the default date pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub x: String,
    pub y: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Labels {
    pub title: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}
