//! @ai:module:intent Renderer-agnostic chart description
//! @ai:module:layer domain
//! @ai:module:public_api ChartSpec, ChartKind, SeriesColor
//! @ai:module:stateless true

use serde::Serialize;

/// @ai:intent RGB colour independent of any drawing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeriesColor(pub u8, pub u8, pub u8);

/// @ai:intent One labelled, coloured line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeriesSpec {
    pub label: String,
    pub color: SeriesColor,
    /// (x, y) in plotting order
    pub points: Vec<(f64, f64)>,
}

/// @ai:intent One labelled bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub color: SeriesColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartKind {
    /// Line chart with a logarithmic x axis and linear y axis
    LogLine { series: Vec<LineSeriesSpec> },
    Bar {
        bars: Vec<BarSpec>,
        /// Category labels are drawn turned so long pattern names do not overlap
        rotate_labels: bool,
    },
}

/// @ai:intent Immutable description of one chart: titles, axes, series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
}

impl ChartSpec {
    /// @ai:intent Largest y value across all series or bars
    /// @ai:effects pure
    pub fn max_value(&self) -> f64 {
        match &self.kind {
            ChartKind::LogLine { series } => series
                .iter()
                .flat_map(|s| s.points.iter().map(|(_, y)| *y))
                .fold(0.0, f64::max),
            ChartKind::Bar { bars, .. } => bars.iter().map(|b| b.value).fold(0.0, f64::max),
        }
    }

    /// @ai:intent Legend labels in drawing order
    /// @ai:effects pure
    pub fn labels(&self) -> Vec<&str> {
        match &self.kind {
            ChartKind::LogLine { series } => series.iter().map(|s| s.label.as_str()).collect(),
            ChartKind::Bar { bars, .. } => bars.iter().map(|b| b.label.as_str()).collect(),
        }
    }
}
