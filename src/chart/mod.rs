//! @ai:module:intent Chart specifications, colour assignment and rendering
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartSpec, build_series_chart, build_pattern_chart, PlottersRenderer

pub mod builder;
pub mod palette;
pub mod renderer;
pub mod spec;

pub use builder::{build_pattern_chart, build_series_chart};
pub use palette::{color_at, color_for, TAB10};
pub use renderer::{ChartRendererTrait, PlottersRenderer};
pub use spec::{BarSpec, ChartKind, ChartSpec, LineSeriesSpec, SeriesColor};
