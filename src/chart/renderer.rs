//! @ai:module:intent Draw chart specifications to PNG files with plotters
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartRendererTrait, PlottersRenderer

use crate::chart::spec::{BarSpec, ChartKind, ChartSpec, LineSeriesSpec, SeriesColor};
use crate::config::ChartConfig;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Trait for persisting a chart specification as an image
pub trait ChartRendererTrait: Send + Sync {
    /// @ai:intent Write exactly one image to output_path, replacing any existing file
    fn render(&self, spec: &ChartSpec, output_path: &Path) -> Result<()>;
}

/// @ai:intent Bitmap renderer backed by plotters
pub struct PlottersRenderer {
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    /// @ai:intent Create a renderer producing images of the configured size
    /// @ai:effects pure
    pub fn new(config: ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// @ai:intent Draw a logarithmic-x line chart
    /// @ai:effects fs:write
    fn render_lines(
        &self,
        spec: &ChartSpec,
        series: &[LineSeriesSpec],
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (x_min, x_max) = log_bounds(series);
        let y_max = value_ceiling(spec.max_value());

        let mut chart = ChartBuilder::on(&root)
            .caption(spec.title.as_str(), ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d((x_min..x_max).log_scale(), 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        for line in series {
            let color = rgb(line.color);
            let points: Vec<(f64, f64)> = line
                .points
                .iter()
                .copied()
                .filter(|&(x, y)| x.is_finite() && x > 0.0 && y.is_finite())
                .collect();

            if points.len() < line.points.len() {
                tracing::warn!(
                    "Dropped {} unplottable points from series {} on log axis",
                    line.points.len() - points.len(),
                    line.label
                );
            }

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(line.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Draw a bar chart with one bar per category
    /// @ai:effects fs:write
    fn render_bars(
        &self,
        spec: &ChartSpec,
        bars: &[BarSpec],
        rotate_labels: bool,
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let count = bars.len().max(1) as i32;
        let y_max = value_ceiling(spec.max_value());
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(spec.title.as_str(), ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(if rotate_labels { 130 } else { 50 })
            .y_label_area_size(90)
            .build_cartesian_2d((0..count).into_segmented(), 0f64..y_max)?;

        let label_font = ("sans-serif", 15).into_font();
        let label_style = if rotate_labels {
            label_font.transform(FontTransform::Rotate90)
        } else {
            label_font
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len().max(1))
            .x_label_style(label_style)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels
                    .get(*i as usize)
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        let plottable = bars.iter().enumerate().filter(|(_, bar)| bar.value.is_finite());
        chart.draw_series(plottable.map(|(i, bar)| {
            let i = i as i32;
            let mut rect = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
                rgb(bar.color).mix(0.85).filled(),
            );
            rect.set_margin(0, 0, 8, 8);
            rect
        }))?;

        root.present()?;
        Ok(())
    }
}

impl ChartRendererTrait for PlottersRenderer {
    /// @ai:effects fs:write
    fn render(&self, spec: &ChartSpec, output_path: &Path) -> Result<()> {
        match &spec.kind {
            ChartKind::LogLine { series } => self.render_lines(spec, series, output_path)?,
            ChartKind::Bar {
                bars,
                rotate_labels,
            } => self.render_bars(spec, bars, *rotate_labels, output_path)?,
        }

        tracing::info!("Chart written to {}", output_path.display());
        Ok(())
    }
}

fn rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// @ai:intent Top of the y axis: 10% headroom, always finite and positive
/// @ai:effects pure
fn value_ceiling(max_value: f64) -> f64 {
    let ceiling = max_value * 1.1;

    if ceiling.is_finite() && ceiling > 0.0 {
        ceiling
    } else if max_value.is_finite() && max_value > 0.0 {
        f64::MAX
    } else {
        1.0
    }
}

/// @ai:intent Positive x range covering every plottable point
/// @ai:post min < max and min > 0
/// @ai:effects pure
fn log_bounds(series: &[LineSeriesSpec]) -> (f64, f64) {
    let xs = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(x, _)| *x))
        .filter(|x| x.is_finite() && *x > 0.0);

    let (min, max) = xs.fold((f64::INFINITY, 0.0f64), |(lo, hi), x| (lo.min(x), hi.max(x)));

    if !min.is_finite() {
        return (1.0, 10.0);
    }

    if min == max {
        let half_decade = 10f64.sqrt();
        return (min / half_decade, max * half_decade);
    }

    (min * 0.8, max * 1.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::builder::{build_pattern_chart, build_series_chart};
    use crate::metrics::{IndependentVariable, PatternBar, PatternSeries, SeriesPoint, SeriesSet};
    use tempfile::TempDir;

    fn line(points: &[(f64, f64)]) -> LineSeriesSpec {
        LineSeriesSpec {
            label: "random".to_string(),
            color: SeriesColor(0, 0, 0),
            points: points.to_vec(),
        }
    }

    #[test]
    fn test_log_bounds_spread() {
        let (lo, hi) = log_bounds(&[line(&[(10_000.0, 1.0), (1_000_000.0, 2.0)])]);
        assert!(lo < 10_000.0 && lo > 0.0);
        assert!(hi > 1_000_000.0);
    }

    #[test]
    fn test_log_bounds_single_value_is_widened() {
        let (lo, hi) = log_bounds(&[line(&[(64.0, 1.0)])]);
        assert!(lo < 64.0 && hi > 64.0);
    }

    #[test]
    fn test_log_bounds_ignores_non_positive() {
        assert_eq!(log_bounds(&[line(&[(0.0, 1.0)])]), (1.0, 10.0));
        assert_eq!(log_bounds(&[line(&[(f64::INFINITY, 1.0)])]), (1.0, 10.0));
        assert_eq!(log_bounds(&[]), (1.0, 10.0));
    }

    #[test]
    fn test_value_ceiling() {
        assert_eq!(value_ceiling(0.0), 1.0);
        assert!((value_ceiling(100.0) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_ceiling_is_always_finite() {
        assert_eq!(value_ceiling(f64::INFINITY), 1.0);
        assert_eq!(value_ceiling(f64::NAN), 1.0);
        assert_eq!(value_ceiling(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_render_line_chart() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tree_size_performance.png");
        let set = SeriesSet {
            series: vec![PatternSeries {
                pattern: "random".to_string(),
                points: vec![
                    SeriesPoint { x: 10_000.0, keys_per_second: 500_000.0 },
                    SeriesPoint { x: 1_000_000.0, keys_per_second: 300_000.0 },
                ],
            }],
        };
        let spec = build_series_chart(&set, IndependentVariable::TreeSize);

        PlottersRenderer::new(ChartConfig::default())
            .render(&spec, &path)
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_render_bar_chart_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pattern_performance.png");
        std::fs::write(&path, b"stale").unwrap();

        let bars = vec![
            PatternBar { pattern: "random".to_string(), keys_per_second: 250_000.0 },
            PatternBar { pattern: "sequential".to_string(), keys_per_second: 900_000.0 },
        ];
        let spec = build_pattern_chart(1_000_000, &bars);

        PlottersRenderer::new(ChartConfig::default())
            .render(&spec, &path)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
