//! Chart output: the [`PlotSink`] seam used by the driver and an SVG implementation.

use crate::error::{Error, Result};
use ordered_float::NotNan;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// How a curve is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveStyle {
    /// Solid line through every sample (numerical trajectories).
    Line,
    /// Dotted path with sparse circle markers (analytical reference curves).
    DottedMarkers,
}

/// Grid-line styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    /// Dotted lines at every labelled tick.
    Dotted,
    Hidden,
}

/// Grid lines requested per axis; plotters rounds to friendly tick values.
const GRID_LINES: usize = 10;
/// Circle markers drawn along a reference curve.
const MARKER_COUNT: usize = 40;

/// One plotted series, already in display units.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: CurveStyle,
}

/// Figure-wide annotations applied when the chart is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub x_label: String,
    pub y_label: String,
    /// Legend entries, matched to curves in plot order.
    pub legend: Vec<String>,
    /// Decimal-exponent window outside which ticks use scientific notation; `(0, 0)` forces it.
    pub sci_limits: (i32, i32),
    pub grid: GridStyle,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            x_label: "δ (µm)".to_string(),
            y_label: "Force (mN)".to_string(),
            legend: Vec::new(),
            sci_limits: (0, 0),
            grid: GridStyle::Dotted,
        }
    }
}

/// Receiver of plotted curves.
///
/// `plot` may be called any number of times; `show` finalises the figure once.
pub trait PlotSink {
    fn plot(&mut self, curve: Curve) -> Result<()>;
    fn show(&mut self, layout: &ChartLayout) -> Result<()>;
}

/// Format an axis tick the way a scientific plot would.
pub fn format_tick(value: f64, sci_limits: (i32, i32)) -> String {
    let exponent = if value == 0.0 || !value.is_finite() {
        0
    } else {
        value.abs().log10().floor() as i32
    };
    let (lo, hi) = sci_limits;
    if (lo, hi) == (0, 0) || exponent < lo || exponent > hi {
        format!("{value:.1e}")
    } else {
        format!("{value:.2}")
    }
}

/// Padded `[min, max]` range over the finite values, `0..1` when there are none.
pub fn axis_extent<'a>(values: impl IntoIterator<Item = &'a f64>) -> Range<f64> {
    let finite: Vec<NotNan<f64>> = values
        .into_iter()
        .filter(|v| v.is_finite())
        .filter_map(|&v| NotNan::new(v).ok())
        .collect();
    let (lo, hi) = match (finite.iter().min(), finite.iter().max()) {
        (Some(lo), Some(hi)) => (lo.into_inner(), hi.into_inner()),
        _ => return 0.0..1.0,
    };
    let span = if hi > lo { hi - lo } else { lo.abs().max(1.0) };
    let pad = 0.05 * span;
    (lo - pad)..(hi + pad)
}

fn render_err<E: ToString>(e: E) -> Error {
    Error::Render(e.to_string())
}

/// Buffers curves and writes them as an SVG chart on [`PlotSink::show`].
#[derive(Debug)]
pub struct SvgChart {
    path: PathBuf,
    size: (u32, u32),
    curves: Vec<Curve>,
}

impl SvgChart {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32)) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(Error::InvalidParam("chart size must be > 0".into()));
        }
        Ok(Self {
            path: path.into(),
            size,
            curves: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    fn render(&self, layout: &ChartLayout) -> Result<()> {
        let x_range = axis_extent(self.curves.iter().flat_map(|c| c.x.iter()));
        let y_range = axis_extent(self.curves.iter().flat_map(|c| c.y.iter()));

        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        let limits = layout.sci_limits;
        let fmt = move |v: &f64| format_tick(*v, limits);
        // Plotters mesh lines are always solid, so the grid is drawn separately below.
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(layout.x_label.as_str())
            .y_desc(layout.y_label.as_str())
            .x_label_formatter(&fmt)
            .y_label_formatter(&fmt)
            .draw()
            .map_err(render_err)?;

        if layout.grid == GridStyle::Dotted {
            let (xs, ys) = (chart.x_range(), chart.y_range());
            let spec = chart.as_coord_spec();
            let x_ticks = spec.x_spec().key_points(GRID_LINES);
            let y_ticks = spec.y_spec().key_points(GRID_LINES);
            let vertical = x_ticks.into_iter().map(|x| vec![(x, ys.start), (x, ys.end)]);
            let horizontal = y_ticks.into_iter().map(|y| vec![(xs.start, y), (xs.end, y)]);
            let style = BLACK.mix(0.3).stroke_width(1);
            for line in vertical.chain(horizontal) {
                chart
                    .draw_series(DashedLineSeries::new(line, 1, 4, style))
                    .map_err(render_err)?;
            }
        }

        for (idx, curve) in self.curves.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            let points: Vec<(f64, f64)> =
                curve.x.iter().copied().zip(curve.y.iter().copied()).collect();
            let label = layout.legend.get(idx).unwrap_or(&curve.label).clone();
            match curve.style {
                CurveStyle::Line => {
                    chart
                        .draw_series(LineSeries::new(points, color.stroke_width(2)))
                        .map_err(render_err)?
                        .label(label)
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }
                CurveStyle::DottedMarkers => {
                    let stride = (points.len() / MARKER_COUNT).max(1);
                    let markers: Vec<(f64, f64)> = points.iter().copied().step_by(stride).collect();
                    chart
                        .draw_series(DashedLineSeries::new(points, 2, 4, color.stroke_width(1)))
                        .map_err(render_err)?;
                    chart
                        .draw_series(
                            markers
                                .into_iter()
                                .map(|p| Circle::new(p, 3, color.stroke_width(1))),
                        )
                        .map_err(render_err)?
                        .label(label)
                        .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.stroke_width(1)));
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

impl PlotSink for SvgChart {
    fn plot(&mut self, curve: Curve) -> Result<()> {
        if curve.x.len() != curve.y.len() {
            return Err(Error::Render(format!(
                "curve '{}' has {} x values but {} y values",
                curve.label,
                curve.x.len(),
                curve.y.len()
            )));
        }
        self.curves.push(curve);
        Ok(())
    }

    fn show(&mut self, layout: &ChartLayout) -> Result<()> {
        self.render(layout)?;
        log::info!("chart written to {}", self.path.display());
        Ok(())
    }
}
