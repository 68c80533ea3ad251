//! Evaluation-and-plot driver: configure a material, evaluate each contact model, hand the
//! resulting curves to a [`PlotSink`] and show the chart.

use crate::core::material::{configure_material, Material};
use crate::core::model::ModelFactory;
use crate::core::trajectory::Trajectory;
use crate::error::Result;
use crate::plot::{ChartLayout, Curve, CurveStyle, PlotSink};
use log::{debug, info};

/// Metres to micrometres.
pub const DELTA_SCALE: f64 = 1e6;
/// Newtons to millinewtons.
pub const FORCE_SCALE: f64 = 1e3;
/// Particle radius applied to the preset before evaluation (m).
pub const DEFAULT_RADIUS: f64 = 1e-3;

/// Drives a fixed list of contact models through evaluation and rendering.
pub struct Driver<'a> {
    models: Vec<&'a dyn ModelFactory>,
    limit_force: bool,
    radius: f64,
    layout: ChartLayout,
}

impl<'a> Driver<'a> {
    pub fn new(models: &[&'a dyn ModelFactory], limit_force: bool, radius: f64) -> Self {
        Self {
            models: models.to_vec(),
            limit_force,
            radius,
            layout: ChartLayout::default(),
        }
    }

    /// Replace the axis/grid annotations; the legend is always rebuilt from the curves.
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Names of the formulations this driver evaluates, in run order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|f| f.name()).collect()
    }

    /// Run the whole pipeline once and return the legend entries in plot order.
    ///
    /// The preset is copied, never modified. The first error from the material layer, a model
    /// or the sink aborts the run; curves already handed to the sink stay there.
    pub fn run(&self, preset: &Material, sink: &mut dyn PlotSink) -> Result<Vec<String>> {
        let material = configure_material(preset, self.radius)?;
        info!(
            "material '{}' configured with radius {:e} m",
            material.name(),
            self.radius
        );

        let mut legend = Vec::new();
        for factory in &self.models {
            debug!("building {} (limit_force = {})", factory.name(), self.limit_force);
            let model = factory.build(&material, self.limit_force)?;
            let analytical = model.analytical();

            let traj = model.displacement()?;
            info!(
                "{}: {} samples, contact time {:e} s",
                model.name(),
                traj.len(),
                model.contact_time()
            );
            let label = match analytical {
                Some(_) => format!("{} (numerical)", model.name()),
                None => model.name().to_string(),
            };
            plot_trajectory(sink, &traj, &label, CurveStyle::Line)?;
            legend.push(label);

            if let Some(solution) = analytical {
                let traj = solution.displacement_analytical()?;
                let label = format!("{} (analytical)", model.name());
                plot_trajectory(sink, &traj, &label, CurveStyle::DottedMarkers)?;
                legend.push(label);
            }
        }

        let layout = ChartLayout {
            legend: legend.clone(),
            ..self.layout.clone()
        };
        sink.show(&layout)?;
        Ok(legend)
    }
}

fn plot_trajectory(
    sink: &mut dyn PlotSink,
    traj: &Trajectory,
    label: &str,
    style: CurveStyle,
) -> Result<()> {
    let (x, y) = traj.scaled(DELTA_SCALE, FORCE_SCALE);
    debug!("plotting '{label}' ({} points)", x.len());
    sink.plot(Curve {
        label: label.to_string(),
        x,
        y,
        style,
    })
}
