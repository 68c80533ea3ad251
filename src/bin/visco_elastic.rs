//! Force-displacement chart for the spring-dashpot and Hertz-Mindlin contact models.
//!
//! Usage: `visco-elastic [config.json]`. Without a config file the reference run is used
//! (steel, 1 mm particles, force limiting on). Set `RUST_LOG=debug` for per-curve output.

use std::path::Path;
use std::process::ExitCode;

use contactcurve::config::RunConfig;
use contactcurve::core::{Material, ModelFactory};
use contactcurve::driver::Driver;
use contactcurve::error::Result;
use contactcurve::plot::SvgChart;

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::from_json_file(Path::new(&path))?,
        None => RunConfig::default(),
    };

    let preset = Material::preset(&config.material)?;
    let factories: Vec<&dyn ModelFactory> = config
        .models
        .iter()
        .map(|k| k as &dyn ModelFactory)
        .collect();
    let driver = Driver::new(&factories, config.limit_force, config.radius);
    log::info!(
        "evaluating {} on '{}'",
        driver.model_names().join(", "),
        config.material
    );

    let mut chart = SvgChart::new(config.output.clone(), (config.width, config.height))?;
    let legend = driver.run(&preset, &mut chart)?;
    log::info!("plotted {} curves: {}", legend.len(), legend.join(", "));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
