use std::cell::{Cell, RefCell};
use std::rc::Rc;

use contactcurve::core::material::{configure_material, RADIUS};
use contactcurve::core::{AnalyticalSolution, ContactModel, Material, ModelFactory, Trajectory};
use contactcurve::driver::{Driver, DEFAULT_RADIUS};
use contactcurve::error::{Error, Result};
use contactcurve::plot::{ChartLayout, Curve, CurveStyle, PlotSink};
use rand::{rngs::StdRng, Rng, SeedableRng};

type CallLog = Rc<RefCell<Vec<String>>>;

fn fixed_trajectory() -> Result<Trajectory> {
    Trajectory::new(
        vec![0.0, 1.0],
        vec![[1e-6, 0.0], [2e-6, 0.0]],
        vec![0.0, 1.0],
    )
}

struct StubModel {
    name: &'static str,
    with_analytical: bool,
    fail: bool,
    log: CallLog,
}

impl ContactModel for StubModel {
    fn name(&self) -> &str {
        self.name
    }

    fn contact_time(&self) -> f64 {
        1.0
    }

    fn displacement(&self) -> Result<Trajectory> {
        self.log
            .borrow_mut()
            .push(format!("displacement:{}", self.name));
        if self.fail {
            return Err(Error::MathError("solver blew up".into()));
        }
        fixed_trajectory()
    }

    fn analytical(&self) -> Option<&dyn AnalyticalSolution> {
        if self.with_analytical {
            Some(self)
        } else {
            None
        }
    }
}

impl AnalyticalSolution for StubModel {
    fn displacement_analytical(&self) -> Result<Trajectory> {
        self.log.borrow_mut().push(format!("analytical:{}", self.name));
        fixed_trajectory()
    }
}

struct StubKind {
    name: &'static str,
    with_analytical: bool,
    fail: bool,
    builds: Cell<usize>,
    seen_radius: Cell<Option<f64>>,
    seen_limit: Cell<Option<bool>>,
    log: CallLog,
}

impl StubKind {
    fn new(name: &'static str, with_analytical: bool, log: &CallLog) -> Self {
        Self {
            name,
            with_analytical,
            fail: false,
            builds: Cell::new(0),
            seen_radius: Cell::new(None),
            seen_limit: Cell::new(None),
            log: Rc::clone(log),
        }
    }
}

impl ModelFactory for StubKind {
    fn name(&self) -> &str {
        self.name
    }

    fn build(&self, material: &Material, limit_force: bool) -> Result<Box<dyn ContactModel>> {
        self.builds.set(self.builds.get() + 1);
        self.seen_radius.set(material.get(RADIUS));
        self.seen_limit.set(Some(limit_force));
        Ok(Box::new(StubModel {
            name: self.name,
            with_analytical: self.with_analytical,
            fail: self.fail,
            log: Rc::clone(&self.log),
        }))
    }
}

struct RecordingSink {
    curves: Vec<Curve>,
    layouts: Vec<ChartLayout>,
    log: CallLog,
}

impl RecordingSink {
    fn new(log: &CallLog) -> Self {
        Self {
            curves: Vec::new(),
            layouts: Vec::new(),
            log: Rc::clone(log),
        }
    }
}

impl PlotSink for RecordingSink {
    fn plot(&mut self, curve: Curve) -> Result<()> {
        self.log.borrow_mut().push(format!("plot:{}", curve.label));
        self.curves.push(curve);
        Ok(())
    }

    fn show(&mut self, layout: &ChartLayout) -> Result<()> {
        self.log.borrow_mut().push("show".to_string());
        self.layouts.push(layout.clone());
        Ok(())
    }
}

fn stub_preset() -> Result<Material> {
    Material::new(
        "stub",
        [
            ("radius", 5e-4),
            ("youngs_modulus", 1e9),
            ("poissons_ratio", 0.3),
            ("density", 1000.0),
        ],
    )
}

/// Configuring always lands on the requested radius, whatever the preset held before.
#[test]
fn configure_overrides_any_prior_radius() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(12345);
    for _ in 0..100 {
        let prior: f64 = rng.random_range(1e-9..1.0);
        let preset = stub_preset()?.with_override(RADIUS, prior)?;
        let configured = configure_material(&preset, 1e-3)?;
        assert_eq!(configured.get(RADIUS), Some(1e-3));
        assert_eq!(preset.get(RADIUS), Some(prior));
    }
    Ok(())
}

/// End-to-end with stubs: one build per kind, one analytical evaluation, three plots, one show.
#[test]
fn stub_scenario_call_sequence() -> Result<()> {
    let log: CallLog = Rc::default();
    let spring = StubKind::new("SpringDashpot", true, &log);
    let hertz = StubKind::new("HertzMindlin", false, &log);
    let mut sink = RecordingSink::new(&log);

    let driver = Driver::new(&[&spring, &hertz], true, DEFAULT_RADIUS);
    assert_eq!(driver.model_names(), ["SpringDashpot", "HertzMindlin"]);
    driver.run(&stub_preset()?, &mut sink)?;

    assert_eq!(spring.builds.get(), 1);
    assert_eq!(hertz.builds.get(), 1);
    assert_eq!(spring.seen_radius.get(), Some(1e-3));
    assert_eq!(hertz.seen_radius.get(), Some(1e-3));
    assert_eq!(spring.seen_limit.get(), Some(true));

    let calls = log.borrow().clone();
    assert_eq!(
        calls,
        [
            "displacement:SpringDashpot",
            "plot:SpringDashpot (numerical)",
            "analytical:SpringDashpot",
            "plot:SpringDashpot (analytical)",
            "displacement:HertzMindlin",
            "plot:HertzMindlin",
            "show",
        ]
    );
    assert_eq!(calls.iter().filter(|c| c.starts_with("plot:")).count(), 3);
    assert_eq!(calls.iter().filter(|c| c.starts_with("analytical:")).count(), 1);
    Ok(())
}

/// Legend entries reach the sink in plot order.
#[test]
fn legend_labels_in_reference_order() -> Result<()> {
    let log: CallLog = Rc::default();
    let spring = StubKind::new("SpringDashpot", true, &log);
    let hertz = StubKind::new("HertzMindlin", false, &log);
    let mut sink = RecordingSink::new(&log);

    let legend = Driver::new(&[&spring, &hertz], true, DEFAULT_RADIUS)
        .run(&stub_preset()?, &mut sink)?;

    let expected = [
        "SpringDashpot (numerical)",
        "SpringDashpot (analytical)",
        "HertzMindlin",
    ];
    assert_eq!(legend, expected);
    assert_eq!(sink.layouts.len(), 1);
    assert_eq!(sink.layouts[0].legend, expected);
    assert_eq!(sink.layouts[0].x_label, "δ (µm)");
    assert_eq!(sink.layouts[0].y_label, "Force (mN)");
    let styles: Vec<CurveStyle> = sink.curves.iter().map(|c| c.style).collect();
    assert_eq!(
        styles,
        [CurveStyle::Line, CurveStyle::DottedMarkers, CurveStyle::Line]
    );
    Ok(())
}

/// Displacement is scaled by 1e6 and force by 1e3 before reaching the sink.
#[test]
fn curves_are_unit_scaled() -> Result<()> {
    let log: CallLog = Rc::default();
    let hertz = StubKind::new("HertzMindlin", false, &log);
    let mut sink = RecordingSink::new(&log);

    Driver::new(&[&hertz], false, DEFAULT_RADIUS).run(&stub_preset()?, &mut sink)?;

    assert_eq!(sink.curves.len(), 1);
    assert_eq!(sink.curves[0].x, vec![1e-6 * 1e6, 2e-6 * 1e6]);
    assert_eq!(sink.curves[0].y, vec![0.0 * 1e3, 1.0 * 1e3]);
    Ok(())
}

/// Models without the analytical capability never have it invoked.
#[test]
fn analytical_only_when_capable() -> Result<()> {
    let log: CallLog = Rc::default();
    let a = StubKind::new("A", false, &log);
    let b = StubKind::new("B", false, &log);
    let mut sink = RecordingSink::new(&log);

    let legend = Driver::new(&[&a, &b], true, DEFAULT_RADIUS).run(&stub_preset()?, &mut sink)?;

    assert_eq!(legend, ["A", "B"]);
    assert!(!log.borrow().iter().any(|c| c.starts_with("analytical:")));
    Ok(())
}

/// A failing model aborts the run before the chart is shown.
#[test]
fn model_failure_aborts_before_show() -> Result<()> {
    let log: CallLog = Rc::default();
    let ok = StubKind::new("Ok", false, &log);
    let mut broken = StubKind::new("Broken", false, &log);
    broken.fail = true;
    let mut sink = RecordingSink::new(&log);

    let err = Driver::new(&[&ok, &broken], true, DEFAULT_RADIUS)
        .run(&stub_preset()?, &mut sink)
        .unwrap_err();

    assert!(matches!(err, Error::MathError(_)));
    assert_eq!(sink.curves.len(), 1);
    assert!(sink.layouts.is_empty());
    assert!(!log.borrow().iter().any(|c| c == "show"));
    Ok(())
}
