use crate::error::{Error, Result};

/// Contact state `[overlap, overlap rate]`.
pub type State = [f64; 2];

/// Largest step count a single contact integration will allocate for.
pub const MAX_INTEGRATION_STEPS: usize = 4_000_000;

/// One classical Runge-Kutta step for the second-order contact ODE
/// `delta_ddot = accel(delta, delta_dot)`, written as the first-order system
/// `y = [delta, delta_dot]`, `y' = [delta_dot, accel(y)]`.
///
/// ```text
/// k1 = f(y)
/// k2 = f(y + h/2 k1)
/// k3 = f(y + h/2 k2)
/// k4 = f(y + h k3)
/// y' = y + h/6 (k1 + 2 k2 + 2 k3 + k4)
/// ```
pub fn rk4_step<F>(y: State, dt: f64, accel: &F) -> State
where
    F: Fn(State) -> f64,
{
    let f = |s: State| [s[1], accel(s)];
    let k1 = f(y);
    let k2 = f([y[0] + 0.5 * dt * k1[0], y[1] + 0.5 * dt * k1[1]]);
    let k3 = f([y[0] + 0.5 * dt * k2[0], y[1] + 0.5 * dt * k2[1]]);
    let k4 = f([y[0] + dt * k3[0], y[1] + dt * k3[1]]);
    [
        y[0] + dt / 6.0 * (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]),
        y[1] + dt / 6.0 * (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]),
    ]
}

/// Integrate a contact from `y0` until the overlap turns negative or `max_steps` is reached.
///
/// Returns the sample times and states, starting with `(0, y0)`. The first state with a
/// negative overlap ends the contact and is not recorded.
///
/// Errors:
/// - `Error::InvalidParam` if `dt` is not a positive finite number or `max_steps` exceeds
///   [`MAX_INTEGRATION_STEPS`].
/// - `Error::MathError` if the state becomes non-finite.
pub fn integrate_contact<F>(
    y0: State,
    dt: f64,
    max_steps: usize,
    accel: F,
) -> Result<(Vec<f64>, Vec<State>)>
where
    F: Fn(State) -> f64,
{
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidParam("time step must be finite and > 0".into()));
    }
    if max_steps > MAX_INTEGRATION_STEPS {
        return Err(Error::InvalidParam(format!(
            "{max_steps} integration steps exceed the limit of {MAX_INTEGRATION_STEPS}"
        )));
    }
    let mut time = Vec::with_capacity(max_steps + 1);
    let mut states = Vec::with_capacity(max_steps + 1);
    time.push(0.0);
    states.push(y0);

    let mut y = y0;
    for step in 1..=max_steps {
        y = rk4_step(y, dt, &accel);
        if !(y[0].is_finite() && y[1].is_finite()) {
            return Err(Error::MathError(format!(
                "contact state diverged at step {step}"
            )));
        }
        if y[0] < 0.0 {
            break;
        }
        time.push(step as f64 * dt);
        states.push(y);
    }
    Ok((time, states))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rk4_harmonic_oscillator_half_period() {
        // delta_ddot = -delta, delta(0)=0, delta_dot(0)=1 => delta = sin t
        let n = 1000;
        let dt = std::f64::consts::PI / 2.0 / n as f64;
        let mut y = [0.0, 1.0];
        for _ in 0..n {
            y = rk4_step(y, dt, &|s: State| -s[0]);
        }
        assert_relative_eq!(y[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(y[1], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn integration_stops_when_overlap_turns_negative() -> Result<()> {
        let dt = 1e-3;
        let (time, states) = integrate_contact([0.0, 1.0], dt, 10_000, |s| -s[0])?;
        assert_eq!(time.len(), states.len());
        // Separation happens at t = pi.
        let t_end = *time.last().unwrap_or(&0.0);
        assert!((t_end - std::f64::consts::PI).abs() < 2.0 * dt);
        assert!(states.iter().all(|s| s[0] >= 0.0));
        Ok(())
    }

    #[test]
    fn max_steps_caps_the_run() -> Result<()> {
        let (time, _) = integrate_contact([0.0, 1.0], 1e-3, 10, |_| 0.0)?;
        assert_eq!(time.len(), 11);
        Ok(())
    }

    #[test]
    fn bad_step_rejected() {
        assert!(integrate_contact([0.0, 1.0], 0.0, 10, |_| 0.0).is_err());
    }

    #[test]
    fn oversized_step_budget_rejected_before_allocating() {
        let err = integrate_contact([0.0, 1.0], 1e-3, usize::MAX, |_| 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParam(_)));
        assert!(integrate_contact([0.0, 1.0], 1e-3, MAX_INTEGRATION_STEPS + 1, |_| 0.0).is_err());
    }

    #[test]
    fn divergence_is_an_error() {
        let err = integrate_contact([0.0, 1.0], 1.0, 100, |s| s[0] * 1e300).unwrap_err();
        assert!(err.to_string().contains("diverged"));
    }
}
