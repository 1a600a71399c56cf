//! Quasi-steady point performance: the force balance at one flight condition
//! and the airspeed solvers used by the climb and descent integrators.

use mdo_aircraft::Aircraft;
use mdo_numerics::{
    NumericsError, ScalarOptions, depressed_quartic_positive_root, find_root, minimize_bounded,
};

/// Default airspeed search interval (m/s).
pub use mdo_core::defaults::{
    MAX_SPEED_M_S as DEFAULT_MAX_SPEED_M_S, MIN_SPEED_M_S as DEFAULT_MIN_SPEED_M_S,
};

/// Slack allowed on the full-throttle limit for solver round-off.
const THROTTLE_SLACK: f64 = 1.0e-9;

/// Which airspeed strategy a segment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedSolverKind {
    /// Bounded minimization of the required throttle.
    #[default]
    Minimize,
    /// Closed-form stationary point of the required thrust.
    Quartic,
}

impl SpeedSolverKind {
    pub fn solver(&self) -> &'static dyn SpeedSolver {
        match self {
            SpeedSolverKind::Minimize => &MinimumThrottle,
            SpeedSolverKind::Quartic => &QuarticStationary,
        }
    }
}

/// Airspeed bounds, strategy and convergence settings shared by the steady segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSolverSettings {
    pub kind: SpeedSolverKind,
    pub min_speed_m_s: f64,
    pub max_speed_m_s: f64,
    pub options: ScalarOptions,
}

impl Default for SpeedSolverSettings {
    fn default() -> Self {
        Self {
            kind: SpeedSolverKind::default(),
            min_speed_m_s: DEFAULT_MIN_SPEED_M_S,
            max_speed_m_s: DEFAULT_MAX_SPEED_M_S,
            options: ScalarOptions::default(),
        }
    }
}

impl SpeedSolverSettings {
    pub fn with_kind(mut self, kind: SpeedSolverKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Flight condition of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightCondition {
    pub altitude_m: f64,
    pub density_kg_m3: f64,
    pub weight_n: f64,
    /// Positive climbing, negative descending (m/s).
    pub vertical_speed_m_s: f64,
    /// Lowest throttle the engine may be set to.
    pub min_throttle: f64,
}

/// Force balance of an aircraft at a flight condition, as a function of airspeed.
#[derive(Debug, Clone, Copy)]
pub struct ForceBalance<'a> {
    aircraft: &'a Aircraft,
    condition: FlightCondition,
}

/// Trimmed state at one airspeed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSolution {
    pub airspeed_m_s: f64,
    pub throttle: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub drag_n: f64,
    pub available_thrust_n: f64,
}

impl<'a> ForceBalance<'a> {
    pub fn new(aircraft: &'a Aircraft, condition: FlightCondition) -> Self {
        Self {
            aircraft,
            condition,
        }
    }

    pub fn condition(&self) -> &FlightCondition {
        &self.condition
    }

    fn dynamic_pressure_area(&self, v: f64) -> f64 {
        0.5 * self.condition.density_kg_m3 * v * v * self.aircraft.wing_area_m2()
    }

    pub fn lift_coefficient(&self, v: f64) -> f64 {
        self.condition.weight_n / self.dynamic_pressure_area(v)
    }

    pub fn drag_n(&self, v: f64) -> f64 {
        let cd = self
            .aircraft
            .polar()
            .drag_coefficient(self.lift_coefficient(v));
        self.dynamic_pressure_area(v) * cd
    }

    pub fn available_thrust_n(&self, v: f64) -> f64 {
        self.aircraft
            .thrust()
            .max_thrust(v, self.condition.altitude_m)
    }

    /// Thrust needed to hold the commanded vertical speed at airspeed `v`.
    pub fn required_thrust_n(&self, v: f64) -> f64 {
        self.drag_n(v) + self.condition.vertical_speed_m_s * self.condition.weight_n / v
    }

    /// Required over available thrust; infinite where no thrust is available.
    pub fn throttle(&self, v: f64) -> f64 {
        let available = self.available_thrust_n(v);
        if available <= 0.0 {
            return f64::INFINITY;
        }
        self.required_thrust_n(v) / available
    }

    /// Highest airspeed in `[lower, upper]` at which the engine still produces
    /// thrust, assuming thrust only falls off past its zero.
    pub fn thrust_limited_speed(
        &self,
        lower: f64,
        upper: f64,
        options: &ScalarOptions,
    ) -> Option<f64> {
        if self.available_thrust_n(upper) > 0.0 {
            return Some(upper);
        }
        if self.available_thrust_n(lower) <= 0.0 {
            return None;
        }
        let zero = find_root(|v| self.available_thrust_n(v), lower, upper, options).ok()?;
        let mut candidate = zero.x;
        for _ in 0..64 {
            if self.available_thrust_n(candidate) > 0.0 {
                return Some(candidate);
            }
            candidate = lower + (candidate - lower) * 0.999_999;
        }
        Some(lower)
    }

    fn usable_upper(&self, settings: &SpeedSolverSettings) -> Result<f64, InfeasibleReason> {
        self.thrust_limited_speed(
            settings.min_speed_m_s,
            settings.max_speed_m_s,
            &settings.options,
        )
        .ok_or(InfeasibleReason::NoThrust {
            airspeed_m_s: settings.min_speed_m_s,
        })
    }

    pub fn point(&self, v: f64) -> PointSolution {
        let cl = self.lift_coefficient(v);
        PointSolution {
            airspeed_m_s: v,
            throttle: self.throttle(v),
            lift_coefficient: cl,
            drag_coefficient: self.aircraft.polar().drag_coefficient(cl),
            drag_n: self.drag_n(v),
            available_thrust_n: self.available_thrust_n(v),
        }
    }
}

/// Why a flight condition cannot be flown.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InfeasibleReason {
    #[error("required throttle {throttle:.3} at {airspeed_m_s:.2} m/s exceeds full throttle")]
    ThrottleAboveFull { throttle: f64, airspeed_m_s: f64 },
    #[error("required throttle {throttle:.3} at {airspeed_m_s:.2} m/s is not positive")]
    ThrottleNotPositive { throttle: f64, airspeed_m_s: f64 },
    #[error("no thrust available at {airspeed_m_s:.2} m/s")]
    NoThrust { airspeed_m_s: f64 },
    #[error(
        "no airspeed in [{min_speed_m_s}, {max_speed_m_s}] m/s holds throttle {min_throttle}"
    )]
    NoIdleSpeed {
        min_throttle: f64,
        min_speed_m_s: f64,
        max_speed_m_s: f64,
    },
    #[error("speed solver failed: {0}")]
    Solver(#[from] NumericsError),
}

/// Strategy returning the airspeed of least effort at a flight condition.
pub trait SpeedSolver {
    fn speed(
        &self,
        balance: &ForceBalance<'_>,
        settings: &SpeedSolverSettings,
    ) -> Result<f64, InfeasibleReason>;
}

/// Brent minimization of the required throttle over the speed bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumThrottle;

impl SpeedSolver for MinimumThrottle {
    fn speed(
        &self,
        balance: &ForceBalance<'_>,
        settings: &SpeedSolverSettings,
    ) -> Result<f64, InfeasibleReason> {
        let upper = balance.usable_upper(settings)?;
        let minimum = minimize_bounded(
            |v| balance.throttle(v),
            settings.min_speed_m_s,
            upper,
            &settings.options,
        )?;
        Ok(minimum.x)
    }
}

/// Stationary point of the required thrust with the thrust curve frozen.
///
/// `T_req(v) = a·v² + cd1·W + c/v² + V_z·W/v` with `a = ½ρS·cd0` and
/// `c = k·W²/(½ρS)`; `dT_req/dv = 0` gives `v⁴ − (V_z·W/2a)·v − c/a = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarticStationary;

impl SpeedSolver for QuarticStationary {
    fn speed(
        &self,
        balance: &ForceBalance<'_>,
        settings: &SpeedSolverSettings,
    ) -> Result<f64, InfeasibleReason> {
        let condition = balance.condition();
        let polar = balance.aircraft.polar();
        let half_rho_s = 0.5 * condition.density_kg_m3 * balance.aircraft.wing_area_m2();
        let weight = condition.weight_n;
        let a = half_rho_s * polar.cd0;
        let c = polar.k * weight * weight / half_rho_s;
        let p = -condition.vertical_speed_m_s * weight / (2.0 * a);
        let q = -c / a;
        let v = depressed_quartic_positive_root(p, q)?;
        Ok(v.clamp(settings.min_speed_m_s, balance.usable_upper(settings)?))
    }
}

/// Solve one flight condition and enforce the throttle bounds.
///
/// When the least-effort speed needs less than the minimum throttle, the speed
/// where the minimum throttle holds the commanded rate is used instead,
/// searching above the least-effort speed first.
pub fn solve_point(
    balance: &ForceBalance<'_>,
    settings: &SpeedSolverSettings,
) -> Result<PointSolution, InfeasibleReason> {
    let speed = settings.kind.solver().speed(balance, settings)?;
    let point = balance.point(speed);
    if !point.throttle.is_finite() {
        return Err(InfeasibleReason::NoThrust {
            airspeed_m_s: speed,
        });
    }
    if point.throttle > 1.0 + THROTTLE_SLACK {
        return Err(InfeasibleReason::ThrottleAboveFull {
            throttle: point.throttle,
            airspeed_m_s: speed,
        });
    }

    let min_throttle = balance.condition().min_throttle;
    if point.throttle >= min_throttle {
        return Ok(point);
    }

    let excess = |v: f64| balance.throttle(v) - min_throttle;
    let front_upper = balance
        .thrust_limited_speed(speed, settings.max_speed_m_s, &settings.options)
        .unwrap_or(speed);
    let brackets = [
        (speed, front_upper),
        (settings.min_speed_m_s, speed),
    ];
    for (lower, upper) in brackets {
        if upper <= lower {
            continue;
        }
        if let Ok(root) = find_root(excess, lower, upper, &settings.options) {
            return Ok(balance.point(root.x));
        }
    }
    Err(InfeasibleReason::NoIdleSpeed {
        min_throttle,
        min_speed_m_s: settings.min_speed_m_s,
        max_speed_m_s: settings.max_speed_m_s,
    })
}
