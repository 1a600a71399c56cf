//! Fixed-step explicit Euler integration with a stop predicate.

/// Explicit Euler integrator over a state of `N` components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardEuler {
    pub time_step: f64,
    pub max_steps: usize,
}

/// Result of [`ForwardEuler::integrate_until`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EulerOutcome<const N: usize> {
    /// The stop predicate held at `state` after `steps` steps.
    Reached {
        state: [f64; N],
        time: f64,
        steps: usize,
    },
    /// The step cap was hit before the predicate held.
    Exhausted {
        state: [f64; N],
        time: f64,
        steps: usize,
    },
}

impl<const N: usize> EulerOutcome<N> {
    pub fn state(&self) -> &[f64; N] {
        match self {
            Self::Reached { state, .. } | Self::Exhausted { state, .. } => state,
        }
    }

    pub fn time(&self) -> f64 {
        match self {
            Self::Reached { time, .. } | Self::Exhausted { time, .. } => *time,
        }
    }

    pub fn steps(&self) -> usize {
        match self {
            Self::Reached { steps, .. } | Self::Exhausted { steps, .. } => *steps,
        }
    }

    pub fn reached(&self) -> bool {
        matches!(self, Self::Reached { .. })
    }
}

impl ForwardEuler {
    pub fn new(time_step: f64, max_steps: usize) -> Self {
        Self { time_step, max_steps }
    }

    /// Advance `initial` with `y += dt · f(t, y)` until `stop(t, y)` holds.
    ///
    /// The predicate is checked on the initial state and after every step.
    pub fn integrate_until<const N: usize, F, S>(
        &self,
        initial: [f64; N],
        mut derivative: F,
        mut stop: S,
    ) -> EulerOutcome<N>
    where
        F: FnMut(f64, &[f64; N]) -> [f64; N],
        S: FnMut(f64, &[f64; N]) -> bool,
    {
        let mut state = initial;
        let mut time = 0.0;
        if stop(time, &state) {
            return EulerOutcome::Reached {
                state,
                time,
                steps: 0,
            };
        }
        for step in 1..=self.max_steps {
            let rate = derivative(time, &state);
            for (value, delta) in state.iter_mut().zip(rate) {
                *value += self.time_step * delta;
            }
            time = step as f64 * self.time_step;
            if stop(time, &state) {
                return EulerOutcome::Reached {
                    state,
                    time,
                    steps: step,
                };
            }
        }
        EulerOutcome::Exhausted {
            state,
            time,
            steps: self.max_steps,
        }
    }
}
