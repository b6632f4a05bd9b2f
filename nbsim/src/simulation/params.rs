//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `g`,
//! - fixed step size `dt`,
//! - trajectory sample interval (in steps),
//! - optional softening `eps2` (off by default)

use crate::simulation::error::{InputViolation, SimError};

/// CODATA 2018 gravitational constant, m^3 kg^-1 s^-2
pub const DEFAULT_G: f64 = 6.67430e-11;
/// Simulated seconds per step
pub const DEFAULT_DT: f64 = 1000.0;
/// Steps between trajectory samples
pub const DEFAULT_SAMPLE_INTERVAL: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64,                 // gravitational constant
    pub dt: f64,                // step size
    pub sample_interval: usize, // record every n-th step
    pub eps2: f64,              // softening, added to distance squared
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            dt: DEFAULT_DT,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            eps2: 0.0,
        }
    }
}

impl Parameters {
    pub fn with_g(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_sample_interval(mut self, sample_interval: usize) -> Self {
        self.sample_interval = sample_interval;
        self
    }

    pub fn with_softening(mut self, eps2: f64) -> Self {
        self.eps2 = eps2;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive_finite("G", self.g)?;
        positive_finite("dt", self.dt)?;
        if self.sample_interval == 0 {
            return Err(SimError::invalid(
                "sample_interval",
                InputViolation::NonPositive { value: 0.0 },
            ));
        }
        if !self.eps2.is_finite() {
            return Err(SimError::invalid("eps2", InputViolation::NonFinite));
        }
        if self.eps2 < 0.0 {
            return Err(SimError::invalid("eps2", InputViolation::Negative { value: self.eps2 }));
        }
        Ok(())
    }

    /// Number of whole steps that fit in `stop_time`; any remainder is dropped
    pub fn total_steps(&self, stop_time: f64) -> usize {
        (stop_time / self.dt).floor() as usize
    }
}

pub(crate) fn positive_finite(field: &'static str, value: f64) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(field, InputViolation::NonFinite));
    }
    if value <= 0.0 {
        return Err(SimError::invalid(field, InputViolation::NonPositive { value }));
    }
    Ok(())
}
