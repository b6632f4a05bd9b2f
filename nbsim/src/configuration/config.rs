//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – global engine options (dimension, force kernel)
//! - [`ParametersConfig`] – run duration, numerical parameters and constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example 2D scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   dimension: 2            # 2 or 3
//!   kernel: "ordered"       # "ordered", "symmetric" or "parallel"
//!
//! parameters:
//!   stop_time: 31557600.0   # total simulated time, seconds
//!   G: 6.67430e-11          # gravitational constant (optional)
//!   dt: 1000.0              # fixed step size (optional)
//!   sample_interval: 100    # steps between trajectory samples (optional)
//!   eps2: 0.0               # softening epsilon^2 (optional, off by default)
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.989e30
//!   - x: [ 1.496e11, 0.0 ]
//!     v: [ 0.0, 29780.0 ]
//!     m: 5.972e24
//! ```
//!
//! The scenario builder then maps this configuration into the runtime
//! `Scenario<D>`, checking every value on the way.

use std::io::Read;

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_DT, DEFAULT_G, DEFAULT_SAMPLE_INTERVAL};

/// Which gravity kernel the engine evaluates each step
/// `kernel: "ordered"`, `kernel: "symmetric"` or `kernel: "parallel"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelConfig {
    #[serde(rename = "ordered")] // every ordered pair (i, j) evaluated independently, reference behaviour
    #[default]
    Ordered,

    #[serde(rename = "symmetric")] // each unordered pair once, +F / -F applied to both bodies
    Symmetric,

    #[serde(rename = "parallel")] // ordered pairs, outer body loop split across the rayon pool
    Parallel,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub dimension: usize, // 2 or 3
    #[serde(default)]
    pub kernel: KernelConfig, // force kernel, defaults to ordered pairs
}

/// Run duration plus numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub stop_time: f64, // total simulated time
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
    #[serde(default = "default_dt")]
    pub dt: f64, // time step size
    #[serde(default = "default_sample_interval")]
    pub sample_interval: usize, // steps between trajectory samples
    #[serde(default)]
    pub eps2: f64, // softening, 0 keeps the exact inverse-square law
}

fn default_g() -> f64 {
    DEFAULT_G
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_sample_interval() -> usize {
    DEFAULT_SAMPLE_INTERVAL
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    pub v: Vec<f64>, // initial velocity
    pub m: f64,      // mass
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
