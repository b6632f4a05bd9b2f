//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario<2>` or `Scenario<3>`) containing:
//! - the selected force kernel
//! - numerical parameters (`Parameters`)
//! - the run duration
//! - system state (`SimulationState` with bodies at t = 0)

use crate::configuration::config::{KernelConfig, ScenarioConfig};
use crate::simulation::engine::{CancelToken, Engine, RunOutcome};
use crate::simulation::error::{InputViolation, SimError};
use crate::simulation::observer::StepSink;
use crate::simulation::params::{positive_finite, Parameters};
use crate::simulation::states::SimulationState;

/// A fully-initialized scenario, ready to hand to an [`Engine`]
#[derive(Debug, Clone)]
pub struct Scenario<const D: usize> {
    pub kernel: KernelConfig,
    pub parameters: Parameters,
    pub stop_time: f64,
    pub system: SimulationState<D>,
}

pub type Scenario2D = Scenario<2>;
pub type Scenario3D = Scenario<3>;

impl<const D: usize> Scenario<D> {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, SimError> {
        if cfg.engine.dimension != D {
            return Err(SimError::invalid(
                "dimension",
                InputViolation::DimensionMismatch { expected: D, found: cfg.engine.dimension },
            ));
        }

        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            g: p_cfg.g,
            dt: p_cfg.dt,
            sample_interval: p_cfg.sample_interval,
            eps2: p_cfg.eps2,
        };
        parameters.validate()?;
        positive_finite("stop_time", p_cfg.stop_time)?;

        // Bodies: split `BodyConfig` rows into the N x D arrays the state checks
        let positions: Vec<Vec<f64>> = cfg.bodies.iter().map(|bc| bc.x.clone()).collect();
        let velocities: Vec<Vec<f64>> = cfg.bodies.iter().map(|bc| bc.v.clone()).collect();
        let masses: Vec<f64> = cfg.bodies.iter().map(|bc| bc.m).collect();
        let system = SimulationState::from_arrays(&positions, &velocities, &masses)?;

        Ok(Self {
            kernel: cfg.engine.kernel,
            parameters,
            stop_time: p_cfg.stop_time,
            system,
        })
    }

    pub fn engine(&self) -> Result<Engine<D>, SimError> {
        Engine::new(self.parameters.clone(), self.kernel)
    }

    /// Run the scenario to `stop_time` from its initial state
    pub fn run(
        &self,
        sink: Option<&mut dyn StepSink<D>>,
        cancel: Option<&CancelToken>,
    ) -> Result<RunOutcome<D>, SimError> {
        self.engine()?.run(self.system.clone(), self.stop_time, sink, cancel)
    }
}

/// A scenario of either supported dimension
#[derive(Debug, Clone)]
pub enum AnyScenario {
    Planar(Scenario2D),
    Spatial(Scenario3D),
}

impl AnyScenario {
    pub fn from_config(cfg: &ScenarioConfig) -> Result<Self, SimError> {
        match cfg.engine.dimension {
            2 => Ok(AnyScenario::Planar(Scenario::build_scenario(cfg)?)),
            3 => Ok(AnyScenario::Spatial(Scenario::build_scenario(cfg)?)),
            found => Err(SimError::invalid(
                "dimension",
                InputViolation::UnsupportedDimension { found },
            )),
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            AnyScenario::Planar(_) => 2,
            AnyScenario::Spatial(_) => 3,
        }
    }
}
