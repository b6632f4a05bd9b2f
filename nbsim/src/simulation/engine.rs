//! Runtime engine: validates inputs, drives the integrator for the whole run,
//! samples trajectories and feeds the step sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::configuration::config::KernelConfig;
use crate::simulation::error::{InputViolation, SimError};
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::observer::{StepFrame, StepSink};
use crate::simulation::params::{positive_finite, Parameters};
use crate::simulation::states::{NVec, SimulationState, Trajectory};

/// Shared flag a caller flips to stop a run at the next step boundary
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Everything a run hands back: final state, per-body trajectories and how
/// far it got
#[derive(Debug, Clone)]
pub struct RunOutcome<const D: usize> {
    pub state: SimulationState<D>,
    pub trajectories: Vec<Trajectory<D>>, // trajectories[i] belongs to body i
    pub steps_planned: usize,
    pub steps_completed: usize,
    pub cancelled: bool,
    pub first_non_finite_step: Option<usize>,
}

impl<const D: usize> RunOutcome<D> {
    pub fn final_positions(&self) -> Vec<NVec<D>> {
        self.state.positions()
    }

    pub fn final_velocities(&self) -> Vec<NVec<D>> {
        self.state.velocities()
    }

    /// `NumericalInstability` if any coordinate went non-finite during the
    /// run. The outcome itself stays usable either way.
    pub fn ensure_finite(&self) -> Result<(), SimError> {
        match self.first_non_finite_step {
            None => Ok(()),
            Some(first_step) => Err(SimError::NumericalInstability {
                first_step,
                bodies: self.state.non_finite_bodies(),
            }),
        }
    }
}

pub struct Engine<const D: usize> {
    pub parameters: Parameters,
    pub kernel: KernelConfig,
    forces: AccelSet<D>,
}

impl<const D: usize> Engine<D> {
    /// Engine with Newtonian gravity computed by `kernel`. Only planar and
    /// spatial systems (`D` of 2 or 3) are accepted.
    pub fn new(parameters: Parameters, kernel: KernelConfig) -> Result<Self, SimError> {
        if D != 2 && D != 3 {
            return Err(SimError::invalid(
                "dimension",
                InputViolation::UnsupportedDimension { found: D },
            ));
        }
        parameters.validate()?;
        let forces = AccelSet::gravity(kernel, &parameters);
        Ok(Self { parameters, kernel, forces })
    }

    /// Integrate `state` for `floor(stop_time / dt)` steps.
    ///
    /// Inputs are checked before the first step; on error nothing is stepped
    /// and the sink is never called. `cancel` is polled before every step,
    /// a cancelled run returns what it reached with `cancelled = true`.
    pub fn run(
        &self,
        mut state: SimulationState<D>,
        stop_time: f64,
        mut sink: Option<&mut dyn StepSink<D>>,
        cancel: Option<&CancelToken>,
    ) -> Result<RunOutcome<D>, SimError> {
        positive_finite("stop_time", stop_time)?;
        state.validate()?;

        let n = state.body_count();
        let dt = self.parameters.dt;
        let interval = self.parameters.sample_interval;
        let steps_planned = self.parameters.total_steps(stop_time);

        debug!(
            "run: {} bodies, D = {}, {} steps of {} s, kernel {:?}",
            n, D, steps_planned, dt, self.kernel
        );

        // grown by push only, a huge stop_time must not reserve up front
        let mut trajectories = vec![Trajectory::default(); n];
        let mut accel = vec![NVec::<D>::zeros(); n];
        // frame buffer handed to the sink, never the live bodies
        let mut frame_positions = vec![NVec::<D>::zeros(); n];

        let mut steps_completed = 0;
        let mut cancelled = false;
        let mut first_non_finite_step = None;

        for step in 1..=steps_planned {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                cancelled = true;
                warn!("run cancelled after {} of {} steps", steps_completed, steps_planned);
                break;
            }

            semi_implicit_euler(&mut state, &self.forces, dt, &mut accel);
            steps_completed = step;

            if first_non_finite_step.is_none() && !state_is_finite(&state) {
                first_non_finite_step = Some(step);
                warn!(
                    "non-finite state at step {} (bodies {:?})",
                    step,
                    state.non_finite_bodies()
                );
            }

            let is_sample = step % interval == 0;
            if is_sample {
                for (traj, b) in trajectories.iter_mut().zip(&state.bodies) {
                    traj.push(b.x);
                }
            }

            if let Some(sink) = sink.as_deref_mut() {
                for (p, b) in frame_positions.iter_mut().zip(&state.bodies) {
                    *p = b.x;
                }
                let frame = StepFrame {
                    step,
                    t: state.t,
                    positions: &frame_positions,
                    sampled: is_sample.then_some(&frame_positions[..]),
                };
                sink.observe(&frame);
            }
        }

        info!(
            "run finished: {} / {} steps, t = {:.6e} s, {} samples per body",
            steps_completed,
            steps_planned,
            state.t,
            trajectories.first().map_or(0, Trajectory::len)
        );

        Ok(RunOutcome {
            state,
            trajectories,
            steps_planned,
            steps_completed,
            cancelled,
            first_non_finite_step,
        })
    }
}

fn state_is_finite<const D: usize>(state: &SimulationState<D>) -> bool {
    state
        .bodies
        .iter()
        .all(|b| b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()))
}

/// One-shot run from raw arrays, using the ordered-pair gravity kernel.
///
/// `positions` and `velocities` are `N x D`, `masses` has `N` entries.
pub fn run<const D: usize>(
    positions: &[Vec<f64>],
    velocities: &[Vec<f64>],
    masses: &[f64],
    stop_time: f64,
    parameters: &Parameters,
    sink: Option<&mut dyn StepSink<D>>,
) -> Result<RunOutcome<D>, SimError> {
    let engine = Engine::<D>::new(parameters.clone(), KernelConfig::Ordered)?;
    let state = SimulationState::<D>::from_arrays(positions, velocities, masses)?;
    engine.run(state, stop_time, sink, None)
}
