//! Step sinks: the boundary between the engine and whatever presents it.
//!
//! The engine hands each sink a borrowed [`StepFrame`] after every step. A
//! sink observes only, it has no path back into the simulated state.

use std::sync::mpsc::Sender;

use log::{debug, info, warn};

use crate::simulation::states::NVec;

/// Positions after one completed step
#[derive(Debug, Clone, Copy)]
pub struct StepFrame<'a, const D: usize> {
    pub step: usize,                       // 1-based index of the completed step
    pub t: f64,                            // simulated time after the step
    pub positions: &'a [NVec<D>],          // one entry per body, by index
    pub sampled: Option<&'a [NVec<D>]>,    // points just appended to the trajectories
}

impl<const D: usize> StepFrame<'_, D> {
    pub fn is_sample(&self) -> bool {
        self.sampled.is_some()
    }

    /// Owned copy, safe to hand to another thread
    pub fn snapshot(&self) -> StepSnapshot<D> {
        StepSnapshot {
            step: self.step,
            t: self.t,
            positions: self.positions.to_vec(),
            sampled: self.sampled.map(<[NVec<D>]>::to_vec),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepSnapshot<const D: usize> {
    pub step: usize,
    pub t: f64,
    pub positions: Vec<NVec<D>>,
    pub sampled: Option<Vec<NVec<D>>>,
}

pub trait StepSink<const D: usize> {
    fn observe(&mut self, frame: &StepFrame<'_, D>);
}

/// Logs sampled frames; everything else is ignored
pub struct LogSink {
    progress_every: usize, // samples between info lines, 0 = never
    samples: usize,
}

impl LogSink {
    pub fn new(progress_every: usize) -> Self {
        Self { progress_every, samples: 0 }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<const D: usize> StepSink<D> for LogSink {
    fn observe(&mut self, frame: &StepFrame<'_, D>) {
        let Some(points) = frame.sampled else {
            return;
        };
        self.samples += 1;

        for (i, p) in points.iter().enumerate() {
            debug!("step {} t={:.6e} body {}: {:?}", frame.step, frame.t, i, p.as_slice());
        }
        if self.progress_every > 0 && self.samples % self.progress_every == 0 {
            info!("sampled {} frames, t = {:.6e} s", self.samples, frame.t);
        }
    }
}

/// Sends an owned [`StepSnapshot`] per step to a consumer on another thread.
///
/// Sampled-only mode drops the frames in between. A dropped receiver is not an
/// error: the run carries on without its observer, and the sink stops copying
/// frames after the first failed send.
pub struct ChannelSink<const D: usize> {
    tx: Sender<StepSnapshot<D>>,
    sampled_only: bool,
    disconnected_at: Option<usize>, // step whose send failed first
}

impl<const D: usize> ChannelSink<D> {
    pub fn new(tx: Sender<StepSnapshot<D>>) -> Self {
        Self { tx, sampled_only: false, disconnected_at: None }
    }

    pub fn sampled_only(tx: Sender<StepSnapshot<D>>) -> Self {
        Self { tx, sampled_only: true, disconnected_at: None }
    }

    /// Step at which the receiver was found gone, if it was
    pub fn disconnected_at(&self) -> Option<usize> {
        self.disconnected_at
    }
}

impl<const D: usize> StepSink<D> for ChannelSink<D> {
    fn observe(&mut self, frame: &StepFrame<'_, D>) {
        if self.disconnected_at.is_some() || (self.sampled_only && !frame.is_sample()) {
            return;
        }
        if self.tx.send(frame.snapshot()).is_err() {
            warn!("step sink receiver dropped at step {}, no further frames sent", frame.step);
            self.disconnected_at = Some(frame.step);
        }
    }
}
