//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait and three interchangeable Newtonian gravity
//! kernels: the ordered-pair reference loop, an unordered-pair variant that
//! reuses each pair force, and a rayon-parallel version of the ordered loop

use rayon::prelude::*;

use crate::configuration::config::KernelConfig;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec, SimulationState};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet<const D: usize> {
    terms: Vec<Box<dyn Acceleration<D> + Send + Sync>>,
}

impl<const D: usize> AccelSet<D> {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration<D> + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Acceleration set holding the gravity kernel selected by `kernel`
    pub fn gravity(kernel: KernelConfig, params: &Parameters) -> Self {
        let (g, eps2) = (params.g, params.eps2);
        match kernel {
            KernelConfig::Ordered => Self::new().with(NewtonianGravity { g, eps2 }),
            KernelConfig::Symmetric => Self::new().with(SymmetricGravity { g, eps2 }),
            KernelConfig::Parallel => Self::new().with(ParallelGravity { g, eps2 }),
        }
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &SimulationState<D>, out: &mut [NVec<D>]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec::<D>::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

impl<const D: usize> Default for AccelSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Acceleration sources operating on [`SimulationState`].
/// Implementations add their contribution into `out[i]` for each body and
/// must only read `sys`
pub trait Acceleration<const D: usize> {
    fn acceleration(&self, t: f64, sys: &SimulationState<D>, out: &mut [NVec<D>]);
}

/// Add the pull of every other body on body `i` into `acc`, one ordered pair
/// at a time.
///
/// Follows the textbook form term by term:
/// `F = G m_i m_j / d^2`, `a_i += (F / m_i) * (r / d)`.
/// Coincident bodies give `d = 0` and the result is inf/NaN, not a panic.
fn accumulate_on<const D: usize>(i: usize, bodies: &[Body<D>], g: f64, eps2: f64, acc: &mut NVec<D>) {
    let bi = &bodies[i];
    for (j, bj) in bodies.iter().enumerate() {
        if j == i {
            continue;
        }
        // displacement from i to j
        let r = bj.x - bi.x;
        let d2 = r.dot(&r) + eps2;
        let d = d2.sqrt();
        let f = g * bi.m * bj.m / d2;
        *acc += (f / bi.m) * (r / d);
    }
}

/// Newtonian gravity, direct sum over every ordered pair (i, j), i != j.
///
/// The force between a pair is evaluated twice, once from each side. This is
/// the reference kernel the others are checked against.
pub struct NewtonianGravity {
    pub g: f64,    // gravitational constant
    pub eps2: f64, // softening, 0 = exact inverse square
}

impl<const D: usize> Acceleration<D> for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &SimulationState<D>, out: &mut [NVec<D>]) {
        for (i, acc) in out.iter_mut().enumerate().take(sys.bodies.len()) {
            accumulate_on(i, &sys.bodies, self.g, self.eps2, acc);
        }
    }
}

/// Newtonian gravity over unordered pairs (i < j): each pair is evaluated
/// once and applied with opposite signs to both bodies.
///
/// Matches [`NewtonianGravity`] within floating-point tolerance at half the
/// pair evaluations.
pub struct SymmetricGravity {
    pub g: f64,
    pub eps2: f64,
}

impl<const D: usize> Acceleration<D> for SymmetricGravity {
    fn acceleration(&self, _t: f64, sys: &SimulationState<D>, out: &mut [NVec<D>]) {
        let n = sys.bodies.len();

        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // If r points from i to j, then i feels a pull along +r,
                // j feels a pull along -r
                let r = bj.x - bi.x;
                let d2 = r.dot(&r) + self.eps2;

                // coef = G / |r|^3
                let coef = self.g / (d2 * d2.sqrt());

                out[i] += coef * bj.m * r;
                out[j] -= coef * bi.m * r;
            }
        }
    }
}

/// [`NewtonianGravity`] with the outer body loop spread over the rayon pool.
///
/// Every worker reads the same immutable `sys` and writes only its own
/// `out[i]`, and each `out[i]` is summed in the same order as the serial
/// kernel, so results are bit-identical to it.
pub struct ParallelGravity {
    pub g: f64,
    pub eps2: f64,
}

impl<const D: usize> Acceleration<D> for ParallelGravity {
    fn acceleration(&self, _t: f64, sys: &SimulationState<D>, out: &mut [NVec<D>]) {
        let n = sys.bodies.len();
        out[..n]
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, acc)| accumulate_on(i, &sys.bodies, self.g, self.eps2, acc));
    }
}
