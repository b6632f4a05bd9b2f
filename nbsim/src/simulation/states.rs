//! Core state types for the N-body simulation.
//!
//! Defines body/system structs generic over the spatial dimension `D`:
//! - `Body<D>` / `SimulationState<D>` using `NVec<D>`
//! - `NVec2` / `NVec3` aliases for the 2D and 3D cases
//! - `Trajectory<D>`, the sampled path of one body
//!
//! Each system holds the list of bodies and the current simulation time `t`.

use nalgebra::SVector;

use crate::simulation::error::{InputViolation, SimError};

pub type NVec<const D: usize> = SVector<f64, D>;
pub type NVec2 = NVec<2>;
pub type NVec3 = NVec<3>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body<const D: usize> {
    pub x: NVec<D>, // position
    pub v: NVec<D>, // velocity
    pub m: f64,     // mass
}

impl<const D: usize> Body<D> {
    pub fn momentum(&self) -> NVec<D> {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState<const D: usize> {
    pub bodies: Vec<Body<D>>, // collection of bodies, index = identity
    pub t: f64,               // elapsed simulated time
}

impl<const D: usize> SimulationState<D> {
    /// Build a state at `t = 0` from caller-supplied rows.
    ///
    /// Every row of `positions` and `velocities` must have exactly `D`
    /// components, the three inputs must agree on `N`, and every mass must be
    /// finite and strictly positive. Nothing is clamped: the first violated
    /// constraint is returned as [`SimError::InvalidInput`].
    pub fn from_arrays(
        positions: &[Vec<f64>],
        velocities: &[Vec<f64>],
        masses: &[f64],
    ) -> Result<Self, SimError> {
        let n = positions.len();
        if n == 0 {
            return Err(SimError::invalid("positions", InputViolation::Empty));
        }
        if velocities.len() != n {
            return Err(SimError::invalid(
                "velocities",
                InputViolation::LengthMismatch { expected: n, found: velocities.len() },
            ));
        }
        if masses.len() != n {
            return Err(SimError::invalid(
                "masses",
                InputViolation::LengthMismatch { expected: n, found: masses.len() },
            ));
        }

        check_rows::<D>("positions", positions)?;
        check_rows::<D>("velocities", velocities)?;

        let bodies = positions
            .iter()
            .zip(velocities)
            .zip(masses)
            .map(|((x, v), &m)| Body {
                x: NVec::<D>::from_column_slice(x),
                v: NVec::<D>::from_column_slice(v),
                m,
            })
            .collect();

        let state = Self { bodies, t: 0.0 };
        state.validate()?;
        Ok(state)
    }

    /// Check the invariants the engine relies on before stepping.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.bodies.is_empty() {
            return Err(SimError::invalid("positions", InputViolation::Empty));
        }
        for (index, b) in self.bodies.iter().enumerate() {
            if !b.m.is_finite() {
                return Err(SimError::invalid("masses", InputViolation::NonFiniteEntry { index }));
            }
            if b.m <= 0.0 {
                return Err(SimError::invalid(
                    "masses",
                    InputViolation::NonPositiveEntry { index, value: b.m },
                ));
            }
            if b.x.iter().any(|c| !c.is_finite()) {
                return Err(SimError::invalid("positions", InputViolation::NonFiniteEntry { index }));
            }
            if b.v.iter().any(|c| !c.is_finite()) {
                return Err(SimError::invalid("velocities", InputViolation::NonFiniteEntry { index }));
            }
        }
        Ok(())
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn positions(&self) -> Vec<NVec<D>> {
        self.bodies.iter().map(|b| b.x).collect()
    }

    pub fn velocities(&self) -> Vec<NVec<D>> {
        self.bodies.iter().map(|b| b.v).collect()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Total linear momentum, constant for an isolated system up to
    /// round-off
    pub fn total_momentum(&self) -> NVec<D> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(NVec::<D>::zeros(), |acc, p| acc + p)
    }

    /// Mass-weighted mean position; drifts linearly with the total momentum
    pub fn center_of_mass(&self) -> NVec<D> {
        let weighted = self
            .bodies
            .iter()
            .fold(NVec::<D>::zeros(), |acc, b| acc + b.x * b.m);
        weighted / self.total_mass()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Gravitational potential energy summed over unordered pairs.
    /// `eps2` must match the softening used by the force kernel.
    pub fn potential_energy(&self, g: f64, eps2: f64) -> f64 {
        let n = self.bodies.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let bi = &self.bodies[i];
                let bj = &self.bodies[j];
                let r = bj.x - bi.x;
                u -= g * bi.m * bj.m / (r.dot(&r) + eps2).sqrt();
            }
        }
        u
    }

    pub fn total_energy(&self, g: f64, eps2: f64) -> f64 {
        self.kinetic_energy() + self.potential_energy(g, eps2)
    }

    /// Indices of bodies whose position or velocity holds a NaN or infinity
    pub fn non_finite_bodies(&self) -> Vec<usize> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.x.iter().chain(b.v.iter()).any(|c| !c.is_finite()))
            .map(|(i, _)| i)
            .collect()
    }
}

fn check_rows<const D: usize>(field: &'static str, rows: &[Vec<f64>]) -> Result<(), SimError> {
    for (index, row) in rows.iter().enumerate() {
        if row.len() != D {
            return Err(SimError::invalid(
                field,
                InputViolation::Dimension { index, expected: D, found: row.len() },
            ));
        }
    }
    Ok(())
}

/// Sampled path of a single body, append-only for the lifetime of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory<const D: usize> {
    points: Vec<NVec<D>>,
}

impl<const D: usize> Trajectory<D> {
    pub(crate) fn push(&mut self, p: NVec<D>) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[NVec<D>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NVec<D>> {
        self.points.iter()
    }
}
