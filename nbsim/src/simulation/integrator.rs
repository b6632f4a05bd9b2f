//! Fixed-step time integrator for the N-body system
//!
//! Semi-implicit (symplectic) Euler, also known as Euler–Cromer, driven by an
//! `AccelSet`. One force evaluation per step.

use super::forces::AccelSet;
use super::states::{NVec, SimulationState};

/// Advance the system by one step of semi-implicit Euler.
///
/// Updates velocities, positions and `sys.t` in place:
/// 1. `a_n = a(x_n)` for every body, from the pre-step snapshot
/// 2. `v_n+1 = v_n + dt * a_n`
/// 3. `x_n+1 = x_n + dt * v_n+1` (the new velocity, not the old one)
///
/// `accel` is caller-owned scratch so a long run does not allocate per step.
/// It is resized to one slot per body when its length is off.
pub fn semi_implicit_euler<const D: usize>(
    sys: &mut SimulationState<D>,
    forces: &AccelSet<D>,
    dt: f64,
    accel: &mut Vec<NVec<D>>,
) {
    let n = sys.bodies.len();
    if n == 0 {
        return;
    }
    if accel.len() != n {
        accel.resize(n, NVec::<D>::zeros());
    }

    // every body sees the same positions x_n
    forces.accumulate_accels(sys.t, &*sys, accel.as_mut_slice());

    // Kick: v_n+1 = v_n + dt * a_n
    for (b, a) in sys.bodies.iter_mut().zip(accel.iter()) {
        b.v += dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    sys.t += dt;
}
