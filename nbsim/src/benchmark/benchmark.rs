use std::time::Instant;

use crate::configuration::config::KernelConfig;
use crate::simulation::forces::AccelSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, SimulationState};

const KERNELS: [KernelConfig; 3] = [
    KernelConfig::Ordered,
    KernelConfig::Symmetric,
    KernelConfig::Parallel,
];

/// Helper to build a manual system of size `n`
fn make_system3(n: usize) -> SimulationState<3> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );

        bodies.push(Body { x, v: NVec3::zeros(), m: 1.0 });
    }

    SimulationState { bodies, t: 0.0 }
}

/// Time one acceleration pass of every kernel for a range of n.
/// Prints CSV, paste it into a spreadsheet to graph
pub fn bench_kernels() {
    // Different system sizes to test
    let ns = [100, 200, 400, 800, 1600, 3200];
    let params = Parameters::default().with_g(0.1).with_softening(1e-4);

    println!("N,ordered_ms,symmetric_ms,parallel_ms");

    for n in ns {
        let sys = make_system3(n);
        let mut out = vec![NVec3::zeros(); n];
        // small n: average over a few passes to smooth noise
        let passes = if n <= 800 { 5 } else { 1 };

        let mut row = Vec::with_capacity(KERNELS.len());
        for kernel in KERNELS {
            let forces = AccelSet::<3>::gravity(kernel, &params);

            // Warm up
            forces.accumulate_accels(0.0, &sys, &mut out);

            let t0 = Instant::now();
            for _ in 0..passes {
                forces.accumulate_accels(0.0, &sys, &mut out);
            }
            row.push(t0.elapsed().as_secs_f64() * 1000.0 / passes as f64);
        }

        println!("{},{:.6},{:.6},{:.6}", n, row[0], row[1], row[2]);
    }
}
