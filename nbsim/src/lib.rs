pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, SimulationState, Trajectory, NVec, NVec2, NVec3};
pub use simulation::params::{Parameters, DEFAULT_G, DEFAULT_DT, DEFAULT_SAMPLE_INTERVAL};
pub use simulation::error::{SimError, InputViolation};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, SymmetricGravity, ParallelGravity};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::engine::{run, Engine, RunOutcome, CancelToken};
pub use simulation::observer::{StepSink, StepFrame, StepSnapshot, LogSink, ChannelSink};
pub use simulation::scenario::{Scenario, Scenario2D, Scenario3D, AnyScenario};
pub use configuration::config::{KernelConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};
pub use benchmark::benchmark::bench_kernels;
