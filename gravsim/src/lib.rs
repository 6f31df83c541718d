pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod output;
pub mod error;
pub mod run;

pub use simulation::states::{Body, SystemState, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{symplectic_euler, verlet_integrator, IntegratorConfig};
pub use simulation::engine::{Simulator, Snapshots, StepReport};
pub use simulation::scenario::Scenario;

pub use configuration::config::{SimulationConfig, ScenarioConfig, BodyConfig};
pub use configuration::commands::{build, build_from_script, tokenize, Command};

pub use visualization::palette::{Rgb, BLACK, WHITE};
pub use visualization::raster::{Raster, BYTES_PER_PIXEL};
pub use visualization::renderer::{Exposure, FrameRenderer, Viewport};

pub use output::encoder::{FrameEncoder, RawFrameEncoder};
pub use output::bmp::write_bmp;

pub use error::{BuildError, ConstructionError, ParseError, RunError, ScenarioError};
pub use run::{run, RunOptions, RunSummary};
