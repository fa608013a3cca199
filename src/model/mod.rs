pub mod body;
pub mod labels;
pub mod registry;
pub mod system;
pub mod updater;

pub use body::{Asteroid, BodyID, BodyInfo, CelestialBody, OrbitParams};
pub use registry::Registry;
pub use system::{BeltSpec, BodySpec};
pub use updater::{
    run, step, CancellationToken, FrameOutcome, FrameRenderer, RunLimit, RunSummary, StopReason,
};
