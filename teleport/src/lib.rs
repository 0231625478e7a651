pub mod config;
pub mod error;
pub mod histogram;
pub mod protocol;
pub mod report;

pub use config::{MAX_MESH_STEPS, MAX_SHOTS, SessionConfig};
pub use error::TeleportError;
pub use histogram::Histogram;
pub use protocol::{ORIGINAL_TITLE, RECEIVED_TITLE, run, teleportation_circuit};
pub use report::TeleportReport;
