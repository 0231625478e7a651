use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeleportError {
    #[error("Invalid session configuration: {0}")]
    Config(String),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Simulation failed: {0}")]
    Sim(#[from] qsim::SimError),
    #[error("Bloch projection failed: {0}")]
    Bloch(#[from] bloch::BlochError),
}
