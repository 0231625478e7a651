pub mod api;
pub mod circuit;
pub mod drawer;
pub mod gate;
pub mod simulator;
pub mod state;
pub mod statevector_backend;

// Re-export key components for easier access from the binaries and other crates.
pub use api::{Pauli, SimError, SimulatorApi};
pub use circuit::Circuit;
pub use gate::Gate;
pub use simulator::{Counts, Execution, execute};
pub use state::StateVector;
pub use statevector_backend::StatevectorSimulator;
