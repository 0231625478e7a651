// src/api.rs
use crate::StateVector;
use crate::circuit::Circuit;
use crate::simulator::Counts;

/// A lightweight error enum so callers don't rely on simulator internals.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid qubit index: {0}")]
    Qubit(usize),
    #[error("Invalid classical bit index: {0}")]
    Clbit(usize),
    #[error("Cannot initialize qubit {qubit}: amplitudes have norm² {norm_sqr}, expected 1")]
    Initialize { qubit: usize, norm_sqr: f64 },
    #[error("State vector carries no probability weight")]
    EmptyRegister,
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    pub fn symbol(self) -> &'static str {
        match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        }
    }
}

/// Everything users typically want to do with a simulator backend.
pub trait SimulatorApi {
    fn reset(&mut self, num_qubits: usize);

    /// Runs one trajectory of the circuit from |0…0⟩ with a cleared classical register.
    fn run(&mut self, circuit: &Circuit) -> Result<(), SimError>;

    fn statevector(&self) -> &StateVector;

    /// Classical register written by the last `run`, index 0 first.
    fn classical_bits(&self) -> &[u8];

    /// Measure a single qubit in Z; collapses the state.
    fn measure(&mut self, qubit: usize) -> Result<u8, SimError>;

    /// Non-destructive expectation ⟨ψ|P|ψ⟩ for a Pauli string.
    /// Example: [(Z,0),(X,2)] means Z on q0 ⊗ X on q2, identity elsewhere.
    fn expectation(&self, ops: &[(Pauli, usize)]) -> Result<f64, SimError>;

    /// Sample computational-basis shots from the current state without collapsing it.
    fn sample(&mut self, shots: u32) -> Result<Counts, SimError>;
}
