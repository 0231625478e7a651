use crate::api::{Pauli, SimError, SimulatorApi};
use crate::circuit::Circuit;
use crate::state::StateVector;
use crate::statevector_backend::StatevectorSimulator;
use num_complex::Complex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::debug;

// custom type for gate matrices
pub type GateMatrix = [[Complex<f64>; 2]; 2];

/// Histogram of classical outcomes. Keys are bitstrings with the highest bit leftmost.
pub type Counts = BTreeMap<String, u32>;

pub const IDENTITY: GateMatrix = [
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
    [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
];

pub const HADAMARD: GateMatrix = [
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

pub const PAULI_X: GateMatrix = [
    [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
];

pub const PAULI_Y: GateMatrix = [
    [Complex::new(0.0, 0.0), Complex::new(0.0, -1.0)],
    [Complex::new(0.0, 1.0), Complex::new(0.0, 0.0)],
];

pub const PAULI_Z: GateMatrix = [
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
    [Complex::new(0.0, 0.0), Complex::new(-1.0, 0.0)],
];

pub const PHASE_S: GateMatrix = [
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
    [Complex::new(0.0, 0.0), Complex::new(0.0, 1.0)],
];

pub fn pauli_matrix(pauli: Pauli) -> &'static GateMatrix {
    match pauli {
        Pauli::I => &IDENTITY,
        Pauli::X => &PAULI_X,
        Pauli::Y => &PAULI_Y,
        Pauli::Z => &PAULI_Z,
    }
}

/// Rx(θ) = cos(θ/2) I - i sin(θ/2) X
pub fn rx_matrix(theta: f64) -> GateMatrix {
    let (st, ct) = (theta / 2.0).sin_cos();
    [
        [Complex::new(ct, 0.0), Complex::new(0.0, -st)],
        [Complex::new(0.0, -st), Complex::new(ct, 0.0)],
    ]
}

/// Ry(θ) = cos(θ/2) I - i sin(θ/2) Y, which is a real matrix.
pub fn ry_matrix(theta: f64) -> GateMatrix {
    let (st, ct) = (theta / 2.0).sin_cos();
    [
        [Complex::new(ct, 0.0), Complex::new(-st, 0.0)],
        [Complex::new(st, 0.0), Complex::new(ct, 0.0)],
    ]
}

/// Rz(θ) = diag(e^{-iθ/2}, e^{+iθ/2})
pub fn rz_matrix(theta: f64) -> GateMatrix {
    let (st, ct) = (theta / 2.0).sin_cos();
    [
        [Complex::new(ct, -st), Complex::new(0.0, 0.0)],
        [Complex::new(0.0, 0.0), Complex::new(ct, st)],
    ]
}

/// Outcome of [`execute`]: one representative final state plus the shot histogram.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub state: StateVector,
    pub counts: Counts,
    pub shots: u32,
}

/// Runs `circuit` for `shots` independent trajectories and tallies the outcomes.
///
/// Circuits containing measurements are re-run per shot so that mid-circuit
/// collapse and classically controlled gates are honoured, and the classical
/// register is counted. Circuits without measurements are run once and
/// sampled on every qubit. `state` is the final state of the first trajectory.
pub fn execute(circuit: &Circuit, shots: u32, seed: Option<u64>) -> Result<Execution, SimError> {
    let mut sim = match seed {
        Some(seed) => StatevectorSimulator::with_seed(circuit.num_qubits, seed),
        None => StatevectorSimulator::new(circuit.num_qubits),
    };
    debug!(
        num_qubits = circuit.num_qubits,
        num_gates = circuit.len(),
        shots,
        "executing circuit"
    );

    sim.run(circuit)?;
    let state = sim.statevector().clone();

    let counts = if !circuit.has_measurements() {
        sim.sample(shots)?
    } else {
        let mut counts = Counts::new();
        for shot in 0..shots {
            if shot > 0 {
                sim.run(circuit)?;
            }
            *counts.entry(bitstring(sim.classical_bits())).or_insert(0) += 1;
        }
        counts
    };

    debug!(outcomes = counts.len(), "execution finished");
    Ok(Execution {
        state,
        counts,
        shots,
    })
}

/// Formats a classical register with the highest index leftmost.
pub fn bitstring(bits: &[u8]) -> String {
    bits.iter()
        .rev()
        .map(|&b| if b == 0 { '0' } else { '1' })
        .collect()
}
