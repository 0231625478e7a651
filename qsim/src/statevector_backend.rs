// src/statevector_backend.rs
use crate::StateVector;
use crate::api::{Pauli, SimError, SimulatorApi};
use crate::circuit::Circuit;
use crate::gate::Gate;
use crate::simulator::{
    Counts, HADAMARD, PAULI_X, PAULI_Y, PAULI_Z, PHASE_S, pauli_matrix, rx_matrix, ry_matrix,
    rz_matrix,
};
use num_complex::Complex;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;

pub struct StatevectorSimulator {
    num_qubits: usize,
    state: StateVector,
    clbits: Vec<u8>,
    rng: StdRng,
}

impl StatevectorSimulator {
    pub fn new(num_qubits: usize) -> Self {
        Self::with_rng(num_qubits, StdRng::from_entropy())
    }

    /// Simulator whose measurement outcomes are reproducible for a given seed.
    pub fn with_seed(num_qubits: usize, seed: u64) -> Self {
        Self::with_rng(num_qubits, StdRng::seed_from_u64(seed))
    }

    fn with_rng(num_qubits: usize, rng: StdRng) -> Self {
        Self {
            num_qubits,
            state: StateVector::new(num_qubits),
            clbits: Vec::new(),
            rng,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), SimError> {
        if qubit >= self.num_qubits {
            return Err(SimError::Qubit(qubit));
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: usize) -> Result<(), SimError> {
        if clbit >= self.clbits.len() {
            return Err(SimError::Clbit(clbit));
        }
        Ok(())
    }

    fn apply_gate(&mut self, g: &Gate) -> Result<(), SimError> {
        for q in g.qubits() {
            self.check_qubit(q)?;
        }
        if let Some(c) = g.clbit() {
            self.check_clbit(c)?;
        }

        match *g {
            Gate::H { qubit } => self.state.apply_single_qubit_gate(&HADAMARD, qubit),
            Gate::X { qubit } => self.state.apply_single_qubit_gate(&PAULI_X, qubit),
            Gate::Y { qubit } => self.state.apply_single_qubit_gate(&PAULI_Y, qubit),
            Gate::Z { qubit } => self.state.apply_single_qubit_gate(&PAULI_Z, qubit),
            Gate::S { qubit } => self.state.apply_single_qubit_gate(&PHASE_S, qubit),
            Gate::RX { qubit, theta } => self.state.apply_single_qubit_gate(&rx_matrix(theta), qubit),
            Gate::RY { qubit, theta } => self.state.apply_single_qubit_gate(&ry_matrix(theta), qubit),
            Gate::RZ { qubit, theta } => self.state.apply_single_qubit_gate(&rz_matrix(theta), qubit),
            Gate::CX { control, target } => self.state.apply_cx(control, target),
            Gate::CZ { control, target } => self.state.apply_cz(control, target),
            Gate::Initialize { qubit, amplitudes } => {
                self.state.initialize_qubit(qubit, amplitudes)?
            }
            Gate::Measure { qubit, clbit } => {
                self.clbits[clbit] = self.state.measure_qubit(qubit, &mut self.rng)?;
            }
            Gate::CondPauli {
                clbit,
                pauli,
                target,
            } => {
                if self.clbits[clbit] == 1 {
                    self.state
                        .apply_single_qubit_gate(pauli_matrix(pauli), target);
                }
            }
        }
        Ok(())
    }
}

impl SimulatorApi for StatevectorSimulator {
    fn reset(&mut self, n: usize) {
        self.num_qubits = n;
        self.state = StateVector::new(n);
        self.clbits.clear();
    }

    fn run(&mut self, circuit: &Circuit) -> Result<(), SimError> {
        if self.num_qubits != circuit.num_qubits {
            self.reset(circuit.num_qubits);
        } else {
            self.state.reset();
        }
        self.clbits = vec![0; circuit.num_clbits];
        for g in circuit.gates() {
            self.apply_gate(g)?;
        }
        Ok(())
    }

    fn statevector(&self) -> &StateVector {
        &self.state
    }

    fn classical_bits(&self) -> &[u8] {
        &self.clbits
    }

    fn measure(&mut self, qubit: usize) -> Result<u8, SimError> {
        self.check_qubit(qubit)?;
        self.state.measure_qubit(qubit, &mut self.rng)
    }

    fn expectation(&self, ops: &[(Pauli, usize)]) -> Result<f64, SimError> {
        // Apply P|ψ⟩ on a clone and compute ⟨ψ|φ⟩
        let mut phi = self.state.clone();
        for &(p, q) in ops {
            self.check_qubit(q)?;
            phi.apply_single_qubit_gate(pauli_matrix(p), q);
        }

        let mut acc = Complex::new(0.0, 0.0);
        for (a, b) in self.state.amplitudes.iter().zip(phi.amplitudes.iter()) {
            acc += a.conj() * b;
        }
        Ok(acc.re)
    }

    fn sample(&mut self, shots: u32) -> Result<Counts, SimError> {
        let dist = WeightedIndex::new(self.state.probabilities())
            .map_err(|e| SimError::Internal(e.to_string()))?;

        let mut counts = Counts::new();
        let width = self.num_qubits;
        for _ in 0..shots {
            let idx = dist.sample(&mut self.rng);
            let bitstr = format!("{:0width$b}", idx, width = width);
            *counts.entry(bitstr).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
