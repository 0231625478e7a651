use crate::api::{Pauli, SimError};
use crate::drawer;
use crate::gate::Gate;
use num_complex::Complex;

#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub num_qubits: usize,
    pub num_clbits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits,
            gates: Vec::new(),
        }
    }

    /// Appends a gate after checking its qubit and classical bit indices.
    pub fn add_gate(&mut self, gate: Gate) -> Result<&mut Self, SimError> {
        if let Some(&q) = gate.qubits().iter().find(|&&q| q >= self.num_qubits) {
            return Err(SimError::Qubit(q));
        }
        if let Gate::CX { control, target } | Gate::CZ { control, target } = gate {
            if control == target {
                return Err(SimError::Qubit(target));
            }
        }
        match gate.clbit() {
            Some(c) if c >= self.num_clbits => return Err(SimError::Clbit(c)),
            _ => {}
        }
        self.gates.push(gate);
        Ok(self)
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn has_measurements(&self) -> bool {
        self.gates.iter().any(|g| matches!(g, Gate::Measure { .. }))
    }

    pub fn h(&mut self, qubit: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::H { qubit })
    }

    pub fn x(&mut self, qubit: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::X { qubit })
    }

    pub fn y(&mut self, qubit: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::Y { qubit })
    }

    pub fn z(&mut self, qubit: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::Z { qubit })
    }

    pub fn s(&mut self, qubit: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::S { qubit })
    }

    pub fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::CX { control, target })
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::CZ { control, target })
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::RX { qubit, theta })
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::RY { qubit, theta })
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::RZ { qubit, theta })
    }

    pub fn initialize(
        &mut self,
        qubit: usize,
        amplitudes: [Complex<f64>; 2],
    ) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::Initialize { qubit, amplitudes })
    }

    pub fn measure(&mut self, qubit: usize, clbit: usize) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::Measure { qubit, clbit })
    }

    pub fn c_pauli(
        &mut self,
        clbit: usize,
        pauli: Pauli,
        target: usize,
    ) -> Result<&mut Self, SimError> {
        self.add_gate(Gate::CondPauli {
            clbit,
            pauli,
            target,
        })
    }

    /// Text diagram with one wire per qubit and one for the classical register.
    pub fn draw(&self) -> String {
        drawer::draw(self)
    }

    /// OpenQASM 3 rendering of the circuit.
    ///
    /// `initialize` has no QASM counterpart and is emitted as `ry` followed by
    /// `rz`, which prepares the same state up to a global phase.
    pub fn to_qasm(&self) -> String {
        let mut qasm = String::from("OPENQASM 3.0;\ninclude \"stdgates.inc\";\n");
        qasm.push_str(&format!("qubit[{}] q;\n", self.num_qubits));
        if self.num_clbits > 0 {
            qasm.push_str(&format!("bit[{}] c;\n", self.num_clbits));
        }
        for gate in &self.gates {
            qasm.push_str(&qasm_line(gate));
        }
        qasm
    }
}

fn qasm_line(gate: &Gate) -> String {
    match *gate {
        Gate::H { qubit }
        | Gate::X { qubit }
        | Gate::Y { qubit }
        | Gate::Z { qubit }
        | Gate::S { qubit } => format!("{} q[{}];\n", gate.name(), qubit),
        Gate::RX { qubit, theta } | Gate::RY { qubit, theta } | Gate::RZ { qubit, theta } => {
            format!("{}({}) q[{}];\n", gate.name(), theta, qubit)
        }
        Gate::CX { control, target } | Gate::CZ { control, target } => {
            format!("{} q[{}], q[{}];\n", gate.name(), control, target)
        }
        Gate::Initialize { qubit, amplitudes } => {
            let [a, b] = amplitudes;
            let theta = 2.0 * a.norm().clamp(0.0, 1.0).acos();
            let phi = b.arg() - a.arg();
            format!("ry({}) q[{}];\nrz({}) q[{}];\n", theta, qubit, phi, qubit)
        }
        Gate::Measure { qubit, clbit } => format!("c[{}] = measure q[{}];\n", clbit, qubit),
        Gate::CondPauli { pauli: Pauli::I, .. } => String::new(),
        Gate::CondPauli {
            clbit,
            pauli,
            target,
        } => format!(
            "if (c[{}]) {} q[{}];\n",
            clbit,
            pauli.symbol().to_lowercase(),
            target
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_indices() {
        let mut circuit = Circuit::new(2, 1);
        assert_eq!(circuit.h(2).unwrap_err(), SimError::Qubit(2));
        assert_eq!(circuit.cx(0, 5).unwrap_err(), SimError::Qubit(5));
        assert_eq!(circuit.cx(1, 1).unwrap_err(), SimError::Qubit(1));
        assert_eq!(circuit.measure(0, 1).unwrap_err(), SimError::Clbit(1));
        assert!(circuit.is_empty());
    }

    #[test]
    fn builder_chains_and_tracks_measurements() {
        let mut circuit = Circuit::new(2, 2);
        circuit.h(0).unwrap().cx(0, 1).unwrap();
        assert_eq!(circuit.len(), 2);
        assert!(!circuit.has_measurements());
        circuit.measure(1, 1).unwrap();
        assert!(circuit.has_measurements());
        assert_eq!(circuit.gates()[1], Gate::CX { control: 0, target: 1 });
    }

    #[test]
    fn emits_qasm3() {
        let mut circuit = Circuit::new(2, 1);
        circuit
            .h(0)
            .unwrap()
            .cx(0, 1)
            .unwrap()
            .measure(0, 0)
            .unwrap()
            .c_pauli(0, Pauli::Z, 1)
            .unwrap();
        let qasm = circuit.to_qasm();
        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("bit[1] c;"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("c[0] = measure q[0];"));
        assert!(qasm.contains("if (c[0]) z q[1];"));
    }

    #[test]
    fn qasm_has_one_line_per_statement() {
        let mut circuit = Circuit::new(1, 1);
        circuit
            .x(0)
            .unwrap()
            .measure(0, 0)
            .unwrap()
            .c_pauli(0, Pauli::I, 0)
            .unwrap();
        assert_eq!(
            circuit.to_qasm(),
            "OPENQASM 3.0;\ninclude \"stdgates.inc\";\nqubit[1] q;\nbit[1] c;\nx q[0];\nc[0] = measure q[0];\n"
        );
    }

    #[test]
    fn initialize_is_emitted_as_rotations() {
        let mut circuit = Circuit::new(1, 0);
        circuit
            .initialize(0, [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)])
            .unwrap();
        let qasm = circuit.to_qasm();
        assert!(qasm.contains("ry(0) q[0];"));
        assert!(qasm.contains("rz(0) q[0];"));
    }
}
