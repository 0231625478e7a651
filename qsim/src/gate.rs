use crate::api::Pauli;
use num_complex::Complex;

/// A single circuit instruction.
///
/// Qubit and classical bit indices are validated when the gate is added to a
/// [`Circuit`](crate::Circuit), not when the variant is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    H { qubit: usize },
    X { qubit: usize },
    Y { qubit: usize },
    Z { qubit: usize },
    S { qubit: usize },
    CX { control: usize, target: usize },
    CZ { control: usize, target: usize },
    RX { qubit: usize, theta: f64 },
    RY { qubit: usize, theta: f64 },
    RZ { qubit: usize, theta: f64 },
    /// Prepares `amplitudes[0]|0⟩ + amplitudes[1]|1⟩` on a qubit that is still in |0⟩.
    Initialize {
        qubit: usize,
        amplitudes: [Complex<f64>; 2],
    },
    /// Collapses `qubit` in the Z basis and stores the outcome in `clbit`.
    Measure { qubit: usize, clbit: usize },
    /// Applies `pauli` to `target` when classical bit `clbit` reads 1.
    CondPauli {
        clbit: usize,
        pauli: Pauli,
        target: usize,
    },
}

impl Gate {
    /// Qubits touched by the gate, in the order they appear in the variant.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::H { qubit }
            | Gate::X { qubit }
            | Gate::Y { qubit }
            | Gate::Z { qubit }
            | Gate::S { qubit }
            | Gate::RX { qubit, .. }
            | Gate::RY { qubit, .. }
            | Gate::RZ { qubit, .. }
            | Gate::Initialize { qubit, .. }
            | Gate::Measure { qubit, .. } => vec![qubit],
            Gate::CX { control, target } | Gate::CZ { control, target } => vec![control, target],
            Gate::CondPauli { target, .. } => vec![target],
        }
    }

    /// Classical bit read or written by the gate, if any.
    pub fn clbit(&self) -> Option<usize> {
        match *self {
            Gate::Measure { clbit, .. } | Gate::CondPauli { clbit, .. } => Some(clbit),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::H { .. } => "h",
            Gate::X { .. } => "x",
            Gate::Y { .. } => "y",
            Gate::Z { .. } => "z",
            Gate::S { .. } => "s",
            Gate::CX { .. } => "cx",
            Gate::CZ { .. } => "cz",
            Gate::RX { .. } => "rx",
            Gate::RY { .. } => "ry",
            Gate::RZ { .. } => "rz",
            Gate::Initialize { .. } => "initialize",
            Gate::Measure { .. } => "measure",
            Gate::CondPauli { .. } => "if",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_touched_indices() {
        assert_eq!(Gate::CX { control: 2, target: 0 }.qubits(), vec![2, 0]);
        assert_eq!(Gate::Measure { qubit: 1, clbit: 0 }.clbit(), Some(0));
        assert_eq!(Gate::H { qubit: 1 }.clbit(), None);
        let cond = Gate::CondPauli {
            clbit: 1,
            pauli: Pauli::X,
            target: 2,
        };
        assert_eq!(cond.qubits(), vec![2]);
        assert_eq!(cond.clbit(), Some(1));
    }
}
