use crate::api::SimError;
use crate::simulator::GateMatrix;
use num_complex::Complex;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::Serialize;

/// Tolerance used when checking that prepared amplitudes are normalised.
pub const NORM_TOLERANCE: f64 = 1e-6;

/// Dense state vector over `num_qubits` qubits. Qubit `k` is bit `k` of the basis index.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateVector {
    pub num_qubits: usize,
    #[serde(rename = "amplitudes")]
    pub amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits; // 2^num_qubits
        let mut amplitudes = vec![Complex::new(0.0, 0.0); size];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    pub fn apply_single_qubit_gate(&mut self, gate_matrix: &GateMatrix, target_qubit: usize) {
        let k = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & k) == 0 {
                let j = i | k;
                let amp_i = self.amplitudes[i];
                let amp_j = self.amplitudes[j];

                self.amplitudes[i] = gate_matrix[0][0] * amp_i + gate_matrix[0][1] * amp_j;
                self.amplitudes[j] = gate_matrix[1][0] * amp_i + gate_matrix[1][1] * amp_j;
            }
        }
    }

    pub fn apply_cx(&mut self, control_qubit: usize, target_qubit: usize) {
        let control_mask = 1 << control_qubit;
        let target_mask = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & control_mask) != 0 && (i & target_mask) == 0 {
                self.amplitudes.swap(i, i | target_mask);
            }
        }
    }

    pub fn apply_cz(&mut self, control_qubit: usize, target_qubit: usize) {
        let mask = (1 << control_qubit) | (1 << target_qubit);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    /// Rotates a qubit still in |0⟩ onto `a|0⟩ + b|1⟩` using the unitary
    /// `[[a, -b*], [b, a*]]`, whose first column is the requested state.
    pub fn initialize_qubit(
        &mut self,
        qubit: usize,
        amplitudes: [Complex<f64>; 2],
    ) -> Result<(), SimError> {
        if qubit >= self.num_qubits {
            return Err(SimError::Qubit(qubit));
        }
        let [a, b] = amplitudes;
        let norm_sqr = a.norm_sqr() + b.norm_sqr();
        if (norm_sqr - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::Initialize { qubit, norm_sqr });
        }
        let prep = [[a, -b.conj()], [b, a.conj()]];
        self.apply_single_qubit_gate(&prep, qubit);
        Ok(())
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Born-rule measurement of one qubit; the state collapses onto the
    /// observed branch and is renormalised.
    pub fn measure_qubit(&mut self, qubit: usize, rng: &mut impl Rng) -> Result<u8, SimError> {
        if qubit >= self.num_qubits {
            return Err(SimError::Qubit(qubit));
        }
        let mask = 1 << qubit;
        let (mut p0, mut p1) = (0.0, 0.0);
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if i & mask == 0 {
                p0 += amp.norm_sqr();
            } else {
                p1 += amp.norm_sqr();
            }
        }
        let total = p0 + p1;
        if total <= 0.0 {
            return Err(SimError::EmptyRegister);
        }

        let outcome: u8 = if rng.gen_range(0.0..total) < p0 { 0 } else { 1 };
        let kept = if outcome == 0 { p0 } else { p1 };
        let scale = 1.0 / kept.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            let bit = u8::from(i & mask != 0);
            *amp = if bit == outcome {
                *amp * scale
            } else {
                Complex::new(0.0, 0.0)
            };
        }
        Ok(outcome)
    }

    pub fn measure_all(&mut self, rng: &mut impl Rng) -> Result<usize, SimError> {
        let dist = WeightedIndex::new(self.probabilities())
            .map_err(|e| SimError::Internal(e.to_string()))?;
        let measured_index = dist.sample(rng);

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if i == measured_index {
                Complex::new(1.0, 0.0)
            } else {
                Complex::new(0.0, 0.0)
            };
        }
        Ok(measured_index)
    }

    /// Amplitudes `[a, b]` of a qubit that is in a product state with the rest
    /// of the register. The branch of the other qubits carrying the most
    /// weight is selected and renormalised.
    pub fn qubit_state(&self, qubit: usize) -> Result<[Complex<f64>; 2], SimError> {
        if qubit >= self.num_qubits {
            return Err(SimError::Qubit(qubit));
        }
        let mask = 1 << qubit;
        let mut best: Option<(usize, f64)> = None;
        for i in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            let weight = self.amplitudes[i].norm_sqr() + self.amplitudes[i | mask].norm_sqr();
            if best.is_none_or(|(_, w)| weight > w) {
                best = Some((i, weight));
            }
        }

        match best {
            Some((i, weight)) if weight > 0.0 => {
                let norm = weight.sqrt();
                Ok([self.amplitudes[i] / norm, self.amplitudes[i | mask] / norm])
            }
            _ => Err(SimError::EmptyRegister),
        }
    }

    pub fn reset(&mut self) {
        for amp in &mut self.amplitudes {
            *amp = Complex::new(0.0, 0.0);
        }
        self.amplitudes[0] = Complex::new(1.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{HADAMARD, PAULI_X};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn test_state_vector_initialization() {
        let num_qubits = 3;
        let state = StateVector::new(num_qubits);
        assert_eq!(state.num_qubits, num_qubits);
        assert_eq!(state.amplitudes.len(), 1 << num_qubits);
        assert!(approx_eq(state.amplitudes[0], Complex::new(1.0, 0.0)));
        for i in 1..state.amplitudes.len() {
            assert!(approx_eq(state.amplitudes[i], Complex::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_measurement() {
        let mut state = StateVector::new(2); // State is |00>
        state.apply_single_qubit_gate(&PAULI_X, 1);

        let mut rng = StdRng::seed_from_u64(5);
        let result = state.measure_all(&mut rng).unwrap();

        assert_eq!(result, 2);
        assert!(approx_eq(state.amplitudes[2], Complex::new(1.0, 0.0)));
    }

    #[test]
    fn measuring_one_qubit_of_bell_pair_collapses_partner() {
        let mut state = StateVector::new(2);
        state.apply_single_qubit_gate(&HADAMARD, 0);
        state.apply_cx(0, 1);

        let mut rng = StdRng::seed_from_u64(99);
        let outcome = state.measure_qubit(0, &mut rng).unwrap();
        let expected = if outcome == 0 { 0 } else { 3 };
        assert!(approx_eq(state.amplitudes[expected], Complex::new(1.0, 0.0)));
        let partner = state.measure_qubit(1, &mut rng).unwrap();
        assert_eq!(partner, outcome);
    }

    #[test]
    fn cz_flips_sign_of_11_only() {
        let mut state = StateVector::new(2);
        state.apply_single_qubit_gate(&HADAMARD, 0);
        state.apply_single_qubit_gate(&HADAMARD, 1);
        state.apply_cz(0, 1);
        assert!(approx_eq(state.amplitudes[0], Complex::new(0.5, 0.0)));
        assert!(approx_eq(state.amplitudes[1], Complex::new(0.5, 0.0)));
        assert!(approx_eq(state.amplitudes[2], Complex::new(0.5, 0.0)));
        assert!(approx_eq(state.amplitudes[3], Complex::new(-0.5, 0.0)));
    }

    #[test]
    fn initialize_prepares_requested_amplitudes() {
        let a = Complex::new(0.6, 0.0);
        let b = Complex::from_polar(0.8, 1.2);
        let mut state = StateVector::new(2);
        state.initialize_qubit(1, [a, b]).unwrap();
        assert!(approx_eq(state.amplitudes[0], a));
        assert!(approx_eq(state.amplitudes[2], b));

        let err = state.initialize_qubit(0, [a, a]).unwrap_err();
        assert!(matches!(err, SimError::Initialize { qubit: 0, .. }));
        assert_eq!(state.initialize_qubit(4, [a, b]), Err(SimError::Qubit(4)));
    }

    #[test]
    fn extracts_separable_qubit() {
        // |1⟩ on q0 ⊗ |+⟩ on q1
        let mut state = StateVector::new(2);
        state.apply_single_qubit_gate(&PAULI_X, 0);
        state.apply_single_qubit_gate(&HADAMARD, 1);

        let [a, b] = state.qubit_state(1).unwrap();
        assert!(approx_eq(a, Complex::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(b, Complex::new(FRAC_1_SQRT_2, 0.0)));

        let [a0, b0] = state.qubit_state(0).unwrap();
        assert!(approx_eq(a0, Complex::new(0.0, 0.0)));
        assert!(approx_eq(b0, Complex::new(1.0, 0.0)));
    }

    #[test]
    fn extraction_of_empty_register_fails() {
        let mut state = StateVector::new(1);
        state.amplitudes[0] = Complex::new(0.0, 0.0);
        assert_eq!(state.qubit_state(0), Err(SimError::EmptyRegister));
    }
}
