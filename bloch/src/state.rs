use crate::error::BlochError;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single qubit state |ψ⟩ = α|0⟩ + β|1⟩.
///
/// Normalisation is the caller's responsibility; see [`QubitState::check_normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QubitState {
    pub alpha: Complex64, // Coefficient of |0⟩
    pub beta: Complex64,  // Coefficient of |1⟩
}

impl QubitState {
    /// |0⟩ state
    pub const ZERO: QubitState = QubitState {
        alpha: Complex64::new(1.0, 0.0),
        beta: Complex64::new(0.0, 0.0),
    };

    /// |1⟩ state
    pub const ONE: QubitState = QubitState {
        alpha: Complex64::new(0.0, 0.0),
        beta: Complex64::new(1.0, 0.0),
    };

    pub fn new(alpha: Complex64, beta: Complex64) -> Self {
        Self { alpha, beta }
    }

    /// State chosen by an amplitude slider and a phase slider:
    /// `α|0⟩ + sqrt(1 − α²)·e^{iφ}|1⟩`. `alpha` is clamped to [0, 1], which
    /// keeps the result normalised.
    pub fn from_amplitude_phase(alpha: f64, phase: f64) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let beta_mag = (1.0 - alpha * alpha).max(0.0).sqrt();
        Self {
            alpha: Complex64::new(alpha, 0.0),
            beta: Complex64::from_polar(beta_mag, phase),
        }
    }

    pub fn from_amplitudes(amplitudes: [Complex64; 2]) -> Self {
        let [alpha, beta] = amplitudes;
        Self { alpha, beta }
    }

    pub fn amplitudes(&self) -> [Complex64; 2] {
        [self.alpha, self.beta]
    }

    /// |α|² + |β|²
    pub fn norm_sqr(&self) -> f64 {
        self.alpha.norm_sqr() + self.beta.norm_sqr()
    }

    pub fn check_normalized(&self, tolerance: f64) -> Result<(), BlochError> {
        let norm_sqr = self.norm_sqr();
        if (norm_sqr - 1.0).abs() > tolerance || !norm_sqr.is_finite() {
            return Err(BlochError::InvalidState { norm_sqr });
        }
        Ok(())
    }

    /// Rescales the state onto the unit sphere.
    pub fn normalized(&self) -> Result<Self, BlochError> {
        let norm = self.norm_sqr().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Err(BlochError::ZeroNorm);
        }
        Ok(Self {
            alpha: self.alpha / norm,
            beta: self.beta / norm,
        })
    }

    /// |⟨self|other⟩|²
    pub fn fidelity(&self, other: &QubitState) -> f64 {
        (self.alpha.conj() * other.alpha + self.beta.conj() * other.beta).norm_sqr()
    }
}

/// `|ψ⟩ = a|0⟩ + (re±imi)|1⟩`. The |0⟩ amplitude is printed as a plain number
/// when it is real; the |1⟩ amplitude is always printed in complex form.
impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|ψ⟩ = ")?;
        if self.alpha.im == 0.0 {
            write!(f, "{:.2}", self.alpha.re)?;
        } else {
            write_complex(f, self.alpha)?;
        }
        write!(f, "|0⟩ + ")?;
        write_complex(f, self.beta)?;
        write!(f, "|1⟩")
    }
}

fn write_complex(f: &mut fmt::Formatter<'_>, c: Complex64) -> fmt::Result {
    write!(f, "({:.2}{:+.2}i)", c.re, c.im)
}
