use crate::state::QubitState;
use serde::{Deserialize, Serialize};

/// Bloch sphere angles (spherical coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochAngles {
    /// Polar angle θ ∈ [0, π]
    pub theta: f64,
    /// Relative phase φ = arg(β) − arg(α), not wrapped
    pub phi: f64,
}

impl BlochAngles {
    /// θ = 2·arccos|α|, φ = arg(β) − arg(α).
    ///
    /// |α| is clamped to [0, 1] first so rounding drift on a normalised state
    /// cannot push arccos out of its domain. `arg(0)` is 0.
    pub fn from_state(state: &QubitState) -> Self {
        let magnitude = state.alpha.norm().clamp(0.0, 1.0);
        Self {
            theta: 2.0 * magnitude.acos(),
            phi: state.beta.arg() - state.alpha.arg(),
        }
    }
}

/// A point on the Bloch sphere in Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    /// +Z is |0⟩ and −Z is |1⟩
    pub z: f64,
}

impl BlochVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_angles(angles: BlochAngles) -> Self {
        let (sin_theta, cos_theta) = angles.theta.sin_cos();
        let (sin_phi, cos_phi) = angles.phi.sin_cos();
        Self {
            x: sin_theta * cos_phi,
            y: sin_theta * sin_phi,
            z: cos_theta,
        }
    }

    pub fn from_state(state: &QubitState) -> Self {
        Self::from_angles(BlochAngles::from_state(state))
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &BlochVector) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
