use crate::histogram::Histogram;
use bloch::{BlochVector, QubitState, SphereScene};
use serde::Serialize;
use std::fmt;

const HISTOGRAM_WIDTH: usize = 40;

/// Everything one session displays: both states, their scenes, the shot
/// histogram and the circuit.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeleportReport {
    pub state_label: String,
    pub initial_state: QubitState,
    pub received_state: QubitState,
    pub initial_bloch: BlochVector,
    pub received_bloch: BlochVector,
    /// |⟨ψ|φ⟩|² between the original and the received state.
    pub fidelity: f64,
    pub histogram: Histogram,
    pub circuit_diagram: String,
    pub qasm: String,
    pub initial_scene: SphereScene,
    pub received_scene: SphereScene,
}

impl TeleportReport {
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TeleportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quantum Teleportation")?;
        writeln!(f, "Initial state: {}", self.state_label)?;
        writeln!(f)?;
        writeln!(f, "Teleportation circuit:")?;
        f.write_str(&self.circuit_diagram)?;
        writeln!(f)?;
        write_bloch(f, self.initial_scene.title(), &self.initial_bloch)?;
        write_bloch(f, self.received_scene.title(), &self.received_bloch)?;
        writeln!(f, "Fidelity: {:.6}", self.fidelity)?;
        writeln!(f)?;
        writeln!(f, "Measurement results ({} shots, c1c0):", self.histogram.shots)?;
        f.write_str(&self.histogram.render(HISTOGRAM_WIDTH))
    }
}

fn write_bloch(f: &mut fmt::Formatter<'_>, title: &str, v: &BlochVector) -> fmt::Result {
    writeln!(f, "{title}: ({:+.4}, {:+.4}, {:+.4})", v.x, v.y, v.z)
}
