use crate::error::TeleportError;
use bloch::{QubitState, SceneConfig};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::path::Path;

/// Upper bound of the phase control, one full turn.
pub const PHASE_MAX: f64 = TAU;

/// Most shots a single session may request.
pub const MAX_SHOTS: u32 = 100_000;

/// Most samples along either axis of the sphere mesh.
pub const MAX_MESH_STEPS: usize = 400;

fn default_alpha() -> f64 {
    0.8
}

fn default_shots() -> u32 {
    1024
}

/// Parameters of one interactive session: the amplitude and phase controls
/// that pick |ψ⟩, the number of measurement shots, and rendering knobs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Amplitude of |0⟩, in [0, 1].
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Phase of the |1⟩ amplitude in radians, in [0, 2π].
    #[serde(default)]
    pub phase: f64,
    #[serde(default = "default_shots")]
    pub shots: u32,
    /// Fixes measurement outcomes for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub scene: SceneConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            phase: 0.0,
            shots: default_shots(),
            seed: None,
            scene: SceneConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, TeleportError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TeleportError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), TeleportError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(TeleportError::Config(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..=PHASE_MAX).contains(&self.phase) {
            return Err(TeleportError::Config(format!(
                "phase must be within [0, {PHASE_MAX:.2}], got {}",
                self.phase
            )));
        }
        if !(1..=MAX_SHOTS).contains(&self.shots) {
            return Err(TeleportError::Config(format!(
                "shots must be within [1, {MAX_SHOTS}], got {}",
                self.shots
            )));
        }
        let steps = 2..=MAX_MESH_STEPS;
        if !steps.contains(&self.scene.azimuth_steps) || !steps.contains(&self.scene.polar_steps) {
            return Err(TeleportError::Config(format!(
                "sphere mesh must be between 2×2 and {MAX_MESH_STEPS}×{MAX_MESH_STEPS} samples, got {}×{}",
                self.scene.azimuth_steps, self.scene.polar_steps
            )));
        }
        if !(0.0..=1.0).contains(&self.scene.opacity) {
            return Err(TeleportError::Config(format!(
                "opacity must be within [0, 1], got {}",
                self.scene.opacity
            )));
        }
        Ok(())
    }

    /// The state |ψ⟩ selected by the amplitude and phase controls.
    pub fn initial_state(&self) -> QubitState {
        QubitState::from_amplitude_phase(self.alpha, self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_json_uses_slider_defaults() {
        let config = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.alpha, 0.8);
        assert_eq!(config.phase, 0.0);
        assert_eq!(config.shots, 1024);
        assert_eq!(config.scene.azimuth_steps, 40);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = SessionConfig::from_json_str(
            r#"{"alpha": 0.25, "seed": 7, "scene": {"vectorColor": "blue"}}"#,
        )
        .unwrap();
        assert_eq!(config.alpha, 0.25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scene.vector_color, "blue");
        assert_eq!(config.scene.polar_steps, 20);
    }

    #[test]
    fn rejects_out_of_range_controls() {
        for json in [
            r#"{"alpha": 1.5}"#,
            r#"{"alpha": -0.1}"#,
            r#"{"phase": 7.0}"#,
            r#"{"shots": 0}"#,
            r#"{"scene": {"polarSteps": 1}}"#,
            r#"{"scene": {"opacity": 2.0}}"#,
        ] {
            let err = SessionConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, TeleportError::Config(_)), "{json}: {err}");
        }
        let nan = SessionConfig {
            alpha: f64::NAN,
            ..SessionConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn caps_shots_and_mesh_size() {
        let at_cap = SessionConfig {
            shots: MAX_SHOTS,
            ..SessionConfig::default()
        };
        assert!(at_cap.validate().is_ok());

        for shots in [MAX_SHOTS + 1, u32::MAX] {
            let config = SessionConfig {
                shots,
                ..SessionConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("shots"), "{err}");
        }

        let mut huge_mesh = SessionConfig::default();
        huge_mesh.scene.azimuth_steps = MAX_MESH_STEPS + 1;
        assert!(matches!(huge_mesh.validate(), Err(TeleportError::Config(_))));

        let json = format!(r#"{{"scene": {{"polarSteps": {}}}}}"#, usize::MAX);
        assert!(SessionConfig::from_json_str(&json).is_err());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = SessionConfig::from_json_str("{alpha:").unwrap_err();
        assert!(matches!(err, TeleportError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"alpha": 0.6, "phase": 1.0, "shots": 64}}"#).unwrap();
        let config = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.shots, 64);
        assert!((config.initial_state().norm_sqr() - 1.0).abs() < 1e-12);

        let missing = SessionConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(missing, TeleportError::Io(_)));
    }
}
