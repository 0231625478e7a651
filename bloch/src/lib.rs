//! Bloch-sphere projection of single-qubit states.
//!
//! A pure state `a|0⟩ + b|1⟩` maps to the polar angle `θ = 2·arccos|a|` and
//! the azimuth `φ = arg(b) − arg(a)`. The Cartesian point
//! `(sin θ cos φ, sin θ sin φ, cos θ)` is then packaged together with a
//! reference unit sphere into a [`SphereScene`] that a 3D renderer can draw.

pub mod error;
pub mod scene;
pub mod state;
pub mod vector;

pub use error::BlochError;
pub use scene::{
    Axis, Figure, Margin, Projector, SceneConfig, SceneLayout, SphereMesh, SphereScene, Trace,
    VectorLine, project,
};
pub use state::QubitState;
pub use vector::{BlochAngles, BlochVector};
