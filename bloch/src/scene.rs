//! Render-ready scene descriptions.
//!
//! A [`SphereScene`] holds exactly one reference sphere surface and one
//! vector line. Field names serialise in camelCase and [`SphereScene::figure`]
//! produces the `{data, layout}` shape a Plotly-style 3D renderer consumes.

use crate::state::QubitState;
use crate::vector::{BlochAngles, BlochVector};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::trace;

pub const DEFAULT_VECTOR_NAME: &str = "State |ψ⟩";

/// Rendering knobs. None of them affect the projected coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    /// Samples along the azimuth (0..2π), inclusive of both ends.
    pub azimuth_steps: usize,
    /// Samples along the polar angle (0..π), inclusive of both ends.
    pub polar_steps: usize,
    pub opacity: f64,
    pub colorscale: String,
    pub vector_color: String,
    pub line_width: f64,
    pub marker_size: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            azimuth_steps: 40,
            polar_steps: 20,
            opacity: 0.3,
            colorscale: "Viridis".to_string(),
            vector_color: "red".to_string(),
            line_width: 8.0,
            marker_size: 6.0,
            width: 450,
            height: 450,
        }
    }
}

/// Parametric unit sphere. Row `i` is azimuth sample `i`, column `j` is polar sample `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereMesh {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
    pub colorscale: String,
    pub opacity: f64,
    pub showscale: bool,
}

impl SphereMesh {
    pub fn unit(config: &SceneConfig) -> Self {
        let azimuth = linspace(0.0, 2.0 * PI, config.azimuth_steps);
        let polar = linspace(0.0, PI, config.polar_steps);

        let mut x = Vec::with_capacity(azimuth.len());
        let mut y = Vec::with_capacity(azimuth.len());
        let mut z = Vec::with_capacity(azimuth.len());
        for &u in &azimuth {
            let (sin_u, cos_u) = u.sin_cos();
            x.push(polar.iter().map(|v| cos_u * v.sin()).collect());
            y.push(polar.iter().map(|v| sin_u * v.sin()).collect());
            z.push(polar.iter().map(|v| v.cos()).collect());
        }

        Self {
            x,
            y,
            z,
            colorscale: config.colorscale.clone(),
            opacity: config.opacity,
            showscale: false,
        }
    }

    /// (azimuth samples, polar samples)
    pub fn shape(&self) -> (usize, usize) {
        (self.x.len(), self.x.first().map_or(0, Vec::len))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub size: f64,
    pub color: String,
}

/// Segment from the origin to the Bloch point, with a marker at each end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorLine {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
    pub mode: String,
    pub line: LineStyle,
    pub marker: MarkerStyle,
    pub name: String,
}

impl VectorLine {
    pub fn to_point(tip: &BlochVector, config: &SceneConfig) -> Self {
        Self {
            x: [0.0, tip.x],
            y: [0.0, tip.y],
            z: [0.0, tip.z],
            mode: "lines+markers".to_string(),
            line: LineStyle {
                color: config.vector_color.clone(),
                width: config.line_width,
            },
            marker: MarkerStyle {
                size: config.marker_size,
                color: config.vector_color.clone(),
            },
            name: DEFAULT_VECTOR_NAME.to_string(),
        }
    }

    pub fn tip(&self) -> BlochVector {
        BlochVector::new(self.x[1], self.y[1], self.z[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    pub range: [f64; 2],
}

impl Axis {
    fn unit(title: &str) -> Self {
        Self {
            title: title.to_string(),
            range: [-1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayout {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub aspectmode: String,
    pub margin: Margin,
}

impl SceneLayout {
    fn new(title: &str, config: &SceneConfig) -> Self {
        Self {
            title: title.to_string(),
            width: config.width,
            height: config.height,
            xaxis: Axis::unit("X"),
            yaxis: Axis::unit("Y"),
            zaxis: Axis::unit("Z"),
            aspectmode: "cube".to_string(),
            margin: Margin {
                l: 0,
                r: 0,
                t: 30,
                b: 0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereScene {
    pub angles: BlochAngles,
    pub vector: BlochVector,
    pub surface: SphereMesh,
    pub arrow: VectorLine,
    pub layout: SceneLayout,
}

/// One drawable element of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace<'a> {
    Surface(&'a SphereMesh),
    Scatter3d(&'a VectorLine),
}

/// Plotly-style figure borrowing from a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Figure<'a> {
    pub data: [Trace<'a>; 2],
    pub layout: &'a SceneLayout,
}

impl SphereScene {
    pub fn title(&self) -> &str {
        &self.layout.title
    }

    /// The surface first, then the vector line.
    pub fn traces(&self) -> [Trace<'_>; 2] {
        [Trace::Surface(&self.surface), Trace::Scatter3d(&self.arrow)]
    }

    pub fn figure(&self) -> Figure<'_> {
        Figure {
            data: self.traces(),
            layout: &self.layout,
        }
    }
}

/// Projects states with a fixed [`SceneConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projector {
    config: SceneConfig,
}

impl Projector {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Maps a state onto the Bloch sphere and packages the render scene.
    ///
    /// Unnormalised input is not rejected; it yields a point off the unit
    /// sphere.
    pub fn project(&self, state: &QubitState, title: &str) -> SphereScene {
        let angles = BlochAngles::from_state(state);
        let vector = BlochVector::from_angles(angles);
        trace!(title, x = vector.x, y = vector.y, z = vector.z, "projected state");

        SphereScene {
            angles,
            vector,
            surface: SphereMesh::unit(&self.config),
            arrow: VectorLine::to_point(&vector, &self.config),
            layout: SceneLayout::new(title, &self.config),
        }
    }
}

/// [`Projector::project`] with the default rendering configuration.
pub fn project(state: &QubitState, title: &str) -> SphereScene {
    Projector::default().project(state, title)
}

fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
