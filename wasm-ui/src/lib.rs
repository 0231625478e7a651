use bloch::{QubitState, SphereScene};
use serde::Deserialize;
use teleport::{SessionConfig, TeleportReport};
use wasm_bindgen::prelude::*;

// This allows Rust to log to the browser's developer console.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn error(s: &str);
}

// --- Data Structures for Communication with JavaScript ---

/// A state to draw, as sent by the page: `{ state: { alpha: [re, im], beta: [re, im] }, title }`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProjectionRequest {
    state: QubitState,
    #[serde(default)]
    title: String,
}

// --- Core Logic, kept free of JS calls so it runs in native tests ---

fn teleport_report(config_json: &str) -> Result<TeleportReport, String> {
    let config = SessionConfig::from_json_str(config_json)
        .map_err(|e| format!("Failed to parse session config: {}", e))?;
    teleport::run(&config).map_err(|e| format!("Teleportation failed: {}", e))
}

fn projection(request_json: &str) -> Result<SphereScene, String> {
    let request: ProjectionRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Failed to parse projection request: {}", e))?;
    Ok(bloch::project(&request.state, &request.title))
}

fn qasm_for(config_json: &str) -> Result<String, String> {
    let config = SessionConfig::from_json_str(config_json)
        .map_err(|e| format!("Failed to parse session config: {}", e))?;
    teleport::teleportation_circuit(&config.initial_state())
        .map(|circuit| circuit.to_qasm())
        .map_err(|e| format!("Failed to build circuit: {}", e))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

// --- WASM Export ---

/// Runs a full session. Takes the session config as JSON (all fields
/// optional) and returns the report as JSON, or `{ "error": ... }`.
#[wasm_bindgen]
pub fn run_teleportation(config_json: &str) -> String {
    match teleport_report(config_json).and_then(|report| to_json(&report)) {
        Ok(json) => json,
        Err(e) => {
            error(&e);
            error_json(&e)
        }
    }
}

/// Projects one state and returns a Plotly-style `{ data, layout }` figure.
#[wasm_bindgen]
pub fn project_state(request_json: &str) -> String {
    match projection(request_json).and_then(|scene| to_json(&scene.figure())) {
        Ok(json) => json,
        Err(e) => {
            error(&e);
            error_json(&e)
        }
    }
}

#[wasm_bindgen]
pub fn circuit_qasm(config_json: &str) -> String {
    match qasm_for(config_json) {
        Ok(qasm) => {
            log(&format!("compiled teleportation circuit ({} bytes)", qasm.len()));
            qasm
        }
        Err(e) => {
            error(&e);
            error_json(&e)
        }
    }
}
