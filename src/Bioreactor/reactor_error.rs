use thiserror::Error;

/// error types of the bioreactor model
#[derive(Debug, Error)]
pub enum ReactorError {
    /// bad geometry, unknown impeller, inconsistent species tables
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),
    #[error("Unknown gas component: {0}")]
    UnknownGasComponent(String),
    /// net liquid draw over one Δt would empty the vessel
    #[error("Working volume exhausted: {volume:e} m³ with a change of {change:e} m³ per step")]
    VolumeExhausted { volume: f64, change: f64 },
    /// charge balance has no positive hydrogen-ion root
    #[error("pH undefined: discriminant {discriminant:e}, [H+] root {hydrogen:e}")]
    PhUndefined { discriminant: f64, hydrogen: f64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse reactor configuration: {0}")]
    Json(#[from] serde_json::Error),
}
