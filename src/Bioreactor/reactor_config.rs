//! # Reactor configuration
//!
//! Everything the simulation treats as fixed for a run: species tables, physical
//! constants, the step resolution and the vessel geometry. The structures are
//! plain serde records with the units written in the field docs, the same way
//! they are written in a JSON task file:
//!
//! ```json
//! {
//!   "constants": { "time_step": 60.0, "ambient_temperature": 25.0 },
//!   "vessel": { "volume": 3.0, "diameter": 13.0,
//!               "agitator": { "impeller_type": "rushton", "number": 1,
//!                             "diameter": 6.0, "width": 2.0 } },
//!   "initial": { "seed_volume": 1.0, "temperature": 30.0,
//!                "composition": { "dO2": 0.0 } }
//! }
//! ```
//! Omitted fields take the defaults below. Nothing here is global: a
//! [`ReactorConfig`] is handed to the reactor at construction and never changes.
use super::reactor_error::ReactorError;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Gas-liquid exchange parameters of a dissolved gas species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasExchange {
    /// kLa of this species relative to the correlation (oxygen) kLa
    pub kla_ratio: f64,
    /// solubility at 0 °C, mM/atm
    pub solubility_intercept: f64,
    /// solubility loss per degree, mM/(atm·°C)
    pub solubility_slope: f64,
}

impl GasExchange {
    pub fn new(kla_ratio: f64, solubility_intercept: f64, solubility_slope: f64) -> Self {
        Self {
            kla_ratio,
            solubility_intercept,
            solubility_slope,
        }
    }
    /// Henry-type solubility in mol/(m³·atm) at temperature `t` (°C).
    pub fn solubility(&self, t: f64) -> f64 {
        self.solubility_intercept - self.solubility_slope * t
    }
}

/// Species tables, physical constants and step resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConstants {
    /// tracked liquid-phase species, in inventory order
    pub species: Vec<String>,
    /// species exchanged with the gas phase
    pub gas_exchange: BTreeMap<String, GasExchange>,
    /// gas component -> {dissolved species -> volume fraction}. A component
    /// with an empty map is inert but still counts in the total flow.
    pub gas_components: BTreeMap<String, BTreeMap<String, f64>>,
    pub positively_charged: Vec<String>,
    pub negatively_charged: Vec<String>,
    /// dissolved CO2 species feeding the bicarbonate equilibrium
    pub co2_species: String,
    /// Δt, s
    pub time_step: f64,
    /// culture density for the hydrostatic head, kg/m³
    pub culture_density: f64,
    /// m/s²
    pub gravity: f64,
    /// liquid viscosity, Pa·s
    pub viscosity: f64,
    /// J/(m³·K)
    pub volumetric_heat_capacity: f64,
    /// °C
    pub ambient_temperature: f64,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        let species: Vec<String> = [
            "dO2",
            "dCO2",
            "glucose",
            "glutamine",
            "lactate",
            "ammonium",
            "sodium",
            "potassium",
            "chloride",
            "bicarbonate",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let gas_exchange = BTreeMap::from([
            ("dO2".to_string(), GasExchange::new(1.0, 1.58, 0.015)),
            ("dCO2".to_string(), GasExchange::new(0.89, 48.39, 0.61)),
        ]);

        let gas_components = BTreeMap::from([
            (
                "O2".to_string(),
                BTreeMap::from([("dO2".to_string(), 1.0)]),
            ),
            (
                "CO2".to_string(),
                BTreeMap::from([("dCO2".to_string(), 1.0)]),
            ),
            (
                "air".to_string(),
                BTreeMap::from([("dO2".to_string(), 0.21), ("dCO2".to_string(), 0.00045)]),
            ),
            ("N2".to_string(), BTreeMap::new()),
        ]);

        Self {
            species,
            gas_exchange,
            gas_components,
            positively_charged: vec![
                "ammonium".to_string(),
                "sodium".to_string(),
                "potassium".to_string(),
            ],
            negatively_charged: vec![
                "lactate".to_string(),
                "chloride".to_string(),
                "bicarbonate".to_string(),
            ],
            co2_species: "dCO2".to_string(),
            time_step: 60.0,
            culture_density: 1000.0,
            gravity: 9.81,
            viscosity: 0.001,
            volumetric_heat_capacity: 4.18e6,
            ambient_temperature: 25.0,
        }
    }
}

impl SimulationConstants {
    /// Checks that every table refers to tracked species and that the constants are usable.
    pub fn validate(&self) -> Result<(), ReactorError> {
        if !(self.time_step > 0.0) {
            return Err(ReactorError::InvalidConfiguration(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.volumetric_heat_capacity > 0.0) {
            return Err(ReactorError::InvalidConfiguration(
                "volumetric heat capacity must be positive".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.species {
            if !seen.insert(name.as_str()) {
                return Err(ReactorError::InvalidConfiguration(format!(
                    "species '{}' listed twice",
                    name
                )));
            }
        }
        let tracked = |name: &String, table: &str| -> Result<(), ReactorError> {
            if seen.contains(name.as_str()) {
                Ok(())
            } else {
                Err(ReactorError::InvalidConfiguration(format!(
                    "{} names '{}' which is not a tracked species",
                    table, name
                )))
            }
        };
        for name in self.gas_exchange.keys() {
            tracked(name, "gas exchange table")?;
        }
        for name in self.positively_charged.iter() {
            tracked(name, "positive charge table")?;
        }
        for name in self.negatively_charged.iter() {
            tracked(name, "negative charge table")?;
        }
        tracked(&self.co2_species, "co2_species")?;
        for (component, composition) in &self.gas_components {
            for name in composition.keys() {
                if !self.gas_exchange.contains_key(name) {
                    return Err(ReactorError::InvalidConfiguration(format!(
                        "gas component '{}' carries '{}' which has no gas exchange entry",
                        component, name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Impeller description as written in a task file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgitatorConfig {
    /// "rushton" or "marine"
    pub impeller_type: String,
    /// number of impellers on the shaft
    pub number: usize,
    /// cm
    pub diameter: f64,
    /// blade width, cm
    pub width: f64,
}

impl Default for AgitatorConfig {
    fn default() -> Self {
        Self {
            impeller_type: "rushton".to_string(),
            number: 1,
            diameter: 6.0,
            width: 2.0,
        }
    }
}

/// Vessel geometry. Assumed to be a perfect cylinder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselConfig {
    /// vessel capacity, L
    pub volume: f64,
    /// cm
    pub diameter: f64,
    /// height of the sparger above the vessel bottom, cm
    pub sparger_height: f64,
    /// µm
    pub sparger_pore_size: f64,
    /// mmHg
    pub head_pressure: f64,
    /// W/(m²·K)
    pub heat_transfer_coeff: f64,
    pub agitator: AgitatorConfig,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            volume: 3.0,
            diameter: 13.0,
            sparger_height: 2.0,
            sparger_pore_size: 20.0,
            head_pressure: 760.0,
            heat_transfer_coeff: 50.0,
            agitator: AgitatorConfig::default(),
        }
    }
}

/// State of the vessel at the start of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// s
    pub start_time: f64,
    /// L
    pub seed_volume: f64,
    /// °C
    pub temperature: f64,
    /// species -> mmol; species not listed start at zero
    pub composition: BTreeMap<String, f64>,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            seed_volume: 1.0,
            temperature: 37.0,
            composition: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    pub constants: SimulationConstants,
    pub vessel: VesselConfig,
    pub initial: InitialConditions,
}

impl ReactorConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ReactorError> {
        let config: ReactorConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReactorError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&content)?;
        info!("reactor configuration loaded from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ReactorError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
