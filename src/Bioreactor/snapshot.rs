use super::units::{
    Frequency, MolarConcentration, ThermodynamicTemperature, Time, Volume, celsius_of, si_concentration,
    si_frequency, si_time, si_volume,
};
use prettytable::{Cell, Row, Table};
use std::collections::BTreeMap;
use std::fmt;

/// Non-fatal conditions detected during a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// cells occupy more than the working volume; results are physically invalid
    OverloadedCulture { cell_volume_fraction: f64 },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::OverloadedCulture {
                cell_volume_fraction,
            } => write!(
                f,
                "overloaded culture: cell volume fraction {:.3}",
                cell_volume_fraction
            ),
        }
    }
}

/// Environment inside the vessel at the end of a step.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSnapshot {
    pub time: Time,
    pub mean_shear: Frequency,
    pub max_shear: Frequency,
    pub working_volume: Volume,
    pub osmolality: MolarConcentration,
    pub pH: f64,
    pub temperature: ThermodynamicTemperature,
    pub concentrations: BTreeMap<String, MolarConcentration>,
    /// oxygen kLa used in the step
    pub kla: Frequency,
    pub cell_volume_fraction: f64,
    pub anomalies: Vec<Anomaly>,
}

impl EnvironmentSnapshot {
    pub fn concentration(&self, species: &str) -> Option<MolarConcentration> {
        self.concentrations.get(species).copied()
    }

    pub fn is_anomalous(&self) -> bool {
        !self.anomalies.is_empty()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("quantity"),
            Cell::new("value"),
            Cell::new("unit"),
        ]));
        let mut push = |name: &str, value: f64, unit: &str| {
            table.add_row(Row::new(vec![
                Cell::new(name),
                Cell::new(&format!("{:.6e}", value)),
                Cell::new(unit),
            ]));
        };
        push("time", si_time(self.time), "s");
        push("working volume", si_volume(self.working_volume) * 1000.0, "L");
        push("temperature", celsius_of(self.temperature), "°C");
        push("pH", self.pH, "-");
        push("osmolality", si_concentration(self.osmolality), "mOsm/L");
        push("mean shear", si_frequency(self.mean_shear), "1/s");
        push("max shear", si_frequency(self.max_shear), "1/s");
        push("kLa", si_frequency(self.kla) * 60.0, "1/min");
        push("cell volume fraction", self.cell_volume_fraction, "-");
        for (species, concentration) in &self.concentrations {
            push(species, si_concentration(*concentration), "mM");
        }
        for anomaly in &self.anomalies {
            table.add_row(Row::new(vec![
                Cell::new("anomaly"),
                Cell::new(&anomaly.to_string()),
                Cell::new(""),
            ]));
        }
        table
    }

    pub fn pretty_print(&self) {
        self.to_table().printstd();
    }
}
