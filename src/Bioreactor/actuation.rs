use super::units::{
    Frequency, Length, MolarRate, Power, Volume, VolumeRate, cubic_meters, cubic_meters_per_second,
    meters, moles_per_second, rev_per_second, si_flow, watts,
};
use std::collections::BTreeMap;

/// Actuator outputs applied during one step. Compared by value for the
/// transport cache, so two commands built independently with the same
/// numbers are the same command.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuationCommand {
    /// gas component -> volumetric flow
    pub gas_flows: BTreeMap<String, VolumeRate>,
    /// net liquid addition (feed minus harvest)
    pub liquid_feed: VolumeRate,
    /// agitation speed, rev/s
    pub agitation: Frequency,
    /// heater power
    pub heat: Power,
    /// species -> direct feed rate
    pub species_feeds: BTreeMap<String, MolarRate>,
}

impl Default for ActuationCommand {
    fn default() -> Self {
        Self {
            gas_flows: BTreeMap::new(),
            liquid_feed: cubic_meters_per_second(0.0),
            agitation: rev_per_second(0.0),
            heat: watts(0.0),
            species_feeds: BTreeMap::new(),
        }
    }
}

impl ActuationCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gas_flow(mut self, component: &str, flow: VolumeRate) -> Self {
        self.gas_flows.insert(component.to_string(), flow);
        self
    }

    pub fn with_liquid_feed(mut self, flow: VolumeRate) -> Self {
        self.liquid_feed = flow;
        self
    }

    pub fn with_agitation(mut self, speed: Frequency) -> Self {
        self.agitation = speed;
        self
    }

    pub fn with_heat(mut self, heat: Power) -> Self {
        self.heat = heat;
        self
    }

    pub fn with_species_feed(mut self, species: &str, rate: MolarRate) -> Self {
        self.species_feeds.insert(species.to_string(), rate);
        self
    }

    pub fn total_gas_flow(&self) -> VolumeRate {
        self.gas_flows
            .values()
            .fold(cubic_meters_per_second(0.0), |total, flow| total + *flow)
    }

    pub fn is_feeding_liquid(&self) -> bool {
        si_flow(self.liquid_feed) != 0.0
    }
}

/// Culture state as seen by the vessel, supplied by the cell model.
#[derive(Debug, Clone, PartialEq)]
pub struct CellState {
    pub total_cells: f64,
    pub cell_volume: Volume,
    pub cell_diameter: Length,
    /// species -> net transfer rate. For dissolved gases a positive value is
    /// consumption; for the other species it is production. Missing species
    /// transfer nothing.
    pub mass_transfer: BTreeMap<String, MolarRate>,
}

impl Default for CellState {
    fn default() -> Self {
        Self {
            total_cells: 0.0,
            cell_volume: cubic_meters(0.0),
            cell_diameter: meters(0.0),
            mass_transfer: BTreeMap::new(),
        }
    }
}

impl CellState {
    pub fn new(total_cells: f64, cell_volume: Volume, cell_diameter: Length) -> Self {
        Self {
            total_cells,
            cell_volume,
            cell_diameter,
            mass_transfer: BTreeMap::new(),
        }
    }

    pub fn with_transfer(mut self, species: &str, rate: MolarRate) -> Self {
        self.mass_transfer.insert(species.to_string(), rate);
        self
    }

    pub fn transfer(&self, species: &str) -> MolarRate {
        self.mass_transfer
            .get(species)
            .copied()
            .unwrap_or_else(|| moles_per_second(0.0))
    }
}
