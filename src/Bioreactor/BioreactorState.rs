//! # Bioreactor state
//!
//! Owns the molar inventory, working volume, temperature and clock of one
//! vessel and advances them by a fixed Δt per [`Bioreactor::step`].
//!
//! ## Step sequence
//! 1. reject commands naming unknown gas components or species (no state change)
//! 2. advance the clock
//! 3. refresh kLa, gas fractions and shear if the command changed or liquid is fed
//! 4. dissolved gases: exact relaxation towards C*·V; other species: Euler step
//! 5. working volume, then temperature
//! 6. osmolality, pH and the snapshot
//!
//! Amounts are kept in mol, volumes in m³, time in s; the public surface
//! speaks `uom` quantities.
use super::actuation::{ActuationCommand, CellState};
use super::agitator::Agitator;
use super::gas_phase::GasComposition;
use super::heat_balance::HeatBalance;
use super::kla_correlation::KlaCorrelation;
use super::molar_balance::{explicit_update, relaxation_update};
use super::molar_inventory::MolarInventory;
use super::ph_solver::PhSolver;
use super::reactor_config::{
    GasExchange, InitialConditions, ReactorConfig, SimulationConstants, VesselConfig,
};
use super::reactor_error::ReactorError;
use super::shear::Shear;
use super::snapshot::{Anomaly, EnvironmentSnapshot};
use super::units::{
    ATMOSPHERE_PA, AmountOfSubstance, Area, Frequency, Length, Pressure, Time, Volume, celsius,
    cm, liters, millimolar, millimoles, mmhg, pascals, per_second, seconds,
    si_frequency, si_length, si_molar_rate, si_pressure, si_time, si_volume,
};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Immutable vessel geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselGeometry {
    /// vessel capacity
    pub volume: Volume,
    pub diameter: Length,
    pub cross_section: Area,
    pub sparger_height: Length,
    pub sparger_pore_size: Length,
    /// head pressure plus the hydrostatic head at the sparger
    pub pressure: Pressure,
    /// W/(m²·K)
    pub heat_transfer_coeff: f64,
    pub agitator: Agitator,
}

impl VesselGeometry {
    pub fn from_config(
        config: &VesselConfig,
        constants: &SimulationConstants,
    ) -> Result<Self, ReactorError> {
        if !(config.volume > 0.0) || !(config.diameter > 0.0) {
            return Err(ReactorError::InvalidConfiguration(format!(
                "vessel volume ({} L) and diameter ({} cm) must be positive",
                config.volume, config.diameter
            )));
        }
        if config.sparger_height < 0.0 {
            return Err(ReactorError::InvalidConfiguration(
                "sparger height can not be negative".to_string(),
            ));
        }
        let agitator = Agitator::from_config(&config.agitator)?;
        let diameter = cm(config.diameter);
        let sparger_height = cm(config.sparger_height);
        let cross_section = diameter * diameter * (PI / 4.0);
        let hydrostatic = si_length(sparger_height) / 2.0 * constants.culture_density * constants.gravity;
        let pressure = pascals(hydrostatic) + mmhg(config.head_pressure);
        Ok(Self {
            volume: liters(config.volume),
            diameter,
            cross_section,
            sparger_height,
            sparger_pore_size: cm(config.sparger_pore_size * 1e-4),
            pressure,
            heat_transfer_coeff: config.heat_transfer_coeff,
            agitator,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ExchangedSpecies {
    index: usize,
    name: String,
    params: GasExchange,
}

#[derive(Debug, Clone, PartialEq)]
struct BalancedSpecies {
    index: usize,
    name: String,
}

/// A single well-mixed vessel.
///
/// Not internally synchronised: `step` takes `&mut self`, one caller at a time.
#[derive(Debug, Clone)]
pub struct Bioreactor {
    constants: SimulationConstants,
    geometry: VesselGeometry,
    kla_correlation: KlaCorrelation,
    gas_composition: GasComposition,
    ph_solver: PhSolver,
    heat_balance: HeatBalance,
    exchanged: Vec<ExchangedSpecies>,
    balanced: Vec<BalancedSpecies>,
    dt: Time,
    current_time: Time,
    working_volume: Volume,
    /// °C
    temperature: f64,
    inventory: MolarInventory,
    // transport cache
    kla: Frequency,
    gas_fractions: BTreeMap<String, f64>,
    shear: Shear,
    last_actuation: Option<ActuationCommand>,
    transport_refreshes: u64,
}

impl Bioreactor {
    pub fn new(
        constants: SimulationConstants,
        vessel: &VesselConfig,
        initial: &InitialConditions,
    ) -> Result<Self, ReactorError> {
        constants.validate()?;
        if !(initial.seed_volume > 0.0) {
            return Err(ReactorError::InvalidConfiguration(format!(
                "seed volume must be positive, got {} L",
                initial.seed_volume
            )));
        }
        let geometry = VesselGeometry::from_config(vessel, &constants)?;

        let composition: BTreeMap<String, AmountOfSubstance> = initial
            .composition
            .iter()
            .map(|(name, mmol)| (name.clone(), millimoles(*mmol)))
            .collect();
        let inventory = MolarInventory::new(&constants.species, &composition)?;

        let mut exchanged = Vec::new();
        let mut balanced = Vec::new();
        for (index, name) in inventory.names().iter().enumerate() {
            match constants.gas_exchange.get(name) {
                Some(params) => exchanged.push(ExchangedSpecies {
                    index,
                    name: name.clone(),
                    params: params.clone(),
                }),
                None => balanced.push(BalancedSpecies {
                    index,
                    name: name.clone(),
                }),
            }
        }

        let charges = inventory.indicator(&constants.positively_charged, 1.0)?
            - inventory.indicator(&constants.negatively_charged, 1.0)?;
        let co2_index = inventory
            .index_of(&constants.co2_species)
            .ok_or_else(|| ReactorError::UnknownSpecies(constants.co2_species.clone()))?;
        let ph_solver = PhSolver::new(charges, co2_index);

        let kla_correlation = KlaCorrelation::new(
            &geometry.agitator,
            geometry.diameter,
            constants.viscosity,
            constants.gravity,
        );
        let gas_composition = GasComposition::new(
            &constants.gas_components,
            constants.gas_exchange.keys().cloned().collect(),
        );
        let heat_balance = HeatBalance::new(
            geometry.heat_transfer_coeff,
            geometry.cross_section,
            geometry.volume,
            geometry.diameter,
            constants.volumetric_heat_capacity,
            constants.ambient_temperature,
        );

        info!(
            "bioreactor created: {} species ({} gas-exchanged), seed volume {} L, {} impeller x{}, UA = {:.3} W/K",
            inventory.len(),
            exchanged.len(),
            initial.seed_volume,
            geometry.agitator.impeller_type,
            geometry.agitator.number,
            heat_balance.overall_coeff
        );

        Ok(Self {
            dt: seconds(constants.time_step),
            current_time: seconds(initial.start_time),
            working_volume: liters(initial.seed_volume),
            temperature: initial.temperature,
            constants,
            geometry,
            kla_correlation,
            gas_composition,
            ph_solver,
            heat_balance,
            exchanged,
            balanced,
            inventory,
            kla: per_second(0.0),
            gas_fractions: BTreeMap::new(),
            shear: Shear::zero(),
            last_actuation: None,
            transport_refreshes: 0,
        })
    }

    pub fn from_config(config: &ReactorConfig) -> Result<Self, ReactorError> {
        Self::new(config.constants.clone(), &config.vessel, &config.initial)
    }

    /// Advances the vessel by one Δt under `actuation` and returns the new environment.
    ///
    /// Unknown species or gas components, and a liquid draw that would empty the
    /// vessel, are rejected before anything changes. A `PhUndefined` error is
    /// raised only after the clock, inventory, volume and temperature have been
    /// advanced, so the reactor has moved on even though the call returned `Err`.
    pub fn step(
        &mut self,
        actuation: &ActuationCommand,
        cells: &CellState,
    ) -> Result<EnvironmentSnapshot, ReactorError> {
        self.check_inputs(actuation, cells)?;
        self.current_time += self.dt;
        self.check_and_update(actuation)?;

        let dt = si_time(self.dt);
        let volume = si_volume(self.working_volume);
        let cell_volume_fraction = cells.total_cells * si_volume(cells.cell_volume) / volume;
        let mut anomalies = Vec::new();
        if cell_volume_fraction > 1.0 {
            warn!(
                "t = {} s: cells occupy {:.3} of the working volume, results are not physical",
                si_time(self.current_time),
                cell_volume_fraction
            );
            anomalies.push(Anomaly::OverloadedCulture {
                cell_volume_fraction,
            });
        }

        let kla = si_frequency(self.kla);
        for species in &self.exchanged {
            let c_star = self.saturation(species);
            let uptake = si_molar_rate(cells.transfer(&species.name));
            let moles = &mut self.inventory.vector_mut()[species.index];
            *moles = relaxation_update(
                *moles,
                kla * species.params.kla_ratio,
                dt,
                c_star * volume,
                uptake,
            );
        }
        for species in &self.balanced {
            let feed = actuation
                .species_feeds
                .get(&species.name)
                .map(|rate| si_molar_rate(*rate))
                .unwrap_or(0.0);
            let transfer = si_molar_rate(cells.transfer(&species.name));
            let moles = &mut self.inventory.vector_mut()[species.index];
            *moles = explicit_update(*moles, feed, transfer, dt);
        }

        self.working_volume += actuation.liquid_feed * self.dt;
        self.temperature += self.heat_balance.temperature_change(
            actuation.heat,
            self.temperature,
            self.working_volume,
            self.dt,
        );

        let volume = si_volume(self.working_volume);
        let osmolality = self.inventory.total() / (volume * (1.0 - cell_volume_fraction));
        let ph = self.ph_solver.solve(self.inventory.vector(), volume)?;

        let concentrations = self
            .inventory
            .names()
            .iter()
            .zip(self.inventory.vector().iter())
            .map(|(name, moles)| (name.clone(), millimolar(moles / volume)))
            .collect();

        Ok(EnvironmentSnapshot {
            time: self.current_time,
            mean_shear: self.shear.mean,
            max_shear: self.shear.max,
            working_volume: self.working_volume,
            osmolality: millimolar(osmolality),
            pH: ph,
            temperature: celsius(self.temperature),
            concentrations,
            kla: self.kla,
            cell_volume_fraction,
            anomalies,
        })
    }

    fn check_inputs(
        &self,
        actuation: &ActuationCommand,
        cells: &CellState,
    ) -> Result<(), ReactorError> {
        self.gas_composition.check_flows(&actuation.gas_flows)?;
        let change = si_volume(actuation.liquid_feed * self.dt);
        let volume = si_volume(self.working_volume);
        if !(volume + change > 0.0) {
            return Err(ReactorError::VolumeExhausted { volume, change });
        }
        for species in actuation
            .species_feeds
            .keys()
            .chain(cells.mass_transfer.keys())
        {
            if !self.inventory.contains(species) {
                return Err(ReactorError::UnknownSpecies(species.clone()));
            }
        }
        for species in &self.exchanged {
            if actuation.species_feeds.contains_key(&species.name) {
                debug!(
                    "direct feed of gas-exchanged species '{}' is ignored",
                    species.name
                );
            }
        }
        Ok(())
    }

    /// Recomputes kLa, gas fractions and shear unless the command is the one
    /// already applied and no liquid is being fed.
    fn check_and_update(&mut self, actuation: &ActuationCommand) -> Result<(), ReactorError> {
        let unchanged = self.last_actuation.as_ref() == Some(actuation)
            && !actuation.is_feeding_liquid();
        if unchanged {
            return Ok(());
        }
        self.kla = self.kla_correlation.compute(
            actuation.agitation,
            actuation.total_gas_flow(),
            self.working_volume,
        );
        self.gas_fractions = self.gas_composition.fractions(&actuation.gas_flows)?;
        self.shear = Shear::from_speed(
            &self.geometry.agitator,
            self.geometry.diameter,
            actuation.agitation,
        );
        self.last_actuation = Some(actuation.clone());
        self.transport_refreshes += 1;
        debug!(
            "transport refreshed: kLa = {:.4} 1/min, mean shear = {:.3} 1/s",
            si_frequency(self.kla) * 60.0,
            si_frequency(self.shear.mean)
        );
        Ok(())
    }

    pub fn current_time(&self) -> Time {
        self.current_time
    }

    pub fn time_step(&self) -> Time {
        self.dt
    }

    pub fn working_volume(&self) -> Volume {
        self.working_volume
    }

    /// °C
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn moles(&self, species: &str) -> Option<AmountOfSubstance> {
        self.inventory.get(species)
    }

    pub fn inventory(&self) -> &MolarInventory {
        &self.inventory
    }

    pub fn kla(&self) -> Frequency {
        self.kla
    }

    pub fn gas_fractions(&self) -> &BTreeMap<String, f64> {
        &self.gas_fractions
    }

    pub fn shear(&self) -> Shear {
        self.shear
    }

    /// how many times the transport cache was recomputed
    pub fn transport_refreshes(&self) -> u64 {
        self.transport_refreshes
    }

    pub fn geometry(&self) -> &VesselGeometry {
        &self.geometry
    }

    pub fn constants(&self) -> &SimulationConstants {
        &self.constants
    }

    pub fn kla_correlation(&self) -> &KlaCorrelation {
        &self.kla_correlation
    }

    pub fn heat_balance(&self) -> &HeatBalance {
        &self.heat_balance
    }

    /// pH of the current inventory
    pub fn ph(&self) -> Result<f64, ReactorError> {
        self.ph_solver
            .solve(self.inventory.vector(), si_volume(self.working_volume))
    }

    /// C*·V of a gas-exchanged species under the cached gas fractions, mol.
    pub fn saturation_moles(&self, species: &str) -> Option<f64> {
        let exchanged = self.exchanged.iter().find(|s| s.name == species)?;
        Some(self.saturation(exchanged) * si_volume(self.working_volume))
    }

    /// C* = fraction·P[atm]·solubility(T), mol/m³
    fn saturation(&self, species: &ExchangedSpecies) -> f64 {
        let fraction = self.gas_fractions.get(&species.name).copied().unwrap_or(0.0);
        let pressure_atm = si_pressure(self.geometry.pressure) / ATMOSPHERE_PA;
        fraction * pressure_atm * species.params.solubility(self.temperature)
    }
}
