use super::units::{Area, Length, Power, Time, Volume, si_area, si_length, si_power, si_time, si_volume};
use std::f64::consts::PI;

/// Lumped heat exchange of the vessel with its surroundings.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatBalance {
    /// overall heat-transfer coefficient × external area, W/K
    pub overall_coeff: f64,
    /// J/(m³·K)
    pub volumetric_heat_capacity: f64,
    /// °C
    pub ambient_temperature: f64,
}

impl HeatBalance {
    /// `heat_transfer_coeff` in W/(m²·K); the external area is both end caps
    /// plus the side wall of a cylinder holding `vessel_volume`.
    pub fn new(
        heat_transfer_coeff: f64,
        cross_section: Area,
        vessel_volume: Volume,
        vessel_diameter: Length,
        volumetric_heat_capacity: f64,
        ambient_temperature: f64,
    ) -> Self {
        let csa = si_area(cross_section);
        let height = si_volume(vessel_volume) / csa;
        let area = 2.0 * csa + height * PI * si_length(vessel_diameter);
        Self {
            overall_coeff: heat_transfer_coeff * area,
            volumetric_heat_capacity,
            ambient_temperature,
        }
    }

    /// Net heat flow into the liquid, W.
    pub fn heat_in(&self, heater: Power, temperature: f64) -> f64 {
        si_power(heater) + (self.ambient_temperature - temperature) * self.overall_coeff
    }

    /// Temperature change over `dt`, K.
    pub fn temperature_change(
        &self,
        heater: Power,
        temperature: f64,
        working_volume: Volume,
        dt: Time,
    ) -> f64 {
        self.heat_in(heater, temperature) * si_time(dt)
            / (si_volume(working_volume) * self.volumetric_heat_capacity)
    }
}
