//! Volumetric gas-liquid mass-transfer coefficient of an aerated stirred tank.
//!
//! The gassed power draw is split into the power of the lowest impeller, which
//! sees the sparged gas directly, and the power of the impellers above it:
//!
//! ```text
//! Fr = d·N²/g,  Fl = Q/(N·d³)
//! P_lower = P0·(1 - (B - A·μ)·Fr^0.25·tanh(C·Fl))
//! P_upper = (n - 1)·P0·(1 - (A + B·Fr)·Fl^(C + 0.04·Fr))
//! kLa     = 1080·((P_lower + P_upper)/V)^0.39·(Q/S)^0.79      [1/min]
//! ```
//! with `A = 5.3·exp(-5.4·d/D)`, `B = 0.47·(d/D)^1.3`, `C = 0.64 - 1.1·d/D`.
//! The numbers are those of the published fit and must not be tuned.
use super::agitator::Agitator;
use super::units::{
    Frequency, Length, Volume, VolumeRate, per_minute, si_flow, si_frequency, si_length,
    si_power, si_volume,
};
use std::f64::consts::PI;

/// Geometry constants of the correlation, computed once per vessel.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct KlaCorrelation {
    /// impeller diameter / vessel diameter
    pub diameter_ratio: f64,
    pub A: f64,
    pub B: f64,
    pub C: f64,
    /// d/g, s²
    pub froude_coeff: f64,
    /// vessel cross-section, m²
    pub cross_section: f64,
    /// liquid viscosity relative to 1 Pa·s
    pub viscosity_ratio: f64,
    agitator: Agitator,
}

impl KlaCorrelation {
    #[allow(non_snake_case)]
    pub fn new(agitator: &Agitator, vessel_diameter: Length, viscosity: f64, gravity: f64) -> Self {
        let d = si_length(agitator.diameter);
        let D = si_length(vessel_diameter);
        let diameter_ratio = d / D;
        Self {
            diameter_ratio,
            A: 5.3 * (-5.4 * diameter_ratio).exp(),
            B: 0.47 * diameter_ratio.powf(1.3),
            C: 0.64 - 1.1 * diameter_ratio,
            froude_coeff: d / gravity,
            cross_section: PI * D.powi(2) / 4.0,
            viscosity_ratio: viscosity,
            agitator: agitator.clone(),
        }
    }

    pub fn froude(&self, speed: Frequency) -> f64 {
        self.froude_coeff * si_frequency(speed).powi(2)
    }

    pub fn aeration(&self, speed: Frequency, gas_flow: VolumeRate) -> f64 {
        si_flow(gas_flow) / (si_frequency(speed) * si_length(self.agitator.diameter).powi(3))
    }

    /// (lower, upper) gassed power in W. A still shaft draws no power.
    pub fn gassed_power(&self, speed: Frequency, gas_flow: VolumeRate) -> (f64, f64) {
        if !(si_frequency(speed) > 0.0) {
            return (0.0, 0.0);
        }
        let froude = self.froude(speed);
        let aeration = self.aeration(speed, gas_flow);
        let ungassed = si_power(self.agitator.ungassed_power(speed));
        let lower = ungassed
            * (1.0
                - (self.B - self.A * self.viscosity_ratio)
                    * froude.powf(0.25)
                    * (self.C * aeration).tanh());
        let upper = (self.agitator.number as f64 - 1.0)
            * ungassed
            * (1.0 - (self.A + self.B * froude) * aeration.powf(self.C + 0.04 * froude));
        (lower, upper)
    }

    pub fn superficial_velocity(&self, gas_flow: VolumeRate) -> f64 {
        si_flow(gas_flow) / self.cross_section
    }

    pub fn compute(
        &self,
        speed: Frequency,
        gas_flow: VolumeRate,
        working_volume: Volume,
    ) -> Frequency {
        let (lower, upper) = self.gassed_power(speed, gas_flow);
        let power_per_volume = (lower + upper) / si_volume(working_volume);
        let kla = 1080.0
            * power_per_volume.powf(0.39)
            * self.superficial_velocity(gas_flow).powf(0.79);
        per_minute(kla)
    }
}
