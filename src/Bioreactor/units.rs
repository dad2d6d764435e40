//! Physical quantities used across the bioreactor model.
//!
//! All dimensional values go through `uom`, so that adding a volume to a flow
//! rate or a power to a temperature does not compile. The empirical
//! correlations (kLa, shear) work on plain SI numbers extracted with `get`,
//! because fractional exponents have no dimension-safe form.
pub use uom::si::f64::{
    AmountOfSubstance, Area, CatalyticActivity, Frequency, Length, MolarConcentration, Power,
    Pressure, ThermodynamicTemperature, Time, Volume, VolumeRate,
};

use uom::si::amount_of_substance::{millimole, mole};
use uom::si::area::square_meter;
use uom::si::catalytic_activity::katal;
use uom::si::frequency::hertz;
use uom::si::length::{centimeter, meter};
use uom::si::molar_concentration::mole_per_cubic_meter;
use uom::si::power::watt;
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::degree_celsius;
use uom::si::time::second;
use uom::si::volume::{cubic_meter, liter};
use uom::si::volume_rate::{cubic_meter_per_second, liter_per_minute};

/// Amount of substance per unit time (mol/s). Used for cell uptake/production
/// and direct species feeds.
pub type MolarRate = CatalyticActivity;

/// 1 atm in Pa
pub const ATMOSPHERE_PA: f64 = 101_325.0;
/// 1 mmHg in Pa
pub const MMHG_PA: f64 = 133.322_387_415;

pub fn cm(value: f64) -> Length {
    Length::new::<centimeter>(value)
}

pub fn meters(value: f64) -> Length {
    Length::new::<meter>(value)
}

pub fn liters(value: f64) -> Volume {
    Volume::new::<liter>(value)
}

pub fn cubic_meters(value: f64) -> Volume {
    Volume::new::<cubic_meter>(value)
}

pub fn liters_per_minute(value: f64) -> VolumeRate {
    VolumeRate::new::<liter_per_minute>(value)
}

pub fn cubic_meters_per_second(value: f64) -> VolumeRate {
    VolumeRate::new::<cubic_meter_per_second>(value)
}

/// Agitation speed in revolutions per second.
pub fn rev_per_second(value: f64) -> Frequency {
    Frequency::new::<hertz>(value)
}

pub fn per_minute(value: f64) -> Frequency {
    Frequency::new::<hertz>(value / 60.0)
}

pub fn per_second(value: f64) -> Frequency {
    Frequency::new::<hertz>(value)
}

pub fn watts(value: f64) -> Power {
    Power::new::<watt>(value)
}

pub fn pascals(value: f64) -> Pressure {
    Pressure::new::<pascal>(value)
}

pub fn mmhg(value: f64) -> Pressure {
    Pressure::new::<pascal>(value * MMHG_PA)
}

pub fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}

pub fn millimoles(value: f64) -> AmountOfSubstance {
    AmountOfSubstance::new::<millimole>(value)
}

pub fn moles(value: f64) -> AmountOfSubstance {
    AmountOfSubstance::new::<mole>(value)
}

/// Molar rate given in mmol/min.
pub fn millimoles_per_minute(value: f64) -> MolarRate {
    MolarRate::new::<katal>(value * 1e-3 / 60.0)
}

pub fn moles_per_second(value: f64) -> MolarRate {
    MolarRate::new::<katal>(value)
}

pub fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

/// mol/m³, numerically equal to mmol/L
pub fn millimolar(value: f64) -> MolarConcentration {
    MolarConcentration::new::<mole_per_cubic_meter>(value)
}

// SI extraction helpers used by the correlations

pub fn si_length(value: Length) -> f64 {
    value.get::<meter>()
}

pub fn si_volume(value: Volume) -> f64 {
    value.get::<cubic_meter>()
}

pub fn si_flow(value: VolumeRate) -> f64 {
    value.get::<cubic_meter_per_second>()
}

pub fn si_frequency(value: Frequency) -> f64 {
    value.get::<hertz>()
}

pub fn si_power(value: Power) -> f64 {
    value.get::<watt>()
}

pub fn si_time(value: Time) -> f64 {
    value.get::<second>()
}

pub fn si_amount(value: AmountOfSubstance) -> f64 {
    value.get::<mole>()
}

pub fn si_molar_rate(value: MolarRate) -> f64 {
    value.get::<katal>()
}

pub fn si_pressure(value: Pressure) -> f64 {
    value.get::<pascal>()
}

pub fn si_concentration(value: MolarConcentration) -> f64 {
    value.get::<mole_per_cubic_meter>()
}

pub fn si_area(value: Area) -> f64 {
    value.get::<square_meter>()
}

pub fn celsius_of(value: ThermodynamicTemperature) -> f64 {
    value.get::<degree_celsius>()
}
