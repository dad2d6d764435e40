use super::agitator::Agitator;
use super::units::{Frequency, Length, per_second, si_frequency, si_length};

/// Mean to maximum shear scaling of a turbine impeller.
const MEAN_SHEAR_FACTOR: f64 = 4.2;
const MAX_SHEAR_FACTOR: f64 = 9.7;

/// Shear rates produced by the impeller.
///
/// R. Bowen, Unraveling the mysteries of shear-sensitive mixing systems,
/// Chem. Eng. 9 (June) (1986) 55–63.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shear {
    pub mean: Frequency,
    pub max: Frequency,
}

impl Shear {
    pub fn zero() -> Self {
        Self {
            mean: per_second(0.0),
            max: per_second(0.0),
        }
    }

    pub fn from_speed(agitator: &Agitator, vessel_diameter: Length, speed: Frequency) -> Self {
        let d = si_length(agitator.diameter);
        let ratio = (d / si_length(vessel_diameter)).powf(0.3);
        let mean = MEAN_SHEAR_FACTOR * si_frequency(speed) * ratio * d / si_length(agitator.width);
        Self {
            mean: per_second(mean),
            max: per_second(mean / MEAN_SHEAR_FACTOR * MAX_SHEAR_FACTOR),
        }
    }
}
