use super::reactor_config::AgitatorConfig;
use super::reactor_error::ReactorError;
use super::units::{Frequency, Length, Power, cm, si_frequency, si_length, watts};
use std::fmt;

/// Liquid density used for the ungassed power draw, kg/m³
pub const REFERENCE_LIQUID_DENSITY: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpellerType {
    Rushton,
    Marine,
}

impl ImpellerType {
    pub fn from_name(name: &str) -> Result<Self, ReactorError> {
        match name.trim().to_lowercase().as_str() {
            "rushton" => Ok(ImpellerType::Rushton),
            "marine" => Ok(ImpellerType::Marine),
            _ => Err(ReactorError::InvalidConfiguration(format!(
                "impeller '{}' not recognized",
                name
            ))),
        }
    }

    pub fn power_number(&self) -> f64 {
        match self {
            ImpellerType::Rushton => 5.5,
            ImpellerType::Marine => 2.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpellerType::Rushton => "rushton",
            ImpellerType::Marine => "marine",
        }
    }
}

impl fmt::Display for ImpellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Impeller geometry and power-draw model. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Agitator {
    pub impeller_type: ImpellerType,
    /// number of impellers on the shaft
    pub number: usize,
    pub diameter: Length,
    pub width: Length,
    pub power_number: f64,
    /// Np·ρ·d⁵, in W·s³
    pub ungassed_power_coeff: f64,
}

impl Agitator {
    pub fn new(
        impeller_type: ImpellerType,
        number: usize,
        diameter: Length,
        width: Length,
    ) -> Result<Self, ReactorError> {
        if !(si_length(diameter) > 0.0) || !(si_length(width) > 0.0) {
            return Err(ReactorError::InvalidConfiguration(
                "impeller diameter and width must be positive".to_string(),
            ));
        }
        if number == 0 {
            return Err(ReactorError::InvalidConfiguration(
                "at least one impeller is required".to_string(),
            ));
        }
        let power_number = impeller_type.power_number();
        let ungassed_power_coeff =
            power_number * REFERENCE_LIQUID_DENSITY * si_length(diameter).powi(5);
        Ok(Self {
            impeller_type,
            number,
            diameter,
            width,
            power_number,
            ungassed_power_coeff,
        })
    }

    pub fn from_config(config: &AgitatorConfig) -> Result<Self, ReactorError> {
        let impeller_type = ImpellerType::from_name(&config.impeller_type)?;
        Self::new(
            impeller_type,
            config.number,
            cm(config.diameter),
            cm(config.width),
        )
    }

    /// Power drawn by one impeller in ungassed liquid at `speed` rev/s.
    pub fn ungassed_power(&self, speed: Frequency) -> Power {
        watts(si_frequency(speed).powi(3) * self.ungassed_power_coeff)
    }
}
