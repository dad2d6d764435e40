//! Charge-balance pH of the culture medium.
//!
//! Strong ions are lumped into a net charge concentration `n` (mol/L). With
//! water autoprotolysis and the first dissociation of carbonic acid the
//! electroneutrality condition becomes a quadratic in [H+]:
//!
//! ```text
//! [H+]² + n·[H+] - (Kw + Ka'·[CO2]) = 0
//! [H+]  = -n/2 + sqrt((n/2)² + Kw + Ka'·[CO2])
//! ```
//! with `pKa = 6.36` and the activity correction 1.0017 on `Ka`.
use super::reactor_error::ReactorError;
use nalgebra::DVector;

/// Ion product of water, (mol/L)²
pub const KW: f64 = 1e-14;

/// Apparent first dissociation constant of carbonic acid, mol/L
pub fn ka_bicarbonate() -> f64 {
    10f64.powf(-6.36) * 1.0017
}

/// Hydrogen-ion concentration (mol/L) for net strong-ion charge `net_charge`
/// and dissolved CO2 `co2` (both mol/L).
pub fn hydrogen_ion(net_charge: f64, co2: f64) -> Result<f64, ReactorError> {
    let half = net_charge / 2.0;
    let k = KW + ka_bicarbonate() * co2;
    let discriminant = half * half + k;
    if !(discriminant >= 0.0) {
        return Err(ReactorError::PhUndefined {
            discriminant,
            hydrogen: f64::NAN,
        });
    }
    let root = discriminant.sqrt();
    // for an excess of cations -half + root cancels; k/(half + root) is the same root
    let hydrogen = if half > 0.0 { k / (half + root) } else { root - half };
    if !(hydrogen > 0.0) {
        return Err(ReactorError::PhUndefined {
            discriminant,
            hydrogen,
        });
    }
    Ok(hydrogen)
}

pub fn ph_from_charge(net_charge: f64, co2: f64) -> Result<f64, ReactorError> {
    Ok(-hydrogen_ion(net_charge, co2)?.log10())
}

/// Precomputed charge classification of the inventory species.
#[derive(Debug, Clone, PartialEq)]
pub struct PhSolver {
    /// +1 for cations, -1 for anions, 0 otherwise, in inventory order
    charges: DVector<f64>,
    co2_index: usize,
}

impl PhSolver {
    pub fn new(charges: DVector<f64>, co2_index: usize) -> Self {
        Self { charges, co2_index }
    }

    /// Net strong-ion charge in mol/L for `moles` (mol) in `volume_m3`.
    pub fn net_charge(&self, moles: &DVector<f64>, volume_m3: f64) -> f64 {
        self.charges.dot(moles) / volume_m3 / 1000.0
    }

    pub fn solve(&self, moles: &DVector<f64>, volume_m3: f64) -> Result<f64, ReactorError> {
        let net_charge = self.net_charge(moles, volume_m3);
        let co2 = moles[self.co2_index] / volume_m3 / 1000.0;
        ph_from_charge(net_charge, co2)
    }
}
