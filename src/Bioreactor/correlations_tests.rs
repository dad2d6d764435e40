#[cfg(test)]
mod tests {
    use crate::Bioreactor::agitator::{Agitator, ImpellerType};
    use crate::Bioreactor::gas_phase::GasComposition;
    use crate::Bioreactor::heat_balance::HeatBalance;
    use crate::Bioreactor::kla_correlation::KlaCorrelation;
    use crate::Bioreactor::molar_balance::{explicit_update, relaxation_update};
    use crate::Bioreactor::ph_solver::{PhSolver, hydrogen_ion, ka_bicarbonate, ph_from_charge};
    use crate::Bioreactor::reactor_config::SimulationConstants;
    use crate::Bioreactor::reactor_error::ReactorError;
    use crate::Bioreactor::shear::Shear;
    use crate::Bioreactor::units::*;
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use std::collections::BTreeMap;
    use std::f64::consts::PI;

    fn rushton() -> Agitator {
        Agitator::new(ImpellerType::Rushton, 1, cm(6.0), cm(2.0)).unwrap()
    }

    fn default_composition() -> GasComposition {
        let constants = SimulationConstants::default();
        GasComposition::new(
            &constants.gas_components,
            constants.gas_exchange.keys().cloned().collect(),
        )
    }

    #[test]
    fn test_power_numbers() {
        assert_eq!(ImpellerType::Rushton.power_number(), 5.5);
        assert_eq!(ImpellerType::Marine.power_number(), 2.2);
        assert_eq!(ImpellerType::from_name("Marine").unwrap(), ImpellerType::Marine);
    }

    #[test]
    fn test_unknown_impeller_is_configuration_error() {
        let result = ImpellerType::from_name("pitched_blade");
        assert!(matches!(result, Err(ReactorError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_ungassed_power() {
        let agitator = rushton();
        let coeff = 5.5 * 1000.0 * 0.06f64.powi(5);
        assert_relative_eq!(agitator.ungassed_power_coeff, coeff, epsilon = 1e-15);
        let power = si_power(agitator.ungassed_power(rev_per_second(3.0)));
        assert_relative_eq!(power, 27.0 * coeff, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_impellers_rejected() {
        let result = Agitator::new(ImpellerType::Marine, 0, cm(6.0), cm(2.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_kla_shape_constants() {
        let correlation = KlaCorrelation::new(&rushton(), cm(13.0), 0.001, 9.81);
        let r: f64 = 6.0 / 13.0;
        assert_relative_eq!(correlation.diameter_ratio, r, max_relative = 1e-12);
        assert_relative_eq!(correlation.A, 5.3 * (-5.4 * r).exp(), max_relative = 1e-12);
        assert_relative_eq!(correlation.B, 0.47 * r.powf(1.3), max_relative = 1e-12);
        assert_relative_eq!(correlation.C, 0.64 - 1.1 * r, max_relative = 1e-12);
        assert_relative_eq!(correlation.froude_coeff, 0.06 / 9.81, max_relative = 1e-12);
        assert_relative_eq!(
            correlation.cross_section,
            PI * 0.13 * 0.13 / 4.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_kla_matches_direct_evaluation() {
        let agitator = rushton();
        let correlation = KlaCorrelation::new(&agitator, cm(13.0), 0.001, 9.81);
        let n: f64 = 3.0;
        let q: f64 = 0.5e-3 / 60.0;
        let v: f64 = 1e-3;
        let r: f64 = 6.0 / 13.0;
        let (a, b, c) = (
            5.3 * (-5.4 * r).exp(),
            0.47 * r.powf(1.3),
            0.64 - 1.1 * r,
        );
        let froude = 0.06 / 9.81 * n * n;
        let aeration = q / (n * 0.06f64.powi(3));
        let p0 = n * n * n * agitator.ungassed_power_coeff;
        let lower = p0 * (1.0 - (b - a * 0.001) * froude.powf(0.25) * (c * aeration).tanh());
        let vs = q / (PI * 0.13 * 0.13 / 4.0);
        let expected = 1080.0 * (lower / v).powf(0.39) * vs.powf(0.79);

        let kla = correlation.compute(
            rev_per_second(n),
            liters_per_minute(0.5),
            liters(1.0),
        );
        // correlation result is per minute
        assert_relative_eq!(si_frequency(kla) * 60.0, expected, max_relative = 1e-9);
        assert!(expected > 1.0 && expected < 100.0);
    }

    #[test]
    fn test_upper_impeller_power_matches_direct_evaluation() {
        let twin = Agitator::new(ImpellerType::Rushton, 2, cm(6.0), cm(2.0)).unwrap();
        let correlation = KlaCorrelation::new(&twin, cm(13.0), 0.001, 9.81);
        let n: f64 = 3.0;
        let q: f64 = 0.5e-3 / 60.0;
        let v: f64 = 1e-3;
        let r: f64 = 6.0 / 13.0;
        let (a, b, c) = (
            5.3 * (-5.4 * r).exp(),
            0.47 * r.powf(1.3),
            0.64 - 1.1 * r,
        );
        let froude = 0.06 / 9.81 * n * n;
        let aeration = q / (n * 0.06f64.powi(3));
        let p0 = n * n * n * twin.ungassed_power_coeff;
        let lower = p0 * (1.0 - (b - a * 0.001) * froude.powf(0.25) * (c * aeration).tanh());
        let upper = (2.0 - 1.0) * p0 * (1.0 - (a + b * froude) * aeration.powf(c + 0.04 * froude));
        assert!(upper > 0.0 && upper < p0);

        let (lower_calc, upper_calc) =
            correlation.gassed_power(rev_per_second(n), liters_per_minute(0.5));
        assert_relative_eq!(lower_calc, lower, max_relative = 1e-12);
        assert_relative_eq!(upper_calc, upper, max_relative = 1e-12);

        let vs = q / (PI * 0.13 * 0.13 / 4.0);
        let expected = 1080.0 * ((lower + upper) / v).powf(0.39) * vs.powf(0.79);
        let kla = correlation.compute(rev_per_second(n), liters_per_minute(0.5), liters(1.0));
        assert_relative_eq!(si_frequency(kla) * 60.0, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_single_impeller_has_no_upper_power() {
        let correlation = KlaCorrelation::new(&rushton(), cm(13.0), 0.001, 9.81);
        let (lower, upper) = correlation.gassed_power(rev_per_second(3.0), liters_per_minute(0.5));
        assert!(lower > 0.0);
        assert_eq!(upper, 0.0);
    }

    #[test]
    fn test_second_impeller_adds_power() {
        let twin = Agitator::new(ImpellerType::Rushton, 2, cm(6.0), cm(2.0)).unwrap();
        let single = KlaCorrelation::new(&rushton(), cm(13.0), 0.001, 9.81);
        let double = KlaCorrelation::new(&twin, cm(13.0), 0.001, 9.81);
        let speed = rev_per_second(3.0);
        let flow = liters_per_minute(0.5);
        let kla_single = single.compute(speed, flow, liters(1.0));
        let kla_double = double.compute(speed, flow, liters(1.0));
        assert!(si_frequency(kla_double) > si_frequency(kla_single));
    }

    #[test]
    fn test_kla_without_gas_or_agitation_is_zero() {
        let correlation = KlaCorrelation::new(&rushton(), cm(13.0), 0.001, 9.81);
        let no_gas = correlation.compute(rev_per_second(3.0), liters_per_minute(0.0), liters(1.0));
        assert_eq!(si_frequency(no_gas), 0.0);
        let still = correlation.compute(rev_per_second(0.0), liters_per_minute(0.5), liters(1.0));
        assert_eq!(si_frequency(still), 0.0);
    }

    #[test]
    fn test_air_fractions() {
        let composition = default_composition();
        let flows = BTreeMap::from([("air".to_string(), liters_per_minute(0.5))]);
        let fractions = composition.fractions(&flows).unwrap();
        assert_relative_eq!(fractions["dO2"], 0.21, epsilon = 1e-15);
        assert_relative_eq!(fractions["dCO2"], 0.00045, epsilon = 1e-15);
    }

    #[test]
    fn test_nitrogen_dilutes_but_is_not_a_species() {
        let composition = default_composition();
        let flows = BTreeMap::from([
            ("O2".to_string(), liters_per_minute(1.0)),
            ("N2".to_string(), liters_per_minute(1.0)),
        ]);
        let fractions = composition.fractions(&flows).unwrap();
        assert_relative_eq!(fractions["dO2"], 0.5, epsilon = 1e-12);
        assert_eq!(fractions["dCO2"], 0.0);
        assert!(!fractions.contains_key("dN2"));
        assert!(!fractions.contains_key("N2"));
    }

    #[test]
    fn test_air_and_oxygen_fold_together() {
        let composition = default_composition();
        let flows = BTreeMap::from([
            ("O2".to_string(), liters_per_minute(0.1)),
            ("CO2".to_string(), liters_per_minute(0.1)),
            ("air".to_string(), liters_per_minute(0.8)),
        ]);
        let fractions = composition.fractions(&flows).unwrap();
        assert_relative_eq!(fractions["dO2"], 0.1 + 0.8 * 0.21, epsilon = 1e-12);
        assert_relative_eq!(fractions["dCO2"], 0.1 + 0.8 * 0.00045, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_total_flow_gives_zero_fractions() {
        let composition = default_composition();
        let flows = BTreeMap::from([("air".to_string(), liters_per_minute(0.0))]);
        let fractions = composition.fractions(&flows).unwrap();
        assert!(fractions.values().all(|f| *f == 0.0));
        let fractions = composition.fractions(&BTreeMap::new()).unwrap();
        assert_eq!(fractions.len(), 2);
        assert!(fractions.values().all(|f| *f == 0.0));
    }

    #[test]
    fn test_unknown_gas_component() {
        let composition = default_composition();
        let flows = BTreeMap::from([("argon".to_string(), liters_per_minute(0.1))]);
        let result = composition.fractions(&flows);
        assert!(matches!(result, Err(ReactorError::UnknownGasComponent(name)) if name == "argon"));
    }

    #[test]
    fn test_ph_pure_water() {
        let ph = ph_from_charge(0.0, 0.0).unwrap();
        assert_relative_eq!(ph, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ph_direction() {
        // dissolved CO2 acidifies, excess cations alkalinise
        assert!(ph_from_charge(0.0, 1e-3).unwrap() < 7.0);
        assert!(ph_from_charge(1e-3, 0.0).unwrap() > 7.0);
        assert!(ph_from_charge(-1e-3, 0.0).unwrap() < 7.0);
    }

    #[test]
    fn test_ph_bicarbonate_buffer() {
        // 24 mM bicarbonate against 1.2 mM CO2 sits close to Henderson-Hasselbalch
        let ph = ph_from_charge(0.024, 0.0012).unwrap();
        let henderson = -ka_bicarbonate().log10() + (0.024f64 / 0.0012).log10();
        assert_relative_eq!(ph, henderson, epsilon = 1e-3);
    }

    #[test]
    fn test_ph_large_cation_excess_stays_finite() {
        let h = hydrogen_ion(10.0, 0.0).unwrap();
        assert!(h > 0.0);
        assert_relative_eq!(h, 1e-15, max_relative = 1e-6);
    }

    #[test]
    fn test_ph_negative_discriminant_is_error() {
        // negative CO2 from aggressive uptake
        let result = ph_from_charge(0.0, -1.0);
        assert!(matches!(result, Err(ReactorError::PhUndefined { .. })));
    }

    #[test]
    fn test_ph_solver_net_charge() {
        // species: cation, anion, neutral, co2
        let solver = PhSolver::new(DVector::from_vec(vec![1.0, -1.0, 0.0, 0.0]), 3);
        let moles = DVector::from_vec(vec![0.002, 0.001, 5.0, 0.0]);
        // 1 L
        assert_relative_eq!(solver.net_charge(&moles, 1e-3), 0.001, epsilon = 1e-15);
        let balanced = DVector::from_vec(vec![0.001, 0.001, 5.0, 0.0]);
        assert_relative_eq!(solver.solve(&balanced, 1e-3).unwrap(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shear() {
        let agitator = rushton();
        let shear = Shear::from_speed(&agitator, cm(13.0), rev_per_second(3.0));
        let expected = 4.2 * 3.0 * (6.0f64 / 13.0).powf(0.3) * 6.0 / 2.0;
        assert_relative_eq!(si_frequency(shear.mean), expected, max_relative = 1e-12);
        assert_relative_eq!(
            si_frequency(shear.max),
            expected / 4.2 * 9.7,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_heat_balance() {
        let d = cm(13.0);
        let csa = d * d * (PI / 4.0);
        let balance = HeatBalance::new(50.0, csa, liters(3.0), d, 4.18e6, 25.0);
        let area = 2.0 * PI * 0.13 * 0.13 / 4.0 + 0.003 / (PI * 0.13 * 0.13 / 4.0) * PI * 0.13;
        assert_relative_eq!(balance.overall_coeff, 50.0 * area, max_relative = 1e-9);

        let dt = balance.temperature_change(watts(0.0), 30.0, liters(1.0), seconds(60.0));
        let expected = -5.0 * 50.0 * area * 60.0 / (1e-3 * 4.18e6);
        assert_relative_eq!(dt, expected, max_relative = 1e-9);
        assert!(dt < 0.0);
        // at ambient only the heater counts
        let dt = balance.temperature_change(watts(10.0), 25.0, liters(1.0), seconds(60.0));
        assert_relative_eq!(dt, 10.0 * 60.0 / (1e-3 * 4.18e6), max_relative = 1e-12);
    }

    #[test]
    fn test_relaxation_bound() {
        let saturation = 2.4e-4;
        let uptake = 1e-6;
        for kla in [1e2, 1e4, 1e6] {
            let n = relaxation_update(0.0, kla, 60.0, saturation, uptake);
            assert_relative_eq!(n, saturation - uptake / kla, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_relaxation_matches_formula() {
        let (n0, k, dt, sat, r): (f64, f64, f64, f64, f64) = (1e-4, 0.01, 60.0, 2.4e-4, 1e-7);
        let e = (-k * dt).exp();
        let expected = e * n0 + (1.0 - e) * (sat - r / k);
        assert_relative_eq!(
            relaxation_update(n0, k, dt, sat, r),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_relaxation_without_transfer() {
        assert_relative_eq!(
            relaxation_update(1e-4, 0.0, 60.0, 2.4e-4, 1e-7),
            1e-4 - 6e-6,
            max_relative = 1e-12
        );
        assert_eq!(relaxation_update(1e-4, 0.0, 60.0, 2.4e-4, 0.0), 1e-4);
    }

    #[test]
    fn test_explicit_update() {
        assert_eq!(explicit_update(1.0, 0.0, 0.0, 60.0), 1.0);
        assert_relative_eq!(explicit_update(1.0, 1e-3, -2e-3, 60.0), 0.94, epsilon = 1e-12);
    }
}
