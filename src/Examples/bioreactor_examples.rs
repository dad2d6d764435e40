use crate::Bioreactor::BioreactorState::Bioreactor;
use crate::Bioreactor::actuation::{ActuationCommand, CellState};
use crate::Bioreactor::reactor_config::ReactorConfig;
use crate::Bioreactor::units::*;
use log::{error, info};

pub fn bioreactor_examples(task: usize) {
    match task {
        0 => {
            // one step of the reference vessel: 1 L seed in a 3 L tank, air sparged at 0.5 L/min
            let mut config = ReactorConfig::default();
            config.initial.temperature = 30.0;
            config.initial.composition.insert("dO2".to_string(), 0.0);
            let mut reactor = match Bioreactor::from_config(&config) {
                Ok(reactor) => reactor,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            let command = ActuationCommand::new()
                .with_agitation(rev_per_second(3.0))
                .with_gas_flow("air", liters_per_minute(0.5));
            match reactor.step(&command, &CellState::default()) {
                Ok(snapshot) => snapshot.pretty_print(),
                Err(e) => error!("{}", e),
            }
        }
        1 => {
            // fed batch: cells eat glucose and oxygen, produce lactate and CO2, medium is fed
            let mut config = ReactorConfig::default();
            config.initial.composition = [
                ("glucose", 25.0),
                ("glutamine", 4.0),
                ("sodium", 120.0),
                ("potassium", 5.0),
                ("chloride", 100.0),
                ("bicarbonate", 24.0),
            ]
            .iter()
            .map(|(name, mmol)| (name.to_string(), *mmol))
            .collect();
            let mut reactor = match Bioreactor::from_config(&config) {
                Ok(reactor) => reactor,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            let cells = CellState::new(2e9, cubic_meters(2.5e-15), meters(17e-6))
                .with_transfer("dO2", millimoles_per_minute(5e-4))
                .with_transfer("dCO2", millimoles_per_minute(-5e-4))
                .with_transfer("glucose", millimoles_per_minute(-4e-3))
                .with_transfer("glutamine", millimoles_per_minute(-5e-4))
                .with_transfer("lactate", millimoles_per_minute(6e-3))
                .with_transfer("ammonium", millimoles_per_minute(4e-4));
            let command = ActuationCommand::new()
                .with_agitation(rev_per_second(2.5))
                .with_gas_flow("air", liters_per_minute(0.3))
                .with_gas_flow("O2", liters_per_minute(0.05))
                .with_liquid_feed(liters_per_minute(1e-4))
                .with_species_feed("glucose", millimoles_per_minute(2e-3))
                .with_heat(watts(75.0));
            // 24 h at one-minute resolution
            for step in 0..1440 {
                match reactor.step(&command, &cells) {
                    Ok(snapshot) => {
                        if step % 360 == 359 {
                            info!(
                                "t = {:.1} h, pH = {:.3}, T = {:.2} °C",
                                si_time(snapshot.time) / 3600.0,
                                snapshot.pH,
                                celsius_of(snapshot.temperature)
                            );
                            snapshot.pretty_print();
                        }
                    }
                    Err(e) => {
                        error!("step {} failed: {}", step, e);
                        return;
                    }
                }
            }
        }
        2 => {
            // write the default task file so it can be edited
            let path = "bioreactor_task.json";
            match ReactorConfig::default().to_file(path) {
                Ok(()) => println!("template written to {}", path),
                Err(e) => error!("{}", e),
            }
        }
        _ => {
            println!("Wrong task number");
        }
    }
}
