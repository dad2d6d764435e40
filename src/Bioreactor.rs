//! # Stirred-tank bioreactor environment
//!
//! Converts per-step actuator commands (gas flows, liquid feed, agitation,
//! heater power, direct species feeds) into the physical and chemical
//! environment a cell culture experiences. The vessel is a single well-mixed
//! volume.
//!
//! ## Model
//!
//! | Part | Relation |
//! |------|----------|
//! | power draw | `P0 = Np·ρ·N³·d⁵`, Np = 5.5 (rushton), 2.2 (marine) |
//! | mass transfer | `kLa = 1080·(Pg/V)^0.39·vs^0.79` [1/min] |
//! | dissolved gases | `n' = e^(-kLa·Δt)·n + (1 - e^(-kLa·Δt))·(C*·V - r/kLa)` |
//! | saturation | `C* = y·P·H(T)`, `H_O2 = 1.58 - 0.015·T`, `H_CO2 = 48.39 - 0.61·T` [mM/atm] |
//! | other species | `n' = n + (feed + r)·Δt` |
//! | heat | `ΔT = (Q + UA·(T_amb - T))·Δt/(V·c_v)` |
//! | pH | `[H+] = -n/2 + sqrt((n/2)² + Kw + Ka'·[CO2])` |
//! | shear | `γ = 4.2·N·(d/D)^0.3·d/w`, `γ_max = γ/4.2·9.7` |
//!
//! ## Usage
//! ```rust,no_run
//! use BioReactorSim::Bioreactor::BioreactorState::Bioreactor;
//! use BioReactorSim::Bioreactor::actuation::{ActuationCommand, CellState};
//! use BioReactorSim::Bioreactor::reactor_config::ReactorConfig;
//! use BioReactorSim::Bioreactor::units::{liters_per_minute, rev_per_second};
//!
//! let mut reactor = Bioreactor::from_config(&ReactorConfig::default()).unwrap();
//! let command = ActuationCommand::new()
//!     .with_agitation(rev_per_second(3.0))
//!     .with_gas_flow("air", liters_per_minute(0.5));
//! let snapshot = reactor.step(&command, &CellState::default()).unwrap();
//! snapshot.pretty_print();
//! ```
pub mod BioreactorState;
pub mod actuation;
pub mod agitator;
pub mod gas_phase;
pub mod heat_balance;
pub mod kla_correlation;
pub mod molar_balance;
pub mod molar_inventory;
pub mod ph_solver;
pub mod reactor_config;
pub mod reactor_error;
pub mod shear;
pub mod snapshot;
pub mod units;
mod correlations_tests;
