//! The core lifecycle and capital-allocation engine for simulating a mining
//! investment product: an investor buys licences, each licence hosts a capped
//! number of mining cards, cards mine until they've earned back their cost
//! plus a profit margin, and licences expire after a fixed window.
//!
//! The simulation advances one day at a time, reinvesting what was mined into
//! new licences and cards.
//!
//! ```rust
//! use mining_sim::{
//!     models::{
//!         package::{LicencePackage, LicenceTier},
//!         user::User,
//!     },
//!     system::{
//!         pricing::{MiningParameters, PricingInputs},
//!         simulator::{SimulationConfig, Simulator},
//!     },
//! };
//!
//! let params = MiningParameters::derive(&PricingInputs::default()).unwrap();
//! let (licence, _price) = LicencePackage::configure(LicenceTier::Prime, &params)
//!     .with_card_count(14).unwrap()
//!     .build().unwrap();
//! let mut user = User::new(params, 0).unwrap();
//! user.add_licence(licence);
//!
//! let config = SimulationConfig::builder().days(30u32).build().unwrap();
//! let report = Simulator::new(config).run(&mut user).unwrap();
//! assert_eq!(report.days().len(), 30);
//! assert!(report.final_balance() >= &mining_sim::Decimal::from(0));
//! ```

#[macro_use]
pub mod util;
pub mod error;
pub mod models;
pub mod system;

pub use rust_decimal::Decimal;
