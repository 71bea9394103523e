//! # vax-sim
//!
//! Synthetic time-to-infection data for vaccine-efficacy studies.
//!
//! A cohort is followed day by day under a hazard built from a background
//! rate, a Gaussian epidemic surge and waning vaccine protection. Each
//! individual's survival curve is compared with a seeded "bad luck" draw to
//! give an event day or a right-censoring at the end of follow-up. The result
//! is a flat table ready for Cox-type survival analysis.
//!
//! ```no_run
//! use vax_sim::{SimulationParameters, engine};
//!
//! # fn main() -> vax_sim::Result<()> {
//! let cohort = engine(&SimulationParameters::default())?;
//! let dataset = cohort.to_dataframe()?;
//! println!("{dataset}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hazard;
pub mod logging;
pub mod params;
pub mod pq;
pub mod sim;
pub mod tx;

pub use error::{Result, SimError};
pub use params::{RISK_THRESHOLD_SEED, SimulationParameters, VACCINATION_SEED};
pub use sim::{Cohort, engine};
