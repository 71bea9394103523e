//! Simulation parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::hazard::{epidemic_multiplier, vaccine_protection};

/// Seed of the stream that draws each individual's vaccination age at enrolment.
pub const VACCINATION_SEED: u64 = 123;

/// Seed of the stream that draws each individual's risk threshold ("bad luck").
pub const RISK_THRESHOLD_SEED: u64 = 234;

/// Immutable configuration of one synthetic cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Population size.
    pub n: usize,
    /// Follow-up horizon in days.
    pub tf: usize,
    /// Background hazard per day.
    pub lambda0: f64,
    /// Vaccine efficacy, i.e. protection at vaccine age zero.
    pub alpha: f64,
    /// Waning time constant of the vaccine effect (days).
    pub tau: f64,
    /// Relative increase in risk at the epidemic peak.
    pub beta: f64,
    /// Day of the epidemic peak.
    pub te: f64,
    /// Width of the epidemic bump (days).
    pub sigma_e: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            n: 100,
            tf: 200,
            lambda0: 0.005,
            alpha: 0.7,
            tau: 100.0,
            beta: 0.0,
            te: 100.0,
            sigma_e: 50.0,
        }
    }
}

impl SimulationParameters {
    /// Reject parameter sets the hazard model is not defined on, before any
    /// sampling happens.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(SimError::invalid("n", "population size must be positive"));
        }
        if self.tf == 0 {
            return Err(SimError::invalid("tf", "follow-up horizon must be positive"));
        }

        for (name, value) in [
            ("lambda0", self.lambda0),
            ("alpha", self.alpha),
            ("tau", self.tau),
            ("beta", self.beta),
            ("te", self.te),
            ("sigma_e", self.sigma_e),
        ] {
            if !value.is_finite() {
                return Err(SimError::invalid(name, format!("must be finite, got {value}")));
            }
        }

        if self.lambda0 < 0.0 {
            return Err(SimError::invalid(
                "lambda0",
                format!("background hazard must be non-negative, got {}", self.lambda0),
            ));
        }
        if self.tau <= 0.0 {
            return Err(SimError::invalid(
                "tau",
                format!("waning time constant must be positive, got {}", self.tau),
            ));
        }
        if self.sigma_e.powi(2) == 0.0 {
            return Err(SimError::invalid(
                "sigma_e",
                format!("epidemic width must be non-zero, got {}", self.sigma_e),
            ));
        }

        self.check_hazard_sign()
    }

    /// Both hazard factors must stay finite and non-negative on the whole
    /// timeline, or the survival curves stop being monotone.
    fn check_hazard_sign(&self) -> Result<()> {
        for day in 1..=self.tf {
            let m = epidemic_multiplier(day as f64, self.beta, self.te, self.sigma_e);
            if !(m >= 0.0) || !(m * self.lambda0).is_finite() {
                return Err(SimError::DegenerateHazard(format!(
                    "epidemic multiplier is {m} on day {day} (beta = {}, te = {}, sigma_e = {})",
                    self.beta, self.te, self.sigma_e
                )));
            }
        }

        // Effective vaccine age is at least one day (day 1, age at start 0),
        // which is where protection is smallest for a positive alpha.
        let weakest = vaccine_protection(1.0, 0.0, self.alpha, self.tau);
        if !(weakest >= 0.0) || !weakest.is_finite() {
            return Err(SimError::DegenerateHazard(format!(
                "vaccine protection reaches {weakest:.4} (alpha = {}, tau = {})",
                self.alpha, self.tau
            )));
        }

        Ok(())
    }
}
