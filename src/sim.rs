// Simulation Module
use std::time::Instant;

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::hazard::{hazard_surface, survival_curves, timeline};
use crate::params::{RISK_THRESHOLD_SEED, SimulationParameters, VACCINATION_SEED};

/// Finalized result of one run, one row per individual in generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    params: SimulationParameters,
    timeline: Vec<f64>,
    vaccination_ages: Vec<f64>,
    hazard: Vec<Vec<f64>>,
    survival: Vec<Vec<f64>>,
    badluck: Vec<f64>,
    event_time: Vec<usize>,
    status: Vec<bool>,
}

impl Cohort {
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.vaccination_ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaccination_ages.is_empty()
    }

    /// Days 1..=TF.
    pub fn timeline(&self) -> &[f64] {
        &self.timeline
    }

    /// Age of each individual's vaccine at enrolment (days).
    pub fn vaccination_ages(&self) -> &[f64] {
        &self.vaccination_ages
    }

    /// N x TF daily hazards.
    pub fn hazard(&self) -> &[Vec<f64>] {
        &self.hazard
    }

    /// N x (TF + 1) survival probabilities, day 0 included.
    pub fn survival(&self) -> &[Vec<f64>] {
        &self.survival
    }

    pub fn badluck(&self) -> &[f64] {
        &self.badluck
    }

    pub fn event_time(&self) -> &[usize] {
        &self.event_time
    }

    /// `true` where the infection was observed, `false` where right-censored.
    pub fn status(&self) -> &[bool] {
        &self.status
    }

    pub fn n_events(&self) -> usize {
        self.status.iter().filter(|&&s| s).count()
    }

    /// Survival probability at the end of follow-up, per individual.
    pub fn final_survival(&self) -> Vec<f64> {
        self.survival
            .iter()
            .map(|curve| curve[curve.len() - 1])
            .collect()
    }

    /// Output table consumed by survival-analysis tooling.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let cols = vec![
            Column::new(
                PlSmallStr::from_str("time_of_event"),
                self.event_time.iter().map(|&t| t as i64).collect::<Vec<i64>>(),
            ),
            Column::new(
                PlSmallStr::from_str("time_of_vaccination_at_start"),
                self.vaccination_ages.clone(),
            ),
            Column::new(
                PlSmallStr::from_str("status"),
                self.status.iter().map(|&s| s as i64).collect::<Vec<i64>>(),
            ),
            Column::new(PlSmallStr::from_str("not_infected_prob"), self.final_survival()),
            Column::new(PlSmallStr::from_str("badluck"), self.badluck.clone()),
        ];

        DataFrame::new(cols)
    }
}

/// Run the full pipeline: covariates, hazards, survival curves, event times.
///
/// Both random streams are seeded from fixed constants, so identical
/// parameters always give an identical cohort.
pub fn engine(params: &SimulationParameters) -> Result<Cohort> {
    params.validate()?;

    info!(
        n = params.n,
        tf = params.tf,
        lambda0 = params.lambda0,
        alpha = params.alpha,
        tau = params.tau,
        beta = params.beta,
        te = params.te,
        sigma_e = params.sigma_e,
        "Simulation initialised"
    );
    let start = Instant::now();

    let days = timeline(params.tf);
    let mut vaccination_rng = ChaCha8Rng::seed_from_u64(VACCINATION_SEED);
    let vaccination_ages = vaccination_ages(&mut vaccination_rng, params.n, params.tau);
    debug!(days = days.len(), "Covariates drawn");

    let hazard = hazard_surface(params, &days, &vaccination_ages);
    let survival = survival_curves(&hazard);
    debug!("Hazard surface and survival curves built");

    let mut threshold_rng = ChaCha8Rng::seed_from_u64(RISK_THRESHOLD_SEED);
    let badluck = risk_thresholds(&mut threshold_rng, params.n);
    let (event_time, status) = sample_events(&survival, &badluck, params.tf);

    let cohort = Cohort {
        params: params.clone(),
        timeline: days,
        vaccination_ages,
        hazard,
        survival,
        badluck,
        event_time,
        status,
    };

    let events = cohort.n_events();
    info!(
        events,
        censored = cohort.len() - events,
        elapsed = ?start.elapsed(),
        "Simulation complete"
    );

    Ok(cohort)
}

/// Vaccine age at enrolment, uniform on [0, 2 * tau).
pub fn vaccination_ages<R: Rng + ?Sized>(rng: &mut R, n: usize, tau: f64) -> Vec<f64> {
    (0..n).map(|_| 2.0 * tau * rng.random::<f64>()).collect()
}

/// One "bad luck" draw per individual, uniform on [0, 1).
pub fn risk_thresholds<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random::<f64>()).collect()
}

/// Event day and status of each individual.
///
/// A day counts as "not yet infected" while survival stays strictly above the
/// individual's threshold. The event day is the number of such days in 0..=tf,
/// capped at `tf`; since survival is non-increasing this is the first day the
/// curve reaches the threshold. Individuals whose curve never reaches it are
/// censored at `tf`.
pub fn sample_events(
    survival: &[Vec<f64>],
    badluck: &[f64],
    tf: usize,
) -> (Vec<usize>, Vec<bool>) {
    survival
        .par_iter()
        .zip(badluck)
        .map(|(curve, &threshold)| {
            let not_infected = curve.iter().filter(|&&s| s > threshold).count();
            (not_infected.min(tf), not_infected < curve.len())
        })
        .unzip()
}
