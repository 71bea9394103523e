// Hazard Module
use rayon::prelude::*;

use crate::params::SimulationParameters;

/// Relative risk from the epidemic surge on day `t`: a Gaussian bump of
/// amplitude `beta` centred on `te`.
pub fn epidemic_multiplier(t: f64, beta: f64, te: f64, sigma_e: f64) -> f64 {
    1.0 + beta * (-(t - te).powi(2) / sigma_e.powi(2)).exp()
}

/// Hazard factor left by a vaccine of efficacy `alpha` on day `t`, for an
/// individual whose vaccine was already `age_at_start` days old at enrolment.
pub fn vaccine_protection(t: f64, age_at_start: f64, alpha: f64, tau: f64) -> f64 {
    1.0 - alpha * (-(t + age_at_start) / tau).exp()
}

/// Days 1..=tf, shared by every individual.
pub fn timeline(tf: usize) -> Vec<f64> {
    (1..=tf).map(|day| day as f64).collect()
}

/// Per-individual, per-day hazard matrix (N x TF).
pub fn hazard_surface(
    params: &SimulationParameters,
    timeline: &[f64],
    vaccination_ages: &[f64],
) -> Vec<Vec<f64>> {
    // The epidemic term does not depend on the individual
    let epidemic = timeline
        .iter()
        .map(|&t| epidemic_multiplier(t, params.beta, params.te, params.sigma_e))
        .collect::<Vec<f64>>();

    vaccination_ages
        .par_iter()
        .map(|&age| {
            timeline
                .iter()
                .zip(&epidemic)
                .map(|(&t, &m)| {
                    m * params.lambda0 * vaccine_protection(t, age, params.alpha, params.tau)
                })
                .collect()
        })
        .collect()
}

/// Survival (not yet infected) probabilities, N x (TF + 1). Column 0 is the
/// enrolment day and is exactly 1.
pub fn survival_curves(hazard: &[Vec<f64>]) -> Vec<Vec<f64>> {
    hazard
        .par_iter()
        .map(|row| {
            let mut curve = Vec::with_capacity(row.len() + 1);
            curve.push(1.0);

            let mut cumulative = 0.0_f64;
            for &h in row {
                cumulative += h;
                curve.push((-cumulative).exp());
            }
            curve
        })
        .collect()
}
