// Command Line Module
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::{self, ParameterOverrides};
use crate::error::Result;
use crate::{pq, sim, tx};

/// Synthesize time-to-infection data for a vaccine-efficacy cohort.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// YAML file with simulation parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Population size [default: 100]
    #[arg(long)]
    pub n: Option<usize>,
    /// Follow-up period in days [default: 200]
    #[arg(long)]
    pub tf: Option<usize>,
    /// Background hazard per day [default: 0.005]
    #[arg(long)]
    pub lambda0: Option<f64>,
    /// Vaccine efficacy [default: 0.7]
    #[arg(long, allow_negative_numbers = true)]
    pub alpha: Option<f64>,
    /// Vaccine waning time constant in days [default: 100]
    #[arg(long)]
    pub tau: Option<f64>,
    /// Relative increase in risk at the epidemic peak [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub beta: Option<f64>,
    /// Day of the epidemic peak [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    pub te: Option<f64>,
    /// Width of the epidemic bump in days [default: 50]
    #[arg(long, allow_negative_numbers = true)]
    pub sigma_e: Option<f64>,

    /// Dataset path; a `.parquet` extension writes Parquet, anything else CSV
    #[arg(short, long, default_value = "survival.csv")]
    pub output: PathBuf,
    /// Prefix CSV rows with an unnamed row-index column
    #[arg(long)]
    pub index: bool,
    /// Also write every survival curve, one row per individual
    #[arg(long)]
    pub curves: Option<PathBuf>,
    /// Also write the daily life table
    #[arg(long)]
    pub life_table: Option<PathBuf>,
    /// Log a one-line cohort summary
    #[arg(long)]
    pub summary: bool,
}

impl Cli {
    pub fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            n: self.n,
            tf: self.tf,
            lambda0: self.lambda0,
            alpha: self.alpha,
            tau: self.tau,
            beta: self.beta,
            te: self.te,
            sigma_e: self.sigma_e,
        }
    }
}

/// Resolve parameters, simulate, then write every requested table. Nothing
/// is written unless the whole run succeeds.
pub fn run(cli: &Cli) -> Result<()> {
    let params = config::load(cli.config.as_deref(), &cli.overrides())?;
    let cohort = sim::engine(&params)?;

    let dataset = cohort.to_dataframe()?;
    let life_table = match &cli.life_table {
        Some(_) => Some(tx::life_table(&dataset, params.tf)?),
        None => None,
    };
    let curves = match &cli.curves {
        Some(_) => Some(tx::curves_to_df(cohort.survival())?),
        None => None,
    };

    if cli.summary {
        let summary = tx::summary(&dataset)?;
        info!("Cohort summary\n{summary}");
    }

    pq::write_table(&dataset, &cli.output, cli.index)?;
    info!(path = %cli.output.display(), rows = dataset.height(), "Dataset written");

    if let (Some(path), Some(table)) = (&cli.life_table, &life_table) {
        pq::write_table(table, path, false)?;
        info!(path = %path.display(), "Life table written");
    }
    if let (Some(path), Some(table)) = (&cli.curves, &curves) {
        pq::write_table(table, path, false)?;
        info!(path = %path.display(), "Survival curves written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_flags_override() {
        let cli = Cli::try_parse_from([
            "vax-sim",
            "--n",
            "10",
            "--beta",
            "-0.5",
            "--sigma-e",
            "7.5",
        ])
        .unwrap();
        let overrides = cli.overrides();

        assert_eq!(overrides.n, Some(10));
        assert_eq!(overrides.beta, Some(-0.5));
        assert_eq!(overrides.sigma_e, Some(7.5));
        assert_eq!(overrides.tf, None);
        assert_eq!(cli.output, PathBuf::from("survival.csv"));
        assert!(!cli.index);
    }

    #[test]
    fn rejects_negative_population() {
        assert!(Cli::try_parse_from(["vax-sim", "--n", "-3"]).is_err());
    }
}
