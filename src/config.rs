//! Layered parameter loading.
//!
//! Hierarchy, later layers win:
//! 1. [`SimulationParameters::default`]
//! 2. An optional YAML file
//! 3. `VAX_SIM_*` environment variables (e.g. `VAX_SIM_LAMBDA0=0.01`)
//! 4. Explicit command-line overrides

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::params::SimulationParameters;

pub const ENV_PREFIX: &str = "VAX_SIM_";

/// Parameters given on the command line. Unset fields leave lower layers
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tf: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda0: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tau: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub te: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma_e: Option<f64>,
}

/// Resolve and validate the parameters for one run.
pub fn load(
    config_file: Option<&Path>,
    overrides: &ParameterOverrides,
) -> Result<SimulationParameters> {
    let mut figment = Figment::from(Serialized::defaults(SimulationParameters::default()));

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(SimError::ConfigNotFound(path.to_path_buf()));
        }
        figment = figment.merge(Yaml::file(path));
    }

    let params: SimulationParameters = figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()?;

    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_any_source() {
        Jail::expect_with(|_jail| {
            let params = load(None, &ParameterOverrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(params, SimulationParameters::default());
            Ok(())
        });
    }

    #[test]
    fn layers_override_in_order() {
        Jail::expect_with(|jail| {
            jail.create_file("cohort.yaml", "n: 250\ntf: 90\nbeta: 0.5\n")?;
            jail.set_env("VAX_SIM_TF", "120");
            jail.set_env("VAX_SIM_SIGMA_E", "12.5");

            let overrides = ParameterOverrides {
                beta: Some(1.5),
                ..Default::default()
            };
            let params =
                load(Some(Path::new("cohort.yaml")), &overrides).map_err(|e| e.to_string())?;

            assert_eq!(params.n, 250);
            assert_eq!(params.tf, 120);
            assert_eq!(params.sigma_e, 12.5);
            assert_eq!(params.beta, 1.5);
            assert_eq!(params.lambda0, 0.005);
            Ok(())
        });
    }

    #[test]
    fn missing_config_file_is_reported() {
        Jail::expect_with(|_jail| {
            let err =
                load(Some(Path::new("absent.yaml")), &ParameterOverrides::default()).unwrap_err();
            assert!(matches!(err, SimError::ConfigNotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn loaded_parameters_are_validated() {
        Jail::expect_with(|jail| {
            jail.set_env("VAX_SIM_SIGMA_E", "0");
            let err = load(None, &ParameterOverrides::default()).unwrap_err();
            assert!(matches!(err, SimError::InvalidParameter { name: "sigma_e", .. }));
            Ok(())
        });
    }

    #[test]
    fn malformed_values_are_config_errors() {
        Jail::expect_with(|jail| {
            jail.set_env("VAX_SIM_N", "many");
            let err = load(None, &ParameterOverrides::default()).unwrap_err();
            assert!(matches!(err, SimError::Config(_)));
            Ok(())
        });
    }
}
