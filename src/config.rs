use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::actor::worker::DEFAULT_MIN_DURATION;
use crate::error::Error;

pub const REFERENCE_VAR: &str = "FACILITY_PLANNER_REFERENCE";
pub const DELAY_VAR: &str = "FACILITY_PLANNER_DELAY_MS";
pub const LOG_FORMAT_VAR: &str = "FACILITY_PLANNER_LOG_FORMAT";
pub const FULL_BUDGET_VAR: &str = "FACILITY_PLANNER_REQUIRE_FULL_BUDGET";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Request script; stdin when absent.
    pub script_path: Option<PathBuf>,
    /// Reference data; the bundled data set when absent.
    pub reference_path: Option<PathBuf>,
    pub simulate_delay: Duration,
    pub log_format: LogFormat,
    pub require_full_budget: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_path: None,
            reference_path: None,
            simulate_delay: DEFAULT_MIN_DURATION,
            log_format: LogFormat::default(),
            require_full_budget: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_parts(env::args().nth(1), env::vars())
    }

    pub fn from_parts(
        script_arg: Option<String>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, Error> {
        let mut config = Config {
            script_path: script_arg.map(PathBuf::from),
            ..Config::default()
        };

        for (key, value) in vars {
            match key.as_str() {
                REFERENCE_VAR if !value.is_empty() => {
                    config.reference_path = Some(PathBuf::from(value));
                }
                DELAY_VAR => {
                    let millis = value.trim().parse::<u64>().map_err(|e| Error::Config {
                        message: format!("{DELAY_VAR}={value}: {e}"),
                    })?;
                    config.simulate_delay = Duration::from_millis(millis);
                }
                LOG_FORMAT_VAR => {
                    config.log_format = match value.trim().to_ascii_lowercase().as_str() {
                        "pretty" => LogFormat::Pretty,
                        "json" => LogFormat::Json,
                        other => {
                            return Err(Error::Config {
                                message: format!("{LOG_FORMAT_VAR}: unknown format {other}"),
                            });
                        }
                    };
                }
                FULL_BUDGET_VAR => {
                    config.require_full_budget =
                        value.trim().parse::<bool>().map_err(|e| Error::Config {
                            message: format!("{FULL_BUDGET_VAR}={value}: {e}"),
                        })?;
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
