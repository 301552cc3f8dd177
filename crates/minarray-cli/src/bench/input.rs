use anyhow::{Context, Result};
use clap::ArgMatches;
use minarray::DType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BenchConfig {
    /// Side length of the square operands.
    pub size: usize,
    pub dtypes: Vec<DType>,
    pub low: i64,
    pub high: i64,
    pub seed: Option<u64>,
    /// Timed runs per operation; the fastest is reported.
    pub repeats: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            size: 512,
            dtypes: DType::ALL.to_vec(),
            low: 0,
            high: 1,
            seed: None,
            repeats: 1,
        }
    }
}

impl BenchConfig {
    /// Read a JSON config. Missing fields, and invalid values other than `dtypes`,
    /// fall back to the default.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let partial: serde_json::Value = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
        let mut config = BenchConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field), config.$field
                        );
                    }
                } else {
                    log::debug!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            };
        }

        // dtypes must parse; there is no default fallback
        if let Some(val) = partial.get("dtypes") {
            config.dtypes = serde_json::from_value(val.clone()).with_context(|| {
                format!("Invalid 'dtypes' in config file: {}", path.as_ref().display())
            })?;
        }

        load_or_default!(size);
        load_or_default!(low);
        load_or_default!(high);
        load_or_default!(seed);
        load_or_default!(repeats);

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Load the optional config file, then apply CLI overrides.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<std::path::PathBuf>("config") {
            Some(path) => BenchConfig::from_file(path)?,
            None => BenchConfig::default(),
        };

        if let Some(size) = matches.get_one::<usize>("size") {
            config.size = *size;
        }
        if let Some(names) = matches.get_many::<String>("dtype") {
            config.dtypes = names
                .map(|name| {
                    name.parse::<DType>()
                        .with_context(|| format!("Invalid --dtype value '{}'", name))
                })
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.seed = Some(*seed);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            anyhow::bail!("Benchmark size must be positive");
        }
        if self.dtypes.is_empty() {
            anyhow::bail!("At least one dtype is required");
        }
        if self.low >= self.high {
            anyhow::bail!("high ({}) must be greater than low ({})", self.high, self.low);
        }
        if self.repeats == 0 {
            anyhow::bail!("repeats must be at least 1");
        }
        Ok(())
    }
}
