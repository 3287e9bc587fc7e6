use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VizError};

/// Advisory minimum for `memory` (KiB), surfaced as a form hint.
pub const MIN_MEMORY: u32 = 1024;
/// Advisory minimum for `iterations`.
pub const MIN_ITERATIONS: u32 = 1;
/// Advisory minimum for `parallelism`.
pub const MIN_PARALLELISM: u32 = 1;

/// Argon2 variant. Only affects labels; formulas are identical across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Data-independent addressing
    #[default]
    #[serde(rename = "i")]
    Argon2i,
    /// Data-dependent addressing
    #[serde(rename = "d")]
    Argon2d,
    /// Hybrid addressing
    #[serde(rename = "id")]
    Argon2id,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Argon2i, Variant::Argon2d, Variant::Argon2id];

    /// Human-readable name, e.g. `Argon2id`.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Argon2i => "Argon2i",
            Variant::Argon2d => "Argon2d",
            Variant::Argon2id => "Argon2id",
        }
    }

    /// Short form value (`i`, `d`, `id`).
    pub fn code(self) -> &'static str {
        match self {
            Variant::Argon2i => "i",
            Variant::Argon2d => "d",
            Variant::Argon2id => "id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = VizError;

    /// Accepts either the short code or the full label, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let code = lower.strip_prefix("argon2").unwrap_or(&lower);
        match code {
            "i" => Ok(Variant::Argon2i),
            "d" => Ok(Variant::Argon2d),
            "id" => Ok(Variant::Argon2id),
            _ => Err(VizError::InvalidParameter {
                name: Parameter::Variant.name().to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Names of the user-settable configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Memory,
    Iterations,
    Parallelism,
    Variant,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::Memory,
        Parameter::Iterations,
        Parameter::Parallelism,
        Parameter::Variant,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Memory => "memory",
            Parameter::Iterations => "iterations",
            Parameter::Parallelism => "parallelism",
            Parameter::Variant => "variant",
        }
    }

    /// Advisory minimum for numeric parameters, `None` for `variant`.
    pub fn minimum(self) -> Option<u32> {
        match self {
            Parameter::Memory => Some(MIN_MEMORY),
            Parameter::Iterations => Some(MIN_ITERATIONS),
            Parameter::Parallelism => Some(MIN_PARALLELISM),
            Parameter::Variant => None,
        }
    }
}

impl FromStr for Parameter {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Parameter::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| VizError::UnknownParameter(name.to_string()))
    }
}

/// User-chosen Argon2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Total memory in KiB
    pub memory: u32,
    /// Number of passes over the matrix
    pub iterations: u32,
    /// Number of lanes
    pub parallelism: u32,
    #[serde(default)]
    pub variant: Variant,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory: MIN_MEMORY,
            iterations: MIN_ITERATIONS,
            parallelism: MIN_PARALLELISM,
            variant: Variant::default(),
        }
    }
}

impl Config {
    pub fn new(memory: u32, iterations: u32, parallelism: u32, variant: Variant) -> Self {
        Self {
            memory,
            iterations,
            parallelism,
            variant,
        }
    }

    /// Update one field from its form value.
    ///
    /// Only the type is checked here; advisory minimums are left to [`Config::advisories`].
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        let parameter: Parameter = name.parse()?;
        match parameter {
            Parameter::Variant => self.variant = value.parse()?,
            Parameter::Memory => self.memory = parse_count(parameter, value)?,
            Parameter::Iterations => self.iterations = parse_count(parameter, value)?,
            Parameter::Parallelism => self.parallelism = parse_count(parameter, value)?,
        }
        Ok(())
    }

    /// Number of lanes (rows of the matrix).
    pub fn lane_count(&self) -> u32 {
        self.parallelism
    }

    /// `floor(memory / parallelism)`, or 0 when parallelism is 0.
    pub fn columns_per_lane(&self) -> u32 {
        self.memory.checked_div(self.parallelism).unwrap_or(0)
    }

    /// Matrix shape derived from memory and parallelism.
    pub fn shape(&self) -> GridShape {
        GridShape {
            lanes: self.lane_count(),
            columns_per_lane: self.columns_per_lane(),
        }
    }

    /// Reject configurations that cannot yield a well-formed grid.
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            (Parameter::Memory, self.memory),
            (Parameter::Iterations, self.iterations),
            (Parameter::Parallelism, self.parallelism),
        ] {
            if value == 0 {
                return Err(VizError::InvalidConfig(format!(
                    "{} must be positive",
                    parameter.name()
                )));
            }
        }
        if self.columns_per_lane() == 0 {
            return Err(VizError::InvalidConfig(format!(
                "memory ({}) is smaller than parallelism ({}), leaving no columns per lane",
                self.memory, self.parallelism
            )));
        }
        Ok(())
    }

    /// Parameters below their advisory minimum. These are tolerated, not rejected.
    pub fn advisories(&self) -> Vec<Advisory> {
        [
            (Parameter::Memory, self.memory),
            (Parameter::Iterations, self.iterations),
            (Parameter::Parallelism, self.parallelism),
        ]
        .into_iter()
        .filter_map(|(parameter, value)| {
            let minimum = parameter.minimum()?;
            (value < minimum).then_some(Advisory {
                parameter,
                value,
                minimum,
            })
        })
        .collect()
    }
}

fn parse_count(parameter: Parameter, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| VizError::InvalidParameter {
            name: parameter.name().to_string(),
            value: value.to_string(),
        })
}

/// A parameter set below its advisory minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub parameter: Parameter,
    pub value: u32,
    pub minimum: u32,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is below the recommended minimum of {}",
            self.parameter.name(),
            self.value,
            self.minimum
        )
    }
}

/// Dimensions of the memory matrix `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridShape {
    pub lanes: u32,
    pub columns_per_lane: u32,
}

impl GridShape {
    /// Total number of blocks in the matrix.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.lanes) * u64::from(self.columns_per_lane)
    }

    pub fn contains(&self, lane: u32, column: u32) -> bool {
        lane < self.lanes && column < self.columns_per_lane
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1024, 1, 1024; "single lane")]
    #[test_case(2048, 2, 1024; "two lanes")]
    #[test_case(1000, 2, 500; "sub-minimum memory")]
    #[test_case(1025, 4, 256; "floors remainder")]
    #[test_case(3, 3, 1; "one column")]
    fn test_columns_per_lane(memory: u32, parallelism: u32, expected: u32) {
        let config = Config::new(memory, 1, parallelism, Variant::Argon2i);
        assert_eq!(config.columns_per_lane(), expected);
        assert_eq!(config.lane_count(), parallelism);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_columns_per_lane_at_least_one_when_memory_covers_lanes() {
        for parallelism in 1..=64 {
            for memory in [parallelism, parallelism + 1, parallelism * 3 - 1, 4096] {
                let config = Config::new(memory, 1, parallelism, Variant::Argon2d);
                assert!(config.columns_per_lane() >= 1, "{config:?}");
            }
        }
    }

    #[test_case(Config::new(1, 1, 2, Variant::Argon2i); "memory below parallelism")]
    #[test_case(Config::new(0, 1, 1, Variant::Argon2i); "zero memory")]
    #[test_case(Config::new(1024, 0, 1, Variant::Argon2i); "zero iterations")]
    #[test_case(Config::new(1024, 1, 0, Variant::Argon2i); "zero parallelism")]
    fn test_validate_rejects(config: Config) {
        assert!(matches!(
            config.validate(),
            Err(VizError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_parallelism_has_no_columns() {
        let config = Config::new(1024, 1, 0, Variant::Argon2i);
        assert_eq!(config.columns_per_lane(), 0);
    }

    #[test]
    fn test_set_parameter() {
        let mut config = Config::default();
        config.set_parameter("memory", "2048").unwrap();
        config.set_parameter("Iterations", " 3 ").unwrap();
        config.set_parameter("PARALLELISM", "2").unwrap();
        config.set_parameter("variant", "id").unwrap();
        assert_eq!(config, Config::new(2048, 3, 2, Variant::Argon2id));
    }

    #[test]
    fn test_set_parameter_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_parameter("memory", "lots"),
            Err(VizError::InvalidParameter { .. })
        ));
        assert!(matches!(
            config.set_parameter("memory", "-5"),
            Err(VizError::InvalidParameter { .. })
        ));
        assert!(matches!(
            config.set_parameter("salt", "abc"),
            Err(VizError::UnknownParameter(_))
        ));
        assert_eq!(config, Config::default());
    }

    #[test_case("i", Variant::Argon2i)]
    #[test_case("D", Variant::Argon2d)]
    #[test_case("argon2id", Variant::Argon2id)]
    #[test_case("Argon2i", Variant::Argon2i)]
    fn test_variant_from_str(input: &str, expected: Variant) {
        assert_eq!(input.parse::<Variant>().unwrap(), expected);
    }

    #[test]
    fn test_variant_codes_round_trip_through_labels() {
        for variant in Variant::ALL {
            assert_eq!(variant.code().parse::<Variant>().unwrap(), variant);
            assert_eq!(variant.label().parse::<Variant>().unwrap(), variant);
        }
        assert!("argon2x".parse::<Variant>().is_err());
    }

    #[test]
    fn test_advisories_tolerate_sub_minimum_memory() {
        let config = Config::new(1000, 1, 2, Variant::Argon2i);
        assert!(config.validate().is_ok());
        let advisories = config.advisories();
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].parameter, Parameter::Memory);
        assert_eq!(
            advisories[0].to_string(),
            "memory = 1000 is below the recommended minimum of 1024"
        );
        assert!(Config::default().advisories().is_empty());
    }

    #[test]
    fn test_config_json_uses_variant_code() {
        let json = serde_json::to_string(&Config::new(2048, 3, 2, Variant::Argon2id)).unwrap();
        assert_eq!(
            json,
            r#"{"memory":2048,"iterations":3,"parallelism":2,"variant":"id"}"#
        );
        let parsed: Config =
            serde_json::from_str(r#"{"memory":4096,"iterations":2,"parallelism":4}"#).unwrap();
        assert_eq!(parsed.variant, Variant::Argon2i);
    }

    #[test]
    fn test_shape_cell_count() {
        let shape = Config::new(u32::MAX, 1, 1, Variant::Argon2i).shape();
        assert_eq!(shape.cell_count(), u64::from(u32::MAX));
        assert!(shape.contains(0, u32::MAX - 1));
        assert!(!shape.contains(1, 0));
    }
}
