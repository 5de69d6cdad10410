//! SGBA method selection and output options
//!
//! The coupling layer picks a method once per run (typically from its namelist)
//! and reuses the resulting solver for every grid snapshot.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::UNDEFINED_FRACTION;

/// Sub-grid burning area method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SgbaMethod {
    /// 9-point weighted average of the level-set field (WA)
    WeightedAverage,
    /// Explicit fire-front reconstruction by quadrant case analysis (EFFR)
    #[default]
    FrontReconstruction,
}

impl SgbaMethod {
    /// Short name used in logs and configuration files
    #[must_use]
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::WeightedAverage => "WA",
            Self::FrontReconstruction => "EFFR",
        }
    }
}

impl fmt::Display for SgbaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Unknown method name passed to [`SgbaMethod::from_str`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMethodError(String);

impl fmt::Display for ParseMethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown SGBA method '{}', expected WA or EFFR",
            self.0
        )
    }
}

impl Error for ParseMethodError {}

impl FromStr for SgbaMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wa" | "weighted_average" => Ok(Self::WeightedAverage),
            "effr" | "front_reconstruction" => Ok(Self::FrontReconstruction),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// Options for one SGBA solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SgbaConfig {
    /// Method used for every snapshot
    pub method: SgbaMethod,
    /// Value written into the boundary ring, which is never computed
    ///
    /// Defaults to [`UNDEFINED_FRACTION`] (NaN) so uncomputed cells cannot be
    /// mistaken for a real fraction.
    pub boundary_value: f64,
}

impl Default for SgbaConfig {
    fn default() -> Self {
        Self {
            method: SgbaMethod::default(),
            boundary_value: UNDEFINED_FRACTION,
        }
    }
}

impl SgbaConfig {
    /// Default options with the given method
    #[must_use]
    pub fn with_method(method: SgbaMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Replace the boundary fill value
    pub fn with_boundary_value(mut self, value: f64) -> Self {
        self.boundary_value = value;
        self
    }
}
