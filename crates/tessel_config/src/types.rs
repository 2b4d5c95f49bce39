//! Configuration types deserialized from `tessel.toml`.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Default grid extent per axis, matching the historical fixed grid.
pub const DEFAULT_GRID_EXTENT: u64 = 1_000_000;

/// Top-level placer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacerConfig {
    /// Occupancy grid bounds.
    #[serde(default)]
    pub grid: GridConfig,
    /// Placement policy knobs.
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// Size of the occupancy grid. The grid is centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Number of columns.
    #[serde(default = "default_extent")]
    pub width: u64,
    /// Number of rows.
    #[serde(default = "default_extent")]
    pub height: u64,
}

fn default_extent() -> u64 {
    DEFAULT_GRID_EXTENT
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_EXTENT,
            height: DEFAULT_GRID_EXTENT,
        }
    }
}

/// Placement behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementConfig {
    /// What to do with a gate that has no feasible perimeter candidate.
    #[serde(default)]
    pub on_infeasible: InfeasiblePolicy,
}

/// Policy for gates that cannot be placed when their net is processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfeasiblePolicy {
    /// Record the gate as skipped and carry on.
    #[default]
    Skip,
    /// Carry on, then retry every unplaced gate once after all nets.
    Retry,
    /// Abort the run at the first infeasible gate.
    Fail,
}

impl fmt::Display for InfeasiblePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfeasiblePolicy::Skip => write!(f, "skip"),
            InfeasiblePolicy::Retry => write!(f, "retry"),
            InfeasiblePolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for InfeasiblePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(InfeasiblePolicy::Skip),
            "retry" => Ok(InfeasiblePolicy::Retry),
            "fail" => Ok(InfeasiblePolicy::Fail),
            other => Err(format!(
                "unknown infeasible policy '{other}' (expected skip, retry or fail)"
            )),
        }
    }
}
