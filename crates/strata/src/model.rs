//! Label types carried by the ranking graph.
//!
//! Nodes carry the output rank, edges carry the ranking constraints, and the graph label carries
//! the ranking configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeLabel {
    pub rank: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    /// Minimum rank difference `rank(w) - rank(v)`. Zero allows both endpoints on one rank.
    pub minlen: usize,
    /// Importance of keeping the edge short. Must be finite and non-negative.
    pub weight: f64,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            minlen: 1,
            weight: 1.0,
        }
    }
}

/// Which ranking algorithm [`crate::rank::rank`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
    None,
}

impl Ranker {
    /// Parses a ranker name. Unknown names select network simplex.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "tight-tree" => Self::TightTree,
            "longest-path" => Self::LongestPath,
            "none" => Self::None,
            _ => Self::NetworkSimplex,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NetworkSimplex => "network-simplex",
            Self::TightTree => "tight-tree",
            Self::LongestPath => "longest-path",
            Self::None => "none",
        }
    }
}

impl FromStr for Ranker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl<'de> Deserialize<'de> for Ranker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphLabel {
    pub ranker: Ranker,
}

impl GraphLabel {
    /// Loads a configuration such as `{"ranker": "tight-tree"}`. Missing fields take defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
