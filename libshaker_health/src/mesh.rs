use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::error::MeshError;

/// The screen mesh grades available on the rig, keyed by API designation.
///
/// Each grade maps to a fixed solids capacity in flow-rate-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeshType {
    #[default]
    #[serde(rename = "API 100")]
    Api100,
    #[serde(rename = "API 140")]
    Api140,
    #[serde(rename = "API 170")]
    Api170,
    #[serde(rename = "API 200")]
    Api200,
}

impl MeshType {
    pub const ALL: [MeshType; 4] = [
        MeshType::Api100,
        MeshType::Api140,
        MeshType::Api170,
        MeshType::Api200,
    ];

    /// Maximum solids throughput the mesh can sustain
    pub fn capacity(&self) -> f64 {
        match self {
            Self::Api100 => 250.0,
            Self::Api140 => 200.0,
            Self::Api170 => 160.0,
            Self::Api200 => 120.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Api100 => "API 100",
            Self::Api140 => "API 140",
            Self::Api170 => "API 170",
            Self::Api200 => "API 200",
        }
    }
}

impl Display for MeshType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MeshType {
    type Err = MeshError;
    /// Accepts "API 140", "api140", "140" and the like
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        let grade = compact.strip_prefix("API").unwrap_or(&compact);
        match grade {
            "100" => Ok(Self::Api100),
            "140" => Ok(Self::Api140),
            "170" => Ok(Self::Api170),
            "200" => Ok(Self::Api200),
            _ => Err(MeshError::UnknownMesh(s.to_string())),
        }
    }
}
