use std::fmt;

use serde::{Deserialize, Serialize};

/// Named motion played after a level's question.
///
/// Names that no adapter knows are kept as [`MotionId::Other`] so a course
/// file can reference motions a newer adapter understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MotionId {
    GasSpin,
    FusionSnap,
    RandomWalk,
    ConvectionWave,
    MagneticTwist,
    SolarWindShiver,
    Other(String),
}

impl MotionId {
    /// All motions with built-in choreography.
    pub const KNOWN: [MotionId; 6] = [
        MotionId::GasSpin,
        MotionId::FusionSnap,
        MotionId::RandomWalk,
        MotionId::ConvectionWave,
        MotionId::MagneticTwist,
        MotionId::SolarWindShiver,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GasSpin => "gas_spin",
            Self::FusionSnap => "fusion_snap",
            Self::RandomWalk => "random_walk",
            Self::ConvectionWave => "convection_wave",
            Self::MagneticTwist => "magnetic_twist",
            Self::SolarWindShiver => "solar_wind_shiver",
            Self::Other(name) => name,
        }
    }

    /// Returns `true` for motions with built-in choreography.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for MotionId {
    fn from(name: String) -> Self {
        match name.as_str() {
            "gas_spin" => Self::GasSpin,
            "fusion_snap" => Self::FusionSnap,
            "random_walk" => Self::RandomWalk,
            "convection_wave" => Self::ConvectionWave,
            "magnetic_twist" => Self::MagneticTwist,
            "solar_wind_shiver" => Self::SolarWindShiver,
            _ => Self::Other(name),
        }
    }
}

impl From<MotionId> for String {
    fn from(id: MotionId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for MotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip_through_string() {
        for id in MotionId::KNOWN {
            let name = String::from(id.clone());
            assert_eq!(MotionId::from(name), id);
        }
    }

    #[test]
    fn unknown_name_is_preserved() {
        let id = MotionId::from("moonwalk".to_string());
        assert_eq!(id, MotionId::Other("moonwalk".into()));
        assert!(!id.is_known());
        assert_eq!(id.to_string(), "moonwalk");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let id: MotionId = serde_json::from_str(r#""fusion_snap""#).expect("json");
        assert_eq!(id, MotionId::FusionSnap);
    }
}
