//! Risk level classification and the colors derived from it.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ChartError;

/// Marker color for samples whose risk tag was not recognised
pub const UNKNOWN_COLOR: &str = "#6b7280";

/// List badge class for samples whose risk tag was not recognised
pub const UNKNOWN_BADGE: &str = "bg-gray-400";

/// Discrete risk category attached to a stored prediction
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Marker and line color
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::High => "#dc2626",
            RiskLevel::Medium => "#d97706",
            RiskLevel::Low => "#059669",
        }
    }

    /// RGB triple of [`Self::color`] for raster and PDF export
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            RiskLevel::High => [220, 38, 38],
            RiskLevel::Medium => [217, 119, 6],
            RiskLevel::Low => [5, 150, 105],
        }
    }

    /// Badge class used by the recent-predictions list
    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskLevel::High => "bg-red-600",
            RiskLevel::Medium => "bg-yellow-600",
            RiskLevel::Low => "bg-green-600",
        }
    }

    /// Sort key, most severe first
    pub fn severity_rank(&self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low => 2,
        }
    }
}

/// Strictly classify a risk tag. Anything outside low/medium/high is an error.
pub fn classify(tag: &str) -> Result<RiskLevel, ChartError> {
    RiskLevel::from_str(tag.trim()).map_err(|_| ChartError::UnknownRiskLevel {
        tag: tag.to_string(),
    })
}

/// Classification result carried by each prediction
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointClass {
    Level(RiskLevel),
    /// The raw tag that failed classification
    Unknown(String),
}

impl PointClass {
    /// Classify a tag, flagging (never defaulting) unrecognised values
    pub fn from_tag(tag: &str) -> Self {
        match classify(tag) {
            Ok(level) => PointClass::Level(level),
            Err(err) => {
                tracing::warn!("{}", err);
                PointClass::Unknown(tag.to_string())
            }
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PointClass::Unknown(_))
    }

    /// The recognised level, or the classification error
    pub fn level(&self) -> Result<RiskLevel, ChartError> {
        match self {
            PointClass::Level(level) => Ok(*level),
            PointClass::Unknown(tag) => Err(ChartError::UnknownRiskLevel { tag: tag.clone() }),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PointClass::Level(level) => level.color(),
            PointClass::Unknown(_) => UNKNOWN_COLOR,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            PointClass::Level(level) => level.rgb(),
            PointClass::Unknown(_) => [107, 114, 128],
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            PointClass::Level(level) => level.badge_class(),
            PointClass::Unknown(_) => UNKNOWN_BADGE,
        }
    }

    /// Unknown tags sort after every known level
    pub fn severity_rank(&self) -> u8 {
        match self {
            PointClass::Level(level) => level.severity_rank(),
            PointClass::Unknown(_) => u8::MAX,
        }
    }

    /// Display label ("high", "unknown", ...)
    pub fn label(&self) -> &str {
        match self {
            PointClass::Level(level) => level.as_ref(),
            PointClass::Unknown(_) => "unknown",
        }
    }
}

impl Serialize for PointClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Group items by classification, most severe group first.
///
/// Each distinct unknown tag gets its own group, ordered by tag after the
/// known levels.
pub fn group_by_level<'a, T, F>(items: &'a [T], class_of: F) -> Vec<(PointClass, Vec<&'a T>)>
where
    F: Fn(&T) -> &PointClass,
{
    let mut groups: BTreeMap<(u8, String), (PointClass, Vec<&'a T>)> = BTreeMap::new();
    for item in items {
        let class = class_of(item);
        let name = match class {
            PointClass::Level(level) => level.as_ref().to_string(),
            PointClass::Unknown(tag) => tag.clone(),
        };
        let key = (class.severity_rank(), name);
        groups
            .entry(key)
            .or_insert_with(|| (class.clone(), Vec::new()))
            .1
            .push(item);
    }
    groups.into_values().collect()
}
