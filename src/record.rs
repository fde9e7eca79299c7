use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidFeatureError;

/// One of the seven numeric columns of the crop dataset.
///
/// The derived ordering follows the column order of the dataset, so a
/// `BTreeMap<Feature, _>` iterates in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Nitrogen content ratio of the soil
    #[serde(rename = "N")]
    N,
    /// Phosphorus content ratio of the soil
    #[serde(rename = "P")]
    P,
    /// Potassium content ratio of the soil
    #[serde(rename = "K")]
    K,
    /// Temperature in degrees Celsius
    #[serde(rename = "temperature")]
    Temperature,
    /// Relative humidity in percent
    #[serde(rename = "humidity")]
    Humidity,
    /// Soil pH
    #[serde(rename = "ph")]
    Ph,
    /// Rainfall in mm
    #[serde(rename = "rainfall")]
    Rainfall,
}

/// All features in canonical column order.
pub const FEATURES: [Feature; 7] = [
    Feature::N,
    Feature::P,
    Feature::K,
    Feature::Temperature,
    Feature::Humidity,
    Feature::Ph,
    Feature::Rainfall,
];

/// Name of the categorical column holding the crop label.
pub const LABEL_COLUMN: &str = "label";

impl Feature {
    /// Column name as it appears in the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            Feature::N => "N",
            Feature::P => "P",
            Feature::K => "K",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    /// Heading shown above the feature's readout on the dashboard.
    pub fn display_label(self) -> &'static str {
        match self {
            Feature::N => "N (Nitrogen)",
            Feature::P => "P (Phosphorus)",
            Feature::K => "K (Potassium)",
            Feature::Temperature => "Temperature",
            Feature::Humidity => "Humidity",
            Feature::Ph => "pH",
            Feature::Rainfall => "Rainfall",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = InvalidFeatureError;

    /// Names match exactly, case included (`"ph"` is valid, `"pH"` is not).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FEATURES
            .iter()
            .copied()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| InvalidFeatureError(s.to_string()))
    }
}

/// A single row of the dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    values: [f64; 7],
    label: String,
}

impl Record {
    /// Builds a record from the seven measurements in `FEATURES` order.
    pub fn new(values: [f64; 7], label: impl Into<String>) -> Self {
        Record {
            values,
            label: label.into(),
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[f64; 7] {
        &self.values
    }
}
