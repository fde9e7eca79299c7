use serde::Serialize;
use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::error::InvalidFeatureError;
use crate::record::Feature;

/// Raw values of one feature for one crop, in dataset row order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureSeries {
    pub crop: String,
    pub values: Vec<f64>,
}

/// Build per-crop value series for a feature given by name
///
/// # Arguments
/// * `dataset` - The loaded crop table
/// * `feature_name` - Exact column name, e.g. `"temperature"`
///
/// # Returns
/// * `Result<Vec<FeatureSeries>, InvalidFeatureError>` - One series per crop, or an error for an unknown name
///
/// # Examples
/// ```
/// use cropdash::{Dataset, Record, build_series};
///
/// let dataset = Dataset::from_records(vec![
///     Record::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9], "rice"),
///     Record::new([71.0, 54.0, 16.0, 22.6, 63.7, 5.7, 87.8], "maize"),
/// ]);
///
/// let series = build_series(&dataset, "temperature").unwrap();
/// assert_eq!(series[0].crop, "rice");
/// assert_eq!(series[1].values, vec![22.6]);
/// assert!(build_series(&dataset, "colour").is_err());
/// ```
pub fn build_series(
    dataset: &Dataset,
    feature_name: &str,
) -> Result<Vec<FeatureSeries>, InvalidFeatureError> {
    let feature: Feature = feature_name.parse()?;
    Ok(series_for(dataset, feature))
}

/// Group every row by crop label and collect the feature's values.
///
/// Crops appear in first-occurrence order; values are not rounded.
pub fn series_for(dataset: &Dataset, feature: Feature) -> Vec<FeatureSeries> {
    let mut series: Vec<FeatureSeries> = dataset
        .crop_labels()
        .iter()
        .map(|crop| FeatureSeries {
            crop: crop.clone(),
            values: Vec::new(),
        })
        .collect();

    let slots: HashMap<&str, usize> = dataset
        .crop_labels()
        .iter()
        .enumerate()
        .map(|(idx, crop)| (crop.as_str(), idx))
        .collect();

    for record in dataset.records() {
        if let Some(&idx) = slots.get(record.label()) {
            series[idx].values.push(record.get(feature));
        }
    }

    series
}
