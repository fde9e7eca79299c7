use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::Dataset;
use crate::record::{FEATURES, Feature, Record};

/// Mean, minimum and maximum of one feature within one crop group,
/// each rounded to two decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CropStatistics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-feature statistics for one crop, iterated in column order.
///
/// Empty when the crop label matches no row.
pub type CropSummary = BTreeMap<Feature, CropStatistics>;

/// Compute crop-wise statistics
///
/// Filters the dataset down to rows labelled `crop` and computes the
/// mean, minimum and maximum of every feature over that subset.
///
/// # Arguments
/// * `dataset` - The loaded crop table
/// * `crop` - Crop label to summarise
///
/// # Returns
/// * `CropSummary` - Seven entries, or an empty map if no row carries the label
///
/// # Examples
/// ```
/// use cropdash::{Dataset, Feature, Record, aggregate};
///
/// let dataset = Dataset::from_records(vec![
///     Record::new([80.0, 40.0, 40.0, 21.0, 80.0, 6.0, 200.0], "rice"),
///     Record::new([100.0, 50.0, 44.0, 23.0, 84.0, 7.0, 240.0], "rice"),
/// ]);
///
/// let summary = aggregate(&dataset, "rice");
/// assert_eq!(summary[&Feature::N].mean, 90.0);
/// assert!(aggregate(&dataset, "maize").is_empty());
/// ```
pub fn aggregate(dataset: &Dataset, crop: &str) -> CropSummary {
    let rows: Vec<&Record> = dataset.rows_for(crop).collect();
    if rows.is_empty() {
        return CropSummary::new();
    }

    FEATURES
        .iter()
        .map(|&feature| (feature, feature_statistics(&rows, feature)))
        .collect()
}

// `rows` is never empty here
fn feature_statistics(rows: &[&Record], feature: Feature) -> CropStatistics {
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for record in rows {
        let value = record.get(feature);
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    CropStatistics {
        mean: round2(sum / rows.len() as f64),
        min: round2(min),
        max: round2(max),
    }
}

/// Round to two decimal places, ties to even.
///
/// The tie is decided on the value scaled by 100, so decimal literals
/// that binary floats store just below a tie (such as `1.005`) round down.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
