use serde::Serialize;

use crate::record::{FEATURES, Feature};
use crate::stats::CropSummary;

/// Display strings for one feature's statistics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Readout {
    pub feature: Feature,
    pub label: &'static str,
    pub mean: String,
    pub range: String,
}

const NO_DATA: &str = "n/a";

/// Render a crop summary as seven `Mean:` / `Range:` pairs in column order.
///
/// An empty summary (unknown crop) yields `n/a` for every feature.
pub fn readouts(summary: &CropSummary) -> Vec<Readout> {
    FEATURES
        .iter()
        .map(|&feature| {
            let (mean, range) = match summary.get(&feature) {
                Some(stats) => (
                    format!("Mean: {}", format_value(stats.mean)),
                    format!(
                        "Range: {} - {}",
                        format_value(stats.min),
                        format_value(stats.max)
                    ),
                ),
                None => (format!("Mean: {NO_DATA}"), format!("Range: {NO_DATA}")),
            };
            Readout {
                feature,
                label: feature.display_label(),
                mean,
                range,
            }
        })
        .collect()
}

/// Shortest round-trip form, always with a fractional part (`90.0`, `6.43`).
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CropStatistics;

    #[test]
    fn integral_values_keep_one_decimal() {
        assert_eq!(format_value(90.0), "90.0");
        assert_eq!(format_value(6.43), "6.43");
        assert_eq!(format_value(20.5), "20.5");
        assert_eq!(format_value(-3.0), "-3.0");
    }

    #[test]
    fn empty_summary_renders_placeholders() {
        let rendered = readouts(&CropSummary::new());
        assert_eq!(rendered.len(), 7);
        assert!(rendered.iter().all(|r| r.mean == "Mean: n/a" && r.range == "Range: n/a"));
    }

    #[test]
    fn readouts_follow_column_order() {
        let mut summary = CropSummary::new();
        for feature in FEATURES {
            summary.insert(
                feature,
                CropStatistics {
                    mean: 90.0,
                    min: 80.0,
                    max: 100.25,
                },
            );
        }

        let rendered = readouts(&summary);
        let labels: Vec<_> = rendered.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            ["N (Nitrogen)", "P (Phosphorus)", "K (Potassium)", "Temperature", "Humidity", "pH", "Rainfall"]
        );
        assert_eq!(rendered[0].mean, "Mean: 90.0");
        assert_eq!(rendered[0].range, "Range: 80.0 - 100.25");
    }
}
