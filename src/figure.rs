use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::InvalidFeatureError;
use crate::record::Feature;
use crate::series::{FeatureSeries, series_for};

/// Chart payload for the violin plot, shaped the way Plotly expects a figure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViolinFigure {
    pub data: Vec<ViolinTrace>,
    pub layout: Layout,
}

/// One violin per crop
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViolinTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub y: Vec<f64>,
    #[serde(rename = "box")]
    pub inner_box: Toggle,
    pub meanline: Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Toggle {
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub yaxis: Axis,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

impl ViolinFigure {
    /// Wrap already grouped series; every trace shows its box and mean line.
    pub fn from_series(feature: Feature, series: Vec<FeatureSeries>) -> Self {
        let data = series
            .into_iter()
            .map(|s| ViolinTrace {
                kind: "violin",
                name: s.crop,
                y: s.values,
                inner_box: Toggle { visible: true },
                meanline: Toggle { visible: true },
            })
            .collect();

        ViolinFigure {
            data,
            layout: Layout {
                title: format!("Violin plot of {}", feature.name()),
                yaxis: Axis {
                    title: feature.name().to_string(),
                },
            },
        }
    }
}

/// Build the violin figure for a feature given by name.
pub fn violin_figure(
    dataset: &Dataset,
    feature_name: &str,
) -> Result<ViolinFigure, InvalidFeatureError> {
    let feature: Feature = feature_name.parse()?;
    Ok(ViolinFigure::from_series(feature, series_for(dataset, feature)))
}
