/*!
# Crop Dashboard

A login-protected web dashboard over the crop recommendation dataset,
built in Rust.

## Overview

The dataset pairs seven soil and climate measurements (N, P, K,
temperature, humidity, ph, rainfall) with the crop best suited to them.
The dashboard shows per-crop statistics for every measurement and a
violin plot comparing the distribution of one measurement across crops.

## Architecture

### Core
- **loader**: reads the CSV file once at startup into an immutable `Dataset`
- **stats**: per-crop mean/min/max of every feature, rounded to two decimals
- **series**: per-crop raw value series of one feature
- **readout**: `Mean: ...` / `Range: ... - ...` display strings
- **figure**: violin chart payload in the shape Plotly consumes

The core holds no global state: the dataset is built once and passed
into every operation.

### Web layer (`web` feature)
- **config**: command-line and environment configuration
- **auth**: in-memory accounts, cookie sessions and the login guard
- **graph**: server-side PNG box plots
- **app**: routes, templates and request logging

## REST API Endpoints

- `/dashboard/api/options` - Crop and feature selection lists
- `/dashboard/api/statistics?crop=<label>` - Statistics and readouts for one crop
- `/dashboard/api/violin?feature=<name>` - Violin figure for one feature
- `/dashboard/api/violin.png?feature=<name>` - Rendered box plot for one feature
*/

pub mod dataset;
pub mod error;
pub mod figure;
pub mod loader;
pub mod readout;
pub mod record;
pub mod series;
pub mod stats;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod auth;
#[cfg(feature = "web")]
pub mod config;
#[cfg(feature = "web")]
pub mod graph;

/// Re-export the core types to make them easier to use
pub use dataset::Dataset;
pub use error::{InvalidFeatureError, LoadError};
pub use figure::{ViolinFigure, violin_figure};
pub use loader::{load, load_from_reader};
pub use readout::{Readout, readouts};
pub use record::{FEATURES, Feature, Record};
pub use series::{FeatureSeries, build_series, series_for};
pub use stats::{CropStatistics, CropSummary, aggregate, round2};
