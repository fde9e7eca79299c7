use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};

use crate::dataset::Dataset;
use crate::error::LoadError;
use crate::record::{FEATURES, LABEL_COLUMN, Record};

/// Load the crop dataset from a CSV file
///
/// The header row must name the columns `N`, `P`, `K`, `temperature`,
/// `humidity`, `ph`, `rainfall` and `label`, in any order. Additional
/// columns are ignored. Header names must match exactly, surrounding
/// whitespace included. Numeric cells may be padded with spaces; crop
/// labels are kept verbatim.
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// * `Result<Dataset, LoadError>` - The loaded dataset or the reason it could not be loaded
///
/// # Examples
/// ```no_run
/// use cropdash::loader::load;
///
/// match load("data/Crop_recommendation.csv") {
///     Ok(dataset) => println!("Loaded {} records", dataset.len()),
///     Err(e) => eprintln!("Error loading dataset: {}", e),
/// }
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = load_from_reader(file)?;
    info!(
        "Loaded {} records covering {} crops from {}",
        dataset.len(),
        dataset.crop_labels().len(),
        path.display()
    );
    Ok(dataset)
}

/// Load the crop dataset from any CSV byte stream
///
/// Same rules as [`load`]; useful for in-memory fixtures.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new().from_reader(reader);

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(layout.parse_row(&row)?);
    }

    Ok(Dataset::from_records(records))
}

/// Positions of the required columns inside a CSV row
struct ColumnLayout {
    features: [usize; 7],
    label: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let mut features = [0; 7];
        for (slot, feature) in features.iter_mut().zip(FEATURES) {
            *slot = find_column(headers, feature.name())?;
        }
        let label = find_column(headers, LABEL_COLUMN)?;

        for (idx, name) in headers.iter().enumerate() {
            if idx != label && !features.contains(&idx) {
                debug!("Ignoring extra column '{}'", name);
            }
        }

        Ok(ColumnLayout { features, label })
    }

    fn parse_row(&self, row: &StringRecord) -> Result<Record, LoadError> {
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();

        let mut values = [0.0; 7];
        for ((value, &idx), feature) in values.iter_mut().zip(&self.features).zip(FEATURES) {
            let raw = row.get(idx).unwrap_or("");
            *value = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LoadError::InvalidValue {
                    line,
                    column: feature.name().to_string(),
                    value: raw.to_string(),
                })?;
        }

        let label = row.get(self.label).unwrap_or("");
        if label.trim().is_empty() {
            return Err(LoadError::EmptyLabel { line });
        }

        Ok(Record::new(values, label))
    }
}

// Exactly one header must carry the name
fn find_column(headers: &StringRecord, name: &str) -> Result<usize, LoadError> {
    let mut matches = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == name)
        .map(|(idx, _)| idx);

    let idx = matches
        .next()
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    if matches.next().is_some() {
        return Err(LoadError::DuplicateColumn(name.to_string()));
    }
    Ok(idx)
}
