use std::collections::HashSet;

use crate::record::{FEATURES, Feature, Record};

/// The immutable in-memory crop table.
///
/// Built once at startup and shared read-only for the lifetime of the
/// process. The distinct crop labels are computed at construction time,
/// in the order they first appear in the data.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    crop_labels: Vec<String>,
}

impl Dataset {
    /// Wraps already validated records.
    ///
    /// # Examples
    /// ```
    /// use cropdash::{Dataset, Record};
    ///
    /// let dataset = Dataset::from_records(vec![
    ///     Record::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9], "rice"),
    ///     Record::new([71.0, 54.0, 16.0, 22.6, 63.7, 5.7, 87.8], "maize"),
    ///     Record::new([85.0, 58.0, 41.0, 21.8, 80.3, 7.0, 226.7], "rice"),
    /// ]);
    ///
    /// assert_eq!(dataset.len(), 3);
    /// assert_eq!(dataset.crop_labels(), ["rice", "maize"]);
    /// ```
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen = HashSet::new();
        let mut crop_labels = Vec::new();
        for record in &records {
            if seen.insert(record.label()) {
                crop_labels.push(record.label().to_string());
            }
        }

        Dataset {
            records,
            crop_labels,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct crop labels in first-occurrence order.
    pub fn crop_labels(&self) -> &[String] {
        &self.crop_labels
    }

    /// The seven feature column names, in canonical order.
    pub fn feature_names(&self) -> [&'static str; 7] {
        FEATURES.map(Feature::name)
    }

    pub fn contains_crop(&self, crop: &str) -> bool {
        self.crop_labels.iter().any(|label| label == crop)
    }

    /// Rows carrying the given crop label, in dataset order.
    pub fn rows_for<'a>(&'a self, crop: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |record| record.label() == crop)
    }
}
