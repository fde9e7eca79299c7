use cropdash::{Feature, LoadError, load, load_from_reader};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const HEADER: &str = "N,P,K,temperature,humidity,ph,rainfall,label";

// Helper function to write a CSV fixture to disk
fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/crop_sample.csv")
}

#[test]
fn test_load_sample_file() {
    let dataset = load(sample_path()).expect("sample dataset loads");

    assert_eq!(dataset.len(), 10);
    assert_eq!(dataset.crop_labels(), ["rice", "maize", "chickpea"]);
    assert_eq!(
        dataset.feature_names(),
        ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"]
    );

    let first = &dataset.records()[0];
    assert_eq!(first.label(), "rice");
    assert_eq!(first.get(Feature::N), 90.0);
    assert_eq!(first.get(Feature::Ph), 6.502985292);
    println!("✓ Sample dataset loaded with {} records", dataset.len());
}

#[test]
fn test_load_from_temp_file() {
    let file = write_fixture(&format!("{HEADER}\n80,40,40,21,80,6,200,rice\n"));
    let dataset = load(file.path()).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.crop_labels(), ["rice"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load("no/such/crops.csv").unwrap_err();
    match err {
        LoadError::Io { path, .. } => assert_eq!(path, PathBuf::from("no/such/crops.csv")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_columns_in_any_order_with_extras() {
    let csv = "label,rainfall,ph,humidity,temperature,K,P,N,notes\n\
               maize, 87.5 ,5.7,63.7,22.6,16,54,71,first\n";
    let dataset = load_from_reader(csv.as_bytes()).unwrap();

    let record = &dataset.records()[0];
    assert_eq!(record.label(), "maize");
    assert_eq!(record.get(Feature::N), 71.0);
    assert_eq!(record.get(Feature::Rainfall), 87.5);
    assert_eq!(record.get(Feature::Temperature), 22.6);
}

#[test]
fn test_missing_column_is_rejected() {
    let csv = "N,P,K,temperature,humidity,ph,label\n1,2,3,4,5,6,rice\n";
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "rainfall"));
}

#[test]
fn test_column_names_match_exactly() {
    let csv = "n,P,K,temperature,humidity,ph,rainfall,label\n1,2,3,4,5,6,7,rice\n";
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "N"));
}

#[test]
fn test_padded_header_is_not_a_match() {
    let csv = " N,P,K,temperature,humidity,ph,rainfall,label\n1,2,3,4,5,6,7,rice\n";
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "N"));

    let csv = "N,P,K,temperature,humidity,ph,rainfall,label \n1,2,3,4,5,6,7,rice\n";
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "label"));
}

#[test]
fn test_labels_are_kept_verbatim() {
    let csv = format!("{HEADER}\n1,2,3,4,5,6,7,rice\n1,2,3,4,5,6,7, rice \n");
    let dataset = load_from_reader(csv.as_bytes()).unwrap();

    assert_eq!(dataset.records()[1].label(), " rice ");
    assert_eq!(dataset.crop_labels(), ["rice", " rice "]);
    println!("✓ Padded labels stay distinct crops");
}

#[test]
fn test_duplicate_column_is_rejected() {
    let csv = "N,P,K,temperature,humidity,ph,rainfall,label,ph\n1,2,3,4,5,6,7,rice,6\n";
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateColumn(ref c) if c == "ph"));
}

#[test]
fn test_invalid_numbers_are_rejected() {
    for bad in ["acidic", "", "NaN", "inf"] {
        let csv = format!("{HEADER}\n1,2,3,4,5,{bad},7,rice\n");
        let err = load_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidValue { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "ph");
                assert_eq!(value, bad);
            }
            other => panic!("expected InvalidValue for '{bad}', got {other:?}"),
        }
    }
}

#[test]
fn test_empty_label_is_rejected() {
    let csv = format!("{HEADER}\n1,2,3,4,5,6,7,rice\n1,2,3,4,5,6,7,\n");
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyLabel { line: 3 }));

    let csv = format!("{HEADER}\n1,2,3,4,5,6,7,   \n");
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyLabel { line: 2 }));
}

#[test]
fn test_ragged_row_is_csv_error() {
    let csv = format!("{HEADER}\n1,2,3,4,5,6,rice\n");
    let err = load_from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
}

#[test]
fn test_header_only_file_is_empty_dataset() {
    let dataset = load_from_reader(format!("{HEADER}\n").as_bytes()).unwrap();
    assert!(dataset.is_empty());
    assert!(dataset.crop_labels().is_empty());
}
