use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use aptstat_analysis::dataset::ApartmentDataset;

/// Write `value` as pretty-printed JSON to the file at `path`
pub fn write_json_file<T>(path: &Path, value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    Ok(())
}

/// Read an apartment dataset from a CSV file
pub fn read_dataset_file<P>(path: P) -> anyhow::Result<ApartmentDataset>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    eprintln!("Loading apartment data from {}...", path.display());
    let dataset = ApartmentDataset::from_path(path)
        .with_context(|| format!("Failed to load apartment data file: {}", path.display()))?;
    eprintln!("Loaded {} records", dataset.records().len());
    Ok(dataset)
}

/// Create `dir` (and its parents) if it does not exist yet
pub fn create_output_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// Write `rows` under `header` as a CSV file
pub fn write_csv_file<H, R, I>(path: &Path, header: H, rows: R) -> anyhow::Result<()>
where
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
    R: IntoIterator<Item = I>,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    writer
        .write_record(header)
        .with_context(|| format!("Failed to write CSV header to {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;
    Ok(())
}

/// Turn a free-form label into a file name component
///
/// Letters, digits, `-` and `_` are kept; everything else becomes `_`.
pub fn file_name_component(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Format an optional value for a CSV cell, leaving missing values empty
pub fn optional_cell(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_file() {
        let dir = std::env::temp_dir().join(format!("aptstat-util-json-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("value.json");

        write_json_file(&path, &serde_json::json!({ "p": 0.4, "seed": 123 })).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["seed"], 123);

        let result = write_json_file(&dir.join("missing").join("value.json"), &1);
        assert!(result.is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_name_component() {
        assert_eq!(file_name_component("Warsaw"), "Warsaw");
        assert_eq!(file_name_component("Zielona Góra"), "Zielona_Góra");
        assert_eq!(file_name_component("a/b\\c"), "a_b_c");
        assert_eq!(file_name_component("Bielsko-Biała"), "Bielsko-Biała");
    }

    #[test]
    fn test_optional_cell() {
        assert_eq!(optional_cell(Some(0.5)), "0.5");
        assert_eq!(optional_cell(None), "");
    }
}
