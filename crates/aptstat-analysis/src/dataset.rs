//! Apartment sales dataset loaded from CSV.
//!
//! The file must have a header row. Only the columns of [`ApartmentRecord`] are
//! read; any other column is ignored, and a missing optional column reads as
//! all-missing. Empty cells are missing values, and so are non-finite numbers
//! (`NaN`, `inf`).
//!
//! Every analysis picks its own columns and drops the records that miss any of
//! them, so one dataset can feed analyses with different completeness
//! requirements.
//!
//! # Example
//!
//! ```
//! use aptstat_analysis::dataset::{ApartmentDataset, NumericColumn};
//!
//! let csv = "\
//! price,area_m2,bedrooms,floor,city,district_name
//! 500000,50,2,3,Warsaw,Mokotow
//! 350000,,1,,Krakow,
//! ";
//! let dataset = ApartmentDataset::from_reader(csv.as_bytes())?;
//! assert_eq!(dataset.records().len(), 2);
//!
//! // Only the first record has both price and area
//! let columns = dataset.complete_numeric_columns(&[NumericColumn::Price, NumericColumn::AreaM2]);
//! assert_eq!(columns, vec![vec![500_000.0], vec![50.0]]);
//! # Ok::<(), aptstat_analysis::dataset::DatasetError>(())
//! ```

use std::{collections::BTreeMap, fmt, fs::File, io, path::Path};

use serde::{Deserialize, Serialize};

/// Errors raised while reading a dataset.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DatasetError {
    #[display("failed to read apartment data: {_0}")]
    Csv(csv::Error),
}

/// One apartment sale.
///
/// All fields are optional at load time; analyses filter on the ones they need.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ApartmentRecord {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub area_m2: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub floor: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
}

/// Numeric columns of [`ApartmentRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericColumn {
    Price,
    AreaM2,
    Bedrooms,
    Floor,
}

impl NumericColumn {
    /// All numeric columns, in CSV order.
    pub const ALL: [Self; 4] = [Self::Price, Self::AreaM2, Self::Bedrooms, Self::Floor];

    /// Column name as it appears in the CSV header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::AreaM2 => "area_m2",
            Self::Bedrooms => "bedrooms",
            Self::Floor => "floor",
        }
    }

    /// The value of this column in `record`, if present and finite.
    #[must_use]
    pub fn get(self, record: &ApartmentRecord) -> Option<f64> {
        let value = match self {
            Self::Price => record.price,
            Self::AreaM2 => record.area_m2,
            Self::Bedrooms => record.bedrooms,
            Self::Floor => record.floor,
        };
        value.filter(|v| v.is_finite())
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorical columns of [`ApartmentRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoricalColumn {
    City,
    DistrictName,
}

impl CategoricalColumn {
    /// Column name as it appears in the CSV header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::DistrictName => "district_name",
        }
    }

    /// The level of this column in `record`, if present and non-empty.
    #[must_use]
    pub fn get(self, record: &ApartmentRecord) -> Option<&str> {
        let value = match self {
            Self::City => record.city.as_deref(),
            Self::DistrictName => record.district_name.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// In-memory apartment dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApartmentDataset {
    records: Vec<ApartmentRecord>,
}

impl ApartmentDataset {
    /// Wraps already loaded records.
    #[must_use]
    pub fn new(records: Vec<ApartmentRecord>) -> Self {
        Self { records }
    }

    /// Reads a dataset from CSV text with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Csv`] on I/O errors, malformed rows, or cells
    /// that cannot be parsed as the column type.
    pub fn from_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = reader
            .deserialize::<ApartmentRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Reads a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// See [`ApartmentDataset::from_reader`].
    pub fn from_path<P>(path: P) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    #[must_use]
    pub fn records(&self) -> &[ApartmentRecord] {
        &self.records
    }

    /// Prices grouped by city, over records that have both.
    ///
    /// Cities are sorted by name; prices keep file order.
    #[must_use]
    pub fn prices_by_city(&self) -> BTreeMap<String, Vec<f64>> {
        let mut groups = BTreeMap::<String, Vec<f64>>::new();
        for record in &self.records {
            let (Some(city), Some(price)) = (
                CategoricalColumn::City.get(record),
                NumericColumn::Price.get(record),
            ) else {
                continue;
            };
            groups.entry(city.to_owned()).or_default().push(price);
        }
        groups
    }

    /// Values of `columns` over the records complete in all of them.
    ///
    /// Returns one vector per requested column, all of the same length.
    #[must_use]
    pub fn complete_numeric_columns(&self, columns: &[NumericColumn]) -> Vec<Vec<f64>> {
        let mut values = vec![Vec::new(); columns.len()];
        for record in &self.records {
            let Some(row) = columns
                .iter()
                .map(|column| column.get(record))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            for (column_values, value) in values.iter_mut().zip(row) {
                column_values.push(value);
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,price,area_m2,bedrooms,floor,city,district_name,extra
1,500000,50.5,2,3,Warsaw,Mokotow,x
2,350000,,1,,Krakow,,y
3,,40,1,2,Warsaw,Wola,z
4,420000,45,2,NaN,Krakow,Podgorze,w
5,610000,70,3,5,,Wola,v
";

    #[test]
    fn test_from_reader_parses_optional_cells() {
        let dataset = ApartmentDataset::from_reader(CSV.as_bytes()).unwrap();
        let records = dataset.records();
        assert_eq!(records.len(), 5);
        assert_eq!(
            records[0],
            ApartmentRecord {
                price: Some(500_000.0),
                area_m2: Some(50.5),
                bedrooms: Some(2.0),
                floor: Some(3.0),
                city: Some("Warsaw".to_owned()),
                district_name: Some("Mokotow".to_owned()),
            }
        );
        assert_eq!(records[1].area_m2, None);
        assert_eq!(records[1].district_name, None);
        assert_eq!(records[2].price, None);
        assert!(records[3].floor.is_some_and(f64::is_nan));
    }

    #[test]
    fn test_missing_optional_columns() {
        let dataset = ApartmentDataset::from_reader("price,city\n1,A\n2,B\n".as_bytes()).unwrap();
        assert_eq!(dataset.records().len(), 2);
        assert!(dataset.records().iter().all(|r| r.area_m2.is_none()));
    }

    #[test]
    fn test_unparsable_cell_is_an_error() {
        let result = ApartmentDataset::from_reader("price,city\nabc,A\n".as_bytes());
        assert!(matches!(result, Err(DatasetError::Csv(_))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = ApartmentDataset::from_path("/nonexistent/apartments.csv");
        assert!(matches!(result, Err(DatasetError::Csv(_))));
    }

    #[test]
    fn test_from_path_matches_from_reader() {
        let path = std::env::temp_dir().join(format!("aptstat-dataset-{}.csv", std::process::id()));
        std::fs::write(&path, CSV).unwrap();

        let from_path = ApartmentDataset::from_path(&path).unwrap();
        let from_reader = ApartmentDataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(from_path.records().len(), 5);
        assert_eq!(from_path.records()[..3], from_reader.records()[..3]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_prices_by_city() {
        let dataset = ApartmentDataset::from_reader(CSV.as_bytes()).unwrap();
        let groups = dataset.prices_by_city();
        assert_eq!(groups.keys().collect::<Vec<_>>(), ["Krakow", "Warsaw"]);
        assert_eq!(groups["Krakow"], [350_000.0, 420_000.0]);
        assert_eq!(groups["Warsaw"], [500_000.0]);
    }

    #[test]
    fn test_complete_numeric_columns_drops_non_finite() {
        let dataset = ApartmentDataset::from_reader(CSV.as_bytes()).unwrap();
        let columns = dataset.complete_numeric_columns(&NumericColumn::ALL);
        assert_eq!(columns.len(), 4);
        // Records 1 and 5 are complete; record 4 has a NaN floor
        assert_eq!(columns[0], [500_000.0, 610_000.0]);
        assert_eq!(columns[3], [3.0, 5.0]);
    }
}
