//! Pairwise Spearman correlation matrix over numeric columns.

use aptstat_stats::correlation::spearman;
use serde::Serialize;

use crate::dataset::{ApartmentDataset, NumericColumn};

/// Square, symmetric correlation matrix with labelled rows and columns.
///
/// An entry is `None` when the correlation is undefined (fewer than two
/// complete records, or a constant column).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Number of records complete in every column.
    pub observations: usize,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Spearman correlation of every pair of `columns`, over the records of
    /// `dataset` complete in all of them.
    #[must_use]
    pub fn spearman(dataset: &ApartmentDataset, columns: &[NumericColumn]) -> Self {
        let data = dataset.complete_numeric_columns(columns);
        let observations = data.first().map_or(0, Vec::len);
        let values = data
            .iter()
            .map(|x| data.iter().map(|y| spearman(x, y)).collect())
            .collect();
        Self {
            labels: columns.iter().map(|c| c.name().to_owned()).collect(),
            observations,
            values,
        }
    }

    /// Correlation between the columns labelled `row` and `column`.
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == row)?;
        let j = self.labels.iter().position(|l| l == column)?;
        self.values[i][j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ApartmentRecord;

    fn record(price: f64, area_m2: f64, bedrooms: f64, floor: Option<f64>) -> ApartmentRecord {
        ApartmentRecord {
            price: Some(price),
            area_m2: Some(area_m2),
            bedrooms: Some(bedrooms),
            floor,
            ..ApartmentRecord::default()
        }
    }

    #[test]
    fn test_spearman_matrix() {
        let dataset = ApartmentDataset::new(vec![
            record(100.0, 30.0, 4.0, Some(1.0)),
            record(200.0, 45.0, 3.0, Some(1.0)),
            record(300.0, 80.0, 2.0, Some(1.0)),
            record(400.0, 81.0, 1.0, Some(1.0)),
            record(999.0, 1.0, 9.0, None),
        ]);
        let matrix = CorrelationMatrix::spearman(&dataset, &NumericColumn::ALL);
        assert_eq!(matrix.labels, ["price", "area_m2", "bedrooms", "floor"]);
        assert_eq!(matrix.observations, 4);
        assert_eq!(matrix.values.len(), 4);
        assert!((matrix.get("price", "price").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get("price", "area_m2").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get("price", "bedrooms").unwrap() + 1.0).abs() < 1e-12);
        // Constant column
        assert_eq!(matrix.get("price", "floor"), None);
        assert_eq!(matrix.get("floor", "floor"), None);
        assert_eq!(matrix.get("price", "unknown"), None);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
    }

    #[test]
    fn test_empty_dataset() {
        let matrix =
            CorrelationMatrix::spearman(&ApartmentDataset::default(), &NumericColumn::ALL);
        assert_eq!(matrix.observations, 0);
        assert!(matrix.values.iter().flatten().all(Option::is_none));
    }
}
