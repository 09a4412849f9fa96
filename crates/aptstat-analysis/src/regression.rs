//! Ordinary least squares regression of apartment prices.
//!
//! The price model is
//!
//! ```text
//! price ~ const + area_m2 + bedrooms + C(city) + C(district_name)
//! ```
//!
//! fitted over the records complete in those five columns. Categorical columns
//! are dummy encoded with the lexicographically first level as reference (see
//! [`dummy_encode`]).
//!
//! [`fit_ols`] is independent of the apartment data and solves any full-rank
//! least squares problem through a singular value decomposition, reporting the
//! usual inference statistics (standard errors, Student t tests, overall F
//! test).

use std::collections::BTreeSet;

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, FisherSnedecor, StudentsT};

use crate::dataset::{ApartmentDataset, CategoricalColumn, NumericColumn};

/// Name of the intercept column.
pub const INTERCEPT: &str = "const";

/// Singular values below this fraction of the largest one count as zero.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Errors raised while fitting a regression.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum RegressionError {
    #[display("design matrix has no columns")]
    EmptyDesign,
    #[display("{observations} observations are not enough to fit {parameters} parameters")]
    TooFewObservations {
        observations: usize,
        parameters: usize,
    },
    #[display("design matrix is singular (rank {rank} < {parameters} parameters)")]
    SingularDesign { rank: usize, parameters: usize },
    #[display(
        "design has {rows}x{columns} entries but {names} names and {responses} responses"
    )]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        names: usize,
        responses: usize,
    },
    #[display("failed to solve least squares: {message}")]
    Solve { message: String },
    #[display("invalid test distribution: {message}")]
    Distribution { message: String },
}

/// Indicator columns of one categorical variable.
#[derive(Debug, Clone, PartialEq)]
pub struct DummyColumns {
    /// Dropped level, `None` when there are no levels at all.
    pub reference: Option<String>,
    /// `<column>_<level>` for every non-reference level, in level order.
    pub names: Vec<String>,
    /// One 0/1 vector per entry of `names`, aligned with the input values.
    pub columns: Vec<Vec<f64>>,
}

/// Dummy encodes `values` of the categorical column `column`.
///
/// Levels are sorted lexicographically and the first one is dropped.
///
/// # Examples
///
/// ```
/// use aptstat_analysis::regression::dummy_encode;
///
/// let dummies = dummy_encode("city", &["Lodz", "Gdansk", "Poznan", "Gdansk"]);
/// assert_eq!(dummies.reference.as_deref(), Some("Gdansk"));
/// assert_eq!(dummies.names, ["city_Lodz", "city_Poznan"]);
/// assert_eq!(dummies.columns[0], [1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(dummies.columns[1], [0.0, 0.0, 1.0, 0.0]);
/// ```
#[must_use]
pub fn dummy_encode(column: &str, values: &[&str]) -> DummyColumns {
    let levels = values.iter().copied().collect::<BTreeSet<_>>();
    let mut levels = levels.into_iter();
    let reference = levels.next().map(str::to_owned);
    let (names, columns) = levels
        .map(|level| {
            let indicator = values
                .iter()
                .map(|&v| if v == level { 1.0 } else { 0.0 })
                .collect::<Vec<_>>();
            (format!("{column}_{level}"), indicator)
        })
        .unzip();
    DummyColumns {
        reference,
        names,
        columns,
    }
}

/// Response vector and design matrix with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub names: Vec<String>,
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

impl Design {
    /// Builds the price design from the records complete in `price`, `area_m2`,
    /// `bedrooms`, `city` and `district_name`.
    ///
    /// Columns are `const`, `area_m2`, `bedrooms`, then the city dummies and
    /// the district dummies.
    #[must_use]
    pub fn price_model(dataset: &ApartmentDataset) -> Self {
        let mut prices = vec![];
        let mut areas = vec![];
        let mut bedrooms = vec![];
        let mut cities = vec![];
        let mut districts = vec![];
        for record in dataset.records() {
            let (Some(price), Some(area), Some(beds), Some(city), Some(district)) = (
                NumericColumn::Price.get(record),
                NumericColumn::AreaM2.get(record),
                NumericColumn::Bedrooms.get(record),
                CategoricalColumn::City.get(record),
                CategoricalColumn::DistrictName.get(record),
            ) else {
                continue;
            };
            prices.push(price);
            areas.push(area);
            bedrooms.push(beds);
            cities.push(city);
            districts.push(district);
        }

        let city_dummies = dummy_encode(CategoricalColumn::City.name(), &cities);
        let district_dummies = dummy_encode(CategoricalColumn::DistrictName.name(), &districts);

        let mut names = vec![
            INTERCEPT.to_owned(),
            NumericColumn::AreaM2.name().to_owned(),
            NumericColumn::Bedrooms.name().to_owned(),
        ];
        let mut columns = vec![vec![1.0; prices.len()], areas, bedrooms];
        for dummies in [city_dummies, district_dummies] {
            names.extend(dummies.names);
            columns.extend(dummies.columns);
        }

        let x = DMatrix::from_fn(prices.len(), columns.len(), |i, j| columns[j][i]);
        Self {
            names,
            x,
            y: DVector::from_vec(prices),
        }
    }

    /// Fits the design by ordinary least squares.
    ///
    /// # Errors
    ///
    /// See [`fit_ols`].
    pub fn fit(&self) -> Result<OlsFit, RegressionError> {
        fit_ols(&self.names, &self.x, &self.y)
    }
}

/// One fitted coefficient with its t test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    /// Two-sided p-value of `estimate == 0`.
    pub p_value: f64,
}

/// Overall F test of all slopes being zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FTest {
    pub statistic: f64,
    pub p_value: f64,
}

/// Fitted least squares model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OlsFit {
    pub coefficients: Vec<Coefficient>,
    pub observations: usize,
    /// Number of slopes (parameters besides the intercept).
    pub df_model: usize,
    pub df_residual: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// `None` for an intercept-only model.
    pub f_test: Option<FTest>,
    pub residual_std_error: f64,
}

impl OlsFit {
    /// Coefficient named `name`.
    #[must_use]
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }
}

/// Fits `y = x * beta + e` by least squares.
///
/// `x` must contain an intercept column; R² and the F test are computed
/// against the intercept-only model.
///
/// # Errors
///
/// - [`RegressionError::ShapeMismatch`] if `names` or `y` do not match `x`
/// - [`RegressionError::EmptyDesign`] if `x` has no columns
/// - [`RegressionError::TooFewObservations`] unless there are more rows than
///   columns
/// - [`RegressionError::SingularDesign`] if `x` does not have full column rank
/// - [`RegressionError::Distribution`] if a test distribution cannot be built
///
/// # Examples
///
/// ```
/// use aptstat_analysis::regression::fit_ols;
/// use nalgebra::{DMatrix, DVector};
///
/// let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
/// let y = DVector::from_vec(vec![1.0, 3.0, 5.0, 7.0]);
/// let fit = fit_ols(&["const".to_owned(), "x".to_owned()], &x, &y)?;
/// assert!((fit.coefficients[1].estimate - 2.0).abs() < 1e-9);
/// # Ok::<(), aptstat_analysis::regression::RegressionError>(())
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn fit_ols(
    names: &[String],
    x: &DMatrix<f64>,
    y: &DVector<f64>,
) -> Result<OlsFit, RegressionError> {
    let (n, k) = x.shape();
    if names.len() != k || y.len() != n {
        return Err(RegressionError::ShapeMismatch {
            rows: n,
            columns: k,
            names: names.len(),
            responses: y.len(),
        });
    }
    if k == 0 {
        return Err(RegressionError::EmptyDesign);
    }
    if n <= k {
        return Err(RegressionError::TooFewObservations {
            observations: n,
            parameters: k,
        });
    }

    let svd = x.clone().svd(true, true);
    let max_singular = svd.singular_values.max();
    let tolerance = max_singular * RANK_TOLERANCE;
    let rank = svd.rank(tolerance);
    if rank < k {
        return Err(RegressionError::SingularDesign {
            rank,
            parameters: k,
        });
    }
    let beta = svd
        .solve(y, tolerance)
        .map_err(|message| RegressionError::Solve {
            message: message.to_owned(),
        })?;
    let v_t = svd.v_t.as_ref().ok_or_else(|| RegressionError::Solve {
        message: "right singular vectors were not computed".to_owned(),
    })?;

    let residuals = y - x * &beta;
    let ssr = residuals.norm_squared();
    let mean_y = y.mean();
    let tss = y.iter().map(|v| (v - mean_y).powi(2)).sum::<f64>();

    let df_residual = n - k;
    let df_model = k - 1;
    let sigma2 = ssr / df_residual as f64;

    let students_t = StudentsT::new(0.0, 1.0, df_residual as f64).map_err(|e| {
        RegressionError::Distribution {
            message: e.to_string(),
        }
    })?;
    let coefficients = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            // diag((X'X)^-1) = sum_i V[j,i]^2 / s_i^2
            let unscaled_variance = (0..k)
                .map(|i| (v_t[(i, j)] / svd.singular_values[i]).powi(2))
                .sum::<f64>();
            let estimate = beta[j];
            let std_error = (sigma2 * unscaled_variance).sqrt();
            let t_value = estimate / std_error;
            Coefficient {
                name: name.clone(),
                estimate,
                std_error,
                t_value,
                p_value: 2.0 * students_t.sf(t_value.abs()),
            }
        })
        .collect();

    let r_squared = 1.0 - ssr / tss;
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n - 1) as f64 / df_residual as f64;
    let f_test = if df_model == 0 {
        None
    } else {
        let statistic = ((tss - ssr) / df_model as f64) / sigma2;
        let fisher = FisherSnedecor::new(df_model as f64, df_residual as f64).map_err(|e| {
            RegressionError::Distribution {
                message: e.to_string(),
            }
        })?;
        Some(FTest {
            statistic,
            p_value: fisher.sf(statistic),
        })
    };

    Ok(OlsFit {
        coefficients,
        observations: n,
        df_model,
        df_residual,
        r_squared,
        adj_r_squared,
        f_test,
        residual_std_error: sigma2.sqrt(),
    })
}
