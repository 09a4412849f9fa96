//! Plot data export command
//!
//! Writes the data behind the price box plots, per-city histograms and the
//! Spearman correlation heatmap as CSV files for an external renderer.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use aptstat_analysis::{
    correlation::CorrelationMatrix,
    dataset::{ApartmentDataset, NumericColumn},
};
use aptstat_stats::{boxplot::BoxPlotSummary, histogram::Histogram};

use crate::util;

const DEFAULT_HISTOGRAM_BINS: usize = 40;

const BOXPLOT_FILE: &str = "price_boxplot_by_city.csv";
const BOXPLOT_OUTLIERS_FILE: &str = "price_boxplot_outliers_by_city.csv";
const HEATMAP_FILE: &str = "spearman_correlation_heatmap.csv";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlotDataArg {
    /// Path to the apartment data CSV file
    pub data: PathBuf,
    /// Output directory for the CSV files
    #[arg(long)]
    pub output_dir: PathBuf,
    /// Number of equal-width bins of each price histogram
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub histogram_bins: usize,
}

pub(crate) fn run(arg: &PlotDataArg) -> anyhow::Result<()> {
    let PlotDataArg {
        data,
        output_dir,
        histogram_bins,
    } = arg;
    if *histogram_bins == 0 {
        anyhow::bail!("--histogram-bins must be at least 1");
    }

    let dataset = util::read_dataset_file(data)?;
    util::create_output_dir(output_dir)?;

    save_price_boxplots(output_dir, &dataset)?;
    save_price_histograms(output_dir, &dataset, *histogram_bins)?;
    save_correlation_heatmap(output_dir, &dataset)?;

    eprintln!("Plot data saved to: {}", output_dir.display());
    Ok(())
}

fn save_price_boxplots(dir: &Path, dataset: &ApartmentDataset) -> anyhow::Result<()> {
    eprintln!("Computing price box plots by city...");
    let boxplots = dataset
        .prices_by_city()
        .into_iter()
        .filter_map(|(city, prices)| {
            let count = prices.len();
            BoxPlotSummary::new(prices).map(|summary| (city, count, summary))
        })
        .collect::<Vec<_>>();

    let path = dir.join(BOXPLOT_FILE);
    util::write_csv_file(
        &path,
        [
            "city",
            "count",
            "lower_whisker",
            "q1",
            "median",
            "q3",
            "upper_whisker",
            "lower_fence",
            "upper_fence",
            "outliers",
        ],
        boxplots.iter().map(|(city, count, summary)| {
            [
                city.clone(),
                count.to_string(),
                summary.lower_whisker.to_string(),
                summary.q1.to_string(),
                summary.median.to_string(),
                summary.q3.to_string(),
                summary.upper_whisker.to_string(),
                summary.lower_fence.to_string(),
                summary.upper_fence.to_string(),
                summary.outlier_count().to_string(),
            ]
        }),
    )?;
    eprintln!("Saved: {}", path.display());

    let path = dir.join(BOXPLOT_OUTLIERS_FILE);
    util::write_csv_file(
        &path,
        ["city", "price"],
        boxplots.iter().flat_map(|(city, _, summary)| {
            summary
                .outliers
                .iter()
                .map(move |price| [city.clone(), price.to_string()])
        }),
    )?;
    eprintln!("Saved: {}", path.display());

    Ok(())
}

fn save_price_histograms(
    dir: &Path,
    dataset: &ApartmentDataset,
    num_bins: usize,
) -> anyhow::Result<()> {
    eprintln!("Computing price histograms by city ({num_bins} bins)...");
    let mut file_names = HashSet::new();
    for (city, prices) in dataset.prices_by_city() {
        let histogram = Histogram::new(prices, num_bins);
        let path = dir.join(histogram_file_name(&city, &mut file_names));
        util::write_csv_file(
            &path,
            ["city", "bin_start", "bin_end", "count"],
            histogram.bins.iter().map(|bin| {
                [
                    city.clone(),
                    bin.range.start.to_string(),
                    bin.range.end.to_string(),
                    bin.count.to_string(),
                ]
            }),
        )?;
        eprintln!("Saved: {}", path.display());
    }
    Ok(())
}

/// File name of the histogram of `city`, distinct from every name in `taken`
///
/// Cities whose sanitized names collide get a numeric suffix (`_2`, `_3`, ...).
fn histogram_file_name(city: &str, taken: &mut HashSet<String>) -> String {
    let stem = util::file_name_component(city);
    let mut file_name = format!("price_histogram_{stem}.csv");
    let mut suffix = 2;
    while !taken.insert(file_name.clone()) {
        file_name = format!("price_histogram_{stem}_{suffix}.csv");
        suffix += 1;
    }
    file_name
}

fn save_correlation_heatmap(dir: &Path, dataset: &ApartmentDataset) -> anyhow::Result<()> {
    eprintln!("Computing Spearman correlation matrix...");
    let matrix = CorrelationMatrix::spearman(dataset, &NumericColumn::ALL);
    eprintln!(
        "Correlation computed over {} complete records",
        matrix.observations
    );

    let path = dir.join(HEATMAP_FILE);
    let header = std::iter::once(String::new()).chain(matrix.labels.iter().cloned());
    util::write_csv_file(
        &path,
        header,
        matrix.labels.iter().zip(&matrix.values).map(|(label, row)| {
            std::iter::once(label.clone()).chain(row.iter().map(|&v| util::optional_cell(v)))
        }),
    )?;
    eprintln!("Saved: {}", path.display());

    Ok(())
}
