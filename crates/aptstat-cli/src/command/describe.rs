use std::path::PathBuf;

use aptstat_analysis::city_summary::{self, CityPriceSummary};
use chrono::Utc;

use crate::{report::CitySummaryReport, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Path to the apartment data CSV file
    data: PathBuf,
    /// Output file path for the JSON summary
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg { data, output } = arg;
    let dataset = util::read_dataset_file(data)?;

    eprintln!("Computing price statistics by city...");
    let cities = city_summary::summarize_by_city(&dataset);
    eprintln!("Summarized {} cities", cities.len());
    if cities.is_empty() {
        anyhow::bail!("No records with both city and price in {}", data.display());
    }

    println!("Price Statistics by City");
    println!("==========================================\n");
    print_summary_table(&cities);

    if let Some(path) = output {
        let report = CitySummaryReport {
            generated_at: Utc::now(),
            source: data.clone(),
            cities,
        };
        util::write_json_file(path, &report)?;
        eprintln!("Summary saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary_table(cities: &[CityPriceSummary]) {
    println!(
        "  {:<20} {:>6} {:>9} {:>12} {:>12} {:>12} {:>12} {:>13} {:>12} {:>8} {:>12} {:>12}",
        "City",
        "Count",
        "Skewness",
        "Q1",
        "Median",
        "Q3",
        "IQR",
        "Lower Fence",
        "Upper Fence",
        "Outliers",
        "Min",
        "Max",
    );
    // label(20) + count(6) + skewness(9) + 7 * values(12) + lower fence(13) + outliers(8) + spaces(11)
    println!("  {}", "-".repeat(151));
    for summary in cities {
        let skewness = summary
            .skewness
            .map_or("N/A".to_string(), |s| format!("{s:.2}"));
        println!(
            "  {:<20} {:>6} {:>9} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>13.2} {:>12.2} {:>8} {:>12.2} {:>12.2}",
            summary.city,
            summary.count,
            skewness,
            summary.q1,
            summary.median,
            summary.q3,
            summary.iqr,
            summary.lower_fence,
            summary.upper_fence,
            summary.outlier_count,
            summary.min,
            summary.max,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_run_saves_summary() {
        let dir = std::env::temp_dir().join(format!("aptstat-describe-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let data = dir.join("apartments.csv");
        fs::write(&data, "price,city\n100,B\n200,B\n300,A\n,A\n").unwrap();
        let output = dir.join("summary.json");

        run(&DescribeArg {
            data,
            output: Some(output.clone()),
        })
        .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let cities = report["cities"].as_array().unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0]["city"], "A");
        assert_eq!(cities[0]["count"], 1);
        assert_eq!(cities[1]["median"], 150.0);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_rejects_dataset_without_prices() {
        let dir =
            std::env::temp_dir().join(format!("aptstat-describe-empty-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let data = dir.join("apartments.csv");
        fs::write(&data, "price,city\n,A\n").unwrap();

        let result = run(&DescribeArg { data, output: None });
        assert!(result.is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
