use std::path::PathBuf;

use anyhow::Context;
use aptstat_analysis::regression::{Design, OlsFit};
use chrono::Utc;

use crate::{report::RegressionReport, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RegressArg {
    /// Path to the apartment data CSV file
    data: PathBuf,
    /// Output file path for the JSON fit report
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RegressArg) -> anyhow::Result<()> {
    let RegressArg { data, output } = arg;
    let dataset = util::read_dataset_file(data)?;

    eprintln!("Building design matrix...");
    let design = Design::price_model(&dataset);
    let (rows, columns) = design.x.shape();
    eprintln!("Design has {rows} complete records and {columns} parameters");

    eprintln!("Fitting OLS regression...");
    let fit = design.fit().context("Failed to fit the price regression")?;
    eprintln!("Regression fitted");

    print_fit(&fit);

    if let Some(path) = output {
        let report = RegressionReport {
            generated_at: Utc::now(),
            source: data.clone(),
            fit,
        };
        util::write_json_file(path, &report)?;
        eprintln!("Fit saved to: {}", path.display());
    }

    Ok(())
}

fn print_fit(fit: &OlsFit) {
    println!("OLS Regression: price");
    println!("==========================================\n");
    println!(
        "  {:<24} {:>10}    {:<18} {:>10.4}",
        "Observations:", fit.observations, "R-squared:", fit.r_squared
    );
    println!(
        "  {:<24} {:>10}    {:<18} {:>10.4}",
        "Df Model:", fit.df_model, "Adj. R-squared:", fit.adj_r_squared
    );
    let (f_statistic, f_p_value) = fit.f_test.map_or_else(
        || ("N/A".to_string(), "N/A".to_string()),
        |f| (format!("{:.4}", f.statistic), format!("{:.4e}", f.p_value)),
    );
    println!(
        "  {:<24} {:>10}    {:<18} {:>10}",
        "Df Residuals:", fit.df_residual, "F-statistic:", f_statistic
    );
    println!(
        "  {:<24} {:>10.4}    {:<18} {:>10}",
        "Residual Std. Error:", fit.residual_std_error, "Prob (F-statistic):", f_p_value
    );
    println!();

    println!(
        "  {:<32} {:>16} {:>14} {:>10} {:>10}",
        "Term", "Coef", "Std Err", "t", "P>|t|"
    );
    // term(32) + coef(16) + std err(14) + t(10) + p(10) + spaces(4)
    println!("  {}", "-".repeat(86));
    for c in &fit.coefficients {
        println!(
            "  {:<32} {:>16.4} {:>14.4} {:>10.3} {:>10.4}",
            c.name, c.estimate, c.std_error, c.t_value, c.p_value
        );
    }
}
