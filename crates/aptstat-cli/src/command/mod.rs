use clap::{Parser, Subcommand};

use self::{describe::DescribeArg, nb_mle::NbMleArg, plot_data::PlotDataArg, regress::RegressArg};

mod describe;
mod nb_mle;
mod plot_data;
mod regress;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Estimate the success probability of a negative binomial sample two ways
    NbMle(#[clap(flatten)] NbMleArg),
    /// Summarize apartment prices per city
    Describe(#[clap(flatten)] DescribeArg),
    /// Export plot data (box plots, histograms, correlation heatmap) as CSV
    PlotData(#[clap(flatten)] PlotDataArg),
    /// Fit an OLS regression of apartment prices
    Regress(#[clap(flatten)] RegressArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::NbMle(NbMleArg::default())) {
        Mode::NbMle(arg) => nb_mle::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::PlotData(arg) => plot_data::run(&arg)?,
        Mode::Regress(arg) => regress::run(&arg)?,
    }
    Ok(())
}
