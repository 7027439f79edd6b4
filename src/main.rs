use std::process::ExitCode;

use clap::Parser;
use log::*;

use sales_report::{
    cli::Args,
    diagnostics::LogSink,
    sales_reader::CsvSalesReader,
    RunOutcome, SalesReportApp,
};

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("Arguments received: {:?}", args);

    let config = args.run_config();

    match SalesReportApp::run(&config, CsvSalesReader::new(), &mut LogSink) {
        Ok(RunOutcome::Report(report)) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoSales) => {
            eprintln!("No sales found to process with the applied filters.");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{:#}", err);
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
