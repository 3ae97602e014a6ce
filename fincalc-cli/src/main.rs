use chrono::Local;
use clap::Parser;
use tracing::debug;

use fincalc_cli::cli::Cli;
use fincalc_cli::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "parsed arguments");

    match cli.run(Local::now().date_naive())? {
        Some(report) => print!("{report}"),
        None => eprintln!("Enter an amount greater than zero."),
    }

    Ok(())
}
