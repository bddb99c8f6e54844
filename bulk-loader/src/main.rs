use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bulk_loader::{Cli, Dependencies, LoaderError, RunSummary};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT") {
        Ok(format) if format.eq_ignore_ascii_case("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn run(cli: &Cli) -> Result<RunSummary, LoaderError> {
    let deps = Dependencies::new(cli)?;
    let report = deps.loader.run(&deps.spec).await?;
    Ok(RunSummary::new(deps.spec.input_path(), deps.host, report))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    info!(file = %cli.input_file.display(), index = %cli.destination_index_name, "Starting bulk load");

    match run(&cli).await {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Bulk load failed");
            eprintln!("Error: {}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("  Caused by: {}", err);
                source = err.source();
            }

            ExitCode::FAILURE
        }
    }
}
