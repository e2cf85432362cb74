// Procurement reports entry point
use clap::Parser;
use engine::cli::{run_pipeline, Cli, ExitStatus};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    info!("Starting procurement report pipeline...");

    let status = match run_pipeline(&cli) {
        Ok(report) => {
            for section in &report.sections {
                println!("\n{}", section);
            }
            report.status
        }
        Err(e) => {
            error!(error = %e, fatal = e.is_fatal(), "Report pipeline aborted");
            eprintln!("Error: {}", e);
            ExitStatus::for_error(&e)
        }
    };

    if status == ExitStatus::Success {
        info!("All analyses complete");
    }
    ExitCode::from(status.code())
}
