use pagesift::config::AppConfig;
use pagesift::driver::Driver;
use pagesift::error::SiftError;
use pagesift::logging;

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init() {
        eprintln!("warning: {e}");
    }

    let config = AppConfig::from_env();
    let mut driver = Driver::new(config);

    // A Ctrl-C mid-prompt or mid-fetch is a clean cancellation, not a failure.
    let exit_code = tokio::select! {
        result = driver.run() => match result {
            Ok(_) => 0,
            Err(err) => report_failure(&err),
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\nCancelled by user.");
            0
        }
    };

    std::process::exit(exit_code);
}

/// Print the failure and pick the exit code. Dedicated messages for the two
/// expected terminal conditions, a generic prefix for everything else.
fn report_failure(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SiftError>() {
        Some(SiftError::NoTablesFound) => eprintln!("No tables found on the page."),
        Some(SiftError::InvalidModeSelection { input }) => {
            eprintln!("Invalid selection: {input:?}. Expected 1-4.");
        }
        _ => eprintln!("Error: {err:#}"),
    }
    1
}
