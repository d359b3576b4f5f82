use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so the interactive prompts on stdout stay clean. The
/// filter comes from `PAGESIFT_LOG`, then `RUST_LOG`, then defaults to `warn`
/// for a quiet session.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_env("PAGESIFT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
