use crate::infrastructure::config::Logging;
use tracing_subscriber::EnvFilter;

/// Map a config level name to an EnvFilter directive. Unknown names fall back to warn.
pub fn level_directive(level: &str) -> &'static str {
    match level.to_ascii_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    }
}

/// Initialize logging with path and level configuration
pub fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    let level = level_directive(&logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = logging.path.as_deref().filter(|p| !p.is_empty()) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
        return Ok(());
    }

    // Stderr keeps stdout clean for the query itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
