//! Stdout belongs to the operator prompt, so events go to stderr.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "error";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
