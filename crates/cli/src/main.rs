use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use shopmate_core::{AppConfig, LoadOptions, LogFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_else(|_| shopmate_core::config::LoggingConfig {
            level: "info".to_owned(),
            format: LogFormat::Compact,
        });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }

    shopmate_cli::run().await
}
