use tracing_subscriber::EnvFilter;

use super::config::{LoggingConfig, LOG_ENV_VAR};

/// Фильтр: `SENSORCAST_LOG`, если задана, иначе уровень из конфигурации.
pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    let directive = config.build_filter_directive();

    match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(env_filter) => env_filter,
        Err(_) => match EnvFilter::try_new(&directive) {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!("Invalid log filter directive ('{directive}'): {e}; falling back to 'warn'");
                EnvFilter::new("warn")
            }
        },
    }
}
