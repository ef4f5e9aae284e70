use clap::Args;

use crate::logging::{LogFormat, LoggingConfig};

/// Общие флаги диагностики для всех демо-программ.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Подробные логи в stderr (уровень debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Отключить логи полностью.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Формат логов.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

impl LogArgs {
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_flags(self.verbose, self.quiet, self.log_format)
    }
}
