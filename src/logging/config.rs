use std::fmt;

/// Переменная окружения с директивой фильтра (`sensorcast=debug`).
pub const LOG_ENV_VAR: &str = "SENSORCAST_LOG";

/// Формат диагностических логов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Настройки логирования.
///
/// Диагностика всегда пишется в stderr: stdout занят выводом демо.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Уровень или полная директива `EnvFilter`.
    pub level: String,
    pub format: LogFormat,
    pub ansi: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            ansi: atty::is(atty::Stream::Stderr),
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Уровень по флагам CLI. `quiet` имеет приоритет над `verbose`.
    pub fn from_flags(
        verbose: bool,
        quiet: bool,
        format: LogFormat,
    ) -> Self {
        let level = if quiet {
            "off"
        } else if verbose {
            "debug"
        } else {
            "warn"
        };
        Self {
            level: level.to_string(),
            format,
            with_target: verbose,
            ..Default::default()
        }
    }

    pub fn build_filter_directive(&self) -> String {
        self.level.clone()
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cfg = LoggingConfig::from_flags(true, true, LogFormat::Compact);
        assert_eq!(cfg.build_filter_directive(), "off");
    }

    #[test]
    fn test_verbose_enables_debug() {
        let cfg = LoggingConfig::from_flags(true, false, LogFormat::Json);
        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.format, LogFormat::Json);
        assert!(cfg.with_target);
    }

    #[test]
    fn test_default_level_is_warn() {
        let cfg = LoggingConfig::from_flags(false, false, LogFormat::default());
        assert_eq!(cfg.level, "warn");
        assert_eq!(cfg.format, LogFormat::Compact);
        assert_eq!(cfg.format.to_string(), "compact");
    }
}
