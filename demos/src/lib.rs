//! Общий запуск демо-программ: логи, настройки, контекст ZeroMQ.

use anyhow::{anyhow, Context, Result};
use sensorcast::{
    init_logging, ConsoleObserver, LogArgs, PubSubError, PubSubResult, Role, SessionSummary,
    Settings, Variant,
};
use tracing::debug;

/// Всё, что нужно программе до запуска сессии.
pub struct Bootstrap {
    pub settings: Settings,
    pub console: ConsoleObserver,
    pub ctx: zmq::Context,
}

/// Логи в stderr, настройки из окружения, заголовок, контекст.
pub fn bootstrap(
    log: &LogArgs,
    role: Role,
    variant: Variant,
) -> Result<Bootstrap> {
    init_logging(log.logging_config()).map_err(|e| anyhow!("failed to initialize logging: {e}"))?;
    let settings = Settings::load().context("failed to load settings")?;
    debug!(?settings, "settings loaded");

    let mut console = ConsoleObserver::stdout(role, variant);
    console.banner();
    let ctx = zmq::Context::new();
    console.context_created();

    Ok(Bootstrap {
        settings,
        console,
        ctx,
    })
}

/// Уничтожает контекст и печатает завершающие строки.
pub fn finish(
    ctx: zmq::Context,
    mut console: ConsoleObserver,
) {
    // все сокеты уже закрыты, поэтому term не ждёт
    drop(ctx);
    console.farewell();
}

/// Завершает программу по итогу сессии.
///
/// Сбой после подключения проходит тот же путь очистки, что и Ctrl+C:
/// контекст уничтожается, завершающие строки печатаются, и только потом
/// ошибка уходит наверх. Сбой подключения печатать нечего.
pub fn conclude(
    ctx: zmq::Context,
    role: Role,
    variant: Variant,
    outcome: PubSubResult<(SessionSummary, ConsoleObserver)>,
) -> Result<SessionSummary> {
    match outcome {
        Ok((summary, console)) => {
            finish(ctx, console);
            Ok(summary)
        }
        Err(e) => {
            let message = failure_context(role, &e);
            if e.is_setup_failure() {
                drop(ctx);
            } else {
                // наблюдатель сессии ушёл вместе с ошибкой
                finish(ctx, ConsoleObserver::stdout(role, variant));
            }
            Err(anyhow::Error::new(e).context(message))
        }
    }
}

fn failure_context(
    role: Role,
    err: &PubSubError,
) -> String {
    let who = match role {
        Role::Publisher => "publisher",
        Role::Subscriber => "subscriber",
    };
    if err.is_setup_failure() {
        format!("{who} failed to start")
    } else {
        format!("{who} stopped with an error")
    }
}

#[cfg(test)]
mod tests {
    use sensorcast::Endpoint;

    use super::*;

    #[test]
    fn test_failure_context_separates_setup_from_transport() {
        let bind = PubSubError::Bind {
            endpoint: Endpoint::bind_all(5555),
            source: zmq::Error::EADDRINUSE,
        };
        assert_eq!(
            failure_context(Role::Publisher, &bind),
            "publisher failed to start"
        );

        let recv = PubSubError::Recv {
            received: 4,
            source: zmq::Error::ETERM,
        };
        assert_eq!(
            failure_context(Role::Subscriber, &recv),
            "subscriber stopped with an error"
        );
    }

    #[test]
    fn test_conclude_propagates_transport_failure_after_cleanup() {
        let ctx = zmq::Context::new();
        let err = conclude(
            ctx,
            Role::Subscriber,
            Variant::Topic,
            Err(PubSubError::Poll(zmq::Error::ETERM)),
        )
        .err()
        .expect("failure must propagate");
        assert_eq!(err.to_string(), "subscriber stopped with an error");
        assert!(err.downcast_ref::<PubSubError>().is_some());
    }

    #[test]
    fn test_conclude_passes_summary_through() {
        let ctx = zmq::Context::new();
        let console = ConsoleObserver::stdout(Role::Publisher, Variant::Simple);
        let summary = SessionSummary {
            total: 7,
            reason: sensorcast::StopReason::Interrupted,
        };
        let got = conclude(ctx, Role::Publisher, Variant::Simple, Ok((summary, console))).unwrap();
        assert_eq!(got, summary);
    }
}
