use thiserror::Error;

use crate::pubsub::Endpoint;

pub type PubSubResult<T> = Result<T, PubSubError>;

/// Ошибки публикатора и подписчика.
///
/// Ошибки транспорта (`zmq::Error`) всегда оборачиваются с контекстом:
/// какой адрес, какой фильтр, какая операция.
#[derive(Error, Debug)]
pub enum PubSubError {
    // ==== Установка соединения ====
    #[error("failed to create {kind} socket: {source}")]
    Socket {
        kind: &'static str,
        #[source]
        source: zmq::Error,
    },

    #[error("failed to bind to {endpoint}: {source}")]
    Bind {
        endpoint: Endpoint,
        #[source]
        source: zmq::Error,
    },

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: Endpoint,
        #[source]
        source: zmq::Error,
    },

    #[error("failed to set subscription filter '{filter}': {source}")]
    Subscribe {
        filter: String,
        #[source]
        source: zmq::Error,
    },

    #[error("failed to configure socket option {option}: {source}")]
    SocketOption {
        option: &'static str,
        #[source]
        source: zmq::Error,
    },

    // ==== Передача сообщений ====
    #[error("send failed after {sent} messages: {source}")]
    Send {
        sent: u64,
        #[source]
        source: zmq::Error,
    },

    #[error("receive failed after {received} messages: {source}")]
    Recv {
        received: u64,
        #[source]
        source: zmq::Error,
    },

    #[error("poll failed: {0}")]
    Poll(#[source] zmq::Error),

    // ==== Завершение работы ====
    #[error("interrupt channel failure: {0}")]
    Interrupt(#[source] zmq::Error),

    #[error("worker thread failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    // ==== Конфигурация ====
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PubSubError {
    /// `true`, если ошибка возникла до того, как сокет начал работать.
    ///
    /// Такие ошибки фатальны сразу: печатать итоговый счётчик нечего.
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            PubSubError::Socket { .. }
                | PubSubError::Bind { .. }
                | PubSubError::Connect { .. }
                | PubSubError::Subscribe { .. }
                | PubSubError::SocketOption { .. }
                | PubSubError::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_display_includes_endpoint() {
        let err = PubSubError::Bind {
            endpoint: Endpoint::bind_all(5556),
            source: zmq::Error::EADDRINUSE,
        };
        let text = err.to_string();
        assert!(text.starts_with("failed to bind to tcp://*:5556"), "{text}");
        assert!(err.is_setup_failure());
    }

    #[test]
    fn test_send_error_is_not_setup_failure() {
        let err = PubSubError::Send {
            sent: 3,
            source: zmq::Error::ETERM,
        };
        assert!(err.to_string().starts_with("send failed after 3 messages"));
        assert!(!err.is_setup_failure());
    }

    #[test]
    fn test_subscribe_error_display() {
        let err = PubSubError::Subscribe {
            filter: "Humidity".into(),
            source: zmq::Error::EINVAL,
        };
        assert!(err
            .to_string()
            .starts_with("failed to set subscription filter 'Humidity'"));
    }
}
