//! Сессии демо-программ: цикл публикатора, цикл подписчика, консольный
//! вывод и остановка по сигналу.

pub mod cli;
pub mod console;
pub mod observer_port;
pub mod publisher_session;
pub mod shutdown;
pub mod subscriber_session;

pub use cli::LogArgs;
pub use console::{Clock, ConsoleObserver, Role};
pub use observer_port::{CallbackObserver, CollectObserver, SessionEvent, SessionObserver, StopReason};
pub use publisher_session::{run_publisher, PublisherOptions};
pub use subscriber_session::{run_subscriber, SubscriberOptions};

/// Итог завершённой сессии.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Сколько сообщений отправлено или получено.
    pub total: u64,
    pub reason: StopReason,
}
