//! Publish–Subscribe поверх сокетов ZeroMQ.
//!
//! Транспорт (PUB/SUB, фильтрация по префиксу, веерная рассылка) целиком
//! принадлежит ZeroMQ; здесь только тонкие обёртки и модель данных:
//!
//! - `endpoint`: адреса сокетов.
//! - `message`: темы, показания и формат сообщений на проводе.
//! - `sampler`: генерация случайных показаний.
//! - `filter`: фильтр подписки.
//! - `counter`: счётчик сообщений сессии.
//! - `publisher` / `subscriber`: владельцы PUB- и SUB-сокетов.
//! - `interrupt`: пробуждение заблокированного рабочего потока.

pub mod counter;
pub mod endpoint;
pub mod filter;
pub mod interrupt;
pub mod message;
pub mod publisher;
pub mod sampler;
pub mod subscriber;

pub use counter::*;
pub use endpoint::*;
pub use filter::*;
pub use interrupt::*;
pub use message::*;
pub use publisher::*;
pub use sampler::*;
pub use subscriber::*;
