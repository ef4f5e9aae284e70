use tracing::{debug, info};

use super::{Endpoint, MessageCounter};
use crate::error::{PubSubError, PubSubResult};

/// Точка вещания: PUB-сокет и счётчик отправленных сообщений.
///
/// Отправка не ждёт подписчиков и ничего не подтверждает: кто не был
/// подключён в момент `publish`, сообщение не получит.
/// Сокет закрывается при `Drop` (linger = 0, неотправленное отбрасывается).
pub struct Publisher {
    socket: zmq::Socket,
    endpoint: Endpoint,
    counter: MessageCounter,
}

impl Publisher {
    /// Создаёт PUB-сокет в контексте `ctx` и привязывает его к `endpoint`.
    ///
    /// Реальный адрес (например, порт при `tcp://127.0.0.1:*`) доступен
    /// через [`Publisher::endpoint`].
    pub fn bind(
        ctx: &zmq::Context,
        endpoint: &Endpoint,
    ) -> PubSubResult<Self> {
        let socket = ctx.socket(zmq::PUB).map_err(|source| PubSubError::Socket {
            kind: "PUB",
            source,
        })?;
        socket
            .set_linger(0)
            .map_err(|source| PubSubError::SocketOption {
                option: "ZMQ_LINGER",
                source,
            })?;
        socket
            .bind(endpoint.as_str())
            .map_err(|source| PubSubError::Bind {
                endpoint: endpoint.clone(),
                source,
            })?;

        let bound = match socket.get_last_endpoint() {
            Ok(Ok(addr)) => Endpoint::new(addr),
            _ => endpoint.clone(),
        };
        info!(requested = %endpoint, bound = %bound, "publisher bound");

        Ok(Self {
            socket,
            endpoint: bound,
            counter: MessageCounter::new(),
        })
    }

    /// Отправляет строку всем подключённым подписчикам.
    ///
    /// Возвращает порядковый номер сообщения в этой сессии.
    pub fn publish(
        &mut self,
        payload: &str,
    ) -> PubSubResult<u64> {
        self.socket
            .send(payload, 0)
            .map_err(|source| PubSubError::Send {
                sent: self.counter.total(),
                source,
            })?;
        let seq = self.counter.record();
        debug!(seq, payload, "published");
        Ok(seq)
    }

    pub fn sent(&self) -> u64 {
        self.counter.total()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Явно закрывает сокет. Аналогично `drop(self)`.
    pub fn close(self) -> u64 {
        let total = self.sent();
        debug!(endpoint = %self.endpoint, total, "publisher socket closed");
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_inproc_and_publish_without_subscribers() {
        let ctx = zmq::Context::new();
        let mut publisher = Publisher::bind(&ctx, &Endpoint::inproc("pub-unit-lonely")).unwrap();
        // PUB без подписчиков просто отбрасывает сообщения
        assert_eq!(publisher.publish("Temperature: 20°C").unwrap(), 1);
        assert_eq!(publisher.publish("Temperature: 21°C").unwrap(), 2);
        assert_eq!(publisher.sent(), 2);
        assert_eq!(publisher.close(), 2);
    }

    #[test]
    fn test_bind_twice_to_same_endpoint_fails() {
        let ctx = zmq::Context::new();
        let ep = Endpoint::inproc("pub-unit-dup");
        let _first = Publisher::bind(&ctx, &ep).unwrap();
        let err = Publisher::bind(&ctx, &ep).err().expect("second bind must fail");
        assert!(matches!(err, PubSubError::Bind { .. }));
        assert!(err.is_setup_failure());
    }

    #[test]
    fn test_wildcard_port_is_resolved() {
        let ctx = zmq::Context::new();
        let publisher = Publisher::bind(&ctx, &Endpoint::new("tcp://127.0.0.1:*")).unwrap();
        let port = publisher.endpoint().port().expect("concrete port");
        assert!(port > 0);
    }
}
