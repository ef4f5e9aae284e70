use std::time::Duration;

use tracing::{debug, info, warn};

use super::{
    interrupt::{poll_timeout_ms, Deadline},
    Endpoint, MessageCounter, SubscriptionFilter,
};
use crate::error::{PubSubError, PubSubResult};

/// Полученное сообщение.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Порядковый номер в сессии подписчика, начиная с 1.
    pub seq: u64,
    /// Текст сообщения. Не-UTF-8 байты заменяются на `U+FFFD`.
    pub payload: String,
}

/// Подписчик: SUB-сокет с единственным фильтром.
///
/// Фильтр передаётся транспорту один раз при подключении; сообщения,
/// не начинающиеся с него, до сокета не доходят.
pub struct Subscriber {
    socket: zmq::Socket,
    endpoint: Endpoint,
    filter: SubscriptionFilter,
    counter: MessageCounter,
}

impl Subscriber {
    /// Подключается к `endpoint` и объявляет фильтр `filter`.
    pub fn connect(
        ctx: &zmq::Context,
        endpoint: &Endpoint,
        filter: SubscriptionFilter,
    ) -> PubSubResult<Self> {
        let socket = ctx.socket(zmq::SUB).map_err(|source| PubSubError::Socket {
            kind: "SUB",
            source,
        })?;
        socket
            .set_linger(0)
            .map_err(|source| PubSubError::SocketOption {
                option: "ZMQ_LINGER",
                source,
            })?;
        socket
            .connect(endpoint.as_str())
            .map_err(|source| PubSubError::Connect {
                endpoint: endpoint.clone(),
                source,
            })?;
        socket
            .set_subscribe(filter.as_bytes())
            .map_err(|source| PubSubError::Subscribe {
                filter: filter.as_str().to_string(),
                source,
            })?;
        info!(endpoint = %endpoint, filter = %filter, "subscriber connected");

        Ok(Self {
            socket,
            endpoint: endpoint.clone(),
            filter,
            counter: MessageCounter::new(),
        })
    }

    /// Блокируется до прихода следующего сообщения. Таймаута нет.
    pub fn recv(&mut self) -> PubSubResult<Delivery> {
        self.recv_with_flags(0)
    }

    /// Ждёт сообщение не дольше `timeout`; `None`, если ничего не пришло.
    pub fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> PubSubResult<Option<Delivery>> {
        let deadline = Deadline::after(timeout);
        loop {
            let remaining = deadline.remaining();
            match self.socket.poll(zmq::POLLIN, poll_timeout_ms(remaining)) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    if let Some(delivery) = self.try_recv()? {
                        return Ok(Some(delivery));
                    }
                }
                Err(zmq::Error::EINTR) => {}
                Err(e) => return Err(PubSubError::Poll(e)),
            }
            if remaining.is_zero() {
                return Ok(None);
            }
        }
    }

    /// Забирает сообщение, если оно уже в очереди, не блокируясь.
    pub fn try_recv(&mut self) -> PubSubResult<Option<Delivery>> {
        match self.recv_with_flags(zmq::DONTWAIT) {
            Ok(delivery) => Ok(Some(delivery)),
            Err(PubSubError::Recv {
                source: zmq::Error::EAGAIN,
                ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn recv_with_flags(
        &mut self,
        flags: i32,
    ) -> PubSubResult<Delivery> {
        let bytes = loop {
            match self.socket.recv_bytes(flags) {
                Ok(bytes) => break bytes,
                Err(zmq::Error::EINTR) => continue,
                Err(source) => {
                    return Err(PubSubError::Recv {
                        received: self.counter.total(),
                        source,
                    })
                }
            }
        };
        let payload = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(len = e.as_bytes().len(), "received non-UTF-8 payload");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        let seq = self.counter.record();
        debug!(seq, payload = %payload, "received");
        Ok(Delivery { seq, payload })
    }

    pub fn received(&self) -> u64 {
        self.counter.total()
    }

    pub fn filter(&self) -> &SubscriptionFilter {
        &self.filter
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub(crate) fn socket(&self) -> &zmq::Socket {
        &self.socket
    }

    /// Явно закрывает сокет. Аналогично `drop(self)`.
    pub fn close(self) -> u64 {
        let total = self.received();
        debug!(endpoint = %self.endpoint, total, "subscriber socket closed");
        total
    }
}
