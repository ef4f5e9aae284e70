//! Канал прерывания для рабочего потока.
//!
//! Рабочий поток блокируется в `zmq::poll` на двух сокетах: на сокете данных
//! и на PAIR-сокете прерывания. Обработчик сигнала пишет в парный PAIR-сокет,
//! и poll просыпается сразу, без опроса по таймеру.

use std::time::{Duration, Instant};

use tracing::debug;
use uuid::Uuid;

use super::{Endpoint, Subscriber};
use crate::error::{PubSubError, PubSubResult};

/// Сторона, которая подаёт сигнал остановки (основной поток).
pub struct InterruptTrigger {
    socket: zmq::Socket,
}

/// Сторона, которая ждёт сигнала (рабочий поток).
pub struct InterruptListener {
    socket: zmq::Socket,
}

/// Чем закончилось ожидание сообщения.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// На сокете данных есть сообщение.
    Message,
    /// Пришёл сигнал остановки.
    Interrupted,
}

/// Создаёт связанную пару PAIR-сокетов на уникальном `inproc://` адресе.
pub fn interrupt_channel(ctx: &zmq::Context) -> PubSubResult<(InterruptTrigger, InterruptListener)> {
    let endpoint = Endpoint::inproc(&format!("sensorcast-interrupt-{}", Uuid::new_v4()));

    let listener = ctx.socket(zmq::PAIR).map_err(PubSubError::Interrupt)?;
    listener.set_linger(0).map_err(PubSubError::Interrupt)?;
    listener
        .bind(endpoint.as_str())
        .map_err(PubSubError::Interrupt)?;

    let trigger = ctx.socket(zmq::PAIR).map_err(PubSubError::Interrupt)?;
    trigger.set_linger(0).map_err(PubSubError::Interrupt)?;
    trigger
        .connect(endpoint.as_str())
        .map_err(PubSubError::Interrupt)?;

    debug!(endpoint = %endpoint, "interrupt channel ready");
    Ok((
        InterruptTrigger { socket: trigger },
        InterruptListener { socket: listener },
    ))
}

/// Срок ожидания для `zmq::poll`.
///
/// ZeroMQ понимает отрицательный таймаут как «ждать вечно», поэтому
/// миллисекунды насыщаются до `i64::MAX`, а не оборачиваются.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    /// `None`, если `now + timeout` не помещается в `Instant`.
    at: Option<Instant>,
    timeout: Duration,
}

impl Deadline {
    pub(crate) fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(timeout),
            timeout,
        }
    }

    pub(crate) fn remaining(&self) -> Duration {
        match self.at {
            Some(at) => at.saturating_duration_since(Instant::now()),
            None => self.timeout,
        }
    }

    pub(crate) fn poll_timeout_ms(&self) -> i64 {
        poll_timeout_ms(self.remaining())
    }
}

pub(crate) fn poll_timeout_ms(timeout: Duration) -> i64 {
    i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX)
}

impl InterruptTrigger {
    /// Будит рабочий поток. Повторный вызов безопасен.
    pub fn fire(&self) -> PubSubResult<()> {
        self.socket
            .send(&b""[..], zmq::DONTWAIT)
            .or_else(|e| match e {
                // очередь уже содержит сигнал: этого достаточно
                zmq::Error::EAGAIN => Ok(()),
                other => Err(other),
            })
            .map_err(PubSubError::Interrupt)
    }
}

impl InterruptListener {
    /// Ждёт сигнал не дольше `timeout`. `true`: сигнал пришёл.
    ///
    /// Заменяет `sleep` в цикле публикатора: пауза прерывается сразу.
    pub fn wait(
        &self,
        timeout: Duration,
    ) -> PubSubResult<bool> {
        let deadline = Deadline::after(timeout);
        loop {
            match self.socket.poll(zmq::POLLIN, deadline.poll_timeout_ms()) {
                Ok(ready) => return Ok(ready > 0),
                // сигнал доставлен в этот поток: досыпаем остаток
                Err(zmq::Error::EINTR) => continue,
                Err(e) => return Err(PubSubError::Poll(e)),
            }
        }
    }

    /// Блокируется без таймаута, пока не придёт сообщение подписчику
    /// или сигнал остановки. Сигнал имеет приоритет.
    pub fn wait_message(
        &self,
        subscriber: &Subscriber,
    ) -> PubSubResult<Wakeup> {
        let mut items = [
            self.socket.as_poll_item(zmq::POLLIN),
            subscriber.socket().as_poll_item(zmq::POLLIN),
        ];
        loop {
            match zmq::poll(&mut items, -1) {
                Ok(_) => break,
                Err(zmq::Error::EINTR) => continue,
                Err(e) => return Err(PubSubError::Poll(e)),
            }
        }
        if items[0].is_readable() {
            Ok(Wakeup::Interrupted)
        } else {
            Ok(Wakeup::Message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_times_out_without_signal() {
        let ctx = zmq::Context::new();
        let (_trigger, listener) = interrupt_channel(&ctx).unwrap();
        assert!(!listener.wait(Duration::from_millis(10)).unwrap());
    }

    #[test]
    fn test_fire_wakes_long_wait_immediately() {
        let ctx = zmq::Context::new();
        let (trigger, listener) = interrupt_channel(&ctx).unwrap();
        trigger.fire().unwrap();

        let start = Instant::now();
        assert!(listener.wait(Duration::from_secs(30)).unwrap());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_fire_from_another_thread() {
        let ctx = zmq::Context::new();
        let (trigger, listener) = interrupt_channel(&ctx).unwrap();
        let handle = std::thread::spawn(move || listener.wait(Duration::from_secs(30)));
        std::thread::sleep(Duration::from_millis(20));
        trigger.fire().unwrap();
        assert!(handle.join().unwrap().unwrap());
    }

    #[test]
    fn test_poll_timeout_saturates_instead_of_wrapping() {
        assert_eq!(poll_timeout_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(poll_timeout_ms(Duration::ZERO), 0);
        assert_eq!(poll_timeout_ms(Duration::from_millis(u64::MAX)), i64::MAX);
        assert_eq!(poll_timeout_ms(Duration::MAX), i64::MAX);
        assert_eq!(Deadline::after(Duration::MAX).poll_timeout_ms(), i64::MAX);
    }

    #[test]
    fn test_huge_timeout_still_wakes_on_signal() {
        let ctx = zmq::Context::new();
        let (trigger, listener) = interrupt_channel(&ctx).unwrap();
        trigger.fire().unwrap();
        assert!(listener.wait(Duration::from_millis(u64::MAX)).unwrap());
    }

    #[test]
    fn test_channels_do_not_collide() {
        let ctx = zmq::Context::new();
        let (t1, _l1) = interrupt_channel(&ctx).unwrap();
        let (_t2, l2) = interrupt_channel(&ctx).unwrap();
        t1.fire().unwrap();
        assert!(!l2.wait(Duration::from_millis(10)).unwrap());
    }
}
