//! Интерфейс (порт) наблюдателя за сессией публикатора или подписчика.
//!
//! Цикл сессии ничего не печатает сам: он сообщает о каждом шаге через
//! [`SessionObserver`], а что с этим делать (консоль, сбор в тестах,
//! подсчёт) решает реализация.

use std::time::Duration;

use crate::pubsub::{Delivery, Endpoint, Reading, SubscriptionFilter};

/// Почему цикл сессии завершился.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Внешнее прерывание (Ctrl+C): штатное завершение.
    Interrupted,
    /// Ошибка отправки или получения после подключения.
    Failed,
}

/// События сессии в порядке их возникновения.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Создаётся PUB-сокет и привязывается к адресу.
    Binding { endpoint: Endpoint },
    /// Публикатор привязан; адрес уже конкретный.
    Bound { endpoint: Endpoint },
    /// Создаётся SUB-сокет и подключается к адресу.
    Connecting { endpoint: Endpoint },
    Connected { endpoint: Endpoint },
    /// Фильтр объявлен транспорту.
    Subscribed { filter: SubscriptionFilter },
    /// Пауза публикатора перед первой отправкой.
    WarmingUp { delay: Duration },
    /// Цикл отправки или получения запущен.
    Ready,
    Published {
        seq: u64,
        reading: Reading,
        payload: String,
    },
    Received(Delivery),
    /// Цикл завершён; `total`: итоговое значение счётчика.
    Stopped { reason: StopReason, total: u64 },
    /// Сокет закрыт.
    SocketClosed,
}

/// Трейт для обработки событий сессии.
///
/// Наблюдатель переезжает в рабочий поток вместе с сокетом, поэтому
/// `Send + 'static`.
pub trait SessionObserver: Send + 'static {
    fn on_event(
        &mut self,
        event: SessionEvent,
    );
}

/// Сохраняет все события. Используется в тестах и для отладки.
#[derive(Debug, Default)]
pub struct CollectObserver {
    events: Vec<SessionEvent>,
}

impl CollectObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SessionEvent> {
        self.events
    }

    /// Только полученные сообщения.
    pub fn deliveries(&self) -> Vec<&Delivery> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Received(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Только отправленные показания с их номерами.
    pub fn published(&self) -> Vec<(u64, Reading)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Published { seq, reading, .. } => Some((*seq, *reading)),
                _ => None,
            })
            .collect()
    }
}

impl SessionObserver for CollectObserver {
    fn on_event(
        &mut self,
        event: SessionEvent,
    ) {
        self.events.push(event);
    }
}

/// Наблюдатель-замыкание.
pub struct CallbackObserver<F> {
    callback: F,
}

impl<F> CallbackObserver<F>
where
    F: FnMut(SessionEvent) + Send + 'static,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> SessionObserver for CallbackObserver<F>
where
    F: FnMut(SessionEvent) + Send + 'static,
{
    fn on_event(
        &mut self,
        event: SessionEvent,
    ) {
        (self.callback)(event);
    }
}
