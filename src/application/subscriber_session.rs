use std::future::Future;

use tracing::{error, info};

use super::{shutdown::drive, SessionEvent, SessionObserver, SessionSummary, StopReason};
use crate::{
    config::{Settings, Variant},
    error::PubSubResult,
    pubsub::{interrupt_channel, Endpoint, InterruptListener, Subscriber, SubscriptionFilter, Wakeup},
};

/// Параметры сессии подписчика.
#[derive(Debug, Clone)]
pub struct SubscriberOptions {
    pub variant: Variant,
    pub endpoint: Endpoint,
    pub filter: SubscriptionFilter,
}

impl SubscriberOptions {
    pub fn from_settings(
        settings: &Settings,
        variant: Variant,
        filter: SubscriptionFilter,
    ) -> Self {
        Self {
            variant,
            endpoint: settings.subscriber_endpoint(variant),
            filter,
        }
    }
}

/// Сессия подписчика: connect, фильтр, цикл получения до `shutdown`.
///
/// Ожидание сообщения не ограничено по времени: если публикатор молчит,
/// сессия ждёт, пока её не прервут.
pub async fn run_subscriber<O, F>(
    ctx: &zmq::Context,
    options: SubscriberOptions,
    mut observer: O,
    shutdown: F,
) -> PubSubResult<(SessionSummary, O)>
where
    O: SessionObserver,
    F: Future<Output = ()>,
{
    observer.on_event(SessionEvent::Connecting {
        endpoint: options.endpoint.clone(),
    });
    let subscriber = Subscriber::connect(ctx, &options.endpoint, options.filter.clone())?;
    observer.on_event(SessionEvent::Connected {
        endpoint: subscriber.endpoint().clone(),
    });
    observer.on_event(SessionEvent::Subscribed {
        filter: subscriber.filter().clone(),
    });

    let (trigger, listener) = interrupt_channel(ctx)?;
    drive(
        trigger,
        move || receive_session(subscriber, listener, observer),
        shutdown,
    )
    .await
}

fn receive_session<O: SessionObserver>(
    mut subscriber: Subscriber,
    listener: InterruptListener,
    mut observer: O,
) -> PubSubResult<(SessionSummary, O)> {
    observer.on_event(SessionEvent::Ready);
    let result = receive_until_interrupted(&mut subscriber, &listener, &mut observer);

    let reason = match &result {
        Ok(()) => StopReason::Interrupted,
        Err(e) => {
            error!(error = %e, "subscriber loop failed");
            StopReason::Failed
        }
    };
    let total = subscriber.received();
    observer.on_event(SessionEvent::Stopped { reason, total });
    subscriber.close();
    drop(listener);
    observer.on_event(SessionEvent::SocketClosed);
    info!(total, ?reason, "subscriber session finished");

    result.map(|()| (SessionSummary { total, reason }, observer))
}

fn receive_until_interrupted<O: SessionObserver>(
    subscriber: &mut Subscriber,
    listener: &InterruptListener,
    observer: &mut O,
) -> PubSubResult<()> {
    loop {
        match listener.wait_message(subscriber)? {
            Wakeup::Interrupted => return Ok(()),
            Wakeup::Message => {
                if let Some(delivery) = subscriber.try_recv()? {
                    observer.on_event(SessionEvent::Received(delivery));
                }
            }
        }
    }
}
