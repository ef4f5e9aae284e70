use std::{future::Future, time::Duration};

use tracing::{error, info};

use super::{
    shutdown::drive,
    SessionEvent, SessionObserver, SessionSummary, StopReason,
};
use crate::{
    config::{Settings, Variant},
    error::PubSubResult,
    pubsub::{interrupt_channel, Endpoint, InterruptListener, Publisher, Sampler, WireFormat},
};

/// Параметры сессии публикатора.
#[derive(Debug, Clone)]
pub struct PublisherOptions {
    pub variant: Variant,
    pub endpoint: Endpoint,
    /// Пауза перед первой отправкой, чтобы подписчики успели подключиться.
    pub warmup: Duration,
    /// Пауза между сообщениями.
    pub interval: Duration,
    pub seed: Option<u64>,
}

impl PublisherOptions {
    pub fn from_settings(
        settings: &Settings,
        variant: Variant,
    ) -> Self {
        Self {
            variant,
            endpoint: settings.publisher_endpoint(variant),
            warmup: settings.warmup(),
            interval: settings.interval(variant),
            seed: settings.seed,
        }
    }

    fn wire_format(&self) -> WireFormat {
        match self.variant {
            Variant::Simple => WireFormat::Plain,
            Variant::Topic => WireFormat::Tagged,
        }
    }
}

/// Сессия публикатора: bind, пауза, цикл отправки до `shutdown`.
///
/// Ошибка bind возвращается сразу. Ошибка отправки завершает цикл, но
/// наблюдатель всё равно получает `Stopped` и `SocketClosed`.
/// Наблюдатель возвращается вызывающему вместе с итогом.
pub async fn run_publisher<O, F>(
    ctx: &zmq::Context,
    options: PublisherOptions,
    mut observer: O,
    shutdown: F,
) -> PubSubResult<(SessionSummary, O)>
where
    O: SessionObserver,
    F: Future<Output = ()>,
{
    observer.on_event(SessionEvent::Binding {
        endpoint: options.endpoint.clone(),
    });
    let publisher = Publisher::bind(ctx, &options.endpoint)?;
    observer.on_event(SessionEvent::Bound {
        endpoint: publisher.endpoint().clone(),
    });

    let (trigger, listener) = interrupt_channel(ctx)?;
    drive(
        trigger,
        move || publish_session(publisher, listener, options, observer),
        shutdown,
    )
    .await
}

fn publish_session<O: SessionObserver>(
    mut publisher: Publisher,
    listener: InterruptListener,
    options: PublisherOptions,
    mut observer: O,
) -> PubSubResult<(SessionSummary, O)> {
    let mut sampler = Sampler::from_seed_opt(options.seed);
    let result = publish_until_interrupted(
        &mut publisher,
        &listener,
        &mut sampler,
        &options,
        &mut observer,
    );

    let reason = match &result {
        Ok(()) => StopReason::Interrupted,
        Err(e) => {
            error!(error = %e, "publisher loop failed");
            StopReason::Failed
        }
    };
    let total = publisher.sent();
    observer.on_event(SessionEvent::Stopped { reason, total });
    publisher.close();
    drop(listener);
    observer.on_event(SessionEvent::SocketClosed);
    info!(total, ?reason, "publisher session finished");

    result.map(|()| (SessionSummary { total, reason }, observer))
}

fn publish_until_interrupted<O: SessionObserver>(
    publisher: &mut Publisher,
    listener: &InterruptListener,
    sampler: &mut Sampler,
    options: &PublisherOptions,
    observer: &mut O,
) -> PubSubResult<()> {
    observer.on_event(SessionEvent::WarmingUp {
        delay: options.warmup,
    });
    if listener.wait(options.warmup)? {
        return Ok(());
    }
    observer.on_event(SessionEvent::Ready);

    let format = options.wire_format();
    loop {
        let reading = match options.variant {
            Variant::Simple => sampler.next_temperature(),
            Variant::Topic => sampler.next_reading(),
        };
        let payload = reading.encode(format);
        let seq = publisher.publish(&payload)?;
        observer.on_event(SessionEvent::Published {
            seq,
            reading,
            payload,
        });

        if listener.wait(options.interval)? {
            return Ok(());
        }
    }
}
