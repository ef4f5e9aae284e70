use std::time::Duration;

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use crate::{error::PubSubResult, pubsub::Endpoint};

/// Префикс переменных окружения: `SENSORCAST_TOPIC__PORT=6000`.
pub const ENV_PREFIX: &str = "SENSORCAST";

/// Вариант демо: простая пара или пара с темами.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Simple,
    Topic,
}

/// Порт и интервал публикации одной пары.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub port: u16,
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Хост, на котором слушает публикатор (`*`: все интерфейсы).
    pub bind_host: String,
    /// Хост, к которому подключается подписчик.
    pub connect_host: String,
    /// Пауза публикатора перед первой отправкой.
    pub warmup_ms: u64,
    pub simple: ChannelSettings,
    pub topic: ChannelSettings,
    /// Seed генератора показаний; без него: энтропия ОС.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: "*".to_string(),
            connect_host: "localhost".to_string(),
            warmup_ms: 2000,
            simple: ChannelSettings {
                port: 5555,
                interval_ms: 1000,
            },
            topic: ChannelSettings {
                port: 5556,
                interval_ms: 500,
            },
            seed: None,
        }
    }
}

impl Settings {
    /// Значения по умолчанию, поверх них: переменные окружения.
    pub fn load() -> PubSubResult<Self> {
        Self::load_from(Self::environment())
    }

    /// Как [`Settings::load`], но с произвольным источником окружения.
    pub fn load_from(env: Environment) -> PubSubResult<Self> {
        let defaults = Settings::default();
        let cfg = Config::builder()
            // Adding default values
            .set_default("bind_host", defaults.bind_host)?
            .set_default("connect_host", defaults.connect_host)?
            .set_default("warmup_ms", defaults.warmup_ms as i64)?
            .set_default("simple.port", i64::from(defaults.simple.port))?
            .set_default("simple.interval_ms", defaults.simple.interval_ms as i64)?
            .set_default("topic.port", i64::from(defaults.topic.port))?
            .set_default("topic.interval_ms", defaults.topic.interval_ms as i64)?
            .add_source(env)
            .build()?;

        Ok(cfg.try_deserialize::<Settings>()?)
    }

    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub fn channel(
        &self,
        variant: Variant,
    ) -> &ChannelSettings {
        match variant {
            Variant::Simple => &self.simple,
            Variant::Topic => &self.topic,
        }
    }

    pub fn publisher_endpoint(
        &self,
        variant: Variant,
    ) -> Endpoint {
        Endpoint::tcp(&self.bind_host, self.channel(variant).port)
    }

    pub fn subscriber_endpoint(
        &self,
        variant: Variant,
    ) -> Endpoint {
        Endpoint::tcp(&self.connect_host, self.channel(variant).port)
    }

    pub fn interval(
        &self,
        variant: Variant,
    ) -> Duration {
        Duration::from_millis(self.channel(variant).interval_ms)
    }

    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }
}
