//! Показания датчиков и их текстовое представление на проводе.
//!
//! Два формата:
//! - простой: `"Temperature: 22°C"`;
//! - с тегом темы: `"Humidity 65%"` — всё до первого пробела считается темой,
//!   и именно по этому префиксу подписчик фильтрует сообщения.

use std::{fmt, ops::RangeInclusive};

/// Разделитель между тегом темы и значением.
pub const TOPIC_DELIMITER: char = ' ';

/// Тема показания.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Temperature,
    Humidity,
    Pressure,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Temperature, Topic::Humidity, Topic::Pressure];

    pub fn name(self) -> &'static str {
        match self {
            Topic::Temperature => "Temperature",
            Topic::Humidity => "Humidity",
            Topic::Pressure => "Pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Topic::Temperature => "°C",
            Topic::Humidity => "%",
            Topic::Pressure => "hPa",
        }
    }

    /// Допустимый диапазон значений (включительно).
    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            Topic::Temperature => 15..=30,
            Topic::Humidity => 40..=80,
            Topic::Pressure => 980..=1020,
        }
    }

    pub fn from_name(name: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Topic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Формат сообщения на проводе.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// `"Temperature: 22°C"`
    Plain,
    /// `"Temperature 22°C"`
    Tagged,
}

/// Одно показание датчика.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub topic: Topic,
    pub value: i32,
}

impl Reading {
    pub fn new(
        topic: Topic,
        value: i32,
    ) -> Self {
        Self { topic, value }
    }

    /// Значение вместе с единицей измерения, например `"65%"`.
    pub fn value_with_unit(&self) -> String {
        format!("{}{}", self.value, self.topic.unit())
    }

    pub fn in_range(&self) -> bool {
        self.topic.range().contains(&self.value)
    }

    pub fn encode(
        &self,
        format: WireFormat,
    ) -> String {
        match format {
            WireFormat::Plain => format!("{}: {}{}", self.topic, self.value, self.topic.unit()),
            WireFormat::Tagged => format!(
                "{}{TOPIC_DELIMITER}{}{}",
                self.topic,
                self.value,
                self.topic.unit()
            ),
        }
    }

    /// Разбирает сообщение формата [`WireFormat::Tagged`].
    ///
    /// Возвращает `None`, если тема неизвестна, единица не совпадает с темой
    /// или значение вне диапазона.
    pub fn parse_tagged(payload: &str) -> Option<Reading> {
        let (tag, rest) = payload.split_once(TOPIC_DELIMITER)?;
        let topic = Topic::from_name(tag)?;
        let digits = rest.strip_suffix(topic.unit())?;
        let value: i32 = digits.parse().ok()?;
        let reading = Reading::new(topic, value);
        reading.in_range().then_some(reading)
    }
}

/// Тег темы: всё до первого пробела, либо весь payload.
pub fn topic_tag(payload: &str) -> &str {
    match payload.split_once(TOPIC_DELIMITER) {
        Some((tag, _)) => tag,
        None => payload,
    }
}
