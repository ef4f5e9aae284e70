use std::fmt;

use super::Topic;

/// Фильтр подписки: префикс, с которого должен начинаться payload.
///
/// Задаётся один раз при старте подписчика и дальше не меняется.
/// Пустой фильтр пропускает всё. Само сопоставление выполняет транспорт,
/// [`SubscriptionFilter::matches`] повторяет его правило (побайтовый префикс).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionFilter(String);

impl SubscriptionFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn topic(topic: Topic) -> Self {
        Self::new(topic.name())
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn matches(
        &self,
        payload: &[u8],
    ) -> bool {
        payload.starts_with(self.0.as_bytes())
    }
}

impl From<Option<String>> for SubscriptionFilter {
    fn from(arg: Option<String>) -> Self {
        arg.map(SubscriptionFilter::new).unwrap_or_default()
    }
}

impl fmt::Display for SubscriptionFilter {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.is_all() {
            f.write_str("ALL topics")
        } else {
            write!(f, "'{}'", self.0)
        }
    }
}
