use std::{fmt, sync::Arc};

/// Адрес ZeroMQ-сокета (`tcp://*:5556`, `inproc://name`, ...).
///
/// Хранится как `Arc<str>`: адрес копируется в ошибки и события сессии.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(Arc<str>);

impl Endpoint {
    /// Произвольный адрес в нотации ZeroMQ.
    pub fn new(addr: impl AsRef<str>) -> Self {
        Self(Arc::from(addr.as_ref()))
    }

    /// Адрес публикатора: все интерфейсы, указанный порт.
    pub fn bind_all(port: u16) -> Self {
        Self::tcp("*", port)
    }

    /// Адрес подписчика на локальной машине.
    pub fn localhost(port: u16) -> Self {
        Self::tcp("localhost", port)
    }

    pub fn tcp(
        host: &str,
        port: u16,
    ) -> Self {
        Self::new(format!("tcp://{host}:{port}"))
    }

    pub fn inproc(name: &str) -> Self {
        Self::new(format!("inproc://{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Порт TCP-адреса, если он указан числом.
    pub fn port(&self) -> Option<u16> {
        let rest = self.0.strip_prefix("tcp://")?;
        let (_, port) = rest.rsplit_once(':')?;
        port.parse().ok()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
