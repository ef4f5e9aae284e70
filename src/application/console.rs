//! Консольный вывод демо-программ.
//!
//! [`ConsoleObserver`] печатает события сессии в stdout в том виде, в
//! каком их ждёт человек у терминала. Диагностика идёт отдельно, через
//! `tracing` в stderr.

use std::{
    fmt,
    io::{self, Stdout, Write},
    time::Duration,
};

use atty::Stream;
use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use tracing::debug;

use super::{SessionEvent, SessionObserver, StopReason};
use crate::{
    config::Variant,
    pubsub::{Endpoint, SubscriptionFilter, Topic},
};

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "------------------------------------------------------------";

/// Сторона обмена, от лица которой печатается вывод.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Publisher,
    Subscriber,
}

impl Role {
    fn noun(self) -> &'static str {
        match self {
            Role::Publisher => "Publisher",
            Role::Subscriber => "Subscriber",
        }
    }

    fn socket_kind(self) -> &'static str {
        match self {
            Role::Publisher => "PUB",
            Role::Subscriber => "SUB",
        }
    }

    fn counted(self) -> &'static str {
        match self {
            Role::Publisher => "sent",
            Role::Subscriber => "received",
        }
    }
}

/// Источник отметки времени `HH:MM:SS` для строк сообщений.
pub type Clock = fn() -> String;

fn local_clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Наблюдатель, печатающий ход сессии.
///
/// Простые варианты печатают пронумерованные шаги, топиковые — короткую
/// форму. Заголовок и завершающие строки вызываются программой явно,
/// потому что контекст ZeroMQ живёт дольше сессии.
pub struct ConsoleObserver<W: Write + Send + 'static = Stdout> {
    out: W,
    role: Role,
    variant: Variant,
    clock: Clock,
    color: bool,
    /// Адрес из `Binding`/`Connecting`, чтобы напечатать его в том виде,
    /// как он задан.
    requested: Option<Endpoint>,
}

impl ConsoleObserver<Stdout> {
    /// Печать в stdout; цвет, если stdout это терминал.
    pub fn stdout(
        role: Role,
        variant: Variant,
    ) -> Self {
        Self::with_writer(io::stdout(), role, variant).with_color(atty::is(Stream::Stdout))
    }
}

impl<W: Write + Send + 'static> ConsoleObserver<W> {
    pub fn with_writer(
        out: W,
        role: Role,
        variant: Variant,
    ) -> Self {
        Self {
            out,
            role,
            variant,
            clock: local_clock,
            color: false,
            requested: None,
        }
    }

    pub fn with_clock(
        mut self,
        clock: Clock,
    ) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_color(
        mut self,
        color: bool,
    ) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Заголовок программы, например `ZMQ TOPIC SUBSCRIBER`.
    pub fn banner(&mut self) {
        let title = format!(
            "ZMQ {} {}",
            match self.variant {
                Variant::Simple => "SIMPLE",
                Variant::Topic => "TOPIC",
            },
            self.role.noun().to_uppercase()
        );
        let build = build_line();
        self.line(format_args!("{HEAVY_RULE}"));
        if self.color {
            self.line(format_args!("{}", title.bold().bright_blue()));
            self.line(format_args!("{}", build.dimmed()));
        } else {
            self.line(format_args!("{title}"));
            self.line(format_args!("{build}"));
        }
        self.line(format_args!("{HEAVY_RULE}"));
    }

    /// Шаг создания контекста (только простой вариант).
    pub fn context_created(&mut self) {
        if self.variant == Variant::Simple {
            self.line(format_args!("\n[Step 1] Creating ZMQ context..."));
            self.check(format_args!("Context created"));
        }
    }

    /// Завершающие строки после уничтожения контекста.
    pub fn farewell(&mut self) {
        let noun = self.role.noun();
        match self.variant {
            Variant::Simple => {
                self.check(format_args!("Context terminated"));
                self.line(format_args!("\n{HEAVY_RULE}"));
                self.line(format_args!("{noun} stopped successfully"));
                self.line(format_args!("{HEAVY_RULE}"));
            }
            Variant::Topic => {
                self.check(format_args!("{noun} stopped\n"));
            }
        }
        self.flush();
    }

    fn print_event(
        &mut self,
        event: SessionEvent,
    ) {
        let simple = self.variant == Variant::Simple;
        match event {
            SessionEvent::Binding { endpoint } => {
                if simple {
                    self.line(format_args!(
                        "\n[Step 2] Creating {} socket...",
                        self.role.socket_kind()
                    ));
                }
                self.requested = Some(endpoint);
            }
            SessionEvent::Bound { endpoint } => {
                let port = port_label(&endpoint);
                if simple {
                    let requested = self.requested.take().unwrap_or_else(|| endpoint.clone());
                    self.check(format_args!("PUB socket created"));
                    self.line(format_args!("\n[Step 3] Binding to {requested}..."));
                    self.check(format_args!("Publisher bound to {requested}"));
                    self.line(format_args!(
                        "  (Listening on port {port}, accepting connections from subscribers)"
                    ));
                } else {
                    self.line(format_args!(""));
                    self.check(format_args!("Publisher started on port {port}"));
                    self.line(format_args!(
                        "  Publishing messages with {} topics:",
                        Topic::ALL.len()
                    ));
                    for topic in Topic::ALL {
                        self.line(format_args!("    - {topic}"));
                    }
                }
            }
            SessionEvent::Connecting { endpoint } => {
                if simple {
                    self.line(format_args!("\n[Step 2] Creating SUB socket..."));
                }
                self.requested = Some(endpoint);
            }
            SessionEvent::Connected { endpoint } => {
                if simple {
                    let requested = self.requested.take().unwrap_or_else(|| endpoint.clone());
                    self.check(format_args!("SUB socket created"));
                    self.line(format_args!(
                        "\n[Step 3] Connecting to publisher at {requested}..."
                    ));
                    self.check(format_args!("Connected to {endpoint}"));
                } else {
                    self.line(format_args!(""));
                    self.check(format_args!(
                        "Connected to publisher on port {}",
                        port_label(&endpoint)
                    ));
                }
            }
            SessionEvent::Subscribed { filter } => self.print_filter(&filter),
            SessionEvent::WarmingUp { delay } => {
                let delay = describe_delay(delay);
                if simple {
                    self.line(format_args!(
                        "\n[Step 4] Waiting {delay} for subscribers to connect..."
                    ));
                } else {
                    self.line(format_args!("\nWaiting {delay} for subscribers..."));
                }
            }
            SessionEvent::Ready => self.print_ready(),
            SessionEvent::Published {
                seq,
                reading,
                payload,
            } => {
                let ts = (self.clock)();
                if simple {
                    self.line(format_args!("[{ts}] Sent message #{seq}: {payload}"));
                } else {
                    self.line(format_args!(
                        "[{ts}] #{seq:3} [{:<12}] {}",
                        reading.topic.name(),
                        reading.value_with_unit()
                    ));
                }
            }
            SessionEvent::Received(delivery) => {
                let ts = (self.clock)();
                if simple {
                    self.line(format_args!(
                        "[{ts}] Received message #{}: {}",
                        delivery.seq, delivery.payload
                    ));
                } else {
                    self.line(format_args!(
                        "[{ts}] #{:3} {}",
                        delivery.seq, delivery.payload
                    ));
                }
            }
            SessionEvent::Stopped { reason, total } => {
                self.line(format_args!("\n{LIGHT_RULE}"));
                if simple {
                    match reason {
                        StopReason::Interrupted => {
                            self.line(format_args!("\n[Shutdown] Received interrupt signal"))
                        }
                        StopReason::Failed => {
                            self.line(format_args!("\n[Shutdown] Stopped after an error"))
                        }
                    }
                    self.line(format_args!(
                        "  Total messages {}: {total}",
                        self.role.counted()
                    ));
                    self.line(format_args!("\n[Step 6] Cleaning up..."));
                } else {
                    self.line(format_args!(""));
                    match self.role {
                        Role::Publisher => {
                            self.check(format_args!("Published {total} messages total"))
                        }
                        Role::Subscriber => self.check(format_args!("Received {total} messages")),
                    }
                }
            }
            SessionEvent::SocketClosed => {
                if simple {
                    self.check(format_args!("Socket closed"));
                }
            }
        }
    }

    fn print_filter(
        &mut self,
        filter: &SubscriptionFilter,
    ) {
        let simple = self.variant == Variant::Simple;
        if simple {
            self.line(format_args!("\n[Step 4] Setting subscription filter..."));
        }
        if filter.is_all() {
            if simple {
                self.check(format_args!("Subscribed to ALL topics (filter: '')"));
                self.line(format_args!(
                    "  (You can filter by topic, e.g., 'Temperature' to only receive those)"
                ));
            } else {
                self.check(format_args!("Subscribed to ALL topics"));
            }
        } else {
            self.check(format_args!("Subscribed to topic filter: {filter}"));
            self.line(format_args!(
                "  (Only messages starting with {filter} will be received)"
            ));
        }

        if !simple {
            self.line(format_args!("\nTIP: Run with argument to filter topics:"));
            for topic in Topic::ALL {
                self.line(format_args!("  topic-subscriber {topic}"));
            }
        }
    }

    fn print_ready(&mut self) {
        match (self.variant, self.role) {
            (Variant::Simple, Role::Publisher) => {
                self.check(format_args!("Ready to publish!"));
                self.line(format_args!(
                    "\n[Step 5] Publishing messages (press Ctrl+C to stop)..."
                ));
            }
            (Variant::Simple, Role::Subscriber) => {
                self.line(format_args!(
                    "\n[Step 5] Waiting for messages (press Ctrl+C to stop)..."
                ));
            }
            (Variant::Topic, Role::Publisher) => {
                self.line(format_args!("Starting to publish...\n"));
            }
            (Variant::Topic, Role::Subscriber) => {
                self.line(format_args!("\nWaiting for messages...\n"));
            }
        }
        self.line(format_args!("{LIGHT_RULE}"));
    }

    /// Строка с зелёной галочкой в начале.
    fn check(
        &mut self,
        text: fmt::Arguments<'_>,
    ) {
        if self.color {
            self.line(format_args!("{} {text}", "✓".green()));
        } else {
            self.line(format_args!("✓ {text}"));
        }
    }

    fn line(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        // stdout мог закрыться (например, `| head`); сессию это не останавливает
        if let Err(e) = writeln!(self.out, "{args}") {
            debug!(error = %e, "console write failed");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            debug!(error = %e, "console flush failed");
        }
    }
}

impl<W: Write + Send + 'static> SessionObserver for ConsoleObserver<W> {
    fn on_event(
        &mut self,
        event: SessionEvent,
    ) {
        self.print_event(event);
        self.flush();
    }
}

fn port_label(endpoint: &Endpoint) -> String {
    endpoint
        .port()
        .map(|p| p.to_string())
        .unwrap_or_else(|| endpoint.to_string())
}

/// `2 seconds`, `500 ms`.
fn describe_delay(delay: Duration) -> String {
    let millis = delay.as_millis();
    if millis % 1000 == 0 {
        let secs = millis / 1000;
        if secs == 1 {
            "1 second".to_string()
        } else {
            format!("{secs} seconds")
        }
    } else {
        format!("{millis} ms")
    }
}

fn build_line() -> String {
    let git = option_env!("SENSORCAST_GIT_COMMIT").unwrap_or("unknown");
    let profile = option_env!("SENSORCAST_BUILD_PROFILE").unwrap_or("unknown");
    let build_time_raw = option_env!("SENSORCAST_BUILD_TIME").unwrap_or("unknown");
    let build_time = match DateTime::parse_from_rfc3339(build_time_raw) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%d.%m.%Y %H:%M:%S")
            .to_string(),
        Err(_) => build_time_raw.to_string(),
    };
    let (major, minor, patch) = zmq::version();
    format!(
        "sensorcast {} {profile} (git {git}, built {build_time}), libzmq {major}.{minor}.{patch}",
        env!("CARGO_PKG_VERSION")
    )
}
