/// Publisher and subscriber sessions, console output, shutdown handling.
pub mod application;
/// Addresses, ports and intervals from defaults and environment.
pub mod config;
/// Error types and results.
pub mod error;
/// Diagnostic logging to stderr.
pub mod logging;
/// ZeroMQ PUB/SUB building blocks: endpoints, messages, sockets.
pub mod pubsub;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Session entry points and observers.
pub use application::{
    run_publisher, run_subscriber, CallbackObserver, CollectObserver, ConsoleObserver, LogArgs, PublisherOptions,
    Role, SessionEvent, SessionObserver, SessionSummary, StopReason, SubscriberOptions,
};
/// Settings.
pub use config::{Settings, Variant};
/// Operation errors and result types.
pub use error::{PubSubError, PubSubResult};
/// Logging setup.
pub use logging::{init_logging, LogFormat, LoggingConfig};
/// Pub/Sub API.
pub use pubsub::{
    Delivery, Endpoint, Publisher, Reading, Sampler, Subscriber, SubscriptionFilter, Topic,
    WireFormat,
};
