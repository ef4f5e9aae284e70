//! Подписывается на `tcp://localhost:5556` с необязательным фильтром темы.
//!
//! ```text
//! topic-subscriber             # все темы
//! topic-subscriber Humidity    # только сообщения, начинающиеся с "Humidity"
//! ```

use anyhow::Result;
use clap::Parser;
use sensorcast::{
    application::shutdown, run_subscriber, LogArgs, Role, SubscriberOptions, SubscriptionFilter,
    Variant,
};
use sensorcast_demos::{bootstrap, conclude, Bootstrap};

const ROLE: Role = Role::Subscriber;
const VARIANT: Variant = Variant::Topic;

#[derive(Parser)]
#[command(name = "topic-subscriber")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Receives topic-prefixed readings, optionally filtered by topic", long_about = None)]
struct Cli {
    /// Префикс темы (Temperature, Humidity, Pressure); без него: все темы.
    /// Сравнение побайтовое и чувствительно к регистру.
    topic: Option<String>,

    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let Bootstrap {
        settings,
        console,
        ctx,
    } = bootstrap(&cli.log, ROLE, VARIANT)?;

    let filter = SubscriptionFilter::from(cli.topic);
    let options = SubscriberOptions::from_settings(&settings, VARIANT, filter);
    let outcome = run_subscriber(&ctx, options, console, shutdown::ctrl_c()).await;
    let summary = conclude(ctx, ROLE, VARIANT, outcome)?;
    tracing::info!(total = summary.total, "topic subscriber exited");
    Ok(())
}
