//! Подписывается на все сообщения `tcp://localhost:5555` и печатает их.

use anyhow::Result;
use clap::Parser;
use sensorcast::{
    application::shutdown, run_subscriber, LogArgs, Role, SubscriberOptions, SubscriptionFilter,
    Variant,
};
use sensorcast_demos::{bootstrap, conclude, Bootstrap};

const ROLE: Role = Role::Subscriber;
const VARIANT: Variant = Variant::Simple;

#[derive(Parser)]
#[command(name = "simple-subscriber")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Receives and prints every message from the simple publisher", long_about = None)]
struct Cli {
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

    let options =
        SubscriberOptions::from_settings(&settings, VARIANT, SubscriptionFilter::all());
    let outcome = run_subscriber(&ctx, options, console, shutdown::ctrl_c()).await;
    let summary = conclude(ctx, ROLE, VARIANT, outcome)?;
    tracing::info!(total = summary.total, "simple subscriber exited");
    Ok(())
}
