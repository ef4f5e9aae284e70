//! Публикует показания трёх датчиков с темой в начале сообщения
//! на `tcp://*:5556`, два раза в секунду.

use anyhow::Result;
use clap::Parser;
use sensorcast::{
    application::shutdown, run_publisher, LogArgs, PublisherOptions, Role, Variant,
};
use sensorcast_demos::{bootstrap, conclude, Bootstrap};

const ROLE: Role = Role::Publisher;
const VARIANT: Variant = Variant::Topic;

#[derive(Parser)]
#[command(name = "topic-publisher")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Publishes Temperature, Humidity and Pressure readings with topic prefixes", long_about = None)]
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

    let options = PublisherOptions::from_settings(&settings, VARIANT);
    let outcome = run_publisher(&ctx, options, console, shutdown::ctrl_c()).await;
    let summary = conclude(ctx, ROLE, VARIANT, outcome)?;
    tracing::info!(total = summary.total, "topic publisher exited");
    Ok(())
}
