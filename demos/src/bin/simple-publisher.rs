//! Публикует случайную температуру раз в секунду на `tcp://*:5555`.

use anyhow::Result;
use clap::Parser;
use sensorcast::{
    application::shutdown, run_publisher, LogArgs, PublisherOptions, Role, Variant,
};
use sensorcast_demos::{bootstrap, conclude, Bootstrap};

const ROLE: Role = Role::Publisher;
const VARIANT: Variant = Variant::Simple;

#[derive(Parser)]
#[command(name = "simple-publisher")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Publishes a temperature reading every second", long_about = None)]
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
    tracing::info!(total = summary.total, "simple publisher exited");
    Ok(())
}
