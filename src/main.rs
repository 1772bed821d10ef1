use anyhow::Context;
use camfeed::assets;
use camfeed::config::{self, Config};
use camfeed::display::ConsoleSink;
use camfeed::fetch::HttpFrameSource;
use camfeed::playback::FrameScheduler;
use clap::{Arg, Command};
use log::info;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = Command::new(config::app_name())
        .version(config::version())
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("Camera endpoint serving one complete JPEG frame per request.")
                .default_value(assets::DEFAULT_STREAM_URL),
        )
        .arg(
            Arg::new("delay-ms")
                .short('d')
                .long("delay-ms")
                .value_name("MILLIS")
                .help("Pause between a completed fetch and the next request.")
                .default_value("100"),
        )
        .arg(
            Arg::new("timeout-secs")
                .short('t')
                .long("timeout-secs")
                .value_name("SECS")
                .help("Per-request timeout.")
                .default_value("10"),
        )
        .get_matches();

    let url = match matches.get_one::<String>("url") {
        Some(val) => val.as_str(),
        None => assets::DEFAULT_STREAM_URL,
    };
    let delay_ms: u64 = match matches.get_one::<String>("delay-ms") {
        Some(val) => val.parse().context("delay-ms must be an integer")?,
        None => assets::FRAME_DELAY_MS,
    };
    let timeout_secs: u64 = match matches.get_one::<String>("timeout-secs") {
        Some(val) => val.parse().context("timeout-secs must be an integer")?,
        None => assets::REQUEST_TIMEOUT_SECS,
    };

    let config = Config::new(url.parse().context("invalid stream url")?)
        .with_frame_delay(Duration::from_millis(delay_ms))
        .with_request_timeout(Duration::from_secs(timeout_secs));

    let source = HttpFrameSource::new(&config)?;
    let scheduler = FrameScheduler::new(
        Arc::new(source),
        Arc::new(ConsoleSink),
        config.frame_delay,
    );

    scheduler.start();
    info!(
        "pulling frames from {} every {}ms after completion (ctrl-c to stop)",
        config.stream_url, delay_ms
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;

    scheduler.shutdown().await;
    info!("{}", scheduler.health().summary());

    Ok(())
}
