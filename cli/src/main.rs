pub mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cli::*;
use common::logger::{TraceId, init_logger, root_span};
use engine::{AlertDispatcher, AlertEvent, AlertSink, AlertThrottle, EngineConfig};

/// Prints dispatched alerts to stdout.
struct StdoutSink;

impl AlertSink for StdoutSink {
    fn on_alert(&self, event: &AlertEvent) {
        println!(
            "🔔 [{}] price={} bar={} t={} band={}",
            event.instrument, event.price, event.bar_index, event.time, event.band
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let replay = cli.replay();

    init_logger("alert-replay", replay.json);

    let cfg = EngineConfig::from_env()?;
    let throttle_ms = replay.throttle_ms.unwrap_or(cfg.throttle_ms);
    if throttle_ms < 0 {
        anyhow::bail!("--throttle-ms must not be negative, got {throttle_ms}");
    }

    let throttle = Arc::new(AlertThrottle::from_config(&cfg));
    let mut dispatcher = AlertDispatcher::new(Arc::clone(&throttle), throttle_ms);
    dispatcher.register_sink(Arc::new(StdoutSink));

    let mut alert = build_alert_from_cli(&cli);

    let trace_id = TraceId::new();
    let span = root_span("replay", &trace_id);
    span.record("instrument", replay.instrument.as_str());
    let _enter = span.enter();

    let path = samples(&replay.prices, replay.ticks_per_bar);
    let fired = path
        .iter()
        .filter(|s| dispatcher.evaluate(alert.as_mut(), &replay.instrument, s))
        .count();

    let stats = throttle.stats();
    info!(
        samples = path.len(),
        fired,
        throttled = stats.suppressed,
        fail_open = stats.fail_open,
        "replay finished"
    );
    println!(
        "{} samples, {} alerts dispatched, {} throttled",
        path.len(),
        fired,
        stats.suppressed
    );

    Ok(())
}
