use clap::{Args, Parser, Subcommand, ValueEnum};

use engine::{CrossingAlert, Distance, DistanceUnit, Frequency, LevelAlert, LineAlert, Sample};
use geometry::Segment;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyCli {
    Once,
    OncePerBar,
    EveryTime,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitCli {
    Tick,
    Price,
    Percent,
}

#[derive(Debug, Parser)]
#[clap(name = "alert-replay", version)]
pub struct Cli {
    #[clap(subcommand)]
    pub target: TargetCmd,
}

#[derive(Debug, Subcommand)]
pub enum TargetCmd {
    /// Alert when price enters the band around a fixed level
    Level {
        /// Target price
        #[clap(long, allow_negative_numbers = true)]
        target: f64,

        #[clap(flatten)]
        replay: ReplayArgs,
    },

    /// Alert when price enters the band around a trend line
    Line {
        /// First line point as TIME,PRICE
        #[clap(long, value_parser = parse_point)]
        from: (f64, f64),

        /// Second line point as TIME,PRICE
        #[clap(long, value_parser = parse_point)]
        to: (f64, f64),

        /// Stroke width of the line (hit-testing only)
        #[clap(long, default_value = "0")]
        thickness: f64,

        #[clap(flatten)]
        replay: ReplayArgs,
    },
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Instrument ticksize (minimum price increment)
    #[clap(long, default_value = "0.25")]
    pub ticksize: f64,

    /// Unit of --distance
    #[clap(long, value_enum, default_value_t = UnitCli::Tick)]
    pub unit: UnitCli,

    /// Band half-width around the target (0 = exact price)
    #[clap(long, default_value = "0")]
    pub distance: f64,

    /// Re-trigger policy
    #[clap(long, value_enum, default_value_t = FrequencyCli::EveryTime)]
    pub frequency: FrequencyCli,

    /// Price path to replay (comma-separated)
    #[clap(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub prices: Vec<f64>,

    /// Samples per bar; sample i belongs to bar i / ticks_per_bar
    #[clap(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub ticks_per_bar: u32,

    /// Throttle key
    #[clap(long, default_value = "DEMO")]
    pub instrument: String,

    /// Throttle window in ms (defaults to ALERT_THROTTLE_MS or 1000).
    /// The window runs on the wall clock, not on replayed time.
    #[clap(long)]
    pub throttle_ms: Option<i64>,

    /// Emit logs as JSON
    #[clap(long)]
    pub json: bool,
}

impl Cli {
    pub fn replay(&self) -> &ReplayArgs {
        match &self.target {
            TargetCmd::Level { replay, .. } | TargetCmd::Line { replay, .. } => replay,
        }
    }
}

/// Convert CLI frequency selection → engine Frequency
pub(crate) fn cli_to_frequency(f: FrequencyCli) -> Frequency {
    match f {
        FrequencyCli::Once => Frequency::Once,
        FrequencyCli::OncePerBar => Frequency::OncePerBar,
        FrequencyCli::EveryTime => Frequency::EveryTime,
    }
}

pub(crate) fn cli_to_unit(u: UnitCli) -> DistanceUnit {
    match u {
        UnitCli::Tick => DistanceUnit::Tick,
        UnitCli::Price => DistanceUnit::Price,
        UnitCli::Percent => DistanceUnit::Percent,
    }
}

/// Build the alert described by the command line.
pub(crate) fn build_alert_from_cli(cli: &Cli) -> Box<dyn CrossingAlert> {
    let r = cli.replay();
    let frequency = cli_to_frequency(r.frequency);
    let distance = Distance::new(cli_to_unit(r.unit), r.distance);

    match &cli.target {
        TargetCmd::Level { target, .. } => {
            Box::new(LevelAlert::new(r.ticksize, *target, frequency, distance))
        }
        TargetCmd::Line {
            from,
            to,
            thickness,
            ..
        } => {
            let line = Segment::new(*from, *to, *thickness);
            Box::new(LineAlert::new(r.ticksize, line, frequency, distance))
        }
    }
}

/// Sample `i` sits on bar `i / ticks_per_bar` at chart time `i`.
pub(crate) fn samples(prices: &[f64], ticks_per_bar: u32) -> Vec<Sample> {
    let per_bar = ticks_per_bar.max(1) as usize;
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| Sample::new(price, (i / per_bar) as i32, i as f64))
        .collect()
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (t, p) = s
        .split_once(',')
        .ok_or_else(|| format!("expected TIME,PRICE, got {s:?}"))?;
    let t: f64 = t.trim().parse().map_err(|e| format!("bad time {t:?}: {e}"))?;
    let p: f64 = p.trim().parse().map_err(|e| format!("bad price {p:?}: {e}"))?;
    Ok((t, p))
}
