use std::io::{BufRead, Write};
use std::num::NonZeroU64;
use std::path::PathBuf;

use serde::Deserialize;

use tiltball_core::frame::{FrameError, encode_snapshot};
use tiltball_core::{AccelSample, Ball, BallSnapshot, TiltballConfig};

use crate::synth::synthetic_samples;

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    BadSample { line: usize, message: String },
    Frame(FrameError),
    Json(String),
    InvalidArgument(String),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::BadSample { line, message } => write!(f, "bad sample on line {line}: {message}"),
            Self::Frame(e) => write!(f, "frame error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::InvalidArgument(m) => write!(f, "invalid argument: {m}"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<FrameError> for ReplayError {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

/// How snapshots are written to the output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Snapshot frames, each prefixed with its length as a little-endian u32.
    MsgPack,
}

/// Where samples come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSource {
    File(PathBuf),
    Synthetic { ticks: u32 },
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayArgs {
    pub source: SampleSource,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub reset_every: Option<NonZeroU64>,
}

impl ReplayArgs {
    /// Parse `--key=value` flags. Without `--input` or `--synthetic`, a
    /// synthetic run of `default_ticks` is used.
    pub fn parse<I>(args: I, default_ticks: u32) -> Result<Self, ReplayError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut input = None;
        let mut synthetic = None;
        let mut seed = None;
        let mut format = OutputFormat::default();
        let mut reset_every = None;

        for arg in args {
            let Some((key, value)) = arg.split_once('=') else {
                return Err(ReplayError::InvalidArgument(format!(
                    "expected --key=value, got {arg:?}"
                )));
            };
            match key {
                "--input" => input = Some(PathBuf::from(value)),
                "--synthetic" => synthetic = Some(parse_number::<u32>(key, value)?),
                "--seed" => seed = Some(parse_number::<u64>(key, value)?),
                "--format" => {
                    format = match value {
                        "json" => OutputFormat::Json,
                        "msgpack" => OutputFormat::MsgPack,
                        other => {
                            return Err(ReplayError::InvalidArgument(format!(
                                "unknown format {other:?} (expected json or msgpack)"
                            )));
                        },
                    }
                },
                "--reset-every" => {
                    let n = NonZeroU64::new(parse_number::<u64>(key, value)?).ok_or_else(|| {
                        ReplayError::InvalidArgument("--reset-every must be > 0".to_string())
                    })?;
                    reset_every = Some(n);
                },
                other => {
                    return Err(ReplayError::InvalidArgument(format!("unknown flag {other}")));
                },
            }
        }

        let source = match (input, synthetic) {
            (Some(_), Some(_)) => {
                return Err(ReplayError::InvalidArgument(
                    "--input and --synthetic are mutually exclusive".to_string(),
                ));
            },
            (Some(_), None) if seed.is_some() => {
                return Err(ReplayError::InvalidArgument(
                    "--seed only applies to synthetic samples, not --input".to_string(),
                ));
            },
            (Some(path), None) => SampleSource::File(path),
            (None, Some(ticks)) => SampleSource::Synthetic { ticks },
            (None, None) => SampleSource::Synthetic {
                ticks: default_ticks,
            },
        };

        Ok(Self {
            source,
            seed,
            format,
            reset_every,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ReplayError> {
    value
        .parse()
        .map_err(|_| ReplayError::InvalidArgument(format!("{key} expects a number, got {value:?}")))
}

/// A sample as written in a recording; `dt` may be left out.
#[derive(Debug, Deserialize)]
struct SampleLine {
    ax: f32,
    ay: f32,
    dt: Option<f32>,
}

/// Read JSON-lines samples. Blank lines and `#` comments are skipped;
/// a missing `dt` becomes `default_dt`.
pub fn read_samples<R: BufRead>(reader: R, default_dt: f32) -> Result<Vec<AccelSample>, ReplayError> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parsed: SampleLine =
            serde_json::from_str(trimmed).map_err(|e| ReplayError::BadSample {
                line: idx + 1,
                message: e.to_string(),
            })?;
        samples.push(AccelSample::new(
            parsed.ax,
            parsed.ay,
            parsed.dt.unwrap_or(default_dt),
        ));
    }
    Ok(samples)
}

/// Totals for a finished replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub ticks: u64,
    /// Ticks on which at least one wall was touched.
    pub contact_ticks: u64,
    pub resets: u64,
    pub final_position: (f32, f32),
}

/// Feed `samples` through `ball`, writing a snapshot per tick to `out`.
pub fn replay_samples<W: Write>(
    ball: &mut Ball,
    samples: &[AccelSample],
    format: OutputFormat,
    reset_every: Option<NonZeroU64>,
    out: &mut W,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary {
        ticks: 0,
        contact_ticks: 0,
        resets: 0,
        final_position: ball.position(),
    };

    for (i, &sample) in samples.iter().enumerate() {
        let tick = i as u64 + 1;
        ball.apply(sample);
        if ball.contacts().any() {
            summary.contact_ticks += 1;
        }
        write_snapshot(out, &ball.snapshot(tick), format)?;
        summary.ticks = tick;

        if let Some(n) = reset_every
            && tick % n.get() == 0
        {
            tracing::debug!(tick, "Resetting ball");
            ball.reset();
            summary.resets += 1;
        }
    }

    out.flush()?;
    summary.final_position = ball.position();
    Ok(summary)
}

fn write_snapshot<W: Write>(
    out: &mut W,
    snapshot: &BallSnapshot,
    format: OutputFormat,
) -> Result<(), ReplayError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, snapshot).map_err(|e| ReplayError::Json(e.to_string()))?;
            out.write_all(b"\n")?;
        },
        OutputFormat::MsgPack => {
            let frame = encode_snapshot(snapshot)?;
            out.write_all(&(frame.len() as u32).to_le_bytes())?;
            out.write_all(&frame)?;
        },
    }
    Ok(())
}

/// Run a full replay: build the ball from config, gather samples, write
/// snapshots to `out`.
pub fn run<W: Write>(
    config: &TiltballConfig,
    args: &ReplayArgs,
    out: &mut W,
) -> Result<ReplaySummary, ReplayError> {
    for issue in config.field.diagnose() {
        tracing::warn!(%issue, "Field geometry problem; the ball may not move as expected");
    }

    let samples = match &args.source {
        SampleSource::File(path) => {
            let file = std::fs::File::open(path)?;
            let samples = read_samples(std::io::BufReader::new(file), config.replay.default_dt)?;
            tracing::info!(path = %path.display(), count = samples.len(), "Loaded samples");
            samples
        },
        SampleSource::Synthetic { ticks } => {
            let seed = args.seed.unwrap_or(config.replay.seed);
            tracing::info!(ticks, seed, "Generating synthetic samples");
            synthetic_samples(*ticks, seed, config.replay.default_dt)
        },
    };

    let mut ball = Ball::with_field(config.field);
    let summary = replay_samples(&mut ball, &samples, args.format, args.reset_every, out)?;

    tracing::info!(
        ticks = summary.ticks,
        contact_ticks = summary.contact_ticks,
        resets = summary.resets,
        x = summary.final_position.0,
        y = summary.final_position.1,
        "Replay finished"
    );
    Ok(summary)
}
