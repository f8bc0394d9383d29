//! CLI helpers.

mod bencher;
pub(crate) mod error;
mod output;
mod output_eq;
mod stdout_logger;
#[cfg(test)]
mod tests;

use core::fmt;
use core::ops::AddAssign;
use core::time::Duration;
use std::io::Write;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Error, Result};
use serde::{Deserialize, Serialize};

use crate::input::IStr;

use self::bencher::Bencher;
pub use self::error::{CliError, LineCol};
pub(self) use self::output::{Output, OutputKind};
pub use self::output_eq::OutputEq;

static STDOUT_LOGGER: stdout_logger::StdoutLogger = stdout_logger::StdoutLogger;

/// Run mode.
#[derive(Default)]
pub enum Mode {
    /// Default run mode.
    #[default]
    Default,
    /// Run as benchmark.
    Bench,
}

/// Input options.
#[derive(Default)]
pub struct Opts {
    /// Run as a benchmark.
    pub mode: Mode,
    /// Run in verbose mode.
    verbose: bool,
    /// Output JSON report.
    json: bool,
    /// Warmup period.
    warmup: Option<u64>,
    /// Bench period.
    time_limit: Option<u64>,
    /// Number of times to run benches.
    count: Option<usize>,
}

impl Opts {
    /// Parse CLI options from the environment and install the logger.
    pub fn parse() -> Result<Self> {
        let opts = Self::parse_from(std::env::args_os().skip(1).map(|arg| arg.into_string()))?;

        if !opts.json {
            let level = if opts.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };

            log::set_max_level(level);
            log::set_logger(&STDOUT_LOGGER)
                .map_err(|error| anyhow!("failed to set log: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse CLI options from the given arguments.
    pub(crate) fn parse_from<I, S, E>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<S, E>>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            let Ok(arg) = arg else {
                bail!("non-utf8 argument");
            };

            match arg.as_ref() {
                "--bench" => {
                    if !matches!(opts.mode, Mode::Default) {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
                }
                "--verbose" => {
                    opts.verbose = true;
                }
                "--warmup" => {
                    opts.warmup = Some(value(&mut it, "--warmup")?);
                }
                "--time-limit" => {
                    opts.time_limit = Some(value(&mut it, "--time-limit")?);
                }
                "--count" => {
                    opts.count = Some(value(&mut it, "--count")?);
                }
                "--json" => {
                    opts.json = true;
                }
                "--" => {
                    break;
                }
                other => {
                    bail!("unsupported argument: {other}");
                }
            }
        }

        return Ok(opts);

        fn value<T, I, S, E>(it: &mut I, name: &str) -> Result<T>
        where
            T: core::str::FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
            I: Iterator<Item = Result<S, E>>,
            S: AsRef<str>,
        {
            let value = it
                .next()
                .with_context(|| format!("missing argument to `{name}`"))?;

            let Ok(value) = value else {
                bail!("missing string argument to `{name}`");
            };

            value
                .as_ref()
                .parse()
                .with_context(|| format!("bad argument to `{name}`"))
        }
    }

    #[inline]
    fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

/// Run a solver over the given input according to `opts`.
///
/// In the default mode the solver runs once and its answer and run time are
/// printed. Errors raised by the solver are reported with the position in
/// `path` they refer to.
pub fn run<T, O, E>(opts: &Opts, path: &'static str, input: IStr, solve: T) -> Result<()>
where
    T: FnMut(IStr) -> Result<O, E>,
    O: fmt::Debug,
    Error: From<E>,
{
    run_checked(std::io::stdout().lock(), opts, path, input, solve, |_| Ok(()))
}

/// Same as [run], but checks that the answer equals `expected`.
pub fn run_expect<T, O, C, E>(
    opts: &Opts,
    path: &'static str,
    input: IStr,
    expected: C,
    solve: T,
) -> Result<()>
where
    T: FnMut(IStr) -> Result<O, E>,
    O: fmt::Debug + OutputEq<C>,
    C: fmt::Debug,
    Error: From<E>,
{
    let out = std::io::stdout().lock();

    run_checked(out, opts, path, input, solve, move |value: &O| {
        anyhow::ensure!(
            value.output_eq(&expected),
            "{value:?} (value) != {expected:?} (expected)"
        );

        Ok(())
    })
}

/// Run a solver, writing answers and reports to `out`.
///
/// Errors raised by the solver carry a [CliError]. In bench mode they are
/// printed instead of returned.
fn run_checked<W, T, O, E, K>(
    out: W,
    opts: &Opts,
    path: &'static str,
    input: IStr,
    mut solve: T,
    check: K,
) -> Result<()>
where
    W: Write,
    T: FnMut(IStr) -> Result<O, E>,
    O: fmt::Debug,
    Error: From<E>,
    K: Fn(&O) -> Result<()>,
{
    let mut o = Output::new(out, opts.output_kind());

    match opts.mode {
        Mode::Default => {
            let start = Instant::now();

            let value = match solve(input) {
                Ok(value) => value,
                Err(error) => return Err(CliError::cli(path, input, error)),
            };

            let elapsed = start.elapsed();
            check(&value)?;

            o.answer(format_args!("{value:?}"))?;
            o.info(format_args!("time: {elapsed:?}"))?;
        }
        Mode::Bench => {
            let mut b = Bencher::new();
            b.iter::<_, _, _, Error>(&mut o, opts, check, || {
                solve(input).map_err(|error| CliError::cli(path, input, error))
            })?;
        }
    }

    Ok(())
}

/// Answer for a puzzle part which has no solution yet.
///
/// This is an expected outcome rather than an error, so it is printed as the
/// answer.
///
/// # Examples
///
/// ```
/// use lib::cli::Unsolved;
///
/// assert_eq!(format!("{:?}", (42, Unsolved)), "(42, Not implemented)");
/// ```
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct Unsolved;

impl fmt::Display for Unsolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Not implemented")
    }
}

impl fmt::Debug for Unsolved {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Report {
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
}

impl Report {
    /// Build a report out of sorted samples.
    fn from_sorted(samples: &[Duration]) -> Self {
        let count = samples.len();
        let sum = samples.iter().sum::<Duration>();

        let avg = if count == 0 {
            Duration::default()
        } else {
            Duration::from_nanos(
                u64::try_from(sum.as_nanos() / (count as u128)).unwrap_or_default(),
            )
        };

        Self {
            p50: percentile(samples, 5000),
            p95: percentile(samples, 9500),
            p99: percentile(samples, 9900),
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
        }
    }
}

/// Get the percentile, expressed in hundredths of a percent, out of sorted
/// samples.
fn percentile(samples: &[Duration], per: usize) -> Duration {
    let Some(last) = samples.len().checked_sub(1) else {
        return Duration::default();
    };

    let index = (last * per) / 10000;
    samples.get(index).copied().unwrap_or_default()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            p50,
            p95,
            p99,
            count,
            min,
            max,
            avg,
        } = self;

        write!(f, "count: {count}, min: {min:?}, max: {max:?}, avg: {avg:?}, 50th: {p50:?}, 95th: {p95:?}, 99th: {p99:?}")
    }
}

impl AddAssign<&Report> for Report {
    fn add_assign(&mut self, rhs: &Report) {
        self.p50 += rhs.p50;
        self.p95 += rhs.p95;
        self.p99 += rhs.p99;
        self.count += rhs.count;
        self.min += rhs.min;
        self.max += rhs.max;
        self.avg += rhs.avg;
    }
}
