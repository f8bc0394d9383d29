use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Error, Result};

use crate::cli::{Opts, Output, Report};

/// Default warmup period in milliseconds.
const DEFAULT_WARMUP: u64 = 100;

/// Default time limit in milliseconds.
const DEFAULT_TIME_LIMIT: u64 = 400;

#[derive(Default)]
pub(crate) struct Bencher {
    samples: Vec<Duration>,
}

impl Bencher {
    /// Construct a new bencher.
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Bench the given fn, printing a [Report] once done.
    ///
    /// Every produced value is passed to `check`. Errors raised by either
    /// the benched fn or the check are printed rather than propagated.
    #[inline]
    pub(crate) fn iter<T, O, K, E>(
        &mut self,
        o: &mut Output<impl Write>,
        opts: &Opts,
        check: K,
        iter: T,
    ) -> Result<()>
    where
        T: FnMut() -> Result<O, E>,
        K: Fn(&O) -> Result<()>,
        Error: From<E>,
    {
        match self.inner_iter(o, opts, check, iter) {
            Ok(report) => o.report(&report)?,
            Err(e) => o.error(format_args!("{e:#}"))?,
        }

        Ok(())
    }

    fn inner_iter<T, O, K, E>(
        &mut self,
        o: &mut Output<impl Write>,
        opts: &Opts,
        check: K,
        mut iter: T,
    ) -> Result<Report>
    where
        T: FnMut() -> Result<O, E>,
        K: Fn(&O) -> Result<()>,
        Error: From<E>,
    {
        let warmup = Duration::from_millis(opts.warmup.unwrap_or(DEFAULT_WARMUP));
        let time_limit = Duration::from_millis(opts.time_limit.unwrap_or(DEFAULT_TIME_LIMIT));

        let mut sample = || -> Result<Duration> {
            let before = Instant::now();
            let value = iter()?;
            let after = Instant::now();

            check(&value)?;
            black_box(value);
            Ok(after.duration_since(before))
        };

        if !warmup.is_zero() {
            o.info(format_args!("warming up ({warmup:?})..."))?;

            let start = Instant::now();

            while start.elapsed() < warmup {
                sample()?;
            }
        }

        self.samples.clear();

        if let Some(count) = opts.count {
            let count = count.max(1);
            o.info(format_args!("running benches {count} time(s)..."))?;

            for _ in 0..count {
                self.samples.push(sample()?);
            }
        } else {
            o.info(format_args!("running benches ({time_limit:?})..."))?;

            let start = Instant::now();

            loop {
                self.samples.push(sample()?);

                if start.elapsed() >= time_limit {
                    break;
                }
            }
        }

        self.samples.sort();
        Ok(Report::from_sorted(&self.samples))
    }
}
