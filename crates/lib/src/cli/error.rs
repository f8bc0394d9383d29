use core::fmt;
use core::ops::Range;

use crate::env::Size;
use crate::input::{IStr, IStrError};

/// A line and column range, as reported in errors.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    start: usize,
    end: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0, 0);

    pub(crate) const fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line + 1;

        if self.end > self.start {
            write!(f, "{line}:{}-{}", self.start, self.end)
        } else {
            write!(f, "{line}:{}", self.start)
        }
    }
}

/// Position in an input file associated with an error.
#[derive(Debug, Clone, Copy)]
pub struct CliError {
    path: &'static str,
    pos: LineCol,
}

impl CliError {
    /// Attach the position in the input at `path` to the given error.
    ///
    /// The position is recovered from an [IStrError] anywhere in the error
    /// chain, else it points to the start of the input.
    pub fn cli<E>(path: &'static str, input: IStr, error: E) -> anyhow::Error
    where
        anyhow::Error: From<E>,
    {
        let error = anyhow::Error::from(error);
        let span = find_span(&error);
        let pos = crate::env::pos_from(input.as_data(), span);
        error.context(CliError { path, pos })
    }

    /// The position the error refers to.
    #[inline]
    pub fn pos(&self) -> LineCol {
        self.pos
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{path}:{pos}", path = self.path, pos = self.pos)
    }
}

/// Need to be able to unwrap an error fully in case it's threaded through
/// multiple layers of processing.
fn find_span(error: &anyhow::Error) -> Range<Size> {
    error
        .chain()
        .find_map(|e| e.downcast_ref::<IStrError>())
        .map(IStrError::span)
        .unwrap_or(Size::ZERO..Size::ZERO)
}
