use core::fmt;
use core::ops::Range;

use crate::env::Size;
use crate::grid::GridError;

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    NotInteger(&'static str),
    NotUtf8,
    ExpectedLine,
    ExpectedDelimiter(u8),
    ExpectedTuple(usize),
    UnexpectedEof,
    Grid(GridError),
    Boxed(anyhow::Error),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotInteger(n) => write!(f, "not an integer or integer overflow `{n}`"),
            ErrorKind::NotUtf8 => write!(f, "not utf-8"),
            ErrorKind::ExpectedLine => write!(f, "expected line"),
            ErrorKind::ExpectedDelimiter(d) => write!(f, "expected `{}`", char::from(*d)),
            ErrorKind::ExpectedTuple(n) => write!(f, "expected tuple of length `{n}`"),
            ErrorKind::UnexpectedEof => write!(f, "unexpected eof"),
            ErrorKind::Grid(e) => e.fmt(f),
            ErrorKind::Boxed(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ErrorKind {}

impl From<GridError> for ErrorKind {
    #[inline]
    fn from(error: GridError) -> Self {
        Self::Grid(error)
    }
}

/// Error raised through string processing.
#[derive(Debug)]
pub struct IStrError {
    pub(crate) span: Range<Size>,
    pub(crate) kind: ErrorKind,
}

impl IStrError {
    /// Construct a new input error.
    #[inline]
    pub fn new(span: Range<Size>, kind: impl Into<ErrorKind>) -> Self {
        Self {
            span,
            kind: kind.into(),
        }
    }

    /// The span of input the error refers to.
    #[inline]
    pub fn span(&self) -> Range<Size> {
        self.span.clone()
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for IStrError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {:?})", self.kind, Size::usize_range(self.span()))
    }
}

impl std::error::Error for IStrError {}
