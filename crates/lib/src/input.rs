//! Input parser.
//!
//! Solvers describe the shape of a line through [FromInput] types. Words are
//! separated by ASCII whitespace, [Nl] takes a line and [Sep] takes everything
//! up to a delimiter.

mod error;
mod iter;

use core::ops;
use std::str::from_utf8;

pub use self::error::{ErrorKind, IStrError};
pub use self::iter::Iter;

pub(self) type Result<T> = std::result::Result<T, IStrError>;
use crate::env::Size;

pub(crate) const NL: u8 = b'\n';

/// Helper to parse input.
#[derive(Debug, Clone, Copy)]
pub struct IStr {
    /// Remaining data to process.
    data: &'static [u8],
    /// Offset of `data` in the file it was read from.
    index: Size,
}

impl IStr {
    /// Construct a new input processor.
    #[inline]
    pub fn new(data: &'static [u8], index: Size) -> Self {
        Self { data, index }
    }

    /// Construct an input processor over static data, such as a sample
    /// embedded in a test.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let mut input = IStr::from_static(b"1 2\n3 4\n");
    /// assert_eq!(input.line::<(u32, u32)>()?, (1, 2));
    /// assert_eq!(input.line::<(u32, u32)>()?, (3, 4));
    /// assert!(input.try_line::<(u32, u32)>()?.is_none());
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn from_static(data: &'static [u8]) -> Self {
        Self::new(data, Size::ZERO)
    }

    /// Access index of input string.
    #[inline]
    pub fn index(&self) -> Size {
        self.index
    }

    /// Test if input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the length of the remaining input.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get input being processed.
    #[inline]
    pub fn as_data(&self) -> &'static [u8] {
        self.data
    }

    /// Construct an iterator over values of type `T`.
    #[inline]
    pub fn iter<T>(&mut self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Parse the next value as T.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        T::from_input(self)
    }

    /// Try parse the next value as `T`, returns `None` if there is no more
    /// data to process.
    #[inline]
    pub fn try_next<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        T::try_from_input(self)
    }

    /// Parse the next line as `T`, errors if there are no more lines.
    #[inline]
    pub fn line<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        let index = self.index;

        let Some(line) = self.try_line()? else {
            return Err(IStrError::new(index..self.index, ErrorKind::ExpectedLine));
        };

        Ok(line)
    }

    /// Parse the next line as `T`, returns `Ok(None)` once the input is
    /// exhausted.
    #[inline]
    pub fn try_line<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        let Some(Nl(line)) = self.try_next()? else {
            return Ok(None);
        };

        Ok(Some(line))
    }

    /// Try to parse the next whitespace-separated word.
    fn try_next_word<T>(&mut self) -> Result<Option<(Size, T)>>
    where
        T: FromInput,
    {
        let s = self.find(0, |b| !u8::is_ascii_whitespace(b));
        let n = self.find(s, u8::is_ascii_whitespace);

        if s == n {
            return Ok(None);
        }

        let Some(mut input) = self.slice(s..n) else {
            return Ok(None);
        };

        let Some(value) = T::try_from_input(&mut input)? else {
            return Ok(None);
        };

        self.advance(n);
        Ok(Some((Size::new(s), value)))
    }

    /// Split off the data before the next `b`, consuming `b` as well.
    /// Returns `None` and leaves the input untouched if there is no `b`.
    fn split_at(&mut self, b: u8) -> Option<IStr> {
        let at = memchr::memchr(b, self.data)?;
        let head = self.slice(0..at)?;
        self.advance(at.checked_add(1)?);
        Some(head)
    }

    /// Like [IStr::split_at], but takes the rest of the input when `b` is
    /// missing. Only returns `None` once the input is empty.
    fn split_or_rest(&mut self, b: u8) -> Option<IStr> {
        if self.data.is_empty() {
            return None;
        }

        if let Some(head) = self.split_at(b) {
            return Some(head);
        }

        let rest = *self;
        self.advance(self.len());
        Some(rest)
    }

    /// Find the first index from `n` matching the predicate.
    fn find(&self, mut n: usize, p: fn(&u8) -> bool) -> usize {
        while let Some(c) = self.data.get(n) {
            if p(c) {
                break;
            }

            n += 1;
        }

        n
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.data = self.data.get(n..).unwrap_or_default();
        self.index = self.index.saturating_add(Size::new(n));
    }

    /// Construct a sub-range.
    #[inline]
    fn slice(&self, range: ops::Range<usize>) -> Option<IStr> {
        let index = self.index.checked_add(Size::new(range.start))?;

        Some(Self {
            data: self.data.get(range)?,
            index,
        })
    }

    /// The span covering all remaining input.
    #[inline]
    fn rest_span(&self) -> ops::Range<Size> {
        self.index..self.index.saturating_add(Size::new(self.len()))
    }
}

/// A value that can be parsed from input.
pub trait FromInput: Sized {
    /// Error kind used when no value is available.
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::UnexpectedEof
    }

    /// Try to parse a value, returning `Ok(None)` if there is nothing to
    /// parse.
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>>;

    /// Parse a value from a given input.
    #[inline]
    fn from_input(p: &mut IStr) -> Result<Self> {
        let index = p.index;

        let Some(value) = Self::try_from_input(p)? else {
            return Err(IStrError::new(index..p.index, Self::error_kind()));
        };

        Ok(value)
    }
}

// A tuple is absent only if its first element is. Running out of input after
// that is an error.
macro_rules! tuple {
    ($num:literal => $first:ident $first_id:ident $(, $rest:ident $rest_id:ident)* $(,)?) => {
        impl<$first, $($rest,)*> FromInput for ($first, $($rest, )*)
        where
            $first: FromInput,
            $($rest: FromInput,)*
        {
            #[inline]
            fn error_kind() -> ErrorKind {
                ErrorKind::ExpectedTuple($num)
            }

            #[inline]
            fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                let start = p.index;

                let Some($first_id) = p.try_next()? else {
                    return Ok(None);
                };

                $(
                    let Some($rest_id) = p.try_next()? else {
                        return Err(IStrError::new(start..p.index, ErrorKind::ExpectedTuple($num)));
                    };
                )*

                Ok(Some(($first_id, $($rest_id,)*)))
            }
        }
    }
}

#[rustfmt::skip]
macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromInput for $ty {
                #[inline]
                fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                    let index = p.index;

                    let Some((n, string)) = p.try_next_word::<&str>()? else {
                        return Ok(None);
                    };

                    let Ok(n) = str::parse(string) else {
                        return Err(IStrError::new(index.saturating_add(n)..p.index, ErrorKind::NotInteger(string)));
                    };

                    Ok(Some(n))
                }
            }
        )*
    };
}

tuple!(2 => A a, B b);
tuple!(3 => A a, B b, C c);
tuple!(4 => A a, B b, C c, D d);

integer!(u32);

impl FromInput for &[u8] {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let data = p.data;
        p.advance(data.len());
        Ok(Some(data))
    }
}

impl FromInput for &str {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let index = p.index;

        let Some(data) = <&[u8]>::try_from_input(p)? else {
            return Ok(None);
        };

        let Ok(data) = from_utf8(data) else {
            return Err(IStrError::new(index..p.index, ErrorKind::NotUtf8));
        };

        Ok(Some(data))
    }
}

/// Parse until end of line. The last line does not need a line terminator.
pub struct Nl<T>(pub T);

impl<T> FromInput for Nl<T>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let Some(mut input) = p.split_or_rest(NL) else {
            return Ok(None);
        };

        Ok(Some(Self(input.next()?)))
    }
}

/// Parse up to the delimiter `D`, which is consumed and must be present.
///
/// # Examples
///
/// ```
/// use lib::prelude::*;
///
/// let mut input = IStr::from_static(b"Card 7: 1 2");
/// let (W(card), Sep(id)) = input.next::<(W<&str>, Sep<b':', u32>)>()?;
/// assert_eq!((card, id), ("Card", 7));
///
/// let mut input = IStr::from_static(b"Card 7");
/// assert!(input.next::<(W, Sep<b':', u32>)>().is_err());
/// # Ok::<_, lib::input::IStrError>(())
/// ```
#[derive(Debug)]
pub struct Sep<const D: u8, T>(pub T);

impl<const D: u8, T> FromInput for Sep<D, T>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        if p.is_empty() {
            return Ok(None);
        }

        let Some(mut input) = p.split_at(D) else {
            return Err(IStrError::new(
                p.rest_span(),
                ErrorKind::ExpectedDelimiter(D),
            ));
        };

        Ok(Some(Self(input.next()?)))
    }
}

impl<T> FromInput for Vec<T>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let mut output = Vec::new();

        while !p.is_empty() {
            let Some(element) = T::try_from_input(p)? else {
                break;
            };

            output.push(element);
        }

        Ok(Some(output))
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub struct Skip;

impl FromInput for Skip {
    #[inline]
    fn try_from_input(_: &mut IStr) -> Result<Option<Self>> {
        Ok(Some(Self))
    }
}

/// Parse a word of input, which parses until we reach a whitespace character.
#[derive(Debug)]
pub struct W<T = Skip>(pub T);

impl<T> FromInput for W<T>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let Some((_, value)) = p.try_next_word()? else {
            return Ok(None);
        };

        Ok(Some(Self(value)))
    }
}
