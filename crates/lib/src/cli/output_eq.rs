use crate::cli::Unsolved;

/// Helper trait to compare solver answers against expected ones.
pub trait OutputEq<O = Self>
where
    O: ?Sized,
{
    fn output_eq(&self, other: &O) -> bool;
}

impl<A, B, C, D> OutputEq<(C, D)> for (A, B)
where
    A: OutputEq<C>,
    B: OutputEq<D>,
{
    #[inline]
    fn output_eq(&self, other: &(C, D)) -> bool {
        self.0.output_eq(&other.0) && self.1.output_eq(&other.1)
    }
}

impl<A, B> OutputEq<Option<B>> for Option<A>
where
    A: OutputEq<B>,
{
    #[inline]
    fn output_eq(&self, other: &Option<B>) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.output_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl OutputEq<&str> for String {
    #[inline]
    fn output_eq(&self, other: &&str) -> bool {
        self == other
    }
}

macro_rules! partial_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OutputEq<$ty> for $ty {
                #[inline]
                fn output_eq(&self, other: &Self) -> bool {
                    other == self
                }
            }
        )*
    };
}

partial_eq!(usize, isize, u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, bool, (), Unsolved);
