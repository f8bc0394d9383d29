/// Implement [FromInput] for a type by converting it from another parsed
/// value.
///
/// Errors raised in the block are reported over the span of input which was
/// consumed.
///
/// [FromInput]: crate::input::FromInput
///
/// # Examples
///
/// ```
/// use lib::prelude::*;
///
/// struct Pair(u32);
///
/// lib::from_input! {
///     |(a, b): (u32, u32)| -> Pair {
///         ensure!(a <= b, "{a} > {b}");
///         Ok(Pair(b - a))
///     }
/// }
///
/// let mut input = IStr::from_static(b"1 4\n5 2\n");
/// assert_eq!(input.line::<Pair>()?.0, 3);
/// assert!(input.line::<Pair>().is_err());
/// # Ok::<_, lib::input::IStrError>(())
/// ```
#[macro_export]
macro_rules! from_input {
    (|$($value:ident)? $(($($pat:tt)*))?: $ty:ty| -> $($rest:tt)*) => {
        $crate::from_input!(|[$($value)? $(($($pat)*))?]: $ty| -> $($rest)*);
    };

    (|[$($value:tt)*]: $ty:ty| -> $out:ident $block:block) => {
        impl $crate::input::FromInput for $out {
            #[inline]
            fn try_from_input(
                p: &mut $crate::input::IStr,
            ) -> core::result::Result<Option<Self>, $crate::input::IStrError> {
                let start = p.index();

                let Some(value) = <$ty as $crate::input::FromInput>::try_from_input(p)? else {
                    return Ok(None);
                };

                match (|$($value)*: $ty| -> core::result::Result<$out, $crate::macro_support::Error> {
                    $block
                })(value)
                {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => Err($crate::input::IStrError::new(
                        start..p.index(),
                        $crate::input::ErrorKind::Boxed(e),
                    )),
                }
            }
        }
    };
}

/// Declare the `main` function of a solver.
///
/// The solver is a function taking the puzzle input and returning the answer,
/// and the input is read from the `inputs` directory of the calling crate. If
/// `expect` is specified the answer is checked against it.
///
/// ```no_run
/// use lib::prelude::*;
///
/// lib::entry!(input = "d01.txt", expect = (1, 2), solve);
///
/// fn solve(_input: IStr) -> Result<(u32, u32)> {
///     Ok((1, 2))
/// }
/// ```
#[macro_export]
macro_rules! entry {
    (input = $path:literal, expect = $expect:expr, $solve:path $(,)?) => {
        fn main() -> $crate::prelude::Result<()> {
            let opts = $crate::cli::Opts::parse()?;
            let (input, path) = $crate::input!($path);
            $crate::cli::run_expect(&opts, path, input, $expect, $solve)
        }
    };

    (input = $path:literal, $solve:path $(,)?) => {
        fn main() -> $crate::prelude::Result<()> {
            let opts = $crate::cli::Opts::parse()?;
            let (input, path) = $crate::input!($path);
            $crate::cli::run(&opts, path, input, $solve)
        }
    };
}
