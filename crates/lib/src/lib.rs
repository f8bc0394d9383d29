//! Support library for puzzle solvers.
//!
//! Each solver is a binary declared through [entry!], which reads its input
//! file, runs the solver and prints the answer. See [cli::Opts] for the
//! supported arguments.

#[macro_use]
mod macros;

pub mod cli;
pub mod env;
pub mod grid;
pub mod input;

#[doc(hidden)]
pub mod macro_support {
    pub use anyhow::Error;
}

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::cli::Unsolved;
    pub use crate::grid::{Cell, DigitRun, Grid, Neighborhood};
    pub use crate::input::{FromInput, IStr, Nl, Sep, Skip, W};
    pub use anyhow::{anyhow, bail, ensure, Context, Result};
    pub type ArrayVec<T, const N: usize = 16> = arrayvec::ArrayVec<T, N>;
    pub use bittle::{Bits, BitsMut};
    pub use bstr::{BStr, ByteSlice};
    pub use log::{debug, info};
}
