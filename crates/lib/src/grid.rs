//! Read-only character grids.

#[cfg(test)]
mod tests;

use core::fmt;

use arrayvec::ArrayVec;
use bstr::ByteSlice;
use thiserror::Error;

use crate::input::{FromInput, IStr, IStrError};

/// Offsets of orthogonal neighbours: N, S, E, W.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Offsets of diagonal neighbours: NW, NE, SW, SE.
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Errors raised when constructing a [Grid].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    #[error("grid is empty")]
    Empty,
    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Which cells count as neighbours of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// North, south, east and west.
    Four,
    /// [Neighborhood::Four] followed by the four diagonals.
    Eight,
}

/// An immutable rectangular grid of bytes.
///
/// Cells are stored row-major in a single buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    data: Vec<u8>,
    rows: usize,
    columns: usize,
}

impl Grid {
    /// Construct a grid out of newline-separated rows.
    ///
    /// Rows may be separated by either `\n` or `\r\n`, and trailing line
    /// terminators are ignored. Every row must have the same length, so a
    /// blank line in the middle of the grid is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::{Grid, GridError};
    ///
    /// let grid = Grid::new(b"ab\ncd\n")?;
    /// assert_eq!(grid.rows_len(), 2);
    /// assert_eq!(grid.columns_len(), 2);
    /// assert_eq!(grid.try_get(1, 0), Some(b'c'));
    ///
    /// assert_eq!(Grid::new(b"ab\ncd\n\n")?, grid);
    ///
    /// assert_eq!(
    ///     Grid::new(b"ab\nc"),
    ///     Err(GridError::Ragged { row: 1, expected: 2, actual: 1 })
    /// );
    /// # Ok::<_, GridError>(())
    /// ```
    pub fn new(text: &[u8]) -> Result<Self, GridError> {
        let mut data = Vec::with_capacity(text.len());
        let mut columns = None;
        let mut rows = 0;

        let text = text.trim_end_with(|c| matches!(c, '\n' | '\r'));

        for (row, line) in text.lines().enumerate() {
            let expected = *columns.get_or_insert(line.len());

            if line.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    actual: line.len(),
                });
            }

            data.extend_from_slice(line);
            rows += 1;
        }

        let columns = columns.unwrap_or_default();

        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }

        Ok(Self {
            data,
            rows,
            columns,
        })
    }

    /// Get number of rows in the grid.
    #[inline]
    pub fn rows_len(&self) -> usize {
        self.rows
    }

    /// Get number of columns in the grid.
    #[inline]
    pub fn columns_len(&self) -> usize {
        self.columns
    }

    /// Access the specified row in the grid.
    #[inline]
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }

        let start = row * self.columns;
        self.data.get(start..start + self.columns)
    }

    /// Iterate over rows in the grid.
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.columns)
    }

    /// Get the byte at the given row and column.
    #[inline]
    pub fn try_get(&self, row: usize, column: usize) -> Option<u8> {
        if column >= self.columns {
            return None;
        }

        self.row(row)?.get(column).copied()
    }

    /// Get the cell at the given row and column, or `None` if it is out of
    /// bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    ///
    /// let grid = Grid::new(b"abc\ndef")?;
    ///
    /// let cell = grid.cell(1, 2).unwrap();
    /// assert_eq!((cell.row(), cell.column(), cell.value()), (1, 2, b'f'));
    ///
    /// assert!(grid.cell(2, 0).is_none());
    /// assert!(grid.cell(0, 3).is_none());
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    #[inline]
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell<'_>> {
        let value = self.try_get(row, column)?;

        Some(Cell {
            grid: self,
            row,
            column,
            value,
        })
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        self.data.iter().enumerate().map(move |(n, &value)| Cell {
            grid: self,
            row: n / self.columns,
            column: n % self.columns,
            value,
        })
    }

    /// Find every cell whose value matches the predicate, in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    ///
    /// let grid = Grid::new(b"a*b\n*c*")?;
    /// let stars = grid
    ///     .find_all(|b| b == b'*')
    ///     .map(|c| (c.row(), c.column()))
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(stars, [(0, 1), (1, 0), (1, 2)]);
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    pub fn find_all<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = Cell<'a>> + 'a
    where
        P: FnMut(u8) -> bool + 'a,
    {
        self.cells().filter(move |c| predicate(c.value))
    }

    /// Iterate over every digit run in the grid, in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    ///
    /// let grid = Grid::new(b"12.3\n.45.")?;
    /// let values = grid.digit_runs().map(|r| r.value()).collect::<Vec<_>>();
    /// assert_eq!(values, [Some(12), Some(3), Some(45)]);
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    pub fn digit_runs(&self) -> impl Iterator<Item = DigitRun<'_>> + '_ {
        self.rows().enumerate().flat_map(move |(row, data)| {
            let mut column = 0;

            core::iter::from_fn(move || {
                while !data.get(column)?.is_ascii_digit() {
                    column += 1;
                }

                let start = column;

                while data.get(column).is_some_and(u8::is_ascii_digit) {
                    column += 1;
                }

                Some(DigitRun::new(self, row, start, column))
            })
        })
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows().map(|r| r.as_bstr())).finish()
    }
}

impl FromInput for Grid {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>, IStrError> {
        let start = p.index();

        if p.is_empty() {
            return Ok(None);
        }

        let data = p.next::<&[u8]>()?;

        match Grid::new(data) {
            Ok(grid) => Ok(Some(grid)),
            Err(error) => Err(IStrError::new(start..p.index(), error)),
        }
    }
}

/// A read-only view into one position of a [Grid].
#[derive(Clone, Copy)]
pub struct Cell<'a> {
    grid: &'a Grid,
    row: usize,
    column: usize,
    value: u8,
}

impl<'a> Cell<'a> {
    /// The grid the cell belongs to.
    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Get the cell at the given offset, if in bounds.
    #[inline]
    pub fn offset(&self, rows: isize, columns: isize) -> Option<Cell<'a>> {
        let row = self.row.checked_add_signed(rows)?;
        let column = self.column.checked_add_signed(columns)?;
        self.grid.cell(row, column)
    }

    /// The cell `n` columns to the east on the same row.
    #[inline]
    pub fn step_east(&self, n: usize) -> Option<Cell<'a>> {
        self.grid.cell(self.row, self.column.checked_add(n)?)
    }

    /// The cell `n` columns to the west on the same row.
    #[inline]
    pub fn step_west(&self, n: usize) -> Option<Cell<'a>> {
        self.grid.cell(self.row, self.column.checked_sub(n)?)
    }

    /// Iterate over neighbouring cells which are in bounds.
    ///
    /// Orthogonal neighbours come first in the order north, south, east and
    /// west, followed by north-west, north-east, south-west and south-east
    /// for [Neighborhood::Eight].
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::{Grid, Neighborhood};
    ///
    /// let grid = Grid::new(b"abc\ndef\nghi")?;
    /// let center = grid.cell(1, 1).unwrap();
    ///
    /// let four = center.neighbors(Neighborhood::Four).map(|c| c.value());
    /// assert!(four.eq(*b"bhfd"));
    ///
    /// let corner = grid.cell(0, 0).unwrap();
    /// let eight = corner.neighbors(Neighborhood::Eight).map(|c| c.value());
    /// assert!(eight.eq(*b"dbe"));
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    pub fn neighbors(&self, neighborhood: Neighborhood) -> impl Iterator<Item = Cell<'a>> {
        let diagonal: &[(isize, isize)] = match neighborhood {
            Neighborhood::Four => &[],
            Neighborhood::Eight => &DIAGONAL,
        };

        let mut out = ArrayVec::<_, 8>::new();

        for &(rows, columns) in ORTHOGONAL.iter().chain(diagonal) {
            out.extend(self.offset(rows, columns));
        }

        out.into_iter()
    }

    /// Test if the cell holds an ASCII digit.
    #[inline]
    pub fn is_digit(&self) -> bool {
        self.value.is_ascii_digit()
    }

    /// Test if the cell holds a symbol, which is anything that is neither `.`
    /// nor an ASCII digit.
    #[inline]
    pub fn is_symbol(&self) -> bool {
        !matches!(self.value, b'.' | b'0'..=b'9')
    }

    /// Reconstruct the digit run this cell is part of, or `None` if the cell
    /// is not a digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::grid::Grid;
    ///
    /// let grid = Grid::new(b"..123.")?;
    /// let run = grid.cell(0, 3).and_then(|c| c.digit_run()).unwrap();
    /// assert_eq!((run.start(), run.end(), run.value()), (2, 5, Some(123)));
    ///
    /// assert!(grid.cell(0, 0).and_then(|c| c.digit_run()).is_none());
    /// # Ok::<_, lib::grid::GridError>(())
    /// ```
    pub fn digit_run(&self) -> Option<DigitRun<'a>> {
        if !self.is_digit() {
            return None;
        }

        let mut start = *self;

        while let Some(c) = start.step_west(1).filter(Cell::is_digit) {
            start = c;
        }

        let mut end = *self;

        while let Some(c) = end.step_east(1).filter(Cell::is_digit) {
            end = c;
        }

        Some(DigitRun::new(
            self.grid,
            self.row,
            start.column,
            end.column + 1,
        ))
    }
}

impl PartialEq for Cell<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.grid, other.grid) && self.row == other.row && self.column == other.column
    }
}

impl Eq for Cell<'_> {}

impl fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("row", &self.row)
            .field("column", &self.column)
            .field("value", &char::from(self.value))
            .finish()
    }
}

/// A maximal horizontal run of ASCII digits on one row.
#[derive(Clone, Copy)]
pub struct DigitRun<'a> {
    grid: &'a Grid,
    row: usize,
    start: usize,
    end: usize,
    value: Option<u64>,
}

impl<'a> DigitRun<'a> {
    fn new(grid: &'a Grid, row: usize, start: usize, end: usize) -> Self {
        let digits = grid
            .row(row)
            .and_then(|data| data.get(start..end))
            .unwrap_or_default();

        let value = digits.iter().try_fold(0u64, |n, d| {
            n.checked_mul(10)?.checked_add(u64::from(d - b'0'))
        });

        Self {
            grid,
            row,
            start,
            end,
            value,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// First column of the run.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Column one past the last digit of the run.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The decimal value of the run, or `None` if it does not fit in a `u64`.
    #[inline]
    pub fn value(&self) -> Option<u64> {
        self.value
    }

    /// Iterate over every in-bounds cell touching the run, including
    /// diagonally, in row-major order. Cells of the run itself are excluded.
    pub fn adjacent(&self) -> impl Iterator<Item = Cell<'a>> + 'a {
        let Self {
            grid,
            row,
            start,
            end,
            ..
        } = *self;

        let rows = row.saturating_sub(1)..=row.saturating_add(1);
        let columns = start.saturating_sub(1)..=end;

        rows.flat_map(move |r| columns.clone().map(move |c| (r, c)))
            .filter(move |&(r, c)| r != row || !(start..end).contains(&c))
            .filter_map(move |(r, c)| grid.cell(r, c))
    }

    /// Test if any symbol touches the run.
    #[inline]
    pub fn is_part(&self) -> bool {
        self.adjacent().any(|c| c.is_symbol())
    }
}

impl PartialEq for DigitRun<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.grid, other.grid)
            && self.row == other.row
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for DigitRun<'_> {}

impl fmt::Debug for DigitRun<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitRun")
            .field("row", &self.row)
            .field("columns", &(self.start..self.end))
            .field("value", &self.value)
            .finish()
    }
}
