use super::{Grid, GridError, Neighborhood};

const SMALL: &[u8] = b"467..114..
...*......
..35..633.
......#...
";

const SAMPLE: &[u8] = b"467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

#[test]
fn test_cell_matches_input() {
    let grid = Grid::new(SAMPLE).unwrap();
    let lines = SAMPLE.split(|&b| b == b'\n').filter(|l| !l.is_empty());

    for (row, line) in lines.enumerate() {
        for (column, &expected) in line.iter().enumerate() {
            let cell = grid.cell(row, column).unwrap();
            assert_eq!(cell.value(), expected);
            assert_eq!((cell.row(), cell.column()), (row, column));
        }
    }

    assert_eq!(grid.rows_len(), 10);
    assert_eq!(grid.columns_len(), 10);
}

#[test]
fn test_cell_out_of_bounds() {
    let grid = Grid::new(SMALL).unwrap();

    assert!(grid.cell(4, 0).is_none());
    assert!(grid.cell(0, 10).is_none());
    assert!(grid.cell(usize::MAX, usize::MAX).is_none());
    assert!(grid.try_get(3, 10).is_none());
}

#[test]
fn test_find_all_row_major() {
    let grid = Grid::new(SMALL).unwrap();

    let all = grid.find_all(|_| true).collect::<Vec<_>>();
    assert_eq!(all.len(), 40);

    for (n, cell) in all.iter().enumerate() {
        assert_eq!((cell.row(), cell.column()), (n / 10, n % 10));
    }

    let symbols = grid
        .find_all(|b| !matches!(b, b'.' | b'0'..=b'9'))
        .map(|c| (c.row(), c.column(), c.value()))
        .collect::<Vec<_>>();

    assert_eq!(symbols, [(1, 3, b'*'), (3, 6, b'#')]);
}

#[test]
fn test_neighbor_counts() {
    let grid = Grid::new(b"abc\ndef\nghi").unwrap();

    let count = |row, column, n| grid.cell(row, column).unwrap().neighbors(n).count();

    assert_eq!(count(1, 1, Neighborhood::Four), 4);
    assert_eq!(count(0, 0, Neighborhood::Four), 2);
    assert_eq!(count(2, 2, Neighborhood::Four), 2);
    assert_eq!(count(0, 1, Neighborhood::Four), 3);
    assert_eq!(count(1, 0, Neighborhood::Four), 3);

    assert_eq!(count(1, 1, Neighborhood::Eight), 8);
    assert_eq!(count(0, 0, Neighborhood::Eight), 3);
    assert_eq!(count(0, 1, Neighborhood::Eight), 5);
}

#[test]
fn test_neighbor_order() {
    let grid = Grid::new(b"abc\ndef\nghi").unwrap();
    let center = grid.cell(1, 1).unwrap();

    let values = center
        .neighbors(Neighborhood::Eight)
        .map(|c| c.value())
        .collect::<Vec<_>>();

    assert_eq!(values, b"bhfdacgi");
}

#[test]
fn test_step_east_west() {
    let grid = Grid::new(b"abcd").unwrap();
    let b = grid.cell(0, 1).unwrap();

    assert_eq!(b.step_east(2).map(|c| c.value()), Some(b'd'));
    assert_eq!(b.step_west(1).map(|c| c.value()), Some(b'a'));
    assert_eq!(b.step_east(0), Some(b));
    assert!(b.step_east(3).is_none());
    assert!(b.step_west(2).is_none());
}

#[test]
fn test_symbol_adjacency_scan() {
    let grid = Grid::new(SMALL).unwrap();

    let parts = grid
        .digit_runs()
        .filter(|r| r.is_part())
        .filter_map(|r| r.value())
        .collect::<Vec<_>>();

    assert_eq!(parts, [467, 35, 633]);
    assert_eq!(parts.iter().sum::<u64>(), 1135);
}

#[test]
fn test_digit_run_from_any_cell() {
    let grid = Grid::new(SMALL).unwrap();

    for column in 5..8 {
        let run = grid.cell(0, column).and_then(|c| c.digit_run()).unwrap();
        assert_eq!((run.row(), run.start(), run.end()), (0, 5, 8));
        assert_eq!(run.value(), Some(114));
    }

    assert!(grid.cell(0, 3).and_then(|c| c.digit_run()).is_none());
}

#[test]
fn test_adjacent_excludes_run() {
    let grid = Grid::new(b"...\n.1.\n...").unwrap();
    let run = grid.digit_runs().next().unwrap();

    let adjacent = run.adjacent().map(|c| (c.row(), c.column())).collect::<Vec<_>>();

    assert_eq!(
        adjacent,
        [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
    );

    let edge = Grid::new(b"12\n..").unwrap();
    let run = edge.digit_runs().next().unwrap();
    assert_eq!(run.adjacent().count(), 2);
}

#[test]
fn test_digit_run_overflow() {
    let grid = Grid::new(b"1234567890123456789012345*").unwrap();
    let run = grid.digit_runs().next().unwrap();
    assert_eq!((run.start(), run.end()), (0, 25));
    assert_eq!(run.value(), None);

    let grid = Grid::new(b"18446744073709551615.").unwrap();
    let run = grid.digit_runs().next().unwrap();
    assert_eq!(run.value(), Some(u64::MAX));
}

#[test]
fn test_crlf() {
    let lf = Grid::new(b"ab\ncd\n").unwrap();
    let crlf = Grid::new(b"ab\r\ncd\r\n").unwrap();
    assert_eq!(lf, crlf);
}

#[test]
fn test_trailing_blank_lines() {
    let grid = Grid::new(b"467..\n...*.\n\n").unwrap();
    assert_eq!((grid.rows_len(), grid.columns_len()), (2, 5));

    let crlf = Grid::new(b"467..\r\n...*.\r\n\r\n").unwrap();
    assert_eq!(grid, crlf);

    assert_eq!(
        Grid::new(b"ab\n\ncd\n"),
        Err(GridError::Ragged {
            row: 1,
            expected: 2,
            actual: 0
        })
    );
}

#[test]
fn test_malformed() {
    assert_eq!(Grid::new(b""), Err(GridError::Empty));
    assert_eq!(Grid::new(b"\n"), Err(GridError::Empty));

    assert_eq!(
        Grid::new(b"abc\nab\nabc"),
        Err(GridError::Ragged {
            row: 1,
            expected: 3,
            actual: 2
        })
    );
}
