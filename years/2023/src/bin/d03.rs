use lib::prelude::*;

lib::entry!(input = "d03.txt", solve);

fn solve(mut input: IStr) -> Result<(u64, u64)> {
    let grid = input.next::<Grid>()?;

    let mut part1 = 0u64;

    for run in grid.digit_runs().filter(DigitRun::is_part) {
        part1 = part1.checked_add(value(&run)?).context("sum overflow")?;
    }

    let mut part2 = 0u64;
    let mut gears = 0;

    for cell in grid.find_all(|b| b == b'*') {
        let mut runs = ArrayVec::<DigitRun<'_>, 8>::new();

        for run in cell
            .neighbors(Neighborhood::Eight)
            .filter_map(|c| c.digit_run())
        {
            if !runs.contains(&run) {
                runs.push(run);
            }
        }

        if let [a, b] = &runs[..] {
            let ratio = value(a)?
                .checked_mul(value(b)?)
                .context("gear ratio overflow")?;

            part2 = part2.checked_add(ratio).context("sum overflow")?;
            gears += 1;
        }
    }

    debug!("{gears} gears");
    Ok((part1, part2))
}

fn value(run: &DigitRun<'_>) -> Result<u64> {
    run.value().with_context(|| {
        format!(
            "number at {}:{} does not fit in 64 bits",
            run.row() + 1,
            run.start()
        )
    })
}

#[cfg(test)]
mod tests {
    use lib::prelude::*;

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
    fn test_sample() {
        let answer = super::solve(IStr::from_static(SAMPLE)).unwrap();
        assert_eq!(answer, (4361, 467835));
    }

    #[test]
    fn test_symbol_adjacency() {
        let input = IStr::from_static(b"467..114..\n...*......\n..35..633.\n......#...\n");
        let (part1, part2) = super::solve(input).unwrap();
        assert_eq!(part1, 1135);
        assert_eq!(part2, 467 * 35);
    }

    #[test]
    fn test_single_run_is_not_a_gear() {
        let input = IStr::from_static(b"12*\n...\n");
        assert_eq!(super::solve(input).unwrap(), (12, 0));

        // The same number touching a gear twice only counts once.
        let input = IStr::from_static(b"123\n.*.\n");
        assert_eq!(super::solve(input).unwrap(), (123, 0));
    }

    #[test]
    fn test_number_overflow() {
        let input = IStr::from_static(b"1234567890123456789012345*\n");
        let error = super::solve(input).unwrap_err();
        assert_eq!(error.to_string(), "number at 1:0 does not fit in 64 bits");
    }

    #[test]
    fn test_ragged() {
        assert!(super::solve(IStr::from_static(b"1.*\n..\n")).is_err());
    }
}
