use lib::prelude::*;

lib::entry!(input = "d02.txt", solve);

/// Cubes in the bag, as red, green and blue.
const BAG: [u32; 3] = [12, 13, 14];

struct Game {
    id: u32,
    /// Most cubes of each color seen in a single draw.
    max: [u32; 3],
}

/// A number of cubes of one color, as an index into [BAG].
struct Pull {
    count: u32,
    color: usize,
}

lib::from_input! {
    |(count, W(color)): (u32, W<&str>)| -> Pull {
        let color = match color.trim_end_matches([',', ';']) {
            "red" => 0,
            "green" => 1,
            "blue" => 2,
            other => bail!("unknown color `{other}`"),
        };

        Ok(Pull { count, color })
    }
}

lib::from_input! {
    |(_, Sep(id), pulls): (W, Sep<b':', u32>, Vec<Pull>)| -> Game {
        let mut max = [0; 3];

        for Pull { count, color } in pulls {
            max[color] = max[color].max(count);
        }

        Ok(Game { id, max })
    }
}

fn solve(mut input: IStr) -> Result<(u32, u32)> {
    let mut part1 = 0;
    let mut part2 = 0;

    for game in input.iter::<Nl<Game>>() {
        let Nl(game) = game?;

        if game.max.iter().zip(BAG).all(|(&n, cap)| n <= cap) {
            part1 += game.id;
        }

        part2 += game.max.iter().product::<u32>();
    }

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use lib::prelude::*;

    const SAMPLE: &[u8] = b"Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn test_sample() {
        assert_eq!(super::solve(IStr::from_static(SAMPLE)).unwrap(), (8, 2286));
    }

    #[test]
    fn test_malformed() {
        assert!(super::solve(IStr::from_static(b"Game 1: 3 purple\n")).is_err());
        assert!(super::solve(IStr::from_static(b"Game 1 3 red\n")).is_err());
        assert!(super::solve(IStr::from_static(b"Game x: 3 red\n")).is_err());
        assert!(super::solve(IStr::from_static(b"Game 1: 3\n")).is_err());
    }

    #[test]
    fn test_game_without_draws() {
        let input = IStr::from_static(b"Game 1:\nGame 2: 20 red\n");
        assert_eq!(super::solve(input).unwrap(), (1, 0));
    }
}
