use lib::prelude::*;

lib::entry!(input = "d04.txt", solve);

struct Card {
    /// Number of held numbers which are winning. Held duplicates count once
    /// each.
    matches: usize,
}

lib::from_input! {
    |(_, _, Sep(winning), held): (W, Sep<b':', u32>, Sep<b'|', Vec<u32>>, Vec<u32>)| -> Card {
        let mut set = 0u128;

        for n in winning {
            ensure!(n < u128::BITS, "winning number {n} out of range");
            set.set_bit(n);
        }

        let matches = held
            .into_iter()
            .filter(|&n| n < u128::BITS && set.test_bit(n))
            .count();

        Ok(Card { matches })
    }
}

fn solve(mut input: IStr) -> Result<(u32, u32)> {
    let mut part1 = 0u32;
    let mut matches = Vec::new();

    for card in input.iter::<Nl<Card>>() {
        let Nl(card) = card?;

        if let Some(n) = card.matches.checked_sub(1) {
            let n = u32::try_from(n)?;
            part1 += 1u32.checked_shl(n).context("score overflow")?;
        }

        matches.push(card.matches);
    }

    let mut copies = vec![1u32; matches.len()];

    for (n, &m) in matches.iter().enumerate() {
        let count = copies[n];

        for c in copies.iter_mut().skip(n + 1).take(m) {
            *c += count;
        }
    }

    Ok((part1, copies.iter().sum()))
}
