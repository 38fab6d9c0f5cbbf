use std::time::Duration;

/// One Morse element. A dot lasts one unit, a dash three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseSymbol {
    Dot,
    Dash,
}

impl MorseSymbol {
    pub fn units(self) -> u32 {
        match self {
            MorseSymbol::Dot => 1,
            MorseSymbol::Dash => 3,
        }
    }
}

// One unit of silence after every symbol, two more after the last symbol of a
// letter. The trailing inter-letter gap is kept even for the final letter of
// the message, matching the deployed keying schedule.
const INTRA_LETTER_GAP_UNITS: u32 = 1;
const INTER_LETTER_GAP_UNITS: u32 = 2;

/// ITU encoding for a single character, case-insensitive. Characters outside
/// A-Z and 0-9 have no encoding and contribute nothing to the timing budget;
/// skipping them is deliberate, not an error.
pub fn encode(c: char) -> Option<&'static [MorseSymbol]> {
    use MorseSymbol::{Dash, Dot};

    let pattern: &'static [MorseSymbol] = match c.to_ascii_uppercase() {
        'A' => &[Dot, Dash],
        'B' => &[Dash, Dot, Dot, Dot],
        'C' => &[Dash, Dot, Dash, Dot],
        'D' => &[Dash, Dot, Dot],
        'E' => &[Dot],
        'F' => &[Dot, Dot, Dash, Dot],
        'G' => &[Dash, Dash, Dot],
        'H' => &[Dot, Dot, Dot, Dot],
        'I' => &[Dot, Dot],
        'J' => &[Dot, Dash, Dash, Dash],
        'K' => &[Dash, Dot, Dash],
        'L' => &[Dot, Dash, Dot, Dot],
        'M' => &[Dash, Dash],
        'N' => &[Dash, Dot],
        'O' => &[Dash, Dash, Dash],
        'P' => &[Dot, Dash, Dash, Dot],
        'Q' => &[Dash, Dash, Dot, Dash],
        'R' => &[Dot, Dash, Dot],
        'S' => &[Dot, Dot, Dot],
        'T' => &[Dash],
        'U' => &[Dot, Dot, Dash],
        'V' => &[Dot, Dot, Dot, Dash],
        'W' => &[Dot, Dash, Dash],
        'X' => &[Dash, Dot, Dot, Dash],
        'Y' => &[Dash, Dot, Dash, Dash],
        'Z' => &[Dash, Dash, Dot, Dot],
        '0' => &[Dash, Dash, Dash, Dash, Dash],
        '1' => &[Dot, Dash, Dash, Dash, Dash],
        '2' => &[Dot, Dot, Dash, Dash, Dash],
        '3' => &[Dot, Dot, Dot, Dash, Dash],
        '4' => &[Dot, Dot, Dot, Dot, Dash],
        '5' => &[Dot, Dot, Dot, Dot, Dot],
        '6' => &[Dash, Dot, Dot, Dot, Dot],
        '7' => &[Dash, Dash, Dot, Dot, Dot],
        '8' => &[Dash, Dash, Dash, Dot, Dot],
        '9' => &[Dash, Dash, Dash, Dash, Dot],
        _ => return None,
    };
    Some(pattern)
}

/// Time it would take to key `message` by hand, given one Morse unit.
/// Pure and deterministic; the empty message costs nothing.
pub fn compute_delay(message: &str, unit: Duration) -> Duration {
    let mut total_units: u32 = 0;
    for c in message.chars() {
        if let Some(symbols) = encode(c) {
            for symbol in symbols {
                total_units += symbol.units() + INTRA_LETTER_GAP_UNITS;
            }
            total_units += INTER_LETTER_GAP_UNITS;
        }
    }
    unit * total_units
}
