//! Human-friendly ordering of file names
//!
//! Names are split into digit and non-digit runs. Digit runs compare by
//! numeric value, so "frame2" sorts before "frame10".

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CHUNK: Regex = Regex::new(r"[0-9]+|[^0-9]+").expect("chunk pattern is valid");
}

/// Compare two names in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = CHUNK.find_iter(a).map(|m| m.as_str());
    let mut right = CHUNK.find_iter(b).map(|m| m.as_str());

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = compare_chunks(x, y);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            },
        }
    }
}

fn compare_chunks(x: &str, y: &str) -> Ordering {
    let x_digits = x.starts_with(|c: char| c.is_ascii_digit());
    let y_digits = y.starts_with(|c: char| c.is_ascii_digit());

    match (x_digits, y_digits) {
        (true, true) => compare_numeric(x, y),
        // Digits sort before text
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.to_lowercase().cmp(&y.to_lowercase()),
    }
}

// Compares arbitrarily long digit runs without parsing them.
fn compare_numeric(x: &str, y: &str) -> Ordering {
    let x_trimmed = x.trim_start_matches('0');
    let y_trimmed = y.trim_start_matches('0');

    x_trimmed
        .len()
        .cmp(&y_trimmed.len())
        .then_with(|| x_trimmed.cmp(y_trimmed))
        .then_with(|| x.len().cmp(&y.len()))
}
