//! Embedding into a single pixel pair.
//!
//! The first sample's lowest bit carries a parity flag: it is odd exactly when the most
//! significant value bit had to be dropped to keep both samples within `0..=255`.
//! Toggling that bit back restores the difference the value was encoded in.

use super::capacity::{lower_bound, range_capacity};

/// Splits the change towards `target` over both samples, the larger share on the sample
/// moving away from the other one when growing the difference
fn steer((first, second): (u8, u8), target: i32) -> (i32, i32) {
    let (first, second) = (i32::from(first), i32::from(second));
    let difference = (first - second).abs();
    let change = (target - difference).abs();
    let (ceil, floor) = ((change + 1) / 2, change / 2);

    match (target > difference, first >= second) {
        (true, true) => (first + ceil, second - floor),
        (true, false) => (first - floor, second + ceil),
        (false, true) => (first - ceil, second + floor),
        (false, false) => (first + ceil, second - floor),
    }
}

fn in_range((first, second): (i32, i32)) -> bool {
    (0..=255).contains(&first) && (0..=255).contains(&second)
}

fn sample(value: i32) -> u8 {
    debug_assert!((0..=255).contains(&value), "sample {value} out of range");
    value.clamp(0, 255) as u8
}

/// Moves only one sample of `original` by `change`, picking the one `proposed` did not push
/// out of range
pub fn clamp_pair(original: (u8, u8), proposed: (i32, i32), change: i32) -> (u8, u8) {
    let (first, second) = (i32::from(original.0), i32::from(original.1));
    let (new_first, new_second) = proposed;

    let (first, second) = if second >= first && new_second > 255 {
        (first - change, second)
    } else if second < first && new_first > 255 {
        (first, second - change)
    } else if second >= first && new_first < 0 {
        (first, second + change)
    } else if second < first && new_second < 0 {
        (first + change, second)
    } else {
        (first, second)
    };
    (sample(first), sample(second))
}

/// Flips the lowest bit of one sample so the first sample's parity tells whether a bit was
/// discarded, without changing the difference seen after the parity is undone
pub fn apply_parity((first, second): (u8, u8), discarded: bool) -> (u8, u8) {
    let first_even = first % 2 == 0;
    let second_even = second % 2 == 0;

    if discarded {
        match (first_even, second_even) {
            (true, _) => (first + 1, second),
            (false, true) if second > 0 => (first, second - 1),
            (false, true) => (first.saturating_add(2), second + 1),
            (false, false) => (first, second - 1),
        }
    } else {
        match (first_even, second_even) {
            (true, true) => (first, second + 1),
            (true, false) if second < 255 => (first, second + 1),
            (true, false) if first > 0 => (first - 2, second - 1),
            (true, false) => (first + 1, second),
            (false, _) => (first - 1, second),
        }
    }
}

/// A pair that carries no bits still gets its parity adjusted, so the decoder recomputes
/// the same capacity from it
pub fn embed_overhead(pair: (u8, u8)) -> (u8, u8) {
    apply_parity(pair, false)
}

/// Encodes the `capacity` bit `value` into the difference of `pair`
pub fn embed_value(pair: (u8, u8), value: u8, capacity: u8) -> (u8, u8) {
    let lower = i32::from(lower_bound(capacity));
    let difference = (i32::from(pair.0) - i32::from(pair.1)).abs();

    let mut target = i32::from(value) + lower;
    let mut proposed = steer(pair, target);
    let mut discarded = false;

    if !in_range(proposed) {
        let msb = 1u8 << (capacity - 1);
        if value & msb != 0 {
            discarded = true;
            target = i32::from(value & !msb) + lower;
            proposed = steer(pair, target);
        }
    }

    let adjusted = if in_range(proposed) {
        (sample(proposed.0), sample(proposed.1))
    } else {
        clamp_pair(pair, proposed, (target - difference).abs())
    };
    apply_parity(adjusted, discarded)
}

/// Difference of a received pair with the parity bit undone
pub fn recovered_difference((first, second): (u8, u8)) -> u8 {
    (first ^ 1).abs_diff(second)
}

/// Decodes the value of a pair that carries `capacity` bits
pub fn extract_value(pair: (u8, u8), capacity: u8) -> u8 {
    let value = recovered_difference(pair) - lower_bound(capacity);
    if pair.0 % 2 == 1 {
        value | 1 << (capacity - 1)
    } else {
        value
    }
}

/// Capacity a received pair was encoded with, before any channel ceiling
pub fn recovered_capacity(pair: (u8, u8)) -> u8 {
    range_capacity(recovered_difference(pair))
}
