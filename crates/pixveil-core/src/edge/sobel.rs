use super::EdgeMask;
use crate::media::{Frame, CHANNELS};

/// Only the upper six bits of a sample are looked at
const STABLE_BITS: u8 = 0b1111_1100;
const BINOMIAL: [u32; 5] = [1, 4, 6, 4, 1];
/// Sum of the 5x5 binomial kernel
const BINOMIAL_NORM: u32 = 256;
const MIN_MAGNITUDE: f64 = 20.0;

/// Gradient direction rounded to the nearest multiple of 45 degrees.
///
/// Directions come from the absolute gradient components, so they never exceed 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Diagonal45,
    Vertical,
}

impl Direction {
    /// `degrees` in `[0, 90]`
    pub fn from_degrees(degrees: f64) -> Self {
        if degrees < 22.5 {
            Self::Horizontal
        } else if degrees < 67.5 {
            Self::Diagonal45
        } else {
            Self::Vertical
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gradient {
    pub magnitudes: EdgeMask,
    /// One per pixel, row-major
    pub directions: Vec<Direction>,
}

impl Gradient {
    pub fn direction(&self, row: usize, column: usize) -> Direction {
        self.directions[row * self.magnitudes.width() + column]
    }
}

/// `fedcba|abcdef|fedcba` border handling
pub(crate) fn reflect(index: isize, len: usize) -> usize {
    let len = len as isize;
    let mut index = index;
    loop {
        if index < 0 {
            index = -index - 1;
        } else if index >= len {
            index = 2 * len - index - 1;
        } else {
            return index as usize;
        }
    }
}

/// Smooths every channel with the 5x5 binomial kernel, integer arithmetic and rounding
fn smooth(frame: &Frame) -> Vec<u8> {
    let (width, height) = (frame.width(), frame.height());
    let samples = frame.samples();
    let at = |x: usize, y: usize, c: usize| {
        u32::from(samples[(y * width + x) * CHANNELS + c] & STABLE_BITS)
    };

    let mut horizontal = vec![0u32; samples.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..CHANNELS {
                horizontal[(y * width + x) * CHANNELS + c] = BINOMIAL
                    .iter()
                    .enumerate()
                    .map(|(k, weight)| {
                        weight * at(reflect(x as isize + k as isize - 2, width), y, c)
                    })
                    .sum();
            }
        }
    }

    let mut smoothed = vec![0u8; samples.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..CHANNELS {
                let sum: u32 = BINOMIAL
                    .iter()
                    .enumerate()
                    .map(|(k, weight)| {
                        let row = reflect(y as isize + k as isize - 2, height);
                        weight * horizontal[(row * width + x) * CHANNELS + c]
                    })
                    .sum();
                smoothed[(y * width + x) * CHANNELS + c] =
                    ((sum + BINOMIAL_NORM / 2) / BINOMIAL_NORM).min(255) as u8;
            }
        }
    }
    smoothed
}

/// Sobel gradient of a frame.
///
/// Per pixel the channel with the strongest response wins. Both components are capped
/// at 255 before the magnitude is taken and magnitudes below 20 are dropped.
pub fn sobel(frame: &Frame) -> Gradient {
    let (width, height) = (frame.width(), frame.height());
    let smoothed = smooth(frame);
    let at = |x: isize, y: isize, c: usize| {
        let index = (reflect(y, height) * width + reflect(x, width)) * CHANNELS + c;
        i32::from(smoothed[index])
    };

    let mut magnitudes = Vec::with_capacity(width * height);
    let mut directions = Vec::with_capacity(width * height);
    for y in 0..height as isize {
        for x in 0..width as isize {
            let mut strongest = (0.0f64, 0.0f64, 0.0f64);
            for c in 0..CHANNELS {
                let gx = (at(x - 1, y - 1, c) + 2 * at(x - 1, y, c) + at(x - 1, y + 1, c))
                    - (at(x + 1, y - 1, c) + 2 * at(x + 1, y, c) + at(x + 1, y + 1, c));
                let gy = (at(x - 1, y + 1, c) + 2 * at(x, y + 1, c) + at(x + 1, y + 1, c))
                    - (at(x - 1, y - 1, c) + 2 * at(x, y - 1, c) + at(x + 1, y - 1, c));
                let ax = f64::from(gx.abs().min(255));
                let ay = f64::from(gy.abs().min(255));
                let magnitude = (ax * ax + ay * ay).sqrt();
                if magnitude > strongest.0 {
                    strongest = (magnitude, ax, ay);
                }
            }

            let (magnitude, ax, ay) = strongest;
            directions.push(Direction::from_degrees(ay.atan2(ax).to_degrees()));
            magnitudes.push(if magnitude < MIN_MAGNITUDE {
                0
            } else {
                magnitude.round().min(255.0) as u8
            });
        }
    }

    Gradient {
        magnitudes: EdgeMask::new(width, height, magnitudes),
        directions,
    }
}
