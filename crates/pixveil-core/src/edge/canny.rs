use super::sobel::{sobel, Direction, Gradient};
use super::EdgeMask;
use crate::media::Frame;

const STRONG_THRESHOLD: u8 = 128;
const WEAK_THRESHOLD: u8 = 64;

/// Canny edges: Sobel, non-maximum suppression, double threshold and hysteresis.
///
/// Only interior pixels are thinned and thresholded, border pixels keep their Sobel magnitude.
pub fn canny(frame: &Frame) -> EdgeMask {
    let gradient = sobel(frame);
    let thinned = suppress_non_maxima(&gradient);
    hysteresis(&thinned)
}

/// Zeroes interior pixels weaker than a neighbour along their gradient.
///
/// Runs in place row by row, so a pixel is compared against neighbours that may already
/// have been zeroed.
fn suppress_non_maxima(gradient: &Gradient) -> EdgeMask {
    let magnitudes = &gradient.magnitudes;
    let (width, height) = (magnitudes.width(), magnitudes.height());
    let mut values = magnitudes.values().to_vec();

    for row in 1..height.saturating_sub(1) {
        for column in 1..width.saturating_sub(1) {
            let index = row * width + column;
            let magnitude = values[index];
            if magnitude == 0 {
                continue;
            }
            let (first, second) = match gradient.direction(row, column) {
                Direction::Horizontal => (index - 1, index + 1),
                Direction::Diagonal45 => (index - width + 1, index + width - 1),
                Direction::Vertical => (index - width, index + width),
            };
            if magnitude < values[first] || magnitude < values[second] {
                values[index] = 0;
            }
        }
    }

    EdgeMask::new(width, height, values)
}

/// Keeps strong interior pixels and every weak one connected to them through other weak
/// pixels, the border is copied unchanged
fn hysteresis(thinned: &EdgeMask) -> EdgeMask {
    let (width, height) = (thinned.width(), thinned.height());
    let magnitudes = thinned.values();
    let mut values = magnitudes.to_vec();
    if width < 3 || height < 3 {
        return EdgeMask::new(width, height, values);
    }

    let mut pending = Vec::new();
    for row in 1..height - 1 {
        for column in 1..width - 1 {
            let index = row * width + column;
            if magnitudes[index] > STRONG_THRESHOLD {
                pending.push(index);
            } else {
                values[index] = 0;
            }
        }
    }

    while let Some(index) = pending.pop() {
        let (row, column) = (index / width, index % width);
        for neighbour_row in (row - 1).max(1)..=(row + 1).min(height - 2) {
            for neighbour_column in (column - 1).max(1)..=(column + 1).min(width - 2) {
                let neighbour = neighbour_row * width + neighbour_column;
                let magnitude = magnitudes[neighbour];
                if values[neighbour] == 0 && magnitude > WEAK_THRESHOLD {
                    values[neighbour] = magnitude;
                    pending.push(neighbour);
                }
            }
        }
    }

    EdgeMask::new(width, height, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::tests::{anti_diagonal_frame, step_frame};

    fn mask(width: usize, height: usize, values: &[u8]) -> EdgeMask {
        EdgeMask::new(width, height, values.to_vec())
    }

    fn border(mask: &EdgeMask) -> Vec<u8> {
        let (width, height) = (mask.width(), mask.height());
        (0..height)
            .flat_map(|row| (0..width).map(move |column| (row, column)))
            .filter(|(row, column)| {
                *row == 0 || *column == 0 || *row == height - 1 || *column == width - 1
            })
            .map(|(row, column)| mask.get(row, column))
            .collect()
    }

    #[test]
    fn should_keep_a_thin_line_along_a_step() {
        let frame = step_frame(16, 8);

        let edges = canny(&frame);

        assert!(edges.count_edges() > 0);
        for row in 1..7 {
            assert!(edges.is_edge(row, 7) || edges.is_edge(row, 8));
            assert!(!edges.is_edge(row, 2));
            assert!(!edges.is_edge(row, 13));
        }
    }

    #[test]
    fn should_keep_sobel_magnitudes_on_the_border() {
        let frame = anti_diagonal_frame(16);

        let edges = canny(&frame);
        let magnitudes = sobel(&frame).magnitudes;

        assert_eq!(border(&edges), border(&magnitudes));
        let right_column = (0..16).filter(|row| edges.is_edge(*row, 15)).count();
        assert_eq!(right_column, 5);
    }

    #[test]
    fn should_promote_weak_chains_attached_to_strong_pixels() {
        #[rustfmt::skip]
        let thinned = mask(7, 3, &[
            0, 0,   0,   0,  0, 0,  0,
            0, 200, 100, 90, 0, 80, 0,
            0, 0,   0,   0,  0, 0,  0,
        ]);

        let kept = hysteresis(&thinned);

        assert_eq!(kept.values()[7..14], [0, 200, 100, 90, 0, 0, 0]);
    }

    #[test]
    fn should_drop_values_at_or_below_the_weak_threshold() {
        #[rustfmt::skip]
        let thinned = mask(5, 3, &[
            0, 0,   0,  0,  0,
            0, 129, 64, 65, 0,
            0, 0,   0,  0,  0,
        ]);

        let kept = hysteresis(&thinned);

        assert_eq!(kept.values()[5..10], [0, 129, 0, 0, 0]);
    }

    #[test]
    fn should_suppress_non_maxima_across_the_gradient() {
        let gradient = Gradient {
            magnitudes: mask(5, 3, &[0, 0, 0, 0, 0, 50, 90, 120, 90, 0, 0, 0, 0, 0, 0]),
            directions: vec![Direction::Horizontal; 15],
        };

        let thin = suppress_non_maxima(&gradient);

        assert_eq!(thin.values()[5..10], [50, 0, 120, 0, 0]);
    }

    #[test]
    fn should_compare_against_already_suppressed_neighbours() {
        use Direction::{Horizontal, Vertical};
        #[rustfmt::skip]
        let gradient = Gradient {
            magnitudes: mask(4, 3, &[
                0, 200, 0,   0,
                0, 150, 120, 0,
                0, 0,   0,   0,
            ]),
            directions: vec![
                Horizontal, Horizontal, Horizontal, Horizontal,
                Horizontal, Vertical,   Horizontal, Horizontal,
                Horizontal, Horizontal, Horizontal, Horizontal,
            ],
        };

        let thin = suppress_non_maxima(&gradient);

        assert_eq!(thin.values()[4..8], [0, 0, 120, 0]);
    }

    #[test]
    fn should_pass_tiny_frames_through() {
        let frame = Frame::from_fn(2, 2, |x, _| [(x * 255) as u8; 3]);

        assert_eq!(canny(&frame), sobel(&frame).magnitudes);
    }
}
