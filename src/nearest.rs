//! Nearest-candidate lookups used to put cursors back where a color lives.

use crate::error::{PickerError, Result};

/// Position of the palette entry whose color is closest to `target`.
///
/// Distance is Euclidean over integer RGB, alpha excluded. The first
/// minimal entry in iteration order wins.
pub fn nearest_color<P, I>(target: [u8; 3], palette: I) -> Result<P>
where
    I: IntoIterator<Item = (P, [u8; 3])>,
{
    let mut best: Option<(u32, P)> = None;
    for (position, rgb) in palette {
        let d = distance_sq(target, rgb);
        if best.as_ref().map_or(true, |(min, _)| d < *min) {
            best = Some((d, position));
        }
    }
    best.map(|(_, p)| p).ok_or(PickerError::NoCandidates)
}

/// Index of the position closest to `value`, first minimum wins.
pub fn closest_position(value: f64, positions: &[f64]) -> Result<usize> {
    let mut best: Option<(f64, usize)> = None;
    for (i, p) in positions.iter().enumerate() {
        let d = (value - p).abs();
        if best.map_or(true, |(min, _)| d < min) {
            best = Some((d, i));
        }
    }
    best.map(|(_, i)| i).ok_or(PickerError::NoCandidates)
}

// Squared distance keeps ordering and stays integral.
fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_closest_color() {
        let palette = vec![(0, [255, 0, 0]), (10, [0, 255, 0]), (20, [0, 0, 255])];
        assert_eq!(nearest_color([10, 240, 5], palette).unwrap(), 10);
    }

    #[test]
    fn ties_go_to_the_earlier_entry() {
        let palette = vec![(3, [100, 0, 0]), (7, [0, 100, 0]), (9, [100, 0, 0])];
        assert_eq!(nearest_color([50, 50, 0], palette.clone()).unwrap(), 3);
        assert_eq!(nearest_color([100, 0, 0], palette).unwrap(), 3);
    }

    #[test]
    fn empty_inputs_have_no_candidates() {
        let empty: Vec<(usize, [u8; 3])> = Vec::new();
        assert!(matches!(nearest_color([0, 0, 0], empty), Err(PickerError::NoCandidates)));
        assert!(matches!(closest_position(4.0, &[]), Err(PickerError::NoCandidates)));
    }

    #[test]
    fn closest_position_uses_absolute_difference() {
        let positions = [0.0, 18.0, 36.0, 54.0];
        assert_eq!(closest_position(25.0, &positions).unwrap(), 1);
        assert_eq!(closest_position(27.0, &positions).unwrap(), 1);
        assert_eq!(closest_position(28.0, &positions).unwrap(), 2);
        assert_eq!(closest_position(-40.0, &positions).unwrap(), 0);
        assert_eq!(closest_position(999.0, &positions).unwrap(), 3);
    }
}
