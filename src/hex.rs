use serde::{Deserialize, Serialize};

use crate::types::HexDir;

/// Axial position on the hex torus. Coordinates are kept in `0..n` for a
/// board of size `n`; all stepping arithmetic wraps modulo `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexPos {
    pub r: u8,
    pub q: u8,
}

impl HexPos {
    #[inline]
    pub const fn new(r: u8, q: u8) -> Self {
        Self { r, q }
    }

    /// Step `steps` cells along `dir`, wrapping toroidally on a board of
    /// size `n`.
    #[inline]
    pub fn shift(self, dir: HexDir, steps: u8, n: u8) -> HexPos {
        let (dr, dq) = dir.vector();
        let n = i16::from(n);
        let r = (i16::from(self.r) + i16::from(dr) * i16::from(steps)).rem_euclid(n);
        let q = (i16::from(self.q) + i16::from(dq) * i16::from(steps)).rem_euclid(n);
        HexPos {
            r: r as u8,
            q: q as u8,
        }
    }
}

impl std::fmt::Display for HexPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.q)
    }
}

/// Length of an axial delta under the hex metric.
#[inline]
fn hex_len(dr: i16, dq: i16) -> u32 {
    ((dr.abs() + dq.abs() + (dr + dq).abs()) / 2) as u32
}

/// Hex distance between two positions on a torus of size `n`: the minimum
/// hex-metric length over all wrap-equivalent representatives of the delta.
/// Used only by the evaluation function, never by legality checks.
pub fn toroidal_distance(a: HexPos, b: HexPos, n: u8) -> u32 {
    let n = i16::from(n);
    let dr0 = i16::from(b.r) - i16::from(a.r);
    let dq0 = i16::from(b.q) - i16::from(a.q);
    let mut best = u32::MAX;
    for dr in [dr0, dr0 - n, dr0 + n] {
        for dq in [dq0, dq0 - n, dq0 + n] {
            best = best.min(hex_len(dr, dq));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_wraps_at_edges() {
        let n = 7;
        assert_eq!(HexPos::new(6, 3).shift(HexDir::Up, 1, n), HexPos::new(0, 3));
        assert_eq!(
            HexPos::new(0, 0).shift(HexDir::DownLeft, 2, n),
            HexPos::new(0, 5)
        );
        assert_eq!(
            HexPos::new(3, 3).shift(HexDir::UpLeft, 4, n),
            HexPos::new(0, 6)
        );
    }

    #[test]
    fn shift_by_zero_is_identity() {
        let p = HexPos::new(2, 5);
        for dir in HexDir::all() {
            assert_eq!(p.shift(dir, 0, 7), p);
        }
    }

    #[test]
    fn distance_is_symmetric_and_wrap_aware() {
        let n = 7;
        let a = HexPos::new(0, 0);
        let b = HexPos::new(6, 0);
        // One step Down from (0,0) wraps to (6,0).
        assert_eq!(toroidal_distance(a, b, n), 1);
        assert_eq!(toroidal_distance(b, a, n), 1);
        assert_eq!(toroidal_distance(a, a, n), 0);
        // Adjacent along the diagonal axis.
        assert_eq!(toroidal_distance(a, HexPos::new(1, 6), n), 1);
    }

    #[test]
    fn distance_matches_plain_metric_away_from_edges() {
        let a = HexPos::new(3, 3);
        assert_eq!(toroidal_distance(a, HexPos::new(3, 5), 7), 2);
        assert_eq!(toroidal_distance(a, HexPos::new(5, 3), 7), 2);
        // (1, -1) direction components cancel under the hex metric.
        assert_eq!(toroidal_distance(a, HexPos::new(4, 2), 7), 1);
    }
}
