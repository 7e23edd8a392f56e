//! Canonical vortex and axis cycles, and the per-digit flow built from them.

use serde::{Deserialize, Serialize};

use crate::constants::{AXIS_CYCLE, VORTEX_CYCLE};
use crate::digit::Digit;

/// Which canonical cycle a digit belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceFamily {
    /// Digit 0, outside both cycles.
    Origin,
    /// Members of `[1, 2, 4, 8, 7, 5]`.
    Vortex,
    /// Members of `[3, 6, 9]`.
    Axis,
}

impl SequenceFamily {
    pub fn of(d: Digit) -> Self {
        let v = d.value();
        if v == 0 {
            SequenceFamily::Origin
        } else if AXIS_CYCLE.contains(&v) {
            SequenceFamily::Axis
        } else {
            SequenceFamily::Vortex
        }
    }
}

/// Rotate `cycle` so it starts right after `value`. `value` must be a member.
fn rotate_after(cycle: &[u8], value: u8) -> impl Iterator<Item = u8> + '_ {
    let start = cycle.iter().position(|&c| c == value).map_or(0, |p| p + 1);
    cycle.iter().cycle().skip(start).take(cycle.len()).copied()
}

/// Flow sequence for a digit.
///
/// - Vortex digits: the full six-step circuit starting after `d` and
///   returning to `d` (`1 → [2, 4, 8, 7, 5, 1]`).
/// - Axis digits: the other axis members in cycle order starting after `d`
///   (`3 → [6, 9]`).
/// - `0`: `[1..=9]` in natural order.
pub fn vortex_flow(d: Digit) -> Vec<Digit> {
    let v = d.value();
    let raw: Vec<u8> = match SequenceFamily::of(d) {
        SequenceFamily::Origin => (1..=9).collect(),
        SequenceFamily::Vortex => rotate_after(&VORTEX_CYCLE, v).collect(),
        SequenceFamily::Axis => rotate_after(&AXIS_CYCLE, v).filter(|&x| x != v).collect(),
    };
    raw.into_iter().map(Digit::from_reduced).collect()
}

/// Flow for an ordered pair: `flow(a)`, extended with `flow(b)` when the
/// two digits sit in different families.
pub fn pair_flow(a: Digit, b: Digit) -> Vec<Digit> {
    let mut flow = vortex_flow(a);
    if SequenceFamily::of(a) != SequenceFamily::of(b) {
        flow.extend(vortex_flow(b));
    }
    flow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    fn values(flow: &[Digit]) -> Vec<u8> {
        flow.iter().map(|d| d.value()).collect()
    }

    #[test]
    fn test_families() {
        assert_eq!(SequenceFamily::of(d(0)), SequenceFamily::Origin);
        for v in VORTEX_CYCLE {
            assert_eq!(SequenceFamily::of(d(v)), SequenceFamily::Vortex);
        }
        for v in AXIS_CYCLE {
            assert_eq!(SequenceFamily::of(d(v)), SequenceFamily::Axis);
        }
    }

    #[test]
    fn test_flow_of_one_wraps_back() {
        assert_eq!(values(&vortex_flow(d(1))), vec![2, 4, 8, 7, 5, 1]);
    }

    #[test]
    fn test_flow_of_five_wraps_to_start() {
        assert_eq!(values(&vortex_flow(d(5))), vec![1, 2, 4, 8, 7, 5]);
    }

    #[test]
    fn test_axis_flows() {
        assert_eq!(values(&vortex_flow(d(3))), vec![6, 9]);
        assert_eq!(values(&vortex_flow(d(6))), vec![9, 3]);
        assert_eq!(values(&vortex_flow(d(9))), vec![3, 6]);
    }

    #[test]
    fn test_zero_gets_natural_order() {
        assert_eq!(values(&vortex_flow(d(0))), (1..=9).collect::<Vec<u8>>());
    }

    #[test]
    fn test_pair_flow_same_family_is_single() {
        assert_eq!(values(&pair_flow(d(2), d(4))), vec![4, 8, 7, 5, 1, 2]);
    }

    #[test]
    fn test_pair_flow_crossing_families_concatenates() {
        assert_eq!(
            values(&pair_flow(d(1), d(3))),
            vec![2, 4, 8, 7, 5, 1, 6, 9]
        );
    }

    #[test]
    fn test_flow_never_contains_zero() {
        for digit in Digit::all() {
            assert!(vortex_flow(digit).iter().all(|x| x.value() != 0));
        }
    }
}
