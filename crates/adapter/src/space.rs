//! Declared action and observation spaces.
//!
//! Fixed at construction and queried by callers before interaction begins.

use serde::Serialize;

use crate::observation::Observation;

/// `n` discrete actions, `0..n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Discrete {
    pub n: usize,
}

/// Fixed-shape array of small integers in `low..=high`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxSpace {
    pub shape: Vec<usize>,
    pub low: u8,
    pub high: u8,
}

impl BoxSpace {
    pub fn new(shape: &[usize], low: u8, high: u8) -> Self {
        Self {
            shape: shape.to_vec(),
            low,
            high,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clamp(&self, value: u8) -> u8 {
        value.clamp(self.low, self.high)
    }

    /// Right length and every value in range
    pub fn contains(&self, values: &[u8]) -> bool {
        values.len() == self.len() && values.iter().all(|v| (self.low..=self.high).contains(v))
    }
}

/// One [`BoxSpace`] per observation field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationSpace {
    pub board: BoxSpace,
    pub queue: BoxSpace,
    pub hold: BoxSpace,
}

impl ObservationSpace {
    pub fn contains(&self, obs: &Observation) -> bool {
        self.board.shape == [obs.width(), obs.height()]
            && self.board.contains(obs.board())
            && self.queue.contains(obs.queue())
            && self.hold.contains(obs.hold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_space_checks_length_and_range() {
        let space = BoxSpace::new(&[3], 0, 6);
        assert_eq!(space.len(), 3);
        assert!(space.contains(&[0, 6, 3]));
        assert!(!space.contains(&[0, 7, 3]));
        assert!(!space.contains(&[0, 1]));
        assert_eq!(space.clamp(9), 6);
    }
}
