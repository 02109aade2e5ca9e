//! RNG module - 7-bag piece generation
//!
//! Each bag holds one of each piece, shuffled. The generator keeps at least
//! one full bag beyond the preview window so the upcoming queue is always
//! long enough to observe.

use std::collections::VecDeque;

use crate::types::PieceKind;

/// Simple LCG (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG; a zero seed is bumped to 1
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Fold a 64-bit seed into the 32-bit state
    pub fn from_u64(seed: u64) -> Self {
        Self::new((seed ^ (seed >> 32)) as u32)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator with a preview window
#[derive(Debug, Clone)]
pub struct PieceBag {
    upcoming: VecDeque<PieceKind>,
    rng: SimpleRng,
}

impl PieceBag {
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            upcoming: VecDeque::with_capacity(14),
            rng: SimpleRng::from_u64(seed),
        };
        bag.refill();
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        let mut fresh = PieceKind::ALL;
        self.rng.shuffle(&mut fresh);
        self.upcoming.extend(fresh);
    }

    /// Take the next piece
    pub fn draw(&mut self) -> PieceKind {
        if self.upcoming.len() <= PieceKind::ALL.len() {
            self.refill();
        }
        self.upcoming.pop_front().unwrap_or(PieceKind::I)
    }

    /// Put a piece back at the front of the queue
    pub fn push_front(&mut self, kind: PieceKind) {
        self.upcoming.push_front(kind);
    }

    /// The next `n` pieces, next first
    pub fn peek(&self, n: usize) -> impl Iterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied().take(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(41) < 41);
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = PieceBag::new(1);
        let drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_peek_matches_draw_across_bag_boundary() {
        let mut bag = PieceBag::new(99);
        for _ in 0..5 {
            bag.draw();
        }
        let preview: Vec<PieceKind> = bag.peek(6).collect();
        assert_eq!(preview.len(), 6);
        let drawn: Vec<PieceKind> = (0..6).map(|_| bag.draw()).collect();
        assert_eq!(preview, drawn);
    }

    #[test]
    fn test_preview_never_runs_short() {
        let mut bag = PieceBag::new(3);
        for _ in 0..50 {
            bag.draw();
            assert!(bag.peek(6).count() == 6);
        }
    }

    #[test]
    fn test_push_front_returns_piece_next() {
        let mut bag = PieceBag::new(3);
        bag.push_front(PieceKind::T);
        assert_eq!(bag.draw(), PieceKind::T);
    }
}
