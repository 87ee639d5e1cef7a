//! Append cursor over a GPU buffer, reset once per frame.
//!
//! `Queue::write_buffer` lands before the submitted commands run, so two draws
//! recorded in the same submission must not share a byte range. Each draw
//! reserves a fresh range; [`FrameArena::reset`] reclaims them when the host
//! starts a new frame.

/// Where a reservation landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Reservation {
    /// First slot of the reserved range.
    pub offset: u64,
    /// Set when the buffer must be reallocated with this many slots before
    /// writing. The range then starts at slot 0 of the new buffer.
    pub grow_to: Option<u64>,
}

/// Bump allocator counting in slots (vertices, uniform blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FrameArena {
    cursor: u64,
    capacity: u64,
    min_capacity: u64,
}

impl FrameArena {
    pub fn new(min_capacity: u64) -> Self {
        Self { cursor: 0, capacity: 0, min_capacity: min_capacity.max(1) }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Forgets the backing buffer so the next reservation reallocates.
    pub fn invalidate(&mut self) {
        self.cursor = 0;
        self.capacity = 0;
    }

    pub fn reserve(&mut self, len: u64) -> Reservation {
        let end = self.cursor + len;
        if end <= self.capacity {
            let offset = self.cursor;
            self.cursor = end;
            return Reservation { offset, grow_to: None };
        }

        // Earlier ranges stay in the old buffer, which the recorded draws
        // still reference. Size the new one for everything reserved so far.
        let grow_to = end.next_power_of_two().max(self.min_capacity);
        self.capacity = grow_to;
        self.cursor = len;
        Reservation { offset: 0, grow_to: Some(grow_to) }
    }
}

/// Rounds `size` up to a multiple of `alignment` (a power of two).
pub(super) fn align_up(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── reserve ───────────────────────────────────────────────────────────

    #[test]
    fn first_reservation_allocates_min_capacity() {
        let mut arena = FrameArena::new(96);
        let r = arena.reserve(6);
        assert_eq!(r, Reservation { offset: 0, grow_to: Some(96) });
        assert_eq!(arena.capacity(), 96);
    }

    #[test]
    fn reservations_in_one_frame_are_disjoint() {
        let mut arena = FrameArena::new(96);
        arena.reserve(1);
        let a = arena.reserve(6);
        let b = arena.reserve(12);
        assert_eq!(a, Reservation { offset: 1, grow_to: None });
        assert_eq!(b, Reservation { offset: 7, grow_to: None });
        assert!(a.offset + 6 <= b.offset);
    }

    #[test]
    fn reset_reuses_the_buffer_from_the_start() {
        let mut arena = FrameArena::new(16);
        arena.reserve(4);
        arena.reserve(4);
        arena.reset();
        assert_eq!(arena.reserve(4), Reservation { offset: 0, grow_to: None });
        assert_eq!(arena.capacity(), 16);
    }

    #[test]
    fn overflow_grows_and_restarts_at_zero() {
        let mut arena = FrameArena::new(4);
        arena.reserve(3);
        let r = arena.reserve(3);
        assert_eq!(r.offset, 0);
        assert_eq!(r.grow_to, Some(8));
        // The grown buffer fits the rest of the frame without another realloc.
        assert_eq!(arena.reserve(3), Reservation { offset: 3, grow_to: None });
    }

    #[test]
    fn oversized_reservation_fits_after_growth() {
        let mut arena = FrameArena::new(96);
        arena.reserve(6);
        let r = arena.reserve(1000);
        assert_eq!(r, Reservation { offset: 0, grow_to: Some(1024) });
    }

    #[test]
    fn invalidate_forces_reallocation() {
        let mut arena = FrameArena::new(8);
        arena.reserve(2);
        arena.invalidate();
        assert_eq!(arena.reserve(2), Reservation { offset: 0, grow_to: Some(8) });
    }

    // ── align_up ──────────────────────────────────────────────────────────

    #[test]
    fn align_up_rounds_to_uniform_alignment() {
        assert_eq!(align_up(32, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
        assert_eq!(align_up(32, 0), 32);
    }
}
