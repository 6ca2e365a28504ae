//! The `RequestBoard` — live call flags plus pending-assignment shadows.

use lift_core::MAX_FLOORS;

/// Per-floor up/down call flags with pending (already-assigned) shadows.
///
/// All four arrays are allocated at [`MAX_FLOORS`] so runtime building
/// resizes never reallocate; only the first `floor_count` entries are
/// meaningful at any time.  Flag lifecycle:
///
/// - **set** by agents walking up to a call button, or by manual input;
/// - **pending** set by the dispatch scheduler when a car is assigned;
/// - **cleared** (live + pending together) when a car with the matching
///   direction opens its doors at the floor.
///
/// Invariant: `up[top]` and `down[0]` are always false — the tick driver
/// calls [`enforce_extremes`][RequestBoard::enforce_extremes] every tick to
/// guarantee this even across a building resize.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestBoard {
    up:           Vec<bool>,
    down:         Vec<bool>,
    pending_up:   Vec<bool>,
    pending_down: Vec<bool>,
}

impl Default for RequestBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBoard {
    pub fn new() -> Self {
        Self {
            up:           vec![false; MAX_FLOORS],
            down:         vec![false; MAX_FLOORS],
            pending_up:   vec![false; MAX_FLOORS],
            pending_down: vec![false; MAX_FLOORS],
        }
    }

    // ── Presses (idempotent sets) ─────────────────────────────────────────

    /// Record an up call at `floor`.  Pressing an already-lit button is a
    /// no-op — the flag stays set with no duplicate side effects.
    #[inline]
    pub fn press_up(&mut self, floor: usize) {
        self.up[floor] = true;
    }

    /// Record a down call at `floor`.  Idempotent like [`press_up`][Self::press_up].
    #[inline]
    pub fn press_down(&mut self, floor: usize) {
        self.down[floor] = true;
    }

    // ── Clears (live + pending together) ──────────────────────────────────

    /// Clear the up call at `floor`, pending shadow included.
    #[inline]
    pub fn clear_up(&mut self, floor: usize) {
        self.up[floor] = false;
        self.pending_up[floor] = false;
    }

    /// Clear the down call at `floor`, pending shadow included.
    #[inline]
    pub fn clear_down(&mut self, floor: usize) {
        self.down[floor] = false;
        self.pending_down[floor] = false;
    }

    // ── Pending shadows ───────────────────────────────────────────────────

    /// Mark the up call at `floor` as assigned to a car.
    #[inline]
    pub fn mark_pending_up(&mut self, floor: usize) {
        self.pending_up[floor] = true;
    }

    /// Mark the down call at `floor` as assigned to a car.
    #[inline]
    pub fn mark_pending_down(&mut self, floor: usize) {
        self.pending_down[floor] = true;
    }

    #[inline]
    pub fn is_pending_up(&self, floor: usize) -> bool {
        self.pending_up[floor]
    }

    #[inline]
    pub fn is_pending_down(&self, floor: usize) -> bool {
        self.pending_down[floor]
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn up(&self, floor: usize) -> bool {
        self.up[floor]
    }

    #[inline]
    pub fn down(&self, floor: usize) -> bool {
        self.down[floor]
    }

    /// `true` if any live call exists in `0..floor_count`.
    pub fn any_call(&self, floor_count: usize) -> bool {
        self.up[..floor_count].iter().any(|&b| b)
            || self.down[..floor_count].iter().any(|&b| b)
    }

    // ── Invariant guard ───────────────────────────────────────────────────

    /// Clear the two impossible calls: up at the top floor and down at the
    /// ground floor.  Run every tick by the driver; this also sweeps flags
    /// left stale above `floor_count` by a building shrink.
    pub fn enforce_extremes(&mut self, floor_count: usize) {
        self.down[0] = false;
        if floor_count > 0 {
            self.up[floor_count - 1] = false;
        }
        for f in floor_count..MAX_FLOORS {
            self.up[f] = false;
            self.down[f] = false;
            self.pending_up[f] = false;
            self.pending_down[f] = false;
        }
    }
}
