//! Scroll offset clamping.
//!
//! [`ScrollPosition`] keeps an integer pixel offset inside `[0, max_value]` and
//! reports how much of each requested delta was actually applied, which is what
//! a host needs for edge effects and nested scrolling.

/// Pixel scroll offset along one axis, bounded by `[0, max_value]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollPosition {
    /// Current offset from the start of the content.
    value: i32,
    /// Maximum offset (content extent minus viewport extent).
    max_value: i32,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ScrollPosition {
    /// Creates a position at `initial` with an unbounded maximum.
    ///
    /// The real maximum is only known once the grid geometry has been computed,
    /// see [`ScrollPosition::set_max_value`].
    pub fn new(initial: i32) -> Self {
        Self {
            value: initial.max(0),
            max_value: i32::MAX,
        }
    }

    /// Current offset in pixels.
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// Sets the maximum offset, coercing the current value if it now exceeds it.
    pub fn set_max_value(&mut self, max: i32) {
        self.max_value = max.max(0);
        if self.value > self.max_value {
            log::debug!(
                "scroll offset {} exceeds new maximum {}, coercing",
                self.value,
                self.max_value
            );
            self.value = self.max_value;
        }
    }

    /// Jumps to `target`, clamped to `[0, max_value]`.
    pub fn scroll_to(&mut self, target: i32) {
        self.value = target.clamp(0, self.max_value);
    }

    /// Whether there is content before the current offset.
    pub fn can_scroll_backward(&self) -> bool {
        self.value > 0
    }

    /// Whether there is content after the current offset.
    pub fn can_scroll_forward(&self) -> bool {
        self.value < self.max_value
    }

    /// Applies `delta` and returns the consumed part of it.
    ///
    /// The consumed amount has the same sign as `delta`, never exceeds it in
    /// magnitude, and is zero when the position already sits on the boundary the
    /// delta points at. When the delta overshoots a boundary only the distance up
    /// to that boundary is consumed.
    pub fn consume_scroll_delta(&mut self, delta: i32) -> i32 {
        if delta == 0 {
            return 0;
        }
        if delta < 0 && self.value <= 0 {
            return 0;
        }
        if delta > 0 && self.value >= self.max_value {
            return 0;
        }

        let target = (i64::from(self.value) + i64::from(delta))
            .clamp(0, i64::from(self.max_value));
        // `target` lies in [0, max_value] so it fits back into i32.
        let target = target as i32;
        let consumed = target - self.value;
        self.value = target;
        consumed
    }
}
