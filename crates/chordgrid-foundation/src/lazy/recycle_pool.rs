//! Scrap pool for grid cells.
//!
//! During a pass the layout detaches cells into this pool and checks them back
//! out for the positions it needs. Whatever is left when the pass ends goes back
//! to the [`CellProvider`](super::CellProvider), so the pool is always empty
//! between passes.

/// Default upper bound on scrap held during a single pass.
///
/// A full relayout of a 1080p viewport with 8 cells per line scraps well under
/// this; anything beyond it is released straight to the provider.
pub const DEFAULT_MAX_SCRAP: usize = 256;

/// Policy for reusing detached cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReusePolicy {
    /// Maximum number of cells kept as scrap during a pass.
    pub max_scrap: usize,

    /// Whether scrap is offered back to the provider at all.
    pub enabled: bool,
}

impl Default for ReusePolicy {
    fn default() -> Self {
        Self {
            max_scrap: DEFAULT_MAX_SCRAP,
            enabled: true,
        }
    }
}

impl ReusePolicy {
    /// Reuse enabled, holding at most `max_scrap` detached cells per pass.
    pub fn new(max_scrap: usize) -> Self {
        Self {
            max_scrap,
            enabled: true,
        }
    }

    /// Disables reuse: every detached cell is released immediately.
    pub fn disabled() -> Self {
        Self {
            max_scrap: 0,
            enabled: false,
        }
    }
}

/// A detached cell handed back to the provider for a new position.
#[derive(Debug)]
pub struct Recycled<C> {
    /// The cell itself.
    pub cell: C,

    /// Position the cell was bound to before it was detached.
    pub previous_position: usize,
}

impl<C> Recycled<C> {
    /// Whether the cell already shows `position` and needs no rebinding.
    pub fn is_bound_to(&self, position: usize) -> bool {
        self.previous_position == position
    }

    pub fn into_inner(self) -> C {
        self.cell
    }
}

#[derive(Debug)]
struct ScrapEntry<C> {
    position: usize,
    cell: C,
}

/// Position-agnostic pool of detached cells.
#[derive(Debug)]
pub struct RecyclePool<C> {
    scrap: Vec<ScrapEntry<C>>,
    policy: ReusePolicy,
}

impl<C> Default for RecyclePool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RecyclePool<C> {
    /// Empty scrap governed by [`ReusePolicy::default`].
    pub fn new() -> Self {
        Self::with_policy(ReusePolicy::default())
    }

    /// Empty scrap that accepts detached cells according to `policy`.
    pub fn with_policy(policy: ReusePolicy) -> Self {
        Self {
            scrap: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> ReusePolicy {
        self.policy
    }

    /// Returns a detached cell that was bound to `position`.
    ///
    /// Gives the cell back when the pool does not accept it (reuse disabled or
    /// the scrap limit reached); the caller must release it to the provider.
    #[must_use = "a rejected cell must be released to the provider"]
    pub fn return_to_pool(&mut self, position: usize, cell: C) -> Option<C> {
        if !self.policy.enabled || self.scrap.len() >= self.policy.max_scrap {
            return Some(cell);
        }
        self.scrap.push(ScrapEntry { position, cell });
        None
    }

    /// Takes a cell out of the pool for `hint`.
    ///
    /// A cell last bound to `hint` is preferred, so an unchanged window reuses
    /// every cell as-is. Otherwise the most recently scrapped cell is returned.
    pub fn checkout(&mut self, hint: usize) -> Option<Recycled<C>> {
        if !self.policy.enabled {
            return None;
        }

        let entry = match self.scrap.iter().rposition(|entry| entry.position == hint) {
            Some(index) => self.scrap.swap_remove(index),
            None => self.scrap.pop()?,
        };
        Some(Recycled {
            cell: entry.cell,
            previous_position: entry.position,
        })
    }

    /// Empties the pool, yielding every cell still in it.
    pub fn drain(&mut self) -> impl Iterator<Item = C> + '_ {
        self.scrap.drain(..).map(|entry| entry.cell)
    }

    /// Returns the number of cells waiting in the pool.
    pub fn len(&self) -> usize {
        self.scrap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_prefers_same_position() {
        let mut pool = RecyclePool::new();
        assert!(pool.return_to_pool(1, "a").is_none());
        assert!(pool.return_to_pool(2, "b").is_none());
        assert!(pool.return_to_pool(3, "c").is_none());

        let recycled = pool.checkout(2).unwrap();
        assert_eq!(recycled.cell, "b");
        assert!(recycled.is_bound_to(2));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_checkout_falls_back_to_any_scrap() {
        let mut pool = RecyclePool::new();
        assert!(pool.return_to_pool(1, "a").is_none());

        let recycled = pool.checkout(40).unwrap();
        assert_eq!(recycled.cell, "a");
        assert!(!recycled.is_bound_to(40));
        assert_eq!(recycled.previous_position, 1);
        assert!(pool.checkout(41).is_none());
    }

    #[test]
    fn test_disabled_policy_rejects_everything() {
        let mut pool = RecyclePool::with_policy(ReusePolicy::disabled());
        assert_eq!(pool.return_to_pool(1, "a"), Some("a"));
        assert!(pool.is_empty());
        assert!(pool.checkout(1).is_none());
    }

    #[test]
    fn test_scrap_limit() {
        let mut pool = RecyclePool::with_policy(ReusePolicy::new(2));
        let rejected: Vec<_> = (0..5)
            .filter_map(|i| pool.return_to_pool(i, i * 10))
            .collect();

        assert_eq!(pool.len(), 2);
        assert_eq!(rejected, vec![20, 30, 40]);
    }

    #[test]
    fn test_drain_empties_pool() {
        let mut pool = RecyclePool::new();
        for i in 0..4 {
            assert!(pool.return_to_pool(i, i).is_none());
        }
        let mut drained: Vec<_> = pool.drain().collect();
        drained.sort_unstable();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(pool.is_empty());
    }
}
