/// Unordered frontier that yields its cheapest entry on demand.
///
/// Priorities are not stored with the entries. Each extraction rescores every
/// entry with the supplied function and removes the first one holding the
/// minimum, so among equal scores the earliest inserted wins. Duplicate
/// entries are kept; callers discard stale ones with a closed set.
#[derive(Debug, Clone)]
pub struct MinQueue<T> {
    items: Vec<T>,
}

impl<T> Default for MinQueue<T> {
    fn default() -> Self {
        MinQueue { items: Vec::new() }
    }
}

impl<T> MinQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes and returns the entry with the lowest score, or `None` when
    /// the queue is empty.
    pub fn pop_min_by<F>(&mut self, mut score: F) -> Option<T>
    where
        F: FnMut(&T) -> f64,
    {
        let mut scored = self.items.iter().map(&mut score).enumerate();
        let (mut best_idx, mut best_score) = scored.next()?;
        for (idx, s) in scored {
            if s < best_score {
                best_score = s;
                best_idx = idx;
            }
        }
        Some(self.items.remove(best_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_pops_nothing() {
        let mut queue: MinQueue<u32> = MinQueue::new();
        assert!(queue.pop_min_by(|&v| v as f64).is_none());
    }

    #[test]
    fn pops_in_score_order() {
        let mut queue = MinQueue::new();
        for v in [5, 1, 4, 2, 3] {
            queue.push(v);
        }
        let mut out = Vec::new();
        while let Some(v) = queue.pop_min_by(|&v| v as f64) {
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn ties_go_to_first_inserted() {
        let mut queue = MinQueue::new();
        queue.push(('a', 2));
        queue.push(('b', 1));
        queue.push(('c', 1));
        queue.push(('d', 1));
        let score = |item: &(char, u32)| item.1 as f64;
        assert_eq!(queue.pop_min_by(score), Some(('b', 1)));
        assert_eq!(queue.pop_min_by(score), Some(('c', 1)));
        assert_eq!(queue.pop_min_by(score), Some(('d', 1)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn keeps_duplicates_and_rescores_each_pop() {
        let mut queue = MinQueue::new();
        queue.push(7);
        queue.push(7);
        queue.push(3);
        // Score changes between pops are honored because nothing is cached.
        assert_eq!(queue.pop_min_by(|&v| if v == 7 { 0.0 } else { 1.0 }), Some(7));
        assert_eq!(queue.pop_min_by(|&v| v as f64), Some(3));
        assert_eq!(queue.pop_min_by(|&v| v as f64), Some(7));
        assert!(queue.is_empty());
    }

    #[test]
    fn infinite_scores_still_pop() {
        let mut queue = MinQueue::new();
        queue.push(1);
        queue.push(2);
        assert_eq!(queue.pop_min_by(|_| f64::INFINITY), Some(1));
    }
}
