//! Segment chain: a doubly linked body stored in an index arena.
//!
//! Segments are addressed by [`SegmentId`] and never freed until [`SegmentChain::clear`].
//! `unlink` and `insert_after` are the only structural mutations; both keep the
//! `tail`/`head` handles and member count coherent.

use super::types::Position;

/// Handle to a segment in the arena.
///
/// Stable until [`SegmentChain::clear`], which invalidates every id handed
/// out before it. Use [`SegmentChain::contains`] or [`SegmentChain::get`]
/// when an id may be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(usize);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Segment {
    pos: Position,
    prev: Option<SegmentId>,
    next: Option<SegmentId>,
    linked: bool,
}

/// Ordered body, tail (oldest) to head (newest).
#[derive(Debug, Clone, Default)]
pub struct SegmentChain {
    segments: Vec<Segment>,
    tail: Option<SegmentId>,
    head: Option<SegmentId>,
    len: usize,
}

impl SegmentChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every segment and forget both ends. Outstanding ids become stale.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.tail = None;
        self.head = None;
        self.len = 0;
    }

    /// Number of linked segments.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<SegmentId> {
        self.head
    }

    pub fn tail(&self) -> Option<SegmentId> {
        self.tail
    }

    /// Whether `id` refers to a segment in the current arena.
    pub fn contains(&self, id: SegmentId) -> bool {
        id.0 < self.segments.len()
    }

    /// Checked form of [`position`](Self::position); `None` for a stale id.
    pub fn get(&self, id: SegmentId) -> Option<Position> {
        self.segments.get(id.0).map(|seg| seg.pos)
    }

    /// Coordinate of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued before the last `clear`. The same holds for
    /// `set_position`, `next`, `prev` and `is_linked`.
    pub fn position(&self, id: SegmentId) -> Position {
        self.segments[id.0].pos
    }

    pub fn set_position(&mut self, id: SegmentId, pos: Position) {
        self.segments[id.0].pos = pos;
    }

    pub fn next(&self, id: SegmentId) -> Option<SegmentId> {
        self.segments[id.0].next
    }

    pub fn prev(&self, id: SegmentId) -> Option<SegmentId> {
        self.segments[id.0].prev
    }

    pub fn is_linked(&self, id: SegmentId) -> bool {
        self.segments[id.0].linked
    }

    /// Allocate a detached segment.
    pub fn alloc(&mut self, pos: Position) -> SegmentId {
        self.segments.push(Segment {
            pos,
            prev: None,
            next: None,
            linked: false,
        });
        SegmentId(self.segments.len() - 1)
    }

    /// Allocate a segment at `pos` and make it the new head.
    pub fn push_head(&mut self, pos: Position) -> SegmentId {
        let id = self.alloc(pos);
        match self.head {
            Some(anchor) => self.insert_after(id, anchor),
            None => {
                self.tail = Some(id);
                self.head = Some(id);
                self.segments[id.0].linked = true;
                self.len = 1;
            }
        }
        id
    }

    /// Remove `id` from the chain, joining its neighbours. No-op when detached.
    pub fn unlink(&mut self, id: SegmentId) {
        if !self.segments[id.0].linked {
            return;
        }

        let (prev, next) = (self.segments[id.0].prev, self.segments[id.0].next);
        if let Some(p) = prev {
            self.segments[p.0].next = next;
        }
        if let Some(n) = next {
            self.segments[n.0].prev = prev;
        }
        if self.tail == Some(id) {
            self.tail = next;
        }
        if self.head == Some(id) {
            self.head = prev;
        }

        let seg = &mut self.segments[id.0];
        seg.prev = None;
        seg.next = None;
        seg.linked = false;
        self.len -= 1;
    }

    /// Unlink `id`, then splice it directly after `anchor`.
    ///
    /// `anchor`'s old successor now follows `id`. Inserting after the head
    /// makes `id` the head.
    pub fn insert_after(&mut self, id: SegmentId, anchor: SegmentId) {
        if id == anchor {
            return;
        }
        self.unlink(id);
        debug_assert!(self.segments[anchor.0].linked, "anchor must be linked");

        let after = self.segments[anchor.0].next;
        if let Some(n) = after {
            self.segments[n.0].prev = Some(id);
        }
        {
            let seg = &mut self.segments[id.0];
            seg.prev = Some(anchor);
            seg.next = after;
            seg.linked = true;
        }
        self.segments[anchor.0].next = Some(id);
        if self.head == Some(anchor) {
            self.head = Some(id);
        }
        self.len += 1;
    }

    /// Walk from tail to head.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            cursor: self.tail,
            remaining: self.len,
        }
    }

    /// Coordinates from tail to head.
    pub fn positions(&self) -> Vec<Position> {
        self.iter().map(|(_, pos)| pos).collect()
    }
}

/// Tail-to-head iterator over `(SegmentId, Position)`.
pub struct ChainIter<'a> {
    chain: &'a SegmentChain,
    cursor: Option<SegmentId>,
    remaining: usize,
}

impl Iterator for ChainIter<'_> {
    type Item = (SegmentId, Position);

    fn next(&mut self) -> Option<Self::Item> {
        // `remaining` bounds the walk even if links were ever corrupted.
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        self.remaining -= 1;
        self.cursor = self.chain.next(id);
        Some((id, self.chain.position(id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn chain_of(points: &[(i32, i32)]) -> (SegmentChain, Vec<SegmentId>) {
        let mut chain = SegmentChain::new();
        let ids = points
            .iter()
            .map(|&(x, y)| chain.push_head(p(x, y)))
            .collect();
        (chain, ids)
    }

    /// Forward and backward links agree and both ends are terminal.
    fn assert_consistent(chain: &SegmentChain) {
        let ids: Vec<SegmentId> = chain.iter().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), chain.len());
        if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
            assert_eq!(chain.tail(), Some(*first));
            assert_eq!(chain.head(), Some(*last));
            assert_eq!(chain.prev(*first), None);
            assert_eq!(chain.next(*last), None);
        } else {
            assert!(chain.tail().is_none() && chain.head().is_none());
        }
        for pair in ids.windows(2) {
            assert_eq!(chain.next(pair[0]), Some(pair[1]));
            assert_eq!(chain.prev(pair[1]), Some(pair[0]));
        }
    }

    #[test]
    fn test_push_head_orders_tail_to_head() {
        let (chain, ids) = chain_of(&[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.tail(), Some(ids[0]));
        assert_eq!(chain.head(), Some(ids[2]));
        assert_eq!(chain.positions(), vec![p(0, 0), p(1, 0), p(2, 0)]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_unlink_middle_joins_neighbours() {
        let (mut chain, ids) = chain_of(&[(0, 0), (1, 0), (2, 0)]);
        chain.unlink(ids[1]);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.next(ids[0]), Some(ids[2]));
        assert_eq!(chain.prev(ids[2]), Some(ids[0]));
        assert_eq!(chain.next(ids[1]), None);
        assert_eq!(chain.prev(ids[1]), None);
        assert!(!chain.is_linked(ids[1]));
        assert_consistent(&chain);
    }

    #[test]
    fn test_unlink_tail_advances_tail() {
        let (mut chain, ids) = chain_of(&[(0, 0), (1, 0), (2, 0)]);
        chain.unlink(ids[0]);
        assert_eq!(chain.tail(), Some(ids[1]));
        assert_consistent(&chain);
    }

    #[test]
    fn test_unlink_detached_is_noop() {
        let (mut chain, ids) = chain_of(&[(0, 0), (1, 0)]);
        chain.unlink(ids[0]);
        chain.unlink(ids[0]);
        assert_eq!(chain.len(), 1);

        let loose = chain.alloc(p(9, 9));
        chain.unlink(loose);
        assert_eq!(chain.len(), 1);
        assert_consistent(&chain);
    }

    #[test]
    fn test_unlink_only_segment_empties_chain() {
        let (mut chain, ids) = chain_of(&[(3, 3)]);
        chain.unlink(ids[0]);
        assert!(chain.is_empty());
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_after_recycles_tail_into_head() {
        let (mut chain, ids) = chain_of(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
        let old_tail = chain.tail().unwrap();
        let old_head = chain.head().unwrap();

        chain.insert_after(old_tail, old_head);
        chain.set_position(old_tail, p(4, 0));

        assert_eq!(chain.len(), 4);
        assert_eq!(chain.tail(), Some(ids[1]));
        assert_eq!(chain.head(), Some(ids[0]));
        assert_eq!(chain.positions(), vec![p(1, 0), p(2, 0), p(3, 0), p(4, 0)]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_after_middle_anchor() {
        let (mut chain, ids) = chain_of(&[(0, 0), (1, 0), (2, 0)]);
        let extra = chain.alloc(p(7, 7));
        chain.insert_after(extra, ids[0]);

        assert_eq!(chain.len(), 4);
        assert_eq!(chain.positions(), vec![p(0, 0), p(7, 7), p(1, 0), p(2, 0)]);
        assert_eq!(chain.head(), Some(ids[2]));
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_after_self_is_noop() {
        let (mut chain, ids) = chain_of(&[(0, 0), (1, 0)]);
        chain.insert_after(ids[1], ids[1]);
        assert_eq!(chain.positions(), vec![p(0, 0), p(1, 0)]);
        assert_consistent(&chain);
    }

    #[test]
    fn test_repeated_recycling_keeps_arena_size() {
        let (mut chain, _) = chain_of(&[(0, 0), (1, 0), (2, 0)]);
        for step in 3..50 {
            let tail = chain.tail().unwrap();
            let head = chain.head().unwrap();
            chain.insert_after(tail, head);
            chain.set_position(tail, p(step, 0));
            assert_consistent(&chain);
        }
        assert_eq!(chain.segments.len(), 3);
        assert_eq!(chain.positions(), vec![p(47, 0), p(48, 0), p(49, 0)]);
    }

    #[test]
    fn test_clear() {
        let (mut chain, _) = chain_of(&[(0, 0), (1, 0)]);
        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.iter().count(), 0);
        assert_consistent(&chain);
    }

    #[test]
    fn test_ids_go_stale_after_clear() {
        let (mut chain, ids) = chain_of(&[(0, 0), (1, 0), (2, 0)]);
        assert!(chain.contains(ids[2]));
        assert_eq!(chain.get(ids[2]), Some(p(2, 0)));

        chain.clear();
        assert!(ids.iter().all(|&id| !chain.contains(id)));
        assert_eq!(chain.get(ids[2]), None);

        let fresh = chain.push_head(p(7, 7));
        assert!(chain.contains(fresh));
        assert!(!chain.contains(ids[1]));
    }
}
