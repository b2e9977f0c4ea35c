//! Positional drop targets for block insertion.
//!
//! The presentation layer renders one droppable zone before the first
//! block, one after each block, and a catch-all zone covering the
//! whole canvas that means "end of list". Zone `k` sits between
//! blocks `k-1` and `k`, so a drop on zone `k` inserts the new block
//! at sequence position `k`.

/// A droppable insertion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    /// The interleaved zone at position `k` (0 = before the first
    /// block, `len` = after the last).
    Between(usize),
    /// The catch-all zone over the whole canvas; resolves to the end
    /// of the list.
    CanvasEnd,
}

/// At-most-once drop resolution for a single drag gesture.
///
/// Interior zones and the catch-all zone overlap, so both can observe
/// the same drop. The first zone to resolve claims the gesture; any
/// later resolution returns `None`, which suppresses the catch-all
/// after a more specific zone already handled the drop.
#[derive(Debug, Default)]
pub struct DropGesture {
    claimed: bool,
}

impl DropGesture {
    /// Start a new drag gesture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some zone has already claimed this gesture.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Resolve a zone hit into an insertion index.
    ///
    /// `canvas_len` is the sequence length at drop time; interior
    /// zones beyond it are clamped to an append.
    pub fn resolve(&mut self, zone: DropZone, canvas_len: usize) -> Option<usize> {
        if self.claimed {
            return None;
        }
        self.claimed = true;
        Some(match zone {
            DropZone::Between(k) => k.min(canvas_len),
            DropZone::CanvasEnd => canvas_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::canvas::Canvas;

    #[test]
    fn test_zone_maps_to_insertion_position() {
        let mut gesture = DropGesture::new();
        assert_eq!(gesture.resolve(DropZone::Between(1), 2), Some(1));
    }

    #[test]
    fn test_catch_all_resolves_to_end() {
        let mut gesture = DropGesture::new();
        assert_eq!(gesture.resolve(DropZone::CanvasEnd, 3), Some(3));
    }

    #[test]
    fn test_interior_zone_suppresses_catch_all() {
        let mut gesture = DropGesture::new();
        assert_eq!(gesture.resolve(DropZone::Between(0), 2), Some(0));
        // The catch-all fires afterwards for the same gesture.
        assert_eq!(gesture.resolve(DropZone::CanvasEnd, 2), None);
        assert!(gesture.is_claimed());
    }

    #[test]
    fn test_stale_zone_index_clamped() {
        let mut gesture = DropGesture::new();
        assert_eq!(gesture.resolve(DropZone::Between(9), 2), Some(2));
    }

    #[test]
    fn test_mid_insert_via_drop_zone_scenario() {
        let mut canvas = Canvas::new();
        canvas.insert(BlockType::Text, "텍스트", 0);
        canvas.insert(BlockType::Date, "일정", 1);

        let mut gesture = DropGesture::new();
        let at = gesture
            .resolve(DropZone::Between(1), canvas.len())
            .expect("claimed");
        canvas.insert(BlockType::Image, "이미지", at);
        // Catch-all observes the same drop but must not double-insert.
        assert_eq!(gesture.resolve(DropZone::CanvasEnd, canvas.len()), None);

        let types: Vec<_> = canvas.blocks().iter().map(|b| b.block_type()).collect();
        assert_eq!(
            types,
            [BlockType::Text, BlockType::Image, BlockType::Date]
        );
    }
}
