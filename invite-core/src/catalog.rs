//! Block catalog - display labels, palette grouping, and fallback content.
//!
//! The catalog is the single source of default content: the editor,
//! the preview surface, and the static exporter all fall back to the
//! same strings when a block's own payload is unset.

use crate::block::BlockType;

/// Palette grouping used to pick an icon accent for a block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconGroup {
    /// Core content blocks (text, image, date, location).
    Content,
    /// Media-heavy blocks (couple, gallery, video).
    Media,
    /// Interactive blocks (countdown, guestbook, timeline, account).
    Interactive,
    /// Decorative blocks (background, divider).
    Decor,
}

/// One entry in the draggable palette.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// The block type this entry places.
    pub block_type: BlockType,
    /// Display label shown on the palette and on new blocks.
    pub label: &'static str,
    /// Icon accent group.
    pub group: IconGroup,
}

/// Display label for a block type.
#[must_use]
pub fn label_for(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Text => "텍스트",
        BlockType::Image => "이미지",
        BlockType::Date => "일정",
        BlockType::Location => "위치",
        BlockType::Couple => "신랑 & 신부",
        BlockType::Gallery => "갤러리",
        BlockType::Video => "동영상",
        BlockType::Countdown => "카운트다운",
        BlockType::Guestbook => "방명록",
        BlockType::Timeline => "타임라인",
        BlockType::Account => "계좌정보",
        BlockType::Background => "배경",
        BlockType::Divider => "구분선",
    }
}

/// Icon accent group for a block type.
#[must_use]
pub fn icon_group(block_type: BlockType) -> IconGroup {
    match block_type {
        BlockType::Text | BlockType::Image | BlockType::Date | BlockType::Location => {
            IconGroup::Content
        }
        BlockType::Couple | BlockType::Gallery | BlockType::Video => IconGroup::Media,
        BlockType::Countdown
        | BlockType::Guestbook
        | BlockType::Timeline
        | BlockType::Account => IconGroup::Interactive,
        BlockType::Background | BlockType::Divider => IconGroup::Decor,
    }
}

/// Fallback content for a block type, used wherever the block's own
/// payload is unset. Total over the closed catalog.
#[must_use]
pub fn default_content(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Text => "샘플 텍스트",
        BlockType::Image => "이미지를 추가하세요",
        BlockType::Date => "2024년 12월 25일",
        BlockType::Location => "예식장 이름",
        BlockType::Couple => "신랑 & 신부",
        BlockType::Gallery => "갤러리",
        BlockType::Video => "동영상을 추가하세요",
        BlockType::Countdown => "2024-12-25T14:00:00",
        BlockType::Guestbook => "축하 메시지를 남겨주세요",
        BlockType::Timeline => "타임라인",
        BlockType::Account => "축의금 계좌번호",
        BlockType::Background => "배경 스타일",
        BlockType::Divider => "구분선",
    }
}

/// Default couple-card fields; each one applies independently when the
/// corresponding [`CoupleInfo`](crate::block::CoupleInfo) field is unset.
pub mod couple_defaults {
    /// Groom's name.
    pub const GROOM_NAME: &str = "김철수";
    /// Groom's parents.
    pub const GROOM_PARENTS: &str = "김부모님";
    /// Groom's phone number.
    pub const GROOM_PHONE: &str = "010-1234-5678";
    /// Bride's name.
    pub const BRIDE_NAME: &str = "이영희";
    /// Bride's parents.
    pub const BRIDE_PARENTS: &str = "이부모님";
    /// Bride's phone number.
    pub const BRIDE_PHONE: &str = "010-9876-5432";
}

/// Secondary line shown under the date heading.
pub const DATE_SUBTITLE: &str = "오후 2시";

/// Secondary line shown under the location heading.
pub const LOCATION_SUBTITLE: &str = "서울시 강남구...";

/// Timeline milestones rendered by the preview and export surfaces.
pub const TIMELINE_EVENTS: [&str; 4] = ["첫 만남", "연애", "프로포즈", "결혼"];

/// The draggable palette, in display order.
///
/// The couple block is constructible through the full catalog but is
/// not offered on the palette.
#[must_use]
pub fn entries() -> Vec<CatalogEntry> {
    BlockType::ALL
        .into_iter()
        .filter(|t| *t != BlockType::Couple)
        .map(|block_type| CatalogEntry {
            block_type,
            label: label_for(block_type),
            group: icon_group(block_type),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_total_over_catalog() {
        for t in BlockType::ALL {
            assert!(!default_content(t).is_empty());
            assert!(!label_for(t).is_empty());
        }
    }

    #[test]
    fn test_palette_excludes_couple() {
        let palette = entries();
        assert_eq!(palette.len(), 12);
        assert!(palette.iter().all(|e| e.block_type != BlockType::Couple));
    }

    #[test]
    fn test_date_fallback_is_localized() {
        assert_eq!(default_content(BlockType::Date), "2024년 12월 25일");
    }
}
