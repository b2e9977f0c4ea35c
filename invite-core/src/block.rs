//! Canvas blocks - the building blocks of an invitation page.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CanvasError;

/// The closed set of block types placeable on the canvas.
///
/// Not extensible at runtime; parsing an unlisted tag fails with
/// [`CanvasError::UnknownBlockType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Free text paragraph.
    Text,
    /// Single uploaded image.
    Image,
    /// Wedding date.
    Date,
    /// Venue location.
    Location,
    /// Groom and bride profile cards.
    Couple,
    /// Photo gallery grid.
    Gallery,
    /// Video placeholder.
    Video,
    /// D-day countdown.
    Countdown,
    /// Guestbook section.
    Guestbook,
    /// Relationship timeline.
    Timeline,
    /// Gift account info.
    Account,
    /// Background style section.
    Background,
    /// Horizontal divider.
    Divider,
}

impl BlockType {
    /// Every member of the catalog, in palette order.
    pub const ALL: [Self; 13] = [
        Self::Text,
        Self::Image,
        Self::Date,
        Self::Location,
        Self::Couple,
        Self::Gallery,
        Self::Video,
        Self::Countdown,
        Self::Guestbook,
        Self::Timeline,
        Self::Account,
        Self::Background,
        Self::Divider,
    ];

    /// The lowercase tag used in serialized form and in block ids.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Date => "date",
            Self::Location => "location",
            Self::Couple => "couple",
            Self::Gallery => "gallery",
            Self::Video => "video",
            Self::Countdown => "countdown",
            Self::Guestbook => "guestbook",
            Self::Timeline => "timeline",
            Self::Account => "account",
            Self::Background => "background",
            Self::Divider => "divider",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockType {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| CanvasError::UnknownBlockType(s.to_string()))
    }
}

/// Unique identifier for a placed block.
///
/// Generated once at creation as `{type}-{timestamp_ms}-{random}` and
/// never recomputed on reorder. The random suffix keeps ids distinct
/// even when several blocks are created within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh id for a block of the given type.
    #[must_use]
    pub fn generate(block_type: BlockType) -> Self {
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        Self(format!(
            "{}-{}-{suffix}",
            block_type.tag(),
            current_timestamp_ms()
        ))
    }

    /// Wrap an existing id, e.g. one restored from a payload.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Get the current Unix timestamp in milliseconds.
///
/// Milliseconds since the epoch fit in a u64 for millennia.
#[allow(clippy::cast_possible_truncation)]
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Display size of a single image block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// 48x48 thumbnail.
    #[default]
    Small,
    /// 96x96 thumbnail.
    Medium,
    /// Full-width banner.
    Large,
}

/// Thumbnail size in a gallery grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbSize {
    /// Compact thumbnails.
    Small,
    /// Default thumbnails.
    #[default]
    Medium,
    /// Large thumbnails.
    Large,
}

/// Number of gallery columns; serialized as the bare number `2` or `3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum GalleryCols {
    /// Two columns.
    #[default]
    Two,
    /// Three columns.
    Three,
}

impl From<GalleryCols> for u8 {
    fn from(cols: GalleryCols) -> Self {
        match cols {
            GalleryCols::Two => 2,
            GalleryCols::Three => 3,
        }
    }
}

impl TryFrom<u8> for GalleryCols {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("gallery column count must be 2 or 3, got {other}")),
        }
    }
}

/// How gallery images are positioned within their slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectPosition {
    /// Align to the top edge.
    Top,
    /// Centered.
    #[default]
    Center,
    /// Align to the bottom edge.
    Bottom,
    /// Align to the left edge.
    Left,
    /// Align to the right edge.
    Right,
}

impl ObjectPosition {
    /// CSS keyword for this position.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Aspect ratio hint for gallery thumbnails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Square.
    #[serde(rename = "1/1")]
    Square,
    /// Portrait 3:4.
    #[default]
    #[serde(rename = "3/4")]
    ThreeFour,
    /// Portrait 2:3.
    #[serde(rename = "2/3")]
    TwoThree,
    /// Landscape 4:3.
    #[serde(rename = "4/3")]
    FourThree,
    /// Widescreen 16:9.
    #[serde(rename = "16/9")]
    SixteenNine,
}

impl AspectRatio {
    /// CSS `aspect-ratio` value (e.g. `3 / 4`).
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Square => "1 / 1",
            Self::ThreeFour => "3 / 4",
            Self::TwoThree => "2 / 3",
            Self::FourThree => "4 / 3",
            Self::SixteenNine => "16 / 9",
        }
    }
}

/// One slot in a gallery grid.
///
/// An empty slot is `{url: ""}`; slots are never removed from the
/// middle of the vector, since that would shift the indices of the
/// remaining slots. Deleting an image clears `url` in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySlot {
    /// Image URL or data URI; empty string marks an unfilled slot.
    pub url: String,
    /// Optional caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Per-slot aspect ratio override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
}

impl GallerySlot {
    /// Create a filled slot from an image URL.
    #[must_use]
    pub fn filled(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
            aspect_ratio: None,
        }
    }

    /// Whether the slot holds an image.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Slot counts the gallery editor offers.
pub const GALLERY_SLOT_CHOICES: [usize; 5] = [4, 6, 8, 9, 12];

/// Default number of gallery slots for a freshly placed gallery.
pub const GALLERY_DEFAULT_SLOTS: usize = 4;

/// Reconcile a gallery slot vector to a target length.
///
/// Pads with empty slots or truncates, preserving existing entries by
/// position up to the smaller of the two lengths. Idempotent for a
/// fixed target.
pub fn reconcile_slots(slots: &mut Vec<GallerySlot>, target_len: usize) {
    slots.resize_with(target_len, GallerySlot::default);
}

/// Named fields of the couple profile cards.
///
/// Each field defaults independently at render time when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleInfo {
    /// Groom's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groom_name: Option<String>,
    /// Groom's parents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groom_parents: Option<String>,
    /// Groom's phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groom_phone: Option<String>,
    /// Bride's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bride_name: Option<String>,
    /// Bride's parents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bride_parents: Option<String>,
    /// Bride's phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bride_phone: Option<String>,
}

/// The typed payload of a block, keyed by its type tag.
///
/// Each variant declares exactly the fields applicable to its type,
/// so invalid field combinations are unrepresentable. The serialized
/// form is internally tagged with `type` and uses the `camelCase` field
/// names of the original durable format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum BlockKind {
    /// Free text paragraph.
    Text {
        /// Text body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },

    /// Single uploaded image.
    Image {
        /// Data URI or remote URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        /// Display size.
        #[serde(default)]
        image_size: ImageSize,
    },

    /// Wedding date; `content` holds an ISO date string.
    Date {
        /// ISO date string.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },

    /// Venue location; `content` holds the venue name.
    Location {
        /// Venue name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },

    /// Groom and bride profile cards.
    Couple {
        /// Named profile fields.
        #[serde(default)]
        props: CoupleInfo,
    },

    /// Photo gallery grid with a fixed number of slots.
    Gallery {
        /// Slot vector; fixed length equal to the configured count.
        #[serde(default)]
        gallery_images: Vec<GallerySlot>,
        /// Grid columns.
        #[serde(default)]
        gallery_cols: GalleryCols,
        /// Thumbnail size.
        #[serde(default)]
        gallery_thumb_size: ThumbSize,
        /// Image position within slots.
        #[serde(default)]
        gallery_object_position: ObjectPosition,
        /// Default aspect ratio for slots without an override.
        #[serde(default)]
        gallery_aspect_ratio: AspectRatio,
    },

    /// Video placeholder.
    Video {},

    /// D-day countdown; `content` holds the target date.
    Countdown {
        /// Target date string.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },

    /// Guestbook section.
    Guestbook {},

    /// Relationship timeline.
    Timeline {},

    /// Gift account info.
    Account {},

    /// Background style section.
    Background {},

    /// Horizontal divider.
    Divider {},
}

impl BlockKind {
    /// Build the empty payload for a freshly placed block of `block_type`.
    #[must_use]
    pub fn empty(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => Self::Text { content: None },
            BlockType::Image => Self::Image {
                image_url: None,
                image_size: ImageSize::default(),
            },
            BlockType::Date => Self::Date { content: None },
            BlockType::Location => Self::Location { content: None },
            BlockType::Couple => Self::Couple {
                props: CoupleInfo::default(),
            },
            BlockType::Gallery => Self::Gallery {
                gallery_images: vec![GallerySlot::default(); GALLERY_DEFAULT_SLOTS],
                gallery_cols: GalleryCols::default(),
                gallery_thumb_size: ThumbSize::default(),
                gallery_object_position: ObjectPosition::default(),
                gallery_aspect_ratio: AspectRatio::default(),
            },
            BlockType::Video => Self::Video {},
            BlockType::Countdown => Self::Countdown { content: None },
            BlockType::Guestbook => Self::Guestbook {},
            BlockType::Timeline => Self::Timeline {},
            BlockType::Account => Self::Account {},
            BlockType::Background => Self::Background {},
            BlockType::Divider => Self::Divider {},
        }
    }

    /// The type tag of this payload.
    #[must_use]
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::Text { .. } => BlockType::Text,
            Self::Image { .. } => BlockType::Image,
            Self::Date { .. } => BlockType::Date,
            Self::Location { .. } => BlockType::Location,
            Self::Couple { .. } => BlockType::Couple,
            Self::Gallery { .. } => BlockType::Gallery,
            Self::Video {} => BlockType::Video,
            Self::Countdown { .. } => BlockType::Countdown,
            Self::Guestbook {} => BlockType::Guestbook,
            Self::Timeline {} => BlockType::Timeline,
            Self::Account {} => BlockType::Account,
            Self::Background {} => BlockType::Background,
            Self::Divider {} => BlockType::Divider,
        }
    }

    /// The free-text payload, for the kinds that carry one.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content }
            | Self::Date { content }
            | Self::Location { content }
            | Self::Countdown { content } => content.as_deref(),
            _ => None,
        }
    }
}

/// One placed block on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier, stable across reorders.
    pub id: BlockId,
    /// Display name, set at creation and not re-derived.
    pub label: String,
    /// Typed payload.
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Create a new block with a freshly generated id.
    #[must_use]
    pub fn new(block_type: BlockType, label: impl Into<String>) -> Self {
        Self {
            id: BlockId::generate(block_type),
            label: label.into(),
            kind: BlockKind::empty(block_type),
        }
    }

    /// The block's type tag.
    #[must_use]
    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_round_trip_tags() {
        for t in BlockType::ALL {
            assert_eq!(t.tag().parse::<BlockType>().expect("parse"), t);
        }
    }

    #[test]
    fn test_unknown_block_type_fails_loudly() {
        let err = "sticker".parse::<BlockType>().unwrap_err();
        assert!(matches!(err, CanvasError::UnknownBlockType(ref s) if s == "sticker"));
    }

    #[test]
    fn test_block_id_shape() {
        let id = BlockId::generate(BlockType::Gallery);
        assert!(id.as_str().starts_with("gallery-"));
        assert_eq!(id.as_str().split('-').count(), 3);
    }

    #[test]
    fn test_block_ids_distinct_same_millisecond() {
        let ids: Vec<_> = (0..64).map(|_| BlockId::generate(BlockType::Text)).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_serialized_block_uses_original_field_names() {
        let mut block = Block::new(BlockType::Gallery, "갤러리");
        if let BlockKind::Gallery {
            ref mut gallery_images,
            ..
        } = block.kind
        {
            gallery_images[0] = GallerySlot::filled("data:image/png;base64,AAAA");
        }

        let json = serde_json::to_value(&block).expect("serialize");
        assert_eq!(json["type"], "gallery");
        assert_eq!(json["label"], "갤러리");
        assert_eq!(json["galleryCols"], 2);
        assert_eq!(json["galleryImages"][0]["url"], "data:image/png;base64,AAAA");
        assert_eq!(json["galleryImages"][1]["url"], "");
        assert_eq!(json["galleryAspectRatio"], "3/4");
    }

    #[test]
    fn test_gallery_cols_rejects_out_of_range() {
        let result: Result<GalleryCols, _> = serde_json::from_value(serde_json::json!(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_reconcile_slots_pads_and_truncates() {
        let mut slots = vec![
            GallerySlot::filled("a"),
            GallerySlot::default(),
            GallerySlot::filled("c"),
        ];
        reconcile_slots(&mut slots, 6);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].url, "a");
        assert_eq!(slots[2].url, "c");
        assert!(!slots[5].is_filled());

        reconcile_slots(&mut slots, 2);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].url, "a");
        assert_eq!(slots[1].url, "");
    }

    #[test]
    fn test_reconcile_slots_idempotent() {
        let mut once = vec![GallerySlot::filled("a"), GallerySlot::filled("b")];
        reconcile_slots(&mut once, 8);
        let mut twice = once.clone();
        reconcile_slots(&mut twice, 8);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_couple_props_serialized_under_props() {
        let mut block = Block::new(BlockType::Couple, "신랑신부");
        if let BlockKind::Couple { ref mut props } = block.kind {
            props.groom_name = Some("김철수".to_string());
        }
        let json = serde_json::to_value(&block).expect("serialize");
        assert_eq!(json["props"]["groomName"], "김철수");
        assert!(json["props"].get("brideName").is_none());
    }
}
