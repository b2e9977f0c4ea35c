//! Property-style tests over the canvas core.

use proptest::prelude::*;

use invite_core::{
    catalog, reconcile_slots, transfer, AspectRatio, Block, BlockKind, BlockType, Canvas,
    CoupleInfo, GalleryCols, GallerySlot, ImageSize, ObjectPosition, ThumbSize,
};

fn arb_block_type() -> impl Strategy<Value = BlockType> {
    prop::sample::select(BlockType::ALL.to_vec())
}

fn arb_aspect_ratio() -> impl Strategy<Value = AspectRatio> {
    prop::sample::select(vec![
        AspectRatio::Square,
        AspectRatio::ThreeFour,
        AspectRatio::TwoThree,
        AspectRatio::FourThree,
        AspectRatio::SixteenNine,
    ])
}

fn arb_slot() -> impl Strategy<Value = GallerySlot> {
    (
        prop::option::of("[a-z0-9]{1,24}"),
        prop::option::of("[가-힣a-z ]{0,12}"),
        prop::option::of(arb_aspect_ratio()),
    )
        .prop_map(|(url, caption, aspect_ratio)| GallerySlot {
            url: url.map(|u| format!("data:image/png;base64,{u}")).unwrap_or_default(),
            caption,
            aspect_ratio,
        })
}

fn arb_couple() -> impl Strategy<Value = CoupleInfo> {
    (
        prop::option::of("[가-힣]{1,4}"),
        prop::option::of("[가-힣]{1,6}"),
        prop::option::of("010-[0-9]{4}-[0-9]{4}"),
        prop::option::of("[가-힣]{1,4}"),
        prop::option::of("[가-힣]{1,6}"),
        prop::option::of("010-[0-9]{4}-[0-9]{4}"),
    )
        .prop_map(
            |(groom_name, groom_parents, groom_phone, bride_name, bride_parents, bride_phone)| {
                CoupleInfo {
                    groom_name,
                    groom_parents,
                    groom_phone,
                    bride_name,
                    bride_parents,
                    bride_phone,
                }
            },
        )
}

fn arb_kind() -> impl Strategy<Value = BlockKind> {
    let content = prop::option::of("[가-힣a-zA-Z0-9 .,!-]{0,40}");
    prop_oneof![
        content.clone().prop_map(|content| BlockKind::Text { content }),
        (
            prop::option::of("[a-z0-9]{1,32}"),
            prop::sample::select(vec![ImageSize::Small, ImageSize::Medium, ImageSize::Large]),
        )
            .prop_map(|(url, image_size)| BlockKind::Image {
                image_url: url.map(|u| format!("data:image/jpeg;base64,{u}")),
                image_size,
            }),
        content.clone().prop_map(|content| BlockKind::Date { content }),
        content
            .clone()
            .prop_map(|content| BlockKind::Location { content }),
        arb_couple().prop_map(|props| BlockKind::Couple { props }),
        (
            prop::collection::vec(arb_slot(), 0..12),
            prop::sample::select(vec![GalleryCols::Two, GalleryCols::Three]),
            prop::sample::select(vec![ThumbSize::Small, ThumbSize::Medium, ThumbSize::Large]),
            prop::sample::select(vec![
                ObjectPosition::Top,
                ObjectPosition::Center,
                ObjectPosition::Bottom,
                ObjectPosition::Left,
                ObjectPosition::Right,
            ]),
            arb_aspect_ratio(),
        )
            .prop_map(
                |(gallery_images, gallery_cols, gallery_thumb_size, gallery_object_position, gallery_aspect_ratio)| {
                    BlockKind::Gallery {
                        gallery_images,
                        gallery_cols,
                        gallery_thumb_size,
                        gallery_object_position,
                        gallery_aspect_ratio,
                    }
                }
            ),
        Just(BlockKind::Video {}),
        content
            .prop_map(|content| BlockKind::Countdown { content }),
        Just(BlockKind::Guestbook {}),
        Just(BlockKind::Timeline {}),
        Just(BlockKind::Account {}),
        Just(BlockKind::Background {}),
        Just(BlockKind::Divider {}),
    ]
}

fn arb_block() -> impl Strategy<Value = Block> {
    arb_kind().prop_map(|kind| {
        let block_type = kind.block_type();
        let mut block = Block::new(block_type, catalog::label_for(block_type));
        block.kind = kind;
        block
    })
}

proptest! {
    /// `decode(encode(S))` is structurally equal to S for all
    /// reachable sequences, nested gallery slots and couple props
    /// included.
    #[test]
    fn transfer_round_trip(blocks in prop::collection::vec(arb_block(), 0..8)) {
        let payload = transfer::encode(&blocks).expect("encode");
        let restored = transfer::decode(&payload).expect("decode");
        prop_assert_eq!(blocks, restored);
    }

    /// The durable JSON form round-trips the same way.
    #[test]
    fn durable_json_round_trip(blocks in prop::collection::vec(arb_block(), 0..8)) {
        let json = serde_json::to_string(&blocks).expect("serialize");
        let restored: Vec<Block> = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(blocks, restored);
    }

    /// Insert then remove at the same index is the identity, given no
    /// other intervening mutation.
    #[test]
    fn insert_remove_inverse(
        types in prop::collection::vec(arb_block_type(), 0..8),
        insert_type in arb_block_type(),
        raw_index in 0usize..16,
    ) {
        let mut canvas = Canvas::new();
        for t in &types {
            let len = canvas.len();
            canvas.insert(*t, catalog::label_for(*t), len);
        }
        let before: Vec<_> = canvas.blocks().iter().map(|b| b.id.clone()).collect();

        let at = raw_index.min(canvas.len());
        canvas.insert(insert_type, catalog::label_for(insert_type), at);
        canvas.remove_at(at).expect("remove inserted");

        let after: Vec<_> = canvas.blocks().iter().map(|b| b.id.clone()).collect();
        prop_assert_eq!(before, after);
    }

    /// N inserts yield N pairwise-distinct ids, even within the same
    /// millisecond.
    #[test]
    fn ids_pairwise_distinct(types in prop::collection::vec(arb_block_type(), 1..32)) {
        let mut canvas = Canvas::new();
        for t in types {
            canvas.insert(t, catalog::label_for(t), 0);
        }
        let mut ids: Vec<_> = canvas.blocks().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), canvas.len());
    }

    /// Reconciling to a target length twice equals reconciling once.
    #[test]
    fn reconcile_idempotent(
        slots in prop::collection::vec(arb_slot(), 0..12),
        target in 0usize..16,
    ) {
        let mut once = slots;
        reconcile_slots(&mut once, target);
        let mut twice = once.clone();
        reconcile_slots(&mut twice, target);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.len(), target);
    }

    /// Filled slots survive reconciliation by position up to the
    /// smaller of the two lengths.
    #[test]
    fn reconcile_preserves_prefix(
        slots in prop::collection::vec(arb_slot(), 0..12),
        target in 0usize..16,
    ) {
        let mut reconciled = slots.clone();
        reconcile_slots(&mut reconciled, target);
        let kept = slots.len().min(target);
        prop_assert_eq!(&reconciled[..kept], &slots[..kept]);
    }
}
