//! Grouping behaviour exercised through the async catalog API.

use curator_core::{Tag, TagKind, TagRole, Variant};
use curator_store::{
    get_variant, list_variants, move_tag, replace_variant_tags, split_group, Catalog, ErrorKind,
    MappingStore, MoveOutcome, SkuStore, StoreError, VariantStore,
};

struct Row<'a> {
    serial: i64,
    seller: &'a str,
    category: &'a str,
    brand: &'a str,
    tags: Vec<Tag>,
}

fn row<'a>(serial: i64, seller: &'a str, brand: &'a str, tags: Vec<Tag>) -> Row<'a> {
    Row {
        serial,
        seller,
        category: "TV",
        brand,
        tags,
    }
}

fn catalog(rows: Vec<Row<'_>>) -> Catalog {
    let mut store = VariantStore::new();
    for r in rows {
        let id = store.next_id().expect("id");
        store.put(Variant {
            id,
            serial_number: r.serial,
            seller: r.seller.to_string(),
            category: r.category.to_string(),
            brand: r.brand.to_string(),
            tags: r.tags,
            grouping_logic: "Screen size".to_string(),
        });
    }
    Catalog::from_stores(store, MappingStore::default(), SkuStore::default())
}

fn movable(text: &str) -> Tag {
    Tag::movable_product(text)
}

fn anchor(text: &str) -> Tag {
    Tag::new(text, TagKind::Product, TagRole::Anchor)
}

async fn owners_of(catalog: &Catalog, text: &str) -> Vec<(i64, usize)> {
    list_variants(catalog)
        .await
        .iter()
        .filter_map(|v| {
            let n = v.tags.iter().filter(|t| t.text == text).count();
            (n > 0).then_some((v.id, n))
        })
        .collect()
}

#[tokio::test]
async fn moving_onto_own_variant_is_invalid_and_changes_nothing() {
    let catalog = catalog(vec![row(
        1,
        "Westcoast",
        "Samsung",
        vec![movable("T1"), movable("T2")],
    )]);
    let before = list_variants(&catalog).await;

    let err = move_tag(&catalog, "T1", 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(list_variants(&catalog).await, before);
}

#[tokio::test]
async fn brand_mismatch_is_incompatible_and_tag_stays() {
    let catalog = catalog(vec![
        row(1, "X", "Z", vec![movable("T1")]),
        row(2, "X", "W", vec![]),
    ]);

    let err = move_tag(&catalog, "T1", 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleAttributes);
    assert!(matches!(
        err,
        StoreError::IncompatibleAttributes { from_id: 1, to_id: 2, .. }
    ));
    assert_eq!(owners_of(&catalog, "T1").await, vec![(1, 1)]);
}

#[tokio::test]
async fn category_mismatch_is_incompatible() {
    let mut rows = vec![
        row(1, "Westcoast", "Samsung", vec![movable("T1")]),
        row(2, "Westcoast", "Samsung", vec![]),
    ];
    rows[1].category = "Monitors";
    let catalog = catalog(rows);

    let err = move_tag(&catalog, "T1", 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleAttributes);
}

#[tokio::test]
async fn moving_text_already_on_target_is_a_noop() {
    let catalog = catalog(vec![
        row(1, "Westcoast", "Samsung", vec![movable("T1"), movable("T2")]),
        row(2, "Westcoast", "Samsung", vec![anchor("T1")]),
    ]);
    // Legacy wholesale updates can leave a text on two rows.
    let before = list_variants(&catalog).await;

    let report = move_tag(&catalog, "T1", 2).await.expect("noop succeeds");
    assert_eq!(report.outcome, MoveOutcome::AlreadyPresent);
    assert_eq!(list_variants(&catalog).await, before);
    assert_eq!(
        get_variant(&catalog, 2)
            .await
            .unwrap()
            .tags
            .iter()
            .filter(|t| t.text == "T1")
            .count(),
        1
    );
}

#[tokio::test]
async fn anchor_tag_is_never_moved_even_when_compatible() {
    let catalog = catalog(vec![
        row(1, "Westcoast", "Samsung", vec![anchor("R1")]),
        row(2, "Westcoast", "Samsung", vec![]),
        row(3, "Exertis", "Atp", vec![]),
    ]);

    for target in [2, 3] {
        let err = move_tag(&catalog, "R1", target).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
    assert_eq!(owners_of(&catalog, "R1").await, vec![(1, 1)]);
}

async fn anchors_of(catalog: &Catalog, text: &str) -> usize {
    list_variants(catalog)
        .await
        .iter()
        .flat_map(|v| v.tags.iter())
        .filter(|t| t.text == text && !t.is_movable())
        .count()
}

#[tokio::test]
async fn text_held_as_movable_and_anchor_cannot_be_moved() {
    let catalog = catalog(vec![
        row(
            1,
            "Westcoast",
            "Samsung",
            vec![movable("Q43"), movable("Q55"), anchor("Q55")],
        ),
        row(2, "Westcoast", "Samsung", vec![]),
    ]);
    let before = list_variants(&catalog).await;

    let err = move_tag(&catalog, "Q55", 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(err, StoreError::AnchorTag("Q55".to_string()));
    assert_eq!(list_variants(&catalog).await, before);
    assert_eq!(anchors_of(&catalog, "Q55").await, 1);
}

#[tokio::test]
async fn text_held_as_movable_and_anchor_cannot_be_split() {
    let catalog = catalog(vec![row(
        1,
        "Westcoast",
        "Samsung",
        vec![movable("Q55"), anchor("Q55")],
    )]);
    let before = list_variants(&catalog).await;

    let err = split_group(&catalog, 1, "Q55").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(list_variants(&catalog).await, before);
    assert_eq!(anchors_of(&catalog, "Q55").await, 1);
}

#[tokio::test]
async fn anchor_survives_after_sibling_tag_is_split_out() {
    let catalog = catalog(vec![row(
        1,
        "Westcoast",
        "Samsung",
        vec![movable("Q43"), movable("Q55"), anchor("Q55")],
    )]);

    let created = split_group(&catalog, 1, "Q43").await.expect("split").created;
    assert_eq!(created.tags, vec![movable("Q43")]);

    // The new group is compatible, but Q55 is pinned by its anchor entry.
    let err = move_tag(&catalog, "Q55", created.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(anchors_of(&catalog, "Q55").await, 1);
    assert_eq!(owners_of(&catalog, "Q55").await, vec![(1, 2)]);
    assert!(!get_variant(&catalog, created.id).await.unwrap().has_tag("Q55"));
}

#[tokio::test]
async fn split_creates_group_with_next_serial_number() {
    let catalog = catalog(vec![
        row(1, "Westcoast", "Samsung", vec![movable("t1"), movable("t2")]),
        row(2, "Westcoast", "Samsung", vec![]),
        row(3, "Exertis", "Atp", vec![]),
    ]);

    let report = split_group(&catalog, 1, "t1").await.expect("split");

    assert_eq!(report.source.tags, vec![movable("t2")]);
    assert_eq!(get_variant(&catalog, 1).await.unwrap().tags, vec![movable("t2")]);

    let created = report.created;
    assert_eq!(created.serial_number, 4);
    assert_eq!(created.id, 4);
    assert_eq!(created.seller, "Westcoast");
    assert_eq!(created.category, "TV");
    assert_eq!(created.brand, "Samsung");
    assert_eq!(created.grouping_logic, "Screen size");
    assert_eq!(created.tags, vec![movable("t1")]);
    assert_eq!(get_variant(&catalog, created.id).await.unwrap(), created);
}

#[tokio::test]
async fn successive_splits_never_reuse_serial_numbers() {
    let catalog = catalog(vec![row(
        7,
        "Westcoast",
        "Samsung",
        vec![movable("a"), movable("b")],
    )]);

    let first = split_group(&catalog, 1, "a").await.unwrap().created;
    let second = split_group(&catalog, 1, "b").await.unwrap().created;
    assert_eq!(first.serial_number, 8);
    assert_eq!(second.serial_number, 9);
    assert_ne!(first.id, second.id);

    // The emptied source row is kept.
    assert!(get_variant(&catalog, 1).await.unwrap().tags.is_empty());
    assert_eq!(list_variants(&catalog).await.len(), 3);
}

#[tokio::test]
async fn split_on_unknown_variant_is_not_found() {
    let catalog = catalog(vec![]);
    let err = split_group(&catalog, 3, "t1").await.unwrap_err();
    assert_eq!(err, StoreError::VariantNotFound(3));
    assert!(list_variants(&catalog).await.is_empty());
}

#[tokio::test]
async fn westcoast_scenario_moves_tag_between_matching_rows() {
    let catalog = catalog(vec![
        row(1, "Westcoast", "Samsung", vec![movable("T1")]),
        row(2, "Westcoast", "Samsung", vec![]),
    ]);

    let report = move_tag(&catalog, "T1", 2).await.expect("move");
    assert_eq!(report.outcome, MoveOutcome::Moved);
    assert!(get_variant(&catalog, 1).await.unwrap().tags.is_empty());
    assert_eq!(
        get_variant(&catalog, 2).await.unwrap().tags,
        vec![movable("T1")]
    );
}

#[tokio::test]
async fn seller_mismatch_scenario_is_rejected() {
    let catalog = catalog(vec![
        row(1, "Westcoast", "Samsung", vec![movable("T1")]),
        row(2, "Exertis", "Samsung", vec![]),
    ]);
    let before = list_variants(&catalog).await;

    assert!(move_tag(&catalog, "T1", 2).await.is_err());
    assert_eq!(list_variants(&catalog).await, before);
}

#[tokio::test]
async fn legacy_two_step_update_still_works() {
    let catalog = catalog(vec![
        row(1, "Westcoast", "Samsung", vec![movable("T1"), movable("T2")]),
        row(2, "Westcoast", "Samsung", vec![]),
    ]);

    replace_variant_tags(&catalog, 1, vec![movable("T2")])
        .await
        .unwrap();
    replace_variant_tags(&catalog, 2, vec![movable("T1")])
        .await
        .unwrap();
    assert_eq!(owners_of(&catalog, "T1").await, vec![(2, 1)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_never_duplicate_or_lose_a_tag() {
    let catalog = catalog(vec![
        row(1, "Westcoast", "Samsung", vec![movable("T1")]),
        row(2, "Westcoast", "Samsung", vec![]),
        row(3, "Westcoast", "Samsung", vec![]),
        row(4, "Westcoast", "Samsung", vec![]),
    ]);

    let movers = (0..200).map(|i| {
        let catalog = catalog.clone();
        tokio::spawn(async move {
            // Rejections (self-moves) are expected; state must stay consistent.
            let _ = move_tag(&catalog, "T1", (i % 4) + 1).await;
        })
    });

    let observer = {
        let catalog = catalog.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                let holders = owners_of(&catalog, "T1").await;
                assert_eq!(holders.len(), 1, "observed inconsistent state: {holders:?}");
                assert_eq!(holders[0].1, 1);
                tokio::task::yield_now().await;
            }
        })
    };

    for result in futures::future::join_all(movers).await {
        result.expect("mover task panicked");
    }
    observer.await.expect("observer saw an inconsistent state");

    let holders = owners_of(&catalog, "T1").await;
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].1, 1);
}
