use chrono::{NaiveDate, NaiveTime};
use planner_core::fixtures::{AMAZING_GRACE_BLOCK, SUNDAY_MORNING, WELCOME_BLOCK};
use planner_core::{
    BlockKind, BlockPatch, ChangeKind, NewBlock, NewService, PlannerStore, ReferencePolicy,
    Service, ServiceId, ServicePatch, StoreChange, StoreError, ValidationError,
};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn empty_service(store: &mut PlannerStore) -> ServiceId {
    store
        .add_service(NewService::new(
            "Evening Prayer",
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        ))
        .unwrap()
}

fn titles(service: &Service) -> Vec<&str> {
    service.blocks.iter().map(|block| block.title.as_str()).collect()
}

fn assert_contiguous(service: &Service) {
    let orders: Vec<u32> = service.blocks.iter().map(|block| block.order).collect();
    let expected: Vec<u32> = (1..=service.blocks.len() as u32).collect();
    assert_eq!(orders, expected, "run-sheet order is not 1..=N");
}

fn abc(store: &mut PlannerStore) -> ServiceId {
    let service_id = empty_service(store);
    for title in ["A", "B", "C"] {
        store
            .add_block(service_id, NewBlock::custom(title))
            .unwrap()
            .unwrap();
    }
    service_id
}

#[test]
fn order_stays_contiguous_through_inserts_deletes_and_moves() {
    let mut store = PlannerStore::new(ReferencePolicy::Retain);
    let service_id = empty_service(&mut store);

    let mut ids = Vec::new();
    for title in ["Call to Worship", "Song 1", "Song 2", "Sermon", "Benediction"] {
        ids.push(
            store
                .add_block(service_id, NewBlock::custom(title))
                .unwrap()
                .unwrap(),
        );
        assert_contiguous(store.service(service_id).unwrap());
    }

    assert!(store.delete_block(service_id, ids[1]));
    assert_contiguous(store.service(service_id).unwrap());
    assert!(store.move_block(service_id, 3, 0));
    assert_contiguous(store.service(service_id).unwrap());
    assert!(store.delete_block(service_id, ids[0]));
    assert_contiguous(store.service(service_id).unwrap());

    assert_eq!(
        titles(store.service(service_id).unwrap()),
        vec!["Benediction", "Song 2", "Sermon"]
    );
}

#[test]
fn moving_first_to_last_shifts_the_rest_up() {
    let mut store = PlannerStore::new(ReferencePolicy::Retain);
    let service_id = abc(&mut store);

    assert!(store.move_block(service_id, 0, 2));

    let service = store.service(service_id).unwrap();
    assert_eq!(titles(service), vec!["B", "C", "A"]);
    let orders: Vec<u32> = service.blocks.iter().map(|block| block.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[test]
fn equal_or_out_of_range_indices_leave_the_run_sheet_alone() {
    let mut store = PlannerStore::new(ReferencePolicy::Retain);
    let service_id = abc(&mut store);
    let before = store.service(service_id).unwrap().clone();
    let revision = store.revision();

    assert!(!store.move_block(service_id, 1, 1));
    assert!(!store.move_block(service_id, 0, 3));
    assert!(!store.move_block(Uuid::new_v4(), 0, 1));

    assert_eq!(store.service(service_id).unwrap(), &before);
    assert_eq!(store.revision(), revision);
}

#[test]
fn deleting_an_absent_block_is_a_no_op() {
    let mut store = PlannerStore::with_fixtures(ReferencePolicy::Retain).unwrap();
    let before = store.service(SUNDAY_MORNING).unwrap().clone();

    assert!(!store.delete_block(SUNDAY_MORNING, Uuid::new_v4()));
    assert!(!store.delete_block(Uuid::new_v4(), WELCOME_BLOCK));

    assert_eq!(store.service(SUNDAY_MORNING).unwrap(), &before);
    assert_eq!(store.revision(), 0);
}

#[test]
fn drag_and_drop_moves_by_block_id() {
    let mut store = PlannerStore::with_fixtures(ReferencePolicy::Retain).unwrap();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    store.subscribe(Arc::new(move |change: &StoreChange| {
        sink.lock().unwrap().push(change.kind);
    }));

    assert!(!store.move_block_by_id(SUNDAY_MORNING, WELCOME_BLOCK, WELCOME_BLOCK));
    assert!(store.move_block_by_id(SUNDAY_MORNING, AMAZING_GRACE_BLOCK, WELCOME_BLOCK));

    let service = store.service(SUNDAY_MORNING).unwrap();
    assert_eq!(service.blocks[0].id, AMAZING_GRACE_BLOCK);
    assert_eq!(service.blocks[0].order, 1);
    assert_eq!(service.blocks[1].id, WELCOME_BLOCK);
    assert_eq!(service.blocks[1].order, 2);
    assert_eq!(*changes.lock().unwrap(), vec![ChangeKind::BlocksReordered]);
}

#[test]
fn placeholder_blocks_use_default_titles() {
    let mut store = PlannerStore::new(ReferencePolicy::Retain);
    let service_id = empty_service(&mut store);

    store
        .add_block(service_id, NewBlock::placeholder(BlockKind::Song))
        .unwrap();
    store
        .add_block(service_id, NewBlock::placeholder(BlockKind::Custom))
        .unwrap();

    let service = store.service(service_id).unwrap();
    assert_eq!(titles(service), vec!["Select Song", "New Block"]);
    assert!(store
        .add_block(Uuid::new_v4(), NewBlock::custom("Lost"))
        .unwrap()
        .is_none());
}

#[test]
fn block_update_keeps_position_and_validates() {
    let mut store = PlannerStore::with_fixtures(ReferencePolicy::Retain).unwrap();

    store
        .update_block(
            SUNDAY_MORNING,
            WELCOME_BLOCK,
            BlockPatch {
                title: Some("Welcome".to_string()),
                duration_minutes: Some(Some(7)),
                ..BlockPatch::default()
            },
        )
        .unwrap();
    let block = store
        .service(SUNDAY_MORNING)
        .unwrap()
        .block(WELCOME_BLOCK)
        .unwrap();
    assert_eq!(block.title, "Welcome");
    assert_eq!(block.order, 1);
    assert_eq!(block.duration_minutes, Some(7));

    let err = store
        .update_block(
            SUNDAY_MORNING,
            WELCOME_BLOCK,
            BlockPatch {
                song_id: Some(Some(Uuid::new_v4())),
                ..BlockPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(ValidationError::SongReferenceOnCustomBlock)
    );
}

#[test]
fn replacing_blocks_through_a_patch_renumbers_them() {
    let mut store = PlannerStore::with_fixtures(ReferencePolicy::Retain).unwrap();
    let mut blocks = store.service(SUNDAY_MORNING).unwrap().blocks.clone();
    blocks.reverse();
    for block in &mut blocks {
        block.order = 42;
    }

    store
        .update_service(
            SUNDAY_MORNING,
            ServicePatch {
                blocks: Some(blocks),
                ..ServicePatch::default()
            },
        )
        .unwrap();

    let service = store.service(SUNDAY_MORNING).unwrap();
    assert_contiguous(service);
    assert_eq!(service.blocks[0].id, AMAZING_GRACE_BLOCK);
}
