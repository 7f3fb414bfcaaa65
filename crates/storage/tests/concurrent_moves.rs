#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use tempfile::TempDir;
use ts_core::model::CollectionKind;
use ts_core::order::is_dense;
use ts_storage::{AppendRequest, ItemContent, MoveRequest, ScopeRef, SqliteStore};

fn hero() -> ScopeRef {
    ScopeRef::global(CollectionKind::HeroStep)
}

#[test]
fn overlapping_moves_from_two_connections_keep_the_scope_dense() {
    let dir = TempDir::new().expect("temp dir");
    let ids = {
        let mut store = SqliteStore::open(dir.path()).expect("open store");
        (0..6)
            .map(|index| {
                store
                    .ordered_append(AppendRequest {
                        scope: hero(),
                        content: ItemContent::titled(format!("Step {index}"), "خطوة"),
                        expected_revision: None,
                    })
                    .expect("append")
                    .item
                    .id
            })
            .collect::<Vec<_>>()
    };

    let barrier = Arc::new(Barrier::new(2));
    let editors = (0..2)
        .map(|editor| {
            let path = dir.path().to_path_buf();
            let ids = ids.clone();
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                let mut store = SqliteStore::open(&path).expect("open store");
                barrier.wait();
                for round in 0..25usize {
                    let id = ids[(round + editor * 3) % ids.len()].clone();
                    let to = ((round * 7 + editor) % ids.len()) as i64;
                    store
                        .ordered_move(MoveRequest {
                            scope: hero(),
                            id,
                            from: None,
                            to,
                            expected_revision: None,
                        })
                        .expect("move");
                }
            })
        })
        .collect::<Vec<_>>();
    for editor in editors {
        editor.join().expect("editor thread");
    }

    let store = SqliteStore::open(dir.path()).expect("open store");
    let listing = store.ordered_list(&hero()).expect("list");
    assert_eq!(listing.items.len(), ids.len());
    assert!(is_dense(listing.items.iter().map(|item| item.order)));
    assert_eq!(listing.revision, 6 + 50);
}

#[test]
fn listings_pair_items_with_their_own_revision_while_another_connection_appends() {
    let dir = TempDir::new().expect("temp dir");
    SqliteStore::open(dir.path()).expect("create store");

    let done = Arc::new(AtomicBool::new(false));
    let writer = {
        let path = dir.path().to_path_buf();
        let done = Arc::clone(&done);
        std::thread::spawn(move || {
            let mut store = SqliteStore::open(&path).expect("open store");
            for index in 0..60 {
                store
                    .ordered_append(AppendRequest {
                        scope: hero(),
                        content: ItemContent::titled(format!("Step {index}"), "خطوة"),
                        expected_revision: None,
                    })
                    .expect("append");
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    // Appends are the only writes, so every snapshot has exactly one revision per item.
    let reader = SqliteStore::open(dir.path()).expect("open store");
    let mut listings = 0usize;
    while !done.load(Ordering::SeqCst) || listings == 0 {
        let listing = reader.ordered_list(&hero()).expect("list");
        assert_eq!(listing.revision, listing.items.len() as i64);
        assert!(is_dense(listing.items.iter().map(|item| item.order)));
        listings += 1;
    }
    writer.join().expect("writer thread");

    let listing = reader.ordered_list(&hero()).expect("list");
    assert_eq!(listing.items.len(), 60);
    assert_eq!(listing.revision, 60);
}
