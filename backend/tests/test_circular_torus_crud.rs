mod helpers;
use helpers as h;

use modelstore_backend::types::Point;

#[test]
fn test_round_trip_assigns_id_and_preserves_fields() {
    let store = h::open_test_store();
    let new_torus = h::sample_torus();

    let inserted = store.db.insert_circular_torus(&new_torus)
        .expect("Insert failed");
    assert!(inserted.id > 0, "Expected a storage-assigned id, got {}", inserted.id);

    let loaded = store.db.get_circular_torus(inserted.id)
        .expect("Record not found after insert");

    assert_eq!(loaded, inserted);
    assert_eq!(loaded.center(), Point::new(1.0, 2.0, 3.0));
    assert_eq!(loaded.start_pnt(), Point::new(4.0, 5.0, 6.0));
    assert_eq!(loaded.normal(), Point::new(0.0, 0.0, 1.0));
    assert_eq!(loaded.start_radius, 2.0);
    assert_eq!(loaded.end_radius, 5.0);
    assert_eq!(loaded.angle, 90.0);
    assert_eq!(loaded.color, 0xFF0000);
}

#[test]
fn test_update_changes_only_the_changed_field_group() {
    let store = h::open_test_store();
    let inserted = store.db.insert_circular_torus(&h::sample_torus())
        .expect("Insert failed");

    let mut torus = store.db.get_circular_torus(inserted.id).unwrap();
    torus.set_start_pnt(Point::new(7.0, 8.0, 9.0));
    store.db.update_circular_torus(&torus).expect("Update failed");

    let reloaded = store.db.get_circular_torus(inserted.id).unwrap();
    assert_eq!(reloaded.start_pnt(), Point::new(7.0, 8.0, 9.0));
    // The other point groups and scalar columns are untouched.
    assert_eq!(reloaded.center(), inserted.center());
    assert_eq!(reloaded.normal(), inserted.normal());
    assert_eq!(reloaded.start_radius, inserted.start_radius);
    assert_eq!(reloaded.end_radius, inserted.end_radius);
    assert_eq!(reloaded.angle, inserted.angle);
    assert_eq!(reloaded.color, inserted.color);
}

#[test]
fn test_id_stable_across_updates() {
    let store = h::open_test_store();
    let inserted = store.db.insert_circular_torus(&h::sample_torus())
        .expect("Insert failed");

    let mut torus = store.db.get_circular_torus(inserted.id).unwrap();
    torus.angle = 180.0;
    store.db.update_circular_torus(&torus).expect("First update failed");

    let mut torus = store.db.get_circular_torus(inserted.id).unwrap();
    torus.color = 0x00FF00;
    torus.set_center(Point::new(-1.0, -2.0, -3.0));
    store.db.update_circular_torus(&torus).expect("Second update failed");

    let reloaded = store.db.get_circular_torus(inserted.id).unwrap();
    assert_eq!(reloaded.id, inserted.id);
    assert_eq!(reloaded.angle, 180.0);
    assert_eq!(reloaded.color, 0x00FF00);
    assert_eq!(store.db.count_circular_toruses(), 1);
}

#[test]
fn test_update_of_missing_row_errors() {
    let store = h::open_test_store();
    let mut torus = store.db.insert_circular_torus(&h::sample_torus())
        .expect("Insert failed");
    assert!(store.db.delete_circular_torus(torus.id).unwrap());

    torus.angle = 45.0;
    assert!(store.db.update_circular_torus(&torus).is_err());
}

#[test]
fn test_delete_removes_only_the_given_row() {
    let store = h::open_test_store();
    let first = store.db.insert_circular_torus(&h::sample_torus()).unwrap();
    let second = store.db.insert_circular_torus(&h::sample_torus()).unwrap();
    let third = store.db.insert_circular_torus(&h::sample_torus()).unwrap();

    assert!(store.db.delete_circular_torus(second.id).unwrap());
    assert!(store.db.get_circular_torus(second.id).is_none());
    assert!(store.db.get_circular_torus(first.id).is_some());
    assert!(store.db.get_circular_torus(third.id).is_some());

    // Deleting again reports that nothing was removed.
    assert!(!store.db.delete_circular_torus(second.id).unwrap());
    assert_eq!(store.db.count_circular_toruses(), 2);
}

#[test]
fn test_insert_sequence_ids_increase() {
    let store = h::open_test_store();
    let mut prev_id = 0;
    for _ in 0..5 {
        let torus = store.db.insert_circular_torus(&h::sample_torus()).unwrap();
        assert!(torus.id > prev_id, "Ids should increase: {} then {}", prev_id, torus.id);
        prev_id = torus.id;
    }

    let items = store.db.get_circular_toruses();
    assert_eq!(items.len(), 5);
    let ids: Vec<i32> = items.iter().map(|t| t.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted, "Listing is ordered by id");
}

#[test]
fn test_get_missing_record_is_none() {
    let store = h::open_test_store();
    assert!(store.db.get_circular_torus(12345).is_none());
    assert_eq!(store.db.count_circular_toruses(), 0);
    assert!(store.db.get_circular_toruses().is_empty());
}
