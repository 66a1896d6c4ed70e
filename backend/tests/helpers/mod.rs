use tempfile::TempDir;

use modelstore_backend::db::DatabaseHandle;
use modelstore_backend::db::model_models::NewCircularTorus;
use modelstore_backend::types::Point;

pub struct TestStore {
    // Held so the store directory outlives the handle.
    #[allow(dead_code)]
    pub dir: TempDir,
    pub db: DatabaseHandle,
}

pub fn open_test_store() -> TestStore {
    let dir = tempfile::tempdir().expect("Can't create temp dir");
    let db_path = dir.path().join("model.sqlite3");
    let db = DatabaseHandle::open(&db_path).expect("Can't open test db");
    TestStore { dir, db }
}

/// The reference record: Center=(1,2,3), StartPnt=(4,5,6), Normal=(0,0,1),
/// radii 2.0/5.0, angle 90.0, color 0xFF0000.
#[allow(dead_code)]
pub fn sample_torus() -> NewCircularTorus {
    NewCircularTorus::from_parts(
        Point::new(1.0, 2.0, 3.0),
        Point::new(4.0, 5.0, 6.0),
        Point::new(0.0, 0.0, 1.0),
        2.0,
        5.0,
        90.0,
        0xFF0000,
    )
}
