use diesel::prelude::*;
use anyhow::Result;

use crate::db::DatabaseHandle;
use crate::db::model_models::*;
use crate::logger::error;

pub type ModelDbHandle = DatabaseHandle;

impl ModelDbHandle {
    /// Inserts a new torus row and returns the stored record, including
    /// the id assigned by the storage engine.
    pub fn insert_circular_torus(&self, new_torus: &NewCircularTorus) -> Result<CircularTorus> {
        use crate::db::model_schema::circular_torus::dsl::*;

        self.do_write(|db_conn| {
            diesel::insert_into(circular_torus)
                .values(new_torus)
                .returning(CircularTorus::as_returning())
                .get_result(db_conn)
        })
    }

    pub fn get_circular_torus(&self, torus_id: i32) -> Option<CircularTorus> {
        use crate::db::model_schema::circular_torus::dsl::*;

        let torus = self.do_read(|db_conn| {
            circular_torus
                .filter(id.eq(torus_id))
                .select(CircularTorus::as_select())
                .first(db_conn)
                .optional()
        });

        match torus {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_circular_torus(): {}", e));
                None
            },
        }
    }

    pub fn get_circular_toruses(&self) -> Vec<CircularTorus> {
        use crate::db::model_schema::circular_torus::dsl::*;

        let result = self.do_read(|db_conn| {
            circular_torus
                .order(id.asc())
                .select(CircularTorus::as_select())
                .load(db_conn)
        });

        match result {
            Ok(items) => items,
            Err(e) => {
                error(&format!("get_circular_toruses(): {}", e));
                Vec::new()
            }
        }
    }

    /// All stored records as a JSON array, for export and UI consumers.
    pub fn get_circular_toruses_json(&self) -> String {
        let items = self.get_circular_toruses();
        serde_json::to_string(&items).expect("Can't encode JSON")
    }

    pub fn count_circular_toruses(&self) -> i64 {
        use crate::db::model_schema::circular_torus::dsl::*;

        let result = self.do_read(|db_conn| {
            circular_torus.count().get_result(db_conn)
        });

        match result {
            Ok(n) => n,
            Err(e) => {
                error(&format!("count_circular_toruses(): {}", e));
                0
            }
        }
    }

    /// Writes all non-id columns of the identified row back to the table.
    /// The id itself is never touched by an update.
    pub fn update_circular_torus(&self, torus: &CircularTorus) -> Result<()> {
        use crate::db::model_schema::circular_torus::dsl::*;

        let rows = self.do_write(|db_conn| {
            diesel::update(circular_torus.find(torus.id))
                .set(torus)
                .execute(db_conn)
        })?;

        if rows == 0 {
            anyhow::bail!("No circular_torus row with id {}", torus.id);
        }
        Ok(())
    }

    /// Removes the row. Returns false if no row had the given id.
    pub fn delete_circular_torus(&self, torus_id: i32) -> Result<bool> {
        use crate::db::model_schema::circular_torus::dsl::*;

        let rows = self.do_write(|db_conn| {
            diesel::delete(circular_torus.filter(id.eq(torus_id)))
                .execute(db_conn)
        })?;

        Ok(rows > 0)
    }
}
