use diesel::prelude::*;
use serde::{Serialize, Deserialize};

use crate::db::model_schema::*;
use crate::types::Point;

/// A circular torus primitive as stored in the model database.
///
/// The three point values (center, sweep start point, axis normal) are
/// flattened into one coordinate column group each, the `start_pnt_`
/// prefix keeping the start point's columns apart from the other two
/// groups. `id` is assigned by SQLite on insert and never changes for
/// the lifetime of the row.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, AsChangeset, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = circular_torus)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CircularTorus {
    pub id: i32,
    pub center_x: f64,
    pub center_y: f64,
    pub center_z: f64,
    pub start_pnt_x: f64,
    pub start_pnt_y: f64,
    pub start_pnt_z: f64,
    pub normal_x: f64,
    pub normal_y: f64,
    pub normal_z: f64,
    pub start_radius: f64,
    pub end_radius: f64,
    pub angle: f64,
    pub color: i32,
}

impl CircularTorus {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y, self.center_z)
    }

    pub fn set_center(&mut self, p: Point) {
        self.center_x = p.x;
        self.center_y = p.y;
        self.center_z = p.z;
    }

    pub fn start_pnt(&self) -> Point {
        Point::new(self.start_pnt_x, self.start_pnt_y, self.start_pnt_z)
    }

    pub fn set_start_pnt(&mut self, p: Point) {
        self.start_pnt_x = p.x;
        self.start_pnt_y = p.y;
        self.start_pnt_z = p.z;
    }

    pub fn normal(&self) -> Point {
        Point::new(self.normal_x, self.normal_y, self.normal_z)
    }

    pub fn set_normal(&mut self, p: Point) {
        self.normal_x = p.x;
        self.normal_y = p.y;
        self.normal_z = p.z;
    }
}

// Insertable struct for creating new records. Has no id field: the id
// exists only after a successful insert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = circular_torus)]
pub struct NewCircularTorus {
    pub center_x: f64,
    pub center_y: f64,
    pub center_z: f64,
    pub start_pnt_x: f64,
    pub start_pnt_y: f64,
    pub start_pnt_z: f64,
    pub normal_x: f64,
    pub normal_y: f64,
    pub normal_z: f64,
    pub start_radius: f64,
    pub end_radius: f64,
    pub angle: f64,
    pub color: i32,
}

impl NewCircularTorus {
    pub fn from_parts(
        center: Point,
        start_pnt: Point,
        normal: Point,
        start_radius: f64,
        end_radius: f64,
        angle: f64,
        color: i32,
    ) -> Self {
        Self {
            center_x: center.x,
            center_y: center.y,
            center_z: center.z,
            start_pnt_x: start_pnt.x,
            start_pnt_y: start_pnt.y,
            start_pnt_z: start_pnt.z,
            normal_x: normal.x,
            normal_y: normal.y,
            normal_z: normal.z,
            start_radius,
            end_radius,
            angle,
            color,
        }
    }
}
