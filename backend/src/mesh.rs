//! Display-mesh tessellation for stored torus primitives.
//!
//! Turns a `CircularTorus` row into an indexed triangle mesh for
//! rendering or export. Segment counts are derived from a chord
//! deflection tolerance against the main sweep radius and the tube
//! radius. A torus whose start and end tube radii differ is meshed
//! with a fixed angular step and the tube radius interpolated per
//! ring along the sweep.

use std::f64::consts::PI;
use std::io::{self, Write};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::db::model_models::CircularTorus;
use crate::types::Point;

/// Tolerance for treating radii as equal and a sweep as a full circle.
pub const EPSILON: f64 = 1e-5;

/// Default chord deflection for segment-count selection.
pub const DEFAULT_DEFLECTION: f64 = 0.5;

/// Angular step used when the tube radius varies along the sweep.
const DEFAULT_INC_ANGLE: f64 = 10.0 * PI / 180.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("normal vector must be non-zero")]
    ZeroNormal,
    #[error("start point must not coincide with center")]
    ZeroMainRadius,
    #[error("sweep angle must be positive, got {0}")]
    NonPositiveAngle(f64),
}

/// Which end caps to generate for a partial sweep. A full torus closes
/// on itself and never has caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TorusEnds {
    pub start: bool,
    pub end: bool,
}

impl Default for TorusEnds {
    fn default() -> Self {
        TorusEnds { start: true, end: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point>,
    pub normals: Vec<Point>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    fn push_vertex(&mut self, vertex: Point, normal: Point) -> u32 {
        self.vertices.push(vertex);
        self.normals.push(normal);
        (self.vertices.len() - 1) as u32
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    /// Writes the mesh in Wavefront OBJ format, one `v`/`vn` pair per
    /// vertex and `f` faces referencing both.
    pub fn write_obj<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for v in &self.vertices {
            writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for n in &self.normals {
            writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for t in &self.triangles {
            // OBJ indices are 1-based
            writeln!(
                w,
                "f {0}//{0} {1}//{1} {2}//{2}",
                t[0] + 1,
                t[1] + 1,
                t[2] + 1
            )?;
        }
        Ok(())
    }
}

/// Number of sweep steps so that no chord deviates from the arc by more
/// than `deflection`. Falls back to a quarter of the arc when the
/// tolerance exceeds the radius itself.
fn deflection_step_count(radius: f64, arc: f64, deflection: f64) -> usize {
    let inc = if deflection > radius {
        arc / 4.0
    } else {
        2.0 * ((radius - deflection) / radius).acos()
    };
    ((arc / inc).ceil() as usize).max(1)
}

/// Tessellates one stored torus record.
///
/// `deflection` bounds the chord error of the generated facets for a
/// uniform tube; `ends` selects the flat caps of a partial sweep.
/// The stored record itself is not validated beyond what the
/// tessellation cannot proceed from: a zero normal, a start point on
/// the center, or a non-positive sweep angle.
pub fn circular_torus_mesh(
    torus: &CircularTorus,
    deflection: f64,
    ends: TorusEnds,
) -> Result<TriangleMesh, MeshError> {
    let axis = torus.normal();
    if axis.length() < EPSILON {
        return Err(MeshError::ZeroNormal);
    }

    let center = torus.center();
    let main_vec = torus.start_pnt() - center;
    let main_len = main_vec.length();
    if main_len < EPSILON {
        return Err(MeshError::ZeroMainRadius);
    }

    let mut angle = torus.angle;
    if angle <= EPSILON {
        return Err(MeshError::NonPositiveAngle(torus.angle));
    }
    let is_full = (angle - 2.0 * PI).abs() < EPSILON;
    if is_full {
        angle = 2.0 * PI;
    }

    let axis_n = axis.normalized();
    let tapered = (torus.start_radius - torus.end_radius).abs() >= EPSILON;

    let (main_count, sub_count) = if tapered {
        (
            ((angle / DEFAULT_INC_ANGLE).ceil() as usize).max(1),
            ((2.0 * PI / DEFAULT_INC_ANGLE).round() as usize).max(3),
        )
    } else {
        // The outermost fibre of the tube sweeps the largest circle;
        // it bounds the chord error of the sweep direction.
        let outer_radius = main_len + torus.start_radius;
        (
            deflection_step_count(outer_radius, angle, deflection),
            deflection_step_count(torus.start_radius, 2.0 * PI, deflection).max(3),
        )
    };

    let main_inc = angle / main_count as f64;
    let sub_inc = 2.0 * PI / sub_count as f64;

    // Tube radius change per unit of arc length, tilting the surface
    // normals of a tapered tube along the direction of travel.
    let slope = if tapered {
        (torus.end_radius - torus.start_radius) / (angle * main_len)
    } else {
        0.0
    };

    let ring_total = if is_full { main_count } else { main_count + 1 };

    let mut mesh = TriangleMesh::default();

    // Tube cross-section rings along the sweep.
    for i in 0..ring_total {
        let theta = main_inc * i as f64;
        let spoke = main_vec.rotated_about(axis_n, theta);
        let ring_center = center + spoke;
        let radial = spoke.normalized();
        let tangent = axis_n.cross(radial).normalized();
        let binormal = tangent.cross(radial).normalized();
        let ring_radius =
            torus.start_radius + (torus.end_radius - torus.start_radius) * i as f64 / main_count as f64;

        for j in 0..sub_count {
            let phi = sub_inc * j as f64;
            let dir = radial.scaled(phi.cos()) + binormal.scaled(phi.sin());
            let vertex = ring_center + dir.scaled(ring_radius);
            let normal = (dir - tangent.scaled(slope)).normalized();
            mesh.push_vertex(vertex, normal);
        }
    }

    let ring_index = |i: usize, j: usize| -> u32 { (i * sub_count + j) as u32 };

    for i in 0..main_count {
        let i_next = if is_full { (i + 1) % main_count } else { i + 1 };
        for j in 0..sub_count {
            let j_next = (j + 1) % sub_count;
            let v00 = ring_index(i, j);
            let v01 = ring_index(i, j_next);
            let v10 = ring_index(i_next, j);
            let v11 = ring_index(i_next, j_next);
            mesh.push_triangle(v00, v01, v11);
            mesh.push_triangle(v00, v11, v10);
        }
    }

    if !is_full {
        if ends.start {
            add_cap(&mut mesh, torus, axis_n, main_vec, 0.0, torus.start_radius, true, sub_count, sub_inc);
        }
        if ends.end {
            add_cap(&mut mesh, torus, axis_n, main_vec, angle, torus.end_radius, false, sub_count, sub_inc);
        }
    }

    Ok(mesh)
}

/// Flat triangle fan closing one cross-section of a partial sweep.
/// Cap vertices are duplicated so the cap can carry its own flat normal.
#[allow(clippy::too_many_arguments)]
fn add_cap(
    mesh: &mut TriangleMesh,
    torus: &CircularTorus,
    axis_n: Point,
    main_vec: Point,
    theta: f64,
    ring_radius: f64,
    is_start: bool,
    sub_count: usize,
    sub_inc: f64,
) {
    let spoke = main_vec.rotated_about(axis_n, theta);
    let ring_center = torus.center() + spoke;
    let radial = spoke.normalized();
    let tangent = axis_n.cross(radial).normalized();
    let binormal = tangent.cross(radial).normalized();

    // The start cap faces against the sweep direction, the end cap with it.
    let cap_normal = if is_start { -tangent } else { tangent };

    let center_idx = mesh.push_vertex(ring_center, cap_normal);
    let mut rim = Vec::with_capacity(sub_count);
    for j in 0..sub_count {
        let phi = sub_inc * j as f64;
        let dir = radial.scaled(phi.cos()) + binormal.scaled(phi.sin());
        rim.push(mesh.push_vertex(ring_center + dir * ring_radius, cap_normal));
    }

    for j in 0..sub_count {
        let j_next = (j + 1) % sub_count;
        if is_start {
            mesh.push_triangle(center_idx, rim[j_next], rim[j]);
        } else {
            mesh.push_triangle(center_idx, rim[j], rim[j_next]);
        }
    }
}
