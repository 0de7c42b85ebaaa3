//! Proxy mesh loading.
//!
//! Only the bounds of the proxy surface matter to the planner, so the PLY
//! reader keeps the `x`, `y` and `z` properties of the `vertex` element and
//! ignores faces and any other data.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use u_flight_core::{Aabb3D, Error, Result};

/// Loads a PLY mesh (ASCII or binary) and returns the bounds of its vertices.
///
/// # Errors
///
/// `Error::MeshLoad` if the file cannot be opened or parsed, has no
/// vertices, or has a vertex with a missing or non-finite coordinate.
pub fn load_ply_aabb<P: AsRef<Path>>(path: P) -> Result<Aabb3D> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::MeshLoad(format!("cannot open {}: {}", path.display(), e)))?;
    let aabb = read_ply_aabb(BufReader::new(file))?;
    log::debug!(
        "Proxy mesh {}: min ({:.3}, {:.3}, {:.3}) max ({:.3}, {:.3}, {:.3})",
        path.display(),
        aabb.min.x,
        aabb.min.y,
        aabb.min.z,
        aabb.max.x,
        aabb.max.y,
        aabb.max.z
    );
    Ok(aabb)
}

/// Reads a PLY stream and returns the bounds of its vertices.
pub fn read_ply_aabb<R: Read>(mut reader: R) -> Result<Aabb3D> {
    let ply = Parser::<DefaultElement>::new()
        .read_ply(&mut reader)
        .map_err(|e| Error::MeshLoad(format!("invalid PLY data: {}", e)))?;

    let vertices = ply
        .payload
        .get("vertex")
        .ok_or_else(|| Error::MeshLoad("no vertex element".to_string()))?;

    let mut points = Vec::with_capacity(vertices.len());
    for (i, vertex) in vertices.iter().enumerate() {
        let coord = |name: &str| {
            vertex
                .get(name)
                .and_then(scalar)
                .ok_or_else(|| Error::MeshLoad(format!("vertex {} has no numeric '{}'", i, name)))
        };
        points.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    if points.is_empty() {
        return Err(Error::MeshLoad("mesh has no vertices".to_string()));
    }
    log::debug!("Read {} proxy mesh vertices", points.len());

    Aabb3D::from_points(points)
        .ok_or_else(|| Error::MeshLoad("mesh has non-finite vertices".to_string()))
}

fn scalar(property: &Property) -> Option<f64> {
    match *property {
        Property::Char(v) => Some(f64::from(v)),
        Property::UChar(v) => Some(f64::from(v)),
        Property::Short(v) => Some(f64::from(v)),
        Property::UShort(v) => Some(f64::from(v)),
        Property::Int(v) => Some(f64::from(v)),
        Property::UInt(v) => Some(f64::from(v)),
        Property::Float(v) => Some(f64::from(v)),
        Property::Double(v) => Some(v),
        _ => None,
    }
}
