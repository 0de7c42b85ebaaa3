//! Trajectory file I/O.
//!
//! A trajectory file is a flat sequence of fixed-size records, one per
//! waypoint in flight order, without a header. Each record stores 13
//! little-endian `f32` values:
//!
//! | Values | Content |
//! |--------|---------|
//! | 0..9   | Rotation, row-major |
//! | 9..12  | Translation |
//! | 12     | Focal length |
//!
//! The waypoint count is implied by the file length.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pose::{CameraPose, POSE_RECORD_LEN};
use crate::trajectory::Trajectory;

/// Size in bytes of one stored pose record.
pub const RECORD_BYTES: usize = POSE_RECORD_LEN * std::mem::size_of::<f32>();

/// Writes all poses of a trajectory as records.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &Trajectory) -> Result<()> {
    let mut buf = [0u8; RECORD_BYTES];
    for pose in trajectory {
        for (chunk, value) in buf.chunks_exact_mut(4).zip(pose.to_record()) {
            chunk.copy_from_slice(&(value as f32).to_le_bytes());
        }
        writer.write_all(&buf)?;
    }
    Ok(())
}

/// Reads records until the end of the stream.
pub fn read_trajectory<R: Read>(mut reader: R) -> Result<Trajectory> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    if data.len() % RECORD_BYTES != 0 {
        return Err(Error::Format(format!(
            "{} bytes is not a whole number of {}-byte records",
            data.len(),
            RECORD_BYTES
        )));
    }

    let mut trajectory = Trajectory::with_capacity(data.len() / RECORD_BYTES);
    for (index, bytes) in data.chunks_exact(RECORD_BYTES).enumerate() {
        let mut record = [0.0f64; POSE_RECORD_LEN];
        for (value, chunk) in record.iter_mut().zip(bytes.chunks_exact(4)) {
            let raw: [u8; 4] = chunk
                .try_into()
                .map_err(|_| Error::Format(format!("truncated record {}", index)))?;
            *value = f64::from(f32::from_le_bytes(raw));
        }

        let pose = CameraPose::from_record(&record);
        if !pose.is_finite() {
            return Err(Error::Format(format!(
                "record {} contains non-finite values",
                index
            )));
        }
        trajectory.push(pose);
    }

    Ok(trajectory)
}

/// Saves a trajectory to a file, replacing any existing content.
pub fn save_trajectory<P: AsRef<Path>>(trajectory: &Trajectory, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_trajectory(&mut writer, trajectory)?;
    writer.flush()?;
    log::debug!(
        "Wrote {} waypoints to {}",
        trajectory.len(),
        path.display()
    );
    Ok(())
}

/// Loads a trajectory from a file.
pub fn load_trajectory<P: AsRef<Path>>(path: P) -> Result<Trajectory> {
    let path = path.as_ref();
    let trajectory = read_trajectory(BufReader::new(File::open(path)?))?;
    log::debug!(
        "Read {} waypoints from {}",
        trajectory.len(),
        path.display()
    );
    Ok(trajectory)
}
