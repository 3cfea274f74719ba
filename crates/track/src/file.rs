//! Track files and the save/load port.
//!
//! On-disk format (points only, edges are rebuilt on load):
//! ```text
//! {
//!   "points": [
//!     { "x": 120.0, "y": 900.0 },
//!     ...
//!   ]
//! }
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from reading or writing track files.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// One `{x, y}` record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for TrackPoint {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<TrackPoint> for Vec2 {
    fn from(p: TrackPoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Serialized form of a track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackFile {
    pub points: Vec<TrackPoint>,
}

impl TrackFile {
    pub fn from_points(points: &[Vec2]) -> Self {
        Self {
            points: points.iter().copied().map(TrackPoint::from).collect(),
        }
    }

    pub fn to_points(&self) -> Vec<Vec2> {
        self.points.iter().copied().map(Vec2::from).collect()
    }

    /// Reject coordinates that cannot be drawn or driven on.
    pub fn validate(&self) -> Result<(), TrackError> {
        match self
            .points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            Some(index) => Err(TrackError::NonFinite { index }),
            None => Ok(()),
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let file = std::fs::File::open(path.as_ref())?;
        let track: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        track.validate()?;
        Ok(track)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), TrackError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        serde_json::to_writer_pretty(std::fs::File::create(path.as_ref())?, self)?;
        Ok(())
    }
}

/// Where tracks are saved to and loaded from.
///
/// Stands in for whatever picks a file (a dialog, a fixed path, memory).
/// `Ok(None)` from either method means the user backed out; callers treat
/// it as a no-op.
pub trait TrackPort {
    /// Persist `track`, returning where it went.
    fn save(&mut self, track: &TrackFile) -> Result<Option<PathBuf>, TrackError>;

    /// Fetch a track to replace the current one.
    fn load(&mut self) -> Result<Option<TrackFile>, TrackError>;
}

/// Reads and writes one JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonTrackPort {
    path: PathBuf,
}

impl JsonTrackPort {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/default.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join("default.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackPort for JsonTrackPort {
    fn save(&mut self, track: &TrackFile) -> Result<Option<PathBuf>, TrackError> {
        track.write(&self.path)?;
        Ok(Some(self.path.clone()))
    }

    fn load(&mut self) -> Result<Option<TrackFile>, TrackError> {
        TrackFile::read(&self.path).map(Some)
    }
}

/// Keeps the last saved track in memory. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTrackPort {
    stored: Option<TrackFile>,
    cancel: bool,
}

impl MemoryTrackPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(track: TrackFile) -> Self {
        Self {
            stored: Some(track),
            cancel: false,
        }
    }

    /// A port whose every request is dismissed.
    pub fn cancelling() -> Self {
        Self {
            stored: None,
            cancel: true,
        }
    }

    pub fn stored(&self) -> Option<&TrackFile> {
        self.stored.as_ref()
    }
}

impl TrackPort for MemoryTrackPort {
    fn save(&mut self, track: &TrackFile) -> Result<Option<PathBuf>, TrackError> {
        if self.cancel {
            return Ok(None);
        }
        self.stored = Some(track.clone());
        Ok(Some(PathBuf::from("<memory>")))
    }

    fn load(&mut self) -> Result<Option<TrackFile>, TrackError> {
        if self.cancel {
            return Ok(None);
        }
        Ok(self.stored.clone())
    }
}
