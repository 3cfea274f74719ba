//! Scripted input for headless runs and tests.
//!
//! A script is a comma separated list of segments. Each segment names the
//! held controls joined by `+` (or `idle`) and how many ticks to hold them:
//!
//! ```text
//! forward*120, forward+left*30, idle*60, backward*20
//! ```
//!
//! A segment without `*n` lasts one tick.

use crate::action::Control;
use crate::state::ControlState;

/// Errors from parsing an input script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("empty segment at position {0}")]
    EmptySegment(usize),
    #[error("unknown control {name:?} in segment {segment}")]
    UnknownControl { segment: usize, name: String },
    #[error("bad tick count {count:?} in segment {segment}")]
    BadCount { segment: usize, count: String },
}

/// A finite sequence of control states, one per tick.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    segments: Vec<(ControlState, u32)>,
    segment: usize,
    used: u32,
}

impl InputScript {
    pub fn new(segments: Vec<(ControlState, u32)>) -> Self {
        Self {
            segments: segments.into_iter().filter(|(_, n)| *n > 0).collect(),
            segment: 0,
            used: 0,
        }
    }

    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut segments = Vec::new();
        if source.trim().is_empty() {
            return Ok(Self::new(segments));
        }
        for (index, raw) in source.split(',').enumerate() {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(ScriptError::EmptySegment(index));
            }
            let (controls, count) = match raw.split_once('*') {
                Some((controls, count)) => {
                    let count = count.trim();
                    let parsed = count.parse::<u32>().map_err(|_| ScriptError::BadCount {
                        segment: index,
                        count: count.to_string(),
                    })?;
                    (controls.trim(), parsed)
                }
                None => (raw, 1),
            };
            let mut state = ControlState::new();
            if !controls.eq_ignore_ascii_case("idle") {
                for name in controls.split('+') {
                    let control = name.parse::<Control>().map_err(|name| {
                        ScriptError::UnknownControl {
                            segment: index,
                            name,
                        }
                    })?;
                    state.press(control);
                }
            }
            segments.push((state, count));
        }
        Ok(Self::new(segments))
    }

    /// Total ticks the script covers.
    pub fn len(&self) -> u64 {
        self.segments.iter().map(|(_, n)| u64::from(*n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.segment >= self.segments.len()
    }

    /// Controls for the next tick; idle once the script has run out.
    pub fn next_controls(&mut self) -> ControlState {
        let Some((state, count)) = self.segments.get(self.segment).copied() else {
            return ControlState::new();
        };
        self.used += 1;
        if self.used >= count {
            self.segment += 1;
            self.used = 0;
        }
        state
    }
}
