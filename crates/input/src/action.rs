use std::fmt;
use std::str::FromStr;

/// A logical control any input backend can report as held.
///
/// Keyboard and mouse bindings live in the application; the sandbox only
/// sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    /// Throttle.
    Forward,
    /// Brake / reverse.
    Backward,
    TurnLeft,
    TurnRight,
    /// Write the current track through the track port.
    Save,
    /// Replace the current track from the track port.
    Load,
    /// Drop every track point.
    Clear,
    /// Close/open the track loop.
    FinalizeToggle,
    /// Append a track point at the pointer.
    PlacePoint,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::Forward,
        Control::Backward,
        Control::TurnLeft,
        Control::TurnRight,
        Control::Save,
        Control::Load,
        Control::Clear,
        Control::FinalizeToggle,
        Control::PlacePoint,
    ];

    pub(crate) fn bit(self) -> u16 {
        1 << self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Control::Forward => "forward",
            Control::Backward => "backward",
            Control::TurnLeft => "left",
            Control::TurnRight => "right",
            Control::Save => "save",
            Control::Load => "load",
            Control::Clear => "clear",
            Control::FinalizeToggle => "finalize",
            Control::PlacePoint => "place",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Control {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "forward" | "w" | "throttle" => Ok(Control::Forward),
            "backward" | "s" | "brake" | "reverse" => Ok(Control::Backward),
            "left" | "a" => Ok(Control::TurnLeft),
            "right" | "d" => Ok(Control::TurnRight),
            "save" => Ok(Control::Save),
            "load" => Ok(Control::Load),
            "clear" => Ok(Control::Clear),
            "finalize" | "f" => Ok(Control::FinalizeToggle),
            "place" => Ok(Control::PlacePoint),
            _ => Err(s.to_string()),
        }
    }
}
