//! Input: logical controls shared by every embodiment (window, headless, scripts).
//!
//! # Invariants
//! - Entities consume [`ControlState`], never raw key codes.
//! - A control state is a snapshot for one tick; nothing is queued.

pub mod action;
pub mod script;
pub mod state;

pub use action::Control;
pub use script::{InputScript, ScriptError};
pub use state::ControlState;

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
