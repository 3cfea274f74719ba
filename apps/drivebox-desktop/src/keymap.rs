use crate::setup::Mode;
use drivebox_input::{Control, ControlState};
use glam::Vec2;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Logical control bound to `key` in `mode`, if any.
pub fn control_for(mode: Mode, key: KeyCode) -> Option<Control> {
    match (mode, key) {
        (Mode::Drive, KeyCode::KeyW | KeyCode::ArrowUp) => Some(Control::Forward),
        (Mode::Drive, KeyCode::KeyS | KeyCode::ArrowDown) => Some(Control::Backward),
        (Mode::Drive, KeyCode::KeyA | KeyCode::ArrowLeft) => Some(Control::TurnLeft),
        (Mode::Drive, KeyCode::KeyD | KeyCode::ArrowRight) => Some(Control::TurnRight),
        (Mode::Build, KeyCode::KeyS) => Some(Control::Save),
        (Mode::Build, KeyCode::KeyL) => Some(Control::Load),
        (Mode::Build, KeyCode::Delete) => Some(Control::Clear),
        (Mode::Build, KeyCode::KeyF) => Some(Control::FinalizeToggle),
        _ => None,
    }
}

/// Folds window events into the control state handed to each tick.
#[derive(Debug, Clone)]
pub struct WindowInput {
    mode: Mode,
    controls: ControlState,
}

impl WindowInput {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            controls: ControlState::new(),
        }
    }

    /// Returns `true` when the key asks to quit.
    pub fn key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Escape {
            return pressed;
        }
        if let Some(control) = control_for(self.mode, key) {
            self.controls.set(control, pressed);
        }
        false
    }

    /// Cursor position in logical pixels.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.controls.pointer = Some(position);
    }

    pub fn pointer_left(&mut self) {
        self.controls.pointer = None;
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if self.mode == Mode::Build && button == MouseButton::Left {
            self.controls.set(Control::PlacePoint, pressed);
        }
    }

    /// Held buttons are released, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        let pointer = self.controls.pointer;
        self.controls = ControlState::new();
        self.controls.pointer = pointer;
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_keys_map_to_driving_controls() {
        assert_eq!(control_for(Mode::Drive, KeyCode::KeyW), Some(Control::Forward));
        assert_eq!(control_for(Mode::Drive, KeyCode::KeyS), Some(Control::Backward));
        assert_eq!(control_for(Mode::Drive, KeyCode::ArrowLeft), Some(Control::TurnLeft));
        assert_eq!(control_for(Mode::Drive, KeyCode::KeyL), None);
    }

    #[test]
    fn build_keys_map_to_editing_controls() {
        assert_eq!(control_for(Mode::Build, KeyCode::KeyS), Some(Control::Save));
        assert_eq!(control_for(Mode::Build, KeyCode::KeyL), Some(Control::Load));
        assert_eq!(control_for(Mode::Build, KeyCode::Delete), Some(Control::Clear));
        assert_eq!(control_for(Mode::Build, KeyCode::KeyF), Some(Control::FinalizeToggle));
        assert_eq!(control_for(Mode::Build, KeyCode::KeyW), None);
    }

    #[test]
    fn press_and_release_track_held_state() {
        let mut input = WindowInput::new(Mode::Drive);
        assert!(!input.key(KeyCode::KeyW, true));
        assert!(input.controls().forward());
        input.key(KeyCode::KeyW, false);
        assert!(input.controls().is_idle());
    }

    #[test]
    fn escape_requests_quit_on_press() {
        let mut input = WindowInput::new(Mode::Build);
        assert!(input.key(KeyCode::Escape, true));
        assert!(!input.key(KeyCode::Escape, false));
    }

    #[test]
    fn left_mouse_places_points_only_in_build_mode() {
        let mut build = WindowInput::new(Mode::Build);
        build.pointer_moved(Vec2::new(4.0, 5.0));
        build.mouse_button(MouseButton::Left, true);
        let controls = build.controls();
        assert!(controls.is_pressed(Control::PlacePoint));
        assert_eq!(controls.pointer, Some(Vec2::new(4.0, 5.0)));

        let mut drive = WindowInput::new(Mode::Drive);
        drive.mouse_button(MouseButton::Left, true);
        assert!(!drive.controls().is_pressed(Control::PlacePoint));
    }

    #[test]
    fn release_all_keeps_the_pointer() {
        let mut input = WindowInput::new(Mode::Build);
        input.pointer_moved(Vec2::new(1.0, 1.0));
        input.key(KeyCode::KeyF, true);
        input.release_all();
        assert!(input.controls().is_idle());
        assert_eq!(input.controls().pointer, Some(Vec2::new(1.0, 1.0)));
    }
}
