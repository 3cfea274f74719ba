use crate::action::Control;
use glam::Vec2;

/// Controls held during one tick, plus where the pointer is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    bits: u16,
    /// Pointer position in world coordinates, if the backend has one.
    pub pointer: Option<Vec2>,
}

impl ControlState {
    pub const fn new() -> Self {
        Self {
            bits: 0,
            pointer: None,
        }
    }

    /// A state with exactly the given controls held.
    pub fn with(controls: &[Control]) -> Self {
        let mut state = Self::new();
        for c in controls {
            state.press(*c);
        }
        state
    }

    pub fn press(&mut self, control: Control) {
        self.bits |= control.bit();
    }

    pub fn release(&mut self, control: Control) {
        self.bits &= !control.bit();
    }

    pub fn set(&mut self, control: Control, held: bool) {
        if held {
            self.press(control);
        } else {
            self.release(control);
        }
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.bits & control.bit() != 0
    }

    /// Held now but not in `previous`.
    pub fn just_pressed(&self, previous: &ControlState, control: Control) -> bool {
        self.is_pressed(control) && !previous.is_pressed(control)
    }

    pub fn is_idle(&self) -> bool {
        self.bits == 0
    }

    pub fn pressed(&self) -> impl Iterator<Item = Control> + '_ {
        Control::ALL.into_iter().filter(|c| self.is_pressed(*c))
    }

    pub fn forward(&self) -> bool {
        self.is_pressed(Control::Forward)
    }

    pub fn backward(&self) -> bool {
        self.is_pressed(Control::Backward)
    }

    pub fn left(&self) -> bool {
        self.is_pressed(Control::TurnLeft)
    }

    pub fn right(&self) -> bool {
        self.is_pressed(Control::TurnRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut s = ControlState::new();
        assert!(s.is_idle());
        s.press(Control::Forward);
        s.press(Control::TurnLeft);
        assert!(s.forward());
        assert!(s.left());
        assert!(!s.right());
        s.release(Control::Forward);
        assert!(!s.forward());
        assert!(!s.is_idle());
    }

    #[test]
    fn set_is_idempotent() {
        let mut s = ControlState::new();
        s.set(Control::Save, true);
        s.set(Control::Save, true);
        assert!(s.is_pressed(Control::Save));
        s.set(Control::Save, false);
        assert!(s.is_idle());
    }

    #[test]
    fn just_pressed_needs_a_rising_edge() {
        let prev = ControlState::with(&[Control::Clear]);
        let now = ControlState::with(&[Control::Clear, Control::Load]);
        assert!(!now.just_pressed(&prev, Control::Clear));
        assert!(now.just_pressed(&prev, Control::Load));
    }

    #[test]
    fn pressed_lists_in_declaration_order() {
        let s = ControlState::with(&[Control::TurnRight, Control::Forward]);
        let held: Vec<Control> = s.pressed().collect();
        assert_eq!(held, vec![Control::Forward, Control::TurnRight]);
    }
}
