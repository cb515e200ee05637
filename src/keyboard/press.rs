//! Pressed-state tracking for rendered keys
//!
//! Two sources light a key up: a held physical key whose identifier matches
//! the label, and the pointer holding the key down. Physical presses are
//! timestamped so terminals that never report releases can expire them.

use super::key::KeyId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct PressState {
    /// Keys lit by a physical press, with the time of the latest press/repeat
    physical: HashMap<KeyId, Instant>,
    /// Key currently held by the pointer
    pointer: Option<KeyId>,
}

impl PressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical key down (or auto-repeat) for every matching key
    pub fn physical_down(&mut self, ids: &[KeyId], now: Instant) {
        for id in ids {
            self.physical.insert(*id, now);
        }
    }

    pub fn physical_up(&mut self, ids: &[KeyId]) {
        for id in ids {
            self.physical.remove(id);
        }
    }

    /// Drop physical presses older than `hold`. Returns how many expired.
    pub fn expire(&mut self, now: Instant, hold: Duration) -> usize {
        let before = self.physical.len();
        self.physical
            .retain(|_, pressed_at| now.duration_since(*pressed_at) < hold);
        before - self.physical.len()
    }

    /// Pointer pressed on a key. Returns `false` if that key was already held
    /// by the pointer, so a press activates once.
    pub fn pointer_down(&mut self, id: KeyId) -> bool {
        if self.pointer == Some(id) {
            return false;
        }
        self.pointer = Some(id);
        true
    }

    /// Pointer released (or left the key). Returns the key that was held.
    pub fn pointer_up(&mut self) -> Option<KeyId> {
        self.pointer.take()
    }

    pub fn pointer(&self) -> Option<KeyId> {
        self.pointer
    }

    pub fn is_pressed(&self, id: KeyId) -> bool {
        self.pointer == Some(id) || self.physical.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_press_and_release() {
        let mut press = PressState::new();
        let ids = [KeyId::new(0, 1), KeyId::new(3, 0)];
        press.physical_down(&ids, Instant::now());
        assert!(press.is_pressed(KeyId::new(0, 1)));
        assert!(press.is_pressed(KeyId::new(3, 0)));

        press.physical_up(&ids);
        assert!(!press.is_pressed(KeyId::new(0, 1)));
        assert!(!press.is_pressed(KeyId::new(3, 0)));
    }

    #[test]
    fn pointer_press_triggers_once_until_release() {
        let mut press = PressState::new();
        let id = KeyId::new(1, 2);
        assert!(press.pointer_down(id));
        assert!(!press.pointer_down(id));
        assert!(press.is_pressed(id));

        assert_eq!(press.pointer_up(), Some(id));
        assert!(!press.is_pressed(id));
        assert!(press.pointer_down(id));
    }

    #[test]
    fn expire_drops_stale_physical_presses() {
        let mut press = PressState::new();
        let start = Instant::now();
        press.physical_down(&[KeyId::new(0, 0)], start);
        press.physical_down(&[KeyId::new(0, 1)], start + Duration::from_millis(100));

        let expired = press.expire(start + Duration::from_millis(150), Duration::from_millis(100));
        assert_eq!(expired, 1);
        assert!(!press.is_pressed(KeyId::new(0, 0)));
        assert!(press.is_pressed(KeyId::new(0, 1)));
    }

    #[test]
    fn expire_leaves_pointer_alone() {
        let mut press = PressState::new();
        press.pointer_down(KeyId::new(2, 2));
        press.expire(Instant::now() + Duration::from_secs(5), Duration::from_millis(1));
        assert!(press.is_pressed(KeyId::new(2, 2)));
    }
}
