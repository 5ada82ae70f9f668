//! Gesture snapshot and the single-slot mailbox that carries it from an
//! asynchronous producer to the render loop.

use std::sync::{Arc, Mutex};

/// Control signal driving the whole-cloud transform.
///
/// `expansion` is conventionally in `[0, 1]` and `rotation` in `[-1, 1]`;
/// neither is clamped here.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureState {
    pub expansion:   f32,
    pub rotation:    f32,
    pub is_detected: bool,
}

impl GestureState {
    /// No hand, no expansion, no rotation.
    pub const NEUTRAL: GestureState = GestureState {
        expansion:   0.0,
        rotation:    0.0,
        is_detected: false,
    };

    pub fn new(expansion: f32, rotation: f32, is_detected: bool) -> Self {
        GestureState { expansion, rotation, is_detected }
    }
}

/// Latest-value-wins slot shared between one writer and one reader.
///
/// Posting replaces the previous snapshot; reading copies whatever is there.
/// The slot starts at [`GestureState::NEUTRAL`], so the reader never sees an
/// empty value.
#[derive(Clone, Debug, Default)]
pub struct GestureMailbox {
    slot: Arc<Mutex<GestureState>>,
}

impl GestureMailbox {
    pub fn new() -> Self { Self::default() }

    /// Replace the current snapshot.
    pub fn post(&self, state: GestureState) {
        // A poisoned slot still holds a complete Copy value.
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = state;
    }

    /// Copy out the newest snapshot.
    pub fn latest(&self) -> GestureState {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return to the neutral snapshot.
    pub fn reset(&self) { self.post(GestureState::NEUTRAL); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_neutral() {
        assert_eq!(GestureMailbox::new().latest(), GestureState::NEUTRAL);
        assert_eq!(GestureState::default(), GestureState::NEUTRAL);
    }

    #[test]
    fn newest_post_wins() {
        let mb = GestureMailbox::new();
        mb.post(GestureState::new(0.2, 0.0, true));
        mb.post(GestureState::new(0.9, -1.0, true));
        assert_eq!(mb.latest(), GestureState::new(0.9, -1.0, true));
    }

    #[test]
    fn clones_share_the_slot() {
        let reader = GestureMailbox::new();
        let writer = reader.clone();
        let h = thread::spawn(move || writer.post(GestureState::new(1.0, 0.5, true)));
        h.join().unwrap();
        assert_eq!(reader.latest().expansion, 1.0);
        reader.reset();
        assert_eq!(reader.latest(), GestureState::NEUTRAL);
    }
}
