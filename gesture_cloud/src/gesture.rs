//! Gesture input: from LeapMotion hardware or keyboard simulation.
//!
//! Continuous hand state (expansion, rotation, detection) is posted to a
//! [`GestureMailbox`]; discrete commands (template choice, quit) travel as
//! [`ControlEvent`]s over a `mpsc` channel.  Consumers don't need to know
//! which source produced them.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use cloud_morph::{GestureMailbox, GestureState};
use log::debug;
use shape_cloud::Template;

/// Expansion change per Up/Down key press.
pub const EXPAND_STEP: f32 = 0.1;

// ════════════════════════════════════════════════════════════════════════════
// ControlEvent
// ════════════════════════════════════════════════════════════════════════════

/// A discrete command for the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    SelectTemplate(Template),
    NextTemplate,
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureSource trait: unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can feed the gesture mailbox.
pub trait GestureSource: Send + 'static {
    fn run(self: Box<Self>, mailbox: GestureMailbox, control: Sender<ControlEvent>);
}

/// Spawn a gesture source on its own thread and return the control receiver.
pub fn spawn_gesture_source<G: GestureSource>(
    source:  G,
    mailbox: GestureMailbox,
) -> Receiver<ControlEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(mailbox, tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapGestureSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Gesture source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// # Mapping
///
/// * **Two hands**: expansion follows the distance between the palms,
///   rotation follows the midpoint's sideways offset.
/// * **One hand**: expansion follows how open the hand is, rotation follows
///   the palm's sideways offset.
/// * **No hands**: neutral snapshot.
#[cfg(feature = "leap")]
pub struct LeapGestureSource;

#[cfg(feature = "leap")]
impl GestureSource for LeapGestureSource {
    fn run(self: Box<Self>, mailbox: GestureMailbox, _control: Sender<ControlEvent>) {
        use leaprs::*;
        use log::{error, info};

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => { error!("LeapC connection failed: {:?}", e); return; }
        };
        if let Err(e) = connection.open() {
            error!("failed to open LeapMotion device: {:?}", e);
            return;
        }
        info!("LeapMotion connected");

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                mailbox.post(leap_gesture(&hands));
            }
        }
    }
}

#[cfg(feature = "leap")]
fn leap_gesture(hands: &[leaprs::Hand]) -> GestureState {
    use leaprs::HandType;

    const SPREAD_MIN:    f32 = 80.0;   // mm: palms this close = fully contracted
    const SPREAD_MAX:    f32 = 400.0;  // mm: palms this far  = fully expanded
    const LATERAL_RANGE: f32 = 200.0;  // mm either side of centre = full rotation

    let left  = hands.iter().find(|h| h.hand_type() == HandType::Left);
    let right = hands.iter().find(|h| h.hand_type() == HandType::Right);

    match (left, right) {
        (Some(lh), Some(rh)) => {
            let lp = lh.palm().position();
            let rp = rh.palm().position();
            let dx = lp.x - rp.x;
            let dy = lp.y - rp.y;
            let dz = lp.z - rp.z;
            let dist = (dx*dx + dy*dy + dz*dz).sqrt();
            let expansion = ((dist - SPREAD_MIN) / (SPREAD_MAX - SPREAD_MIN)).clamp(0.0, 1.0);
            let rotation  = ((lp.x + rp.x) * 0.5 / LATERAL_RANGE).clamp(-1.0, 1.0);
            GestureState::new(expansion, rotation, true)
        }
        (Some(h), None) | (None, Some(h)) => {
            let digits: Vec<_> = h.digits().collect();
            let openness = if digits.is_empty() {
                0.0
            } else {
                digits.iter().map(finger_extension).sum::<f32>() / digits.len() as f32
            };
            let rotation = (h.palm().position().x / LATERAL_RANGE).clamp(-1.0, 1.0);
            GestureState::new(openness, rotation, true)
        }
        (None, None) => GestureState::NEUTRAL,
    }
}

#[cfg(feature = "leap")]
fn finger_extension(digit: &leaprs::Digit) -> f32 {
    // Tip-to-base distance over a typical ~80 mm finger: 1.0 open, ~0.0 curled.
    let base = digit.metacarpal().prev_joint();
    let tip  = digit.distal().next_joint();
    let dx   = tip.x - base.x;
    let dy   = tip.y - base.y;
    let dz   = tip.z - base.z;
    ((dx*dx + dy*dy + dz*dz).sqrt() / 80.0).clamp(0.0, 1.0)
}

// ════════════════════════════════════════════════════════════════════════════
// SimGestureSource: keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Gesture source driven by [`SimInput`] events from the visualizer window.
pub struct SimGestureSource {
    pub rx: Receiver<SimInput>,
}

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    KeyDown(SimKey),
    KeyUp(SimKey),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Expand,                 // Up
    Contract,               // Down
    RotateLeft,             // Left
    RotateRight,            // Right
    ToggleHand,             // H
    Template(Template),     // 1–5
    NextTemplate,           // Space
    Quit,                   // Q / Esc
}

impl SimGestureSource {
    /// Fold one input into the simulated hand state.
    ///
    /// Returns the new state and any discrete command the input carries.
    pub fn apply(state: GestureState, input: SimInput) -> (GestureState, Option<ControlEvent>) {
        let mut s = state;
        let control = match input {
            SimInput::KeyDown(SimKey::Expand) => {
                s.expansion = (s.expansion + EXPAND_STEP).min(1.0);
                s.is_detected = true;
                None
            }
            SimInput::KeyDown(SimKey::Contract) => {
                s.expansion = (s.expansion - EXPAND_STEP).max(0.0);
                s.is_detected = true;
                None
            }
            SimInput::KeyDown(SimKey::RotateLeft) => {
                s.rotation = -1.0;
                s.is_detected = true;
                None
            }
            SimInput::KeyDown(SimKey::RotateRight) => {
                s.rotation = 1.0;
                s.is_detected = true;
                None
            }
            // Releasing one arrow only stops the spin it started.
            SimInput::KeyUp(SimKey::RotateLeft) => {
                if s.rotation < 0.0 { s.rotation = 0.0; }
                None
            }
            SimInput::KeyUp(SimKey::RotateRight) => {
                if s.rotation > 0.0 { s.rotation = 0.0; }
                None
            }
            SimInput::KeyDown(SimKey::ToggleHand) => {
                // Losing the hand drops back to neutral.
                s = if s.is_detected {
                    GestureState::NEUTRAL
                } else {
                    GestureState { is_detected: true, ..s }
                };
                None
            }
            SimInput::KeyDown(SimKey::Template(t)) => Some(ControlEvent::SelectTemplate(t)),
            SimInput::KeyDown(SimKey::NextTemplate) => Some(ControlEvent::NextTemplate),
            SimInput::KeyDown(SimKey::Quit) => Some(ControlEvent::Quit),
            SimInput::KeyUp(_) => None,
        };
        (s, control)
    }
}

impl GestureSource for SimGestureSource {
    fn run(self: Box<Self>, mailbox: GestureMailbox, control: Sender<ControlEvent>) {
        let mut state = mailbox.latest();
        for input in self.rx {
            let (next, event) = SimGestureSource::apply(state, input);
            if next != state {
                debug!("sim gesture {:?}", next);
                mailbox.post(next);
                state = next;
            }
            if let Some(ev) = event {
                if control.send(ev).is_err() { return; }
                if ev == ControlEvent::Quit { return; }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
