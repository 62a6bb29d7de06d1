//! Hand Tracking Plugin
//!
//! Bridges the external landmark detector into the render loop. The detector
//! runs on its own thread at camera cadence, de-duplicates video frames by
//! timestamp, classifies each fresh frame, and publishes the reading into a
//! single-slot mailbox. The render loop polls the slot once per frame; a
//! stale or missing detector frame just leaves the previous signal in place.
//!
//! Without a detector attached the plugin installs nothing but the neutral
//! bias resource: gesture control is inert and the rest of the experience
//! stays reachable through the overlay.

use bevy::prelude::*;
use evergreen_common::gesture::{read_hand, Gesture, HandLandmarks, HandReading};
use evergreen_common::SignalSlot;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// One detector inference: the decoded video timestamp plus the landmarks,
/// or `None` landmarks when no hand was in frame.
#[derive(Debug, Clone)]
pub struct DetectorFrame {
    pub timestamp: f64,
    pub landmarks: Option<HandLandmarks>,
}

/// The external landmark detector collaborator. Owns the camera stream; the
/// stream is released when the detector is dropped at thread exit.
pub trait LandmarkDetector: Send {
    /// Run inference on the current video frame, if one is available.
    fn detect(&mut self) -> Option<DetectorFrame>;
}

/// Latest continuous hand signal, both axes in [-1, 1]. Stays neutral until
/// a hand is first detected.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct HandBias(pub Vec2);

/// One discrete gesture, emitted once per fresh detector inference.
#[derive(Message)]
pub struct GestureMessage(pub Gesture);

/// Plugin carrying the (optional) detector until `build` hands it to the
/// worker thread.
#[derive(Default)]
pub struct HandTrackingPlugin {
    detector: Mutex<Option<Box<dyn LandmarkDetector>>>,
}

impl HandTrackingPlugin {
    pub fn with_detector(detector: Box<dyn LandmarkDetector>) -> Self {
        Self {
            detector: Mutex::new(Some(detector)),
        }
    }
}

impl Plugin for HandTrackingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HandBias>()
            .add_message::<GestureMessage>();

        let Some(detector) = self.detector.lock().take() else {
            info!("No hand detector attached; gesture control inert");
            return;
        };

        let slot = SignalSlot::new();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = spawn_detector_loop(detector, slot.clone(), Arc::clone(&shutdown));

        app.insert_resource(DetectorBridge {
            slot,
            shutdown,
            handle: Some(handle),
            last_applied: f64::NEG_INFINITY,
        })
        .add_systems(Update, apply_hand_readings);
    }
}

/// Shared state between the detector thread and the render loop. Dropping
/// the bridge (app teardown) raises the shutdown flag and joins the thread,
/// which releases the camera stream deterministically.
#[derive(Resource)]
pub struct DetectorBridge {
    slot: SignalSlot<HandReading>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    last_applied: f64,
}

impl Drop for DetectorBridge {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn spawn_detector_loop(
    mut detector: Box<dyn LandmarkDetector>,
    slot: SignalSlot<HandReading>,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut last_timestamp = f64::NEG_INFINITY;
        while !shutdown.load(Ordering::Relaxed) {
            if let Some(frame) = detector.detect() {
                // Same decoded video frame as last time: skip re-inference.
                if frame.timestamp != last_timestamp {
                    last_timestamp = frame.timestamp;
                    if let Some(reading) = read_hand(frame.landmarks.as_ref(), frame.timestamp) {
                        slot.publish(reading);
                    }
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        // Detector dropped here; camera stream released with it.
    })
}

/// Poll the mailbox once per render frame. Each fresh reading updates the
/// continuous bias and emits exactly one discrete gesture message.
fn apply_hand_readings(
    mut bridge: ResMut<DetectorBridge>,
    mut bias: ResMut<HandBias>,
    mut gestures: MessageWriter<GestureMessage>,
) {
    let Some(reading) = bridge.slot.latest() else {
        return;
    };
    if reading.timestamp == bridge.last_applied {
        return;
    }
    bridge.last_applied = reading.timestamp;
    bias.0 = reading.center;
    gestures.write(GestureMessage(reading.gesture));
}
