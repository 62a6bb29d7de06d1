//! # Gesture Classifier
//!
//! Maps one frame of hand-landmark geometry to a discrete gesture and a
//! continuous view-control signal. The detector itself is an external
//! collaborator; this module only sees its output: 21 labeled points in
//! normalized [0, 1] image space, or nothing when no hand is in frame.
//!
//! A digit counts as extended when its tip sits further from the wrist than
//! its proximal joint. This deliberately ignores hand rotation relative to
//! the camera; a fist rotated sideways can read as extended. Known accuracy
//! limit, kept as-is.

use bevy::prelude::*;

/// Landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// Wrist landmark index.
pub const WRIST: usize = 0;

/// (tip, proximal joint) index pairs for thumb, index, middle, ring, pinky.
const DIGIT_PAIRS: [(usize, usize); 5] = [(4, 2), (8, 6), (12, 10), (16, 14), (20, 18)];

/// One normalized landmark point in image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// A full hand worth of landmarks, ordered by the detector's labeling.
pub type HandLandmarks = [Landmark; LANDMARK_COUNT];

/// Discrete gesture symbols. `None` is an explicit classification of an
/// ambiguous hand, distinct from "no hand detected" (which emits nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Open,
    Closed,
    None,
}

/// One classifier inference: the discrete gesture plus the continuous
/// hand-center signal, stamped with the video frame time that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandReading {
    pub gesture: Gesture,
    /// Mirrored hand center remapped to [-1, 1] on both axes.
    pub center: Vec2,
    /// Decoded video timestamp, used to de-duplicate detector frames.
    pub timestamp: f64,
}

fn wrist_distance(landmarks: &HandLandmarks, index: usize) -> f32 {
    let wrist = landmarks[WRIST];
    let p = landmarks[index];
    (p.x - wrist.x).hypot(p.y - wrist.y)
}

/// Count extended digits and map the count to a gesture symbol.
pub fn classify(landmarks: &HandLandmarks) -> Gesture {
    let extended = DIGIT_PAIRS
        .iter()
        .filter(|&&(tip, pip)| wrist_distance(landmarks, tip) > wrist_distance(landmarks, pip))
        .count();

    if extended >= 4 {
        Gesture::Open
    } else if extended <= 1 {
        Gesture::Closed
    } else {
        Gesture::None
    }
}

/// Average all landmarks, mirror X for intuitive control, remap both axes
/// from [0, 1] to [-1, 1].
pub fn hand_center(landmarks: &HandLandmarks) -> Vec2 {
    let mut center = Vec2::ZERO;
    for lm in landmarks {
        center += Vec2::new(lm.x, lm.y);
    }
    center /= LANDMARK_COUNT as f32;
    Vec2::new((1.0 - center.x) * 2.0 - 1.0, center.y * 2.0 - 1.0)
}

/// Interpret one detector inference. No hand means silence: neither a
/// gesture nor a move signal is emitted.
pub fn read_hand(landmarks: Option<&HandLandmarks>, timestamp: f64) -> Option<HandReading> {
    landmarks.map(|lm| HandReading {
        gesture: classify(lm),
        center: hand_center(lm),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic hand with `extended` digits stretched away from the wrist
    /// and the rest curled back toward it.
    fn synthetic_hand(extended: usize) -> HandLandmarks {
        let mut lm = [Landmark { x: 0.5, y: 0.5 }; LANDMARK_COUNT];
        for (digit, &(tip, pip)) in DIGIT_PAIRS.iter().enumerate() {
            let dir = (digit as f32 + 1.0) * 0.02;
            if digit < extended {
                lm[pip] = Landmark { x: 0.5 + dir, y: 0.4 };
                lm[tip] = Landmark {
                    x: 0.5 + dir * 2.0,
                    y: 0.3,
                };
            } else {
                lm[pip] = Landmark { x: 0.5 + dir, y: 0.4 };
                lm[tip] = Landmark { x: 0.5, y: 0.48 };
            }
        }
        lm
    }

    #[test]
    fn test_all_extended_is_open() {
        assert_eq!(classify(&synthetic_hand(5)), Gesture::Open);
        assert_eq!(classify(&synthetic_hand(4)), Gesture::Open);
    }

    #[test]
    fn test_curled_is_closed() {
        assert_eq!(classify(&synthetic_hand(0)), Gesture::Closed);
        assert_eq!(classify(&synthetic_hand(1)), Gesture::Closed);
    }

    #[test]
    fn test_ambiguous_counts_are_none() {
        assert_eq!(classify(&synthetic_hand(2)), Gesture::None);
        assert_eq!(classify(&synthetic_hand(3)), Gesture::None);
    }

    #[test]
    fn test_no_detection_is_silent() {
        assert_eq!(read_hand(None, 1.0), None);
    }

    #[test]
    fn test_center_is_mirrored_and_remapped() {
        // Every landmark at image center -> neutral signal.
        let centered = [Landmark { x: 0.5, y: 0.5 }; LANDMARK_COUNT];
        let c = hand_center(&centered);
        assert!(c.length() < 1e-6);

        // Hand on the left edge of the image mirrors to +1 on X.
        let left = [Landmark { x: 0.0, y: 0.5 }; LANDMARK_COUNT];
        let c = hand_center(&left);
        assert!((c.x - 1.0).abs() < 1e-6);

        // Bottom of the image maps to +1 on Y.
        let bottom = [Landmark { x: 0.5, y: 1.0 }; LANDMARK_COUNT];
        let c = hand_center(&bottom);
        assert!((c.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reading_carries_timestamp_and_signal() {
        let hand = synthetic_hand(5);
        let reading = read_hand(Some(&hand), 42.5).unwrap();
        assert_eq!(reading.gesture, Gesture::Open);
        assert_eq!(reading.timestamp, 42.5);
    }
}
