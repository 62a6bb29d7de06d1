//! # Evergreen Common
//!
//! Shared simulation core for the Golden Evergreen experience. Everything in
//! here is renderer-agnostic: the client crate reads these buffers and draws
//! them, but never writes back into them.
//!
//! ## Table of Contents
//! 1. **sampling** - Spatial distribution generator (sphere / cone)
//! 2. **population** - Entity population store (foliage + ornaments)
//! 3. **animator** - Per-frame assembly animator
//! 4. **mode** - Game mode state machine
//! 5. **gesture** - Hand landmark classifier
//! 6. **view** - View-bias math for the orbit camera
//! 7. **signal** - Single-slot cross-loop mailbox
//! 8. **style** - Process-wide immutable tree configuration

pub mod animator;
pub mod gesture;
pub mod mode;
pub mod population;
pub mod sampling;
pub mod signal;
pub mod style;
pub mod view;

pub use animator::{step_foliage, step_ornaments};
pub use gesture::{Gesture, HandLandmarks, HandReading, Landmark};
pub use mode::GameMode;
pub use population::{FoliagePopulation, OrnamentClass, OrnamentPopulation};
pub use sampling::{cone_sample, sphere_sample};
pub use signal::SignalSlot;
pub use style::TreeStyle;
