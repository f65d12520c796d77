//! carousel-ui: the carousel widget proper.
//!
//! This crate provides the slide state machine (`Carousel`), the easing and
//! animation engine, the timer scheduler that drives both, and the factory
//! that mounts one independent carousel per matched element. All element
//! access goes through the `CarouselBackend` trait -- no platform-specific
//! code.

pub mod animation;
pub mod clock;
pub mod controller;
pub mod factory;
pub mod scheduler;
pub mod sequence;

#[cfg(test)]
pub(crate) mod test_utils;

pub use animation::{Animation, AnimationEngine, Easing};
pub use clock::{Clock, SystemClock};
pub use controller::{Carousel, Direction};
pub use factory::CarouselSet;
pub use scheduler::{Scheduler, TimerId};
pub use sequence::SlideSequence;
