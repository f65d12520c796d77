//! Foundation types for the carousel widget.
//!
//! This crate contains the platform-agnostic core types shared by the
//! carousel crates: the backend trait the widget drives, configuration,
//! and error types.

pub mod backend;
pub mod config;
pub mod error;

pub use backend::{Capabilities, CarouselBackend, ElementId};
pub use config::{AutoplayConfig, CarouselConfig, Mode};
pub use error::{CarouselError, Result};
