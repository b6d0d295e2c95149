#![warn(missing_docs)]

//! Core library for popkit => See the `popkit` crate.
//!
//! Computes anchored overlay placement and overflow flipping. The engine is
//! single-threaded and event-driven: the host shell reports geometry-change
//! notifications and the engine writes resolved positions back through the
//! [Host](host::Host) boundary.

/// Contains the engine configuration structures.
pub mod config;

/// Contains the placement engine and overlay registry.
pub mod engine;

/// Contains the host boundary: geometry/style queries, style sink and
/// change-notification subscriptions.
pub mod host;

/// Contains the pure placement math: corner tables, descriptors and the
/// overflow-flip resolver.
pub mod placement;
