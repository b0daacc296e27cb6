//! clip-tracker - selection tracking core of a clipboard manager
//!
//! This crate follows the live clipboard and primary selections, decides when
//! their content meaningfully changed, and puts history items back on them.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Selections, targets, history items, events, config and errors
//! - **Application**: The selection tracker, the watch use case, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (clipboard-rs, in-memory selections, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
