//! Core systems for Tessera.
//!
//! This crate provides the small foundation shared by the other Tessera
//! crates:
//!
//! - **Logging**: tracing targets, span names and a [`PerfSpan`] guard
//! - **Signal/Slot System**: [`Signal`] notifications used by the tile
//!   collection to request passes and configuration persistence
//!
//! # Signal/Slot Example
//!
//! ```
//! use tessera_core::Signal;
//!
//! let persist_requested = Signal::<Vec<String>>::new();
//!
//! let conn_id = persist_requested.connect(|keys| {
//!     println!("host should persist {} keys", keys.len());
//! });
//!
//! persist_requested.emit(vec!["tilesPerRow".to_string()]);
//! persist_requested.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::{PerfSpan, span_names, targets};
pub use signal::{ConnectionId, Signal};
