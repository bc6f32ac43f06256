//! # laneboard-core
//!
//! Core library for laneboard - a session board for AI coding agent logs.
//!
//! This library provides:
//! - The normalized event model (one record per turn or tool call)
//! - Density aggregation and axis label layout for the heatmap
//! - Brush matching for cross-filter highlighting
//! - The deep-link / back-navigation state machine
//! - Board composition, configuration, and logging infrastructure
//!
//! ## Architecture
//!
//! The engine is single-threaded and pure at its core: aggregation,
//! matching, and label layout are plain functions recomputed inside render
//! passes. I/O happens only in [`loader`], which delivers a finite set of
//! parsed events per session; its completion triggers a re-render rather
//! than being awaited anywhere inside the engine.
//!
//! ## Example
//!
//! ```rust,no_run
//! use laneboard_core::{Config, SessionBoard};
//!
//! let config = Config::load().expect("failed to load config");
//! let outcome = laneboard_core::loader::load_sessions(&config.session_root())
//!     .expect("failed to load sessions");
//! let board = SessionBoard::new(outcome, config.board.default_zoom);
//! assert!(board.skipped_records() == 0 || !board.is_empty());
//! ```

// Re-export commonly used items at the crate root
pub use board::{SessionBoard, SessionLane};
pub use brush::{ActiveBrush, BrushKind};
pub use config::Config;
pub use density::{DensityBucket, Granularity, TimeWindow};
pub use error::{Error, Result};
pub use navigation::{NavState, NavigationController};
pub use types::*;

// Public modules
pub mod board;
pub mod brush;
pub mod config;
pub mod density;
pub mod error;
pub mod format;
pub mod labels;
pub mod loader;
pub mod logging;
pub mod navigation;
pub mod types;
