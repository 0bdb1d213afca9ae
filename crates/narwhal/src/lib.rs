#![forbid(unsafe_code)]

//! Headless force-directed graph layout.
//!
//! `narwhal` arranges a directed graph of fixed-size nodes on an integer grid using a
//! spring/charge model: every node repels every other node (inverse-square), and connected
//! nodes attract each other once they are farther apart than the configured spring length.
//!
//! The engine is single-threaded and blocking. Rendering, persistence and input handling are
//! left to the consumer, which reads node locations after [`LayoutEngine::arrange`] returns.
//!
//! ```
//! use narwhal::{LayoutEngine, Node, Size};
//!
//! let mut engine = LayoutEngine::new();
//! let a = Node::new(Size::new(20, 20));
//! let b = Node::new(Size::new(20, 20));
//! let (a_id, b_id) = (a.id(), b.id());
//! engine.add_node(a)?;
//! engine.add_node(b)?;
//! engine.connect(a_id, b_id);
//!
//! let last = engine.arrange(|_status| Ok(()), true)?;
//! assert!(last.is_some());
//! # Ok::<(), narwhal::Error>(())
//! ```

pub mod algo;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod status;

pub use config::{Configuration, DampingMode, StopCounting};
pub use engine::LayoutEngine;
pub use error::{Error, Result};
pub use geometry::{Point, Rectangle, Size, Vector, bearing_angle, calculate_distance};
pub use graph::{EngineId, Node, NodeId};
pub use status::{CallbackError, LayoutStatus, Quiet, StatusCallback};
