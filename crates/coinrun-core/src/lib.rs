//! Grid, world model and move-policy primitives for the coinrun agent.
//!
//! Everything in this crate is pure data: no I/O, no clocks, no threads. The navigation and
//! turn-loop crates build on these types.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod coord;
pub mod grid;
pub mod policy;
pub mod snapshot;
pub mod world;

pub use coord::{Coord, Direction, Heading, Move, ParseDirectionError};
pub use grid::{Cell, Grid, GRID_SIZE};
pub use policy::{Decision, DecisionKind, MovePolicy};
pub use snapshot::{Snapshot, SnapshotError};
pub use world::{WorldModel, DEFAULT_VISION_RADIUS};
