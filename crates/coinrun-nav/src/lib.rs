//! Move selection: breadth-first search toward the nearest visible coin, with a wall-following
//! fallback when nothing is reachable.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod fallback;
pub mod navigator;
pub mod search;

pub use fallback::WallFollower;
pub use navigator::Navigator;
pub use search::{nearest_target, Route};
