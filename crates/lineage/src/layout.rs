//! Layout phases.
//!
//! - [`subtree`] lays out one root person's descendants;
//! - [`family`] places the root subtrees of a family under its title;
//! - [`outline`] traces the polygon around a family block;
//! - [`pack`] moves linked family blocks next to each other.
//!
//! [`tidy`] and [`levels`] are the geometric primitives underneath.

pub mod family;
pub mod levels;
pub mod outline;
pub mod pack;
pub mod subtree;
pub mod tidy;

pub use family::{SvgFamily, TitleNode};
pub use pack::Placement;
pub use subtree::{SvgPerson, SvgRoot};
