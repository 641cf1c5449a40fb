//! Pure data structures (DTOs) for the order lifecycle.
//!
//! Nothing in this module performs I/O or owns session state; these types are
//! moved through the engines ([`crate::pricing`], [`crate::validation`],
//! [`crate::tracking`]) and the stateful controllers ([`crate::draft`],
//! [`crate::submission`]).

pub mod draft;
pub mod item;
pub mod location;
pub mod order;

pub use draft::*;
pub use item::*;
pub use location::*;
pub use order::*;
