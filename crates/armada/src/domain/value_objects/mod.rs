//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod list_options;
mod resources;
mod version;

pub use list_options::*;
pub use resources::*;
pub use version::*;
