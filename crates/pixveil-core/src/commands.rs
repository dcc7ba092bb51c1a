//! Function style entry points on top of the [`crate::api`] builders.

mod capacity;
mod hide;
mod unveil;

pub use capacity::capacity;
pub use hide::hide;
pub use unveil::unveil;
