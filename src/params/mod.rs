//! Process-wide parameter history.
//!
//! Every request carrying query or form parameters publishes them here; the
//! report and admin pages read it back.

pub mod store;

pub use store::ParameterStore;
