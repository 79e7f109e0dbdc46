//! Shared reactive building blocks.

/// Reactive property system for fine-grained state updates.
pub mod property;
pub(crate) mod registry;

pub use property::Property;
pub use registry::Subscription;
