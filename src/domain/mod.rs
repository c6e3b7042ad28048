//! Domain model: aggregates, value objects and user-facing notices.
pub mod aggregates;
pub mod events;
pub mod value_objects;
