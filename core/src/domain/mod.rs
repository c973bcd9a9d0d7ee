//! Domain layer: entities, events, and value objects.

pub mod entities;
pub mod events;
pub mod value_objects;
