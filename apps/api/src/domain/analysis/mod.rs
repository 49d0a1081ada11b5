pub mod entity;
pub mod errors;
pub mod events;
pub mod value_objects;
