pub mod catalog;
pub mod entity;
pub mod ingredients;
pub mod insights;
