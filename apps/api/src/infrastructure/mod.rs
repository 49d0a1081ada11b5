pub mod http;
pub mod ml;
pub mod search;
pub mod translation;
