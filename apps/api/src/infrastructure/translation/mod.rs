pub mod lingo_client;
pub mod mymemory_client;
pub mod traits;
