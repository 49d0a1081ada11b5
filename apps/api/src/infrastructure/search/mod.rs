pub mod apify_client;
pub mod traits;
