pub mod analyze_products;
pub mod detect_language;
pub mod extract_text;
pub mod pipeline;
pub mod search_product;
pub mod translate_text;
