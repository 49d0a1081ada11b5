pub mod analyze;
pub mod health;
pub mod language;
pub mod ocr;
pub mod search;
