pub mod openai_vision;
pub mod preprocessing;
pub mod tesseract_service;
pub mod traits;
