pub mod language;
pub mod normalizer;
pub mod scripts;
pub mod search_terms;
