pub mod dto;
pub mod parser;
pub mod use_case;
