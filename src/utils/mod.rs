pub mod extractors;
pub mod token;
