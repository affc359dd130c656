pub mod extractors;
pub mod jwt;
pub mod signature;
