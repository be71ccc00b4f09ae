pub mod inspection;
pub mod logger;
