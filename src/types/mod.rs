pub mod prediction;
pub mod session;
