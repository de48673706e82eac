pub mod classifier;
pub mod credential_loader;
pub mod credentials;
