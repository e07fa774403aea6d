pub mod credentials;
pub mod errors;
