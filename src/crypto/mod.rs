pub mod canonical;
pub mod context;
pub mod digest;

pub use context::{AppKey, SigningContext};
pub use digest::Algorithm;
