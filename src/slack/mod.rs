pub mod bus;
pub mod client;
pub mod guard;
pub mod server;
pub mod state;
pub mod tasks;
pub mod templates;

pub use server::*;
