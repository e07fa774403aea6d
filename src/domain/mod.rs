pub mod auth;
pub mod entities;
pub mod tasks;

#[cfg(test)]
pub mod mocks;
