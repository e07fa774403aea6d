pub mod config;
pub mod crypto;
pub mod domain;
pub mod helpers;
pub mod http;
pub mod repository;
pub mod slack;
pub mod transit;
