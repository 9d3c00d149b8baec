pub mod account;
pub mod binary;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod gov;
pub mod node;
pub mod tx;
