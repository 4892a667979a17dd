pub mod batch;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod journal;
pub mod taste;
