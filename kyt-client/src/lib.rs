#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod client;
pub mod common;
pub mod config;
pub mod logging;

pub use client::kyt_client::{Credentials, KytClient};
pub use common::error::Error;
