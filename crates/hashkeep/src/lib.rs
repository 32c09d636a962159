#![doc = include_str!("../README.md")]

mod digest;
mod error;
mod generator;
mod id;
mod service;
mod shutdown;
mod stats;
mod store;

pub use crate::digest::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::service::*;
pub use crate::shutdown::*;
pub use crate::stats::*;
pub use crate::store::*;
