//! FAQ Bot Backend Brain
//!
//! Resolves free-form user text (or a language model's topic guess) to one
//! entry of a fixed FAQ knowledge base.

pub mod brain;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use brain::{resolve, similarity};
pub use error::{AppError, ResolveError};
