//! Core traits and types shared by every sema crate: the `Embedder` and
//! `Llm` capability contracts, the provider error taxonomy, and the
//! similarity math used by the metric layer.

pub mod error;
pub mod similarity;
pub mod traits;

pub use error::{ProviderError, Result};
pub use similarity::cosine;
pub use traits::{Embedder, Llm};
