//! Classifier oracles and oracle decorators.
//!
//! [`ClassifyProvider`] is the only thing the decision engine knows about a
//! classifier. Decorators compose around any provider:
//!
//! ```text
//! CachingClassifyProvider ─► RetryingClassifyProvider ─► HuggingFaceClient
//! ```

pub mod caching;
#[cfg(feature = "huggingface")]
pub mod huggingface;
pub mod retry;
pub mod traits;

pub use caching::CachingClassifyProvider;
#[cfg(feature = "huggingface")]
pub use huggingface::HuggingFaceClient;
pub use retry::{RetryConfig, RetryingClassifyProvider};
pub use traits::{ClassifyProvider, FnClassifier};
