//! Capability interfaces for segmentation, syllable estimation and word
//! embeddings.
//!
//! Defines the `TextProcessor` trait and the provider aliases consumed by the
//! analyzer. Concrete capabilities live in the submodules.

#[cfg(feature = "provider-api")]
pub mod api_embedding;
#[cfg(feature = "provider-api")]
pub mod content;
pub mod segmenter;
pub mod syllables;

use crate::{error::BoxError, text::SentenceSet};

/// Processes text to produce a structured, thread-safe output.
///
/// Segmenters, syllable estimators and embedding providers all implement this
/// trait and are distinguished by their `Output` type via the aliases below.
pub trait TextProcessor {
    /// Structured result returned by the processor.
    ///
    /// Outputs must be `Send + Sync + 'static` so they can be safely shared
    /// across threads and stored in trait objects without borrowing.
    type Output: Send + Sync + 'static;
    /// Error type returned when processing fails.
    ///
    /// Errors must implement `std::error::Error` and be `Send + Sync + 'static`
    /// to propagate cleanly across threads and outlive the processor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Process the supplied text.
    ///
    /// # Errors
    ///
    /// Returns an error if processing fails.
    fn process(&self, input: &str) -> Result<Self::Output, Self::Error>;
}

/// Splits raw text into sentences of tokens.
pub type Segmenter<E> = dyn TextProcessor<Output = SentenceSet, Error = E> + Send + Sync + 'static;

/// Splits a single word into its syllable fragments.
pub type SyllableEstimator<E> =
    dyn TextProcessor<Output = Vec<String>, Error = E> + Send + Sync + 'static;

/// Produces a fixed-length vector for a single word.
pub type EmbeddingProvider<E> =
    dyn TextProcessor<Output = Box<[f32]>, Error = E> + Send + Sync + 'static;

/// Object-safe view of a [`TextProcessor`] with its error boxed, so the
/// analyzer can hold capabilities of different concrete types.
pub(crate) trait ErasedProcessor<O>: Send + Sync {
    fn process_erased(&self, input: &str) -> Result<O, BoxError>;
}

impl<P> ErasedProcessor<P::Output> for P
where
    P: TextProcessor + Send + Sync,
{
    fn process_erased(&self, input: &str) -> Result<P::Output, BoxError> {
        self.process(input).map_err(|e| Box::new(e) as BoxError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    struct Upper;

    impl TextProcessor for Upper {
        type Output = String;
        type Error = Infallible;

        fn process(&self, input: &str) -> Result<Self::Output, Self::Error> {
            Ok(input.to_uppercase())
        }
    }

    #[test]
    fn erased_processor_forwards_output() {
        let erased: Box<dyn ErasedProcessor<String>> = Box::new(Upper);
        let out = erased
            .process_erased("hund")
            .unwrap_or_else(|e| panic!("unexpected error: {e}"));
        assert_eq!(out, "HUND");
    }
}
