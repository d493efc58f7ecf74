//! Text embeddings built by summing word vectors.
//!
//! The dimensionality of the wrapped capability is probed once, when the
//! aggregator is created, by embedding a canary word. Every later vector is
//! checked against it.

use thiserror::Error;

use crate::{
    error::BoxError,
    providers::{ErasedProcessor, TextProcessor},
};

/// Word embedded to discover the provider's dimensionality.
pub const CANARY_WORD: &str = "Lesezeit";

/// Errors returned by [`EmbeddingAggregator`].
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding provider failed for `{word}`: {source}")]
    Provider {
        word: String,
        #[source]
        source: BoxError,
    },
    #[error("embedding provider returned an empty vector")]
    EmptyDimension,
    #[error("embedding for `{word}` has {actual} dimensions but expected {expected}")]
    DimensionMismatch {
        word: String,
        expected: usize,
        actual: usize,
    },
    #[error("embedding for `{word}` contains non-finite values")]
    NonFinite { word: String },
}

/// Sums per-word vectors from an embedding capability.
pub struct EmbeddingAggregator {
    provider: Box<dyn ErasedProcessor<Box<[f32]>>>,
    dimension: usize,
}

impl std::fmt::Debug for EmbeddingAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingAggregator")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl EmbeddingAggregator {
    /// Wrap `provider`, probing its dimensionality with [`CANARY_WORD`].
    ///
    /// # Errors
    ///
    /// Returns an error if the probe fails or yields an empty or non-finite
    /// vector.
    pub fn new<P>(provider: P) -> Result<Self, EmbeddingError>
    where
        P: TextProcessor<Output = Box<[f32]>> + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(provider))
    }

    pub(crate) fn from_boxed(
        provider: Box<dyn ErasedProcessor<Box<[f32]>>>,
    ) -> Result<Self, EmbeddingError> {
        let probe = embed_checked(provider.as_ref(), CANARY_WORD, None)?;
        if probe.is_empty() {
            return Err(EmbeddingError::EmptyDimension);
        }
        tracing::info!(dimension = probe.len(), "embedding provider ready");
        Ok(Self {
            provider,
            dimension: probe.len(),
        })
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Element-wise sum of the vectors for `words`.
    ///
    /// No words yields a zero vector of [`Self::dimension`] entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or returns a vector of the wrong
    /// size or with non-finite values.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::Infallible;
    /// use reading_time::{EmbeddingAggregator, TextProcessor};
    ///
    /// struct OneHot;
    /// impl TextProcessor for OneHot {
    ///     type Output = Box<[f32]>;
    ///     type Error = Infallible;
    ///     fn process(&self, _: &str) -> Result<Self::Output, Self::Error> {
    ///         Ok(vec![1.0, 0.0].into_boxed_slice())
    ///     }
    /// }
    ///
    /// let aggregator = EmbeddingAggregator::new(OneHot).unwrap();
    /// assert_eq!(aggregator.aggregate(["a", "a"]).unwrap(), vec![2.0, 0.0]);
    /// ```
    #[expect(clippy::float_arithmetic, reason = "vector summation")]
    pub fn aggregate<'a, I>(&self, words: I) -> Result<Vec<f32>, EmbeddingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sum = vec![0.0_f32; self.dimension];
        for word in words {
            let vector = embed_checked(self.provider.as_ref(), word, Some(self.dimension))?;
            for (total, value) in sum.iter_mut().zip(vector.iter()) {
                *total += *value;
            }
        }
        Ok(sum)
    }
}

fn embed_checked(
    provider: &dyn ErasedProcessor<Box<[f32]>>,
    word: &str,
    expected: Option<usize>,
) -> Result<Box<[f32]>, EmbeddingError> {
    let vector = provider
        .process_erased(word)
        .map_err(|source| EmbeddingError::Provider {
            word: word.to_owned(),
            source,
        })?;
    if let Some(expected) = expected {
        if vector.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                word: word.to_owned(),
                expected,
                actual: vector.len(),
            });
        }
    }
    if !vector.iter().all(|v| v.is_finite()) {
        return Err(EmbeddingError::NonFinite {
            word: word.to_owned(),
        });
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::{collections::HashMap, convert::Infallible};
    use thiserror::Error;

    struct Table(HashMap<&'static str, Vec<f32>>);

    #[derive(Debug, Error)]
    #[error("unknown word")]
    struct Unknown;

    impl TextProcessor for Table {
        type Output = Box<[f32]>;
        type Error = Unknown;

        fn process(&self, input: &str) -> Result<Self::Output, Self::Error> {
            self.0
                .get(input)
                .map(|v| v.clone().into_boxed_slice())
                .ok_or(Unknown)
        }
    }

    fn table() -> Table {
        Table(HashMap::from([
            (CANARY_WORD, vec![0.0, 0.0]),
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.5, -2.0]),
            ("wide", vec![1.0, 2.0, 3.0]),
            ("nan", vec![f32::NAN, 0.0]),
        ]))
    }

    fn aggregator() -> EmbeddingAggregator {
        EmbeddingAggregator::new(table()).unwrap_or_else(|e| panic!("probe failed: {e}"))
    }

    #[rstest]
    #[case(vec!["a", "a"], vec![2.0, 0.0])]
    #[case(vec!["a", "b"], vec![1.5, -2.0])]
    #[case(vec![], vec![0.0, 0.0])]
    fn sums_word_vectors(#[case] words: Vec<&str>, #[case] expected: Vec<f32>) {
        let sum = aggregator()
            .aggregate(words)
            .unwrap_or_else(|e| panic!("aggregate failed: {e}"));
        assert_eq!(sum, expected);
    }

    #[test]
    fn discovers_dimension_from_canary() {
        assert_eq!(aggregator().dimension(), 2);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let err = aggregator().aggregate(["wide"]);
        assert!(matches!(
            err,
            Err(EmbeddingError::DimensionMismatch {
                expected: 2,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_vectors() {
        assert!(matches!(
            aggregator().aggregate(["nan"]),
            Err(EmbeddingError::NonFinite { .. })
        ));
    }

    #[test]
    fn reports_provider_failures_with_word() {
        match aggregator().aggregate(["zzz"]) {
            Err(EmbeddingError::Provider { word, .. }) => assert_eq!(word, "zzz"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_probe() {
        struct Empty;
        impl TextProcessor for Empty {
            type Output = Box<[f32]>;
            type Error = Infallible;
            fn process(&self, _: &str) -> Result<Self::Output, Self::Error> {
                Ok(Vec::new().into_boxed_slice())
            }
        }
        assert!(matches!(
            EmbeddingAggregator::new(Empty),
            Err(EmbeddingError::EmptyDimension)
        ));
    }
}
