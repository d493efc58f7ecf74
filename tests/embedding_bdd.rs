//! BDD tests for embedding aggregation through the analyzer.

use reading_time::{AnalyzeError, Analyzer, TextProcessor};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{
    cell::RefCell,
    sync::atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("embedding service went away")]
struct Gone;

/// Returns one fixed vector, optionally failing after the first call.
struct Fixed {
    vector: Vec<f32>,
    calls_before_failure: Option<usize>,
    calls: AtomicUsize,
}

impl TextProcessor for Fixed {
    type Output = Box<[f32]>;
    type Error = Gone;

    fn process(&self, _input: &str) -> Result<Self::Output, Self::Error> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.calls_before_failure {
            Some(limit) if call >= limit => Err(Gone),
            _ => Ok(self.vector.clone().into_boxed_slice()),
        }
    }
}

#[derive(Default)]
struct EmbeddingContext {
    analyzer: RefCell<Option<Analyzer>>,
    result: RefCell<Option<Result<Vec<f32>, AnalyzeError>>>,
}

#[fixture]
fn embedding_context() -> EmbeddingContext {
    EmbeddingContext::default()
}

fn install(ctx: &EmbeddingContext, provider: Fixed) {
    let analyzer = Analyzer::builder()
        .with_embedding(provider)
        .build()
        .unwrap_or_else(|e| panic!("build analyzer: {e}"));
    ctx.analyzer.replace(Some(analyzer));
}

#[given("an analyzer embedding every word as {first:f32} and {second:f32}")]
fn given_fixed(first: f32, second: f32, #[from(embedding_context)] ctx: &EmbeddingContext) {
    install(
        ctx,
        Fixed {
            vector: vec![first, second],
            calls_before_failure: None,
            calls: AtomicUsize::new(0),
        },
    );
}

#[given("an analyzer whose embedding provider starts failing")]
fn given_failing(#[from(embedding_context)] ctx: &EmbeddingContext) {
    install(
        ctx,
        Fixed {
            vector: vec![1.0],
            calls_before_failure: Some(1),
            calls: AtomicUsize::new(0),
        },
    );
}

#[when("embedding \"{text}\"")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "BDD macro injects owned value"
)]
#[expect(clippy::expect_used, reason = "test should fail loudly")]
fn when_embedding(text: String, #[from(embedding_context)] ctx: &EmbeddingContext) {
    let analyzer = ctx.analyzer.borrow();
    let analyzer = analyzer.as_ref().expect("analyzer missing");
    ctx.result.replace(Some(analyzer.embed(&text)));
}

#[then("the embedding is {first:f32} and {second:f32}")]
fn then_embedding(first: f32, second: f32, #[from(embedding_context)] ctx: &EmbeddingContext) {
    match ctx.result.borrow().as_ref() {
        Some(Ok(embedding)) => assert_eq!(embedding, &vec![first, second]),
        other => panic!("expected an embedding, got {other:?}"),
    }
}

#[then("an embedding error is returned")]
fn then_error(#[from(embedding_context)] ctx: &EmbeddingContext) {
    assert!(matches!(
        ctx.result.borrow().as_ref(),
        Some(Err(AnalyzeError::Embedding(_)))
    ));
}

#[scenario(path = "tests/features/embedding.feature", index = 0)]
fn repeated_word(embedding_context: EmbeddingContext) {
    let _ = embedding_context;
}

#[scenario(path = "tests/features/embedding.feature", index = 1)]
fn text_without_words(embedding_context: EmbeddingContext) {
    let _ = embedding_context;
}

#[scenario(path = "tests/features/embedding.feature", index = 2)]
fn failing_provider(embedding_context: EmbeddingContext) {
    let _ = embedding_context;
}
