//! Helpers shared by the integration tests.

#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
#[must_use]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Two short sentences of one- and two-syllable words.
pub const SIMPLE_TEXT: &str = "Der Hund läuft. Die Katze schläft.";
