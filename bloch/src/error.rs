use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlochError {
    #[error("state is not normalised: |a|² + |b|² = {norm_sqr}")]
    InvalidState { norm_sqr: f64 },
    #[error("state has zero norm and cannot be normalised")]
    ZeroNorm,
}
