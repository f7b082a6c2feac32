//! Errors surfaced by the estimator.

/// Input errors detected synchronously by the estimator. State is left
/// unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EtaError {
    /// A progress mutation would push `current` above `total`. `requested`
    /// is widened so `current + step` is exact even when it overflows `u64`.
    #[error("You can't set the item's current value to be greater than the total.")]
    InvalidProgress { requested: u128, total: u64 },

    /// Out-of-bounds format name other than `unknown`, `friendly` or unset.
    #[error("Invalid Out Of Bounds time format.  Valid formats are [:unknown, :friendly, nil]")]
    InvalidFormat(String),

    /// Construction options out of range.
    #[error("invalid timer options: {0}")]
    InvalidOptions(&'static str),
}
