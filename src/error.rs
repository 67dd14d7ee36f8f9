//! Error categories shared across the crate.
//!
//! Mirrors the split the original C++ source drew at its throw sites:
//! a malformed trace line is a parse-time problem, an unknown scheme or
//! optimization token is a configuration-time problem. Neither is
//! recoverable inside the engine itself — both are rejected before the
//! engine ever runs.

/// Errors surfaced at the boundary of the simulator (parsing and driver
/// configuration). The core engine has no fallible operations of its own.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A line of the input trace did not match `<tag> <R|W> <hex-address>`,
    /// or the address token was not valid hexadecimal.
    #[error("malformed trace line {line}: {text:?}")]
    InputParse {
        /// 1-based line number in the source trace.
        line: usize,
        /// The offending line, verbatim.
        text: String,
    },
    /// An unknown migration scheme or optimization flag was supplied at
    /// the driver boundary.
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable description of the rejected input.
        message: String,
    },
}
