use core::fmt;

/// Errors which can occur while encoding a payload into a symbol.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EncodeError {
    /// The payload does not fit into the largest supported version.
    #[error("payload of {len} bytes exceeds the symbol capacity of {max} bytes")]
    PayloadTooLarge {
        /// Length of the payload in bytes.
        len: usize,
        /// Largest payload the considered versions can hold.
        max: usize,
    },
    /// Writing the vector graphics markup failed.
    #[error("failed to render symbol: {0}")]
    Render(#[from] fmt::Error),
}
