pub(crate) mod bitstream;
pub(crate) mod codec;
pub(crate) mod ec;
pub mod error;
pub(crate) mod iter;
pub mod mask;
pub mod metadata;
