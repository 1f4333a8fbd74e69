//! # qrgen
//!
//! An encode-only QR code (ISO/IEC 18004) generator with Reed-Solomon error
//! correction. The output is the raw module matrix; rasterization is left to
//! the consumer, with a text-art renderer included for terminals and tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use qrgen::{encode, ECLevel};
//!
//! # fn main() -> Result<(), qrgen::QRError> {
//! // Mode, version and mask are chosen automatically.
//! let qr = encode("HELLO WORLD", ECLevel::Q)?;
//! assert_eq!(qr.width(), 21);
//! println!("{}", qr.to_str());
//! # Ok(())
//! # }
//! ```
//!
//! ## Full Configuration
//!
//! ```rust
//! use qrgen::{QRBuilder, ECLevel};
//!
//! # fn main() -> Result<(), qrgen::QRError> {
//! let qr = QRBuilder::new("https://example.com/")
//!     .version(4)?           // pin the version instead of searching
//!     .ec_level(ECLevel::H)  // defaults to ECLevel::M
//!     .mask(3)?              // skip the penalty search
//!     .build()?;
//!
//! // Renderers walk the matrix directly.
//! let dark_modules = qr.matrix().rows().flatten().filter(|&&m| m).count();
//! assert!(dark_modules > 0);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub(crate) mod common;

pub use builder::matrix::Matrix;
pub use builder::qr::QRCode;
pub use builder::{encode, QRBuilder};
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
