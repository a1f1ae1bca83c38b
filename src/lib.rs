//! # kanjiqr
//!
//! A step-by-step encoder for Kanji mode QR codes. Every symbol is Version 1 (21x21 modules)
//! at error correction level L, and every stage of the pipeline is exposed so it can be shown
//! on its own.
//!
//! ## Pipeline
//!
//! - **Kanji compression**: Shift-JIS code minus a block offset, folded into 13 bits
//! - **Bit stream**: Mode indicator, character count, kanji, terminator and padding into 19 data codewords
//! - **Reed-Solomon**: 7 error correction codewords over GF(256) from a fixed degree 7 generator
//! - **Masking**: XOR with a fixed 26 byte pattern
//! - **Module placement**: Finder, timing, dark module and format info, then 208 data modules in zigzag order
//!
//! ## Quick Start
//!
//! ### Building a symbol
//!
//! ```rust
//! use kanjiqr::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("点茗").build()?;
//!
//! let img = qr.to_image(4);  // 4x scale factor
//! assert_eq!(img.width(), (21 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Inspecting the stages
//!
//! ```rust
//! use kanjiqr::stages;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let kanji = stages::compress("漢")?;
//! assert_eq!(kanji[0].compressed_hex, "073F");
//!
//! let data = stages::build_data_codewords("漢")?;
//! assert_eq!(data.mode_indicator, "1000");
//!
//! let ecc = stages::encode_ecc(&data.padded_binary)?;
//! let masked = stages::apply_mask(&ecc.codeword_binary)?;
//! let matrix = stages::render_matrix(&masked.masked_binary)?;
//! assert_eq!(matrix.data_positions.len(), 208);
//! # Ok(())
//! # }
//! ```
//!
//! ## Limits
//!
//! - 1 to 9 characters, each in the Shift-JIS blocks `0x8140..=0x9FFC` or `0xE040..=0xEBBF`
//! - Format info is the constant for level L with the checkerboard mask

#![allow(
    clippy::items_after_test_module,
    dead_code,
    mixed_script_confusables,
    clippy::suspicious_arithmetic_impl
)]

pub mod builder;
pub(crate) mod common;

pub use builder::{stages, Module, QRBuilder, Report, QR};
pub use common::codec::KanjiSymbol;
pub use common::ec::{generator_poly, is_valid_codeword, syndromes, Poly, G};
pub use common::error::{QRError, QRResult};
pub use common::iter::{DataPosition, DATA_POSITIONS};
pub use common::mask::{checkerboard, MASK_PATTERN};
pub use common::metadata::{Color, FORMAT_INFO};
pub(crate) use common::*;
