use log::debug;

use super::error::{QRError, QRResult};
use super::metadata::TOTAL_CODEWORDS;

// Mask pattern applied to the codeword stream. The constant is the
// checkerboard mask function sampled at every data module in placement order.
pub static MASK_PATTERN: [u8; TOTAL_CODEWORDS] = [
    0x99, 0x99, 0x99, 0x66, 0x66, 0x66, 0x99, 0x99, 0x99, 0x66, 0x66, 0x66, 0x99, 0x99, 0x99, 0x96,
    0x66, 0x99, 0x96, 0x66, 0x66, 0x66, 0x99, 0x99, 0x66, 0x99,
];

pub fn checkerboard(r: i16, c: i16) -> bool {
    (r + c) & 1 == 0
}

pub fn apply_mask(codeword: &[u8]) -> QRResult<[u8; TOTAL_CODEWORDS]> {
    if codeword.len() != TOTAL_CODEWORDS {
        return Err(QRError::WrongLength { expected: TOTAL_CODEWORDS, actual: codeword.len() });
    }

    let mut masked = [0u8; TOTAL_CODEWORDS];
    for ((m, &b), &p) in masked.iter_mut().zip(codeword).zip(MASK_PATTERN.iter()) {
        *m = b ^ p;
    }
    debug!("Masked codeword: {masked:02X?}");
    Ok(masked)
}
