use log::debug;

use crate::common::{
    ec::{generator, Poly},
    error::{QRError, QRResult},
    metadata::{DATA_CODEWORDS, ECC_CODEWORDS, TOTAL_CODEWORDS},
};

// ECC: Error Correction Codeword generator
pub fn ecc(data: &[u8]) -> QRResult<[u8; ECC_CODEWORDS]> {
    let (_, rem) = divide(data)?;
    let mut res = [0u8; ECC_CODEWORDS];
    res.copy_from_slice(&rem.to_bytes());
    Ok(res)
}

// Data codewords followed by their ecc
pub fn encode_codeword(data: &[u8]) -> QRResult<[u8; TOTAL_CODEWORDS]> {
    let (shifted, rem) = divide(data)?;
    let codeword = &shifted + &rem;
    let mut res = [0u8; TOTAL_CODEWORDS];
    res.copy_from_slice(&codeword.to_bytes());
    debug!("Codeword: {res:02X?}");
    Ok(res)
}

// Performs polynomial long division of the data polynomial shifted by x^7
// with the generator polynomial. Returns the shifted dividend and remainder.
pub(crate) fn divide(data: &[u8]) -> QRResult<(Poly, Poly)> {
    if data.len() != DATA_CODEWORDS {
        return Err(QRError::WrongLength { expected: DATA_CODEWORDS, actual: data.len() });
    }
    let shifted = Poly::new(data).shift(ECC_CODEWORDS);
    let rem = shifted.rem(&generator());
    debug_assert_eq!(rem.len(), ECC_CODEWORDS, "Remainder has wrong degree");
    Ok((shifted, rem))
}

#[cfg(test)]
mod ec_tests {
    use test_case::test_case;

    use super::{ecc, encode_codeword};
    use crate::common::{ec::is_valid_codeword, error::QRError};

    const KANJI_DATA: [u8; 19] = [
        0x80, 0x26, 0xCF, 0xEA, 0xA8, 0x00, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
        0x11, 0xEC, 0x11, 0xEC,
    ];

    #[test_case(KANJI_DATA.to_vec(), [0xB1, 0x5E, 0x3D, 0xE1, 0xD3, 0xF4, 0xD3]; "two kanji")]
    #[test_case(
        vec![
            0x80, 0x13, 0x9F, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11, 0xEC, 0x11, 0xEC,
        ],
        [0x04, 0xD7, 0xB3, 0x18, 0x01, 0x13, 0xF7];
        "single kanji"
    )]
    #[test_case(
        vec![
            0x80, 0x93, 0x9F, 0xA8, 0x68, 0xE7, 0xEA, 0x1A, 0x39, 0xFA, 0x86, 0x8E, 0x7E, 0xA1,
            0xA3, 0x9F, 0x80, 0xEC, 0x11,
        ],
        [0x56, 0x2B, 0x61, 0xED, 0x04, 0x24, 0xDF];
        "nine kanji"
    )]
    #[test_case((1..=19).collect(), [0x40, 0x10, 0xFB, 0xFA, 0x19, 0x58, 0x10]; "counting bytes")]
    #[test_case(vec![0; 19], [0; 7]; "all zero")]
    fn test_ecc(data: Vec<u8>, exp: [u8; 7]) {
        assert_eq!(ecc(&data).unwrap(), exp);
    }

    #[test]
    fn test_codeword_keeps_data() {
        let codeword = encode_codeword(&KANJI_DATA).unwrap();
        assert_eq!(codeword[..19], KANJI_DATA);
        assert_eq!(codeword[19..], [0xB1, 0x5E, 0x3D, 0xE1, 0xD3, 0xF4, 0xD3]);
        assert!(is_valid_codeword(&codeword));
    }

    #[test_case(0; "empty")]
    #[test_case(18; "short")]
    #[test_case(26; "long")]
    fn test_wrong_length(len: usize) {
        let data = vec![0u8; len];
        assert_eq!(ecc(&data), Err(QRError::WrongLength { expected: 19, actual: len }));
        assert_eq!(
            encode_codeword(&data).map(|c| c.len()),
            Err(QRError::WrongLength { expected: 19, actual: len })
        );
    }
}
