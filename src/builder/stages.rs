//! Stage records for presenting each step of the pipeline.
//!
//! Every entry point here takes the same string inputs a caller would type
//! (kanji text, or binary/hex digit strings with free whitespace) and returns
//! a serialisable record whose fields mirror what gets shown for that stage.

use log::debug;
use serde::Serialize;

use super::ec::{divide, encode_codeword};
use super::qr::QR;
use crate::common::{
    bit_utils::BitStream,
    codec::{
        encode::compress as compress_symbols,
        encoder::writer::{
            push_header, push_kanji_data, push_padding_bits, push_padding_codewords,
            push_terminator,
        },
        KanjiSymbol, Mode,
    },
    digits::{group_bits, parse_binary, parse_bits, parse_hex, to_binary, to_bit_string, to_hex},
    ec::{generator, Poly},
    error::QRResult,
    iter::{DataPosition, DATA_POSITIONS},
    mask::{apply_mask as mask_codeword, MASK_PATTERN},
    metadata::{CHAR_CNT_BITS, DATA_BIT_CAPACITY, KANJI_BITS, MODE_BITS, TOTAL_CODEWORDS},
};

// Records
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanjiRecord {
    pub kanji: String,
    pub shift_jis_code: String,
    pub subtracted_code: String,
    pub compressed_hex: String,
    #[serde(rename = "binary13Bit")]
    pub binary_13_bit: String,
}

impl From<&KanjiSymbol> for KanjiRecord {
    fn from(sym: &KanjiSymbol) -> Self {
        Self {
            kanji: sym.ch.to_string(),
            shift_jis_code: format!("{:04X}", sym.sjis),
            subtracted_code: format!(
                "{:04X} - {:04X} = {:04X}",
                sym.sjis,
                sym.offset(),
                sym.subtracted()
            ),
            compressed_hex: format!("{:04X}", sym.compressed),
            binary_13_bit: format!("{:0width$b}", sym.compressed, width = KANJI_BITS),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCodewordsRecord {
    pub mode_indicator: String,
    pub char_count_indicator: String,
    pub concatenated_binary: String,
    // Header, kanji and terminator when it fits
    pub terminated_binary: String,
    // Zero padded to a byte boundary, in groups of eight
    pub padded_binary_blocks: String,
    pub padded_hex: String,
    pub padded_binary: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EccRecord {
    pub generator_polynomial: String,
    pub data_polynomial: String,
    pub error_correction_polynomial: String,
    pub codeword_polynomial: String,
    pub error_correction_hex: String,
    pub codeword_hex: String,
    pub codeword_binary: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskRecord {
    pub mask_hex: String,
    pub mask_binary: String,
    pub masked_hex: String,
    pub masked_binary: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRecord {
    pub matrix: Vec<Vec<Option<u8>>>,
    pub black_modules: Vec<usize>,
    pub data_positions: Vec<DataPosition>,
}

// Typed stages
//------------------------------------------------------------------------------

pub(crate) fn data_codewords(symbols: &[KanjiSymbol]) -> (DataCodewordsRecord, BitStream) {
    let mut bs = BitStream::new(DATA_BIT_CAPACITY);
    push_header(symbols.len(), &mut bs);
    push_kanji_data(symbols, &mut bs);
    push_terminator(&mut bs);
    let terminated_binary = to_bit_string(bs.bits());
    push_padding_bits(&mut bs);
    let padded_binary_blocks = group_bits(&to_bit_string(bs.bits()));
    push_padding_codewords(&mut bs);

    let record = DataCodewordsRecord {
        mode_indicator: format!("{:0width$b}", Mode::Kanji as u8, width = MODE_BITS),
        char_count_indicator: format!("{:0width$b}", symbols.len(), width = CHAR_CNT_BITS),
        concatenated_binary: symbols
            .iter()
            .map(|s| format!("{:0width$b}", s.compressed, width = KANJI_BITS))
            .collect(),
        terminated_binary,
        padded_binary_blocks,
        padded_hex: to_hex(bs.data()),
        padded_binary: to_binary(bs.data()),
    };
    (record, bs)
}

pub(crate) fn ecc_stage(data: &[u8]) -> QRResult<(EccRecord, [u8; TOTAL_CODEWORDS])> {
    let (_, rem) = divide(data)?;
    let codeword = encode_codeword(data)?;
    let record = EccRecord {
        generator_polynomial: generator().to_string(),
        data_polynomial: Poly::new(data).display_in('d').to_string(),
        error_correction_polynomial: rem.display_in('r').to_string(),
        codeword_polynomial: Poly::new(&codeword).display_in('c').to_string(),
        error_correction_hex: to_hex(&rem.to_bytes()),
        codeword_hex: to_hex(&codeword),
        codeword_binary: to_binary(&codeword),
    };
    Ok((record, codeword))
}

pub(crate) fn mask_stage(codeword: &[u8]) -> QRResult<(MaskRecord, [u8; TOTAL_CODEWORDS])> {
    let masked = mask_codeword(codeword)?;
    let record = MaskRecord {
        mask_hex: to_hex(&MASK_PATTERN),
        mask_binary: to_binary(&MASK_PATTERN),
        masked_hex: to_hex(&masked),
        masked_binary: to_binary(&masked),
    };
    Ok((record, masked))
}

pub(crate) fn matrix_stage(bits: impl IntoIterator<Item = bool>) -> (MatrixRecord, QR) {
    let mut qr = QR::template();
    let black_modules = qr.draw_payload(bits);
    debug!("Placed {} dark data modules", black_modules.len());
    let record = MatrixRecord {
        matrix: qr.to_matrix(),
        black_modules,
        data_positions: DATA_POSITIONS.to_vec(),
    };
    (record, qr)
}

// String entry points
//------------------------------------------------------------------------------

pub fn compress(text: &str) -> QRResult<Vec<KanjiRecord>> {
    let symbols = compress_symbols(text)?;
    Ok(symbols.iter().map(KanjiRecord::from).collect())
}

pub fn build_data_codewords(text: &str) -> QRResult<DataCodewordsRecord> {
    let symbols = compress_symbols(text)?;
    Ok(data_codewords(&symbols).0)
}

// Data codewords as binary digits
pub fn encode_ecc(bits: &str) -> QRResult<EccRecord> {
    Ok(ecc_stage(&parse_binary(bits)?)?.0)
}

pub fn encode_ecc_hex(hex: &str) -> QRResult<EccRecord> {
    Ok(ecc_stage(&parse_hex(hex)?)?.0)
}

// Codeword as binary digits
pub fn apply_mask(bits: &str) -> QRResult<MaskRecord> {
    Ok(mask_stage(&parse_binary(bits)?)?.0)
}

pub fn apply_mask_hex(hex: &str) -> QRResult<MaskRecord> {
    Ok(mask_stage(&parse_hex(hex)?)?.0)
}

// Any number of bits is accepted. Missing positions stay unset and surplus
// bits are dropped.
pub fn render_matrix(bits: &str) -> QRResult<MatrixRecord> {
    Ok(matrix_stage(parse_bits(bits)?).0)
}
