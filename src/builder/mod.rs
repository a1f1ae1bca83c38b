mod ec;
mod qr;
pub mod stages;

pub use ec::{ecc, encode_codeword};
pub use qr::{Module, QR};

use log::{debug, info};
use serde::Serialize;

use crate::common::{
    bit_utils::BitStream,
    codec::{encode, encode::compress},
    ec::is_valid_codeword,
    error::QRResult,
    mask::apply_mask,
};
use stages::{
    data_codewords, ecc_stage, mask_stage, matrix_stage, DataCodewordsRecord, EccRecord,
    KanjiRecord, MaskRecord, MatrixRecord,
};

// Every stage record of one run through the pipeline
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub results: Vec<KanjiRecord>,
    pub intermediate: DataCodewordsRecord,
    pub error_correction: EccRecord,
    pub mask: MaskRecord,
    pub matrix: MatrixRecord,
}

pub struct QRBuilder<'a> {
    text: &'a str,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn metadata(&self) -> String {
        format!("{{ Version: 1, Ec level: L, Mode: Kanji, Chars: {} }}", self.text.chars().count())
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        info!("Generating QR {}...", self.metadata());

        debug!("Compressing kanji...");
        let symbols = compress(self.text)?;

        debug!("Encoding data...");
        let encoded_data = encode::encode(&symbols)?;

        debug!("Computing error correction...");
        let codeword = encode_codeword(encoded_data.data())?;
        debug_assert!(is_valid_codeword(&codeword), "Codeword has non zero syndromes");

        debug!("Masking codeword...");
        let masked = apply_mask(&codeword)?;

        debug!("Drawing modules...");
        let mut qr = QR::template();
        qr.draw_payload(BitStream::from(&masked));
        debug_assert_eq!(qr.count_empty_modules(), 0, "Empty module found after drawing payload");

        info!("QR generated successfully, {} dark modules", qr.count_dark_modules());
        Ok(qr)
    }

    pub fn report(&self) -> QRResult<Report> {
        info!("Reporting stages of QR {}...", self.metadata());

        let symbols = compress(self.text)?;
        let results = symbols.iter().map(KanjiRecord::from).collect();
        let (intermediate, data) = data_codewords(&symbols);
        let (error_correction, codeword) = ecc_stage(data.data())?;
        let (mask, masked) = mask_stage(&codeword)?;
        let (matrix, _) = matrix_stage(BitStream::from(&masked));

        Ok(Report { results, intermediate, error_correction, mask, matrix })
    }
}
