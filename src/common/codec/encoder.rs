// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::debug;

    use crate::bit_utils::BitStream;
    use crate::codec::{KanjiSymbol, Mode};
    use crate::error::{QRError, QRResult};
    use crate::metadata::{DATA_BIT_CAPACITY, MAX_CHAR_COUNT};

    use super::writer::{pad_remaining_capacity, push_header, push_kanji_data, push_terminator};

    // Length is checked before any character is looked up, and the first
    // unsupported character aborts the whole batch
    pub fn compress(text: &str) -> QRResult<Vec<KanjiSymbol>> {
        let char_cnt = text.chars().count();
        if char_cnt == 0 {
            return Err(QRError::EmptyData);
        }
        if char_cnt > MAX_CHAR_COUNT {
            return Err(QRError::TooManyChars(char_cnt));
        }

        let symbols = text
            .chars()
            .map(|ch| KanjiSymbol::new(ch).ok_or(QRError::UnsupportedChar(ch)))
            .collect::<QRResult<Vec<_>>>()?;
        let compressed = symbols.iter().map(|s| s.compressed).collect::<Vec<_>>();
        debug!("Compressed {char_cnt} kanji: {compressed:04X?}");
        Ok(symbols)
    }

    pub fn encode(symbols: &[KanjiSymbol]) -> QRResult<BitStream> {
        if symbols.is_empty() {
            return Err(QRError::EmptyData);
        }
        if symbols.len() > MAX_CHAR_COUNT {
            return Err(QRError::TooManyChars(symbols.len()));
        }
        debug_assert!(
            Mode::Kanji.encoded_len(symbols.len()) <= DATA_BIT_CAPACITY,
            "Kanji payload overflows data capacity"
        );

        let mut bs = BitStream::new(DATA_BIT_CAPACITY);
        push_header(symbols.len(), &mut bs);
        push_kanji_data(symbols, &mut bs);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok(bs)
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(crate) mod writer {
    use crate::bit_utils::BitStream;
    use crate::codec::{KanjiSymbol, Mode};
    use crate::metadata::{
        CHAR_CNT_BITS, KANJI_BITS, MODE_BITS, PADDING_CODEWORDS, TERMINATOR_BITS,
    };

    pub fn push_header(char_cnt: usize, out: &mut BitStream) {
        debug_assert!(
            char_cnt < (1 << CHAR_CNT_BITS),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {CHAR_CNT_BITS}"
        );
        out.push_bits(Mode::Kanji as u8, MODE_BITS);
        out.push_bits(char_cnt as u8, CHAR_CNT_BITS);
    }

    pub fn push_kanji_data(symbols: &[KanjiSymbol], out: &mut BitStream) {
        for sym in symbols {
            out.push_bits(sym.compressed, KANJI_BITS);
        }
    }

    // The terminator goes in whole or not at all
    pub fn push_terminator(out: &mut BitStream) {
        if out.len() + TERMINATOR_BITS <= out.capacity() {
            out.push_bits(Mode::Terminator as u8, TERMINATOR_BITS);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    pub fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    pub fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}
