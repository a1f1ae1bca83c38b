use encoding_rs::SHIFT_JIS;

use crate::metadata::KANJI_BITS;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Kanji = 0b1000,
    Terminator = 0b0000,
}

// Shift-JIS blocks representable in kanji mode, with the offset subtracted
// before compression
static KANJI_RANGES: [(u16, u16, u16); 2] = [(0x8140, 0x9FFC, 0x8140), (0xE040, 0xEBBF, 0xC140)];

impl Mode {
    pub fn encode_chunk(&self, sjis: u16) -> Option<u16> {
        match self {
            Self::Kanji => {
                let sub = sjis - kanji_offset(sjis)?;
                Some((sub >> 8) * 0xC0 + (sub & 0xFF))
            }
            Self::Terminator => unreachable!("Cannot encode in terminator mode"),
        }
    }

    pub fn decode_chunk(&self, data: u16) -> u16 {
        match self {
            Self::Kanji => {
                let msbyte = data / 0xC0;
                let lsbyte = data % 0xC0;
                let temp = ((msbyte << 8) | lsbyte) + 0x8140;
                if temp <= 0x9FFC {
                    temp
                } else {
                    temp + 0x4000
                }
            }
            Self::Terminator => unreachable!("Cannot decode in terminator mode"),
        }
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        match self {
            Self::Kanji => len * KANJI_BITS,
            Self::Terminator => unreachable!("Terminator mode doesn't have characters"),
        }
    }
}

fn kanji_offset(sjis: u16) -> Option<u16> {
    KANJI_RANGES.iter().find(|(lo, hi, _)| (*lo..=*hi).contains(&sjis)).map(|r| r.2)
}

// Kanji symbol
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct KanjiSymbol {
    pub ch: char,
    // Raw double byte Shift-JIS code
    pub sjis: u16,
    // 13 bit compressed value
    pub compressed: u16,
}

impl KanjiSymbol {
    pub fn new(ch: char) -> Option<Self> {
        let sjis = shift_jis_code(ch)?;
        let compressed = Mode::Kanji.encode_chunk(sjis)?;
        Some(Self { ch, sjis, compressed })
    }

    pub fn from_compressed(compressed: u16) -> Option<Self> {
        let sjis = Mode::Kanji.decode_chunk(compressed);
        let bytes = sjis.to_be_bytes();
        let decoded = SHIFT_JIS.decode_without_bom_handling_and_without_replacement(&bytes)?;
        let mut chars = decoded.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(Self { ch, sjis, compressed }),
            _ => None,
        }
    }

    pub fn offset(&self) -> u16 {
        kanji_offset(self.sjis).unwrap_or_default()
    }

    pub fn subtracted(&self) -> u16 {
        self.sjis - self.offset()
    }
}

fn shift_jis_code(ch: char) -> Option<u16> {
    let mut buf = [0u8; 4];
    let (bytes, _, has_err) = SHIFT_JIS.encode(ch.encode_utf8(&mut buf));
    match (has_err, &*bytes) {
        (false, &[hi, lo]) => Some(u16::from_be_bytes([hi, lo])),
        _ => None,
    }
}

#[cfg(test)]
mod kanji_tests {
    use test_case::test_case;

    use super::{KanjiSymbol, Mode};

    #[test_case('点', 0x935F, 0x121F, 0x0D9F)]
    #[test_case('茗', 0xE4AA, 0x236A, 0x1AAA)]
    #[test_case('漢', 0x8ABF, 0x097F, 0x073F)]
    #[test_case('字', 0x8E9A, 0x0D5A, 0x0A1A)]
    #[test_case('　', 0x8140, 0x0000, 0x0000)]
    fn test_kanji_symbol(ch: char, sjis: u16, subtracted: u16, compressed: u16) {
        let sym = KanjiSymbol::new(ch).unwrap();
        assert_eq!(sym.sjis, sjis);
        assert_eq!(sym.subtracted(), subtracted);
        assert_eq!(sym.compressed, compressed);
    }

    #[test_case('A'; "ascii")]
    #[test_case('ｱ'; "half width katakana")]
    #[test_case('😀'; "no shift jis mapping")]
    #[test_case('한'; "hangul")]
    fn test_unsupported(ch: char) {
        assert_eq!(KanjiSymbol::new(ch), None);
    }

    #[test_case(0x8140, Some(0x0000))]
    #[test_case(0x9FFC, Some(0x173C))]
    #[test_case(0x9FFD, None)]
    #[test_case(0xE03F, None)]
    #[test_case(0xE040, Some(0x1740))]
    #[test_case(0xEBBF, Some(0x1FFF))]
    #[test_case(0xEBC0, None)]
    fn test_range_boundaries(sjis: u16, compressed: Option<u16>) {
        assert_eq!(Mode::Kanji.encode_chunk(sjis), compressed);
    }

    #[test]
    fn test_decode_chunk() {
        assert_eq!(Mode::Kanji.decode_chunk(0x0D9F), 0x935F);
        assert_eq!(Mode::Kanji.decode_chunk(0x1AAA), 0xE4AA);
        assert_eq!(KanjiSymbol::from_compressed(0x1AAA).map(|s| s.ch), Some('茗'));
    }

    #[test]
    fn test_compression_round_trip() {
        let mut supported = 0;
        for compressed in 0..1u16 << 13 {
            let Some(sym) = KanjiSymbol::from_compressed(compressed) else { continue };
            // Some characters own several codes; only the canonical one round trips
            let Some(again) = KanjiSymbol::new(sym.ch) else { continue };
            if again.sjis != sym.sjis {
                continue;
            }
            assert_eq!(again, sym);
            assert_eq!(KanjiSymbol::new(sym.ch), Some(sym));
            supported += 1;
        }
        assert!(supported > 6000, "Too few kanji round trip: {supported}");
    }
}
