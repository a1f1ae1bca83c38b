use std::ops::Not;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Light = 0,
    Dark = 1,
}

impl Color {
    pub fn select<T>(&self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Symbol geometry & capacity (Version 1, EC level L, Kanji mode)
//------------------------------------------------------------------------------

pub const WIDTH: usize = 21;

pub const MAX_CHAR_COUNT: usize = 9;

pub const DATA_CODEWORDS: usize = 19;

pub const ECC_CODEWORDS: usize = 7;

pub const TOTAL_CODEWORDS: usize = DATA_CODEWORDS + ECC_CODEWORDS;

pub const DATA_BIT_CAPACITY: usize = DATA_CODEWORDS << 3;

pub const TOTAL_BIT_CAPACITY: usize = TOTAL_CODEWORDS << 3;

pub const MODE_BITS: usize = 4;

pub const CHAR_CNT_BITS: usize = 8;

pub const KANJI_BITS: usize = 13;

pub const TERMINATOR_BITS: usize = 4;

pub const PADDING_CODEWORDS: [u8; 2] = [0xEC, 0x11];

pub const TIMING_LINE: i16 = 6;

// Dark module sits just above the bottom left separator
pub const DARK_MODULE: (i16, i16) = (-8, 8);

// Format info
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

// EC level L (01) with mask reference 000, BCH(15, 5) coded and XORed with 0x5412
pub const FORMAT_INFO: u32 = 0b111011111000100;

const FORMAT_GEN_POLY: u32 = 0b10100110111;

const FORMAT_INFO_MASK: u32 = 0b101010000010010;

const fn bch_format_info(ec_and_mask: u32) -> u32 {
    let mut rem = ec_and_mask << 10;
    let mut i = 14;
    while i >= 10 {
        if (rem >> i) & 1 == 1 {
            rem ^= FORMAT_GEN_POLY << (i - 10);
        }
        i -= 1;
    }
    ((ec_and_mask << 10) | rem) ^ FORMAT_INFO_MASK
}

const _: () = assert!(FORMAT_INFO == bch_format_info(0b01_000));

// Coordinates are listed from the most significant bit to the least
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

#[cfg(test)]
mod metadata_tests {
    use super::{bch_format_info, Color, FORMAT_INFO};

    #[test]
    fn test_format_info() {
        assert_eq!(FORMAT_INFO, 0x77C4);
        // Level L with mask reference 011
        assert_eq!(bch_format_info(0b01_011), 0b111100010011101);
        // Level M with mask reference 000
        assert_eq!(bch_format_info(0b00_000), 0b101010000010010);
    }

    #[test]
    fn test_color() {
        assert_eq!(!Color::Dark, Color::Light);
        assert_eq!(Color::from(true), Color::Dark);
        assert_eq!(Color::Light.select('d', 'l'), 'l');
    }
}
