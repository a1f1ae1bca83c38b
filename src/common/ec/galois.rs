use std::ops::{Add, AddAssign, Mul, MulAssign};

// Galois field GF(256) element
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct G(pub u8);

impl G {
    // Power of the generator element alpha (= 2)
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn log(self) -> Option<usize> {
        match self.0 {
            0 => None,
            v => Some(LOG_TABLE[v as usize] as usize),
        }
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

// Addition & subtraction are both XOR in characteristic 2
impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(multiply(self.0, rhs.0))
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

pub fn multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

// Exponent & log tables
//------------------------------------------------------------------------------

pub const PRIMITIVE_POLY: u16 = 0x11D;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    // Wraps alpha^255 back to 1
    exp[255] = 1;
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

const _: () = assert!(TABLES.0[0] == 1 && TABLES.0[255] == 1 && TABLES.0[8] == 0x1D);

pub static EXP_TABLE: [u8; 256] = TABLES.0;

pub static LOG_TABLE: [u8; 256] = TABLES.1;
