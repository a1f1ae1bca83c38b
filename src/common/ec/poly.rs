use std::fmt::{Display, Error, Formatter};
use std::ops::Add;

use super::galois::G;

// Polynomial over GF(256), coefficients stored from the highest degree down
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Poly(Vec<G>);

impl Poly {
    pub fn new(coeffs: &[u8]) -> Self {
        Self(coeffs.iter().map(|&c| G(c)).collect())
    }

    pub fn from_exponents(exps: &[usize]) -> Self {
        Self(exps.iter().map(|&e| G::gen_pow(e)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn coeffs(&self) -> &[G] {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().map(|&g| g.into()).collect()
    }

    // Multiplies by x^n
    pub fn shift(&self, n: usize) -> Self {
        let mut res = self.0.clone();
        res.resize(self.len() + n, G(0));
        Self(res)
    }

    // Horner evaluation
    pub fn eval(&self, x: G) -> G {
        self.0.iter().fold(G(0), |acc, &c| acc * x + c)
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        if self.is_empty() || rhs.is_empty() {
            return Self(vec![]);
        }
        let mut res = vec![G(0); self.len() + rhs.len() - 1];
        for (i, &a) in self.0.iter().enumerate() {
            for (j, &b) in rhs.0.iter().enumerate() {
                res[i + j] += a * b;
            }
        }
        Self(res)
    }

    // Long division by a monic divisor. The remainder always carries
    // exactly `divisor.len() - 1` coefficients.
    pub fn rem(&self, divisor: &Self) -> Self {
        let dlen = divisor.len();
        debug_assert!(dlen > 0, "Divisor is empty");
        debug_assert!(divisor.0[0] == G(1), "Divisor must be monic: {:?}", divisor.0[0]);

        let rem_len = dlen - 1;
        let len = self.len();
        if len < dlen {
            let mut res = vec![G(0); rem_len - len];
            res.extend_from_slice(&self.0);
            return Self(res);
        }

        let mut res = self.0.clone();
        for i in 0..=len - dlen {
            let lead_coeff = res[i];
            if lead_coeff.is_zero() {
                continue;
            }
            for (u, &v) in res[i + 1..i + dlen].iter_mut().zip(divisor.0[1..].iter()) {
                *u += lead_coeff * v;
            }
            res[i] = G(0);
        }

        Self(res.split_off(len - rem_len))
    }
}

// Aligns both polynomials at the constant term
impl Add for &Poly {
    type Output = Poly;
    fn add(self, rhs: Self) -> Self::Output {
        let (long, short) = if self.len() >= rhs.len() { (self, rhs) } else { (rhs, self) };
        let off = long.len() - short.len();
        let mut res = long.0.clone();
        for (u, &v) in res[off..].iter_mut().zip(short.0.iter()) {
            *u += v;
        }
        Poly(res)
    }
}

impl Display for Poly {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        self.display_in('x').fmt(f)
    }
}

impl Poly {
    // Same rendering as Display, with `var` as the indeterminate
    pub fn display_in(&self, var: char) -> PolyDisplay<'_> {
        PolyDisplay { poly: self, var }
    }
}

pub struct PolyDisplay<'a> {
    poly: &'a Poly,
    var: char,
}

impl Display for PolyDisplay<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let (len, var) = (self.poly.len(), self.var);
        let mut terms = Vec::with_capacity(len);
        for (i, &c) in self.poly.0.iter().enumerate() {
            let deg = len - 1 - i;
            let Some(log) = c.log() else { continue };
            let coeff = if c == G(1) { String::new() } else { format!("\\alpha^{{{log}}}") };
            let term = match deg {
                0 if coeff.is_empty() => "1".to_string(),
                0 => coeff,
                1 => format!("{coeff}{var}"),
                _ => format!("{coeff}{var}^{{{deg}}}"),
            };
            terms.push(term);
        }
        if terms.is_empty() {
            return f.write_str("0");
        }
        f.write_str(&terms.join(" + "))
    }
}

// Generator polynomial
//------------------------------------------------------------------------------

// Exponents of alpha for the non-leading coefficients of the degree 7
// generator, highest degree first
pub static GENERATOR_EXPONENTS: [usize; 7] = [87, 229, 146, 149, 238, 102, 21];

pub fn generator() -> Poly {
    let mut exps = vec![0];
    exps.extend_from_slice(&GENERATOR_EXPONENTS);
    Poly::from_exponents(&exps)
}

// Product of (x - alpha^i) for i in 0..degree
pub fn generator_poly(degree: usize) -> Poly {
    (0..degree).fold(Poly::new(&[1]), |acc, i| acc.mul(&Poly(vec![G(1), G::gen_pow(i)])))
}

#[cfg(test)]
mod poly_tests {
    use super::{generator, generator_poly, Poly, G};

    #[test]
    fn test_fixed_generator_matches_product() {
        assert_eq!(generator(), generator_poly(7));
        assert_eq!(generator().len(), 8);
    }

    #[test]
    fn test_generator_roots() {
        let gen = generator();
        for i in 0..7 {
            assert_eq!(gen.eval(G::gen_pow(i)), G(0), "alpha^{i} should be a root");
        }
        assert_ne!(gen.eval(G::gen_pow(7)), G(0));
    }

    #[test]
    fn test_shift() {
        let p = Poly::new(&[1, 2]).shift(3);
        assert_eq!(p.to_bytes(), vec![1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_add_aligns_constant_terms() {
        let a = Poly::new(&[1, 2, 3]);
        let b = Poly::new(&[3, 3]);
        assert_eq!((&a + &b).to_bytes(), vec![1, 1, 0]);
        assert_eq!((&b + &a).to_bytes(), vec![1, 1, 0]);
    }

    #[test]
    fn test_rem_of_zero_is_zero() {
        let rem = Poly::new(&[0; 19]).shift(7).rem(&generator());
        assert_eq!(rem.to_bytes(), vec![0; 7]);
    }

    #[test]
    fn test_rem_len_is_divisor_degree() {
        let gen = generator();
        assert_eq!(Poly::new(&[0x80; 26]).rem(&gen).len(), 7);
        assert_eq!(Poly::new(&[5, 6]).rem(&gen).to_bytes(), vec![0, 0, 0, 0, 0, 5, 6]);
    }

    #[test]
    fn test_rem_of_multiple_is_zero() {
        let gen = generator();
        let multiple = Poly::new(&[0x12, 0x34, 0x56]).mul(&gen);
        assert_eq!(multiple.rem(&gen).to_bytes(), vec![0; 7]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Poly::new(&[0, 0]).to_string(), "0");
        assert_eq!(Poly::new(&[1, 0, 2, 1]).to_string(), "x^{3} + \\alpha^{1}x + 1");
        assert_eq!(Poly::new(&[0x80, 0, 3]).to_string(), "\\alpha^{7}x^{2} + \\alpha^{25}");
    }

    #[test]
    fn test_display_in() {
        let p = Poly::new(&[1, 0, 2, 1]);
        assert_eq!(p.display_in('d').to_string(), "d^{3} + \\alpha^{1}d + 1");
        assert_eq!(p.display_in('x').to_string(), p.to_string());
        assert_eq!(Poly::new(&[0]).display_in('r').to_string(), "0");
    }
}
