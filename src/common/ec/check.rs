use super::{galois::G, poly::Poly};
use crate::metadata::ECC_CODEWORDS;

// Syndromes
//------------------------------------------------------------------------------

// Evaluates the codeword at every root of the generator. A clean codeword
// yields all zero syndromes.
pub fn syndromes(codeword: &[u8]) -> [G; ECC_CODEWORDS] {
    let poly = Poly::new(codeword);
    let mut synd = [G(0); ECC_CODEWORDS];
    for (i, s) in synd.iter_mut().enumerate() {
        *s = poly.eval(G::gen_pow(i));
    }
    synd
}

pub fn is_valid_codeword(codeword: &[u8]) -> bool {
    syndromes(codeword).iter().all(|s| s.is_zero())
}
