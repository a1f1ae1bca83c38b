mod check;
mod galois;
mod poly;

pub use check::*;
pub use galois::*;
pub use poly::*;
