use super::error::{QRError, QRResult};

// Parsing of digit strings supplied by callers
//------------------------------------------------------------------------------

fn significant_chars(inp: &str) -> impl Iterator<Item = char> + '_ {
    inp.chars().filter(|c| !c.is_whitespace())
}

pub fn parse_bits(inp: &str) -> QRResult<Vec<bool>> {
    significant_chars(inp)
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(QRError::InvalidDigit(c)),
        })
        .collect()
}

pub fn parse_binary(inp: &str) -> QRResult<Vec<u8>> {
    let bits = parse_bits(inp)?;
    if bits.len() % 8 != 0 {
        return Err(QRError::MisalignedDigits { len: bits.len(), group: 8 });
    }
    Ok(bits.chunks_exact(8).map(|c| c.iter().fold(0u8, |b, &bit| (b << 1) | bit as u8)).collect())
}

pub fn parse_hex(inp: &str) -> QRResult<Vec<u8>> {
    let nibbles = significant_chars(inp)
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(QRError::InvalidDigit(c)))
        .collect::<QRResult<Vec<_>>>()?;
    if nibbles.len() % 2 != 0 {
        return Err(QRError::MisalignedDigits { len: nibbles.len(), group: 2 });
    }
    Ok(nibbles.chunks_exact(2).map(|c| (c[0] << 4) | c[1]).collect())
}

// Formatting for stage records
//------------------------------------------------------------------------------

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ")
}

pub fn to_binary(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:08b}")).collect::<Vec<_>>().join(" ")
}

pub fn to_bit_string(bits: impl Iterator<Item = bool>) -> String {
    bits.map(|b| if b { '1' } else { '0' }).collect()
}

// Splits a bit string into space separated groups of eight
pub fn group_bits(bits: &str) -> String {
    bits.as_bytes()
        .chunks(8)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
