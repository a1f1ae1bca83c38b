use core::panic;
use std::{fmt::Display, mem};

use num_traits::PrimInt;

use super::metadata::TOTAL_CODEWORDS;

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BitStream {
    data: [u8; MAX_PAYLOAD_SIZE],
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(
            capacity <= MAX_PAYLOAD_SIZE << 3,
            "Capacity exceeds payload size: Capacity {capacity}"
        );
        Self { data: [0; MAX_PAYLOAD_SIZE], len: 0, capacity, cursor: 0 }
    }

    pub fn from(inp: &[u8]) -> Self {
        let len = inp.len();
        let bit_len = len << 3;
        let mut data = [0; MAX_PAYLOAD_SIZE];
        data[..len].copy_from_slice(inp);
        Self { data, len: bit_len, capacity: bit_len, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    pub fn bit(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len, "Out of bitstream bounds: Len {}, Pos {pos}", self.len);
        (self.data[pos >> 3] << (pos & 7)) & 0b10000000 != 0
    }

    // Walks every pushed bit without moving the cursor
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bit(i))
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        match size {
            0 => (),
            1..=8 => {
                let bits = bits.to_u8().unwrap_or_default();
                let offset = self.len & 7;
                let pos = self.len >> 3;

                if offset + size <= 8 {
                    self.data[pos] |= bits << (8 - size - offset);
                } else {
                    self.data[pos] |= bits >> (size + offset - 8);
                    self.data[pos + 1] = bits << (16 - size - offset);
                }

                self.len += size;
            }
            9..=16 => {
                let hi = (bits >> 8).to_u8().unwrap_or_default();
                let lo = (bits & T::from(0xFF).unwrap_or_else(T::zero)).to_u8().unwrap_or_default();
                self.push_bits(hi, size - 8);
                self.push_bits(lo, 8);
            }
            _ => panic!("Bits from only u8 and u16 can be pushed"),
        }
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let bit = self.bit(self.cursor);
        self.cursor += 1;

        Some(bit)
    }
}

#[cfg(test)]
mod bit_stream_take_tests {

    use super::BitStream;

    #[test]
    fn test_take_until_exhausted() {
        let mut bs = BitStream::from(&[0b10100000]);
        assert_eq!(bs.next(), Some(true));
        assert_eq!(bs.next(), Some(false));
        assert_eq!(bs.by_ref().count(), 6);
        assert_eq!(bs.next(), None);
        assert_eq!(BitStream::from(&[]).next(), None);
    }

    #[test]
    fn test_iter_and_bits_agree() {
        let data = [0x99, 0x66];
        let bs = BitStream::from(&data);
        let peeked: Vec<bool> = bs.bits().collect();
        let taken: Vec<bool> = bs.clone().collect();
        assert_eq!(peeked, taken);
        assert_eq!(peeked.len(), 16);
        assert!(peeked[0] && !peeked[1] && !peeked[2] && peeked[3]);
    }
}

// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take()
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const MAX_PAYLOAD_SIZE: usize = TOTAL_CODEWORDS;
