//! CRC-32 (IEEE 802.3 / ISO 3309) checksum engine.
//!
//! The container header is protected by a CRC-32 that is accumulated field by
//! field while the header is written or read. Two styles are offered:
//!
//! - [`Crc32`]: a streaming state that is updated with successive slices.
//! - [`crc32`] / [`crc32_slurp`]: free functions working on *finalized*
//!   values, so a checksum can be carried around as a plain `u32` and resumed
//!   later. `crc32_slurp(crc32(a), b) == crc32(a ++ b)`.
//!
//! ## Tables
//!
//! All lookup tables are evaluated at compile time. Inputs of
//! [`SLICING_THRESHOLD`] bytes or more are folded eight bytes at a time,
//! shorter inputs one byte at a time. Both paths produce identical results.

/// Reflected IEEE polynomial.
pub const CRC32_POLYNOMIAL: u32 = 0xEDB88320;

/// Inputs at least this long use the slicing-by-8 path.
pub const SLICING_THRESHOLD: usize = 16;

const INIT: u32 = 0xFFFF_FFFF;

/// `SLICES[0]` is the classic byte table; `SLICES[k][b]` advances the
/// register by `b` followed by `k` zero bytes.
const SLICES: [[u32; 256]; 8] = {
    let mut slices = [[0u32; 256]; 8];

    let mut byte = 0;
    while byte < 256 {
        let mut reg = byte as u32;
        let mut bit = 0;
        while bit < 8 {
            let mask = (reg & 1).wrapping_neg();
            reg = (reg >> 1) ^ (CRC32_POLYNOMIAL & mask);
            bit += 1;
        }
        slices[0][byte] = reg;
        byte += 1;
    }

    let mut k = 1;
    while k < 8 {
        let mut byte = 0;
        while byte < 256 {
            let below = slices[k - 1][byte];
            slices[k][byte] = (below >> 8) ^ slices[0][(below & 0xFF) as usize];
            byte += 1;
        }
        k += 1;
    }

    slices
};

/// Streaming CRC-32 calculator.
///
/// Register preset and output XOR are both `0xFFFFFFFF`.
///
/// # Example
///
/// ```
/// use pensieve_core::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"Hello, ");
/// crc.update(b"World!");
/// assert_eq!(crc.finalize(), 0xEC4AC3D0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32 {
    register: u32,
}

impl Crc32 {
    /// Start a fresh checksum.
    pub fn new() -> Self {
        Self { register: INIT }
    }

    /// Continue a checksum from a previously finalized value.
    ///
    /// `Crc32::resume(0)` is equivalent to `Crc32::new()`.
    pub fn resume(value: u32) -> Self {
        Self {
            register: value ^ INIT,
        }
    }

    /// Forget everything folded so far.
    pub fn reset(&mut self) {
        self.register = INIT;
    }

    /// Fold `data` into the checksum.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.register = if data.len() >= SLICING_THRESHOLD {
            fold_sliced(self.register, data)
        } else {
            fold_bytewise(self.register, data)
        };
    }

    /// Checksum of everything folded so far.
    #[inline]
    pub fn value(&self) -> u32 {
        self.register ^ INIT
    }

    /// Consume the state and return the checksum.
    #[inline]
    pub fn finalize(self) -> u32 {
        self.value()
    }

    /// One-shot checksum of `data`.
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// CRC-32 of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    crc32_slurp(0, data)
}

/// Fold `data` into an already finalized CRC-32 value.
///
/// ```
/// use pensieve_core::crc::{crc32, crc32_slurp};
///
/// let whole = crc32(b"123456789");
/// let split = crc32_slurp(crc32(b"1234"), b"56789");
/// assert_eq!(whole, split);
/// ```
pub fn crc32_slurp(current: u32, data: &[u8]) -> u32 {
    let mut crc = Crc32::resume(current);
    crc.update(data);
    crc.finalize()
}

#[inline]
fn fold_bytewise(mut reg: u32, data: &[u8]) -> u32 {
    for &b in data {
        reg = (reg >> 8) ^ SLICES[0][((reg ^ u32::from(b)) & 0xFF) as usize];
    }
    reg
}

#[inline]
fn fold_sliced(mut reg: u32, data: &[u8]) -> u32 {
    let mut blocks = data.chunks_exact(8);

    for block in &mut blocks {
        let low = reg ^ u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        let low = low.to_le_bytes();

        let mut next = 0;
        for (i, &b) in low.iter().chain(&block[4..]).enumerate() {
            next ^= SLICES[7 - i][b as usize];
        }
        reg = next;
    }

    fold_bytewise(reg, blocks.remainder())
}
