//! Float16 embedding codec.
//!
//! Binary layout: `[count: u32 LE][dim: u32 LE][count * dim half-precision
//! floats, LE]`. No trailing bytes, no other headers.

use half::f16;

use crate::error::{Result, SearchError};

const HEADER_LEN: usize = 8;

/// Decode a byte sequence into `count` vectors of length `dim`, each
/// promoted to single precision. NaN, +/-infinity, and subnormal payload
/// values are preserved, not rejected.
pub fn decode(input: &[u8]) -> Result<Vec<Vec<f32>>> {
    let (count, dim) = peek_header(input)?;

    let expected = HEADER_LEN + count * dim * 2;
    if input.len() < expected {
        return Err(SearchError::TruncatedPayload {
            expected,
            got: input.len(),
        });
    }

    let mut vectors = Vec::with_capacity(count);
    let mut offset = HEADER_LEN;
    for _ in 0..count {
        let mut vec = Vec::with_capacity(dim);
        for _ in 0..dim {
            let word = u16::from_le_bytes([input[offset], input[offset + 1]]);
            vec.push(f16::from_bits(word).to_f32());
            offset += 2;
        }
        vectors.push(vec);
    }

    Ok(vectors)
}

/// Read only the `count` field from the 8-byte header.
pub fn peek_count(input: &[u8]) -> Result<usize> {
    peek_header(input).map(|(count, _)| count)
}

/// Read only the `dim` field from the 8-byte header.
pub fn peek_dim(input: &[u8]) -> Result<usize> {
    peek_header(input).map(|(_, dim)| dim)
}

fn peek_header(input: &[u8]) -> Result<(usize, usize)> {
    if input.len() < HEADER_LEN {
        return Err(SearchError::TruncatedHeader { got: input.len() });
    }
    let count = u32::from_le_bytes([input[0], input[1], input[2], input[3]]) as usize;
    let dim = u32::from_le_bytes([input[4], input[5], input[6], input[7]]) as usize;
    Ok((count, dim))
}

/// Encode single-precision vectors back into the same binary layout.
/// Round-trips exactly for values representable in both formats. Exposed
/// mainly for tests and fixture generation.
pub fn encode(vectors: &[Vec<f32>]) -> Vec<u8> {
    let count = vectors.len() as u32;
    let dim = vectors.first().map(|v| v.len()).unwrap_or(0) as u32;

    let mut out = Vec::with_capacity(HEADER_LEN + (count as usize) * (dim as usize) * 2);
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&dim.to_le_bytes());
    for v in vectors {
        for &x in v {
            out.extend_from_slice(&f16::from_f32(x).to_bits().to_le_bytes());
        }
    }
    out
}
