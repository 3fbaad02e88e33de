//! Murmur2 hashing for short CSS tokens.
//!
//! This replicates the `murmur2_gc` variant used by the JavaScript CSS-in-JS
//! tooling this library interoperates with: the 32-bit state is folded over
//! the input bytes and rendered in base36, so hashing the same rule text on
//! either side of a JS boundary produces the same token. The JS original
//! splits every multiplication into 16-bit halves to dodge float precision;
//! on a real `u32` that entire dance is just `wrapping_mul`.

const M: u32 = 0x5bd1e995;

/// Hash `input` into a short base36 token.
///
/// Deterministic across runs, machines and platforms. The seed is part of the
/// public contract (the JS side exposes it too); callers that do not need
/// domain separation pass `0`.
pub fn hash(input: &str, seed: u32) -> String {
  to_base36(murmur2(input.as_bytes(), seed))
}

fn murmur2(bytes: &[u8], seed: u32) -> u32 {
  let mut h = seed ^ bytes.len() as u32;

  let mut chunks = bytes.chunks_exact(4);
  for chunk in &mut chunks {
    let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    h = h.wrapping_mul(M) ^ scramble(k);
  }

  let tail = chunks.remainder();
  if !tail.is_empty() {
    if tail.len() == 3 {
      h ^= (tail[2] as u32) << 16;
    }
    if tail.len() >= 2 {
      h ^= (tail[1] as u32) << 8;
    }
    h ^= tail[0] as u32;
    h = h.wrapping_mul(M);
  }

  h ^= h >> 13;
  h = h.wrapping_mul(M);
  h ^= h >> 15;
  h
}

#[inline]
fn scramble(k: u32) -> u32 {
  let mut k = k.wrapping_mul(M);
  k ^= k >> 24;
  k.wrapping_mul(M)
}

fn to_base36(mut value: u32) -> String {
  const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

  if value == 0 {
    return "0".to_string();
  }

  // u32::MAX is 7 base36 digits.
  let mut buf = [0u8; 7];
  let mut at = buf.len();
  while value > 0 {
    at -= 1;
    buf[at] = ALPHABET[(value % 36) as usize];
    value /= 36;
  }

  buf[at..].iter().map(|&b| b as char).collect()
}
