//! Byte order normalization between the big-endian stream and the host.
//!
//! Every scalar field crosses this module exactly once per direction: the
//! decoder copies the stream bytes out and calls [`normalize`] before
//! interpreting them in host order, and the serializer takes host-order bytes
//! and calls [`normalize`] before writing them.

/// True when the host byte order differs from the stream's big-endian order.
pub const HOST_NEEDS_SWAP: bool = cfg!(target_endian = "little");

/// Swap `bytes` in place between stream order and host order.
///
/// A no-op on big-endian hosts.
///
/// # Panics
/// Panics if `bytes.len()` is not 2, 4 or 8. Callers only ever pass fixed
/// scalar widths, so any other length is a programming error.
#[inline]
pub fn normalize(bytes: &mut [u8]) {
    assert!(
        matches!(bytes.len(), 2 | 4 | 8),
        "unsupported scalar width {}",
        bytes.len()
    );
    if HOST_NEEDS_SWAP {
        bytes.reverse();
    }
}

#[inline]
fn take<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut raw = [0u8; N];
    raw.copy_from_slice(&bytes[offset..offset + N]);
    normalize(&mut raw);
    raw
}

// ============================================================================
// Readers (stream order -> host values)
// ============================================================================
// Callers validate the payload length first; an out-of-range offset panics.

/// Read a u32 stored in stream order at `offset`.
#[inline]
pub fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_ne_bytes(take(bytes, offset))
}

/// Read an i32 stored in stream order at `offset`.
#[inline]
pub fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_ne_bytes(take(bytes, offset))
}

/// Read an i16 stored in stream order at `offset`.
#[inline]
pub fn read_i16(bytes: &[u8], offset: usize) -> i16 {
    i16::from_ne_bytes(take(bytes, offset))
}

/// Read an f64 stored in stream order at `offset`.
#[inline]
pub fn read_f64(bytes: &[u8], offset: usize) -> f64 {
    f64::from_ne_bytes(take(bytes, offset))
}

// ============================================================================
// Writers (host values -> stream order)
// ============================================================================

#[inline]
fn put<const N: usize>(out: &mut Vec<u8>, mut raw: [u8; N]) {
    normalize(&mut raw);
    out.extend_from_slice(&raw);
}

/// Append a u32 in stream order.
#[inline]
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    put(out, value.to_ne_bytes());
}

/// Append an i32 in stream order.
#[inline]
pub fn write_i32(out: &mut Vec<u8>, value: i32) {
    put(out, value.to_ne_bytes());
}

/// Append an i16 in stream order.
#[inline]
pub fn write_i16(out: &mut Vec<u8>, value: i16) {
    put(out, value.to_ne_bytes());
}

/// Append an f64 in stream order.
#[inline]
pub fn write_f64(out: &mut Vec<u8>, value: f64) {
    put(out, value.to_ne_bytes());
}
