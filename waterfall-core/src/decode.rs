//! Slice payload decoding: base64 → little-endian f32 power values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::DecodeError;
use crate::types::{RawSlice, Slice, SliceStore};

/// Decode one base64 payload into power values (dB).
pub fn decode_power(encoded: &str) -> Result<Vec<f32>, DecodeError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    if bytes.len() % 4 != 0 {
        return Err(DecodeError::Length(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn decode_raw(raw: &RawSlice) -> Result<Slice, DecodeError> {
    let data = raw.data.as_deref().ok_or(DecodeError::MissingField("data"))?;
    let sample_rate = raw
        .sample_rate
        .filter(|sr| sr.is_finite() && *sr > 0.0)
        .ok_or(DecodeError::MissingField("sample_rate"))?;
    Ok(Slice { sample_rate, power: decode_power(data)? })
}

/// Decode a single raw slice. Failures are logged and yield `None`.
pub fn decode_slice(index: usize, raw: &RawSlice) -> Option<Slice> {
    match decode_raw(raw) {
        Ok(slice) => Some(slice),
        Err(e) => {
            log::warn!("Skipping slice {index}: {e}");
            None
        }
    }
}

/// Decode every slice of a capture. A corrupt slice leaves an empty slot
/// rather than failing the whole set.
pub fn decode_slices(raw: &[RawSlice]) -> SliceStore {
    let slots: Vec<Option<Slice>> = raw
        .iter()
        .enumerate()
        .map(|(i, r)| decode_slice(i, r))
        .collect();
    let store = SliceStore::new(slots);
    log::info!(
        "Decoded {} of {} waterfall slices ({} bins)",
        store.valid_count(),
        store.total(),
        store.bins()
    );
    store
}

/// Encode power values the way the server does. Used by tests and fixtures.
pub fn encode_power(power: &[f32]) -> String {
    let bytes: Vec<u8> = power.iter().flat_map(|v| v.to_le_bytes()).collect();
    STANDARD.encode(bytes)
}
