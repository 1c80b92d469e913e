//! Save/load persistence with integrity verification
//!
//! Layered codec, applied on every accepted transition:
//! - state JSON (exact bytes are what gets checksummed)
//! - SHA-256 checksum + timestamp envelope
//! - XOR keystream under an embedded secret
//! - base64 blob in LocalStorage under a fixed key
//!
//! The embedded secret makes saves tamper-evident against casual editing;
//! it ships in the client and is not a cryptographic trust boundary. A save
//! that fails any layer is treated as absent, never partially trusted.

use std::fmt;
use std::fmt::Write as _;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::game::GameState;

/// LocalStorage key
pub const STORAGE_KEY: &str = "blob_game_save";

/// Obfuscation secret baked into the client
const SAVE_SECRET: &[u8] = b"blob-clicker-save-v1";

/// What actually goes over the storage boundary
#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    /// The state's exact JSON, checksummed as written
    state: String,
    /// Hex SHA-256 of `state`
    checksum: String,
    /// Epoch ms at save time
    timestamp: u64,
}

/// Why a stored blob was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Not valid base64/UTF-8/JSON once unwrapped
    Malformed,
    /// Envelope parsed but the payload does not match its checksum
    ChecksumMismatch,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed => write!(f, "save data is malformed"),
            DecodeError::ChecksumMismatch => write!(f, "save data failed checksum verification"),
        }
    }
}

fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// XOR with a keystream of SHA-256 blocks derived from the secret and a
/// block counter. Symmetric: applying it twice restores the input.
fn keystream_xor(data: &mut [u8]) {
    for (block_index, chunk) in data.chunks_mut(32).enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(SAVE_SECRET);
        hasher.update((block_index as u64).to_le_bytes());
        let block = hasher.finalize();
        for (byte, key) in chunk.iter_mut().zip(block) {
            *byte ^= key;
        }
    }
}

/// Wrap a state snapshot into an opaque storage blob
pub fn encode_save(state: &GameState, timestamp_ms: u64) -> Result<String, serde_json::Error> {
    let state_json = serde_json::to_string(state)?;
    let envelope = SaveEnvelope {
        checksum: sha256_hex(state_json.as_bytes()),
        state: state_json,
        timestamp: timestamp_ms,
    };
    let mut bytes = serde_json::to_vec(&envelope)?;
    keystream_xor(&mut bytes);
    Ok(STANDARD.encode(&bytes))
}

/// Unwrap a storage blob, verifying the checksum before trusting the state
pub fn decode_save(blob: &str) -> Result<GameState, DecodeError> {
    let mut bytes = STANDARD
        .decode(blob.trim())
        .map_err(|_| DecodeError::Malformed)?;
    keystream_xor(&mut bytes);
    let envelope: SaveEnvelope =
        serde_json::from_slice(&bytes).map_err(|_| DecodeError::Malformed)?;

    if sha256_hex(envelope.state.as_bytes()) != envelope.checksum {
        return Err(DecodeError::ChecksumMismatch);
    }
    serde_json::from_str(&envelope.state).map_err(|_| DecodeError::Malformed)
}

/// Persist a snapshot to LocalStorage (WASM only). Failures are logged and
/// non-fatal; the state keeps living in memory and the next write recovers
/// durability.
#[cfg(target_arch = "wasm32")]
pub fn save(state: &GameState) {
    let blob = match encode_save(state, js_sys::Date::now() as u64) {
        Ok(blob) => blob,
        Err(e) => {
            log::warn!("Failed to encode save: {e}");
            return;
        }
    };

    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if storage.set_item(STORAGE_KEY, &blob).is_err() {
            log::warn!("Failed to write save to LocalStorage");
        }
    }
}

/// Load the saved state from LocalStorage (WASM only). Anything short of a
/// verified envelope means no save.
#[cfg(target_arch = "wasm32")]
pub fn load() -> Option<GameState> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    let blob = storage.get_item(STORAGE_KEY).ok()??;

    match decode_save(&blob) {
        Ok(state) => {
            log::info!(
                "Loaded save: level {}, {:.0} points",
                state.level,
                state.points
            );
            Some(state)
        }
        Err(e) => {
            log::warn!("Ignoring saved game: {e}");
            None
        }
    }
}

/// Remove the saved state (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn clear() {
    if let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    {
        let _ = storage.remove_item(STORAGE_KEY);
        log::info!("Saved game cleared");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn save(_state: &GameState) {
    // No-op for native
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> Option<GameState> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear() {
    // No-op for native
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn populated_state() -> GameState {
        let mut state = GameState::new();
        state.points = 1234.5;
        state.points_per_click = 3.0;
        state.level = 7;
        state.experience = 42.25;
        state.experience_to_next = 759.0;
        state.combo = 4;
        state.combo_timer = Some(1_700_000_000_123.0);
        state.upgrades.click_power = 2;
        state.upgrades.auto_clicker = 5;
        state.achievements.total_clicks = 999;
        state.achievements.max_combo = 31;
        state.achievements.colors_unlocked.insert("#ff0000".into());
        state.achievements.colors_unlocked.insert("#00ff00".into());
        state
    }

    #[test]
    fn test_round_trip() {
        let state = populated_state();
        let blob = encode_save(&state, 1_700_000_000_000).unwrap();
        let restored = decode_save(&blob).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_default_state_round_trip() {
        let state = GameState::new();
        let blob = encode_save(&state, 0).unwrap();
        assert_eq!(decode_save(&blob).unwrap(), state);
    }

    #[test]
    fn test_blob_is_opaque() {
        let blob = encode_save(&populated_state(), 0).unwrap();
        assert!(!blob.contains("points"));
        assert!(!blob.contains("checksum"));
    }

    #[test]
    fn test_keystream_is_symmetric() {
        let original = b"some save bytes, longer than one keystream block....".to_vec();
        let mut data = original.clone();
        keystream_xor(&mut data);
        assert_ne!(data, original);
        keystream_xor(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        // A forged envelope: edited state, original checksum
        let state = populated_state();
        let honest_json = serde_json::to_string(&state).unwrap();
        let forged_json = honest_json.replace("1234.5", "9999999.0");
        assert_ne!(honest_json, forged_json);

        let envelope = SaveEnvelope {
            checksum: sha256_hex(honest_json.as_bytes()),
            state: forged_json,
            timestamp: 0,
        };
        let mut bytes = serde_json::to_vec(&envelope).unwrap();
        keystream_xor(&mut bytes);
        let blob = STANDARD.encode(&bytes);

        assert_eq!(decode_save(&blob), Err(DecodeError::ChecksumMismatch));
    }

    #[test]
    fn test_any_byte_flip_in_state_payload_is_rejected() {
        let blob = encode_save(&populated_state(), 123).unwrap();
        let mut bytes = STANDARD.decode(&blob).unwrap();
        keystream_xor(&mut bytes);

        // Locate the state payload inside the envelope JSON; its bytes are
        // exactly what the checksum covers
        let text = String::from_utf8(bytes.clone()).unwrap();
        let start = text.find("\"state\":\"").unwrap() + "\"state\":\"".len();
        let end = text.find("\",\"checksum\"").unwrap();
        assert!(start < end);

        for index in (start..end).step_by(5) {
            let mut tampered = bytes.clone();
            tampered[index] ^= 0x01;
            keystream_xor(&mut tampered);
            let tampered_blob = STANDARD.encode(&tampered);
            assert!(
                decode_save(&tampered_blob).is_err(),
                "flip at byte {index} accepted"
            );
        }
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(decode_save("not base64 at all!!!"), Err(DecodeError::Malformed));
        assert_eq!(decode_save(""), Err(DecodeError::Malformed));
        // Valid base64, wrong keystream/shape underneath
        assert_eq!(
            decode_save(&STANDARD.encode(b"random bytes")),
            Err(DecodeError::Malformed)
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip_any_reachable_numbers(
            points in 0.0f64..1e12,
            level in 1u32..500,
            clicks in 0u64..1_000_000,
        ) {
            let mut state = GameState::new();
            state.points = points;
            state.level = level;
            state.achievements.total_clicks = clicks;
            let blob = encode_save(&state, 1).unwrap();
            prop_assert_eq!(decode_save(&blob).unwrap(), state);
        }
    }
}
