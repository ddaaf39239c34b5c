//! Hash-indexed lookup from a translation key to its row position.
//!
//! The index stores a 32-bit FNV-1a hash of each key rather than the key itself, so two
//! different keys that hash alike share a slot and the later one wins. Lookups for the
//! shadowed key then resolve to the wrong row; nothing is corrupted.

use std::collections::HashMap;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash of `key`'s UTF-8 bytes.
pub fn hash_key(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Cache from key hash to position in a document's canonical key list.
///
/// Always rebuilt from the key list; never persisted or iterated for output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyIndex {
    positions: HashMap<u32, usize>,
}

impl KeyIndex {
    /// Builds the index for `keys`. Duplicate (or colliding) keys resolve to the last position.
    pub fn build<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut positions = HashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            positions.insert(hash_key(key.as_ref()), position);
        }
        KeyIndex { positions }
    }

    pub fn lookup(&self, key: &str) -> Option<usize> {
        self.positions.get(&hash_key(key)).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
