use crate::evaluation::mobility::MobilityInfo;

const CACHE_SIZE: usize = 1 << 16;

/// Generation value that can never be live; freshly wiped entries carry it
const INVALID_GENERATION: u8 = 0;

#[derive(Clone, Copy, Debug, Default)]
struct CacheEntry {
    fingerprint: u64,
    info: MobilityInfo,
    generation: u8,
}

/// Direct-mapped, generation-tagged memo of per-position mobility counts.
///
/// Each fingerprint owns exactly one slot (`fingerprint mod size`); a new
/// key silently evicts whatever lived there. `clear` bumps the generation
/// instead of touching the table, so stale entries fail the generation
/// match and routine clears stay O(1). Only the u8 wraparound pays for a
/// full wipe.
///
/// Not internally synchronized; one instance per search worker.
pub struct MobilityCache {
    entries: Vec<CacheEntry>,
    generation: u8,
}

impl MobilityCache {
    pub fn new() -> Self {
        Self {
            entries: vec![CacheEntry::default(); CACHE_SIZE],
            generation: INVALID_GENERATION + 1,
        }
    }

    #[inline(always)]
    fn index(fingerprint: u64) -> usize {
        fingerprint as usize & (CACHE_SIZE - 1)
    }

    /// Cached info for `fingerprint`, if the slot holds this exact key and
    /// was written in the current generation
    #[inline]
    pub fn probe(&self, fingerprint: u64) -> Option<MobilityInfo> {
        let entry = &self.entries[Self::index(fingerprint)];
        if entry.fingerprint == fingerprint && entry.generation == self.generation {
            Some(entry.info)
        } else {
            None
        }
    }

    /// Unconditionally overwrites the slot for `fingerprint`
    #[inline]
    pub fn store(&mut self, fingerprint: u64, info: MobilityInfo) {
        self.entries[Self::index(fingerprint)] = CacheEntry {
            fingerprint,
            info,
            generation: self.generation,
        };
    }

    /// Logically invalidates every entry. O(1) except on generation
    /// wraparound, which wipes the table.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == INVALID_GENERATION {
            self.entries.fill(CacheEntry::default());
            self.generation = INVALID_GENERATION + 1;
        }
    }
}

impl Default for MobilityCache {
    fn default() -> Self {
        Self::new()
    }
}
