use crate::prelude::*;

pub const HISTORY_MAX: i32 = 16_384;

/// Per-side, per-(from, to) decaying goodness statistic for quiet move
/// ordering. Owned and cleared by the search loop between searches.
///
/// The update is a bounded exponential moving average:
/// `entry += bonus - entry * |bonus| / HISTORY_MAX`, then clamp. Repeated
/// identical bonuses converge the entry towards that bonus instead of
/// growing without bound.
pub struct MobilityHistory {
    table: Box<[[[i16; NUM_SQUARES]; NUM_SQUARES]; NUM_SIDES]>,
}

impl MobilityHistory {
    pub fn new() -> Self {
        Self {
            table: Box::new([[[0; NUM_SQUARES]; NUM_SQUARES]; NUM_SIDES]),
        }
    }

    #[inline(always)]
    pub fn get(&self, side: Side, mv: Move) -> i32 {
        self.table[side.index()][mv.from_idx() as usize][mv.to_idx() as usize] as i32
    }

    #[inline]
    pub fn update(&mut self, side: Side, mv: Move, bonus: i32) {
        let entry = &mut self.table[side.index()][mv.from_idx() as usize][mv.to_idx() as usize];
        let current = *entry as i32;
        let updated = current + bonus - current * bonus.abs() / HISTORY_MAX;
        *entry = updated.clamp(-HISTORY_MAX, HISTORY_MAX) as i16;
    }

    pub fn clear(&mut self) {
        for side in self.table.iter_mut() {
            for from in side.iter_mut() {
                from.fill(0);
            }
        }
    }
}

impl Default for MobilityHistory {
    fn default() -> Self {
        Self::new()
    }
}
