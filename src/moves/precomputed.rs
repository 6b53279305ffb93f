use crate::board::components::{BitBoard, Side};

const NUM_DIRS: usize = 8;

/// (rank step, file step) per ray direction; first four orthogonal,
/// last four diagonal
const DIR_STEPS: [(i8, i8); NUM_DIRS] = [
    (1, 0),   // north
    (-1, 0),  // south
    (0, 1),   // east
    (0, -1),  // west
    (1, 1),   // northeast
    (1, -1),  // northwest
    (-1, 1),  // southeast
    (-1, -1), // southwest
];

/// Whether a ray direction scans towards higher square indices. Decides
/// which end of the blocker set is closest to the origin.
const DIR_FORWARD: [bool; NUM_DIRS] = [true, false, true, false, true, true, false, false];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Compile-time attack tables for every non-pawn-push movement pattern.
/// Sliding attacks are assembled at query time from the eight ray tables
/// with blocker truncation.
#[derive(Debug)]
pub struct MoveTables {
    pub knight_moves: [BitBoard; 64],
    pub king_moves: [BitBoard; 64],
    pawn_attacks: [[BitBoard; 64]; 2],
    rays: [[BitBoard; 64]; NUM_DIRS],
}

pub const MOVE_TABLES: MoveTables = MoveTables::new();

const fn step_targets(square: usize, steps: &[(i8, i8)]) -> BitBoard {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut targets = BitBoard(0);

    let mut i = 0;
    while i < steps.len() {
        let (dr, df) = steps[i];
        let r = rank + dr;
        let f = file + df;
        if r >= 0 && r < 8 && f >= 0 && f < 8 {
            targets.set((r * 8 + f) as usize);
        }
        i += 1;
    }
    targets
}

impl MoveTables {
    pub const fn new() -> Self {
        let mut tables = Self {
            knight_moves: [BitBoard(0); 64],
            king_moves: [BitBoard(0); 64],
            pawn_attacks: [[BitBoard(0); 64]; 2],
            rays: [[BitBoard(0); 64]; NUM_DIRS],
        };

        let mut square = 0;
        while square < 64 {
            tables.knight_moves[square] = step_targets(square, &KNIGHT_STEPS);
            tables.king_moves[square] = step_targets(square, &KING_STEPS);
            tables.pawn_attacks[0][square] = step_targets(square, &[(1, -1), (1, 1)]);
            tables.pawn_attacks[1][square] = step_targets(square, &[(-1, -1), (-1, 1)]);

            let mut dir = 0;
            while dir < NUM_DIRS {
                let (dr, df) = DIR_STEPS[dir];
                tables.rays[dir][square] = Self::generate_ray(square, dr, df);
                dir += 1;
            }
            square += 1;
        }

        tables
    }

    const fn generate_ray(square: usize, dr: i8, df: i8) -> BitBoard {
        let mut ray = BitBoard(0);
        let mut r = (square / 8) as i8 + dr;
        let mut f = (square % 8) as i8 + df;

        while r >= 0 && r < 8 && f >= 0 && f < 8 {
            ray.set((r * 8 + f) as usize);
            r += dr;
            f += df;
        }
        ray
    }

    /// Attacked squares along one ray: the full ray truncated at (and
    /// including) the first blocker
    #[inline(always)]
    fn ray_attacks(&self, from: usize, occupied: BitBoard, dir: usize) -> BitBoard {
        let ray = self.rays[dir][from];
        match ray.and(occupied).closest_bit(DIR_FORWARD[dir]) {
            Some(blocker) => ray.and(self.rays[dir][blocker as usize].not()),
            None => ray,
        }
    }

    /// Rook attack set from `from` given full board occupancy. Includes the
    /// first blocker of either color; callers mask out friendly pieces.
    #[inline]
    pub fn rook_attacks(&self, from: usize, occupied: BitBoard) -> BitBoard {
        self.ray_attacks(from, occupied, 0)
            | self.ray_attacks(from, occupied, 1)
            | self.ray_attacks(from, occupied, 2)
            | self.ray_attacks(from, occupied, 3)
    }

    /// Bishop attack set from `from` given full board occupancy
    #[inline]
    pub fn bishop_attacks(&self, from: usize, occupied: BitBoard) -> BitBoard {
        self.ray_attacks(from, occupied, 4)
            | self.ray_attacks(from, occupied, 5)
            | self.ray_attacks(from, occupied, 6)
            | self.ray_attacks(from, occupied, 7)
    }

    #[inline]
    pub fn queen_attacks(&self, from: usize, occupied: BitBoard) -> BitBoard {
        self.rook_attacks(from, occupied) | self.bishop_attacks(from, occupied)
    }

    #[inline(always)]
    pub fn pawn_attacks(&self, from: usize, side: Side) -> BitBoard {
        self.pawn_attacks[side.index()][from]
    }
}

impl Default for MoveTables {
    fn default() -> Self {
        Self::new()
    }
}
