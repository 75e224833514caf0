use rand::{rngs::StdRng, Rng};

use crate::constants::MAGIC_MAX_ATTEMPTS;

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Per-square multiply-shift lookup for one sliding piece family.
/// `(occupancy & mask) * magic >> shift` indexes `table` without
/// collisions that map different attack sets to the same slot.
pub struct Magic {
    pub mask: u64,
    pub magic: u64,
    pub shift: u32,
    table: Vec<u64>,
}

impl Magic {
    #[inline]
    pub fn lookup(&self, occupancy: u64) -> u64 {
        let blockers = occupancy & self.mask;
        let index = (blockers.wrapping_mul(self.magic) >> self.shift) as usize;
        self.table[index]
    }
}

fn in_bounds(rank: i32, file: i32) -> bool {
    (0..8).contains(&rank) && (0..8).contains(&file)
}

fn to_square(rank: i32, file: i32) -> u64 {
    1u64 << (rank * 8 + file)
}

/// Relevance mask: squares whose occupancy can change the attack set.
/// The terminal square of each ray never blocks anything beyond it, so
/// it is left out; for bishops that removes the whole board edge.
fn relevance_mask(square: usize, directions: &[(i32, i32); 4]) -> u64 {
    let mut mask = 0u64;

    for &(dr, df) in directions {
        let mut rank = (square / 8) as i32 + dr;
        let mut file = (square % 8) as i32 + df;

        while in_bounds(rank + dr, file + df) {
            mask |= to_square(rank, file);
            rank += dr;
            file += df;
        }
    }

    mask
}

/// Ray-cast attack set: step in each direction until blocked or off-board.
/// The blocking square itself is included.
fn ray_attacks(square: usize, blockers: u64, directions: &[(i32, i32); 4]) -> u64 {
    let mut attacks = 0u64;

    for &(dr, df) in directions {
        let mut rank = (square / 8) as i32 + dr;
        let mut file = (square % 8) as i32 + df;

        while in_bounds(rank, file) {
            let bit = to_square(rank, file);
            attacks |= bit;

            if blockers & bit != 0 {
                break;
            }

            rank += dr;
            file += df;
        }
    }

    attacks
}

pub fn bishop_mask(square: usize) -> u64 {
    relevance_mask(square, &BISHOP_DIRECTIONS)
}

pub fn rook_mask(square: usize) -> u64 {
    relevance_mask(square, &ROOK_DIRECTIONS)
}

/// Reference (slow) attack computations, used to build the tables and by
/// tests as ground truth.
pub fn bishop_attacks_slow(square: usize, blockers: u64) -> u64 {
    ray_attacks(square, blockers, &BISHOP_DIRECTIONS)
}

pub fn rook_attacks_slow(square: usize, blockers: u64) -> u64 {
    ray_attacks(square, blockers, &ROOK_DIRECTIONS)
}

/// Expand subset index `index` over the set bits of `mask`.
fn occupancy_subset(index: usize, mask: u64) -> u64 {
    let mut blockers = 0u64;
    let mut bit = 0;

    for square in 0..64 {
        if mask & (1u64 << square) != 0 {
            if index & (1 << bit) != 0 {
                blockers |= 1u64 << square;
            }
            bit += 1;
        }
    }

    blockers
}

/// Search random candidates until one maps every blocker subset to a slot
/// without two subsets with different attack sets colliding. Sparse
/// candidates (AND of three randoms) converge in practice within a few
/// thousand attempts; the budget exists so a broken build fails loudly
/// instead of spinning forever.
fn find_magic(
    square: usize,
    mask: u64,
    directions: &[(i32, i32); 4],
    rng: &mut StdRng,
) -> (u64, u32, Vec<u64>) {
    let relevant_bits = mask.count_ones();
    let shift = 64 - relevant_bits;
    let size = 1usize << relevant_bits;

    let subsets: Vec<(u64, u64)> = (0..size)
        .map(|index| {
            let blockers = occupancy_subset(index, mask);
            (blockers, ray_attacks(square, blockers, directions))
        })
        .collect();

    let mut table = vec![0u64; size];

    for _ in 0..MAGIC_MAX_ATTEMPTS {
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();

        table.iter_mut().for_each(|entry| *entry = 0);
        let mut fail = false;

        for &(blockers, attacks) in &subsets {
            let index = (blockers.wrapping_mul(magic) >> shift) as usize;

            if table[index] == 0 {
                table[index] = attacks;
            } else if table[index] != attacks {
                fail = true;
                break;
            }
        }

        if !fail {
            return (magic, shift, table);
        }
    }

    panic!(
        "Magic search did not converge for square {} within the attempt budget",
        square
    );
}

pub fn build_bishop_magics(rng: &mut StdRng) -> Vec<Magic> {
    (0..64)
        .map(|square| {
            let mask = bishop_mask(square);
            let (magic, shift, table) = find_magic(square, mask, &BISHOP_DIRECTIONS, rng);

            Magic {
                mask,
                magic,
                shift,
                table,
            }
        })
        .collect()
}

pub fn build_rook_magics(rng: &mut StdRng) -> Vec<Magic> {
    (0..64)
        .map(|square| {
            let mask = rook_mask(square);
            let (magic, shift, table) = find_magic(square, mask, &ROOK_DIRECTIONS, rng);

            Magic {
                mask,
                magic,
                shift,
                table,
            }
        })
        .collect()
}
