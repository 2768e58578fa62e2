//! Keccak-f[1600] permutation.
//!
//! The state is 25 lanes indexed `x + 5 * y`. Each of the 24 rounds applies
//! theta, rho, pi, chi and iota in that order.

use super::lanes::{Lane, Lane32, Lane64, LaneWidth};

/// Number of lanes in the state.
pub const LANES: usize = 25;
/// State size in bytes.
pub const STATE_BYTES: usize = 200;
/// Rounds per permutation.
pub const ROUNDS: usize = 24;

pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation offsets, indexed `[x][y]`.
pub const RHO_OFFSETS: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];

#[inline]
const fn idx(x: usize, y: usize) -> usize {
    x + 5 * y
}

fn theta<L: Lane>(a: &mut [L; LANES]) {
    let mut c = [L::ZERO; 5];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = a[idx(x, 0)]
            .xor(a[idx(x, 1)])
            .xor(a[idx(x, 2)])
            .xor(a[idx(x, 3)])
            .xor(a[idx(x, 4)]);
    }
    for x in 0..5 {
        let d = c[(x + 4) % 5].xor(c[(x + 1) % 5].rotate_left(1));
        for y in 0..5 {
            a[idx(x, y)] = a[idx(x, y)].xor(d);
        }
    }
}

fn rho<L: Lane>(a: &mut [L; LANES]) {
    for x in 0..5 {
        for y in 0..5 {
            a[idx(x, y)] = a[idx(x, y)].rotate_left(RHO_OFFSETS[x][y]);
        }
    }
}

/// `(x, y) -> (y, 2x + 3y mod 5)`
fn pi<L: Lane>(a: &mut [L; LANES]) {
    let src = *a;
    for x in 0..5 {
        for y in 0..5 {
            a[idx(y, (2 * x + 3 * y) % 5)] = src[idx(x, y)];
        }
    }
}

fn chi<L: Lane>(a: &mut [L; LANES]) {
    for y in 0..5 {
        let row = [
            a[idx(0, y)],
            a[idx(1, y)],
            a[idx(2, y)],
            a[idx(3, y)],
            a[idx(4, y)],
        ];
        for x in 0..5 {
            a[idx(x, y)] = row[x].xor(row[(x + 1) % 5].not().and(row[(x + 2) % 5]));
        }
    }
}

fn iota<L: Lane>(a: &mut [L; LANES], round: usize) {
    a[0] = a[0].xor(L::from_u64(ROUND_CONSTANTS[round]));
}

/// Apply the full 24-round permutation in place.
pub fn keccak_f<L: Lane>(state: &mut [L; LANES]) {
    for round in 0..ROUNDS {
        theta(state);
        rho(state);
        pi(state);
        chi(state);
        iota(state, round);
    }
}

/// Permute a `u64` state using the requested lane representation.
pub fn permute(width: LaneWidth, state: &mut [u64; LANES]) {
    match width {
        LaneWidth::Native64 => {
            let mut lanes = state.map(Lane64);
            keccak_f(&mut lanes);
            *state = lanes.map(|l| l.0);
        }
        LaneWidth::Split32 => {
            let mut lanes = state.map(Lane32::from_u64);
            keccak_f(&mut lanes);
            *state = lanes.map(Lane32::to_u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_known_answer() {
        let mut state = [0u64; LANES];
        permute(LaneWidth::Native64, &mut state);
        assert_eq!(state[0], 0xf125_8f79_40e1_dde7);
        assert_eq!(state[1], 0x84d5_ccf9_33c0_478a);
        assert_eq!(state[24], 0xeaf1_ff7b_5cec_a249);
    }

    #[test]
    fn lane_widths_produce_identical_permutations() {
        let mut bytes = [0u8; STATE_BYTES];
        for _ in 0..16 {
            getrandom::fill(&mut bytes).unwrap();
            let mut native = [0u64; LANES];
            for (lane, chunk) in native.iter_mut().zip(bytes.chunks_exact(8)) {
                *lane = u64::from_le_bytes(chunk.try_into().unwrap());
            }
            let mut split = native;

            permute(LaneWidth::Native64, &mut native);
            permute(LaneWidth::Split32, &mut split);

            assert_eq!(native, split);
        }
    }

    #[test]
    fn pi_moves_lanes_to_expected_positions() {
        let mut a = [Lane64(0); LANES];
        for (i, lane) in a.iter_mut().enumerate() {
            *lane = Lane64(i as u64);
        }
        pi(&mut a);
        // (1, 0) -> (0, 2)
        assert_eq!(a[idx(0, 2)], Lane64(idx(1, 0) as u64));
        // (0, 1) -> (1, 3)
        assert_eq!(a[idx(1, 3)], Lane64(idx(0, 1) as u64));
        assert_eq!(a[0], Lane64(0));
    }

    #[test]
    fn rho_leaves_origin_lane_untouched() {
        assert_eq!(RHO_OFFSETS[0][0], 0);
        let mut a = [Lane64(1); LANES];
        rho(&mut a);
        assert_eq!(a[0], Lane64(1));
        assert_eq!(a[idx(1, 0)], Lane64(2));
    }
}
