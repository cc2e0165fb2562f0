// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// Greatest common divisor of two non-zero values.
fn gcd(mut a: usize, mut b: usize) -> usize {
    let mut c = a % b;

    while c != 0 {
        a = b;
        b = c;
        c = a % b;
    }

    b
}

/// Exchange the block `[start, mid)` (non-options) with the block
/// `[mid, end)` (options), keeping the relative order of the elements
/// in each block.
///
/// The span is split into `gcd(mid - start, end - mid)` cycles which are
/// walked in place, so every element is moved by a single swap.
///
/// An empty block on either side leaves the span untouched.
pub(crate) fn permute<T>(args: &mut [T], start: usize, mid: usize, end: usize) {
    debug_assert!(start <= mid && mid <= end && end <= args.len());

    let nonopts = mid - start;
    let opts = end - mid;

    if nonopts == 0 || opts == 0 {
        return;
    }

    let cycles = gcd(nonopts, opts);
    let cycle_len = (end - start) / cycles;

    for i in 0..cycles {
        let cycle_start = mid + i;
        let mut pos = cycle_start;

        for _ in 0..cycle_len {
            if pos >= mid {
                pos -= nonopts;
            } else {
                pos += opts;
            }

            args.swap(pos, cycle_start);
        }
    }
}
