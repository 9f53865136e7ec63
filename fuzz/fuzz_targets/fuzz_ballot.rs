// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use libfuzzer_sys::fuzz_target;
use weekly_gallery::gallery::parse_ballot;

fuzz_target!(|data: &[u8]| {
    if let Ok(tallies) = parse_ballot(data) {
        assert!(tallies.windows(2).all(|w| w[0].votes >= w[1].votes));
    }
});
