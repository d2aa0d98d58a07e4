// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("gridscape_view requires either the `std` or the `libm` feature");

#[inline]
fn round(v: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        v.round()
    }
    #[cfg(all(not(feature = "std"), feature = "libm"))]
    {
        libm::round(v)
    }
}

/// Round to two decimal places, half away from zero.
#[inline]
pub(crate) fn round2(v: f64) -> f64 {
    round(v * 100.0) / 100.0
}
