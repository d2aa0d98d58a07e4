// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("gridscape_index requires either the `std` or the `libm` feature");

#[inline]
pub(crate) fn ceil(v: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        v.ceil()
    }
    #[cfg(all(not(feature = "std"), feature = "libm"))]
    {
        libm::ceil(v)
    }
}

#[inline]
pub(crate) fn floor(v: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        v.floor()
    }
    #[cfg(all(not(feature = "std"), feature = "libm"))]
    {
        libm::floor(v)
    }
}
