//! Logging shims that forward to `defmt` when the `defmt` feature is enabled.
//!
//! Without the feature the arguments are still borrowed, so call sites stay
//! type-checked and warning-free in both builds.

#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        {
            let _ = ($( &$x ),*);
        }
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        {
            let _ = ($( &$x ),*);
        }
    }};
}

pub(crate) use debug;
pub(crate) use trace;
