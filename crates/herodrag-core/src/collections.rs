//! Collection aliases shared by the herodrag crates.
//!
//! Maps default to `rustc-hash`; the `std-hash` feature swaps in the standard
//! SipHash maps.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
}

/// Listener storage. Transitions rarely carry more than two observers.
pub type ListenerVec<T> = smallvec::SmallVec<[T; 2]>;
