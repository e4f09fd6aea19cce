//! Deterministic hash-based identity for host types and members.
//!
//! [`TypeHash`] is a 64-bit hash computed from a host type's qualified name or
//! from a method's owner, name and parameter types. The same input always
//! produces the same hash, so candidate signatures discovered from the host
//! catalog can be compared and cached without holding on to the catalog.
//!
//! # Examples
//!
//! ```
//! use quill_core::TypeHash;
//!
//! let a = TypeHash::from_name("System.Text.StringBuilder");
//! let b = TypeHash::from_name("System.Text.StringBuilder");
//! assert_eq!(a, b);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant for parameter chaining.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for instance method hashes.
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for static method hashes.
    pub const STATIC_METHOD: u64 = 0x5ea77ffbcdf5f302;

    /// Parameter position mixing constants.
    pub const PARAM_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
    ];
}

/// A deterministic 64-bit hash identifying a host type or method.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a qualified host type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from owner type, name and parameter types.
    ///
    /// Static and instance methods with the same shape hash differently.
    /// Parameter order matters.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, params: &[TypeHash], is_static: bool) -> Self {
        let domain = if is_static {
            hash_constants::STATIC_METHOD
        } else {
            hash_constants::METHOD
        };
        let mut hash = domain ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        for (i, param) in params.iter().enumerate() {
            let marker = hash_constants::PARAM_MARKERS
                .get(i)
                .copied()
                .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
            // wrapping_mul keeps the chain order-sensitive
            hash = hash
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(marker ^ param.0);
        }
        TypeHash(hash)
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
