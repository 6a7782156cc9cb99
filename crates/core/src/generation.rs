//! Identifier generation strategies
//!
//! | Strategy                            | Deterministic | Notes                                   |
//! |-------------------------------------|---------------|-----------------------------------------|
//! | [`Identifier::random`]              | no            | per-thread entropy-seeded generator     |
//! | [`Identifier::sequential`]          | no            | process-wide counter, tests/debug only  |
//! | [`Identifier::from_seed`]           | yes           | seeded PCG generator                    |
//! | [`Identifier::from_name`]           | yes           | SHA-1 name-based (UUID v5)              |
//! | [`Identifier::from_name_hash`]      | yes           | xxh3 truncated to 32 bits, collision-prone |
//!
//! Random and seeded identifiers carry RFC 4122 version-4 bits, so none of
//! these strategies yields [`Identifier::INVALID`] on ordinary input.
//!
//! ## Generator Handles
//!
//! [`IdentifierGenerator`] is an owned generator that can be passed through
//! a worker context instead of relying on the per-thread default used by
//! [`Identifier::random`].

use crate::identifier::Identifier;
use crate::namespace::IdentifierNamespace;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::warn;
use uuid::Builder;

/// Process-wide counter for [`Identifier::sequential`]
static SEQUENTIAL_COUNTER: AtomicU32 = AtomicU32::new(1);

thread_local! {
    static THREAD_GENERATOR: RefCell<IdentifierGenerator> =
        RefCell::new(IdentifierGenerator::from_entropy());
}

/// Shape 16 random bytes as a version-4 identifier
fn from_random_bytes(bytes: [u8; 16]) -> Identifier {
    Identifier::from_uuid(Builder::from_random_bytes(bytes).into_uuid())
}

/// Owned random identifier generator
///
/// Not shared between threads: each worker owns its own handle. Cloning a
/// handle duplicates its state, so the clone yields the same sequence.
#[derive(Clone)]
pub struct IdentifierGenerator {
    rng: StdRng,
}

impl IdentifierGenerator {
    /// Create a generator seeded from operating system entropy
    pub fn from_entropy() -> Self {
        IdentifierGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible generator from a fixed seed
    ///
    /// The sequence is stable for a given build, which is enough for
    /// deterministic tests. Use [`Identifier::from_seed`] when a single
    /// identifier must be derived from a seed.
    pub fn seeded(seed: u64) -> Self {
        IdentifierGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw the next identifier
    pub fn next_identifier(&mut self) -> Identifier {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        from_random_bytes(bytes)
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for IdentifierGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierGenerator").finish_non_exhaustive()
    }
}

impl Identifier {
    /// Generate a random identifier
    ///
    /// Uses a generator owned by the calling thread, seeded once from
    /// operating system entropy. No locking is involved.
    pub fn random() -> Self {
        THREAD_GENERATOR.with(|generator| generator.borrow_mut().next_identifier())
    }

    /// Generate a sequential identifier for testing/debugging
    ///
    /// Layout: `00000000-0000-0000-0000-0000XXXXXXXX`, where `XXXXXXXX` is a
    /// process-wide counter starting at 1, stored big-endian in the last four
    /// bytes. The counter wraps after `u32::MAX`; the call that wraps it to
    /// zero returns [`Identifier::INVALID`].
    ///
    /// Increments are atomic, but calls from different threads may observe
    /// counter values in any order.
    ///
    /// Not suitable where uniqueness across processes or unpredictability
    /// matters.
    pub fn sequential() -> Self {
        let counter = SEQUENTIAL_COUNTER.fetch_add(1, Ordering::Relaxed);
        if counter == 0 {
            warn!(target: "lodestone::identifier", "Sequential identifier counter wrapped");
        }

        let mut bytes = [0u8; 16];
        bytes[12..].copy_from_slice(&counter.to_be_bytes());
        Identifier::from_bytes(bytes)
    }

    /// Generate a deterministic identifier from a numeric seed
    ///
    /// The same seed always produces the same identifier. Distinct seeds may
    /// collide; no collision detection is performed.
    pub fn from_seed(seed: u32) -> Self {
        let mut rng = Pcg64Mcg::seed_from_u64(u64::from(seed));
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        from_random_bytes(bytes)
    }

    /// Generate a deterministic identifier from a name (UUID v5)
    ///
    /// Hashes the name with SHA-1 under [`IdentifierNamespace::DEFAULT`].
    /// Same name, same identifier; distinct names give distinct identifiers
    /// with cryptographic-hash collision resistance.
    ///
    /// Every caller of this function shares one namespace. Subsystems whose
    /// name domains must not overlap should use
    /// [`IdentifierNamespace::derive`] instead.
    pub fn from_name(name: &str) -> Self {
        IdentifierNamespace::DEFAULT.identifier_for(name)
    }

    /// Generate a deterministic identifier from a hash of a string
    ///
    /// Hashes the string with xxh3, keeps the low 32 bits and passes them to
    /// [`Identifier::from_seed`]. Only 2^32 outcomes exist, so collisions are
    /// far more likely than with [`Identifier::from_name`]. The two functions
    /// produce different identifiers for the same input.
    pub fn from_name_hash(name: &str) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_64(name.as_bytes());
        Self::from_seed(hash as u32)
    }
}

// ============================================================================
// Tests
// ============================================================================
