//! Identifiers
//!
//! Objects and projects are keyed by short opaque strings (9 base-36
//! characters). They carry no meaning and are never parsed; the only
//! guarantee is uniqueness within a session, which `IdGenerator` enforces by
//! remembering every id it has issued or been shown.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Length of a generated identifier
pub const ID_LEN: usize = 9;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a scene object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

/// Identifier of a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

macro_rules! id_impls {
    ($ty:ident) => {
        impl $ty {
            /// Wrap an existing identifier string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_impls!(ObjectId);
id_impls!(ProjectId);

/// Draw one random identifier string from the given rng
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Session-scoped identifier source
///
/// Every id handed out, plus every id registered through [`IdGenerator::observe`],
/// is remembered so a later draw can never repeat it.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl IdGenerator {
    /// Create a generator seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    /// Create a deterministic generator (tests)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    fn next_raw(&mut self) -> String {
        loop {
            let candidate = random_id(&mut self.rng);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            log::debug!("id collision on {}, redrawing", candidate);
        }
    }

    pub fn object_id(&mut self) -> ObjectId {
        ObjectId(self.next_raw())
    }

    pub fn project_id(&mut self) -> ProjectId {
        ProjectId(self.next_raw())
    }

    /// Mark an externally produced id (e.g. loaded from storage) as taken
    pub fn observe(&mut self, id: &str) {
        self.issued.insert(id.to_string());
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
