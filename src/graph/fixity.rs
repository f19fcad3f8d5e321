//! Fixity check results for stored binaries

use sha2::{Digest, Sha256, Sha512};
use std::collections::BTreeSet;
use std::fmt;

/// Outcome of comparing a computed checksum and size with expected values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FixityState {
    Success,
    BadChecksum,
    BadSize,
}

impl FixityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixityState::Success => "SUCCESS",
            FixityState::BadChecksum => "BAD_CHECKSUM",
            FixityState::BadSize => "BAD_SIZE",
        }
    }
}

impl fmt::Display for FixityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest algorithms a binary store can compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Digest URI (`urn:<algorithm>:<hex>`) of some content
    pub fn digest_uri(&self, content: &[u8]) -> String {
        let hex = match self {
            DigestAlgorithm::Sha256 => format!("{:x}", Sha256::digest(content)),
            DigestAlgorithm::Sha512 => format!("{:x}", Sha512::digest(content)),
        };
        format!("urn:{}:{}", self.name(), hex)
    }
}

/// What one copy of a binary looked like when it was checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixityResult {
    /// Where the checked copy lives
    pub location: String,
    /// Computed digest, as a URI
    pub digest: String,
    /// Computed size in bytes
    pub size: u64,
}

impl FixityResult {
    pub fn new(location: impl Into<String>, digest: impl Into<String>, size: u64) -> Self {
        Self {
            location: location.into(),
            digest: digest.into(),
            size,
        }
    }

    /// Check a copy's content directly
    pub fn compute(location: impl Into<String>, content: &[u8], algorithm: DigestAlgorithm) -> Self {
        Self::new(location, algorithm.digest_uri(content), content.len() as u64)
    }

    /// Compare against what the repository expects
    pub fn status(&self, expected_size: u64, expected_digest: &str) -> BTreeSet<FixityState> {
        let mut states = BTreeSet::new();
        if self.digest != expected_digest {
            states.insert(FixityState::BadChecksum);
        }
        if self.size != expected_size {
            states.insert(FixityState::BadSize);
        }
        if states.is_empty() {
            states.insert(FixityState::Success);
        }
        states
    }

    pub fn matches(&self, expected_size: u64, expected_digest: &str) -> bool {
        self.status(expected_size, expected_digest).contains(&FixityState::Success)
    }
}
