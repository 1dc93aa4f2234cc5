//! Program-derived address computation
//!
//! Derives addresses that are guaranteed not to lie on the Ed25519 curve,
//! so no private key can ever sign for them. The search counts a one-byte
//! bump down from 255 and accepts the first digest that fails point
//! decompression.

use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use crate::error::PdaError;

/// Maximum number of seeds per derivation.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed, in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Seed prefix for per-user application records.
pub const APPLICATION_SEED: &[u8] = b"prereqs";

/// Seed prefix for per-collection mint authorities.
pub const COLLECTION_AUTHORITY_SEED: &[u8] = b"collection";

/// Domain-separation suffix appended to every derivation hash.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Derive a program address and its bump for the given seeds.
///
/// Starting at 255, each candidate bump hashes
/// `seed₁ ∥ … ∥ seedₙ ∥ bump ∥ program_id ∥ "ProgramDerivedAddress"` with
/// SHA-256; the first digest that is not a valid curve point is returned
/// together with the bump that produced it. Deterministic: identical inputs
/// always yield the identical `(address, bump)` pair.
///
/// The off-curve predicate is Ed25519 compressed-point decompression. When
/// retargeting to an environment with a different addressing scheme, the
/// predicate must be re-derived from that environment's specification.
pub fn derive_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), PdaError> {
    validate_seeds(seeds)?;

    for bump in (0u8..=255).rev() {
        let digest = digest_with_bump(seeds, bump, program_id);
        if !is_on_curve(&digest) {
            return Ok((Pubkey::from(digest), bump));
        }
    }

    Err(PdaError::Exhausted)
}

/// Derive the application record address for a user: seeds `("prereqs", user)`.
pub fn derive_application(user: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8), PdaError> {
    derive_program_address(&[APPLICATION_SEED, user.as_ref()], program_id)
}

/// Derive the mint authority address for a collection: seeds
/// `("collection", collection)`.
pub fn derive_collection_authority(
    collection: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), PdaError> {
    derive_program_address(&[COLLECTION_AUTHORITY_SEED, collection.as_ref()], program_id)
}

fn validate_seeds(seeds: &[&[u8]]) -> Result<(), PdaError> {
    if seeds.is_empty() {
        return Err(PdaError::NoSeeds);
    }
    if seeds.len() > MAX_SEEDS {
        return Err(PdaError::TooManySeeds(seeds.len()));
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(PdaError::SeedTooLong {
                index,
                len: seed.len(),
            });
        }
    }
    Ok(())
}

fn digest_with_bump(seeds: &[&[u8]], bump: u8, program_id: &Pubkey) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_ref());
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}

fn is_on_curve(bytes: &[u8; 32]) -> bool {
    ed25519_dalek::VerifyingKey::from_bytes(bytes).is_ok()
}
