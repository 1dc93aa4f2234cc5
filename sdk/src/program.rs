//! Instruction builders for the enrollment program
//!
//! The on-chain program is Anchor-built; every instruction is an 8-byte
//! discriminator (sha256 of `global:<name>`) followed by borsh-encoded
//! arguments, and declares a fixed, ordered account list. The builders here
//! reproduce those declarations exactly; supplying anything else gets the
//! transaction rejected by the program.

use borsh::BorshSerialize;
use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::error::{EnrollError, Result};

/// Deployed enrollment program on devnet.
pub const PROGRAM_ID: &str = "TRBZyQHB3m68FGeVsqTK39Wm4xejadjVhP5MAZaKWDM";

/// MPL Core program the enrollment program mints through.
pub const MPL_CORE_PROGRAM_ID: &str = "CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d";

/// Collection that submission assets are minted into.
pub const DEFAULT_COLLECTION: &str = "5ebsp5RChCGK7ssRZMVMufgVZhd2kFbNaotcZ5UvytN2";

/// First 8 bytes of sha256("global:<name>").
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// First 8 bytes of sha256("account:<name>").
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("account:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// `initialize(github)`: creates the user's application record.
pub fn initialize(
    program_id: &Pubkey,
    user: &Pubkey,
    application: &Pubkey,
    github: &str,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new(*application, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: with_string_arg("initialize", github)?,
    })
}

/// `update(github)`: replaces the recorded github handle.
pub fn update(
    program_id: &Pubkey,
    user: &Pubkey,
    application: &Pubkey,
    github: &str,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(*application, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: with_string_arg("update", github)?,
    })
}

/// `submit_ts()`: marks the TypeScript track complete and mints its asset.
#[allow(clippy::too_many_arguments)]
pub fn submit_ts(
    program_id: &Pubkey,
    user: &Pubkey,
    application: &Pubkey,
    mint: &Pubkey,
    collection: &Pubkey,
    authority: &Pubkey,
    mpl_core_program: &Pubkey,
) -> Instruction {
    submission("submit_ts", program_id, user, application, mint, collection, authority, mpl_core_program)
}

/// `submit_rs()`: marks the Rust track complete and mints its asset.
#[allow(clippy::too_many_arguments)]
pub fn submit_rs(
    program_id: &Pubkey,
    user: &Pubkey,
    application: &Pubkey,
    mint: &Pubkey,
    collection: &Pubkey,
    authority: &Pubkey,
    mpl_core_program: &Pubkey,
) -> Instruction {
    submission("submit_rs", program_id, user, application, mint, collection, authority, mpl_core_program)
}

/// `create_collection()`: creates a collection owned by the derived authority.
pub fn create_collection(
    program_id: &Pubkey,
    creator: &Pubkey,
    collection: &Pubkey,
    authority: &Pubkey,
    mpl_core_program: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*creator, true),
            AccountMeta::new(*collection, true),
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new_readonly(*mpl_core_program, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: instruction_discriminator("create_collection").to_vec(),
    }
}

/// `close()`: reclaims the application record. The interface marks the user
/// account writable but not a signer; the fee payer signs the transaction.
pub fn close(program_id: &Pubkey, user: &Pubkey, application: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*user, false),
            AccountMeta::new(*application, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: instruction_discriminator("close").to_vec(),
    }
}

#[allow(clippy::too_many_arguments)]
fn submission(
    name: &str,
    program_id: &Pubkey,
    user: &Pubkey,
    application: &Pubkey,
    mint: &Pubkey,
    collection: &Pubkey,
    authority: &Pubkey,
    mpl_core_program: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new(*application, false),
            AccountMeta::new(*mint, true),
            AccountMeta::new(*collection, false),
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new_readonly(*mpl_core_program, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: instruction_discriminator(name).to_vec(),
    }
}

fn with_string_arg(name: &str, arg: &str) -> Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    arg.to_owned()
        .serialize(&mut data)
        .map_err(|e| EnrollError::Record(e.to_string()))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_rs_discriminator_matches_deployed_idl() {
        assert_eq!(
            instruction_discriminator("submit_rs"),
            [77, 124, 82, 163, 21, 133, 181, 206]
        );
    }

    #[test]
    fn initialize_encodes_github_as_borsh_string() {
        let program_id = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let application = Pubkey::new_unique();
        let ix = initialize(&program_id, &user, &application, "octocat").unwrap();

        assert_eq!(ix.data[..8], instruction_discriminator("initialize"));
        assert_eq!(ix.data[8..12], 7u32.to_le_bytes());
        assert_eq!(ix.data[12..], *b"octocat");
    }

    #[test]
    fn initialize_declares_user_as_only_signer() {
        let program_id = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let application = Pubkey::new_unique();
        let ix = initialize(&program_id, &user, &application, "octocat").unwrap();

        assert_eq!(ix.accounts.len(), 3);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, system_program::ID);
        assert!(!ix.accounts[2].is_signer && !ix.accounts[2].is_writable);
    }

    #[test]
    fn submission_declares_user_and_mint_as_signers() {
        let keys: Vec<Pubkey> = (0..7).map(|_| Pubkey::new_unique()).collect();
        let ix = submit_ts(&keys[0], &keys[1], &keys[2], &keys[3], &keys[4], &keys[5], &keys[6]);

        assert_eq!(ix.accounts.len(), 7);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable); // user
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable); // application
        assert!(ix.accounts[2].is_signer && ix.accounts[2].is_writable); // mint
        assert!(!ix.accounts[3].is_signer && ix.accounts[3].is_writable); // collection
        assert!(!ix.accounts[4].is_signer && !ix.accounts[4].is_writable); // authority
        assert!(!ix.accounts[5].is_signer && !ix.accounts[5].is_writable); // mpl core
        assert_eq!(ix.accounts[6].pubkey, system_program::ID);
    }

    #[test]
    fn close_user_is_writable_but_not_a_signer() {
        let program_id = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let application = Pubkey::new_unique();
        let ix = close(&program_id, &user, &application);

        assert!(!ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
    }
}
