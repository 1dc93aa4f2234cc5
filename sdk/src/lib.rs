//! Off-chain SDK for the devnet enrollment program
//!
//! This crate provides:
//! - Program-derived address computation
//! - Instruction builders for the enrollment program interface
//! - A chain-client abstraction over Solana RPC
//! - The sequential submission workflow
//! - Wallet key-format conversion helpers

pub mod client;
pub mod error;
pub mod pda;
pub mod program;
pub mod record;
pub mod wallet;
pub mod workflow;

pub use client::{AccountSnapshot, ChainClient, RpcChainClient};
pub use error::{DecodeError, EnrollError, PdaError, Result};
pub use record::ApplicationRecord;
pub use workflow::{SubmissionWorkflow, Track};

// Re-export commonly used types
pub use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
