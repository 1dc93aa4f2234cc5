//! Chain client abstraction and RPC implementation
//!
//! The workflow only ever talks to the chain through [`ChainClient`], so
//! tests can inject a stub and the derivation logic stays network-free.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

use crate::error::{EnrollError, Result};

/// Point-in-time view of an account, as returned by the chain.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
    pub executable: bool,
    pub rent_epoch: u64,
}

/// Everything the workflow needs from the chain. Each call is awaited to
/// completion before the caller proceeds; there are no retries here.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Sign with the given keypairs (first one pays fees) and submit.
    async fn submit_transaction(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature>;

    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>>;

    async fn get_balance(&self, address: &Pubkey) -> Result<u64>;

    /// Devnet-only convenience.
    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<Signature>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    /// Fee the given instructions would cost with `payer` as fee payer.
    async fn estimate_fee(&self, instructions: &[Instruction], payer: &Pubkey) -> Result<u64>;
}

/// Production [`ChainClient`] over a Solana JSON-RPC endpoint, confirmed
/// commitment.
pub struct RpcChainClient {
    rpc: RpcClient,
}

impl RpcChainClient {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(
                rpc_url.to_owned(),
                CommitmentConfig::confirmed(),
            ),
        }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn submit_transaction(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature> {
        let payer = signers
            .first()
            .ok_or_else(|| EnrollError::Signer("at least one signer is required".to_owned()))?;

        let blockhash = self.rpc.get_latest_blockhash().await.map_err(rpc_err)?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers.to_vec(),
            blockhash,
        );

        self.rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(rpc_err)
    }

    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .map_err(rpc_err)?;

        Ok(response.value.map(|account| AccountSnapshot {
            lamports: account.lamports,
            owner: account.owner,
            data: account.data,
            executable: account.executable,
            rent_epoch: account.rent_epoch,
        }))
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        self.rpc.get_balance(address).await.map_err(rpc_err)
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<Signature> {
        self.rpc
            .request_airdrop(address, lamports)
            .await
            .map_err(rpc_err)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(rpc_err)
    }

    async fn estimate_fee(&self, instructions: &[Instruction], payer: &Pubkey) -> Result<u64> {
        let blockhash = self.rpc.get_latest_blockhash().await.map_err(rpc_err)?;
        let message = Message::new_with_blockhash(instructions, Some(payer), &blockhash);
        self.rpc.get_fee_for_message(&message).await.map_err(rpc_err)
    }
}

fn rpc_err(err: solana_client::client_error::ClientError) -> EnrollError {
    EnrollError::Rpc(err.to_string())
}
