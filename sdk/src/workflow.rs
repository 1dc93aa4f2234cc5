//! Submission workflow orchestration
//!
//! Thin, sequential threading of derived addresses through the program's
//! operations. Holds no state of its own; a failure aborts the remaining
//! steps and leaves completed ones as-is (the program's idempotency errors
//! guard re-runs).

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use tracing::info;

use crate::{
    client::ChainClient,
    error::Result,
    pda, program,
    record::ApplicationRecord,
};

/// Submission track, one per supported implementation language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    TypeScript,
    Rust,
}

impl Track {
    pub fn name(self) -> &'static str {
        match self {
            Track::TypeScript => "typescript",
            Track::Rust => "rust",
        }
    }
}

/// Orchestrates enrollment operations against a [`ChainClient`].
pub struct SubmissionWorkflow<'a, C: ChainClient> {
    client: &'a C,
    program_id: Pubkey,
    collection: Pubkey,
    mpl_core_program: Pubkey,
}

impl<'a, C: ChainClient> SubmissionWorkflow<'a, C> {
    pub fn new(
        client: &'a C,
        program_id: Pubkey,
        collection: Pubkey,
        mpl_core_program: Pubkey,
    ) -> Self {
        Self {
            client,
            program_id,
            collection,
            mpl_core_program,
        }
    }

    /// Derive the user's application record address. Recomputed per call,
    /// never cached.
    pub fn application_address(&self, user: &Pubkey) -> Result<(Pubkey, u8)> {
        Ok(pda::derive_application(user, &self.program_id)?)
    }

    /// Create the application record carrying the github handle. The
    /// program rejects this with a domain error if the record exists.
    pub async fn initialize(&self, user: &Keypair, github: &str) -> Result<Signature> {
        let (application, bump) = self.application_address(&user.pubkey())?;
        info!(%application, bump, github, "initializing application record");

        let ix = program::initialize(&self.program_id, &user.pubkey(), &application, github)?;
        self.client.submit_transaction(&[ix], &[user]).await
    }

    /// Replace the recorded github handle.
    pub async fn update(&self, user: &Keypair, github: &str) -> Result<Signature> {
        let (application, _) = self.application_address(&user.pubkey())?;
        info!(%application, github, "updating application record");

        let ix = program::update(&self.program_id, &user.pubkey(), &application, github)?;
        self.client.submit_transaction(&[ix], &[user]).await
    }

    /// Submit a track: derives the record and collection-authority
    /// addresses, generates a fresh mint keypair, and submits with the
    /// user and mint as signers. Returns the signature and the minted
    /// asset address.
    pub async fn submit(&self, user: &Keypair, track: Track) -> Result<(Signature, Pubkey)> {
        let (application, _) = self.application_address(&user.pubkey())?;
        let (authority, _) =
            pda::derive_collection_authority(&self.collection, &self.program_id)?;
        let mint = Keypair::new();
        info!(
            track = track.name(),
            %application,
            %authority,
            mint = %mint.pubkey(),
            "submitting track"
        );

        let ix = match track {
            Track::TypeScript => program::submit_ts(
                &self.program_id,
                &user.pubkey(),
                &application,
                &mint.pubkey(),
                &self.collection,
                &authority,
                &self.mpl_core_program,
            ),
            Track::Rust => program::submit_rs(
                &self.program_id,
                &user.pubkey(),
                &application,
                &mint.pubkey(),
                &self.collection,
                &authority,
                &self.mpl_core_program,
            ),
        };

        let signature = self.client.submit_transaction(&[ix], &[user, &mint]).await?;
        Ok((signature, mint.pubkey()))
    }

    /// Create a fresh collection controlled by its derived authority.
    /// Returns the signature and the new collection address.
    pub async fn create_collection(&self, creator: &Keypair) -> Result<(Signature, Pubkey)> {
        let collection = Keypair::new();
        let (authority, _) =
            pda::derive_collection_authority(&collection.pubkey(), &self.program_id)?;
        info!(collection = %collection.pubkey(), %authority, "creating collection");

        let ix = program::create_collection(
            &self.program_id,
            &creator.pubkey(),
            &collection.pubkey(),
            &authority,
            &self.mpl_core_program,
        );
        let signature = self
            .client
            .submit_transaction(&[ix], &[creator, &collection])
            .await?;
        Ok((signature, collection.pubkey()))
    }

    /// Close the application record, reclaiming its rent.
    pub async fn close(&self, user: &Keypair) -> Result<Signature> {
        let (application, _) = self.application_address(&user.pubkey())?;
        info!(%application, "closing application record");

        let ix = program::close(&self.program_id, &user.pubkey(), &application);
        self.client.submit_transaction(&[ix], &[user]).await
    }

    /// Read and decode the user's application record, if it exists.
    pub async fn fetch_record(&self, user: &Pubkey) -> Result<Option<ApplicationRecord>> {
        let (application, _) = self.application_address(user)?;
        match self.client.get_account_info(&application).await? {
            Some(account) => Ok(Some(ApplicationRecord::from_account_data(&account.data)?)),
            None => Ok(None),
        }
    }
}
