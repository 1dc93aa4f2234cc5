//! On-chain application record layout
//!
//! The record is owned and mutated solely by the enrollment program; this
//! code only decodes it for status reporting.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{
    error::{EnrollError, Result},
    program::account_discriminator,
};

/// Anchor type name the account discriminator is derived from.
pub const ACCOUNT_TYPE: &str = "ApplicationAccount";

/// Per-user enrollment record: owning user, PDA bump, one completion flag
/// per submission track, and the free-text github handle.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ApplicationRecord {
    user: [u8; 32],
    pub bump: u8,
    pub ts_done: bool,
    pub rs_done: bool,
    pub github: String,
}

impl ApplicationRecord {
    pub fn new(user: Pubkey, bump: u8, ts_done: bool, rs_done: bool, github: String) -> Self {
        Self {
            user: user.to_bytes(),
            bump,
            ts_done,
            rs_done,
            github,
        }
    }

    pub fn user(&self) -> Pubkey {
        Pubkey::from(self.user)
    }

    /// Account size for a record holding a github handle of the given
    /// length: discriminator + user + bump + two flags + string header.
    pub fn space(github_len: usize) -> usize {
        8 + 32 + 1 + 1 + 1 + 4 + github_len
    }

    /// Decode a record from raw account data, checking the 8-byte account
    /// discriminator first. Trailing bytes are tolerated.
    pub fn from_account_data(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(EnrollError::Record(format!(
                "account data too short: {} bytes",
                data.len()
            )));
        }
        if data[..8] != account_discriminator(ACCOUNT_TYPE) {
            return Err(EnrollError::Record(
                "account discriminator mismatch".to_owned(),
            ));
        }
        Self::deserialize(&mut &data[8..]).map_err(|e| EnrollError::Record(e.to_string()))
    }

    /// Encode the record the way the program stores it. Used by tests and
    /// stub clients.
    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        let mut data = account_discriminator(ACCOUNT_TYPE).to_vec();
        self.serialize(&mut data)
            .map_err(|e| EnrollError::Record(e.to_string()))?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_round_trip() {
        let record = ApplicationRecord::new(Pubkey::new_unique(), 254, true, false, "octocat".into());
        let data = record.to_account_data().unwrap();
        assert_eq!(data.len(), ApplicationRecord::space(7));

        let decoded = ApplicationRecord::from_account_data(&data).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.user(), record.user());
    }

    #[test]
    fn rejects_wrong_discriminator() {
        let record = ApplicationRecord::new(Pubkey::new_unique(), 255, false, false, "x".into());
        let mut data = record.to_account_data().unwrap();
        data[0] ^= 0xff;
        assert!(matches!(
            ApplicationRecord::from_account_data(&data),
            Err(EnrollError::Record(_))
        ));
    }

    #[test]
    fn rejects_truncated_data() {
        assert!(matches!(
            ApplicationRecord::from_account_data(&[1, 2, 3]),
            Err(EnrollError::Record(_))
        ));
    }

    #[test]
    fn tolerates_trailing_bytes() {
        let record = ApplicationRecord::new(Pubkey::new_unique(), 250, true, true, "gh".into());
        let mut data = record.to_account_data().unwrap();
        data.extend_from_slice(&[0u8; 16]);
        assert_eq!(ApplicationRecord::from_account_data(&data).unwrap(), record);
    }
}
