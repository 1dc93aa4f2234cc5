//! Wallet key-format conversion and keypair files
//!
//! Converts between the base58 secret-key string used by browser wallets
//! and the JSON byte-array file format used by the CLI tooling.

use std::{fs, path::Path};

use solana_sdk::signature::Keypair;

use crate::error::{DecodeError, EnrollError, Result};

/// Decode a base58 secret-key string into wallet-file bytes.
pub fn base58_to_wallet(input: &str) -> std::result::Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(bs58::decode(trimmed).into_vec()?)
}

/// Encode wallet-file bytes as a base58 secret-key string.
pub fn wallet_to_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Parse a JSON byte array such as `[12,34,...]`.
pub fn parse_byte_array(input: &str) -> std::result::Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }

    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    let items = value.as_array().ok_or(DecodeError::NotAByteArray)?;
    items
        .iter()
        .map(|item| {
            let n = item.as_i64().ok_or(DecodeError::NotAByteArray)?;
            u8::try_from(n).map_err(|_| DecodeError::ByteOutOfRange(n))
        })
        .collect()
}

/// Format bytes as a compact JSON byte array.
pub fn format_byte_array(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(u8::to_string).collect();
    format!("[{}]", items.join(","))
}

/// Read a keypair file: either 64 raw secret-key bytes or a JSON byte
/// array.
pub fn read_keypair_file(path: impl AsRef<Path>) -> Result<Keypair> {
    let path = path.as_ref();
    let raw = fs::read(path)
        .map_err(|e| EnrollError::Signer(format!("failed to read {}: {e}", path.display())))?;

    let bytes = if raw.len() == 64 {
        raw
    } else {
        let text = String::from_utf8(raw)
            .map_err(|e| EnrollError::Signer(format!("keypair file is not UTF-8: {e}")))?;
        parse_byte_array(&text)?
    };

    if bytes.len() != 64 {
        return Err(DecodeError::WrongLength {
            expected: 64,
            actual: bytes.len(),
        }
        .into());
    }

    Keypair::from_bytes(&bytes).map_err(|e| EnrollError::Signer(e.to_string()))
}

/// Write a keypair as a JSON byte-array file.
pub fn write_keypair_file(keypair: &Keypair, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format_byte_array(&keypair.to_bytes()))
        .map_err(|e| EnrollError::Signer(format!("failed to write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    #[test]
    fn base58_round_trip() {
        let bytes = vec![0u8, 1, 2, 3, 250, 255];
        let encoded = wallet_to_base58(&bytes);
        assert_eq!(base58_to_wallet(&encoded).unwrap(), bytes);
    }

    #[test]
    fn byte_array_round_trip() {
        let text = "[12,34,0,255]";
        let bytes = parse_byte_array(text).unwrap();
        assert_eq!(format_byte_array(&bytes), text);
    }

    #[test]
    fn empty_base58_is_an_error() {
        assert!(matches!(base58_to_wallet(""), Err(DecodeError::Empty)));
        assert!(matches!(base58_to_wallet("   "), Err(DecodeError::Empty)));
    }

    #[test]
    fn invalid_base58_is_an_error() {
        assert!(matches!(
            base58_to_wallet("0OIl"),
            Err(DecodeError::Base58(_))
        ));
    }

    #[test]
    fn non_json_text_is_an_error() {
        assert!(matches!(
            parse_byte_array("not json at all"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn malformed_array_is_an_error() {
        assert!(matches!(
            parse_byte_array("[1,2,abc]"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn non_array_json_is_an_error() {
        assert!(matches!(
            parse_byte_array("{\"a\":1}"),
            Err(DecodeError::NotAByteArray)
        ));
    }

    #[test]
    fn out_of_range_byte_is_an_error() {
        assert!(matches!(
            parse_byte_array("[1,2,256]"),
            Err(DecodeError::ByteOutOfRange(256))
        ));
    }

    #[test]
    fn keypair_file_round_trip() {
        let keypair = Keypair::new();
        let dir = std::env::temp_dir().join("enroll-sdk-wallet-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.json", keypair.pubkey()));

        write_keypair_file(&keypair, &path).unwrap();
        let loaded = read_keypair_file(&path).unwrap();
        assert_eq!(loaded.to_bytes(), keypair.to_bytes());

        fs::remove_file(path).ok();
    }

    #[test]
    fn short_keypair_file_is_an_error() {
        let dir = std::env::temp_dir().join("enroll-sdk-wallet-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("short.json");
        fs::write(&path, "[1,2,3]").unwrap();

        assert!(matches!(
            read_keypair_file(&path),
            Err(EnrollError::Decode(DecodeError::WrongLength {
                expected: 64,
                actual: 3
            }))
        ));

        fs::remove_file(path).ok();
    }
}
