use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const PUBKEY_BYTES: usize = 32;

// 32 bytes 的 base58 編碼最多 44 個字元
const MAX_BASE58_LEN: usize = 44;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PubkeyError {
    #[error("Invalid public key input")]
    TooLong,

    #[error("Invalid public key input: {0}")]
    InvalidBase58(String),

    #[error("Invalid public key input: expected 32 bytes, got {0}")]
    WrongSize(usize),
}

/// Solana account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    pub fn new(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; PUBKEY_BYTES] {
        self.0
    }
}

impl FromStr for Pubkey {
    type Err = PubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_BASE58_LEN {
            return Err(PubkeyError::TooLong);
        }

        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| PubkeyError::InvalidBase58(e.to_string()))?;

        let bytes: [u8; PUBKEY_BYTES] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| PubkeyError::WrongSize(decoded.len()))?;

        Ok(Self(bytes))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_system_program() {
        let key: Pubkey = "11111111111111111111111111111111".parse().unwrap();
        assert_eq!(key.to_bytes(), [0u8; PUBKEY_BYTES]);
        assert_eq!(key.to_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn test_parse_round_trips_display() {
        let address = "8inHGLHXegST3EPLcpisQe9D1hDT9r7DJjS395L3yuYf";
        let key: Pubkey = address.parse().unwrap();
        assert_eq!(key.to_string(), address);
    }

    #[test]
    fn test_short_address_is_wrong_size() {
        let err = "Addr2".parse::<Pubkey>().unwrap_err();
        assert!(matches!(err, PubkeyError::WrongSize(_)));
        // 同一個無效輸入每次都得到相同錯誤
        assert_eq!("Addr2".parse::<Pubkey>().unwrap_err(), err);
    }

    #[test]
    fn test_non_base58_characters_rejected() {
        let err = "0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl".parse::<Pubkey>().unwrap_err();
        assert!(matches!(err, PubkeyError::InvalidBase58(_)));
    }

    #[test]
    fn test_too_long_input_rejected() {
        let long = "1".repeat(45);
        assert_eq!(long.parse::<Pubkey>().unwrap_err(), PubkeyError::TooLong);
    }
}
