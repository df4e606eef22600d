use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

const PROCESSED: &str = "processed";
const CONFIRMED: &str = "confirmed";
const FINALIZED: &str = "finalized";

/// Ledger state the RPC node should answer from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PROCESSED => Ok(Self::Processed),
            CONFIRMED => Ok(Self::Confirmed),
            FINALIZED => Ok(Self::Finalized),
            invalid => Err(format!(
                "Invalid value: {}. Expected {}|{}|{}",
                invalid, PROCESSED, CONFIRMED, FINALIZED
            )),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processed => PROCESSED,
            Self::Confirmed => CONFIRMED,
            Self::Finalized => FINALIZED,
        }
        .fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceOutcome {
    Success { lamports: u64 },
    Failure { reason: String },
}

/// 單一地址的查詢結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub address: String,
    pub outcome: BalanceOutcome,
}

impl AddressRecord {
    pub fn success(address: impl Into<String>, lamports: u64) -> Self {
        Self {
            address: address.into(),
            outcome: BalanceOutcome::Success { lamports },
        }
    }

    pub fn failure(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            outcome: BalanceOutcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn status(&self) -> RecordStatus {
        match self.outcome {
            BalanceOutcome::Success { .. } => RecordStatus::Success,
            BalanceOutcome::Failure { .. } => RecordStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == RecordStatus::Success
    }

    pub fn lamports(&self) -> Option<u64> {
        match self.outcome {
            BalanceOutcome::Success { lamports } => Some(lamports),
            BalanceOutcome::Failure { .. } => None,
        }
    }

    /// Balance in SOL.
    pub fn balance(&self) -> Option<f64> {
        self.lamports()
            .map(|lamports| lamports as f64 / LAMPORTS_PER_SOL as f64)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            BalanceOutcome::Success { .. } => None,
            BalanceOutcome::Failure { reason } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub output_path: String,
    pub failures_path: Option<String>,
}

impl RunReport {
    pub fn print_summary(&self) {
        println!();
        println!("=== Final Results ===");
        println!("Total addresses processed: {}", self.total);
        println!("Successful: {}", self.successful);
        println!("Failed: {}", self.failed);
        println!("Results saved to {}", self.output_path);
        if let Some(path) = &self.failures_path {
            println!("Errors saved to {}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_parse_and_display() {
        assert_eq!("finalized".parse::<Commitment>().unwrap(), Commitment::Finalized);
        assert_eq!(Commitment::default().to_string(), "confirmed");
        assert!("recent".parse::<Commitment>().is_err());
    }

    #[test]
    fn test_record_accessors() {
        let ok = AddressRecord::success("addr", 2_500_000_000);
        assert_eq!(ok.status(), RecordStatus::Success);
        assert_eq!(ok.balance(), Some(2.5));
        assert_eq!(ok.error(), None);

        let failed = AddressRecord::failure("addr", "Invalid public key input");
        assert_eq!(failed.status(), RecordStatus::Error);
        assert_eq!(failed.balance(), None);
        assert_eq!(failed.error(), Some("Invalid public key input"));
    }
}
