//! Error taxonomy shared by the bridge program and its helpers
//!
//! Every rejection maps onto one of the runtime's builtin program errors so the
//! transaction layer sees the same code the validation step raised.

use pinocchio::program_error::ProgramError;

/// Closed set of conditions a publish attempt can fail with
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// Malformed instruction data, wrong well-known key, non-executable program
    InvalidArgument = 0,
    /// Account list length differs from the expected layout
    NotEnoughAccountKeys = 1,
    /// Buffer shorter (or longer, for exact layouts) than the struct cast onto it
    AccountDataTooSmall = 2,
    /// Structural or semantic mismatch after a successful size check
    InvalidAccountData = 3,
    /// Account owner is not the expected program
    IncorrectProgramId = 4,
    /// Payer did not sign or is not writable
    MissingRequiredSignatures = 5,
}

impl From<BridgeError> for ProgramError {
    fn from(e: BridgeError) -> Self {
        match e {
            BridgeError::InvalidArgument => ProgramError::InvalidArgument,
            BridgeError::NotEnoughAccountKeys => ProgramError::NotEnoughAccountKeys,
            BridgeError::AccountDataTooSmall => ProgramError::AccountDataTooSmall,
            BridgeError::InvalidAccountData => ProgramError::InvalidAccountData,
            BridgeError::IncorrectProgramId => ProgramError::IncorrectProgramId,
            BridgeError::MissingRequiredSignatures => ProgramError::MissingRequiredSignature,
        }
    }
}

/// Fixed-point rescaling exceeded the representable range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleOverflow;

impl From<ScaleOverflow> for BridgeError {
    fn from(_: ScaleOverflow) -> Self {
        BridgeError::InvalidAccountData
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_error_mapping() {
        assert_eq!(
            ProgramError::from(BridgeError::InvalidArgument),
            ProgramError::InvalidArgument
        );
        assert_eq!(
            ProgramError::from(BridgeError::NotEnoughAccountKeys),
            ProgramError::NotEnoughAccountKeys
        );
        assert_eq!(
            ProgramError::from(BridgeError::AccountDataTooSmall),
            ProgramError::AccountDataTooSmall
        );
        assert_eq!(
            ProgramError::from(BridgeError::InvalidAccountData),
            ProgramError::InvalidAccountData
        );
        assert_eq!(
            ProgramError::from(BridgeError::IncorrectProgramId),
            ProgramError::IncorrectProgramId
        );
        assert_eq!(
            ProgramError::from(BridgeError::MissingRequiredSignatures),
            ProgramError::MissingRequiredSignature
        );
    }

    #[test]
    fn test_scale_overflow_is_invalid_account_data() {
        assert_eq!(BridgeError::from(ScaleOverflow), BridgeError::InvalidAccountData);
    }
}
