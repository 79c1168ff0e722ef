//! Read-only account snapshot and the validation helpers applied to it

use crate::error::{BridgeError, BridgeResult};
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey};

/// Borrowed view of one runtime account
#[derive(Clone, Copy, Debug)]
pub struct AccountView<'a> {
    pub key: &'a Pubkey,
    pub owner: &'a Pubkey,
    pub data: &'a [u8],
    pub is_signer: bool,
    pub is_writable: bool,
    pub executable: bool,
}

impl<'a> AccountView<'a> {
    /// Snapshot a runtime account info
    ///
    /// # Safety
    /// The caller must ensure no mutable borrow of the account data is alive
    /// for `'a`. This program never borrows account data mutably.
    #[inline]
    pub unsafe fn from_account_info(info: &'a AccountInfo) -> Self {
        Self {
            key: info.key(),
            owner: info.owner(),
            data: info.borrow_data_unchecked(),
            is_signer: info.is_signer(),
            is_writable: info.is_writable(),
            executable: info.executable(),
        }
    }
}

/// Validate that an account is owned by the expected program
#[inline]
pub fn validate_owner(account: &AccountView, expected_owner: &Pubkey) -> BridgeResult<()> {
    if account.owner != expected_owner {
        msg!("Error: Account has wrong owner");
        return Err(BridgeError::IncorrectProgramId);
    }
    Ok(())
}

/// Validate that an account is a deployed program
#[inline]
pub fn validate_executable(account: &AccountView) -> BridgeResult<()> {
    if !account.executable {
        msg!("Error: Program account is not executable");
        return Err(BridgeError::InvalidArgument);
    }
    Ok(())
}

/// Validate that an account is the expected well-known address
#[inline]
pub fn validate_key(account: &AccountView, expected_key: &Pubkey) -> BridgeResult<()> {
    if account.key != expected_key {
        msg!("Error: Unexpected account address");
        return Err(BridgeError::InvalidArgument);
    }
    Ok(())
}

/// Validate that an account is writable
#[inline]
pub fn validate_writable(account: &AccountView) -> BridgeResult<()> {
    if !account.is_writable {
        msg!("Error: Account is not writable");
        return Err(BridgeError::InvalidArgument);
    }
    Ok(())
}

/// Validate that an account holds exactly `len` bytes
#[inline]
pub fn validate_data_len(account: &AccountView, len: usize) -> BridgeResult<()> {
    if account.data.len() != len {
        msg!("Error: Account data has wrong length");
        return Err(BridgeError::AccountDataTooSmall);
    }
    Ok(())
}
