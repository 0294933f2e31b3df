//! Assertion Helper Functions
//!
//! Common validation checks used across all processors. Each check logs
//! which account failed before returning its error, so a failing
//! transaction's logs name the culprit.
//!
//! # Usage Pattern
//!
//! ```ignore
//! pub fn process(...) -> ProgramResult {
//!     // Validate everything first
//!     assert_signer("authority", authority_info)?;
//!     assert_writable("recipe", recipe_info)?;
//!     let bump = assert_pda("recipe", recipe_info, &Recipe::seeds(base_info.key))?;
//!
//!     // Then do the actual work
//!     ...
//! }
//! ```

use crate::error::TokenRecipesError;
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    program_pack::Pack as SplPack, pubkey::Pubkey,
};
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::{Account as TokenAccount, Mint};

// =============================================================================
// OWNERSHIP CHECKS
// =============================================================================

/// Assert that an account is owned by the expected program.
///
/// An account nobody created yet is owned by the system program, so this
/// also catches accounts that do not exist.
pub fn assert_owned_by(name: &str, account: &AccountInfo, owner: &Pubkey) -> ProgramResult {
    if account.owner != owner {
        msg!(
            "Account \"{}\" [{}] expected owner [{}], got [{}]",
            name,
            account.key,
            owner,
            account.owner
        );
        Err(TokenRecipesError::InvalidProgramOwner.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// SIGNER AND WRITABLE CHECKS
// =============================================================================

/// Assert that an account is a signer of the transaction.
pub fn assert_signer(name: &str, account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        msg!("Account \"{}\" [{}] must be a signer", name, account.key);
        Err(TokenRecipesError::ExpectedSignerAccount.into())
    } else {
        Ok(())
    }
}

/// Assert that an account is writable.
pub fn assert_writable(name: &str, account: &AccountInfo) -> ProgramResult {
    if !account.is_writable {
        msg!("Account \"{}\" [{}] must be writable", name, account.key);
        Err(TokenRecipesError::ExpectedWritableAccount.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// ADDRESS CHECKS
// =============================================================================

/// Assert that an account is the one we expect, e.g. a program id or a
/// key stored in another account.
pub fn assert_same_pubkeys(name: &str, account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    if account.key != expected {
        msg!(
            "Account \"{}\" [{}] must match [{}]",
            name,
            account.key,
            expected
        );
        Err(TokenRecipesError::AccountMismatch.into())
    } else {
        Ok(())
    }
}

/// Assert that `account` signed and is the expected authority.
pub fn assert_authority(name: &str, account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    assert_signer(name, account)?;
    if account.key != expected {
        msg!(
            "Account \"{}\" [{}] is not the authority [{}]",
            name,
            account.key,
            expected
        );
        return Err(TokenRecipesError::InvalidAuthority.into());
    }
    Ok(())
}

/// Assert that an account is the PDA of `seeds` and return its bump.
pub fn assert_pda(name: &str, account: &AccountInfo, seeds: &[&[u8]]) -> Result<u8, ProgramError> {
    let (expected, bump) = Pubkey::find_program_address(seeds, &crate::id());
    if *account.key != expected {
        msg!(
            "Account \"{}\" [{}] is not the expected PDA [{}]",
            name,
            account.key,
            expected
        );
        return Err(TokenRecipesError::InvalidPda.into());
    }
    Ok(bump)
}

/// Assert that a token account is the associated token account of
/// `wallet` for `mint`.
pub fn assert_associated_token_account(
    name: &str,
    account: &AccountInfo,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> ProgramResult {
    let expected = get_associated_token_address(wallet, mint);
    if *account.key != expected {
        msg!(
            "Account \"{}\" [{}] is not the associated token account [{}]",
            name,
            account.key,
            expected
        );
        Err(TokenRecipesError::InvalidPda.into())
    } else {
        Ok(())
    }
}

// =============================================================================
// DATA CHECKS
// =============================================================================

/// Assert that an account holds no data yet.
pub fn assert_empty(name: &str, account: &AccountInfo) -> ProgramResult {
    if !account.data_is_empty() {
        msg!("Account \"{}\" [{}] must be empty", name, account.key);
        Err(TokenRecipesError::ExpectedEmptyAccount.into())
    } else {
        Ok(())
    }
}

/// Assert that an account is an SPL mint and return it.
pub fn assert_mint_account(name: &str, account: &AccountInfo) -> Result<Mint, ProgramError> {
    assert_owned_by(name, account, &spl_token::id())?;
    Mint::unpack(&account.data.borrow()).map_err(|error| {
        msg!("Account \"{}\" [{}] is not a mint", name, account.key);
        error
    })
}

/// Assert that an account is an SPL token account of `mint` held by
/// `owner`, and return it.
pub fn assert_token_account(
    name: &str,
    account: &AccountInfo,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<TokenAccount, ProgramError> {
    assert_owned_by(name, account, &spl_token::id())?;
    let token = TokenAccount::unpack(&account.data.borrow()).map_err(|error| {
        msg!("Account \"{}\" [{}] is not a token account", name, account.key);
        error
    })?;
    if token.mint != *mint {
        msg!(
            "Account \"{}\" [{}] holds mint [{}], expected [{}]",
            name,
            account.key,
            token.mint,
            mint
        );
        return Err(TokenRecipesError::AccountMismatch.into());
    }
    if token.owner != *owner {
        msg!(
            "Account \"{}\" [{}] is owned by [{}], expected [{}]",
            name,
            account.key,
            token.owner,
            owner
        );
        return Err(TokenRecipesError::AccountMismatch.into());
    }
    Ok(token)
}

// =============================================================================
// CHECKED ARITHMETIC
// =============================================================================

/// Checked addition that returns a clear error on overflow.
pub fn checked_add(a: u64, b: u64) -> Result<u64, ProgramError> {
    a.checked_add(b)
        .ok_or_else(|| TokenRecipesError::NumericalOverflow.into())
}

/// Checked multiplication, used for `amount * quantity`.
pub fn checked_mul(a: u64, b: u64) -> Result<u64, ProgramError> {
    a.checked_mul(b)
        .ok_or_else(|| TokenRecipesError::NumericalOverflow.into())
}

/// Checked subtraction that returns a clear error on underflow.
pub fn checked_sub(a: u64, b: u64) -> Result<u64, ProgramError> {
    a.checked_sub(b)
        .ok_or_else(|| TokenRecipesError::NumericalOverflow.into())
}

// =============================================================================
// UNIT TESTS
// =============================================================================
