//! AdminSetFeature Instruction Processor
//!
//! Writes a feature account. Only the program admin may call it.

use crate::error::TokenRecipesError;
use crate::state::features::FEATURES_SEED;
use crate::state::Feature;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg, system_program,
};

/// Process AdminSetFeature instruction
///
/// Accounts expected:
/// 0. `[signer]` Program admin
/// 1. `[writable]` Feature PDA
/// 2. `[writable, signer]` Payer
/// 3. `[]` System program
pub fn process(accounts: &[AccountInfo], feature: Feature) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let admin_info = next_account_info(account_info_iter)?;
    let feature_info = next_account_info(account_info_iter)?;
    let payer_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    assert_signer("admin", admin_info)?;
    if *admin_info.key != crate::admin::id() {
        msg!("Account \"admin\" [{}] is not the program admin", admin_info.key);
        return Err(TokenRecipesError::InvalidAdmin.into());
    }
    assert_writable("feature", feature_info)?;
    assert_signer("payer", payer_info)?;
    assert_writable("payer", payer_info)?;
    assert_same_pubkeys("system_program", system_program_info, &system_program::id())?;

    let kind = feature.kind();
    let bump = assert_pda("feature", feature_info, &kind.seeds())?;

    if feature_info.data_is_empty() {
        create_account(
            feature_info,
            payer_info,
            system_program_info,
            feature.packed_len(),
            &[FEATURES_SEED, kind.name().as_bytes(), &[bump]],
        )?;
    } else {
        assert_owned_by("feature", feature_info, &crate::id())?;
    }
    feature.pack_into_slice(&mut feature_info.data.borrow_mut())?;

    msg!("Feature {} set", kind.name());
    Ok(())
}
