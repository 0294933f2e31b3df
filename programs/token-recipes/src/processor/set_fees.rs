//! SetFees Instruction Processor
//!
//! Overrides the lamports charged per craft. Needs the fees feature at
//! the custom fees level.

use crate::error::TokenRecipesError;
use crate::state::features::fees::CUSTOM_FEES_LEVEL;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
};

/// Process SetFees instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[signer]` Recipe authority
pub fn process(accounts: &[AccountInfo], fees: u64) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let recipe_info = next_account_info(account_info_iter)?;
    let authority_info = next_account_info(account_info_iter)?;

    assert_writable("recipe", recipe_info)?;
    let mut recipe = load_recipe(recipe_info)?;
    assert_authority("authority", authority_info, &recipe.authority)?;

    if recipe.feature_levels.fees < CUSTOM_FEES_LEVEL {
        msg!(
            "Custom fees need fees level {}, recipe is at level {}",
            CUSTOM_FEES_LEVEL,
            recipe.feature_levels.fees
        );
        return Err(TokenRecipesError::InvalidFeesFeature.into());
    }

    recipe.fees = fees;
    save_recipe(&recipe, recipe_info)
}
