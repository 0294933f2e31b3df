//! ActivateRecipe Instruction Processor

use crate::state::RecipeStatus;
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
};

/// Process ActivateRecipe instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[signer]` Recipe authority
pub fn process(accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let recipe_info = next_account_info(account_info_iter)?;
    let authority_info = next_account_info(account_info_iter)?;

    assert_writable("recipe", recipe_info)?;
    let mut recipe = load_recipe(recipe_info)?;
    assert_authority("authority", authority_info, &recipe.authority)?;

    // Activating an active recipe is a no-op
    recipe.status = RecipeStatus::Active;
    save_recipe(&recipe, recipe_info)
}
