//! CreateRecipe Instruction Processor
//!
//! Creates a paused, empty recipe at the PDA of its base key.

use crate::state::recipe::{Recipe, RECIPE_SEED};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg, system_program,
};

/// Process CreateRecipe instruction
///
/// Accounts expected:
/// 0. `[signer]` Base
/// 1. `[writable]` Recipe PDA
/// 2. `[]` Authority
/// 3. `[writable, signer]` Payer
/// 4. `[]` System program
pub fn process(accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let base_info = next_account_info(account_info_iter)?;
    let recipe_info = next_account_info(account_info_iter)?;
    let authority_info = next_account_info(account_info_iter)?;
    let payer_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    assert_signer("base", base_info)?;
    assert_writable("recipe", recipe_info)?;
    assert_empty("recipe", recipe_info)?;
    assert_signer("payer", payer_info)?;
    assert_writable("payer", payer_info)?;
    assert_same_pubkeys("system_program", system_program_info, &system_program::id())?;
    let bump = assert_pda("recipe", recipe_info, &Recipe::seeds(base_info.key))?;

    let recipe = Recipe::new(*base_info.key, *authority_info.key);
    create_account(
        recipe_info,
        payer_info,
        system_program_info,
        recipe.data_len(),
        &[RECIPE_SEED, base_info.key.as_ref(), &[bump]],
    )?;
    save_recipe(&recipe, recipe_info)?;

    msg!("Recipe {} created for {}", recipe_info.key, authority_info.key);
    Ok(())
}
