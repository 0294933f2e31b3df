//! DeleteRecipe Instruction Processor
//!
//! Closes an empty recipe. Fees and experience are paid out first, then
//! the remaining lamports go to the authority.

use crate::error::TokenRecipesError;
use crate::processor::collect_experience::{flush_experience, ExperienceAccounts};
use crate::processor::collect_fees::{assert_program_accounts, flush_fees, FeesAccounts};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
};

/// Process DeleteRecipe instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[writable, signer]` Recipe authority
/// 2. `[writable]` Admin fees destination
/// 3. `[]` Fees feature PDA
/// 4. `[writable]` Shards mint
/// 5. `[writable]` Authority shards token
/// 6. `[]` Wisdom feature PDA
/// 7. `[writable]` Experience mint
/// 8. `[writable]` Authority experience token
/// 9. `[]` System program
/// 10. `[]` Token program
/// 11. `[]` Associated token account program
pub fn process(accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let recipe_info = next_account_info(account_info_iter)?;
    let authority_info = next_account_info(account_info_iter)?;
    let admin_fees_destination_info = next_account_info(account_info_iter)?;
    let fees_feature_info = next_account_info(account_info_iter)?;
    let shards_mint_info = next_account_info(account_info_iter)?;
    let shards_token_info = next_account_info(account_info_iter)?;
    let wisdom_feature_info = next_account_info(account_info_iter)?;
    let experience_mint_info = next_account_info(account_info_iter)?;
    let experience_token_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;
    let token_program_info = next_account_info(account_info_iter)?;
    let associated_token_program_info = next_account_info(account_info_iter)?;

    // Validate accounts
    assert_writable("recipe", recipe_info)?;
    let mut recipe = load_recipe(recipe_info)?;
    assert_authority("authority", authority_info, &recipe.authority)?;
    assert_writable("authority", authority_info)?;
    assert_program_accounts(
        system_program_info,
        token_program_info,
        associated_token_program_info,
    )?;

    if recipe.has_ingredients() {
        msg!(
            "Recipe still has {} inputs and {} outputs",
            recipe.inputs.len(),
            recipe.outputs.len()
        );
        return Err(TokenRecipesError::RecipeMustBeEmptyBeforeItCanBeDeleted.into());
    }

    flush_fees(
        &FeesAccounts {
            recipe: recipe_info,
            authority: authority_info,
            admin_fees_destination: admin_fees_destination_info,
            fees_feature: fees_feature_info,
            shards_mint: shards_mint_info,
            shards_token: shards_token_info,
            system_program: system_program_info,
            token_program: token_program_info,
            associated_token_program: associated_token_program_info,
        },
        &mut recipe,
    )?;
    flush_experience(
        &ExperienceAccounts {
            authority: authority_info,
            wisdom_feature: wisdom_feature_info,
            experience_mint: experience_mint_info,
            experience_token: experience_token_info,
            system_program: system_program_info,
            token_program: token_program_info,
            associated_token_program: associated_token_program_info,
        },
        &mut recipe,
    )?;

    close_account(recipe_info, authority_info)?;

    msg!("Recipe {} deleted", recipe_info.key);
    Ok(())
}
