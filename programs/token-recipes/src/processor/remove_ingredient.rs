//! RemoveIngredient Instruction Processor
//!
//! Removes an input or an output from a recipe. The ingredient record is
//! closed once the mint is neither an input nor an output, and the last
//! recipe releasing an output mint gives the mint authority back.

use crate::error::TokenRecipesError;
use crate::state::delegated_ingredient::DELEGATED_INGREDIENT_SEED;
use crate::state::ingredient_record::INGREDIENT_RECORD_SEED;
use crate::state::{DelegatedIngredient, IngredientRecord, IngredientType};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg, system_program,
};

/// Process RemoveIngredient instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[writable]` Mint (ignored for SOL payments)
/// 2. `[writable]` Ingredient record PDA
/// 3. `[writable]` Delegated ingredient PDA (outputs only)
/// 4. `[signer]` Recipe authority
/// 5. `[writable, signer]` Payer, receives the rent of every account closed
///    or shrunk here, whoever funded it
/// 6. `[]` System program
/// 7. `[]` Token program
pub fn process(accounts: &[AccountInfo], ingredient_type: IngredientType) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let recipe_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let ingredient_record_info = next_account_info(account_info_iter)?;
    let delegated_ingredient_info = next_account_info(account_info_iter)?;
    let authority_info = next_account_info(account_info_iter)?;
    let payer_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;
    let token_program_info = next_account_info(account_info_iter)?;

    // Validate accounts
    assert_writable("recipe", recipe_info)?;
    let mut recipe = load_recipe(recipe_info)?;
    assert_authority("authority", authority_info, &recipe.authority)?;
    assert_signer("payer", payer_info)?;
    assert_writable("payer", payer_info)?;
    assert_same_pubkeys("system_program", system_program_info, &system_program::id())?;
    assert_same_pubkeys("token_program", token_program_info, &spl_token::id())?;

    recipe.remove_ingredient(ingredient_type, mint_info.key)?;

    if ingredient_type.uses_mint() {
        assert_pda(
            "ingredient_record",
            ingredient_record_info,
            &[
                INGREDIENT_RECORD_SEED,
                mint_info.key.as_ref(),
                recipe_info.key.as_ref(),
            ],
        )?;
        assert_writable("ingredient_record", ingredient_record_info)?;

        let mut record =
            load_account::<IngredientRecord>("ingredient_record", ingredient_record_info)?;
        record.set(ingredient_type.is_input(), false)?;
        if record.should_be_closed() {
            close_account(ingredient_record_info, payer_info)?;
        } else {
            save_account(&record, ingredient_record_info)?;
        }
    }

    if ingredient_type.is_output() {
        assert_writable("mint", mint_info)?;
        assert_writable("delegated_ingredient", delegated_ingredient_info)?;
        let bump = assert_pda(
            "delegated_ingredient",
            delegated_ingredient_info,
            &DelegatedIngredient::seeds(mint_info.key),
        )?;

        let mut delegated =
            load_account::<DelegatedIngredient>("delegated_ingredient", delegated_ingredient_info)?;
        if delegated.mint != *mint_info.key {
            msg!(
                "Delegated ingredient [{}] stores mint [{}], expected [{}]",
                delegated_ingredient_info.key,
                delegated.mint,
                mint_info.key
            );
            return Err(TokenRecipesError::AccountMismatch.into());
        }

        if delegated.decrement()? {
            // Last recipe using this mint, give it back to its owner
            transfer_mint_authority(
                mint_info,
                delegated_ingredient_info,
                &delegated.authority,
                token_program_info,
                &[DELEGATED_INGREDIENT_SEED, mint_info.key.as_ref(), &[bump]],
            )?;
            close_account(delegated_ingredient_info, payer_info)?;
            msg!(
                "Mint authority of {} restored to {}",
                mint_info.key,
                delegated.authority
            );
        } else {
            save_account(&delegated, delegated_ingredient_info)?;
        }
    }

    realloc_account(recipe_info, payer_info, system_program_info, recipe.data_len())?;
    save_recipe(&recipe, recipe_info)?;

    msg!(
        "Removed {:?} ingredient from recipe {}",
        ingredient_type,
        recipe_info.key
    );
    Ok(())
}
