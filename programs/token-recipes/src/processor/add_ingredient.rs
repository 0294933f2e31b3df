//! AddIngredient Instruction Processor
//!
//! Adds an input or an output to a recipe.
//!
//! # Flow
//!
//! ```text
//! 1. Build the ingredient from the instruction arguments
//! 2. Add it to the recipe and check the feature gates
//! 3. Mark the mint in its ingredient record (created on first use)
//! 4. Outputs: take over the mint authority, or bump the counter of the
//!    existing delegation
//! 5. Grow the recipe account and save it
//! ```

use crate::error::TokenRecipesError;
use crate::state::delegated_ingredient::DELEGATED_INGREDIENT_SEED;
use crate::state::ingredient_record::INGREDIENT_RECORD_SEED;
use crate::state::{
    DelegatedIngredient, IngredientInput, IngredientOutput, IngredientRecord, IngredientType, Pack,
};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    program_option::COption,
    pubkey::Pubkey,
    system_program,
};

/// The ingredient built from the instruction arguments.
enum NewIngredient {
    Input(IngredientInput),
    Output(IngredientOutput),
}

fn build_ingredient(
    mint: &Pubkey,
    amount: u64,
    ingredient_type: IngredientType,
    destination: Option<Pubkey>,
    max_supply: Option<u64>,
) -> Result<NewIngredient, ProgramError> {
    let missing = |argument: &str| -> ProgramError {
        msg!("{:?} needs a {} argument", ingredient_type, argument);
        TokenRecipesError::MissingIngredientArgument.into()
    };

    Ok(match ingredient_type {
        IngredientType::BurnTokenInput => NewIngredient::Input(IngredientInput::BurnToken {
            mint: *mint,
            amount,
        }),
        IngredientType::TransferTokenInput => {
            NewIngredient::Input(IngredientInput::TransferToken {
                mint: *mint,
                amount,
                destination: destination.ok_or_else(|| missing("destination"))?,
            })
        }
        IngredientType::TransferSolInput => NewIngredient::Input(IngredientInput::TransferSol {
            lamports: amount,
            destination: destination.ok_or_else(|| missing("destination"))?,
        }),
        IngredientType::MintTokenOutput => NewIngredient::Output(IngredientOutput::MintToken {
            mint: *mint,
            amount,
        }),
        IngredientType::MintTokenWithMaxSupplyOutput => {
            NewIngredient::Output(IngredientOutput::MintTokenWithMaxSupply {
                mint: *mint,
                amount,
                max_supply: max_supply.ok_or_else(|| missing("max_supply"))?,
            })
        }
    })
}

/// Process AddIngredient instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[writable]` Mint (ignored for SOL payments)
/// 2. `[writable]` Ingredient record PDA
/// 3. `[writable]` Delegated ingredient PDA (outputs only)
/// 4. `[signer]` Recipe authority
/// 5. `[writable, signer]` Payer
/// 6. `[]` System program
/// 7. `[]` Token program
pub fn process(
    accounts: &[AccountInfo],
    amount: u64,
    ingredient_type: IngredientType,
    destination: Option<Pubkey>,
    max_supply: Option<u64>,
) -> ProgramResult {
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

    if amount == 0 {
        msg!("Ingredient amount must be greater than zero");
        return Err(TokenRecipesError::InvalidAmount.into());
    }

    let mint = if ingredient_type.uses_mint() {
        Some(assert_mint_account("mint", mint_info)?)
    } else {
        None
    };

    // Update the recipe, then check it against its feature levels
    match build_ingredient(mint_info.key, amount, ingredient_type, destination, max_supply)? {
        NewIngredient::Input(input) => recipe.add_input(input)?,
        NewIngredient::Output(output) => recipe.add_output(output)?,
    }
    recipe.assert_features()?;

    if ingredient_type.uses_mint() {
        let bump = assert_pda(
            "ingredient_record",
            ingredient_record_info,
            &[
                INGREDIENT_RECORD_SEED,
                mint_info.key.as_ref(),
                recipe_info.key.as_ref(),
            ],
        )?;
        assert_writable("ingredient_record", ingredient_record_info)?;

        let mut record = if ingredient_record_info.data_is_empty() {
            create_account(
                ingredient_record_info,
                payer_info,
                system_program_info,
                IngredientRecord::LEN,
                &[
                    INGREDIENT_RECORD_SEED,
                    mint_info.key.as_ref(),
                    recipe_info.key.as_ref(),
                    &[bump],
                ],
            )?;
            IngredientRecord::new(*mint_info.key, *recipe_info.key)
        } else {
            load_account::<IngredientRecord>("ingredient_record", ingredient_record_info)?
        };
        record.set(ingredient_type.is_input(), true)?;
        save_account(&record, ingredient_record_info)?;
    }

    if let (true, Some(mint)) = (ingredient_type.is_output(), mint) {
        assert_writable("mint", mint_info)?;
        assert_writable("delegated_ingredient", delegated_ingredient_info)?;
        let bump = assert_pda(
            "delegated_ingredient",
            delegated_ingredient_info,
            &DelegatedIngredient::seeds(mint_info.key),
        )?;

        let mut delegated = if delegated_ingredient_info.data_is_empty() {
            // First recipe to list this mint: the authority must own it
            if mint.mint_authority != COption::Some(*authority_info.key) {
                msg!(
                    "Authority {} is not the mint authority of {}",
                    authority_info.key,
                    mint_info.key
                );
                return Err(TokenRecipesError::InvalidMintAuthority.into());
            }
            create_account(
                delegated_ingredient_info,
                payer_info,
                system_program_info,
                DelegatedIngredient::LEN,
                &[DELEGATED_INGREDIENT_SEED, mint_info.key.as_ref(), &[bump]],
            )?;
            transfer_mint_authority(
                mint_info,
                authority_info,
                delegated_ingredient_info.key,
                token_program_info,
                &[],
            )?;
            DelegatedIngredient::new(*mint_info.key, *authority_info.key)
        } else {
            let delegated = load_account::<DelegatedIngredient>(
                "delegated_ingredient",
                delegated_ingredient_info,
            )?;
            if delegated.authority != *authority_info.key {
                msg!(
                    "Mint {} was delegated by {}, not {}",
                    mint_info.key,
                    delegated.authority,
                    authority_info.key
                );
                return Err(TokenRecipesError::InvalidMintAuthority.into());
            }
            delegated
        };
        delegated.increment()?;
        save_account(&delegated, delegated_ingredient_info)?;
    }

    realloc_account(recipe_info, payer_info, system_program_info, recipe.data_len())?;
    save_recipe(&recipe, recipe_info)?;

    msg!(
        "Added {:?} ingredient, amount {}, to recipe {}",
        ingredient_type,
        amount,
        recipe_info.key
    );
    Ok(())
}
