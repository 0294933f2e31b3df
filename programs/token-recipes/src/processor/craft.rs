//! Craft Instruction Processor
//!
//! Runs a recipe `quantity` times: consumes every input, mints every
//! output, charges the protocol fee once and records the economics.
//!
//! # Accounts Layout
//!
//! ```text
//! [recipe, owner, payer, system, token, associated token]
//! then, for each input in recipe order:
//!   BurnToken      mint, owner token
//!   TransferToken  mint, owner token, destination, destination token
//!   TransferSol    destination
//! then, for each output in recipe order:
//!   MintToken*     mint, owner token, delegated ingredient
//! ```
//!
//! Missing token accounts are created when they are the associated token
//! account of their wallet; the payer funds them.

use crate::economics::CraftEconomics;
use crate::error::TokenRecipesError;
use crate::state::delegated_ingredient::DELEGATED_INGREDIENT_SEED;
use crate::state::{DelegatedIngredient, IngredientInput};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

/// Accounts shared by every ingredient.
struct CraftContext<'a, 'info> {
    owner: &'a AccountInfo<'info>,
    payer: &'a AccountInfo<'info>,
    system_program: &'a AccountInfo<'info>,
    token_program: &'a AccountInfo<'info>,
    associated_token_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> CraftContext<'a, 'info> {
    /// Validates `token` as `wallet`'s account for `mint`, creating it when
    /// it is a missing associated token account.
    fn prepare_token_account(
        &self,
        name: &str,
        token: &'a AccountInfo<'info>,
        wallet: &'a AccountInfo<'info>,
        mint: &'a AccountInfo<'info>,
    ) -> ProgramResult {
        assert_writable(name, token)?;
        if token.data_is_empty() {
            assert_associated_token_account(name, token, wallet.key, mint.key)?;
            create_associated_token_account_if_needed(
                token,
                wallet,
                mint,
                self.payer,
                self.system_program,
                self.token_program,
                self.associated_token_program,
            )
        } else {
            assert_token_account(name, token, wallet.key, mint.key).map(|_| ())
        }
    }

    /// Checks that the owner holds `amount` tokens and returns the mint
    /// decimals.
    fn assert_owner_balance(
        &self,
        token: &'a AccountInfo<'info>,
        mint: &'a AccountInfo<'info>,
        amount: u64,
    ) -> Result<u8, ProgramError> {
        let mint_state = assert_mint_account("mint", mint)?;
        assert_writable("owner_token", token)?;
        let token_state = assert_token_account("owner_token", token, self.owner.key, mint.key)?;
        if token_state.amount < amount {
            msg!(
                "Owner holds {} of {}, craft needs {}",
                token_state.amount,
                mint.key,
                amount
            );
            return Err(TokenRecipesError::NotEnoughTokens.into());
        }
        Ok(mint_state.decimals)
    }
}

fn assert_ingredient_mint(mint_info: &AccountInfo, mint: &Pubkey) -> ProgramResult {
    assert_same_pubkeys("mint", mint_info, mint)?;
    assert_writable("mint", mint_info)
}

/// Process Craft instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[signer]` Owner
/// 2. `[writable, signer]` Payer
/// 3. `[]` System program
/// 4. `[]` Token program
/// 5. `[]` Associated token account program
/// 6.. Ingredient accounts, see the module documentation
pub fn process(accounts: &[AccountInfo], quantity: u64) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let recipe_info = next_account_info(account_info_iter)?;
    let owner_info = next_account_info(account_info_iter)?;
    let payer_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;
    let token_program_info = next_account_info(account_info_iter)?;
    let associated_token_program_info = next_account_info(account_info_iter)?;

    // Validate accounts
    assert_writable("recipe", recipe_info)?;
    let mut recipe = load_recipe(recipe_info)?;
    if !recipe.is_active() {
        msg!("Recipe {} is paused", recipe_info.key);
        return Err(TokenRecipesError::RecipeIsNotActive.into());
    }
    if quantity == 0 {
        msg!("Craft quantity must be greater than zero");
        return Err(TokenRecipesError::InvalidAmount.into());
    }
    assert_signer("owner", owner_info)?;
    assert_signer("payer", payer_info)?;
    assert_writable("payer", payer_info)?;
    assert_same_pubkeys("system_program", system_program_info, &system_program::id())?;
    assert_same_pubkeys("token_program", token_program_info, &spl_token::id())?;
    assert_same_pubkeys(
        "associated_token_program",
        associated_token_program_info,
        &spl_associated_token_account::id(),
    )?;

    let context = CraftContext {
        owner: owner_info,
        payer: payer_info,
        system_program: system_program_info,
        token_program: token_program_info,
        associated_token_program: associated_token_program_info,
    };

    // =========================================================================
    // INPUTS
    // =========================================================================

    for input in &recipe.inputs {
        let total = checked_mul(input.amount(), quantity)?;

        match input {
            IngredientInput::BurnToken { mint, .. } => {
                let mint_info = next_account_info(account_info_iter)?;
                let token_info = next_account_info(account_info_iter)?;
                assert_ingredient_mint(mint_info, mint)?;
                let decimals = context.assert_owner_balance(token_info, mint_info, total)?;

                burn_tokens(
                    token_info,
                    mint_info,
                    owner_info,
                    token_program_info,
                    total,
                    decimals,
                )?;
            }
            IngredientInput::TransferToken {
                mint, destination, ..
            } => {
                let mint_info = next_account_info(account_info_iter)?;
                let token_info = next_account_info(account_info_iter)?;
                let destination_info = next_account_info(account_info_iter)?;
                let destination_token_info = next_account_info(account_info_iter)?;
                assert_ingredient_mint(mint_info, mint)?;
                assert_same_pubkeys("destination", destination_info, destination)?;
                let decimals = context.assert_owner_balance(token_info, mint_info, total)?;
                context.prepare_token_account(
                    "destination_token",
                    destination_token_info,
                    destination_info,
                    mint_info,
                )?;

                transfer_tokens(
                    token_info,
                    mint_info,
                    destination_token_info,
                    owner_info,
                    token_program_info,
                    total,
                    decimals,
                )?;
            }
            IngredientInput::TransferSol { destination, .. } => {
                let destination_info = next_account_info(account_info_iter)?;
                assert_same_pubkeys("destination", destination_info, destination)?;
                assert_writable("destination", destination_info)?;

                transfer_sol(payer_info, destination_info, system_program_info, total)?;
            }
        }
    }

    // =========================================================================
    // OUTPUTS
    // =========================================================================

    for output in &recipe.outputs {
        let mint = output.mint();
        let mint_info = next_account_info(account_info_iter)?;
        let token_info = next_account_info(account_info_iter)?;
        let delegated_ingredient_info = next_account_info(account_info_iter)?;
        assert_ingredient_mint(mint_info, &mint)?;
        let bump = assert_pda(
            "delegated_ingredient",
            delegated_ingredient_info,
            &DelegatedIngredient::seeds(&mint),
        )?;

        let total = checked_mul(output.amount(), quantity)?;
        let mint_state = assert_mint_account("mint", mint_info)?;
        if checked_add(mint_state.supply, total)? > output.max_supply() {
            msg!(
                "Minting {} of {} would exceed its maximum supply of {}",
                total,
                mint,
                output.max_supply()
            );
            return Err(TokenRecipesError::MaximumSupplyReached.into());
        }
        context.prepare_token_account("owner_token", token_info, owner_info, mint_info)?;

        mint_tokens(
            mint_info,
            token_info,
            delegated_ingredient_info,
            token_program_info,
            total,
            mint_state.decimals,
            &[DELEGATED_INGREDIENT_SEED, mint.as_ref(), &[bump]],
        )?;
    }

    // =========================================================================
    // ECONOMICS
    // =========================================================================

    let economics = CraftEconomics::for_recipe(&recipe)?;
    transfer_sol(payer_info, recipe_info, system_program_info, economics.fees)?;
    economics.accumulate(&mut recipe)?;
    recipe.total_crafts = checked_add(recipe.total_crafts, 1)?;
    recipe.total_crafts_with_quantity = checked_add(recipe.total_crafts_with_quantity, quantity)?;
    save_recipe(&recipe, recipe_info)?;

    msg!(
        "Crafted recipe {} x{}, fees {}, experience {}",
        recipe_info.key,
        quantity,
        economics.fees,
        economics.experience
    );
    Ok(())
}
