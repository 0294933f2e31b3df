//! UnlockFeature Instruction Processor
//!
//! Levels up one feature of a recipe. The feature account lists which
//! mint unlocks which level; burn tiers consume one token, skill tiers
//! only require holding one.

use crate::economics::BASE_FEES;
use crate::error::TokenRecipesError;
use crate::state::features::fees::CUSTOM_FEES_LEVEL;
use crate::state::features::{resolve_unlock, Consumption};
use crate::state::{Feature, FeatureKind};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
};

/// Process UnlockFeature instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[]` Feature PDA
/// 2. `[signer]` Owner of the tier token
/// 3. `[writable]` Tier mint
/// 4. `[writable]` Owner token
/// 5. `[]` Token program
pub fn process(accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let recipe_info = next_account_info(account_info_iter)?;
    let feature_info = next_account_info(account_info_iter)?;
    let owner_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let owner_token_info = next_account_info(account_info_iter)?;
    let token_program_info = next_account_info(account_info_iter)?;

    // Validate accounts
    assert_writable("recipe", recipe_info)?;
    let mut recipe = load_recipe(recipe_info)?;
    assert_owned_by("feature", feature_info, &crate::id())?;
    let feature = Feature::unpack(&feature_info.data.borrow())?;
    let kind = feature.kind();
    assert_pda("feature", feature_info, &kind.seeds())?;
    assert_signer("owner", owner_info)?;
    assert_same_pubkeys("token_program", token_program_info, &spl_token::id())?;

    // Pick the tier this mint unlocks at the current level
    let level = recipe.feature_levels.get(kind);
    let tier = resolve_unlock(kind, level, &feature.tiers(), mint_info.key)?;

    let mint = assert_mint_account("mint", mint_info)?;
    let token = assert_token_account("owner_token", owner_token_info, owner_info.key, mint_info.key)?;
    if token.amount < 1 {
        msg!("Owner holds no {} token", mint_info.key);
        return Err(TokenRecipesError::NotEnoughTokens.into());
    }

    if tier.consumption == Consumption::Burn {
        assert_writable("mint", mint_info)?;
        assert_writable("owner_token", owner_token_info)?;
        burn_tokens(
            owner_token_info,
            mint_info,
            owner_info,
            token_program_info,
            1,
            mint.decimals,
        )?;
    }

    let new_level = tier.next_level(level);
    recipe.feature_levels.set(kind, new_level);
    if kind == FeatureKind::Fees && new_level >= CUSTOM_FEES_LEVEL && recipe.fees == 0 {
        recipe.fees = BASE_FEES;
    }
    save_recipe(&recipe, recipe_info)?;

    msg!(
        "Feature {} of recipe {} unlocked to level {}",
        kind.name(),
        recipe_info.key,
        new_level
    );
    Ok(())
}
