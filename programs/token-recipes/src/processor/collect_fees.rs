//! CollectFees Instruction Processor
//!
//! Pays out what a recipe accumulated from crafting fees:
//!
//! ```text
//! accumulated_admin_fees  -> lamports to the admin destination
//! accumulated_shards      -> shard tokens minted to the authority
//! lamports above rent     -> the authority
//! ```

use crate::state::features::{FeesFeature, FEATURES_SEED};
use crate::state::{FeatureKind, Recipe};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg, system_program,
};

/// Accounts needed to flush the fees of a recipe.
pub(crate) struct FeesAccounts<'a, 'info> {
    pub recipe: &'a AccountInfo<'info>,
    pub authority: &'a AccountInfo<'info>,
    pub admin_fees_destination: &'a AccountInfo<'info>,
    pub fees_feature: &'a AccountInfo<'info>,
    pub shards_mint: &'a AccountInfo<'info>,
    pub shards_token: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub associated_token_program: &'a AccountInfo<'info>,
}

/// Pays out the fee accumulators and zeroes them. The caller saves or
/// closes the recipe.
pub(crate) fn flush_fees(accounts: &FeesAccounts, recipe: &mut Recipe) -> ProgramResult {
    let bump = assert_pda(
        "fees_feature",
        accounts.fees_feature,
        &FeatureKind::Fees.seeds(),
    )?;
    let fees_feature = load_account::<FeesFeature>("fees_feature", accounts.fees_feature)?;
    assert_same_pubkeys(
        "admin_fees_destination",
        accounts.admin_fees_destination,
        &fees_feature.admin_destination,
    )?;
    assert_writable("admin_fees_destination", accounts.admin_fees_destination)?;
    assert_same_pubkeys("shards_mint", accounts.shards_mint, &fees_feature.shard_mint)?;

    if recipe.accumulated_shards > 0 {
        let shards_mint = assert_mint_account("shards_mint", accounts.shards_mint)?;
        assert_writable("shards_mint", accounts.shards_mint)?;
        assert_writable("shards_token", accounts.shards_token)?;
        assert_associated_token_account(
            "shards_token",
            accounts.shards_token,
            accounts.authority.key,
            accounts.shards_mint.key,
        )?;
        create_associated_token_account_if_needed(
            accounts.shards_token,
            accounts.authority,
            accounts.shards_mint,
            accounts.authority,
            accounts.system_program,
            accounts.token_program,
            accounts.associated_token_program,
        )?;
        mint_tokens(
            accounts.shards_mint,
            accounts.shards_token,
            accounts.fees_feature,
            accounts.token_program,
            recipe.accumulated_shards,
            shards_mint.decimals,
            &[FEATURES_SEED, FeatureKind::Fees.name().as_bytes(), &[bump]],
        )?;
    }

    transfer_lamports_from_pda(
        accounts.recipe,
        accounts.admin_fees_destination,
        recipe.accumulated_admin_fees,
    )?;
    let surplus = lamports_above_rent(accounts.recipe)?;
    transfer_lamports_from_pda(accounts.recipe, accounts.authority, surplus)?;

    msg!(
        "Collected {} admin fees, {} shards, {} lamports for the authority",
        recipe.accumulated_admin_fees,
        recipe.accumulated_shards,
        surplus
    );
    recipe.accumulated_admin_fees = 0;
    recipe.accumulated_shards = 0;
    Ok(())
}

/// Process CollectFees instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[writable, signer]` Recipe authority
/// 2. `[writable]` Admin fees destination
/// 3. `[]` Fees feature PDA
/// 4. `[writable]` Shards mint
/// 5. `[writable]` Authority shards token
/// 6. `[]` System program
/// 7. `[]` Token program
/// 8. `[]` Associated token account program
pub fn process(accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let fees_accounts = FeesAccounts {
        recipe: next_account_info(account_info_iter)?,
        authority: next_account_info(account_info_iter)?,
        admin_fees_destination: next_account_info(account_info_iter)?,
        fees_feature: next_account_info(account_info_iter)?,
        shards_mint: next_account_info(account_info_iter)?,
        shards_token: next_account_info(account_info_iter)?,
        system_program: next_account_info(account_info_iter)?,
        token_program: next_account_info(account_info_iter)?,
        associated_token_program: next_account_info(account_info_iter)?,
    };

    assert_writable("recipe", fees_accounts.recipe)?;
    let mut recipe = load_recipe(fees_accounts.recipe)?;
    assert_authority("authority", fees_accounts.authority, &recipe.authority)?;
    assert_writable("authority", fees_accounts.authority)?;
    assert_program_accounts(
        fees_accounts.system_program,
        fees_accounts.token_program,
        fees_accounts.associated_token_program,
    )?;

    flush_fees(&fees_accounts, &mut recipe)?;
    save_recipe(&recipe, fees_accounts.recipe)
}

pub(crate) fn assert_program_accounts(
    system_program: &AccountInfo,
    token_program: &AccountInfo,
    associated_token_program: &AccountInfo,
) -> ProgramResult {
    assert_same_pubkeys("system_program", system_program, &system_program::id())?;
    assert_same_pubkeys("token_program", token_program, &spl_token::id())?;
    assert_same_pubkeys(
        "associated_token_program",
        associated_token_program,
        &spl_associated_token_account::id(),
    )
}
