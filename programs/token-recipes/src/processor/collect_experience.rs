//! CollectExperience Instruction Processor
//!
//! Mints the accumulated experience to the recipe authority.

use crate::processor::collect_fees::assert_program_accounts;
use crate::state::features::{WisdomFeature, FEATURES_SEED};
use crate::state::{FeatureKind, Recipe};
use crate::utils::*;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
};

/// Accounts needed to flush the experience of a recipe.
pub(crate) struct ExperienceAccounts<'a, 'info> {
    pub authority: &'a AccountInfo<'info>,
    pub wisdom_feature: &'a AccountInfo<'info>,
    pub experience_mint: &'a AccountInfo<'info>,
    pub experience_token: &'a AccountInfo<'info>,
    pub system_program: &'a AccountInfo<'info>,
    pub token_program: &'a AccountInfo<'info>,
    pub associated_token_program: &'a AccountInfo<'info>,
}

pub(crate) fn flush_experience(
    accounts: &ExperienceAccounts,
    recipe: &mut Recipe,
) -> ProgramResult {
    let bump = assert_pda(
        "wisdom_feature",
        accounts.wisdom_feature,
        &FeatureKind::Wisdom.seeds(),
    )?;
    let wisdom_feature = load_account::<WisdomFeature>("wisdom_feature", accounts.wisdom_feature)?;
    assert_same_pubkeys(
        "experience_mint",
        accounts.experience_mint,
        &wisdom_feature.experience_mint,
    )?;

    if recipe.accumulated_experience == 0 {
        return Ok(());
    }

    let experience_mint = assert_mint_account("experience_mint", accounts.experience_mint)?;
    assert_writable("experience_mint", accounts.experience_mint)?;
    assert_writable("experience_token", accounts.experience_token)?;
    assert_associated_token_account(
        "experience_token",
        accounts.experience_token,
        accounts.authority.key,
        accounts.experience_mint.key,
    )?;
    create_associated_token_account_if_needed(
        accounts.experience_token,
        accounts.authority,
        accounts.experience_mint,
        accounts.authority,
        accounts.system_program,
        accounts.token_program,
        accounts.associated_token_program,
    )?;
    mint_tokens(
        accounts.experience_mint,
        accounts.experience_token,
        accounts.wisdom_feature,
        accounts.token_program,
        recipe.accumulated_experience,
        experience_mint.decimals,
        &[FEATURES_SEED, FeatureKind::Wisdom.name().as_bytes(), &[bump]],
    )?;

    msg!("Collected {} experience", recipe.accumulated_experience);
    recipe.accumulated_experience = 0;
    Ok(())
}

/// Process CollectExperience instruction
///
/// Accounts expected:
/// 0. `[writable]` Recipe
/// 1. `[writable, signer]` Recipe authority
/// 2. `[]` Wisdom feature PDA
/// 3. `[writable]` Experience mint
/// 4. `[writable]` Authority experience token
/// 5. `[]` System program
/// 6. `[]` Token program
/// 7. `[]` Associated token account program
pub fn process(accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let recipe_info = next_account_info(account_info_iter)?;
    let experience_accounts = ExperienceAccounts {
        authority: next_account_info(account_info_iter)?,
        wisdom_feature: next_account_info(account_info_iter)?,
        experience_mint: next_account_info(account_info_iter)?,
        experience_token: next_account_info(account_info_iter)?,
        system_program: next_account_info(account_info_iter)?,
        token_program: next_account_info(account_info_iter)?,
        associated_token_program: next_account_info(account_info_iter)?,
    };

    assert_writable("recipe", recipe_info)?;
    let mut recipe = load_recipe(recipe_info)?;
    assert_authority("authority", experience_accounts.authority, &recipe.authority)?;
    assert_writable("authority", experience_accounts.authority)?;
    assert_program_accounts(
        experience_accounts.system_program,
        experience_accounts.token_program,
        experience_accounts.associated_token_program,
    )?;

    flush_experience(&experience_accounts, &mut recipe)?;
    save_recipe(&recipe, recipe_info)
}
