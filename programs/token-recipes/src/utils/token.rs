//! SPL Token CPI Helpers
//!
//! Thin wrappers over the checked spl-token instructions. The caller
//! passes the decimals read from the mint, so a wrong mint fails inside
//! the token program instead of moving the wrong amount.

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program::{invoke, invoke_signed},
    pubkey::Pubkey,
};
use spl_token::instruction::AuthorityType;

/// Burn `amount` tokens from `token_account`, signed by its `owner`.
pub fn burn_tokens<'a>(
    token_account: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    owner: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    amount: u64,
    decimals: u8,
) -> ProgramResult {
    invoke(
        &spl_token::instruction::burn_checked(
            token_program.key,
            token_account.key,
            mint.key,
            owner.key,
            &[],
            amount,
            decimals,
        )?,
        &[
            token_account.clone(),
            mint.clone(),
            owner.clone(),
            token_program.clone(),
        ],
    )
}

/// Transfer `amount` tokens between two accounts of the same mint.
pub fn transfer_tokens<'a>(
    source: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    owner: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    amount: u64,
    decimals: u8,
) -> ProgramResult {
    invoke(
        &spl_token::instruction::transfer_checked(
            token_program.key,
            source.key,
            mint.key,
            destination.key,
            owner.key,
            &[],
            amount,
            decimals,
        )?,
        &[
            source.clone(),
            mint.clone(),
            destination.clone(),
            owner.clone(),
            token_program.clone(),
        ],
    )
}

/// Mint `amount` tokens, signed by a PDA mint authority.
pub fn mint_tokens<'a>(
    mint: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    invoke_signed(
        &spl_token::instruction::mint_to_checked(
            token_program.key,
            mint.key,
            destination.key,
            authority.key,
            &[],
            amount,
            decimals,
        )?,
        &[
            mint.clone(),
            destination.clone(),
            authority.clone(),
            token_program.clone(),
        ],
        &[signer_seeds],
    )
}

/// Hand the mint authority of `mint` to `new_authority`.
///
/// `signer_seeds` is empty when the current authority is a plain signer
/// and holds the PDA seeds when it is a delegated ingredient.
pub fn transfer_mint_authority<'a>(
    mint: &AccountInfo<'a>,
    current_authority: &AccountInfo<'a>,
    new_authority: &Pubkey,
    token_program: &AccountInfo<'a>,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let instruction = spl_token::instruction::set_authority(
        token_program.key,
        mint.key,
        Some(new_authority),
        AuthorityType::MintTokens,
        current_authority.key,
        &[],
    )?;
    let account_infos = [
        mint.clone(),
        current_authority.clone(),
        token_program.clone(),
    ];
    if signer_seeds.is_empty() {
        invoke(&instruction, &account_infos)
    } else {
        invoke_signed(&instruction, &account_infos, &[signer_seeds])
    }
}

/// Create the associated token account of `wallet` for `mint` unless it
/// already exists.
#[allow(clippy::too_many_arguments)]
pub fn create_associated_token_account_if_needed<'a>(
    associated_token: &AccountInfo<'a>,
    wallet: &AccountInfo<'a>,
    mint: &AccountInfo<'a>,
    payer: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    associated_token_program: &AccountInfo<'a>,
) -> ProgramResult {
    if !associated_token.data_is_empty() {
        return Ok(());
    }
    invoke(
        &spl_associated_token_account::instruction::create_associated_token_account(
            payer.key,
            wallet.key,
            mint.key,
            token_program.key,
        ),
        &[
            payer.clone(),
            associated_token.clone(),
            wallet.clone(),
            mint.clone(),
            system_program.clone(),
            token_program.clone(),
            associated_token_program.clone(),
        ],
    )
}
