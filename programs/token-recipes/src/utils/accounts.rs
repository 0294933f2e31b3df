//! Account Lifecycle Helpers
//!
//! Program-owned accounts (recipes, ingredient records, delegated
//! ingredients, features) are PDAs created, resized and closed here.
//!
//! ```text
//! create_account  -> system_program::create_account, signed with PDA seeds
//! realloc_account -> payer tops up rent on growth, recipe refunds on shrink
//! close_account   -> lamports to the receiver, data wiped, owner reset
//! ```

use crate::error::TokenRecipesError;
use crate::state::{Pack, Recipe};
use crate::utils::assertions::{assert_owned_by, checked_add, checked_sub};
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};

// =============================================================================
// LOAD / SAVE
// =============================================================================

/// Load a fixed-size program account after checking that we own it.
pub fn load_account<T: Pack>(name: &str, account: &AccountInfo) -> Result<T, ProgramError> {
    assert_owned_by(name, account, &crate::id())?;
    T::unpack_from_slice(&account.data.borrow())
}

pub fn save_account<T: Pack>(state: &T, account: &AccountInfo) -> ProgramResult {
    state.pack_into_slice(&mut account.data.borrow_mut())
}

/// Recipes are variable-sized, so they do not go through `Pack`.
pub fn load_recipe(account: &AccountInfo) -> Result<Recipe, ProgramError> {
    assert_owned_by("recipe", account, &crate::id())?;
    Recipe::unpack(&account.data.borrow())
}

/// The account must already have the recipe's exact size, see
/// `realloc_account`.
pub fn save_recipe(recipe: &Recipe, account: &AccountInfo) -> ProgramResult {
    recipe.pack(&mut account.data.borrow_mut())
}

// =============================================================================
// CREATE / RESIZE / CLOSE
// =============================================================================

/// Create a PDA owned by this program, funded for rent exemption by `payer`.
///
/// PDA addresses are public, so anyone may send lamports to one before it
/// is created. `system_program::create_account` rejects such an address, so
/// a funded target is topped up, allocated and assigned instead.
pub fn create_account<'a>(
    target: &AccountInfo<'a>,
    payer: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    size: usize,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let minimum = Rent::get()?.minimum_balance(size).max(1);

    if target.lamports() == 0 {
        return invoke_signed(
            &system_instruction::create_account(
                payer.key,
                target.key,
                minimum,
                size as u64,
                &crate::id(),
            ),
            &[payer.clone(), target.clone(), system_program.clone()],
            &[signer_seeds],
        );
    }

    msg!(
        "Account [{}] already holds {} lamports, allocating in place",
        target.key,
        target.lamports()
    );
    transfer_sol(
        payer,
        target,
        system_program,
        minimum.saturating_sub(target.lamports()),
    )?;

    let accounts = [target.clone(), system_program.clone()];
    invoke_signed(
        &system_instruction::allocate(target.key, size as u64),
        &accounts,
        &[signer_seeds],
    )?;
    invoke_signed(
        &system_instruction::assign(target.key, &crate::id()),
        &accounts,
        &[signer_seeds],
    )
}

/// Resize a program account, keeping it exactly rent exempt.
///
/// Growing pulls the missing rent from `payer`. Shrinking hands the
/// surplus rent back to `payer`.
pub fn realloc_account<'a>(
    target: &AccountInfo<'a>,
    payer: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    new_size: usize,
) -> ProgramResult {
    let rent = Rent::get()?;
    let old_minimum = rent.minimum_balance(target.data_len());
    let new_minimum = rent.minimum_balance(new_size);

    if new_minimum > old_minimum {
        transfer_sol(payer, target, system_program, new_minimum - old_minimum)?;
    } else if old_minimum > new_minimum {
        transfer_lamports_from_pda(target, payer, old_minimum - new_minimum)?;
    }

    target.realloc(new_size, false)
}

/// Close a program account: every lamport goes to `receiver`, the data is
/// wiped and the account is handed back to the system program.
pub fn close_account<'a>(target: &AccountInfo<'a>, receiver: &AccountInfo<'a>) -> ProgramResult {
    let lamports = target.lamports();
    transfer_lamports_from_pda(target, receiver, lamports)?;

    target.data.borrow_mut().fill(0);
    target.realloc(0, false)?;
    target.assign(&system_program::id());
    Ok(())
}

// =============================================================================
// LAMPORTS
// =============================================================================

/// Move lamports out of an account this program owns.
///
/// The runtime lets the owner debit an account directly, no CPI needed.
pub fn transfer_lamports_from_pda<'a>(
    from: &AccountInfo<'a>,
    to: &AccountInfo<'a>,
    lamports: u64,
) -> ProgramResult {
    if lamports == 0 {
        return Ok(());
    }
    let from_balance = checked_sub(from.lamports(), lamports).map_err(|_| {
        msg!(
            "Account [{}] cannot pay {} lamports out of {}",
            from.key,
            lamports,
            from.lamports()
        );
        ProgramError::from(TokenRecipesError::NotEnoughTokens)
    })?;
    let to_balance = checked_add(to.lamports(), lamports)?;

    **from.lamports.borrow_mut() = from_balance;
    **to.lamports.borrow_mut() = to_balance;
    Ok(())
}

/// Move lamports out of a system-owned signer.
pub fn transfer_sol<'a>(
    from: &AccountInfo<'a>,
    to: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    lamports: u64,
) -> ProgramResult {
    if lamports == 0 {
        return Ok(());
    }
    invoke(
        &system_instruction::transfer(from.key, to.key, lamports),
        &[from.clone(), to.clone(), system_program.clone()],
    )
}

/// Lamports an account holds above its rent-exempt minimum.
pub fn lamports_above_rent(account: &AccountInfo) -> Result<u64, ProgramError> {
    let minimum = Rent::get()?.minimum_balance(account.data_len());
    Ok(account.lamports().saturating_sub(minimum))
}

// =============================================================================
// UNIT TESTS
// =============================================================================
