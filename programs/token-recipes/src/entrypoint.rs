//! Program Entrypoint
//!
//! The Solana runtime calls into the program through here for every
//! instruction addressed to it.

// Only compile this module if the "no-entrypoint" feature is NOT enabled
#![cfg(not(feature = "no-entrypoint"))]

use crate::{error::TokenRecipesError, processor::Processor};
use solana_program::{
    account_info::AccountInfo, entrypoint, entrypoint::ProgramResult,
    program_error::PrintProgramError, pubkey::Pubkey,
};

entrypoint!(process_instruction);

/// The main entrypoint for the token recipes program.
///
/// Errors are printed with their message before being returned so that
/// transaction logs show `Error: Recipe is not active` instead of a bare
/// custom code.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if let Err(error) = Processor::process(program_id, accounts, instruction_data) {
        error.print::<TokenRecipesError>();
        return Err(error);
    }
    Ok(())
}
