//! Instruction Processors
//!
//! This module contains the business logic for each instruction.
//! Each instruction has its own file for clarity and maintainability.

pub mod activate_recipe;
pub mod add_ingredient;
pub mod admin_set_feature;
pub mod collect_experience;
pub mod collect_fees;
pub mod craft;
pub mod create_recipe;
pub mod delete_recipe;
pub mod pause_recipe;
pub mod remove_ingredient;
pub mod set_fees;
pub mod unlock_feature;

use crate::instruction::TokenRecipesInstruction;
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

/// Main processor that routes instructions to specific handlers
pub struct Processor;

impl Processor {
    /// Process a token recipes instruction
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        // PDAs are derived from `crate::id()` everywhere below
        if *program_id != crate::id() {
            return Err(ProgramError::IncorrectProgramId);
        }

        let instruction = TokenRecipesInstruction::unpack(instruction_data)?;

        match instruction {
            TokenRecipesInstruction::CreateRecipe => {
                msg!("Instruction: CreateRecipe");
                create_recipe::process(accounts)
            }

            TokenRecipesInstruction::AddIngredient {
                amount,
                ingredient_type,
                destination,
                max_supply,
            } => {
                msg!("Instruction: AddIngredient");
                add_ingredient::process(accounts, amount, ingredient_type, destination, max_supply)
            }

            TokenRecipesInstruction::RemoveIngredient { ingredient_type } => {
                msg!("Instruction: RemoveIngredient");
                remove_ingredient::process(accounts, ingredient_type)
            }

            TokenRecipesInstruction::ActivateRecipe => {
                msg!("Instruction: ActivateRecipe");
                activate_recipe::process(accounts)
            }

            TokenRecipesInstruction::PauseRecipe => {
                msg!("Instruction: PauseRecipe");
                pause_recipe::process(accounts)
            }

            TokenRecipesInstruction::Craft { quantity } => {
                msg!("Instruction: Craft");
                craft::process(accounts, quantity)
            }

            TokenRecipesInstruction::DeleteRecipe => {
                msg!("Instruction: DeleteRecipe");
                delete_recipe::process(accounts)
            }

            TokenRecipesInstruction::AdminSetFeature { feature } => {
                msg!("Instruction: AdminSetFeature");
                admin_set_feature::process(accounts, feature)
            }

            TokenRecipesInstruction::UnlockFeature => {
                msg!("Instruction: UnlockFeature");
                unlock_feature::process(accounts)
            }

            TokenRecipesInstruction::SetFees { fees } => {
                msg!("Instruction: SetFees");
                set_fees::process(accounts, fees)
            }

            TokenRecipesInstruction::CollectFees => {
                msg!("Instruction: CollectFees");
                collect_fees::process(accounts)
            }

            TokenRecipesInstruction::CollectExperience => {
                msg!("Instruction: CollectExperience");
                collect_experience::process(accounts)
            }
        }
    }
}
