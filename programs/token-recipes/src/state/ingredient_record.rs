//! Ingredient Record
//!
//! One record per (mint, recipe) pair. It lets clients find every recipe
//! that uses a mint, and tells the program whether the mint is already an
//! input or an output of the recipe.
//!
//! # Size: 67 bytes
//!
//! ```text
//! [key: 1][input: 1][output: 1][mint: 32][recipe: 32]
//! ```

use crate::error::TokenRecipesError;
use crate::state::{unpack_bool, unpack_key, unpack_pubkey, Key, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{msg, program_error::ProgramError, pubkey::Pubkey};

pub const INGREDIENT_RECORD_SEED: &[u8] = b"ingredient_record";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngredientRecord {
    pub input: bool,
    pub output: bool,
    pub mint: Pubkey,
    pub recipe: Pubkey,
}

impl IngredientRecord {
    pub fn new(mint: Pubkey, recipe: Pubkey) -> Self {
        Self {
            input: false,
            output: false,
            mint,
            recipe,
        }
    }

    pub fn find_pda(mint: &Pubkey, recipe: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[INGREDIENT_RECORD_SEED, mint.as_ref(), recipe.as_ref()],
            &crate::id(),
        )
    }

    /// Marks the mint as an input (`is_input`) or an output.
    pub fn set(&mut self, is_input: bool, value: bool) -> Result<(), ProgramError> {
        let slot = if is_input {
            &mut self.input
        } else {
            &mut self.output
        };
        match (*slot, value) {
            (true, true) => {
                msg!("Mint {} is already an ingredient of this recipe", self.mint);
                Err(TokenRecipesError::IngredientAlreadyAdded.into())
            }
            (false, false) => {
                msg!("Mint {} is not an ingredient of this recipe", self.mint);
                Err(TokenRecipesError::MissingIngredient.into())
            }
            _ => {
                *slot = value;
                Ok(())
            }
        }
    }

    /// A record that is neither input nor output has no reason to exist.
    pub fn should_be_closed(&self) -> bool {
        !self.input && !self.output
    }
}

impl Pack for IngredientRecord {
    const LEN: usize = 1 + 1 + 1 + 32 + 32;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, IngredientRecord::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, is_input, is_output, mint, recipe) = array_refs![input, 1, 1, 1, 32, 32];
        unpack_key(key, Key::IngredientRecord)?;

        Ok(IngredientRecord {
            input: unpack_bool(is_input)?,
            output: unpack_bool(is_output)?,
            mint: unpack_pubkey(mint),
            recipe: unpack_pubkey(recipe),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, IngredientRecord::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, is_input, is_output, mint, recipe) = mut_array_refs![output, 1, 1, 1, 32, 32];

        key[0] = Key::IngredientRecord as u8;
        is_input[0] = self.input as u8;
        is_output[0] = self.output as u8;
        mint.copy_from_slice(self.mint.as_ref());
        recipe.copy_from_slice(self.recipe.as_ref());
        Ok(())
    }
}
