//! Delegated Ingredient
//!
//! Output mints hand their mint authority to this PDA so any recipe
//! listing the mint can mint it. `counter` is the number of recipes that
//! currently list the mint as an output; at zero the previous authority
//! gets its mint back and the account is closed.
//!
//! # Size: 69 bytes
//!
//! ```text
//! [key: 1][mint: 32][authority: 32][counter: 4]
//! ```

use crate::error::TokenRecipesError;
use crate::state::{unpack_key, unpack_pubkey, Key, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

pub const DELEGATED_INGREDIENT_SEED: &[u8] = b"delegated_ingredient";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelegatedIngredient {
    pub mint: Pubkey,
    /// Mint authority to restore once no recipe uses the mint.
    pub authority: Pubkey,
    pub counter: u32,
}

impl DelegatedIngredient {
    pub fn new(mint: Pubkey, authority: Pubkey) -> Self {
        Self {
            mint,
            authority,
            counter: 0,
        }
    }

    pub fn seeds(mint: &Pubkey) -> [&[u8]; 2] {
        [DELEGATED_INGREDIENT_SEED, mint.as_ref()]
    }

    pub fn find_pda(mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&Self::seeds(mint), &crate::id())
    }

    pub fn increment(&mut self) -> Result<(), ProgramError> {
        self.counter = self
            .counter
            .checked_add(1)
            .ok_or(TokenRecipesError::NumericalOverflow)?;
        Ok(())
    }

    /// Returns true when the last recipe released the mint.
    pub fn decrement(&mut self) -> Result<bool, ProgramError> {
        self.counter = self
            .counter
            .checked_sub(1)
            .ok_or(TokenRecipesError::NumericalOverflow)?;
        Ok(self.counter == 0)
    }
}

impl Pack for DelegatedIngredient {
    const LEN: usize = 1 + 32 + 32 + 4;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, DelegatedIngredient::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, mint, authority, counter) = array_refs![input, 1, 32, 32, 4];
        unpack_key(key, Key::DelegatedIngredient)?;

        Ok(DelegatedIngredient {
            mint: unpack_pubkey(mint),
            authority: unpack_pubkey(authority),
            counter: u32::from_le_bytes(*counter),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, DelegatedIngredient::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, mint, authority, counter) = mut_array_refs![output, 1, 32, 32, 4];

        key[0] = Key::DelegatedIngredient as u8;
        mint.copy_from_slice(self.mint.as_ref());
        authority.copy_from_slice(self.authority.as_ref());
        *counter = self.counter.to_le_bytes();
        Ok(())
    }
}
