//! Recipe Account State
//!
//! A recipe turns a list of inputs into a list of outputs. It also carries
//! the feature levels it unlocked and everything crafting accumulated for
//! later collection.
//!
//! # Lifecycle
//!
//! ```text
//! CreateRecipe ──► Paused ◄──ActivateRecipe / PauseRecipe──► Active
//!                     │                                        │
//!                     └────────────── DeleteRecipe ────────────┘
//!                            (only with no ingredients)
//! ```

use crate::error::TokenRecipesError;
use crate::state::features::{
    AdditionalOutputsFeature, FeatureLevels, SolPaymentFeature, TransferInputsFeature,
};
use crate::state::{
    unpack_key, unpack_pubkey, IngredientInput, IngredientOutput, IngredientType, Key,
};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{msg, program_error::ProgramError, pubkey::Pubkey};

pub const RECIPE_SEED: &[u8] = b"recipe";

// =============================================================================
// RECIPE STATUS
// =============================================================================

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecipeStatus {
    #[default]
    Paused = 0,
    Active = 1,
}

impl RecipeStatus {
    pub fn from_u8(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(RecipeStatus::Paused),
            1 => Ok(RecipeStatus::Active),
            _ => {
                msg!("Invalid recipe status {}", value);
                Err(TokenRecipesError::DeserializationError.into())
            }
        }
    }
}

// =============================================================================
// RECIPE STRUCTURE
// =============================================================================

/// Recipe account data.
///
/// # Memory Layout (132-byte header, then ingredients)
///
/// ```text
/// ┌────────┬──────┬────────────────────────────┐
/// │ Offset │ Size │ Field                      │
/// ├────────┼──────┼────────────────────────────┤
/// │ 0      │ 1    │ key                        │
/// │ 1      │ 32   │ base                       │
/// │ 33     │ 32   │ authority                  │
/// │ 65     │ 1    │ status                     │
/// │ 66     │ 8    │ total_crafts               │
/// │ 74     │ 8    │ total_crafts_with_quantity │
/// │ 82     │ 8    │ fees                       │
/// │ 90     │ 8    │ accumulated_admin_fees     │
/// │ 98     │ 8    │ accumulated_shards         │
/// │ 106    │ 8    │ accumulated_experience     │
/// │ 114    │ 10   │ feature_levels             │
/// │ 124    │ 4    │ inputs count               │
/// │ 128    │ 4    │ outputs count              │
/// │ 132    │ ..   │ inputs, then outputs       │
/// └────────┴──────┴────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipe {
    /// Signer whose key seeds the recipe address.
    pub base: Pubkey,
    pub authority: Pubkey,
    pub status: RecipeStatus,
    pub total_crafts: u64,
    /// Sum of every craft's quantity.
    pub total_crafts_with_quantity: u64,
    /// Custom fees in lamports, used from fees level 10.
    pub fees: u64,
    /// Lamports held by the recipe that belong to the program admin.
    pub accumulated_admin_fees: u64,
    pub accumulated_shards: u64,
    pub accumulated_experience: u64,
    pub feature_levels: FeatureLevels,
    pub inputs: Vec<IngredientInput>,
    pub outputs: Vec<IngredientOutput>,
}

impl Recipe {
    pub const HEADER_LEN: usize = 1 + 32 + 32 + 1 + 8 * 6 + FeatureLevels::LEN + 4 + 4;

    pub fn new(base: Pubkey, authority: Pubkey) -> Self {
        Self {
            base,
            authority,
            ..Self::default()
        }
    }

    pub fn seeds(base: &Pubkey) -> [&[u8]; 2] {
        [RECIPE_SEED, base.as_ref()]
    }

    pub fn find_pda(base: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&Self::seeds(base), &crate::id())
    }

    /// Serialized size with the current ingredients.
    pub fn data_len(&self) -> usize {
        Self::HEADER_LEN
            + self.inputs.iter().map(IngredientInput::packed_len).sum::<usize>()
            + self.outputs.iter().map(IngredientOutput::packed_len).sum::<usize>()
    }

    pub fn is_active(&self) -> bool {
        self.status == RecipeStatus::Active
    }

    pub fn has_ingredients(&self) -> bool {
        !self.inputs.is_empty() || !self.outputs.is_empty()
    }

    // =========================================================================
    // SERIALIZATION
    // =========================================================================

    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < Self::HEADER_LEN {
            msg!("Recipe account is too small: {} bytes", input.len());
            return Err(TokenRecipesError::DeserializationError.into());
        }
        let (header, mut rest) = input.split_at(Self::HEADER_LEN);
        let header = array_ref![header, 0, Recipe::HEADER_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            key,
            base,
            authority,
            status,
            total_crafts,
            total_crafts_with_quantity,
            fees,
            accumulated_admin_fees,
            accumulated_shards,
            accumulated_experience,
            feature_levels,
            inputs_len,
            outputs_len,
        ) = array_refs![header, 1, 32, 32, 1, 8, 8, 8, 8, 8, 8, FeatureLevels::LEN, 4, 4];
        unpack_key(key, Key::Recipe)?;

        let inputs_len = u32::from_le_bytes(*inputs_len) as usize;
        let outputs_len = u32::from_le_bytes(*outputs_len) as usize;

        let mut inputs = Vec::new();
        for _ in 0..inputs_len {
            let (ingredient, remaining) = IngredientInput::unpack(rest)?;
            inputs.push(ingredient);
            rest = remaining;
        }
        let mut outputs = Vec::new();
        for _ in 0..outputs_len {
            let (ingredient, remaining) = IngredientOutput::unpack(rest)?;
            outputs.push(ingredient);
            rest = remaining;
        }

        Ok(Recipe {
            base: unpack_pubkey(base),
            authority: unpack_pubkey(authority),
            status: RecipeStatus::from_u8(status[0])?,
            total_crafts: u64::from_le_bytes(*total_crafts),
            total_crafts_with_quantity: u64::from_le_bytes(*total_crafts_with_quantity),
            fees: u64::from_le_bytes(*fees),
            accumulated_admin_fees: u64::from_le_bytes(*accumulated_admin_fees),
            accumulated_shards: u64::from_le_bytes(*accumulated_shards),
            accumulated_experience: u64::from_le_bytes(*accumulated_experience),
            feature_levels: FeatureLevels::unpack(feature_levels),
            inputs,
            outputs,
        })
    }

    /// Writes the recipe into `dst`, which must be exactly `data_len()` bytes.
    pub fn pack(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        if dst.len() != self.data_len() {
            msg!(
                "Recipe needs {} bytes, account has {}",
                self.data_len(),
                dst.len()
            );
            return Err(TokenRecipesError::InvalidDataSize.into());
        }
        let (header, mut rest) = dst.split_at_mut(Self::HEADER_LEN);
        let header = array_mut_ref![header, 0, Recipe::HEADER_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            key,
            base,
            authority,
            status,
            total_crafts,
            total_crafts_with_quantity,
            fees,
            accumulated_admin_fees,
            accumulated_shards,
            accumulated_experience,
            feature_levels,
            inputs_len,
            outputs_len,
        ) = mut_array_refs![header, 1, 32, 32, 1, 8, 8, 8, 8, 8, 8, FeatureLevels::LEN, 4, 4];

        key[0] = Key::Recipe as u8;
        base.copy_from_slice(self.base.as_ref());
        authority.copy_from_slice(self.authority.as_ref());
        status[0] = self.status as u8;
        *total_crafts = self.total_crafts.to_le_bytes();
        *total_crafts_with_quantity = self.total_crafts_with_quantity.to_le_bytes();
        *fees = self.fees.to_le_bytes();
        *accumulated_admin_fees = self.accumulated_admin_fees.to_le_bytes();
        *accumulated_shards = self.accumulated_shards.to_le_bytes();
        *accumulated_experience = self.accumulated_experience.to_le_bytes();
        self.feature_levels.pack(feature_levels);
        *inputs_len = (self.inputs.len() as u32).to_le_bytes();
        *outputs_len = (self.outputs.len() as u32).to_le_bytes();

        for input in &self.inputs {
            let written = input.pack(rest)?;
            rest = &mut std::mem::take(&mut rest)[written..];
        }
        for output in &self.outputs {
            let written = output.pack(rest)?;
            rest = &mut std::mem::take(&mut rest)[written..];
        }
        Ok(())
    }

    // =========================================================================
    // INGREDIENTS
    // =========================================================================

    /// Position of the input of this kind for `mint` (ignored for SOL).
    pub fn find_input(&self, ingredient_type: IngredientType, mint: &Pubkey) -> Option<usize> {
        self.inputs.iter().position(|input| {
            input.ingredient_type() == ingredient_type
                && (ingredient_type == IngredientType::TransferSolInput
                    || input.mint() == Some(*mint))
        })
    }

    /// Position of the output of this kind for `mint`.
    pub fn find_output(&self, ingredient_type: IngredientType, mint: &Pubkey) -> Option<usize> {
        self.outputs.iter().position(|output| {
            output.ingredient_type() == ingredient_type && output.mint() == *mint
        })
    }

    /// Adds an input. A mint appears at most once among the inputs and
    /// there is at most one SOL payment.
    pub fn add_input(&mut self, input: IngredientInput) -> Result<(), ProgramError> {
        let duplicate = self.inputs.iter().any(|existing| match (existing, &input) {
            (IngredientInput::TransferSol { .. }, IngredientInput::TransferSol { .. }) => true,
            _ => existing.mint().is_some() && existing.mint() == input.mint(),
        });
        if duplicate {
            msg!("Input ingredient already added");
            return Err(TokenRecipesError::IngredientAlreadyAdded.into());
        }
        self.inputs.push(input);
        Ok(())
    }

    /// Adds an output. A mint appears at most once among the outputs.
    pub fn add_output(&mut self, output: IngredientOutput) -> Result<(), ProgramError> {
        if self.outputs.iter().any(|existing| existing.mint() == output.mint()) {
            msg!("Output ingredient already added");
            return Err(TokenRecipesError::IngredientAlreadyAdded.into());
        }
        self.outputs.push(output);
        Ok(())
    }

    pub fn remove_ingredient(
        &mut self,
        ingredient_type: IngredientType,
        mint: &Pubkey,
    ) -> Result<(), ProgramError> {
        let removed = if ingredient_type.is_input() {
            self.find_input(ingredient_type, mint)
                .map(|index| self.inputs.remove(index))
                .is_some()
        } else {
            self.find_output(ingredient_type, mint)
                .map(|index| self.outputs.remove(index))
                .is_some()
        };
        if !removed {
            msg!("Recipe has no {:?} ingredient for mint {}", ingredient_type, mint);
            return Err(TokenRecipesError::MissingIngredient.into());
        }
        Ok(())
    }

    // =========================================================================
    // FEATURE GATES
    // =========================================================================

    /// Checks the ingredients against the unlocked feature levels.
    /// Run it after changing the ingredients, before saving.
    pub fn assert_features(&self) -> Result<(), ProgramError> {
        let levels = &self.feature_levels;

        if let Some(max) = AdditionalOutputsFeature::max_outputs(levels.additional_outputs) {
            if self.outputs.len() > max {
                msg!(
                    "Recipe can have at most {} outputs at additional outputs level {}",
                    max,
                    levels.additional_outputs
                );
                return Err(TokenRecipesError::InvalidAdditionalOutputsFeature.into());
            }
        }

        let transfer_inputs = self
            .inputs
            .iter()
            .filter(|input| matches!(input, IngredientInput::TransferToken { .. }))
            .count();
        if let Some(max) = TransferInputsFeature::max_transfer_inputs(levels.transfer_inputs) {
            if transfer_inputs > max {
                msg!(
                    "Recipe can have at most {} transfer inputs at transfer inputs level {}",
                    max,
                    levels.transfer_inputs
                );
                return Err(TokenRecipesError::InvalidTransferInputsFeature.into());
            }
        }

        let capped_outputs = self
            .outputs
            .iter()
            .any(|output| matches!(output, IngredientOutput::MintTokenWithMaxSupply { .. }));
        if capped_outputs && levels.max_supply < 1 {
            msg!("Outputs with a maximum supply need the max supply feature");
            return Err(TokenRecipesError::InvalidMaxSupplyFeature.into());
        }

        let lamports = self.sol_payment_per_craft()?;
        if lamports > 0 {
            if let Some(max) = SolPaymentFeature::max_lamports(levels.sol_payment) {
                if lamports > max {
                    msg!(
                        "You cannot request more than {} lamports for this recipe. Level up the sol payment feature to increase the limit",
                        max
                    );
                    return Err(TokenRecipesError::InvalidSolPaymentFeature.into());
                }
            }
        }

        Ok(())
    }

    /// Lamports requested per craft by SOL payment inputs.
    pub fn sol_payment_per_craft(&self) -> Result<u64, ProgramError> {
        self.inputs
            .iter()
            .filter_map(|input| match input {
                IngredientInput::TransferSol { lamports, .. } => Some(*lamports),
                _ => None,
            })
            .try_fold(0u64, |total, lamports| total.checked_add(lamports))
            .ok_or_else(|| TokenRecipesError::NumericalOverflow.into())
    }
}
