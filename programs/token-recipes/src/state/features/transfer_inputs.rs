//! Transfer Inputs Feature
//!
//! | Level | TransferToken inputs allowed |
//! |-------|------------------------------|
//! | 0 | 0 |
//! | 1 | 1 |
//! | 2 | 2 |
//! | 3 | unlimited |

use crate::state::features::{FeatureKind, FeatureLadder, TierEffect, UnlockTier};
use crate::state::{unpack_key, unpack_pubkey, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferInputsFeature {
    /// Burn: +1 while below 2.
    pub mint_burn_1: Pubkey,
    /// Burn: +1 while below 3.
    pub mint_burn_2: Pubkey,
    /// Burn: straight to 3.
    pub mint_burn_3: Pubkey,
    /// Hold: straight to 2.
    pub mint_skill_1: Pubkey,
    /// Hold: straight to 3.
    pub mint_skill_2: Pubkey,
}

impl TransferInputsFeature {
    /// Number of TransferToken inputs a recipe may list at `level`.
    pub fn max_transfer_inputs(level: u8) -> Option<usize> {
        if level >= Self::MAX_LEVEL {
            None
        } else {
            Some(level as usize)
        }
    }
}

impl FeatureLadder for TransferInputsFeature {
    const KIND: FeatureKind = FeatureKind::TransferInputs;
    const MAX_LEVEL: u8 = 3;

    fn tiers(&self) -> Vec<UnlockTier> {
        vec![
            UnlockTier::burn(self.mint_burn_1, TierEffect::Increment { below: 2 }),
            UnlockTier::burn(self.mint_burn_2, TierEffect::Increment { below: 3 }),
            UnlockTier::burn(self.mint_burn_3, TierEffect::Jump { to: 3 }),
            UnlockTier::hold(self.mint_skill_1, TierEffect::Jump { to: 2 }),
            UnlockTier::hold(self.mint_skill_2, TierEffect::Jump { to: 3 }),
        ]
    }
}

impl Pack for TransferInputsFeature {
    const LEN: usize = 1 + 32 * 5;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, TransferInputsFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, mint_burn_1, mint_burn_2, mint_burn_3, mint_skill_1, mint_skill_2) =
            array_refs![input, 1, 32, 32, 32, 32, 32];
        unpack_key(key, Self::KIND.key())?;

        Ok(TransferInputsFeature {
            mint_burn_1: unpack_pubkey(mint_burn_1),
            mint_burn_2: unpack_pubkey(mint_burn_2),
            mint_burn_3: unpack_pubkey(mint_burn_3),
            mint_skill_1: unpack_pubkey(mint_skill_1),
            mint_skill_2: unpack_pubkey(mint_skill_2),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, TransferInputsFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, mint_burn_1, mint_burn_2, mint_burn_3, mint_skill_1, mint_skill_2) =
            mut_array_refs![output, 1, 32, 32, 32, 32, 32];

        key[0] = Self::KIND.key() as u8;
        mint_burn_1.copy_from_slice(self.mint_burn_1.as_ref());
        mint_burn_2.copy_from_slice(self.mint_burn_2.as_ref());
        mint_burn_3.copy_from_slice(self.mint_burn_3.as_ref());
        mint_skill_1.copy_from_slice(self.mint_skill_1.as_ref());
        mint_skill_2.copy_from_slice(self.mint_skill_2.as_ref());
        Ok(())
    }
}
