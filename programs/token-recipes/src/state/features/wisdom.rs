//! Wisdom Feature
//!
//! Raises the experience granted per craft by 25 per level.

use crate::state::features::{FeatureKind, FeatureLadder, TierEffect, UnlockTier};
use crate::state::{unpack_key, unpack_pubkey, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WisdomFeature {
    /// Experience mint. Its mint authority must be the wisdom feature PDA.
    pub experience_mint: Pubkey,
    /// Burn: +1 while below 4.
    pub mint_burn_1: Pubkey,
    /// Burn: +1 while below 6.
    pub mint_burn_2: Pubkey,
}

impl FeatureLadder for WisdomFeature {
    const KIND: FeatureKind = FeatureKind::Wisdom;
    const MAX_LEVEL: u8 = 6;

    fn tiers(&self) -> Vec<UnlockTier> {
        vec![
            UnlockTier::burn(self.mint_burn_1, TierEffect::Increment { below: 4 }),
            UnlockTier::burn(self.mint_burn_2, TierEffect::Increment { below: 6 }),
        ]
    }
}

impl Pack for WisdomFeature {
    const LEN: usize = 1 + 32 * 3;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, WisdomFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, experience_mint, mint_burn_1, mint_burn_2) = array_refs![input, 1, 32, 32, 32];
        unpack_key(key, Self::KIND.key())?;

        Ok(WisdomFeature {
            experience_mint: unpack_pubkey(experience_mint),
            mint_burn_1: unpack_pubkey(mint_burn_1),
            mint_burn_2: unpack_pubkey(mint_burn_2),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, WisdomFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, experience_mint, mint_burn_1, mint_burn_2) =
            mut_array_refs![output, 1, 32, 32, 32];

        key[0] = Self::KIND.key() as u8;
        experience_mint.copy_from_slice(self.experience_mint.as_ref());
        mint_burn_1.copy_from_slice(self.mint_burn_1.as_ref());
        mint_burn_2.copy_from_slice(self.mint_burn_2.as_ref());
        Ok(())
    }
}
