//! Max Supply Feature
//!
//! Level 1 allows outputs with a maximum supply.

use crate::state::features::{FeatureKind, FeatureLadder, TierEffect, UnlockTier};
use crate::state::{unpack_key, unpack_pubkey, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaxSupplyFeature {
    /// Burn: +1 while below 1.
    pub mint_burn_1: Pubkey,
    /// Hold: straight to 1.
    pub mint_skill_1: Pubkey,
}

impl FeatureLadder for MaxSupplyFeature {
    const KIND: FeatureKind = FeatureKind::MaxSupply;
    const MAX_LEVEL: u8 = 1;

    fn tiers(&self) -> Vec<UnlockTier> {
        vec![
            UnlockTier::burn(self.mint_burn_1, TierEffect::Increment { below: 1 }),
            UnlockTier::hold(self.mint_skill_1, TierEffect::Jump { to: 1 }),
        ]
    }
}

impl Pack for MaxSupplyFeature {
    const LEN: usize = 1 + 32 * 2;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, MaxSupplyFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, mint_burn_1, mint_skill_1) = array_refs![input, 1, 32, 32];
        unpack_key(key, Self::KIND.key())?;

        Ok(MaxSupplyFeature {
            mint_burn_1: unpack_pubkey(mint_burn_1),
            mint_skill_1: unpack_pubkey(mint_skill_1),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, MaxSupplyFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (key, mint_burn_1, mint_skill_1) = mut_array_refs![output, 1, 32, 32];

        key[0] = Self::KIND.key() as u8;
        mint_burn_1.copy_from_slice(self.mint_burn_1.as_ref());
        mint_skill_1.copy_from_slice(self.mint_skill_1.as_ref());
        Ok(())
    }
}
