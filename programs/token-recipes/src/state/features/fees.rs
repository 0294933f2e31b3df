//! Fees Feature
//!
//! Lowers the admin cut of the crafting fee and raises the shards minted
//! for the recipe authority. From level 10 the authority may set custom
//! fees.
//!
//! | Level | Admin share | Shards |
//! |-------|-------------|--------|
//! | 0 | 100% | 0% |
//! | 1..=10 | 100% - 10% per level | 10% per level |
//! | 11 | 0% | 0% |

use crate::state::features::{FeatureKind, FeatureLadder, TierEffect, UnlockTier};
use crate::state::{unpack_key, unpack_pubkey, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

/// Fees level from which `SetFees` is allowed.
pub const CUSTOM_FEES_LEVEL: u8 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeesFeature {
    /// Receives the admin share of the fees.
    pub admin_destination: Pubkey,
    /// Shards mint. Its mint authority must be the fees feature PDA.
    pub shard_mint: Pubkey,
    /// Burn: +1 while below 1.
    pub mint_burn_1: Pubkey,
    /// Burn: +1 while below 10.
    pub mint_burn_2: Pubkey,
    /// Burn: +1 while below 11.
    pub mint_burn_3: Pubkey,
    /// Burn: straight to 10.
    pub mint_burn_4: Pubkey,
    /// Burn: straight to 11.
    pub mint_burn_5: Pubkey,
    /// Hold: straight to 1.
    pub mint_skill_1: Pubkey,
    /// Hold: straight to 10.
    pub mint_skill_2: Pubkey,
    /// Hold: straight to 11.
    pub mint_skill_3: Pubkey,
}

impl FeatureLadder for FeesFeature {
    const KIND: FeatureKind = FeatureKind::Fees;
    const MAX_LEVEL: u8 = 11;

    fn tiers(&self) -> Vec<UnlockTier> {
        vec![
            UnlockTier::burn(self.mint_burn_1, TierEffect::Increment { below: 1 }),
            UnlockTier::burn(self.mint_burn_2, TierEffect::Increment { below: 10 }),
            UnlockTier::burn(self.mint_burn_3, TierEffect::Increment { below: 11 }),
            UnlockTier::burn(self.mint_burn_4, TierEffect::Jump { to: 10 }),
            UnlockTier::burn(self.mint_burn_5, TierEffect::Jump { to: 11 }),
            UnlockTier::hold(self.mint_skill_1, TierEffect::Jump { to: 1 }),
            UnlockTier::hold(self.mint_skill_2, TierEffect::Jump { to: 10 }),
            UnlockTier::hold(self.mint_skill_3, TierEffect::Jump { to: 11 }),
        ]
    }
}

impl Pack for FeesFeature {
    const LEN: usize = 1 + 32 * 10;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, FeesFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            key,
            admin_destination,
            shard_mint,
            mint_burn_1,
            mint_burn_2,
            mint_burn_3,
            mint_burn_4,
            mint_burn_5,
            mint_skill_1,
            mint_skill_2,
            mint_skill_3,
        ) = array_refs![input, 1, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32];
        unpack_key(key, Self::KIND.key())?;

        Ok(FeesFeature {
            admin_destination: unpack_pubkey(admin_destination),
            shard_mint: unpack_pubkey(shard_mint),
            mint_burn_1: unpack_pubkey(mint_burn_1),
            mint_burn_2: unpack_pubkey(mint_burn_2),
            mint_burn_3: unpack_pubkey(mint_burn_3),
            mint_burn_4: unpack_pubkey(mint_burn_4),
            mint_burn_5: unpack_pubkey(mint_burn_5),
            mint_skill_1: unpack_pubkey(mint_skill_1),
            mint_skill_2: unpack_pubkey(mint_skill_2),
            mint_skill_3: unpack_pubkey(mint_skill_3),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, FeesFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            key,
            admin_destination,
            shard_mint,
            mint_burn_1,
            mint_burn_2,
            mint_burn_3,
            mint_burn_4,
            mint_burn_5,
            mint_skill_1,
            mint_skill_2,
            mint_skill_3,
        ) = mut_array_refs![output, 1, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32];

        key[0] = Self::KIND.key() as u8;
        admin_destination.copy_from_slice(self.admin_destination.as_ref());
        shard_mint.copy_from_slice(self.shard_mint.as_ref());
        mint_burn_1.copy_from_slice(self.mint_burn_1.as_ref());
        mint_burn_2.copy_from_slice(self.mint_burn_2.as_ref());
        mint_burn_3.copy_from_slice(self.mint_burn_3.as_ref());
        mint_burn_4.copy_from_slice(self.mint_burn_4.as_ref());
        mint_burn_5.copy_from_slice(self.mint_burn_5.as_ref());
        mint_skill_1.copy_from_slice(self.mint_skill_1.as_ref());
        mint_skill_2.copy_from_slice(self.mint_skill_2.as_ref());
        mint_skill_3.copy_from_slice(self.mint_skill_3.as_ref());
        Ok(())
    }
}
