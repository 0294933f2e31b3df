//! SOL Payment Feature
//!
//! Allows TransferSol inputs. Level `L` in 1..=10 caps the lamports
//! requested per craft at 2^(L-1) SOL; level 11 removes the cap.

use crate::state::features::{FeatureKind, FeatureLadder, TierEffect, UnlockTier};
use crate::state::{unpack_key, unpack_pubkey, Pack};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{native_token::LAMPORTS_PER_SOL, program_error::ProgramError, pubkey::Pubkey};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolPaymentFeature {
    /// Burn: +1 while below 1.
    pub mint_burn_1: Pubkey,
    /// Burn: +1 while below 3.
    pub mint_burn_2: Pubkey,
    /// Burn: +1 while below 6.
    pub mint_burn_3: Pubkey,
    /// Burn: +1 while below 10.
    pub mint_burn_4: Pubkey,
    /// Burn: +1 while below 11.
    pub mint_burn_5: Pubkey,
    /// Burn: straight to 3.
    pub mint_burn_6: Pubkey,
    /// Burn: straight to 6.
    pub mint_burn_7: Pubkey,
    /// Burn: straight to 10.
    pub mint_burn_8: Pubkey,
    /// Burn: straight to 11.
    pub mint_burn_9: Pubkey,
    /// Hold: straight to 1.
    pub mint_skill_1: Pubkey,
    /// Hold: straight to 3.
    pub mint_skill_2: Pubkey,
    /// Hold: straight to 6.
    pub mint_skill_3: Pubkey,
    /// Hold: straight to 10.
    pub mint_skill_4: Pubkey,
    /// Hold: straight to 11.
    pub mint_skill_5: Pubkey,
}

impl SolPaymentFeature {
    /// Lamports a recipe may request per craft at `level`, `None` when
    /// unlimited.
    pub fn max_lamports(level: u8) -> Option<u64> {
        match level {
            0 => Some(0),
            1..=10 => Some(LAMPORTS_PER_SOL << (level - 1)),
            _ => None,
        }
    }
}

impl FeatureLadder for SolPaymentFeature {
    const KIND: FeatureKind = FeatureKind::SolPayment;
    const MAX_LEVEL: u8 = 11;

    fn tiers(&self) -> Vec<UnlockTier> {
        vec![
            UnlockTier::burn(self.mint_burn_1, TierEffect::Increment { below: 1 }),
            UnlockTier::burn(self.mint_burn_2, TierEffect::Increment { below: 3 }),
            UnlockTier::burn(self.mint_burn_3, TierEffect::Increment { below: 6 }),
            UnlockTier::burn(self.mint_burn_4, TierEffect::Increment { below: 10 }),
            UnlockTier::burn(self.mint_burn_5, TierEffect::Increment { below: 11 }),
            UnlockTier::burn(self.mint_burn_6, TierEffect::Jump { to: 3 }),
            UnlockTier::burn(self.mint_burn_7, TierEffect::Jump { to: 6 }),
            UnlockTier::burn(self.mint_burn_8, TierEffect::Jump { to: 10 }),
            UnlockTier::burn(self.mint_burn_9, TierEffect::Jump { to: 11 }),
            UnlockTier::hold(self.mint_skill_1, TierEffect::Jump { to: 1 }),
            UnlockTier::hold(self.mint_skill_2, TierEffect::Jump { to: 3 }),
            UnlockTier::hold(self.mint_skill_3, TierEffect::Jump { to: 6 }),
            UnlockTier::hold(self.mint_skill_4, TierEffect::Jump { to: 10 }),
            UnlockTier::hold(self.mint_skill_5, TierEffect::Jump { to: 11 }),
        ]
    }
}

impl Pack for SolPaymentFeature {
    const LEN: usize = 1 + 32 * 14;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let input = array_ref![input, 0, SolPaymentFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            key,
            mint_burn_1,
            mint_burn_2,
            mint_burn_3,
            mint_burn_4,
            mint_burn_5,
            mint_burn_6,
            mint_burn_7,
            mint_burn_8,
            mint_burn_9,
            mint_skill_1,
            mint_skill_2,
            mint_skill_3,
            mint_skill_4,
            mint_skill_5,
        ) = array_refs![input, 1, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32];
        unpack_key(key, Self::KIND.key())?;

        Ok(SolPaymentFeature {
            mint_burn_1: unpack_pubkey(mint_burn_1),
            mint_burn_2: unpack_pubkey(mint_burn_2),
            mint_burn_3: unpack_pubkey(mint_burn_3),
            mint_burn_4: unpack_pubkey(mint_burn_4),
            mint_burn_5: unpack_pubkey(mint_burn_5),
            mint_burn_6: unpack_pubkey(mint_burn_6),
            mint_burn_7: unpack_pubkey(mint_burn_7),
            mint_burn_8: unpack_pubkey(mint_burn_8),
            mint_burn_9: unpack_pubkey(mint_burn_9),
            mint_skill_1: unpack_pubkey(mint_skill_1),
            mint_skill_2: unpack_pubkey(mint_skill_2),
            mint_skill_3: unpack_pubkey(mint_skill_3),
            mint_skill_4: unpack_pubkey(mint_skill_4),
            mint_skill_5: unpack_pubkey(mint_skill_5),
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        let output = array_mut_ref![output, 0, SolPaymentFeature::LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            key,
            mint_burn_1,
            mint_burn_2,
            mint_burn_3,
            mint_burn_4,
            mint_burn_5,
            mint_burn_6,
            mint_burn_7,
            mint_burn_8,
            mint_burn_9,
            mint_skill_1,
            mint_skill_2,
            mint_skill_3,
            mint_skill_4,
            mint_skill_5,
        ) = mut_array_refs![output, 1, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32, 32];

        key[0] = Self::KIND.key() as u8;
        mint_burn_1.copy_from_slice(self.mint_burn_1.as_ref());
        mint_burn_2.copy_from_slice(self.mint_burn_2.as_ref());
        mint_burn_3.copy_from_slice(self.mint_burn_3.as_ref());
        mint_burn_4.copy_from_slice(self.mint_burn_4.as_ref());
        mint_burn_5.copy_from_slice(self.mint_burn_5.as_ref());
        mint_burn_6.copy_from_slice(self.mint_burn_6.as_ref());
        mint_burn_7.copy_from_slice(self.mint_burn_7.as_ref());
        mint_burn_8.copy_from_slice(self.mint_burn_8.as_ref());
        mint_burn_9.copy_from_slice(self.mint_burn_9.as_ref());
        mint_skill_1.copy_from_slice(self.mint_skill_1.as_ref());
        mint_skill_2.copy_from_slice(self.mint_skill_2.as_ref());
        mint_skill_3.copy_from_slice(self.mint_skill_3.as_ref());
        mint_skill_4.copy_from_slice(self.mint_skill_4.as_ref());
        mint_skill_5.copy_from_slice(self.mint_skill_5.as_ref());
        Ok(())
    }
}
