//! Feature Registry
//!
//! Features gate advanced recipe behavior. Each feature has one account,
//! written by the admin, listing the tier mints that level it up. A recipe
//! stores only its current level per feature in [`FeatureLevels`].
//!
//! # Tiers
//!
//! A tier is a mint plus an effect:
//!
//! ```text
//! Increment { below: N }   valid while level < N, level += 1
//! Jump { to: N }           valid while level < N, level  = N
//! ```
//!
//! Burn tiers consume one token of the mint. Skill tiers only require the
//! owner to hold one.

pub mod additional_outputs;
pub mod fees;
pub mod max_supply;
pub mod sol_payment;
pub mod transfer_inputs;
pub mod wisdom;

pub use additional_outputs::AdditionalOutputsFeature;
pub use fees::FeesFeature;
pub use max_supply::MaxSupplyFeature;
pub use sol_payment::SolPaymentFeature;
pub use transfer_inputs::TransferInputsFeature;
pub use wisdom::WisdomFeature;

use crate::error::TokenRecipesError;
use crate::state::{Key, Pack};
use arrayref::{array_refs, mut_array_refs};
use solana_program::{msg, program_error::ProgramError, pubkey::Pubkey};

/// Shared first seed of every feature account.
pub const FEATURES_SEED: &[u8] = b"features";

// =============================================================================
// FEATURE KIND
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureKind {
    Fees,
    AdditionalOutputs,
    TransferInputs,
    MaxSupply,
    SolPayment,
    Wisdom,
}

impl FeatureKind {
    /// Second seed of the feature account.
    pub fn name(self) -> &'static str {
        match self {
            FeatureKind::Fees => "fees",
            FeatureKind::AdditionalOutputs => "additional_outputs",
            FeatureKind::TransferInputs => "transfer_inputs",
            FeatureKind::MaxSupply => "max_supply",
            FeatureKind::SolPayment => "sol_payment",
            FeatureKind::Wisdom => "wisdom",
        }
    }

    pub fn key(self) -> Key {
        match self {
            FeatureKind::Fees => Key::FeesFeature,
            FeatureKind::AdditionalOutputs => Key::AdditionalOutputsFeature,
            FeatureKind::TransferInputs => Key::TransferInputsFeature,
            FeatureKind::MaxSupply => Key::MaxSupplyFeature,
            FeatureKind::SolPayment => Key::SolPaymentFeature,
            FeatureKind::Wisdom => Key::WisdomFeature,
        }
    }

    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::FeesFeature => Some(FeatureKind::Fees),
            Key::AdditionalOutputsFeature => Some(FeatureKind::AdditionalOutputs),
            Key::TransferInputsFeature => Some(FeatureKind::TransferInputs),
            Key::MaxSupplyFeature => Some(FeatureKind::MaxSupply),
            Key::SolPaymentFeature => Some(FeatureKind::SolPayment),
            Key::WisdomFeature => Some(FeatureKind::Wisdom),
            _ => None,
        }
    }

    pub fn max_level(self) -> u8 {
        match self {
            FeatureKind::Fees => FeesFeature::MAX_LEVEL,
            FeatureKind::AdditionalOutputs => AdditionalOutputsFeature::MAX_LEVEL,
            FeatureKind::TransferInputs => TransferInputsFeature::MAX_LEVEL,
            FeatureKind::MaxSupply => MaxSupplyFeature::MAX_LEVEL,
            FeatureKind::SolPayment => SolPaymentFeature::MAX_LEVEL,
            FeatureKind::Wisdom => WisdomFeature::MAX_LEVEL,
        }
    }

    pub fn seeds(self) -> [&'static [u8]; 2] {
        [FEATURES_SEED, self.name().as_bytes()]
    }

    pub fn find_pda(self) -> (Pubkey, u8) {
        Pubkey::find_program_address(&self.seeds(), &crate::id())
    }
}

// =============================================================================
// FEATURE LEVELS
// =============================================================================

/// Current level of every feature on one recipe.
///
/// ```text
/// [fees][additional_outputs][transfer_inputs][max_supply][sol_payment][wisdom][reserved: 4]
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureLevels {
    pub fees: u8,
    pub additional_outputs: u8,
    pub transfer_inputs: u8,
    pub max_supply: u8,
    pub sol_payment: u8,
    pub wisdom: u8,
}

impl FeatureLevels {
    pub const LEN: usize = 6 + 4;

    pub fn get(&self, kind: FeatureKind) -> u8 {
        match kind {
            FeatureKind::Fees => self.fees,
            FeatureKind::AdditionalOutputs => self.additional_outputs,
            FeatureKind::TransferInputs => self.transfer_inputs,
            FeatureKind::MaxSupply => self.max_supply,
            FeatureKind::SolPayment => self.sol_payment,
            FeatureKind::Wisdom => self.wisdom,
        }
    }

    pub fn set(&mut self, kind: FeatureKind, level: u8) {
        let slot = match kind {
            FeatureKind::Fees => &mut self.fees,
            FeatureKind::AdditionalOutputs => &mut self.additional_outputs,
            FeatureKind::TransferInputs => &mut self.transfer_inputs,
            FeatureKind::MaxSupply => &mut self.max_supply,
            FeatureKind::SolPayment => &mut self.sol_payment,
            FeatureKind::Wisdom => &mut self.wisdom,
        };
        *slot = level;
    }

    pub fn unpack(src: &[u8; FeatureLevels::LEN]) -> Self {
        #[allow(clippy::ptr_offset_with_cast)]
        let (levels, _reserved) = array_refs![src, 6, 4];
        FeatureLevels {
            fees: levels[0],
            additional_outputs: levels[1],
            transfer_inputs: levels[2],
            max_supply: levels[3],
            sol_payment: levels[4],
            wisdom: levels[5],
        }
    }

    pub fn pack(&self, dst: &mut [u8; FeatureLevels::LEN]) {
        #[allow(clippy::ptr_offset_with_cast)]
        let (levels, reserved) = mut_array_refs![dst, 6, 4];
        *levels = [
            self.fees,
            self.additional_outputs,
            self.transfer_inputs,
            self.max_supply,
            self.sol_payment,
            self.wisdom,
        ];
        *reserved = [0; 4];
    }
}

// =============================================================================
// UNLOCK TIERS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierEffect {
    /// Adds one level while the current level is below the bound.
    Increment { below: u8 },
    /// Sets the level while the current level is below it.
    Jump { to: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Consumption {
    /// One token is burned.
    Burn,
    /// One token must be held, nothing is burned.
    Hold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlockTier {
    pub mint: Pubkey,
    pub effect: TierEffect,
    pub consumption: Consumption,
}

impl UnlockTier {
    pub const fn burn(mint: Pubkey, effect: TierEffect) -> Self {
        Self {
            mint,
            effect,
            consumption: Consumption::Burn,
        }
    }

    pub const fn hold(mint: Pubkey, effect: TierEffect) -> Self {
        Self {
            mint,
            effect,
            consumption: Consumption::Hold,
        }
    }

    pub fn applies_at(&self, level: u8) -> bool {
        match self.effect {
            TierEffect::Increment { below } => level < below,
            TierEffect::Jump { to } => level < to,
        }
    }

    pub fn next_level(&self, level: u8) -> u8 {
        match self.effect {
            TierEffect::Increment { .. } => level.saturating_add(1),
            TierEffect::Jump { to } => to,
        }
    }
}

/// Behavior shared by every feature account.
pub trait FeatureLadder: Pack {
    const KIND: FeatureKind;
    const MAX_LEVEL: u8;

    /// Every tier of the feature, in field order.
    fn tiers(&self) -> Vec<UnlockTier>;
}

/// Picks the tier `mint` unlocks at `level`.
///
/// Unset tiers (default pubkey) never match.
pub fn resolve_unlock(
    kind: FeatureKind,
    level: u8,
    tiers: &[UnlockTier],
    mint: &Pubkey,
) -> Result<UnlockTier, ProgramError> {
    if level >= kind.max_level() {
        msg!("Feature {} is already at level {}", kind.name(), level);
        return Err(TokenRecipesError::MaxFeatureLevelReached.into());
    }

    tiers
        .iter()
        .find(|tier| tier.mint == *mint && *mint != Pubkey::default() && tier.applies_at(level))
        .copied()
        .ok_or_else(|| {
            msg!(
                "Mint {} cannot level up feature {} from level {}",
                mint,
                kind.name(),
                level
            );
            TokenRecipesError::InvalidMintToLevelUpFeature.into()
        })
}

// =============================================================================
// FEATURE - ANY FEATURE ACCOUNT
// =============================================================================

/// The content of any feature account, selected by its discriminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feature {
    Fees(FeesFeature),
    AdditionalOutputs(AdditionalOutputsFeature),
    TransferInputs(TransferInputsFeature),
    MaxSupply(MaxSupplyFeature),
    SolPayment(SolPaymentFeature),
    Wisdom(WisdomFeature),
}

impl Feature {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Feature::Fees(_) => FeatureKind::Fees,
            Feature::AdditionalOutputs(_) => FeatureKind::AdditionalOutputs,
            Feature::TransferInputs(_) => FeatureKind::TransferInputs,
            Feature::MaxSupply(_) => FeatureKind::MaxSupply,
            Feature::SolPayment(_) => FeatureKind::SolPayment,
            Feature::Wisdom(_) => FeatureKind::Wisdom,
        }
    }

    pub fn packed_len(&self) -> usize {
        match self {
            Feature::Fees(_) => FeesFeature::LEN,
            Feature::AdditionalOutputs(_) => AdditionalOutputsFeature::LEN,
            Feature::TransferInputs(_) => TransferInputsFeature::LEN,
            Feature::MaxSupply(_) => MaxSupplyFeature::LEN,
            Feature::SolPayment(_) => SolPaymentFeature::LEN,
            Feature::Wisdom(_) => WisdomFeature::LEN,
        }
    }

    pub fn tiers(&self) -> Vec<UnlockTier> {
        match self {
            Feature::Fees(f) => f.tiers(),
            Feature::AdditionalOutputs(f) => f.tiers(),
            Feature::TransferInputs(f) => f.tiers(),
            Feature::MaxSupply(f) => f.tiers(),
            Feature::SolPayment(f) => f.tiers(),
            Feature::Wisdom(f) => f.tiers(),
        }
    }

    /// Parses any feature account; the first byte picks the layout.
    pub fn unpack(src: &[u8]) -> Result<Self, ProgramError> {
        let key = Key::from_u8(*src.first().ok_or(TokenRecipesError::DeserializationError)?)?;
        let kind = FeatureKind::from_key(key).ok_or_else(|| {
            msg!("Account key {:?} is not a feature", key);
            ProgramError::from(TokenRecipesError::InvalidAccountKey)
        })?;
        Ok(match kind {
            FeatureKind::Fees => Feature::Fees(FeesFeature::unpack_from_slice(src)?),
            FeatureKind::AdditionalOutputs => {
                Feature::AdditionalOutputs(AdditionalOutputsFeature::unpack_from_slice(src)?)
            }
            FeatureKind::TransferInputs => {
                Feature::TransferInputs(TransferInputsFeature::unpack_from_slice(src)?)
            }
            FeatureKind::MaxSupply => Feature::MaxSupply(MaxSupplyFeature::unpack_from_slice(src)?),
            FeatureKind::SolPayment => {
                Feature::SolPayment(SolPaymentFeature::unpack_from_slice(src)?)
            }
            FeatureKind::Wisdom => Feature::Wisdom(WisdomFeature::unpack_from_slice(src)?),
        })
    }

    pub fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        match self {
            Feature::Fees(f) => f.pack_into_slice(dst),
            Feature::AdditionalOutputs(f) => f.pack_into_slice(dst),
            Feature::TransferInputs(f) => f.pack_into_slice(dst),
            Feature::MaxSupply(f) => f.pack_into_slice(dst),
            Feature::SolPayment(f) => f.pack_into_slice(dst),
            Feature::Wisdom(f) => f.pack_into_slice(dst),
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ProgramError> {
        let mut data = vec![0u8; self.packed_len()];
        self.pack_into_slice(&mut data)?;
        Ok(data)
    }
}
