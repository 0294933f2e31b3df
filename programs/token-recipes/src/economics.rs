//! Crafting Economics
//!
//! Every craft call (whatever its quantity) pays one fee and earns one
//! batch of experience. This module computes the split; the processors
//! move the lamports and mint the tokens.
//!
//! # Fee Split by Fees Level
//!
//! | Level | Fee charged | Admin share | Shards |
//! |-------|-------------|-------------|--------|
//! | 0 | base | 100% | 0% |
//! | 1..=9 | base | 100% - 10% * level | 10% * level |
//! | 10 | custom | 0% | 100% (of at most the base fee) |
//! | 11 | custom | 0% | 0% |
//!
//! Whatever is neither admin share nor shards stays on the recipe and is
//! paid to the authority by CollectFees.
//!
//! # Experience
//!
//! `100 + 25 * wisdom level` per craft call, scaled down proportionally
//! when a custom fee below the base fee is charged.

use crate::error::TokenRecipesError;
use crate::state::features::fees::CUSTOM_FEES_LEVEL;
use crate::state::{FeatureLevels, Recipe};
use crate::utils::checked_add;
use solana_program::program_error::ProgramError;

/// Protocol fee per craft call: 0.02 SOL.
pub const BASE_FEES: u64 = 20_000_000;

/// Experience per craft call at wisdom level 0.
pub const BASE_EXPERIENCE: u64 = 100;

pub const EXPERIENCE_PER_WISDOM_LEVEL: u64 = 25;

/// Fees level at and above which the admin and shards both get nothing.
const NO_SPLIT_FEES_LEVEL: u8 = 11;

/// What one craft call pays and earns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CraftEconomics {
    /// Lamports moved from the payer to the recipe.
    pub fees: u64,
    /// Part of `fees` owed to the program admin.
    pub admin_fees: u64,
    pub shards: u64,
    pub experience: u64,
}

impl CraftEconomics {
    pub fn for_recipe(recipe: &Recipe) -> Result<Self, ProgramError> {
        Self::compute(&recipe.feature_levels, recipe.fees)
    }

    pub fn compute(levels: &FeatureLevels, custom_fees: u64) -> Result<Self, ProgramError> {
        let fees = effective_fees(levels.fees, custom_fees);
        let admin_fees = percent_of(fees, admin_fees_percent(levels.fees))?;
        let shards = percent_of(fees.min(BASE_FEES), shards_percent(levels.fees))?;

        let mut experience = experience_per_craft(levels.wisdom);
        if fees < BASE_FEES {
            experience = mul_div(experience, fees, BASE_FEES)?;
        }

        Ok(CraftEconomics {
            fees,
            admin_fees,
            shards,
            experience,
        })
    }

    /// Adds this craft's share to the recipe accumulators.
    pub fn accumulate(&self, recipe: &mut Recipe) -> Result<(), ProgramError> {
        recipe.accumulated_admin_fees = checked_add(recipe.accumulated_admin_fees, self.admin_fees)?;
        recipe.accumulated_shards = checked_add(recipe.accumulated_shards, self.shards)?;
        recipe.accumulated_experience =
            checked_add(recipe.accumulated_experience, self.experience)?;
        Ok(())
    }
}

/// Fee charged per craft call.
pub fn effective_fees(fees_level: u8, custom_fees: u64) -> u64 {
    if fees_level >= CUSTOM_FEES_LEVEL {
        custom_fees
    } else {
        BASE_FEES
    }
}

pub fn admin_fees_percent(fees_level: u8) -> u64 {
    if fees_level >= NO_SPLIT_FEES_LEVEL {
        0
    } else {
        100 - 10 * u64::from(fees_level.min(10))
    }
}

pub fn shards_percent(fees_level: u8) -> u64 {
    if fees_level >= NO_SPLIT_FEES_LEVEL {
        0
    } else {
        10 * u64::from(fees_level.min(10))
    }
}

pub fn experience_per_craft(wisdom_level: u8) -> u64 {
    BASE_EXPERIENCE + EXPERIENCE_PER_WISDOM_LEVEL * u64::from(wisdom_level)
}

fn percent_of(amount: u64, percent: u64) -> Result<u64, ProgramError> {
    mul_div(amount, percent, 100)
}

fn mul_div(amount: u64, numerator: u64, denominator: u64) -> Result<u64, ProgramError> {
    let result = u128::from(amount)
        .checked_mul(u128::from(numerator))
        .and_then(|product| product.checked_div(u128::from(denominator)))
        .ok_or(TokenRecipesError::NumericalOverflow)?;
    u64::try_from(result).map_err(|_| TokenRecipesError::NumericalOverflow.into())
}
