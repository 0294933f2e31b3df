//! Account State Structures
//!
//! This module defines the data stored in accounts owned by the program.
//!
//! # Account Types
//!
//! | Type | Size | Description |
//! |------|------|-------------|
//! | Recipe | 132 bytes + ingredients | The crafting rule and its economics |
//! | IngredientRecord | 67 bytes | (mint, recipe) membership marker |
//! | DelegatedIngredient | 69 bytes | Shared mint authority of an output mint |
//! | FeesFeature | 321 bytes | Fees tier mints, admin destination, shard mint |
//! | AdditionalOutputsFeature | 161 bytes | Tier mints |
//! | TransferInputsFeature | 161 bytes | Tier mints |
//! | MaxSupplyFeature | 65 bytes | Tier mints |
//! | SolPaymentFeature | 449 bytes | Tier mints |
//! | WisdomFeature | 97 bytes | Tier mints, experience mint |
//!
//! # Serialization
//!
//! All structures use fixed-size, deterministic serialization:
//! - The first byte is a [`Key`] discriminator
//! - Little-endian for integers
//! - No padding between fields
//!
//! The recipe is the only account that grows: its header is followed by the
//! encoded ingredients and the account is reallocated when they change.

pub mod delegated_ingredient;
pub mod features;
pub mod ingredient;
pub mod ingredient_record;
pub mod recipe;

pub use delegated_ingredient::DelegatedIngredient;
pub use features::{Feature, FeatureKind, FeatureLevels};
pub use ingredient::{IngredientInput, IngredientOutput, IngredientType};
pub use ingredient_record::IngredientRecord;
pub use recipe::{Recipe, RecipeStatus};

use crate::error::TokenRecipesError;
use solana_program::{msg, program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// PACK TRAIT
// =============================================================================

/// Trait for packing/unpacking fixed-size account state to/from bytes.
///
/// # Example Implementation
///
/// ```ignore
/// impl Pack for MyState {
///     const LEN: usize = 40;
///
///     fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
///         let input = array_ref![input, 0, Self::LEN];
///         // Parse fields...
///         Ok(MyState { ... })
///     }
///
///     fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
///         let output = array_mut_ref![output, 0, Self::LEN];
///         // Write fields...
///         Ok(())
///     }
/// }
/// ```
pub trait Pack: Sized {
    /// The fixed size in bytes when serialized.
    const LEN: usize;

    /// Deserialize from a byte slice of at least `LEN` bytes.
    ///
    /// # Panics
    /// May panic if input.len() < Self::LEN (use unpack_from_slice instead)
    fn unpack(input: &[u8]) -> Result<Self, ProgramError>;

    /// Serialize into a byte slice of at least `LEN` bytes.
    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError>;

    /// Unpack with length validation.
    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        if src.len() != Self::LEN {
            msg!("Expected {} bytes, got {}", Self::LEN, src.len());
            return Err(TokenRecipesError::InvalidDataSize.into());
        }
        Self::unpack(src)
    }

    /// Pack with length validation.
    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        if dst.len() != Self::LEN {
            msg!("Expected {} bytes, got {}", Self::LEN, dst.len());
            return Err(TokenRecipesError::InvalidDataSize.into());
        }
        self.pack(dst)
    }
}

// =============================================================================
// KEY - ACCOUNT DISCRIMINATOR
// =============================================================================

/// First byte of every account owned by the program.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Key {
    #[default]
    Uninitialized = 0,
    Recipe = 1,
    IngredientRecord = 2,
    DelegatedIngredient = 3,
    FeesFeature = 4,
    AdditionalOutputsFeature = 5,
    TransferInputsFeature = 6,
    MaxSupplyFeature = 7,
    SolPaymentFeature = 8,
    WisdomFeature = 9,
}

impl Key {
    pub fn from_u8(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(Key::Uninitialized),
            1 => Ok(Key::Recipe),
            2 => Ok(Key::IngredientRecord),
            3 => Ok(Key::DelegatedIngredient),
            4 => Ok(Key::FeesFeature),
            5 => Ok(Key::AdditionalOutputsFeature),
            6 => Ok(Key::TransferInputsFeature),
            7 => Ok(Key::MaxSupplyFeature),
            8 => Ok(Key::SolPaymentFeature),
            9 => Ok(Key::WisdomFeature),
            _ => {
                msg!("Unknown account key {}", value);
                Err(TokenRecipesError::InvalidAccountKey.into())
            }
        }
    }
}

// =============================================================================
// FIELD HELPERS
// =============================================================================

/// Reads a discriminator byte and checks it is the expected one.
pub(crate) fn unpack_key(src: &[u8; 1], expected: Key) -> Result<Key, ProgramError> {
    let key = Key::from_u8(src[0])?;
    if key != expected {
        msg!("Expected account key {:?}, got {:?}", expected, key);
        return Err(TokenRecipesError::InvalidAccountKey.into());
    }
    Ok(key)
}

/// Reads a strict boolean: 0 or 1, anything else is corrupt data.
pub(crate) fn unpack_bool(src: &[u8; 1]) -> Result<bool, ProgramError> {
    match src[0] {
        0 => Ok(false),
        1 => Ok(true),
        value => {
            msg!("Invalid boolean byte {}", value);
            Err(TokenRecipesError::DeserializationError.into())
        }
    }
}

pub(crate) fn unpack_pubkey(src: &[u8; 32]) -> Pubkey {
    Pubkey::new_from_array(*src)
}
