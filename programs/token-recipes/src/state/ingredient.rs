//! Recipe Ingredients
//!
//! Inputs are what a crafter gives up, outputs are what they receive.
//! Each ingredient is stored inside the recipe account as a tag byte
//! followed by the fields of its variant.
//!
//! # Input Layouts
//!
//! ```text
//! BurnToken      [tag=0][mint: 32][amount: 8]                      41 bytes
//! TransferToken  [tag=1][mint: 32][amount: 8][destination: 32]     73 bytes
//! TransferSol    [tag=2][lamports: 8][destination: 32]             41 bytes
//! ```
//!
//! # Output Layouts
//!
//! ```text
//! MintToken               [tag=0][mint: 32][amount: 8]                 41 bytes
//! MintTokenWithMaxSupply  [tag=1][mint: 32][amount: 8][max_supply: 8]  49 bytes
//! ```

use crate::error::TokenRecipesError;
use crate::state::unpack_pubkey;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{msg, program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// INGREDIENT TYPE
// =============================================================================

/// The kind of ingredient an AddIngredient or RemoveIngredient targets.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngredientType {
    BurnTokenInput = 0,
    TransferTokenInput = 1,
    MintTokenOutput = 2,
    MintTokenWithMaxSupplyOutput = 3,
    TransferSolInput = 4,
}

impl IngredientType {
    pub fn from_u8(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(IngredientType::BurnTokenInput),
            1 => Ok(IngredientType::TransferTokenInput),
            2 => Ok(IngredientType::MintTokenOutput),
            3 => Ok(IngredientType::MintTokenWithMaxSupplyOutput),
            4 => Ok(IngredientType::TransferSolInput),
            _ => Err(TokenRecipesError::InvalidInstruction.into()),
        }
    }

    pub fn is_input(self) -> bool {
        matches!(
            self,
            IngredientType::BurnTokenInput
                | IngredientType::TransferTokenInput
                | IngredientType::TransferSolInput
        )
    }

    pub fn is_output(self) -> bool {
        !self.is_input()
    }

    /// TransferSol has no mint, hence no ingredient record.
    pub fn uses_mint(self) -> bool {
        self != IngredientType::TransferSolInput
    }
}

// =============================================================================
// INPUTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngredientInput {
    /// Burns `amount` tokens per craft.
    BurnToken { mint: Pubkey, amount: u64 },
    /// Sends `amount` tokens per craft to `destination`.
    TransferToken {
        mint: Pubkey,
        amount: u64,
        destination: Pubkey,
    },
    /// Sends `lamports` per craft from the payer to `destination`.
    TransferSol { lamports: u64, destination: Pubkey },
}

impl IngredientInput {
    const BURN_TOKEN_LEN: usize = 1 + 32 + 8;
    const TRANSFER_TOKEN_LEN: usize = 1 + 32 + 8 + 32;
    const TRANSFER_SOL_LEN: usize = 1 + 8 + 32;

    pub fn ingredient_type(&self) -> IngredientType {
        match self {
            IngredientInput::BurnToken { .. } => IngredientType::BurnTokenInput,
            IngredientInput::TransferToken { .. } => IngredientType::TransferTokenInput,
            IngredientInput::TransferSol { .. } => IngredientType::TransferSolInput,
        }
    }

    /// The token mint consumed, `None` for SOL payments.
    pub fn mint(&self) -> Option<Pubkey> {
        match self {
            IngredientInput::BurnToken { mint, .. }
            | IngredientInput::TransferToken { mint, .. } => Some(*mint),
            IngredientInput::TransferSol { .. } => None,
        }
    }

    /// Token amount or lamports consumed per craft.
    pub fn amount(&self) -> u64 {
        match self {
            IngredientInput::BurnToken { amount, .. }
            | IngredientInput::TransferToken { amount, .. } => *amount,
            IngredientInput::TransferSol { lamports, .. } => *lamports,
        }
    }

    pub fn packed_len(&self) -> usize {
        match self {
            IngredientInput::BurnToken { .. } => Self::BURN_TOKEN_LEN,
            IngredientInput::TransferToken { .. } => Self::TRANSFER_TOKEN_LEN,
            IngredientInput::TransferSol { .. } => Self::TRANSFER_SOL_LEN,
        }
    }

    /// Reads one input from the front of `input`, returning it with the
    /// remaining bytes.
    pub fn unpack(input: &[u8]) -> Result<(Self, &[u8]), ProgramError> {
        let tag = *input.first().ok_or(TokenRecipesError::DeserializationError)?;
        let len = match tag {
            0 => Self::BURN_TOKEN_LEN,
            1 => Self::TRANSFER_TOKEN_LEN,
            2 => Self::TRANSFER_SOL_LEN,
            _ => {
                msg!("Unknown input ingredient tag {}", tag);
                return Err(TokenRecipesError::DeserializationError.into());
            }
        };
        if input.len() < len {
            msg!("Truncated input ingredient");
            return Err(TokenRecipesError::DeserializationError.into());
        }
        let (data, rest) = input.split_at(len);

        let ingredient = match tag {
            0 => {
                let data = array_ref![data, 0, IngredientInput::BURN_TOKEN_LEN];
                let (_, mint, amount) = array_refs![data, 1, 32, 8];
                IngredientInput::BurnToken {
                    mint: unpack_pubkey(mint),
                    amount: u64::from_le_bytes(*amount),
                }
            }
            1 => {
                let data = array_ref![data, 0, IngredientInput::TRANSFER_TOKEN_LEN];
                let (_, mint, amount, destination) = array_refs![data, 1, 32, 8, 32];
                IngredientInput::TransferToken {
                    mint: unpack_pubkey(mint),
                    amount: u64::from_le_bytes(*amount),
                    destination: unpack_pubkey(destination),
                }
            }
            _ => {
                let data = array_ref![data, 0, IngredientInput::TRANSFER_SOL_LEN];
                let (_, lamports, destination) = array_refs![data, 1, 8, 32];
                IngredientInput::TransferSol {
                    lamports: u64::from_le_bytes(*lamports),
                    destination: unpack_pubkey(destination),
                }
            }
        };
        Ok((ingredient, rest))
    }

    /// Writes the input at the front of `dst` and returns the bytes written.
    pub fn pack(&self, dst: &mut [u8]) -> Result<usize, ProgramError> {
        if dst.len() < self.packed_len() {
            return Err(TokenRecipesError::SerializationError.into());
        }
        match self {
            IngredientInput::BurnToken { mint, amount } => {
                let dst = array_mut_ref![dst, 0, IngredientInput::BURN_TOKEN_LEN];
                let (tag_dst, mint_dst, amount_dst) = mut_array_refs![dst, 1, 32, 8];
                tag_dst[0] = 0;
                mint_dst.copy_from_slice(mint.as_ref());
                *amount_dst = amount.to_le_bytes();
            }
            IngredientInput::TransferToken {
                mint,
                amount,
                destination,
            } => {
                let dst = array_mut_ref![dst, 0, IngredientInput::TRANSFER_TOKEN_LEN];
                let (tag_dst, mint_dst, amount_dst, destination_dst) =
                    mut_array_refs![dst, 1, 32, 8, 32];
                tag_dst[0] = 1;
                mint_dst.copy_from_slice(mint.as_ref());
                *amount_dst = amount.to_le_bytes();
                destination_dst.copy_from_slice(destination.as_ref());
            }
            IngredientInput::TransferSol {
                lamports,
                destination,
            } => {
                let dst = array_mut_ref![dst, 0, IngredientInput::TRANSFER_SOL_LEN];
                let (tag_dst, lamports_dst, destination_dst) = mut_array_refs![dst, 1, 8, 32];
                tag_dst[0] = 2;
                *lamports_dst = lamports.to_le_bytes();
                destination_dst.copy_from_slice(destination.as_ref());
            }
        }
        Ok(self.packed_len())
    }
}

// =============================================================================
// OUTPUTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngredientOutput {
    /// Mints `amount` tokens per craft, without a supply cap.
    MintToken { mint: Pubkey, amount: u64 },
    /// Mints `amount` tokens per craft while the supply stays within `max_supply`.
    MintTokenWithMaxSupply {
        mint: Pubkey,
        amount: u64,
        max_supply: u64,
    },
}

impl IngredientOutput {
    const MINT_TOKEN_LEN: usize = 1 + 32 + 8;
    const MINT_TOKEN_WITH_MAX_SUPPLY_LEN: usize = 1 + 32 + 8 + 8;

    pub fn ingredient_type(&self) -> IngredientType {
        match self {
            IngredientOutput::MintToken { .. } => IngredientType::MintTokenOutput,
            IngredientOutput::MintTokenWithMaxSupply { .. } => {
                IngredientType::MintTokenWithMaxSupplyOutput
            }
        }
    }

    pub fn mint(&self) -> Pubkey {
        match self {
            IngredientOutput::MintToken { mint, .. }
            | IngredientOutput::MintTokenWithMaxSupply { mint, .. } => *mint,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            IngredientOutput::MintToken { amount, .. }
            | IngredientOutput::MintTokenWithMaxSupply { amount, .. } => *amount,
        }
    }

    /// Supply cap of the mint, `u64::MAX` when uncapped.
    pub fn max_supply(&self) -> u64 {
        match self {
            IngredientOutput::MintToken { .. } => u64::MAX,
            IngredientOutput::MintTokenWithMaxSupply { max_supply, .. } => *max_supply,
        }
    }

    pub fn packed_len(&self) -> usize {
        match self {
            IngredientOutput::MintToken { .. } => Self::MINT_TOKEN_LEN,
            IngredientOutput::MintTokenWithMaxSupply { .. } => {
                Self::MINT_TOKEN_WITH_MAX_SUPPLY_LEN
            }
        }
    }

    /// Reads one output from the front of `input`, returning it with the
    /// remaining bytes.
    pub fn unpack(input: &[u8]) -> Result<(Self, &[u8]), ProgramError> {
        let tag = *input.first().ok_or(TokenRecipesError::DeserializationError)?;
        let len = match tag {
            0 => Self::MINT_TOKEN_LEN,
            1 => Self::MINT_TOKEN_WITH_MAX_SUPPLY_LEN,
            _ => {
                msg!("Unknown output ingredient tag {}", tag);
                return Err(TokenRecipesError::DeserializationError.into());
            }
        };
        if input.len() < len {
            msg!("Truncated output ingredient");
            return Err(TokenRecipesError::DeserializationError.into());
        }
        let (data, rest) = input.split_at(len);

        let ingredient = if tag == 0 {
            let data = array_ref![data, 0, IngredientOutput::MINT_TOKEN_LEN];
            let (_, mint, amount) = array_refs![data, 1, 32, 8];
            IngredientOutput::MintToken {
                mint: unpack_pubkey(mint),
                amount: u64::from_le_bytes(*amount),
            }
        } else {
            let data = array_ref![data, 0, IngredientOutput::MINT_TOKEN_WITH_MAX_SUPPLY_LEN];
            let (_, mint, amount, max_supply) = array_refs![data, 1, 32, 8, 8];
            IngredientOutput::MintTokenWithMaxSupply {
                mint: unpack_pubkey(mint),
                amount: u64::from_le_bytes(*amount),
                max_supply: u64::from_le_bytes(*max_supply),
            }
        };
        Ok((ingredient, rest))
    }

    /// Writes the output at the front of `dst` and returns the bytes written.
    pub fn pack(&self, dst: &mut [u8]) -> Result<usize, ProgramError> {
        if dst.len() < self.packed_len() {
            return Err(TokenRecipesError::SerializationError.into());
        }
        match self {
            IngredientOutput::MintToken { mint, amount } => {
                let dst = array_mut_ref![dst, 0, IngredientOutput::MINT_TOKEN_LEN];
                let (tag_dst, mint_dst, amount_dst) = mut_array_refs![dst, 1, 32, 8];
                tag_dst[0] = 0;
                mint_dst.copy_from_slice(mint.as_ref());
                *amount_dst = amount.to_le_bytes();
            }
            IngredientOutput::MintTokenWithMaxSupply {
                mint,
                amount,
                max_supply,
            } => {
                let dst = array_mut_ref![dst, 0, IngredientOutput::MINT_TOKEN_WITH_MAX_SUPPLY_LEN];
                let (tag_dst, mint_dst, amount_dst, max_supply_dst) =
                    mut_array_refs![dst, 1, 32, 8, 8];
                tag_dst[0] = 1;
                mint_dst.copy_from_slice(mint.as_ref());
                *amount_dst = amount.to_le_bytes();
                *max_supply_dst = max_supply.to_le_bytes();
            }
        }
        Ok(self.packed_len())
    }
}
