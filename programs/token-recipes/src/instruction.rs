//! Instruction Types
//!
//! This module defines all instructions supported by the token recipes
//! program, plus client-side builders that derive every PDA and
//! associated token address an instruction needs.
//!
//! # Instruction Format
//!
//! ```text
//! [discriminant: u8][data: varies]
//! ```
//!
//! # Discriminant Values
//!
//! | Value | Instruction |
//! |-------|-------------|
//! | 0 | CreateRecipe |
//! | 1 | AddIngredient |
//! | 2 | RemoveIngredient |
//! | 3 | ActivateRecipe |
//! | 4 | PauseRecipe |
//! | 5 | Craft |
//! | 6 | DeleteRecipe |
//! | 7 | AdminSetFeature |
//! | 8 | UnlockFeature |
//! | 9 | SetFees |
//! | 10 | CollectFees |
//! | 11 | CollectExperience |

use crate::error::TokenRecipesError;
use crate::state::{
    DelegatedIngredient, Feature, FeatureKind, IngredientInput, IngredientRecord, Recipe,
};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};
use spl_associated_token_account::get_associated_token_address;

pub use crate::state::IngredientType;

// =============================================================================
// INSTRUCTION ENUM
// =============================================================================

/// All instructions supported by the token recipes program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenRecipesInstruction {
    /// Create a new, paused and empty recipe.
    ///
    /// Accounts expected:
    /// 0. `[signer]` Base, its key seeds the recipe address
    /// 1. `[writable]` Recipe PDA
    /// 2. `[]` Authority
    /// 3. `[writable, signer]` Payer
    /// 4. `[]` System program
    CreateRecipe,

    /// Add an input or an output to a recipe.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Recipe
    /// 1. `[writable]` Mint (ignored for SOL payments)
    /// 2. `[writable]` Ingredient record PDA
    /// 3. `[writable]` Delegated ingredient PDA (outputs only)
    /// 4. `[signer]` Recipe authority
    /// 5. `[writable, signer]` Payer
    /// 6. `[]` System program
    /// 7. `[]` Token program
    AddIngredient {
        amount: u64,
        ingredient_type: IngredientType,
        destination: Option<Pubkey>,
        max_supply: Option<u64>,
    },

    /// Remove an input or an output from a recipe.
    ///
    /// Accounts expected: same as AddIngredient.
    RemoveIngredient { ingredient_type: IngredientType },

    /// Accounts expected:
    /// 0. `[writable]` Recipe
    /// 1. `[signer]` Recipe authority
    ActivateRecipe,

    /// Accounts expected: same as ActivateRecipe.
    PauseRecipe,

    /// Run the recipe `quantity` times.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Recipe
    /// 1. `[signer]` Owner of the input tokens, receives the outputs
    /// 2. `[writable, signer]` Payer of the fees and SOL payments
    /// 3. `[]` System program
    /// 4. `[]` Token program
    /// 5. `[]` Associated token account program
    /// 6.. Ingredient accounts, inputs then outputs, in recipe order:
    ///     - BurnToken: `[writable]` mint, `[writable]` owner token
    ///     - TransferToken: `[writable]` mint, `[writable]` owner token,
    ///       `[]` destination, `[writable]` destination token
    ///     - TransferSol: `[writable]` destination
    ///     - MintToken(WithMaxSupply): `[writable]` mint,
    ///       `[writable]` owner token, `[]` delegated ingredient PDA
    Craft { quantity: u64 },

    /// Flush the accumulated economics and close an empty recipe.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Recipe
    /// 1. `[writable, signer]` Recipe authority
    /// 2. `[writable]` Admin fees destination
    /// 3. `[]` Fees feature PDA
    /// 4. `[writable]` Shards mint
    /// 5. `[writable]` Authority shards token
    /// 6. `[]` Wisdom feature PDA
    /// 7. `[writable]` Experience mint
    /// 8. `[writable]` Authority experience token
    /// 9. `[]` System program
    /// 10. `[]` Token program
    /// 11. `[]` Associated token account program
    DeleteRecipe,

    /// Create or overwrite a feature account.
    ///
    /// Accounts expected:
    /// 0. `[signer]` Program admin
    /// 1. `[writable]` Feature PDA
    /// 2. `[writable, signer]` Payer
    /// 3. `[]` System program
    AdminSetFeature { feature: Feature },

    /// Level up one feature of a recipe with a tier token.
    ///
    /// Accounts expected:
    /// 0. `[writable]` Recipe
    /// 1. `[]` Feature PDA
    /// 2. `[signer]` Owner of the tier token
    /// 3. `[writable]` Tier mint
    /// 4. `[writable]` Owner token
    /// 5. `[]` Token program
    UnlockFeature,

    /// Set the custom fees charged per craft.
    ///
    /// Accounts expected: same as ActivateRecipe.
    SetFees { fees: u64 },

    /// Accounts expected:
    /// 0. `[writable]` Recipe
    /// 1. `[writable, signer]` Recipe authority
    /// 2. `[writable]` Admin fees destination
    /// 3. `[]` Fees feature PDA
    /// 4. `[writable]` Shards mint
    /// 5. `[writable]` Authority shards token
    /// 6. `[]` System program
    /// 7. `[]` Token program
    /// 8. `[]` Associated token account program
    CollectFees,

    /// Accounts expected:
    /// 0. `[writable]` Recipe
    /// 1. `[writable, signer]` Recipe authority
    /// 2. `[]` Wisdom feature PDA
    /// 3. `[writable]` Experience mint
    /// 4. `[writable]` Authority experience token
    /// 5. `[]` System program
    /// 6. `[]` Token program
    /// 7. `[]` Associated token account program
    CollectExperience,
}

// =============================================================================
// INSTRUCTION PARSING (UNPACK)
// =============================================================================

impl TokenRecipesInstruction {
    /// Parse instruction data into a TokenRecipesInstruction.
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&discriminant, rest) = input
            .split_first()
            .ok_or(TokenRecipesError::InvalidInstruction)?;

        Ok(match discriminant {
            0 => Self::CreateRecipe,
            1 => {
                let (amount, rest) = unpack_u64(rest)?;
                let (&ingredient_type, rest) = rest
                    .split_first()
                    .ok_or(TokenRecipesError::InvalidInstruction)?;
                let (destination, rest) = unpack_option(rest, 32)?;
                let (max_supply, _rest) = unpack_option(rest, 8)?;
                Self::AddIngredient {
                    amount,
                    ingredient_type: IngredientType::from_u8(ingredient_type)?,
                    destination: destination.map(unpack_pubkey).transpose()?,
                    max_supply: max_supply
                        .map(|bytes| unpack_u64(bytes).map(|(value, _)| value))
                        .transpose()?,
                }
            }
            2 => {
                let &ingredient_type = rest
                    .first()
                    .ok_or(TokenRecipesError::InvalidInstruction)?;
                Self::RemoveIngredient {
                    ingredient_type: IngredientType::from_u8(ingredient_type)?,
                }
            }
            3 => Self::ActivateRecipe,
            4 => Self::PauseRecipe,
            5 => Self::Craft {
                quantity: unpack_u64(rest)?.0,
            },
            6 => Self::DeleteRecipe,
            7 => Self::AdminSetFeature {
                feature: Feature::unpack(rest)?,
            },
            8 => Self::UnlockFeature,
            9 => Self::SetFees {
                fees: unpack_u64(rest)?.0,
            },
            10 => Self::CollectFees,
            11 => Self::CollectExperience,
            _ => return Err(TokenRecipesError::InvalidInstruction.into()),
        })
    }

    // =========================================================================
    // INSTRUCTION PACKING (for tests and clients)
    // =========================================================================

    /// Pack instruction into bytes. This is the inverse of `unpack()`.
    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let mut buf = Vec::new();

        match self {
            Self::CreateRecipe => buf.push(0),
            Self::AddIngredient {
                amount,
                ingredient_type,
                destination,
                max_supply,
            } => {
                buf.push(1);
                buf.extend_from_slice(&amount.to_le_bytes());
                buf.push(*ingredient_type as u8);
                match destination {
                    Some(destination) => {
                        buf.push(1);
                        buf.extend_from_slice(destination.as_ref());
                    }
                    None => buf.push(0),
                }
                match max_supply {
                    Some(max_supply) => {
                        buf.push(1);
                        buf.extend_from_slice(&max_supply.to_le_bytes());
                    }
                    None => buf.push(0),
                }
            }
            Self::RemoveIngredient { ingredient_type } => {
                buf.push(2);
                buf.push(*ingredient_type as u8);
            }
            Self::ActivateRecipe => buf.push(3),
            Self::PauseRecipe => buf.push(4),
            Self::Craft { quantity } => {
                buf.push(5);
                buf.extend_from_slice(&quantity.to_le_bytes());
            }
            Self::DeleteRecipe => buf.push(6),
            Self::AdminSetFeature { feature } => {
                buf.push(7);
                buf.extend_from_slice(&feature.to_vec()?);
            }
            Self::UnlockFeature => buf.push(8),
            Self::SetFees { fees } => {
                buf.push(9);
                buf.extend_from_slice(&fees.to_le_bytes());
            }
            Self::CollectFees => buf.push(10),
            Self::CollectExperience => buf.push(11),
        }

        Ok(buf)
    }
}

fn unpack_u64(input: &[u8]) -> Result<(u64, &[u8]), ProgramError> {
    if input.len() < 8 {
        return Err(TokenRecipesError::InvalidInstruction.into());
    }
    let (bytes, rest) = input.split_at(8);
    let value = u64::from_le_bytes(
        bytes
            .try_into()
            .map_err(|_| TokenRecipesError::InvalidInstruction)?,
    );
    Ok((value, rest))
}

fn unpack_pubkey(input: &[u8]) -> Result<Pubkey, ProgramError> {
    Pubkey::try_from(input).map_err(|_| TokenRecipesError::InvalidInstruction.into())
}

/// Splits a `[tag][value: len]` option off the front of `input`.
fn unpack_option(input: &[u8], len: usize) -> Result<(Option<&[u8]>, &[u8]), ProgramError> {
    match input.split_first() {
        Some((0, rest)) => Ok((None, rest)),
        Some((1, rest)) if rest.len() >= len => {
            let (value, rest) = rest.split_at(len);
            Ok((Some(value), rest))
        }
        _ => Err(TokenRecipesError::InvalidInstruction.into()),
    }
}

// =============================================================================
// CLIENT BUILDERS
// =============================================================================

fn feature_pda(kind: FeatureKind) -> Pubkey {
    kind.find_pda().0
}

pub fn create_recipe(
    base: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: vec![
            AccountMeta::new_readonly(*base, true),
            AccountMeta::new(Recipe::find_pda(base).0, false),
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: TokenRecipesInstruction::CreateRecipe.pack()?,
    })
}

fn ingredient_accounts(
    recipe: &Pubkey,
    mint: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*recipe, false),
        AccountMeta::new(*mint, false),
        AccountMeta::new(IngredientRecord::find_pda(mint, recipe).0, false),
        AccountMeta::new(DelegatedIngredient::find_pda(mint).0, false),
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(spl_token::id(), false),
    ]
}

/// `mint` is only a placeholder for SOL payments; any key works.
#[allow(clippy::too_many_arguments)]
pub fn add_ingredient(
    recipe: &Pubkey,
    mint: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    ingredient_type: IngredientType,
    amount: u64,
    destination: Option<Pubkey>,
    max_supply: Option<u64>,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: ingredient_accounts(recipe, mint, authority, payer),
        data: TokenRecipesInstruction::AddIngredient {
            amount,
            ingredient_type,
            destination,
            max_supply,
        }
        .pack()?,
    })
}

pub fn remove_ingredient(
    recipe: &Pubkey,
    mint: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    ingredient_type: IngredientType,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: ingredient_accounts(recipe, mint, authority, payer),
        data: TokenRecipesInstruction::RemoveIngredient { ingredient_type }.pack()?,
    })
}

fn recipe_authority_instruction(
    recipe: &Pubkey,
    authority: &Pubkey,
    instruction: TokenRecipesInstruction,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: vec![
            AccountMeta::new(*recipe, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data: instruction.pack()?,
    })
}

pub fn activate_recipe(recipe: &Pubkey, authority: &Pubkey) -> Result<Instruction, ProgramError> {
    recipe_authority_instruction(recipe, authority, TokenRecipesInstruction::ActivateRecipe)
}

pub fn pause_recipe(recipe: &Pubkey, authority: &Pubkey) -> Result<Instruction, ProgramError> {
    recipe_authority_instruction(recipe, authority, TokenRecipesInstruction::PauseRecipe)
}

pub fn set_fees(
    recipe: &Pubkey,
    authority: &Pubkey,
    fees: u64,
) -> Result<Instruction, ProgramError> {
    recipe_authority_instruction(recipe, authority, TokenRecipesInstruction::SetFees { fees })
}

/// Builds a craft call from the current recipe state. The owner's
/// associated token accounts are used for every mint.
pub fn craft(
    recipe: &Pubkey,
    recipe_state: &Recipe,
    owner: &Pubkey,
    payer: &Pubkey,
    quantity: u64,
) -> Result<Instruction, ProgramError> {
    let mut accounts = vec![
        AccountMeta::new(*recipe, false),
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
    ];

    for input in &recipe_state.inputs {
        match input {
            IngredientInput::BurnToken { mint, .. } => {
                accounts.push(AccountMeta::new(*mint, false));
                accounts.push(AccountMeta::new(
                    get_associated_token_address(owner, mint),
                    false,
                ));
            }
            IngredientInput::TransferToken {
                mint, destination, ..
            } => {
                accounts.push(AccountMeta::new(*mint, false));
                accounts.push(AccountMeta::new(
                    get_associated_token_address(owner, mint),
                    false,
                ));
                accounts.push(AccountMeta::new_readonly(*destination, false));
                accounts.push(AccountMeta::new(
                    get_associated_token_address(destination, mint),
                    false,
                ));
            }
            IngredientInput::TransferSol { destination, .. } => {
                accounts.push(AccountMeta::new(*destination, false));
            }
        }
    }

    for output in &recipe_state.outputs {
        let mint = output.mint();
        accounts.push(AccountMeta::new(mint, false));
        accounts.push(AccountMeta::new(
            get_associated_token_address(owner, &mint),
            false,
        ));
        accounts.push(AccountMeta::new_readonly(
            DelegatedIngredient::find_pda(&mint).0,
            false,
        ));
    }

    Ok(Instruction {
        program_id: crate::id(),
        accounts,
        data: TokenRecipesInstruction::Craft { quantity }.pack()?,
    })
}

pub fn delete_recipe(
    recipe: &Pubkey,
    authority: &Pubkey,
    admin_fees_destination: &Pubkey,
    shard_mint: &Pubkey,
    experience_mint: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: vec![
            AccountMeta::new(*recipe, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new(*admin_fees_destination, false),
            AccountMeta::new_readonly(feature_pda(FeatureKind::Fees), false),
            AccountMeta::new(*shard_mint, false),
            AccountMeta::new(get_associated_token_address(authority, shard_mint), false),
            AccountMeta::new_readonly(feature_pda(FeatureKind::Wisdom), false),
            AccountMeta::new(*experience_mint, false),
            AccountMeta::new(
                get_associated_token_address(authority, experience_mint),
                false,
            ),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        ],
        data: TokenRecipesInstruction::DeleteRecipe.pack()?,
    })
}

pub fn admin_set_feature(
    admin: &Pubkey,
    payer: &Pubkey,
    feature: Feature,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: vec![
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new(feature_pda(feature.kind()), false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: TokenRecipesInstruction::AdminSetFeature { feature }.pack()?,
    })
}

/// The tier token is taken from the owner's associated token account.
pub fn unlock_feature(
    recipe: &Pubkey,
    kind: FeatureKind,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: vec![
            AccountMeta::new(*recipe, false),
            AccountMeta::new_readonly(feature_pda(kind), false),
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*mint, false),
            AccountMeta::new(get_associated_token_address(owner, mint), false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data: TokenRecipesInstruction::UnlockFeature.pack()?,
    })
}

pub fn collect_fees(
    recipe: &Pubkey,
    authority: &Pubkey,
    admin_fees_destination: &Pubkey,
    shard_mint: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: vec![
            AccountMeta::new(*recipe, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new(*admin_fees_destination, false),
            AccountMeta::new_readonly(feature_pda(FeatureKind::Fees), false),
            AccountMeta::new(*shard_mint, false),
            AccountMeta::new(get_associated_token_address(authority, shard_mint), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        ],
        data: TokenRecipesInstruction::CollectFees.pack()?,
    })
}

pub fn collect_experience(
    recipe: &Pubkey,
    authority: &Pubkey,
    experience_mint: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: crate::id(),
        accounts: vec![
            AccountMeta::new(*recipe, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(feature_pda(FeatureKind::Wisdom), false),
            AccountMeta::new(*experience_mint, false),
            AccountMeta::new(
                get_associated_token_address(authority, experience_mint),
                false,
            ),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        ],
        data: TokenRecipesInstruction::CollectExperience.pack()?,
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================
