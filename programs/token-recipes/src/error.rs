//! Custom Error Types
//!
//! Every error the token recipes program can return. Each variant has a
//! stable numeric code and belongs to one
//! [`ErrorCategory`].
//!
//! # Error Code Ranges
//!
//! | Range | Category |
//! |-------|----------|
//! | 1-9 | Account validation errors |
//! | 10-12 | Ingredient errors |
//! | 13-17 | Crafting and lifecycle errors |
//! | 18-24 | Feature errors |
//! | 25-29 | Argument and authority errors |
//! | 30 | Account deserialization |

use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    msg,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

// =============================================================================
// ERROR CATEGORY
// =============================================================================

/// Broad classes of failures, for clients that react per class rather
/// than per code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A signer or authority does not match what the account expects.
    Authorization,
    /// Malformed arguments, accounts or derivations.
    Validation,
    /// The recipe has not unlocked the feature level the operation needs.
    FeatureGate,
    /// Balances, supplies or arithmetic limits.
    Economic,
    /// The recipe is not in a state that allows the operation.
    State,
    /// Accounts the instruction needs were not provided.
    Resource,
}

impl ErrorCategory {
    /// Classifies any program error, including the runtime's own.
    pub fn of(error: &ProgramError) -> Option<Self> {
        match error {
            ProgramError::Custom(code) => {
                <TokenRecipesError as num_traits::FromPrimitive>::from_u32(*code)
                    .map(TokenRecipesError::category)
            }
            ProgramError::NotEnoughAccountKeys => Some(ErrorCategory::Resource),
            ProgramError::MissingRequiredSignature => Some(ErrorCategory::Authorization),
            ProgramError::InsufficientFunds => Some(ErrorCategory::Economic),
            _ => None,
        }
    }
}

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Errors that may be returned by the token recipes program.
///
/// After deployment, NEVER reorder these variants!
/// Clients depend on stable error codes. Add new errors at the end.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
pub enum TokenRecipesError {
    // =========================================================================
    // ACCOUNT VALIDATION ERRORS (1-9)
    // =========================================================================
    // Code 0 stays unused: the system program reports AccountAlreadyInUse as
    // Custom(0) and CPI errors must not decode as ours.
    /// Error 1: Account data could not be written.
    #[error("Error serializing account")]
    SerializationError = 1,

    /// Error 2: Account is not owned by the expected program.
    #[error("Invalid program owner. This likely mean the provided account does not exist")]
    InvalidProgramOwner,

    /// Error 3: Account address does not match its derivation.
    #[error("Invalid PDA derivation")]
    InvalidPda,

    /// Error 4: Account was expected to hold no data yet.
    #[error("Expected empty account")]
    ExpectedEmptyAccount,

    /// Error 5: Account was expected to sign the transaction.
    #[error("Expected signer account")]
    ExpectedSignerAccount,

    /// Error 6: Account was expected to be writable.
    #[error("Expected writable account")]
    ExpectedWritableAccount,

    /// Error 7: Account does not match the expected key.
    #[error("Account mismatch")]
    AccountMismatch,

    /// Error 8: Account data has the wrong length.
    #[error("Invalid data size")]
    InvalidDataSize,

    /// Error 9: Account discriminator is not the expected one.
    #[error("Invalid account key")]
    InvalidAccountKey,

    // =========================================================================
    // INGREDIENT ERRORS (10-12)
    // =========================================================================
    /// Error 10: The mint already occupies this input or output slot.
    #[error("Ingredient already added")]
    IngredientAlreadyAdded,

    /// Error 11: The recipe has no such ingredient.
    #[error("Missing ingredient")]
    MissingIngredient,

    /// Error 12: The signer is not the mint authority of the ingredient.
    #[error("Invalid mint authority")]
    InvalidMintAuthority,

    // =========================================================================
    // CRAFTING AND LIFECYCLE ERRORS (13-17)
    // =========================================================================
    /// Error 13: Crafting a paused recipe.
    #[error("Recipe is not active")]
    RecipeIsNotActive,

    /// Error 14: An amount calculation overflowed.
    #[error("Numerical overflow")]
    NumericalOverflow,

    /// Error 15: A token account holds less than the recipe consumes.
    #[error("Not enough tokens")]
    NotEnoughTokens,

    /// Error 16: Minting would exceed an output's maximum supply.
    #[error("Maximum supply reached")]
    MaximumSupplyReached,

    /// Error 17: Deleting a recipe that still lists ingredients.
    #[error("Recipe must be empty before it can be deleted")]
    RecipeMustBeEmptyBeforeItCanBeDeleted,

    // =========================================================================
    // FEATURE ERRORS (18-24)
    // =========================================================================
    /// Error 18: The mint is not the tier mint for the current level.
    #[error("Invalid mint to level up feature")]
    InvalidMintToLevelUpFeature,

    /// Error 19: The feature cannot go any higher.
    #[error("Maximum feature level reached")]
    MaxFeatureLevelReached,

    /// Error 20: Custom fees need a higher fees level.
    #[error("Fees feature level is too low")]
    InvalidFeesFeature,

    /// Error 21: Too many outputs for the current level.
    #[error("Additional outputs feature level is too low")]
    InvalidAdditionalOutputsFeature,

    /// Error 22: Too many transfer inputs for the current level.
    #[error("Transfer inputs feature level is too low")]
    InvalidTransferInputsFeature,

    /// Error 23: Capped outputs need the max supply feature.
    #[error("Max supply feature level is too low")]
    InvalidMaxSupplyFeature,

    /// Error 24: SOL inputs need the sol payment feature, within its cap.
    #[error("Sol payment feature level is too low")]
    InvalidSolPaymentFeature,

    // =========================================================================
    // ARGUMENT AND AUTHORITY ERRORS (25-29)
    // =========================================================================
    /// Error 25: Ingredient amounts and craft quantities must be positive.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Error 26: A destination or max supply was not provided.
    #[error("Missing ingredient argument")]
    MissingIngredientArgument,

    /// Error 27: Instruction data could not be parsed.
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// Error 28: The signer is not the recipe authority.
    #[error("Invalid recipe authority")]
    InvalidAuthority,

    /// Error 29: The signer is not the program admin.
    #[error("Invalid admin")]
    InvalidAdmin,

    /// Error 30: Account data could not be parsed.
    #[error("Error deserializing account")]
    DeserializationError,
}

impl TokenRecipesError {
    /// The stable numeric code of this error.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Which class of failure this error belongs to.
    pub fn category(self) -> ErrorCategory {
        use TokenRecipesError::*;
        match self {
            ExpectedSignerAccount | InvalidMintAuthority | InvalidAuthority | InvalidAdmin => {
                ErrorCategory::Authorization
            }
            InvalidMintToLevelUpFeature
            | MaxFeatureLevelReached
            | InvalidFeesFeature
            | InvalidAdditionalOutputsFeature
            | InvalidTransferInputsFeature
            | InvalidMaxSupplyFeature
            | InvalidSolPaymentFeature => ErrorCategory::FeatureGate,
            NumericalOverflow | NotEnoughTokens | MaximumSupplyReached => ErrorCategory::Economic,
            RecipeIsNotActive | RecipeMustBeEmptyBeforeItCanBeDeleted => ErrorCategory::State,
            _ => ErrorCategory::Validation,
        }
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<TokenRecipesError> for ProgramError {
    fn from(e: TokenRecipesError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for TokenRecipesError {
    fn type_of() -> &'static str {
        "Token Recipes Error"
    }
}

impl PrintProgramError for TokenRecipesError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + num_traits::FromPrimitive,
    {
        msg!("Error: {}", self);
    }
}
