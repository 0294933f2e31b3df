//! # Token Recipes
//!
//! An on-chain crafting engine. A recipe authority describes how a set of
//! input tokens (burned or transferred, or plain SOL) turns into a set of
//! output tokens (minted), and anyone may then craft that recipe as many
//! times as they like while it is active.
//!
//! Advanced recipe behavior is gated behind "features" that are unlocked by
//! burning (or holding) special tier tokens. Every craft charges a small
//! protocol fee which is split between the program admin and the recipe,
//! and accrues shards and experience that the authority can collect later.
//!
//! ## Account Types
//!
//! | Account Type | Size | Description |
//! |--------------|------|-------------|
//! | Recipe | 132 bytes + ingredients | Ingredients, status, feature levels, economics |
//! | IngredientRecord | 67 bytes | Marks a mint as input and/or output of a recipe |
//! | DelegatedIngredient | 69 bytes | Holds mint authority for output mints |
//! | Feature accounts | varies | Tier mints of one unlockable feature |
//!
//! ## Instructions
//!
//! | # | Instruction | Description |
//! |---|-------------|-------------|
//! | 0 | CreateRecipe | Create a paused, empty recipe |
//! | 1 | AddIngredient | Add an input or output ingredient |
//! | 2 | RemoveIngredient | Remove an input or output ingredient |
//! | 3 | ActivateRecipe | Allow crafting |
//! | 4 | PauseRecipe | Stop crafting |
//! | 5 | Craft | Consume inputs, produce outputs |
//! | 6 | DeleteRecipe | Flush economics and close an empty recipe |
//! | 7 | AdminSetFeature | Create or update a feature account |
//! | 8 | UnlockFeature | Level up a recipe feature |
//! | 9 | SetFees | Set custom crafting fees |
//! | 10 | CollectFees | Pay out admin fees, recipe fees and shards |
//! | 11 | CollectExperience | Mint accumulated experience |

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Program entrypoint - where Solana calls into our program
pub mod entrypoint;

/// Custom error types with unique codes
pub mod error;

/// Fee, shards and experience computation
pub mod economics;

/// Instruction definitions, parsing and client builders
pub mod instruction;

/// Instruction processors (business logic)
pub mod processor;

/// Account state structures
pub mod state;

/// Account validation and CPI helpers
pub mod utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use error::{ErrorCategory, TokenRecipesError};
pub use instruction::{IngredientType, TokenRecipesInstruction};
pub use processor::Processor;
pub use state::{Key, Pack};

// =============================================================================
// PROGRAM ID
// =============================================================================

solana_program::declare_id!("6EgVKvZu2V6cpZzarvDHuyeJwa1NB2ujj8hXY98pQpLE");

/// The key allowed to create and update feature accounts.
pub mod admin {
    #[cfg(feature = "production")]
    solana_program::declare_id!("6EgVKvZu2V6cpZzarvDHuyeJwa1NB2ujj8hXY98pQpLE");

    // Localnet admin, derived from a fixed test seed.
    #[cfg(not(feature = "production"))]
    solana_program::declare_id!("6fWjvFnHKcH6A2GMgwv3NWXRFCtfKQZSz1o9BegznV6S");
}

/*
=============================================================================
DETAILED EXPLANATION
=============================================================================

HOW THE PIECES FIT
==================

                    ┌──────────────────────┐
                    │   Feature accounts   │  (admin, read-only to crafting)
                    └──────────┬───────────┘
                               │ tier mints
                               ▼
┌──────────────┐    ┌──────────────────────┐    ┌────────────────────────┐
│ Ingredient   │◄───│        Recipe        │───►│  DelegatedIngredient   │
│ Record       │    │ inputs, outputs,     │    │  (mint authority PDA,  │
│ (mint,recipe)│    │ levels, accumulators │    │   shared by recipes)   │
└──────────────┘    └──────────┬───────────┘    └────────────────────────┘
                               │
                               ▼
                    ┌──────────────────────┐
                    │  economics: fee,     │
                    │  shards, experience  │
                    └──────────────────────┘

ADDRESSES
=========

Every account except mints and wallets is a PDA:

    recipe               ["recipe", base]
    ingredient record    ["ingredient_record", mint, recipe]
    delegated ingredient ["delegated_ingredient", mint]
    feature              ["features", name]

The program re-derives each address before touching the account, so a
caller can never point us at an impostor account.

ADMIN KEY
=========

Feature accounts are written by AdminSetFeature, which must be signed by
`admin::ID`. Local builds and tests use a key derived from a fixed seed so
the test suite can sign for it; `--features production` swaps it out.
*/
