//! Integration Tests for Token Recipes
//!
//! These tests run the program against the real SPL Token and Associated
//! Token Account programs bundled with `solana-program-test`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test-sbf
//! # or for faster iteration:
//! cargo test
//! ```

use solana_program::{
    instruction::{Instruction, InstructionError},
    native_token::LAMPORTS_PER_SOL,
    program_option::COption,
    program_pack::Pack as SplPack,
    pubkey::Pubkey,
    system_instruction,
};
use solana_program_test::*;
use solana_sdk::{
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::{Account as TokenAccount, Mint};
use token_recipes::{
    economics::BASE_FEES,
    instruction,
    state::{
        features::{
            AdditionalOutputsFeature, FeesFeature, MaxSupplyFeature, SolPaymentFeature,
            TransferInputsFeature, WisdomFeature,
        },
        DelegatedIngredient, Feature, FeatureKind, IngredientRecord, Pack, Recipe, RecipeStatus,
    },
    IngredientType, TokenRecipesError,
};

/// Keypair of the localnet registry admin compiled into the program.
const ADMIN_KEYPAIR: [u8; 64] = [
    11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34,
    35, 36, 37, 38, 39, 40, 41, 42, 84, 40, 33, 233, 82, 157, 209, 173, 36, 59, 253, 255, 92, 100,
    10, 101, 25, 75, 72, 22, 152, 122, 101, 13, 232, 97, 215, 206, 158, 65, 122, 99,
];

// =============================================================================
// TEST SETUP HELPERS
// =============================================================================

/// Create a ProgramTest instance configured for the recipes program
fn program_test() -> ProgramTest {
    ProgramTest::new(
        "token_recipes",
        token_recipes::id(),
        processor!(token_recipes::entrypoint::process_instruction),
    )
}

fn admin() -> Keypair {
    Keypair::from_bytes(&ADMIN_KEYPAIR).unwrap()
}

/// Sign with the context payer plus `signers` and process.
async fn process(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let blockhash = context.banks_client.get_latest_blockhash().await.unwrap();
    let mut all_signers = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers,
        blockhash,
    );
    context.banks_client.process_transaction(tx).await
}

/// Assert that a transaction failed with a program error
fn assert_custom_error(result: Result<(), BanksClientError>, expected: TokenRecipesError) {
    match result.unwrap_err().unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            assert_eq!(code, expected.code(), "expected {:?}", expected)
        }
        error => panic!("expected {:?}, got {:?}", expected, error),
    }
}

async fn fund(context: &mut ProgramTestContext, to: &Pubkey, lamports: u64) {
    let payer = context.payer.pubkey();
    process(
        context,
        &[system_instruction::transfer(&payer, to, lamports)],
        &[],
    )
    .await
    .unwrap();
}

async fn lamports(context: &mut ProgramTestContext, address: &Pubkey) -> u64 {
    context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .map(|account| account.lamports)
        .unwrap_or(0)
}

async fn account_exists(context: &mut ProgramTestContext, address: &Pubkey) -> bool {
    context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .is_some()
}

async fn minimum_balance(context: &mut ProgramTestContext, len: usize) -> u64 {
    context
        .banks_client
        .get_rent()
        .await
        .unwrap()
        .minimum_balance(len)
}

// =============================================================================
// TOKEN HELPERS
// =============================================================================

/// Helper to create an SPL mint
async fn create_mint(context: &mut ProgramTestContext, authority: &Pubkey, decimals: u8) -> Pubkey {
    let mint = Keypair::new();
    let payer = context.payer.pubkey();
    let rent = minimum_balance(context, Mint::LEN).await;
    process(
        context,
        &[
            system_instruction::create_account(
                &payer,
                &mint.pubkey(),
                rent,
                Mint::LEN as u64,
                &spl_token::id(),
            ),
            spl_token::instruction::initialize_mint2(
                &spl_token::id(),
                &mint.pubkey(),
                authority,
                None,
                decimals,
            )
            .unwrap(),
        ],
        &[&mint],
    )
    .await
    .unwrap();
    mint.pubkey()
}

async fn create_mints(
    context: &mut ProgramTestContext,
    authority: &Pubkey,
    count: usize,
) -> Vec<Pubkey> {
    let mut mints = Vec::with_capacity(count);
    for _ in 0..count {
        mints.push(create_mint(context, authority, 0).await);
    }
    mints
}

/// Mint `amount` tokens to the associated token account of `wallet`,
/// creating it if needed.
async fn give_tokens(
    context: &mut ProgramTestContext,
    mint: &Pubkey,
    mint_authority: &Keypair,
    wallet: &Pubkey,
    amount: u64,
) -> Pubkey {
    let payer = context.payer.pubkey();
    let token = get_associated_token_address(wallet, mint);
    process(
        context,
        &[
            spl_associated_token_account::instruction::create_associated_token_account_idempotent(
                &payer,
                wallet,
                mint,
                &spl_token::id(),
            ),
            spl_token::instruction::mint_to(
                &spl_token::id(),
                mint,
                &token,
                &mint_authority.pubkey(),
                &[],
                amount,
            )
            .unwrap(),
        ],
        &[mint_authority],
    )
    .await
    .unwrap();
    token
}

/// Balance of the associated token account of `wallet`, 0 if missing
async fn token_balance(context: &mut ProgramTestContext, wallet: &Pubkey, mint: &Pubkey) -> u64 {
    let address = get_associated_token_address(wallet, mint);
    match context.banks_client.get_account(address).await.unwrap() {
        Some(account) => TokenAccount::unpack(&account.data).unwrap().amount,
        None => 0,
    }
}

async fn get_mint(context: &mut ProgramTestContext, address: &Pubkey) -> Mint {
    let account = context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .unwrap();
    Mint::unpack(&account.data).unwrap()
}

// =============================================================================
// RECIPE HELPERS
// =============================================================================

struct TestRecipe {
    address: Pubkey,
    authority: Keypair,
}

/// Helper to create a recipe owned by a fresh, funded authority
async fn create_recipe(context: &mut ProgramTestContext) -> TestRecipe {
    let base = Keypair::new();
    let authority = Keypair::new();
    fund(context, &authority.pubkey(), LAMPORTS_PER_SOL).await;

    let payer = context.payer.pubkey();
    process(
        context,
        &[instruction::create_recipe(&base.pubkey(), &authority.pubkey(), &payer).unwrap()],
        &[&base],
    )
    .await
    .unwrap();

    TestRecipe {
        address: Recipe::find_pda(&base.pubkey()).0,
        authority,
    }
}

async fn get_recipe(context: &mut ProgramTestContext, address: &Pubkey) -> Recipe {
    let account = context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.owner, token_recipes::id());
    Recipe::unpack(&account.data).unwrap()
}

async fn get_state<T: Pack>(context: &mut ProgramTestContext, address: &Pubkey) -> T {
    let account = context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .unwrap();
    T::unpack_from_slice(&account.data).unwrap()
}

async fn add_ingredient(
    context: &mut ProgramTestContext,
    recipe: &TestRecipe,
    mint: &Pubkey,
    ingredient_type: IngredientType,
    amount: u64,
    destination: Option<Pubkey>,
    max_supply: Option<u64>,
) -> Result<(), BanksClientError> {
    let payer = context.payer.pubkey();
    process(
        context,
        &[instruction::add_ingredient(
            &recipe.address,
            mint,
            &recipe.authority.pubkey(),
            &payer,
            ingredient_type,
            amount,
            destination,
            max_supply,
        )
        .unwrap()],
        &[&recipe.authority],
    )
    .await
}

async fn remove_ingredient(
    context: &mut ProgramTestContext,
    recipe: &TestRecipe,
    mint: &Pubkey,
    ingredient_type: IngredientType,
) -> Result<(), BanksClientError> {
    let payer = context.payer.pubkey();
    process(
        context,
        &[instruction::remove_ingredient(
            &recipe.address,
            mint,
            &recipe.authority.pubkey(),
            &payer,
            ingredient_type,
        )
        .unwrap()],
        &[&recipe.authority],
    )
    .await
}

async fn activate(context: &mut ProgramTestContext, recipe: &TestRecipe) {
    process(
        context,
        &[instruction::activate_recipe(&recipe.address, &recipe.authority.pubkey()).unwrap()],
        &[&recipe.authority],
    )
    .await
    .unwrap();
}

/// Craft with the context payer paying the fees
async fn craft(
    context: &mut ProgramTestContext,
    recipe: &Pubkey,
    crafter: &Keypair,
    quantity: u64,
) -> Result<(), BanksClientError> {
    let state = get_recipe(context, recipe).await;
    let payer = context.payer.pubkey();
    process(
        context,
        &[instruction::craft(recipe, &state, &crafter.pubkey(), &payer, quantity).unwrap()],
        &[crafter],
    )
    .await
}

// =============================================================================
// FEATURE HELPERS
// =============================================================================

async fn set_feature(context: &mut ProgramTestContext, feature: Feature) {
    let admin = admin();
    let payer = context.payer.pubkey();
    process(
        context,
        &[instruction::admin_set_feature(&admin.pubkey(), &payer, feature).unwrap()],
        &[&admin],
    )
    .await
    .unwrap();
}

/// Unlock with a fresh owner that holds one `mint` token
async fn unlock(
    context: &mut ProgramTestContext,
    recipe: &Pubkey,
    kind: FeatureKind,
    minter: &Keypair,
    mint: &Pubkey,
) -> Result<(), BanksClientError> {
    let owner = Keypair::new();
    give_tokens(context, mint, minter, &owner.pubkey(), 1).await;
    process(
        context,
        &[instruction::unlock_feature(recipe, kind, &owner.pubkey(), mint).unwrap()],
        &[&owner],
    )
    .await
}

async fn setup_fees_feature(context: &mut ProgramTestContext, minter: &Keypair) -> FeesFeature {
    let tiers = create_mints(context, &minter.pubkey(), 8).await;
    let shard_mint = create_mint(context, &FeatureKind::Fees.find_pda().0, 0).await;
    let feature = FeesFeature {
        admin_destination: Keypair::new().pubkey(),
        shard_mint,
        mint_burn_1: tiers[0],
        mint_burn_2: tiers[1],
        mint_burn_3: tiers[2],
        mint_burn_4: tiers[3],
        mint_burn_5: tiers[4],
        mint_skill_1: tiers[5],
        mint_skill_2: tiers[6],
        mint_skill_3: tiers[7],
    };
    set_feature(context, Feature::Fees(feature)).await;
    feature
}

async fn setup_wisdom_feature(context: &mut ProgramTestContext, minter: &Keypair) -> WisdomFeature {
    let tiers = create_mints(context, &minter.pubkey(), 2).await;
    let experience_mint = create_mint(context, &FeatureKind::Wisdom.find_pda().0, 0).await;
    let feature = WisdomFeature {
        experience_mint,
        mint_burn_1: tiers[0],
        mint_burn_2: tiers[1],
    };
    set_feature(context, Feature::Wisdom(feature)).await;
    feature
}

async fn setup_max_supply_feature(
    context: &mut ProgramTestContext,
    minter: &Keypair,
) -> MaxSupplyFeature {
    let tiers = create_mints(context, &minter.pubkey(), 2).await;
    let feature = MaxSupplyFeature {
        mint_burn_1: tiers[0],
        mint_skill_1: tiers[1],
    };
    set_feature(context, Feature::MaxSupply(feature)).await;
    feature
}

async fn setup_additional_outputs_feature(
    context: &mut ProgramTestContext,
    minter: &Keypair,
) -> AdditionalOutputsFeature {
    let tiers = create_mints(context, &minter.pubkey(), 5).await;
    let feature = AdditionalOutputsFeature {
        mint_burn_1: tiers[0],
        mint_burn_2: tiers[1],
        mint_burn_3: tiers[2],
        mint_skill_1: tiers[3],
        mint_skill_2: tiers[4],
    };
    set_feature(context, Feature::AdditionalOutputs(feature)).await;
    feature
}

async fn setup_transfer_inputs_feature(
    context: &mut ProgramTestContext,
    minter: &Keypair,
) -> TransferInputsFeature {
    let tiers = create_mints(context, &minter.pubkey(), 5).await;
    let feature = TransferInputsFeature {
        mint_burn_1: tiers[0],
        mint_burn_2: tiers[1],
        mint_burn_3: tiers[2],
        mint_skill_1: tiers[3],
        mint_skill_2: tiers[4],
    };
    set_feature(context, Feature::TransferInputs(feature)).await;
    feature
}

async fn setup_sol_payment_feature(
    context: &mut ProgramTestContext,
    minter: &Keypair,
) -> SolPaymentFeature {
    let tiers = create_mints(context, &minter.pubkey(), 14).await;
    let feature = SolPaymentFeature {
        mint_burn_1: tiers[0],
        mint_burn_2: tiers[1],
        mint_burn_3: tiers[2],
        mint_burn_4: tiers[3],
        mint_burn_5: tiers[4],
        mint_burn_6: tiers[5],
        mint_burn_7: tiers[6],
        mint_burn_8: tiers[7],
        mint_burn_9: tiers[8],
        mint_skill_1: tiers[9],
        mint_skill_2: tiers[10],
        mint_skill_3: tiers[11],
        mint_skill_4: tiers[12],
        mint_skill_5: tiers[13],
    };
    set_feature(context, Feature::SolPayment(feature)).await;
    feature
}

/// Inputs [Burn 2 A, Burn 7 B], output [Mint 1 C], active.
/// The crafter holds 100 A and 100 B.
async fn scenario_recipe(context: &mut ProgramTestContext) -> (TestRecipe, Keypair, [Pubkey; 3]) {
    let recipe = create_recipe(context).await;
    let minter = Keypair::new();
    let mint_a = create_mint(context, &minter.pubkey(), 0).await;
    let mint_b = create_mint(context, &minter.pubkey(), 0).await;
    let mint_c = create_mint(context, &recipe.authority.pubkey(), 0).await;

    add_ingredient(context, &recipe, &mint_a, IngredientType::BurnTokenInput, 2, None, None)
        .await
        .unwrap();
    add_ingredient(context, &recipe, &mint_b, IngredientType::BurnTokenInput, 7, None, None)
        .await
        .unwrap();
    add_ingredient(context, &recipe, &mint_c, IngredientType::MintTokenOutput, 1, None, None)
        .await
        .unwrap();
    activate(context, &recipe).await;

    let crafter = Keypair::new();
    give_tokens(context, &mint_a, &minter, &crafter.pubkey(), 100).await;
    give_tokens(context, &mint_b, &minter, &crafter.pubkey(), 100).await;

    (recipe, crafter, [mint_a, mint_b, mint_c])
}

// =============================================================================
// RECIPE LIFECYCLE TESTS
// =============================================================================

#[tokio::test]
async fn test_create_recipe() {
    let mut context = program_test().start_with_context().await;
    let recipe = create_recipe(&mut context).await;

    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.authority, recipe.authority.pubkey());
    assert_eq!(state.status, RecipeStatus::Paused);
    assert!(state.inputs.is_empty() && state.outputs.is_empty());
    assert_eq!(state.fees, 0);
    assert_eq!(state.total_crafts, 0);

    let rent = minimum_balance(&mut context, Recipe::HEADER_LEN).await;
    assert_eq!(lamports(&mut context, &recipe.address).await, rent);
}

#[tokio::test]
async fn test_create_recipe_twice_fails() {
    let mut context = program_test().start_with_context().await;
    let base = Keypair::new();
    let payer = context.payer.pubkey();

    process(
        &mut context,
        &[instruction::create_recipe(&base.pubkey(), &payer, &payer).unwrap()],
        &[&base],
    )
    .await
    .unwrap();

    let other_authority = Keypair::new().pubkey();
    let result = process(
        &mut context,
        &[instruction::create_recipe(&base.pubkey(), &other_authority, &payer).unwrap()],
        &[&base],
    )
    .await;
    assert_custom_error(result, TokenRecipesError::ExpectedEmptyAccount);
}

#[tokio::test]
async fn test_create_recipe_on_prefunded_address() {
    let mut context = program_test().start_with_context().await;
    let base = Keypair::new();
    let authority = Keypair::new().pubkey();
    let address = Recipe::find_pda(&base.pubkey()).0;

    // Anyone can send lamports to the future recipe address
    fund(&mut context, &address, 1_000_000).await;

    let payer = context.payer.pubkey();
    process(
        &mut context,
        &[instruction::create_recipe(&base.pubkey(), &authority, &payer).unwrap()],
        &[&base],
    )
    .await
    .unwrap();

    let state = get_recipe(&mut context, &address).await;
    assert_eq!(state.authority, authority);
    assert_eq!(state.status, RecipeStatus::Paused);
    let rent = minimum_balance(&mut context, Recipe::HEADER_LEN).await;
    assert_eq!(lamports(&mut context, &address).await, rent.max(1_000_000));
}

#[tokio::test]
async fn test_activate_and_pause_recipe() {
    let mut context = program_test().start_with_context().await;
    let recipe = create_recipe(&mut context).await;

    activate(&mut context, &recipe).await;
    let state = get_recipe(&mut context, &recipe.address).await;
    assert!(state.is_active());

    process(
        &mut context,
        &[instruction::pause_recipe(&recipe.address, &recipe.authority.pubkey()).unwrap()],
        &[&recipe.authority],
    )
    .await
    .unwrap();
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.status, RecipeStatus::Paused);

    // Someone else cannot flip the status
    let intruder = Keypair::new();
    let result = process(
        &mut context,
        &[instruction::activate_recipe(&recipe.address, &intruder.pubkey()).unwrap()],
        &[&intruder],
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidAuthority);
}

// =============================================================================
// INGREDIENT TESTS
// =============================================================================

#[tokio::test]
async fn test_add_ingredient_grows_recipe() {
    let mut context = program_test().start_with_context().await;
    let recipe = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;

    add_ingredient(&mut context, &recipe, &mint, IngredientType::BurnTokenInput, 3, None, None)
        .await
        .unwrap();

    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.inputs.len(), 1);
    assert_eq!(state.inputs[0].mint(), Some(mint));
    assert_eq!(state.inputs[0].amount(), 3);

    let rent = minimum_balance(&mut context, state.data_len()).await;
    assert_eq!(lamports(&mut context, &recipe.address).await, rent);

    let record_address = IngredientRecord::find_pda(&mint, &recipe.address).0;
    let record: IngredientRecord = get_state(&mut context, &record_address).await;
    assert!(record.input);
    assert!(!record.output);
    assert_eq!(record.recipe, recipe.address);
}

#[tokio::test]
async fn test_add_ingredient_errors() {
    let mut context = program_test().start_with_context().await;
    let recipe = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;
    let other_mint = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;
    let foreign_mint = create_mint(&mut context, &Keypair::new().pubkey(), 0).await;

    // Zero amount
    let result =
        add_ingredient(&mut context, &recipe, &mint, IngredientType::BurnTokenInput, 0, None, None)
            .await;
    assert_custom_error(result, TokenRecipesError::InvalidAmount);

    // Duplicate input mint
    add_ingredient(&mut context, &recipe, &mint, IngredientType::BurnTokenInput, 1, None, None)
        .await
        .unwrap();
    let result =
        add_ingredient(&mut context, &recipe, &mint, IngredientType::BurnTokenInput, 2, None, None)
            .await;
    assert_custom_error(result, TokenRecipesError::IngredientAlreadyAdded);

    // Transfer input needs a destination, then the transfer inputs feature
    let result = add_ingredient(
        &mut context,
        &recipe,
        &other_mint,
        IngredientType::TransferTokenInput,
        1,
        None,
        None,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::MissingIngredientArgument);
    let result = add_ingredient(
        &mut context,
        &recipe,
        &other_mint,
        IngredientType::TransferTokenInput,
        1,
        Some(Keypair::new().pubkey()),
        None,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidTransferInputsFeature);

    // SOL payments need the sol payment feature
    let destination = Keypair::new().pubkey();
    let result = add_ingredient(
        &mut context,
        &recipe,
        &destination,
        IngredientType::TransferSolInput,
        1_000,
        Some(destination),
        None,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidSolPaymentFeature);

    // Capped outputs need the max supply feature
    let result = add_ingredient(
        &mut context,
        &recipe,
        &other_mint,
        IngredientType::MintTokenWithMaxSupplyOutput,
        1,
        None,
        Some(10),
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidMaxSupplyFeature);

    // Outputs need the mint authority
    let result = add_ingredient(
        &mut context,
        &recipe,
        &foreign_mint,
        IngredientType::MintTokenOutput,
        1,
        None,
        None,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidMintAuthority);

    // A second output needs the additional outputs feature
    add_ingredient(&mut context, &recipe, &mint, IngredientType::MintTokenOutput, 1, None, None)
        .await
        .unwrap();
    let result = add_ingredient(
        &mut context,
        &recipe,
        &other_mint,
        IngredientType::MintTokenOutput,
        1,
        None,
        None,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidAdditionalOutputsFeature);

    // The same mint may be an input and an output, but only once each
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.inputs.len(), 1);
    assert_eq!(state.outputs.len(), 1);
}

#[tokio::test]
async fn test_remove_ingredient_lifecycle() {
    let mut context = program_test().start_with_context().await;
    let recipe = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;
    let record_address = IngredientRecord::find_pda(&mint, &recipe.address).0;
    let delegated_address = DelegatedIngredient::find_pda(&mint).0;

    add_ingredient(&mut context, &recipe, &mint, IngredientType::BurnTokenInput, 1, None, None)
        .await
        .unwrap();
    add_ingredient(&mut context, &recipe, &mint, IngredientType::MintTokenOutput, 1, None, None)
        .await
        .unwrap();

    let record: IngredientRecord = get_state(&mut context, &record_address).await;
    assert!(record.input && record.output);
    let mint_state = get_mint(&mut context, &mint).await;
    assert_eq!(mint_state.mint_authority, COption::Some(delegated_address));

    // Removing the input keeps the record alive for the output
    remove_ingredient(&mut context, &recipe, &mint, IngredientType::BurnTokenInput)
        .await
        .unwrap();
    let record: IngredientRecord = get_state(&mut context, &record_address).await;
    assert!(!record.input && record.output);

    // Removing the output closes everything and restores the mint authority
    remove_ingredient(&mut context, &recipe, &mint, IngredientType::MintTokenOutput)
        .await
        .unwrap();
    assert!(!account_exists(&mut context, &record_address).await);
    assert!(!account_exists(&mut context, &delegated_address).await);
    let mint_state = get_mint(&mut context, &mint).await;
    assert_eq!(
        mint_state.mint_authority,
        COption::Some(recipe.authority.pubkey())
    );

    let state = get_recipe(&mut context, &recipe.address).await;
    assert!(!state.has_ingredients());
    let rent = minimum_balance(&mut context, Recipe::HEADER_LEN).await;
    assert_eq!(lamports(&mut context, &recipe.address).await, rent);

    // Nothing left to remove
    context.get_new_latest_blockhash().await.unwrap();
    let result =
        remove_ingredient(&mut context, &recipe, &mint, IngredientType::BurnTokenInput).await;
    assert_custom_error(result, TokenRecipesError::MissingIngredient);
}

#[tokio::test]
async fn test_delegated_ingredient_is_shared_across_recipes() {
    let mut context = program_test().start_with_context().await;
    let first = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &first.authority.pubkey(), 0).await;
    let delegated_address = DelegatedIngredient::find_pda(&mint).0;

    // A second recipe of the same authority
    let base = Keypair::new();
    let payer = context.payer.pubkey();
    process(
        &mut context,
        &[instruction::create_recipe(&base.pubkey(), &first.authority.pubkey(), &payer).unwrap()],
        &[&base],
    )
    .await
    .unwrap();
    let second = TestRecipe {
        address: Recipe::find_pda(&base.pubkey()).0,
        authority: Keypair::from_bytes(&first.authority.to_bytes()).unwrap(),
    };

    add_ingredient(&mut context, &first, &mint, IngredientType::MintTokenOutput, 1, None, None)
        .await
        .unwrap();
    add_ingredient(&mut context, &second, &mint, IngredientType::MintTokenOutput, 2, None, None)
        .await
        .unwrap();
    let delegated: DelegatedIngredient = get_state(&mut context, &delegated_address).await;
    assert_eq!(delegated.counter, 2);
    assert_eq!(delegated.authority, first.authority.pubkey());

    // Another authority cannot list a mint it did not delegate
    let stranger = create_recipe(&mut context).await;
    let result =
        add_ingredient(&mut context, &stranger, &mint, IngredientType::MintTokenOutput, 1, None, None)
            .await;
    assert_custom_error(result, TokenRecipesError::InvalidMintAuthority);

    remove_ingredient(&mut context, &first, &mint, IngredientType::MintTokenOutput)
        .await
        .unwrap();
    let delegated: DelegatedIngredient = get_state(&mut context, &delegated_address).await;
    assert_eq!(delegated.counter, 1);
    let mint_state = get_mint(&mut context, &mint).await;
    assert_eq!(mint_state.mint_authority, COption::Some(delegated_address));

    remove_ingredient(&mut context, &second, &mint, IngredientType::MintTokenOutput)
        .await
        .unwrap();
    assert!(!account_exists(&mut context, &delegated_address).await);
    let mint_state = get_mint(&mut context, &mint).await;
    assert_eq!(
        mint_state.mint_authority,
        COption::Some(first.authority.pubkey())
    );
}

#[tokio::test]
async fn test_add_output_on_prefunded_accounts() {
    let mut context = program_test().start_with_context().await;
    let recipe = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;
    let record_address = IngredientRecord::find_pda(&mint, &recipe.address).0;
    let delegated_address = DelegatedIngredient::find_pda(&mint).0;

    fund(&mut context, &record_address, 1_000_000).await;
    fund(&mut context, &delegated_address, 1_000_000).await;

    add_ingredient(&mut context, &recipe, &mint, IngredientType::MintTokenOutput, 1, None, None)
        .await
        .unwrap();

    let record: IngredientRecord = get_state(&mut context, &record_address).await;
    assert!(record.output);
    let delegated: DelegatedIngredient = get_state(&mut context, &delegated_address).await;
    assert_eq!(delegated.counter, 1);
    assert_eq!(delegated.authority, recipe.authority.pubkey());
    let mint_state = get_mint(&mut context, &mint).await;
    assert_eq!(mint_state.mint_authority, COption::Some(delegated_address));
}

#[tokio::test]
async fn test_remove_ingredient_refunds_payer() {
    let mut context = program_test().start_with_context().await;
    let recipe = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;
    let record_address = IngredientRecord::find_pda(&mint, &recipe.address).0;
    let delegated_address = DelegatedIngredient::find_pda(&mint).0;

    // The context payer funds every account
    add_ingredient(&mut context, &recipe, &mint, IngredientType::MintTokenOutput, 1, None, None)
        .await
        .unwrap();

    // Someone else pays for the removal and gets the rent back
    let remover = Keypair::new();
    fund(&mut context, &remover.pubkey(), LAMPORTS_PER_SOL).await;
    let freed = lamports(&mut context, &record_address).await
        + lamports(&mut context, &delegated_address).await
        + lamports(&mut context, &recipe.address).await
        - minimum_balance(&mut context, Recipe::HEADER_LEN).await;

    process(
        &mut context,
        &[instruction::remove_ingredient(
            &recipe.address,
            &mint,
            &recipe.authority.pubkey(),
            &remover.pubkey(),
            IngredientType::MintTokenOutput,
        )
        .unwrap()],
        &[&recipe.authority, &remover],
    )
    .await
    .unwrap();

    assert!(!account_exists(&mut context, &record_address).await);
    assert!(!account_exists(&mut context, &delegated_address).await);
    assert_eq!(
        lamports(&mut context, &remover.pubkey()).await,
        LAMPORTS_PER_SOL + freed
    );
}

// =============================================================================
// CRAFT TESTS
// =============================================================================

#[tokio::test]
async fn test_craft_once() {
    let mut context = program_test().start_with_context().await;
    let (recipe, crafter, [mint_a, mint_b, mint_c]) = scenario_recipe(&mut context).await;

    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();

    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint_a).await, 98);
    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint_b).await, 93);
    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint_c).await, 1);

    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.total_crafts, 1);
    assert_eq!(state.total_crafts_with_quantity, 1);
}

#[tokio::test]
async fn test_craft_with_quantity() {
    let mut context = program_test().start_with_context().await;
    let (recipe, crafter, [mint_a, mint_b, mint_c]) = scenario_recipe(&mut context).await;

    craft(&mut context, &recipe.address, &crafter, 14)
        .await
        .unwrap();

    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint_a).await, 72);
    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint_b).await, 2);
    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint_c).await, 14);

    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.total_crafts, 1);
    assert_eq!(state.total_crafts_with_quantity, 14);

    // 15 more would need 105 B
    let result = craft(&mut context, &recipe.address, &crafter, 15).await;
    assert_custom_error(result, TokenRecipesError::NotEnoughTokens);
}

#[tokio::test]
async fn test_craft_requires_active_recipe_and_quantity() {
    let mut context = program_test().start_with_context().await;
    let (recipe, crafter, _) = scenario_recipe(&mut context).await;

    let result = craft(&mut context, &recipe.address, &crafter, 0).await;
    assert_custom_error(result, TokenRecipesError::InvalidAmount);

    process(
        &mut context,
        &[instruction::pause_recipe(&recipe.address, &recipe.authority.pubkey()).unwrap()],
        &[&recipe.authority],
    )
    .await
    .unwrap();
    let result = craft(&mut context, &recipe.address, &crafter, 1).await;
    assert_custom_error(result, TokenRecipesError::RecipeIsNotActive);
}

#[tokio::test]
async fn test_craft_with_missing_accounts_fails() {
    let mut context = program_test().start_with_context().await;
    let (recipe, crafter, _) = scenario_recipe(&mut context).await;

    let state = get_recipe(&mut context, &recipe.address).await;
    let payer = context.payer.pubkey();
    let mut craft_ix =
        instruction::craft(&recipe.address, &state, &crafter.pubkey(), &payer, 1).unwrap();
    craft_ix.accounts.truncate(8);

    let result = process(&mut context, &[craft_ix], &[&crafter]).await;
    assert_eq!(
        result.unwrap_err().unwrap(),
        TransactionError::InstructionError(0, InstructionError::NotEnoughAccountKeys)
    );
}

#[tokio::test]
async fn test_craft_capped_output_stops_at_max_supply() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let max_supply = setup_max_supply_feature(&mut context, &minter).await;

    let recipe = create_recipe(&mut context).await;
    let mint_a = create_mint(&mut context, &minter.pubkey(), 0).await;
    let capped = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;
    give_tokens(&mut context, &capped, &recipe.authority, &Keypair::new().pubkey(), 90).await;

    unlock(
        &mut context,
        &recipe.address,
        FeatureKind::MaxSupply,
        &minter,
        &max_supply.mint_burn_1,
    )
    .await
    .unwrap();
    add_ingredient(&mut context, &recipe, &mint_a, IngredientType::BurnTokenInput, 1, None, None)
        .await
        .unwrap();
    add_ingredient(
        &mut context,
        &recipe,
        &capped,
        IngredientType::MintTokenWithMaxSupplyOutput,
        6,
        None,
        Some(100),
    )
    .await
    .unwrap();
    activate(&mut context, &recipe).await;

    let crafter = Keypair::new();
    give_tokens(&mut context, &mint_a, &minter, &crafter.pubkey(), 10).await;

    // 90 + 12 > 100, nothing changes
    let result = craft(&mut context, &recipe.address, &crafter, 2).await;
    assert_custom_error(result, TokenRecipesError::MaximumSupplyReached);
    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint_a).await, 10);
    assert_eq!(get_mint(&mut context, &capped).await.supply, 90);
    assert_eq!(get_recipe(&mut context, &recipe.address).await.total_crafts, 0);

    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();
    assert_eq!(get_mint(&mut context, &capped).await.supply, 96);
    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &capped).await, 6);
}

#[tokio::test]
async fn test_craft_transfer_token_input() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let transfer_inputs = setup_transfer_inputs_feature(&mut context, &minter).await;

    let recipe = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &minter.pubkey(), 0).await;
    let destination = Keypair::new().pubkey();

    unlock(
        &mut context,
        &recipe.address,
        FeatureKind::TransferInputs,
        &minter,
        &transfer_inputs.mint_burn_1,
    )
    .await
    .unwrap();
    add_ingredient(
        &mut context,
        &recipe,
        &mint,
        IngredientType::TransferTokenInput,
        5,
        Some(destination),
        None,
    )
    .await
    .unwrap();
    activate(&mut context, &recipe).await;

    let crafter = Keypair::new();
    give_tokens(&mut context, &mint, &minter, &crafter.pubkey(), 20).await;

    // The destination has no token account yet, craft creates it
    craft(&mut context, &recipe.address, &crafter, 2)
        .await
        .unwrap();
    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint).await, 10);
    assert_eq!(token_balance(&mut context, &destination, &mint).await, 10);
}

#[tokio::test]
async fn test_craft_transfer_token_checks_destination_account() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let transfer_inputs = setup_transfer_inputs_feature(&mut context, &minter).await;

    let recipe = create_recipe(&mut context).await;
    let mint = create_mint(&mut context, &minter.pubkey(), 0).await;
    let destination = Keypair::new().pubkey();
    unlock(
        &mut context,
        &recipe.address,
        FeatureKind::TransferInputs,
        &minter,
        &transfer_inputs.mint_burn_1,
    )
    .await
    .unwrap();
    add_ingredient(
        &mut context,
        &recipe,
        &mint,
        IngredientType::TransferTokenInput,
        5,
        Some(destination),
        None,
    )
    .await
    .unwrap();
    activate(&mut context, &recipe).await;

    let crafter = Keypair::new();
    give_tokens(&mut context, &mint, &minter, &crafter.pubkey(), 20).await;
    let stranger = Keypair::new().pubkey();
    let stranger_token = give_tokens(&mut context, &mint, &minter, &stranger, 1).await;

    let state = get_recipe(&mut context, &recipe.address).await;
    let payer = context.payer.pubkey();
    let craft_with_destination_token = |token: Pubkey| {
        let mut craft_ix =
            instruction::craft(&recipe.address, &state, &crafter.pubkey(), &payer, 1).unwrap();
        // [6 fixed] mint, owner token, destination, destination token
        craft_ix.accounts[9].pubkey = token;
        craft_ix
    };

    // A missing account that is not the destination's associated account
    let result = process(
        &mut context,
        &[craft_with_destination_token(Keypair::new().pubkey())],
        &[&crafter],
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidPda);

    // An existing token account of another wallet
    let result = process(
        &mut context,
        &[craft_with_destination_token(stranger_token)],
        &[&crafter],
    )
    .await;
    assert_custom_error(result, TokenRecipesError::AccountMismatch);

    assert_eq!(token_balance(&mut context, &crafter.pubkey(), &mint).await, 20);
    assert_eq!(token_balance(&mut context, &stranger, &mint).await, 1);
    assert_eq!(get_recipe(&mut context, &recipe.address).await.total_crafts, 0);
}

#[tokio::test]
async fn test_craft_transfer_sol_input() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let sol_payment = setup_sol_payment_feature(&mut context, &minter).await;

    let recipe = create_recipe(&mut context).await;
    let destination = Keypair::new().pubkey();
    unlock(
        &mut context,
        &recipe.address,
        FeatureKind::SolPayment,
        &minter,
        &sol_payment.mint_burn_1,
    )
    .await
    .unwrap();

    // Level 1 allows at most 1 SOL per craft
    let result = add_ingredient(
        &mut context,
        &recipe,
        &destination,
        IngredientType::TransferSolInput,
        2 * LAMPORTS_PER_SOL,
        Some(destination),
        None,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidSolPaymentFeature);

    add_ingredient(
        &mut context,
        &recipe,
        &destination,
        IngredientType::TransferSolInput,
        LAMPORTS_PER_SOL / 2,
        Some(destination),
        None,
    )
    .await
    .unwrap();

    // Only one SOL payment per recipe
    let result = add_ingredient(
        &mut context,
        &recipe,
        &destination,
        IngredientType::TransferSolInput,
        LAMPORTS_PER_SOL / 4,
        Some(destination),
        None,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::IngredientAlreadyAdded);

    activate(&mut context, &recipe).await;
    let crafter = Keypair::new();
    craft(&mut context, &recipe.address, &crafter, 2)
        .await
        .unwrap();
    assert_eq!(lamports(&mut context, &destination).await, LAMPORTS_PER_SOL);
}

// =============================================================================
// ECONOMICS TESTS
// =============================================================================

#[tokio::test]
async fn test_craft_fees_split_by_fees_level() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let fees = setup_fees_feature(&mut context, &minter).await;
    let (recipe, crafter, _) = scenario_recipe(&mut context).await;

    // Level 0: one base fee whatever the quantity, all of it for the admin
    let before = lamports(&mut context, &recipe.address).await;
    craft(&mut context, &recipe.address, &crafter, 3)
        .await
        .unwrap();
    assert_eq!(lamports(&mut context, &recipe.address).await, before + BASE_FEES);
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.accumulated_admin_fees, BASE_FEES);
    assert_eq!(state.accumulated_shards, 0);

    // Level 1: 90% admin, 10% shards
    unlock(&mut context, &recipe.address, FeatureKind::Fees, &minter, &fees.mint_burn_1)
        .await
        .unwrap();
    assert_eq!(get_recipe(&mut context, &recipe.address).await.feature_levels.fees, 1);
    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.accumulated_admin_fees, BASE_FEES + 18_000_000);
    assert_eq!(state.accumulated_shards, 2_000_000);
}

#[tokio::test]
async fn test_experience_accumulates_per_craft() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let wisdom = setup_wisdom_feature(&mut context, &minter).await;
    let (recipe, crafter, _) = scenario_recipe(&mut context).await;

    unlock(&mut context, &recipe.address, FeatureKind::Wisdom, &minter, &wisdom.mint_burn_1)
        .await
        .unwrap();

    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();
    assert_eq!(
        get_recipe(&mut context, &recipe.address).await.accumulated_experience,
        125
    );
    craft(&mut context, &recipe.address, &crafter, 2)
        .await
        .unwrap();
    assert_eq!(
        get_recipe(&mut context, &recipe.address).await.accumulated_experience,
        250
    );
}

#[tokio::test]
async fn test_set_fees() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let fees = setup_fees_feature(&mut context, &minter).await;
    let (recipe, crafter, _) = scenario_recipe(&mut context).await;

    let result = process(
        &mut context,
        &[instruction::set_fees(&recipe.address, &recipe.authority.pubkey(), 5_000_000).unwrap()],
        &[&recipe.authority],
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidFeesFeature);

    // Jump straight to level 10, the base fees become the custom fees
    unlock(&mut context, &recipe.address, FeatureKind::Fees, &minter, &fees.mint_burn_4)
        .await
        .unwrap();
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.feature_levels.fees, 10);
    assert_eq!(state.fees, BASE_FEES);

    context.get_new_latest_blockhash().await.unwrap();
    process(
        &mut context,
        &[instruction::set_fees(&recipe.address, &recipe.authority.pubkey(), 5_000_000).unwrap()],
        &[&recipe.authority],
    )
    .await
    .unwrap();

    // A quarter of the base fees earns a quarter of the experience
    let before = lamports(&mut context, &recipe.address).await;
    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();
    assert_eq!(lamports(&mut context, &recipe.address).await, before + 5_000_000);
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.accumulated_admin_fees, 0);
    assert_eq!(state.accumulated_shards, 5_000_000);
    assert_eq!(state.accumulated_experience, 25);

    // Level 11: no admin share and no shards
    unlock(&mut context, &recipe.address, FeatureKind::Fees, &minter, &fees.mint_burn_5)
        .await
        .unwrap();
    craft(&mut context, &recipe.address, &crafter, 2)
        .await
        .unwrap();
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.accumulated_admin_fees, 0);
    assert_eq!(state.accumulated_shards, 5_000_000);
    assert_eq!(state.accumulated_experience, 50);
}

#[tokio::test]
async fn test_collect_fees_and_experience() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let fees = setup_fees_feature(&mut context, &minter).await;
    let wisdom = setup_wisdom_feature(&mut context, &minter).await;
    let (recipe, crafter, _) = scenario_recipe(&mut context).await;
    let authority = recipe.authority.pubkey();

    unlock(&mut context, &recipe.address, FeatureKind::Fees, &minter, &fees.mint_burn_1)
        .await
        .unwrap();
    unlock(&mut context, &recipe.address, FeatureKind::Wisdom, &minter, &wisdom.mint_burn_1)
        .await
        .unwrap();
    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();

    let authority_before = lamports(&mut context, &authority).await;
    process(
        &mut context,
        &[instruction::collect_fees(
            &recipe.address,
            &authority,
            &fees.admin_destination,
            &fees.shard_mint,
        )
        .unwrap()],
        &[&recipe.authority],
    )
    .await
    .unwrap();

    // 90% to the admin, shards for the 10%, the 10% lamports to the authority
    assert_eq!(
        lamports(&mut context, &fees.admin_destination).await,
        18_000_000
    );
    assert_eq!(
        token_balance(&mut context, &authority, &fees.shard_mint).await,
        2_000_000
    );
    let token_rent = minimum_balance(&mut context, TokenAccount::LEN).await;
    assert_eq!(
        lamports(&mut context, &authority).await,
        authority_before + 2_000_000 - token_rent
    );
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.accumulated_admin_fees, 0);
    assert_eq!(state.accumulated_shards, 0);
    let recipe_rent = minimum_balance(&mut context, state.data_len()).await;
    assert_eq!(lamports(&mut context, &recipe.address).await, recipe_rent);

    process(
        &mut context,
        &[
            instruction::collect_experience(&recipe.address, &authority, &wisdom.experience_mint)
                .unwrap(),
        ],
        &[&recipe.authority],
    )
    .await
    .unwrap();
    assert_eq!(
        token_balance(&mut context, &authority, &wisdom.experience_mint).await,
        125
    );
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.accumulated_experience, 0);
}

#[tokio::test]
async fn test_collect_fees_checks_admin_destination() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let fees = setup_fees_feature(&mut context, &minter).await;
    let (recipe, crafter, _) = scenario_recipe(&mut context).await;
    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();

    let result = process(
        &mut context,
        &[instruction::collect_fees(
            &recipe.address,
            &recipe.authority.pubkey(),
            &Keypair::new().pubkey(),
            &fees.shard_mint,
        )
        .unwrap()],
        &[&recipe.authority],
    )
    .await;
    assert_custom_error(result, TokenRecipesError::AccountMismatch);
}

#[tokio::test]
async fn test_delete_recipe() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let fees = setup_fees_feature(&mut context, &minter).await;
    let wisdom = setup_wisdom_feature(&mut context, &minter).await;
    let (recipe, crafter, [mint_a, mint_b, mint_c]) = scenario_recipe(&mut context).await;
    let authority = recipe.authority.pubkey();
    craft(&mut context, &recipe.address, &crafter, 1)
        .await
        .unwrap();

    let delete_ix = instruction::delete_recipe(
        &recipe.address,
        &authority,
        &fees.admin_destination,
        &fees.shard_mint,
        &wisdom.experience_mint,
    )
    .unwrap();

    let result = process(&mut context, &[delete_ix.clone()], &[&recipe.authority]).await;
    assert_custom_error(result, TokenRecipesError::RecipeMustBeEmptyBeforeItCanBeDeleted);

    remove_ingredient(&mut context, &recipe, &mint_a, IngredientType::BurnTokenInput)
        .await
        .unwrap();
    remove_ingredient(&mut context, &recipe, &mint_b, IngredientType::BurnTokenInput)
        .await
        .unwrap();
    remove_ingredient(&mut context, &recipe, &mint_c, IngredientType::MintTokenOutput)
        .await
        .unwrap();

    // Refresh the blockhash so the retry is a new transaction
    context.get_new_latest_blockhash().await.unwrap();
    process(&mut context, &[delete_ix], &[&recipe.authority])
        .await
        .unwrap();

    assert!(!account_exists(&mut context, &recipe.address).await);
    assert_eq!(
        lamports(&mut context, &fees.admin_destination).await,
        BASE_FEES
    );
    assert_eq!(
        token_balance(&mut context, &authority, &wisdom.experience_mint).await,
        100
    );
}

// =============================================================================
// FEATURE TESTS
// =============================================================================

#[tokio::test]
async fn test_admin_set_feature() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let wisdom = setup_wisdom_feature(&mut context, &minter).await;
    let address = FeatureKind::Wisdom.find_pda().0;
    let stored: WisdomFeature = get_state(&mut context, &address).await;
    assert_eq!(stored, wisdom);

    // The admin may overwrite it
    let updated = WisdomFeature {
        mint_burn_2: Keypair::new().pubkey(),
        ..wisdom
    };
    set_feature(&mut context, Feature::Wisdom(updated)).await;
    let stored: WisdomFeature = get_state(&mut context, &address).await;
    assert_eq!(stored, updated);

    // Nobody else may
    let intruder = Keypair::new();
    let payer = context.payer.pubkey();
    let result = process(
        &mut context,
        &[instruction::admin_set_feature(&intruder.pubkey(), &payer, Feature::Wisdom(wisdom))
            .unwrap()],
        &[&intruder],
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidAdmin);
}

#[tokio::test]
async fn test_unlock_feature_errors() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let fees = setup_fees_feature(&mut context, &minter).await;
    let max_supply = setup_max_supply_feature(&mut context, &minter).await;
    let recipe = create_recipe(&mut context).await;

    // A mint that is not a tier of the feature
    let random_mint = create_mint(&mut context, &minter.pubkey(), 0).await;
    let result = unlock(&mut context, &recipe.address, FeatureKind::Fees, &minter, &random_mint).await;
    assert_custom_error(result, TokenRecipesError::InvalidMintToLevelUpFeature);

    // A tier of another feature
    let result = unlock(
        &mut context,
        &recipe.address,
        FeatureKind::Fees,
        &minter,
        &max_supply.mint_burn_1,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::InvalidMintToLevelUpFeature);

    // A tier that no longer applies at the current level
    unlock(&mut context, &recipe.address, FeatureKind::Fees, &minter, &fees.mint_burn_1)
        .await
        .unwrap();
    let result =
        unlock(&mut context, &recipe.address, FeatureKind::Fees, &minter, &fees.mint_burn_1).await;
    assert_custom_error(result, TokenRecipesError::InvalidMintToLevelUpFeature);

    // Already at the top
    unlock(
        &mut context,
        &recipe.address,
        FeatureKind::MaxSupply,
        &minter,
        &max_supply.mint_burn_1,
    )
    .await
    .unwrap();
    let result = unlock(
        &mut context,
        &recipe.address,
        FeatureKind::MaxSupply,
        &minter,
        &max_supply.mint_skill_1,
    )
    .await;
    assert_custom_error(result, TokenRecipesError::MaxFeatureLevelReached);
}

#[tokio::test]
async fn test_unlock_feature_tiers() {
    let mut context = program_test().start_with_context().await;
    let minter = Keypair::new();
    let additional_outputs = setup_additional_outputs_feature(&mut context, &minter).await;
    let recipe = create_recipe(&mut context).await;

    // A skill tier only needs to be held
    let owner = Keypair::new();
    give_tokens(
        &mut context,
        &additional_outputs.mint_skill_1,
        &minter,
        &owner.pubkey(),
        1,
    )
    .await;
    process(
        &mut context,
        &[instruction::unlock_feature(
            &recipe.address,
            FeatureKind::AdditionalOutputs,
            &owner.pubkey(),
            &additional_outputs.mint_skill_1,
        )
        .unwrap()],
        &[&owner],
    )
    .await
    .unwrap();
    assert_eq!(
        token_balance(&mut context, &owner.pubkey(), &additional_outputs.mint_skill_1).await,
        1
    );
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.feature_levels.additional_outputs, 2);

    // A burn tier consumes its token
    let owner = Keypair::new();
    give_tokens(
        &mut context,
        &additional_outputs.mint_burn_3,
        &minter,
        &owner.pubkey(),
        1,
    )
    .await;
    process(
        &mut context,
        &[instruction::unlock_feature(
            &recipe.address,
            FeatureKind::AdditionalOutputs,
            &owner.pubkey(),
            &additional_outputs.mint_burn_3,
        )
        .unwrap()],
        &[&owner],
    )
    .await
    .unwrap();
    assert_eq!(
        token_balance(&mut context, &owner.pubkey(), &additional_outputs.mint_burn_3).await,
        0
    );
    let state = get_recipe(&mut context, &recipe.address).await;
    assert_eq!(state.feature_levels.additional_outputs, 3);

    // Level 3 lifts the output limit
    for _ in 0..4 {
        let output = create_mint(&mut context, &recipe.authority.pubkey(), 0).await;
        add_ingredient(&mut context, &recipe, &output, IngredientType::MintTokenOutput, 1, None, None)
            .await
            .unwrap();
    }
    assert_eq!(get_recipe(&mut context, &recipe.address).await.outputs.len(), 4);
}
