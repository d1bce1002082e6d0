use crate as pallet_lossless_controller;
use crate::{DenyReason, Error, RevealedKey, TokenLedger, TransferDecision, TransferGuard};
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
    PalletId,
};
use frame_system::EnsureRoot;
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, Hash, IdentityLookup},
    BuildStorage, DispatchError, DispatchResult,
};
use std::{cell::RefCell, collections::BTreeMap};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Timestamp: pallet_timestamp,
        LosslessController: pallet_lossless_controller,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = ConstU64<5>;
    type WeightInfo = ();
}

pub const ADMIN: u64 = 1;
pub const RECOVERY_ADMIN: u64 = 2;
pub const PAUSE_ADMIN: u64 = 3;
pub const TOKEN_ADMIN: u64 = 10;
pub const TOKEN_RECOVERY_ADMIN: u64 = 11;
pub const ALICE: u64 = 20;
pub const BOB: u64 = 21;
pub const CHARLIE: u64 = 22;
pub const OUTSIDER: u64 = 99;

/// Token registered at genesis.
pub const TOKEN: u32 = 7;
/// Token nobody registered.
pub const UNGOVERNED: u32 = 8;

pub const MAX_ADDRESSES: u32 = 16;

/// Genesis wall clock, in seconds.
pub const GENESIS_TIME: u64 = 1_700_000_000;

parameter_types! {
    pub const LosslessPalletId: PalletId = PalletId(*b"lss/ctrl");
}

thread_local! {
    static BALANCES: RefCell<BTreeMap<(u32, u64), u128>> = RefCell::new(BTreeMap::new());
}

/// Balances of every token, kept outside runtime storage.
///
/// [`MockLedger::transfer`] behaves like a guarded token: it asks the
/// controller first and refuses when told to. An IDO restriction moves no
/// funds but still succeeds, so the recipient's blacklisting is committed.
pub struct MockLedger;

impl MockLedger {
    pub fn set_balance(token: u32, who: u64, amount: u128) {
        BALANCES.with(|b| b.borrow_mut().insert((token, who), amount));
    }

    pub fn balance(token: u32, who: u64) -> u128 {
        BALANCES.with(|b| b.borrow().get(&(token, who)).copied().unwrap_or_default())
    }

    pub fn transfer(token: u32, from: u64, to: u64, amount: u128) -> DispatchResult {
        match LosslessController::before_transfer(&token, &from, &to, amount) {
            TransferDecision::Allow => {},
            decision if decision.must_commit() => return Ok(()),
            TransferDecision::Deny(reason) => return Err(Error::<Test>::from(reason).into()),
        }
        let from_balance = Self::balance(token, from);
        if from_balance < amount {
            return Err(DispatchError::Other("InsufficientBalance"));
        }
        Self::set_balance(token, from, from_balance - amount);
        Self::set_balance(token, to, Self::balance(token, to) + amount);
        Ok(())
    }

    fn reset() {
        BALANCES.with(|b| b.borrow_mut().clear());
    }
}

impl TokenLedger<u32, u64> for MockLedger {
    fn balance_of(token: &u32, who: &u64) -> u128 {
        Self::balance(*token, *who)
    }

    fn sweep(token: &u32, from: &[u64], destination: &u64) -> Result<u128, DispatchError> {
        let mut moved = 0;
        for who in from {
            let amount = Self::balance(*token, *who);
            Self::set_balance(*token, *who, 0);
            Self::set_balance(*token, *destination, Self::balance(*token, *destination) + amount);
            moved += amount;
        }
        Ok(moved)
    }
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u32> for MockBenchmarkHelper {
    fn token_id(seed: u32) -> u32 {
        seed
    }

    fn set_unix_time(seconds: u64) {
        Timestamp::set_timestamp(seconds * 1_000);
    }
}

impl pallet_lossless_controller::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type TokenId = u32;
    type Ledger = MockLedger;
    type UnixTime = Timestamp;
    type RegistrarOrigin = EnsureRoot<u64>;
    type PalletId = LosslessPalletId;
    type MaxAddresses = ConstU32<MAX_ADDRESSES>;
    type WeightInfo = ();
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper = MockBenchmarkHelper;
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_lossless_controller::GenesisConfig::<Test> {
        admin: Some(ADMIN),
        recovery_admin: Some(RECOVERY_ADMIN),
        pause_admin: Some(PAUSE_ADMIN),
        tokens: vec![(TOKEN, TOKEN_ADMIN, TOKEN_RECOVERY_ADMIN)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    MockLedger::reset();
    let mut ext: sp_io::TestExternalities = t.into();
    ext.execute_with(|| {
        System::set_block_number(1);
        Timestamp::set_timestamp(GENESIS_TIME * 1_000);
    });
    ext
}

/// Current wall clock in seconds.
pub fn now() -> u64 {
    Timestamp::get() / 1_000
}

pub fn advance_time(seconds: u64) {
    Timestamp::set_timestamp(Timestamp::get() + seconds * 1_000);
}

pub fn commitment(key: &[u8]) -> H256 {
    BlakeTwo256::hash(key)
}

/// The revealed form of a secret committed to with [`commitment`].
pub fn key(secret: &[u8]) -> RevealedKey {
    secret.to_vec().try_into().unwrap()
}

/// The controller's own account.
pub fn controller_account() -> u64 {
    LosslessController::account_id()
}

/// Proposes, confirms and starts an IDO on [`TOKEN`].
pub fn run_ido(duration: u64, whitelist: Vec<u64>) {
    use frame_support::assert_ok;

    assert_ok!(LosslessController::propose_ido_config(
        RuntimeOrigin::signed(TOKEN_ADMIN),
        TOKEN,
        duration,
        whitelist
    ));
    assert_ok!(LosslessController::set_ido_config_confirm(
        RuntimeOrigin::signed(ADMIN),
        TOKEN,
        true
    ));
    assert_ok!(LosslessController::start_ido(RuntimeOrigin::signed(TOKEN_ADMIN), TOKEN));
}

/// Starts an IDO and blacklists `accounts` within it, as the token admin.
pub fn blacklist(accounts: Vec<u64>) {
    use frame_support::assert_ok;

    run_ido(3_600, vec![ALICE]);
    assert_ok!(LosslessController::blacklist_addresses(
        RuntimeOrigin::signed(TOKEN_ADMIN),
        TOKEN,
        accounts
    ));
}

pub fn denied(reason: DenyReason) -> DispatchResult {
    Err(Error::<Test>::from(reason).into())
}
