#![cfg_attr(not(feature = "std"), no_std)]
// `RuntimeEvent` in pallet configs is deprecated upstream; kept until the runtime moves over.
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # Lossless controller
//!
//! Transfer-guard policy engine sitting between fungible-token ledgers and
//! their holders. It keeps, per governed token, a blacklist whose entries can
//! only be lifted by the token admin and the lossless admin together, a
//! time-boxed IDO whitelist window, and a timelocked switch that turns the
//! whole guard off. Controller-wide roles (admin, recovery admin, pause admin)
//! govern everything; recovery admins are handed over with commit-reveal.
//!
//! Ledgers call [`TransferGuard::before_transfer`] before moving funds and
//! must honor the verdict. Funds of blacklisted holders are recovered through
//! [`Pallet::transfer_out_blacklisted_funds`], which drives
//! [`TokenLedger::sweep`].

use frame_support::{
    dispatch::DispatchResult,
    ensure,
    pallet_prelude::*,
    traits::{EnsureOrigin, UnixTime},
    PalletId,
};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::{AccountIdConversion, Hash};
use sp_std::prelude::*;

pub use pallet::*;
pub use types::*;
pub use weights::WeightInfo;

pub mod types;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// Version reported to integrators.
pub const CONTROLLER_VERSION: u32 = 1;

pub const LOG_TARGET: &str = "runtime::lossless-controller";

pub type RoleSetOf<T> =
    RoleSet<<T as frame_system::Config>::AccountId, <T as frame_system::Config>::Hash>;
pub type TokenGovernanceOf<T> =
    TokenGovernance<<T as frame_system::Config>::AccountId, <T as frame_system::Config>::Hash>;

/// Runtime-side fixtures the benchmarks cannot produce generically.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<TokenId> {
    fn token_id(seed: u32) -> TokenId;

    /// Moves the clock read through `Config::UnixTime` to `seconds`.
    fn set_unix_time(seconds: u64);
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Identifier of a governed token.
        type TokenId: Parameter + Member + MaxEncodedLen + Copy + MaybeSerializeDeserialize;

        /// Ledger holding the balances of governed tokens.
        type Ledger: TokenLedger<Self::TokenId, Self::AccountId>;

        /// Clock used for timelocks and IDO windows.
        type UnixTime: UnixTime;

        /// Origin allowed to onboard and offboard tokens.
        type RegistrarOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// Derives the controller's own account, which also receives swept funds.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Upper bound on address batches and IDO whitelists.
        #[pallet::constant]
        type MaxAddresses: Get<u32>;

        type WeightInfo: WeightInfo;

        #[cfg(feature = "runtime-benchmarks")]
        type BenchmarkHelper: BenchmarkHelper<Self::TokenId>;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Controller-wide admin (the lossless admin) and recovery admin.
    #[pallet::storage]
    pub type ControllerRoles<T: Config> = StorageValue<_, RoleSetOf<T>, OptionQuery>;

    #[pallet::storage]
    pub type PauseAdmin<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::storage]
    pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

    /// Governance records of registered tokens.
    #[pallet::storage]
    pub type Tokens<T: Config> =
        StorageMap<_, Blake2_128Concat, T::TokenId, TokenGovernanceOf<T>, OptionQuery>;

    /// Blacklist flags and pending removal confirmations per (token, address).
    #[pallet::storage]
    pub type Blacklist<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::TokenId,
        Blake2_128Concat,
        T::AccountId,
        BlacklistEntry,
        OptionQuery,
    >;

    #[pallet::storage]
    pub type IdoConfigs<T: Config> =
        StorageMap<_, Blake2_128Concat, T::TokenId, IdoConfig<T>, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Guarded operations halted
        Paused { account: T::AccountId },
        /// Guarded operations resumed
        Unpaused { account: T::AccountId },
        AdminChanged { old: T::AccountId, new: T::AccountId },
        RecoveryAdminChanged { old: T::AccountId, new: T::AccountId },
        PauseAdminChanged { old: Option<T::AccountId>, new: T::AccountId },
        /// Controller recovery handover started; the commitment stays private
        RecoveryAdminChangeProposed { candidate: T::AccountId },
        TokenRegistered { token: T::TokenId, admin: T::AccountId, recovery_admin: T::AccountId },
        /// Governance and IDO config dropped; `blacklist_cleared` is false while
        /// blacklist entries remain for [`Pallet::purge_blacklist`]
        TokenDeregistered { token: T::TokenId, blacklist_cleared: bool },
        BlacklistPurged { token: T::TokenId, removed: u32, complete: bool },
        TokenAdminChanged { token: T::TokenId, old: T::AccountId, new: T::AccountId },
        TokenRecoveryAdminChanged { token: T::TokenId, old: T::AccountId, new: T::AccountId },
        TokenRecoveryAdminChangeProposed { token: T::TokenId, candidate: T::AccountId },
        LosslessTurnOffProposed { token: T::TokenId, executable_at: u64 },
        LosslessTurnedOff { token: T::TokenId },
        LosslessTurnedOn { token: T::TokenId },
        AddressesBlacklisted { token: T::TokenId, by: T::AccountId, addresses: Vec<T::AccountId> },
        BlacklistRemovalProposedByTokenAdmin { token: T::TokenId, addresses: Vec<T::AccountId> },
        BlacklistRemovalProposedByLosslessAdmin { token: T::TokenId, addresses: Vec<T::AccountId> },
        /// Both parties agreed and the address is no longer blacklisted
        AddressUnblacklisted { token: T::TokenId, account: T::AccountId },
        IdoProposed { token: T::TokenId, duration: u64 },
        IdoConfirmationSet { token: T::TokenId, confirmed: bool },
        IdoStarted { token: T::TokenId, start_time: u64 },
        /// Recipient outside the IDO whitelist got blacklisted by the guard
        IdoRecipientRestricted { token: T::TokenId, account: T::AccountId },
        BlacklistedFundsTransferredOut {
            token: T::TokenId,
            addresses: Vec<T::AccountId>,
            destination: T::AccountId,
            amount: u128,
        },
    }

    #[pallet::error]
    pub enum Error<T> {
        Unauthorized,
        Paused,
        NotPaused,
        AlreadyPaused,
        InvalidKey,
        MustBeCandidate,
        AlreadyProposed,
        NotProposed,
        TimelockActive,
        /// The controller's own account cannot be blacklisted
        InvalidTarget,
        ZeroDuration,
        DurationTooLong,
        EmptyWhitelist,
        AlreadyStarted,
        NotConfirmed,
        IdoNotStarted,
        IdoEnded,
        Blacklisted,
        IdoRestricted,
        NotBlacklisted,
        UnknownToken,
        TokenAlreadyRegistered,
        TooManyAddresses,
        /// Blacklist entries of an earlier registration are still being purged
        BlacklistNotPurged,
        /// Purging is only allowed once the token is deregistered
        TokenStillRegistered,
        NothingToPurge,
    }

    impl<T> From<PolicyError> for Error<T> {
        fn from(error: PolicyError) -> Self {
            match error {
                PolicyError::Unauthorized => Error::Unauthorized,
                PolicyError::MustBeCandidate => Error::MustBeCandidate,
                PolicyError::InvalidKey => Error::InvalidKey,
                PolicyError::AlreadyProposed => Error::AlreadyProposed,
                PolicyError::NotProposed => Error::NotProposed,
                PolicyError::TimelockActive => Error::TimelockActive,
            }
        }
    }

    impl<T> From<DenyReason> for Error<T> {
        fn from(reason: DenyReason) -> Self {
            match reason {
                DenyReason::Paused => Error::Paused,
                DenyReason::Blacklisted => Error::Blacklisted,
                DenyReason::IdoRestricted => Error::IdoRestricted,
            }
        }
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(T::MaxAddresses::get() > 0, "`MaxAddresses` must be greater than zero");
        }

        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_pause_admin(&who)?;
            ensure!(!Paused::<T>::get(), Error::<T>::AlreadyPaused);

            Paused::<T>::put(true);
            Self::deposit_event(Event::Paused { account: who });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_pause_admin(&who)?;
            ensure!(Paused::<T>::get(), Error::<T>::NotPaused);

            Paused::<T>::put(false);
            Self::deposit_event(Event::Unpaused { account: who });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_admin())]
        pub fn set_admin(origin: OriginFor<T>, new: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut roles = Self::controller_roles()?;
            roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
            Self::ensure_not_paused()?;

            let old = roles.replace_admin(new.clone());
            ControllerRoles::<T>::put(roles);
            Self::deposit_event(Event::AdminChanged { old, new });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_recovery_admin())]
        pub fn set_recovery_admin(origin: OriginFor<T>, new: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut roles = Self::controller_roles()?;
            roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
            Self::ensure_not_paused()?;

            let old = roles.replace_recovery_admin(new.clone());
            ControllerRoles::<T>::put(roles);
            Self::deposit_event(Event::RecoveryAdminChanged { old, new });
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_pause_admin())]
        pub fn set_pause_admin(origin: OriginFor<T>, new: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::controller_roles()?.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
            Self::ensure_not_paused()?;

            let old = PauseAdmin::<T>::get();
            PauseAdmin::<T>::put(&new);
            Self::deposit_event(Event::PauseAdminChanged { old, new });
            Ok(())
        }

        /// Starts handing the controller recovery role to `candidate`.
        ///
        /// `commitment` is the digest of a secret key the candidate reveals in
        /// [`Pallet::accept_recovery_admin_ownership`]. Works while paused.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::transfer_recovery_admin_ownership())]
        pub fn transfer_recovery_admin_ownership(
            origin: OriginFor<T>,
            candidate: T::AccountId,
            commitment: T::Hash,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut roles = Self::controller_roles()?;
            roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;

            roles.propose_recovery_admin(candidate.clone(), commitment);
            ControllerRoles::<T>::put(roles);
            Self::deposit_event(Event::RecoveryAdminChangeProposed { candidate });
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::accept_recovery_admin_ownership())]
        pub fn accept_recovery_admin_ownership(
            origin: OriginFor<T>,
            key: RevealedKey,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let key_digest = T::Hashing::hash(&key);
            let mut roles = ControllerRoles::<T>::get().ok_or(Error::<T>::MustBeCandidate)?;

            let old = roles.accept_recovery_admin(&who, &key_digest).map_err(Error::<T>::from)?;
            ControllerRoles::<T>::put(roles);
            Self::deposit_event(Event::RecoveryAdminChanged { old, new: who });
            Ok(())
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::register_token())]
        pub fn register_token(
            origin: OriginFor<T>,
            token: T::TokenId,
            admin: T::AccountId,
            recovery_admin: T::AccountId,
        ) -> DispatchResult {
            T::RegistrarOrigin::ensure_origin(origin)?;
            ensure!(!Tokens::<T>::contains_key(token), Error::<T>::TokenAlreadyRegistered);
            ensure!(!Self::has_blacklist_entries(&token), Error::<T>::BlacklistNotPurged);

            Tokens::<T>::insert(token, TokenGovernance::new(admin.clone(), recovery_admin.clone()));
            log::info!(target: LOG_TARGET, "token {token:?} registered");
            Self::deposit_event(Event::TokenRegistered { token, admin, recovery_admin });
            Ok(())
        }

        /// Drops the token's governance record and IDO config, and up to
        /// `MaxAddresses` of its blacklist entries. Whatever is left of the
        /// blacklist is removed with [`Pallet::purge_blacklist`].
        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::deregister_token(T::MaxAddresses::get()))]
        pub fn deregister_token(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            T::RegistrarOrigin::ensure_origin(origin)?;
            ensure!(Tokens::<T>::contains_key(token), Error::<T>::UnknownToken);

            Tokens::<T>::remove(token);
            IdoConfigs::<T>::remove(token);
            let (removed, blacklist_cleared) = Self::purge_blacklist_entries(&token);
            log::info!(
                target: LOG_TARGET,
                "token {token:?} deregistered, {removed} blacklist entries dropped, cleared: {blacklist_cleared}"
            );
            Self::deposit_event(Event::TokenDeregistered { token, blacklist_cleared });
            Ok(())
        }

        /// Replaces the token admin. Independent of the lossless switch.
        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::set_token_admin())]
        pub fn set_token_admin(
            origin: OriginFor<T>,
            token: T::TokenId,
            new: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let old = Self::mutate_token(&token, |governance| {
                governance.roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
                Ok(governance.roles.replace_admin(new.clone()))
            })?;
            Self::deposit_event(Event::TokenAdminChanged { token, old, new });
            Ok(())
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::set_token_recovery_admin())]
        pub fn set_token_recovery_admin(
            origin: OriginFor<T>,
            token: T::TokenId,
            new: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let old = Self::mutate_token(&token, |governance| {
                governance.roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
                Ok(governance.roles.replace_recovery_admin(new.clone()))
            })?;
            Self::deposit_event(Event::TokenRecoveryAdminChanged { token, old, new });
            Ok(())
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::transfer_token_recovery_admin_ownership())]
        pub fn transfer_token_recovery_admin_ownership(
            origin: OriginFor<T>,
            token: T::TokenId,
            candidate: T::AccountId,
            commitment: T::Hash,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::mutate_token(&token, |governance| {
                governance.roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
                governance.roles.propose_recovery_admin(candidate.clone(), commitment);
                Ok(())
            })?;
            Self::deposit_event(Event::TokenRecoveryAdminChangeProposed { token, candidate });
            Ok(())
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::accept_token_recovery_admin_ownership())]
        pub fn accept_token_recovery_admin_ownership(
            origin: OriginFor<T>,
            token: T::TokenId,
            key: RevealedKey,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let key_digest = T::Hashing::hash(&key);
            let old = Self::mutate_token(&token, |governance| {
                Ok(governance
                    .roles
                    .accept_recovery_admin(&who, &key_digest)
                    .map_err(Error::<T>::from)?)
            })?;
            Self::deposit_event(Event::TokenRecoveryAdminChanged { token, old, new: who });
            Ok(())
        }

        /// Starts the timelock after which guard enforcement on `token` may be
        /// switched off.
        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::propose_lossless_turn_off())]
        pub fn propose_lossless_turn_off(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let now = Self::now();
            let executable_at = Self::mutate_token(&token, |governance| {
                governance.roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
                Ok(governance.lossless.propose_turn_off(now).map_err(Error::<T>::from)?)
            })?;
            Self::deposit_event(Event::LosslessTurnOffProposed { token, executable_at });
            Ok(())
        }

        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::execute_lossless_turn_off())]
        pub fn execute_lossless_turn_off(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let now = Self::now();
            Self::mutate_token(&token, |governance| {
                governance.roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
                Ok(governance.lossless.execute_turn_off(now).map_err(Error::<T>::from)?)
            })?;
            log::info!(target: LOG_TARGET, "lossless protection turned off for token {token:?}");
            Self::deposit_event(Event::LosslessTurnedOff { token });
            Ok(())
        }

        /// Re-enables guard enforcement at once, cancelling a pending turn-off.
        #[pallet::call_index(15)]
        #[pallet::weight(T::WeightInfo::execute_lossless_turn_on())]
        pub fn execute_lossless_turn_on(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::mutate_token(&token, |governance| {
                governance.roles.ensure_recovery_admin(&who).map_err(Error::<T>::from)?;
                governance.lossless.turn_on();
                Ok(())
            })?;
            Self::deposit_event(Event::LosslessTurnedOn { token });
            Ok(())
        }

        /// Blacklists `addresses` for `token`. Only accepted while the token's
        /// IDO window is open.
        #[pallet::call_index(16)]
        #[pallet::weight(T::WeightInfo::blacklist_addresses(addresses.len() as u32))]
        pub fn blacklist_addresses(
            origin: OriginFor<T>,
            token: T::TokenId,
            addresses: Vec<T::AccountId>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let governance = Self::token(&token)?;
            ensure!(
                governance.roles.is_admin(&who) || Self::is_lossless_admin(&who),
                Error::<T>::Unauthorized
            );
            Self::ensure_not_paused()?;
            Self::ensure_batch(&addresses)?;

            let config = IdoConfigs::<T>::get(token).ok_or(Error::<T>::IdoNotStarted)?;
            match config.phase(Self::now()) {
                IdoPhase::NotStarted => return Err(Error::<T>::IdoNotStarted.into()),
                IdoPhase::Ended => return Err(Error::<T>::IdoEnded.into()),
                IdoPhase::Active => {},
            }
            ensure!(!addresses.contains(&Self::account_id()), Error::<T>::InvalidTarget);

            for account in &addresses {
                Self::flag(&token, account);
            }
            Self::deposit_event(Event::AddressesBlacklisted { token, by: who, addresses });
            Ok(())
        }

        #[pallet::call_index(17)]
        #[pallet::weight(T::WeightInfo::remove_from_blacklist_by_token_admin(addresses.len() as u32))]
        pub fn remove_from_blacklist_by_token_admin(
            origin: OriginFor<T>,
            token: T::TokenId,
            addresses: Vec<T::AccountId>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Self::token(&token)?.roles.is_admin(&who), Error::<T>::Unauthorized);
            Self::ensure_not_paused()?;
            Self::ensure_batch(&addresses)?;

            Self::confirm_removals(&token, &addresses, RemovalParty::TokenAdmin);
            Self::deposit_event(Event::BlacklistRemovalProposedByTokenAdmin { token, addresses });
            Ok(())
        }

        #[pallet::call_index(18)]
        #[pallet::weight(T::WeightInfo::remove_from_blacklist_by_lossless_admin(addresses.len() as u32))]
        pub fn remove_from_blacklist_by_lossless_admin(
            origin: OriginFor<T>,
            token: T::TokenId,
            addresses: Vec<T::AccountId>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Self::is_lossless_admin(&who), Error::<T>::Unauthorized);
            Self::token(&token)?;
            Self::ensure_not_paused()?;
            Self::ensure_batch(&addresses)?;

            Self::confirm_removals(&token, &addresses, RemovalParty::LosslessAdmin);
            Self::deposit_event(Event::BlacklistRemovalProposedByLosslessAdmin { token, addresses });
            Ok(())
        }

        /// Sweeps the full balance of every blacklisted address in `addresses`
        /// to the controller account. Fails as a whole if any address is not
        /// blacklisted. The addresses stay blacklisted.
        #[pallet::call_index(19)]
        #[pallet::weight(T::WeightInfo::transfer_out_blacklisted_funds(addresses.len() as u32))]
        pub fn transfer_out_blacklisted_funds(
            origin: OriginFor<T>,
            token: T::TokenId,
            addresses: Vec<T::AccountId>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Self::is_lossless_admin(&who), Error::<T>::Unauthorized);
            Self::token(&token)?;
            Self::ensure_batch(&addresses)?;
            ensure!(
                addresses.iter().all(|account| Self::is_blacklisted(&token, account)),
                Error::<T>::NotBlacklisted
            );

            let destination = Self::account_id();
            let amount = T::Ledger::sweep(&token, &addresses, &destination)?;

            log::info!(
                target: LOG_TARGET,
                "swept {amount} of token {token:?} from {} blacklisted accounts",
                addresses.len()
            );
            Self::deposit_event(Event::BlacklistedFundsTransferredOut {
                token,
                addresses,
                destination,
                amount,
            });
            Ok(())
        }

        /// Proposes the IDO window for `token`, replacing any earlier proposal
        /// that has not started yet.
        #[pallet::call_index(20)]
        #[pallet::weight(T::WeightInfo::propose_ido_config(whitelist.len() as u32))]
        pub fn propose_ido_config(
            origin: OriginFor<T>,
            token: T::TokenId,
            duration: u64,
            whitelist: Vec<T::AccountId>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Self::token(&token)?.roles.is_admin(&who), Error::<T>::Unauthorized);
            Self::ensure_not_paused()?;
            ensure!(duration > 0, Error::<T>::ZeroDuration);
            ensure!(duration <= MAX_IDO_DURATION, Error::<T>::DurationTooLong);
            ensure!(!whitelist.is_empty(), Error::<T>::EmptyWhitelist);
            let whitelist: BoundedVec<T::AccountId, T::MaxAddresses> =
                whitelist.try_into().map_err(|_| Error::<T>::TooManyAddresses)?;
            if let Some(existing) = IdoConfigs::<T>::get(token) {
                ensure!(!existing.is_started(), Error::<T>::AlreadyStarted);
            }

            IdoConfigs::<T>::insert(
                token,
                IdoConfig { duration, whitelist, confirmed: false, start_time: None },
            );
            Self::deposit_event(Event::IdoProposed { token, duration });
            Ok(())
        }

        #[pallet::call_index(21)]
        #[pallet::weight(T::WeightInfo::set_ido_config_confirm())]
        pub fn set_ido_config_confirm(
            origin: OriginFor<T>,
            token: T::TokenId,
            confirmed: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Self::is_lossless_admin(&who), Error::<T>::Unauthorized);
            Self::ensure_not_paused()?;

            IdoConfigs::<T>::try_mutate(token, |maybe_config| -> DispatchResult {
                let config = maybe_config.as_mut().ok_or(Error::<T>::NotProposed)?;
                ensure!(!config.is_started(), Error::<T>::AlreadyStarted);
                config.confirmed = confirmed;
                Ok(())
            })?;
            Self::deposit_event(Event::IdoConfirmationSet { token, confirmed });
            Ok(())
        }

        /// Opens the IDO window now. Duration and whitelist are frozen from
        /// here on.
        #[pallet::call_index(22)]
        #[pallet::weight(T::WeightInfo::start_ido())]
        pub fn start_ido(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(Self::token(&token)?.roles.is_admin(&who), Error::<T>::Unauthorized);
            Self::ensure_not_paused()?;

            let now = Self::now();
            IdoConfigs::<T>::try_mutate(token, |maybe_config| -> DispatchResult {
                let config = maybe_config.as_mut().ok_or(Error::<T>::NotConfirmed)?;
                ensure!(!config.is_started(), Error::<T>::AlreadyStarted);
                ensure!(config.confirmed, Error::<T>::NotConfirmed);
                config.start_time = Some(now);
                Ok(())
            })?;
            log::info!(target: LOG_TARGET, "IDO for token {token:?} started at {now}");
            Self::deposit_event(Event::IdoStarted { token, start_time: now });
            Ok(())
        }

        /// Removes up to `MaxAddresses` leftover blacklist entries of a
        /// deregistered token. Anyone may call it until nothing is left.
        #[pallet::call_index(23)]
        #[pallet::weight(T::WeightInfo::purge_blacklist(T::MaxAddresses::get()))]
        pub fn purge_blacklist(origin: OriginFor<T>, token: T::TokenId) -> DispatchResult {
            ensure_signed(origin)?;
            ensure!(!Tokens::<T>::contains_key(token), Error::<T>::TokenStillRegistered);
            ensure!(Self::has_blacklist_entries(&token), Error::<T>::NothingToPurge);

            let (removed, complete) = Self::purge_blacklist_entries(&token);
            log::debug!(
                target: LOG_TARGET,
                "purged {removed} blacklist entries of token {token:?}, complete: {complete}"
            );
            Self::deposit_event(Event::BlacklistPurged { token, removed, complete });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Controller admin, also known as the lossless admin
        pub admin: Option<T::AccountId>,
        pub recovery_admin: Option<T::AccountId>,
        pub pause_admin: Option<T::AccountId>,
        /// Tokens onboarded at genesis: (token, token admin, token recovery admin)
        pub tokens: Vec<(T::TokenId, T::AccountId, T::AccountId)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            if let (Some(admin), Some(recovery_admin)) = (&self.admin, &self.recovery_admin) {
                ControllerRoles::<T>::put(RoleSet::new(admin.clone(), recovery_admin.clone()));
            }
            if let Some(pause_admin) = &self.pause_admin {
                PauseAdmin::<T>::put(pause_admin);
            }
            for (token, admin, recovery_admin) in &self.tokens {
                assert!(!Tokens::<T>::contains_key(token), "Token registered twice at genesis");
                Tokens::<T>::insert(
                    token,
                    TokenGovernance::new(admin.clone(), recovery_admin.clone()),
                );
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    /// The controller's own account. Never blacklisted; receives swept funds.
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    fn now() -> u64 {
        T::UnixTime::now().as_secs()
    }

    fn ensure_not_paused() -> DispatchResult {
        ensure!(!Paused::<T>::get(), Error::<T>::Paused);
        Ok(())
    }

    fn ensure_pause_admin(who: &T::AccountId) -> DispatchResult {
        ensure!(PauseAdmin::<T>::get().as_ref() == Some(who), Error::<T>::Unauthorized);
        Ok(())
    }

    fn ensure_batch(addresses: &[T::AccountId]) -> DispatchResult {
        ensure!(addresses.len() <= T::MaxAddresses::get() as usize, Error::<T>::TooManyAddresses);
        Ok(())
    }

    /// With no controller roles configured nobody is authorized.
    fn controller_roles() -> Result<RoleSetOf<T>, Error<T>> {
        ControllerRoles::<T>::get().ok_or(Error::<T>::Unauthorized)
    }

    fn is_lossless_admin(who: &T::AccountId) -> bool {
        ControllerRoles::<T>::get().is_some_and(|roles| roles.is_admin(who))
    }

    fn token(token: &T::TokenId) -> Result<TokenGovernanceOf<T>, Error<T>> {
        Tokens::<T>::get(token).ok_or(Error::<T>::UnknownToken)
    }

    fn mutate_token<R>(
        token: &T::TokenId,
        f: impl FnOnce(&mut TokenGovernanceOf<T>) -> Result<R, DispatchError>,
    ) -> Result<R, DispatchError> {
        Tokens::<T>::try_mutate(token, |maybe_governance| {
            let governance = maybe_governance.as_mut().ok_or(Error::<T>::UnknownToken)?;
            f(governance)
        })
    }

    fn flag(token: &T::TokenId, account: &T::AccountId) {
        Blacklist::<T>::mutate(token, account, |entry| {
            entry.get_or_insert_with(BlacklistEntry::default).blacklist()
        });
    }

    fn confirm_removals(token: &T::TokenId, addresses: &[T::AccountId], party: RemovalParty) {
        for account in addresses {
            let lifted = Blacklist::<T>::mutate_exists(token, account, |maybe_entry| {
                let mut entry = maybe_entry.take().unwrap_or_default();
                let lifted = entry.confirm_removal(party);
                if !entry.is_vacant() {
                    *maybe_entry = Some(entry);
                }
                lifted
            });
            if lifted {
                Self::deposit_event(Event::AddressUnblacklisted {
                    token: *token,
                    account: account.clone(),
                });
            }
        }
    }

    fn has_blacklist_entries(token: &T::TokenId) -> bool {
        Blacklist::<T>::iter_key_prefix(token).next().is_some()
    }

    /// Removes at most `MaxAddresses` blacklist entries of `token`. Returns
    /// how many went and whether the blacklist is now empty.
    fn purge_blacklist_entries(token: &T::TokenId) -> (u32, bool) {
        let limit = T::MaxAddresses::get();
        let accounts: Vec<T::AccountId> =
            Blacklist::<T>::iter_key_prefix(token).take(limit as usize).collect();
        for account in &accounts {
            Blacklist::<T>::remove(token, account);
        }
        (accounts.len() as u32, !Self::has_blacklist_entries(token))
    }

    fn evaluate_transfer(
        token: &T::TokenId,
        from: &T::AccountId,
        to: &T::AccountId,
    ) -> TransferDecision {
        if Paused::<T>::get() {
            return TransferDecision::Deny(DenyReason::Paused);
        }
        let Some(governance) = Tokens::<T>::get(token) else {
            return TransferDecision::Allow;
        };
        if !governance.lossless.is_on {
            return TransferDecision::Allow;
        }
        if Self::is_blacklisted(token, from) || Self::is_blacklisted(token, to) {
            return TransferDecision::Deny(DenyReason::Blacklisted);
        }
        let Some(config) = IdoConfigs::<T>::get(token) else {
            return TransferDecision::Allow;
        };
        if config.phase(Self::now()) == IdoPhase::Active && !config.is_whitelisted(to) {
            if *to != Self::account_id() {
                log::warn!(
                    target: LOG_TARGET,
                    "restricting {to:?}: received token {token:?} during IDO without being whitelisted"
                );
                Self::flag(token, to);
                Self::deposit_event(Event::IdoRecipientRestricted {
                    token: *token,
                    account: to.clone(),
                });
            }
            return TransferDecision::Deny(DenyReason::IdoRestricted);
        }
        TransferDecision::Allow
    }

    pub fn admin() -> Option<T::AccountId> {
        ControllerRoles::<T>::get().map(|roles| roles.admin)
    }

    pub fn recovery_admin() -> Option<T::AccountId> {
        ControllerRoles::<T>::get().map(|roles| roles.recovery_admin)
    }

    pub fn pause_admin() -> Option<T::AccountId> {
        PauseAdmin::<T>::get()
    }

    pub fn paused() -> bool {
        Paused::<T>::get()
    }

    pub fn version() -> u32 {
        CONTROLLER_VERSION
    }

    pub fn token_admin(token: &T::TokenId) -> Option<T::AccountId> {
        Tokens::<T>::get(token).map(|governance| governance.roles.admin)
    }

    pub fn token_recovery_admin(token: &T::TokenId) -> Option<T::AccountId> {
        Tokens::<T>::get(token).map(|governance| governance.roles.recovery_admin)
    }

    /// Unregistered tokens are not protected.
    pub fn is_lossless_on(token: &T::TokenId) -> bool {
        Tokens::<T>::get(token).is_some_and(|governance| governance.lossless.is_on)
    }

    pub fn is_lossless_turn_off_proposed(token: &T::TokenId) -> bool {
        Tokens::<T>::get(token).is_some_and(|governance| governance.lossless.is_turn_off_proposed())
    }

    pub fn lossless_turn_off_executable_at(token: &T::TokenId) -> Option<u64> {
        Tokens::<T>::get(token).and_then(|governance| governance.lossless.turn_off_executable_at())
    }

    pub fn is_blacklisted(token: &T::TokenId, account: &T::AccountId) -> bool {
        Blacklist::<T>::get(token, account).is_some_and(|entry| entry.blacklisted)
    }

    pub fn removal_proposed_by_token_admin(token: &T::TokenId, account: &T::AccountId) -> bool {
        Blacklist::<T>::get(token, account).is_some_and(|entry| entry.removal.by_token_admin)
    }

    pub fn removal_proposed_by_lossless_admin(token: &T::TokenId, account: &T::AccountId) -> bool {
        Blacklist::<T>::get(token, account).is_some_and(|entry| entry.removal.by_lossless_admin)
    }

    pub fn ido_config(token: &T::TokenId) -> Option<IdoConfig<T>> {
        IdoConfigs::<T>::get(token)
    }

    /// Checks the storage invariants of the pallet.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), DispatchError> {
        ensure!(ControllerRoles::<T>::exists(), "controller roles are not initialized");
        ensure!(PauseAdmin::<T>::exists(), "pause admin is not initialized");

        // Entries of unregistered tokens are deregistration leftovers awaiting
        // `purge_blacklist`; re-registration is refused until they are gone.
        for (_, _, entry) in Blacklist::<T>::iter() {
            ensure!(!entry.is_vacant(), "vacant blacklist entry left in storage");
        }
        for (token, config) in IdoConfigs::<T>::iter() {
            ensure!(Tokens::<T>::contains_key(token), "IDO config of an unregistered token");
            ensure!(
                config.duration > 0 && config.duration <= MAX_IDO_DURATION,
                "IDO duration out of range"
            );
            ensure!(!config.whitelist.is_empty(), "IDO whitelist is empty");
            ensure!(config.confirmed || !config.is_started(), "IDO started without confirmation");
        }
        Ok(())
    }
}

impl<T: Config> TransferGuard<T::TokenId, T::AccountId> for Pallet<T> {
    fn before_transfer(
        token: &T::TokenId,
        from: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
    ) -> TransferDecision {
        let decision = Self::evaluate_transfer(token, from, to);
        log::debug!(
            target: LOG_TARGET,
            "transfer of {amount} on token {token:?} from {from:?} to {to:?}: {decision:?}"
        );
        decision
    }
}
