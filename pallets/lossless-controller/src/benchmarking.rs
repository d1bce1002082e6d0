//! Benchmarking setup for pallet-lossless-controller

use super::*;

#[allow(unused)]
use crate::Pallet as LosslessController;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

const CLOCK_START: u64 = 1_000_000;

/// Installs fresh controller roles and returns (admin, recovery admin, pause admin).
fn controller<T: Config>() -> (T::AccountId, T::AccountId, T::AccountId) {
    let admin: T::AccountId = account("admin", 0, 0);
    let recovery_admin: T::AccountId = account("recovery_admin", 0, 0);
    let pause_admin: T::AccountId = account("pause_admin", 0, 0);
    ControllerRoles::<T>::put(RoleSet::new(admin.clone(), recovery_admin.clone()));
    PauseAdmin::<T>::put(&pause_admin);
    Paused::<T>::put(false);
    T::BenchmarkHelper::set_unix_time(CLOCK_START);
    (admin, recovery_admin, pause_admin)
}

/// Registers a token and returns (token, token admin, token recovery admin).
fn governed_token<T: Config>() -> (T::TokenId, T::AccountId, T::AccountId) {
    let token = T::BenchmarkHelper::token_id(0);
    let admin: T::AccountId = account("token_admin", 0, 0);
    let recovery_admin: T::AccountId = account("token_recovery_admin", 0, 0);
    Tokens::<T>::insert(token, TokenGovernance::new(admin.clone(), recovery_admin.clone()));
    (token, admin, recovery_admin)
}

fn running_ido<T: Config>(token: T::TokenId) {
    let mut whitelist = BoundedVec::new();
    let _ = whitelist.try_push(account("investor", 0, 0));
    IdoConfigs::<T>::insert(
        token,
        IdoConfig {
            duration: MAX_IDO_DURATION,
            whitelist,
            confirmed: true,
            start_time: Some(CLOCK_START),
        },
    );
}

/// Longest key a candidate may reveal, so hashing it is weighed at worst case.
fn secret() -> RevealedKey {
    BoundedVec::truncate_from((0..MAX_KEY_LENGTH).map(|_| b's').collect::<Vec<u8>>())
}

fn targets<T: Config>(n: u32) -> Vec<T::AccountId> {
    (0..n).map(|i| account("target", i, 0)).collect()
}

/// Blacklists `accounts` with `confirmed_by` already agreeing to lift them.
fn listed<T: Config>(token: T::TokenId, accounts: &[T::AccountId], confirmed_by: Option<RemovalParty>) {
    for who in accounts {
        let mut entry = BlacklistEntry::default();
        entry.blacklist();
        if let Some(party) = confirmed_by {
            entry.confirm_removal(party);
        }
        Blacklist::<T>::insert(token, who, entry);
    }
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn pause() {
        let (_, _, pause_admin) = controller::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(pause_admin));

        assert!(Paused::<T>::get());
    }

    #[benchmark]
    fn unpause() {
        let (_, _, pause_admin) = controller::<T>();
        Paused::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(pause_admin));

        assert!(!Paused::<T>::get());
    }

    #[benchmark]
    fn set_admin() {
        let (_, recovery_admin, _) = controller::<T>();
        let new: T::AccountId = account("new", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), new.clone());

        assert_eq!(LosslessController::<T>::admin(), Some(new));
    }

    #[benchmark]
    fn set_recovery_admin() {
        let (_, recovery_admin, _) = controller::<T>();
        let new: T::AccountId = account("new", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), new.clone());

        assert_eq!(LosslessController::<T>::recovery_admin(), Some(new));
    }

    #[benchmark]
    fn set_pause_admin() {
        let (_, recovery_admin, _) = controller::<T>();
        let new: T::AccountId = account("new", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), new.clone());

        assert_eq!(PauseAdmin::<T>::get(), Some(new));
    }

    #[benchmark]
    fn transfer_recovery_admin_ownership() {
        let (_, recovery_admin, _) = controller::<T>();
        let candidate: T::AccountId = account("candidate", 0, 0);
        let commitment = T::Hashing::hash(&secret());

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), candidate.clone(), commitment);

        let roles = ControllerRoles::<T>::get().unwrap();
        assert_eq!(roles.candidate(), Some(&candidate));
    }

    #[benchmark]
    fn accept_recovery_admin_ownership() {
        controller::<T>();
        let candidate: T::AccountId = account("candidate", 0, 0);
        ControllerRoles::<T>::mutate(|roles| {
            if let Some(roles) = roles {
                roles.propose_recovery_admin(candidate.clone(), T::Hashing::hash(&secret()));
            }
        });

        #[extrinsic_call]
        _(RawOrigin::Signed(candidate.clone()), secret());

        assert_eq!(LosslessController::<T>::recovery_admin(), Some(candidate));
    }

    #[benchmark]
    fn register_token() -> Result<(), BenchmarkError> {
        let origin =
            T::RegistrarOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
        let token = T::BenchmarkHelper::token_id(1);
        let admin: T::AccountId = account("token_admin", 0, 0);

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, token, admin.clone(), admin.clone());

        assert_eq!(LosslessController::<T>::token_admin(&token), Some(admin));
        Ok(())
    }

    #[benchmark]
    fn deregister_token(n: Linear<0, { T::MaxAddresses::get() }>) -> Result<(), BenchmarkError> {
        let origin =
            T::RegistrarOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
        let (token, _, _) = governed_token::<T>();
        running_ido::<T>(token);
        listed::<T>(token, &targets::<T>(n), None);

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, token);

        assert!(!Tokens::<T>::contains_key(token));
        Ok(())
    }

    #[benchmark]
    fn set_token_admin() {
        let (token, _, recovery_admin) = governed_token::<T>();
        let new: T::AccountId = account("new", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), token, new.clone());

        assert_eq!(LosslessController::<T>::token_admin(&token), Some(new));
    }

    #[benchmark]
    fn set_token_recovery_admin() {
        let (token, _, recovery_admin) = governed_token::<T>();
        let new: T::AccountId = account("new", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), token, new.clone());

        assert_eq!(LosslessController::<T>::token_recovery_admin(&token), Some(new));
    }

    #[benchmark]
    fn transfer_token_recovery_admin_ownership() {
        let (token, _, recovery_admin) = governed_token::<T>();
        let candidate: T::AccountId = account("candidate", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), token, candidate.clone(), T::Hashing::hash(&secret()));

        let governance = Tokens::<T>::get(token).unwrap();
        assert_eq!(governance.roles.candidate(), Some(&candidate));
    }

    #[benchmark]
    fn accept_token_recovery_admin_ownership() {
        let (token, _, _) = governed_token::<T>();
        let candidate: T::AccountId = account("candidate", 0, 0);
        Tokens::<T>::mutate(token, |governance| {
            if let Some(governance) = governance {
                governance
                    .roles
                    .propose_recovery_admin(candidate.clone(), T::Hashing::hash(&secret()));
            }
        });

        #[extrinsic_call]
        _(RawOrigin::Signed(candidate.clone()), token, secret());

        assert_eq!(LosslessController::<T>::token_recovery_admin(&token), Some(candidate));
    }

    #[benchmark]
    fn propose_lossless_turn_off() {
        controller::<T>();
        let (token, _, recovery_admin) = governed_token::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), token);

        assert!(LosslessController::<T>::is_lossless_turn_off_proposed(&token));
    }

    #[benchmark]
    fn execute_lossless_turn_off() {
        controller::<T>();
        let (token, _, recovery_admin) = governed_token::<T>();
        Tokens::<T>::mutate(token, |governance| {
            if let Some(governance) = governance {
                governance.lossless.turn_off_proposed_at = Some(CLOCK_START);
            }
        });
        T::BenchmarkHelper::set_unix_time(CLOCK_START + LOSSLESS_TURN_OFF_TIMELOCK);

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), token);

        assert!(!LosslessController::<T>::is_lossless_on(&token));
    }

    #[benchmark]
    fn execute_lossless_turn_on() {
        let (token, _, recovery_admin) = governed_token::<T>();
        Tokens::<T>::mutate(token, |governance| {
            if let Some(governance) = governance {
                governance.lossless.is_on = false;
            }
        });

        #[extrinsic_call]
        _(RawOrigin::Signed(recovery_admin), token);

        assert!(LosslessController::<T>::is_lossless_on(&token));
    }

    #[benchmark]
    fn blacklist_addresses(n: Linear<1, { T::MaxAddresses::get() }>) {
        controller::<T>();
        let (token, token_admin, _) = governed_token::<T>();
        running_ido::<T>(token);
        let addresses = targets::<T>(n);

        #[extrinsic_call]
        _(RawOrigin::Signed(token_admin), token, addresses.clone());

        assert!(addresses.iter().all(|who| LosslessController::<T>::is_blacklisted(&token, who)));
    }

    #[benchmark]
    fn remove_from_blacklist_by_token_admin(n: Linear<1, { T::MaxAddresses::get() }>) {
        controller::<T>();
        let (token, token_admin, _) = governed_token::<T>();
        let addresses = targets::<T>(n);
        listed::<T>(token, &addresses, Some(RemovalParty::LosslessAdmin));

        #[extrinsic_call]
        _(RawOrigin::Signed(token_admin), token, addresses.clone());

        assert!(addresses.iter().all(|who| !LosslessController::<T>::is_blacklisted(&token, who)));
    }

    #[benchmark]
    fn remove_from_blacklist_by_lossless_admin(n: Linear<1, { T::MaxAddresses::get() }>) {
        let (admin, _, _) = controller::<T>();
        let (token, _, _) = governed_token::<T>();
        let addresses = targets::<T>(n);
        listed::<T>(token, &addresses, Some(RemovalParty::TokenAdmin));

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), token, addresses.clone());

        assert!(addresses.iter().all(|who| !LosslessController::<T>::is_blacklisted(&token, who)));
    }

    #[benchmark]
    fn transfer_out_blacklisted_funds(n: Linear<1, { T::MaxAddresses::get() }>) {
        let (admin, _, _) = controller::<T>();
        let (token, _, _) = governed_token::<T>();
        let addresses = targets::<T>(n);
        listed::<T>(token, &addresses, None);

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), token, addresses.clone());

        assert!(addresses.iter().all(|who| T::Ledger::balance_of(&token, who) == 0));
    }

    #[benchmark]
    fn propose_ido_config(n: Linear<1, { T::MaxAddresses::get() }>) {
        controller::<T>();
        let (token, token_admin, _) = governed_token::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(token_admin), token, MAX_IDO_DURATION, targets::<T>(n));

        assert_eq!(IdoConfigs::<T>::get(token).map(|config| config.whitelist.len()), Some(n as usize));
    }

    #[benchmark]
    fn set_ido_config_confirm() {
        let (admin, _, _) = controller::<T>();
        let (token, _, _) = governed_token::<T>();
        running_ido::<T>(token);
        IdoConfigs::<T>::mutate(token, |config| {
            if let Some(config) = config {
                config.confirmed = false;
                config.start_time = None;
            }
        });

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), token, true);

        assert_eq!(IdoConfigs::<T>::get(token).map(|config| config.confirmed), Some(true));
    }

    #[benchmark]
    fn start_ido() {
        controller::<T>();
        let (token, token_admin, _) = governed_token::<T>();
        running_ido::<T>(token);
        IdoConfigs::<T>::mutate(token, |config| {
            if let Some(config) = config {
                config.start_time = None;
            }
        });

        #[extrinsic_call]
        _(RawOrigin::Signed(token_admin), token);

        assert_eq!(IdoConfigs::<T>::get(token).and_then(|config| config.start_time), Some(CLOCK_START));
    }

    #[benchmark]
    fn purge_blacklist(n: Linear<1, { T::MaxAddresses::get() }>) {
        let token = T::BenchmarkHelper::token_id(0);
        listed::<T>(token, &targets::<T>(n), None);
        let caller: T::AccountId = whitelisted_caller();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), token);

        assert!(Blacklist::<T>::iter_key_prefix(token).next().is_none());
    }

    impl_benchmark_test_suite!(LosslessController, crate::mock::new_test_ext(), crate::mock::Test);
}
