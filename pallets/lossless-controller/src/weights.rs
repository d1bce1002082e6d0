//! Weights for pallet-lossless-controller.
//!
//! Hand-tuned placeholders until the benchmarks in `benchmarking.rs` are run
//! on reference hardware.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn pause() -> Weight;
    fn unpause() -> Weight;
    fn set_admin() -> Weight;
    fn set_recovery_admin() -> Weight;
    fn set_pause_admin() -> Weight;
    fn transfer_recovery_admin_ownership() -> Weight;
    fn accept_recovery_admin_ownership() -> Weight;
    fn register_token() -> Weight;
    fn deregister_token(n: u32) -> Weight;
    fn set_token_admin() -> Weight;
    fn set_token_recovery_admin() -> Weight;
    fn transfer_token_recovery_admin_ownership() -> Weight;
    fn accept_token_recovery_admin_ownership() -> Weight;
    fn propose_lossless_turn_off() -> Weight;
    fn execute_lossless_turn_off() -> Weight;
    fn execute_lossless_turn_on() -> Weight;
    fn blacklist_addresses(n: u32) -> Weight;
    fn remove_from_blacklist_by_token_admin(n: u32) -> Weight;
    fn remove_from_blacklist_by_lossless_admin(n: u32) -> Weight;
    fn transfer_out_blacklisted_funds(n: u32) -> Weight;
    fn propose_ido_config(n: u32) -> Weight;
    fn set_ido_config_confirm() -> Weight;
    fn start_ido() -> Weight;
    fn purge_blacklist(n: u32) -> Weight;
}

/// Weights for the pallet using the runtime's database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);

impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    fn pause() -> Weight {
        Weight::from_parts(9_000_000, 1_500)
            .saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn unpause() -> Weight {
        Weight::from_parts(9_000_000, 1_500)
            .saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn set_admin() -> Weight {
        Weight::from_parts(11_000_000, 1_600)
            .saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn set_recovery_admin() -> Weight {
        Weight::from_parts(11_000_000, 1_600)
            .saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn set_pause_admin() -> Weight {
        Weight::from_parts(11_000_000, 1_600)
            .saturating_add(T::DbWeight::get().reads_writes(3, 1))
    }
    fn transfer_recovery_admin_ownership() -> Weight {
        Weight::from_parts(10_000_000, 1_600)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn accept_recovery_admin_ownership() -> Weight {
        Weight::from_parts(14_000_000, 1_600)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn register_token() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn deregister_token(n: u32) -> Weight {
        Weight::from_parts(20_000_000, 3_500)
            .saturating_add(Weight::from_parts(3_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads_writes(2, 2))
            .saturating_add(T::DbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn set_token_admin() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_token_recovery_admin() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn transfer_token_recovery_admin_ownership() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn accept_token_recovery_admin_ownership() -> Weight {
        Weight::from_parts(15_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn propose_lossless_turn_off() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn execute_lossless_turn_off() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn execute_lossless_turn_on() -> Weight {
        Weight::from_parts(11_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn blacklist_addresses(n: u32) -> Weight {
        Weight::from_parts(18_000_000, 5_000)
            .saturating_add(Weight::from_parts(4_000_000, 2_600).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads(5))
            .saturating_add(T::DbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn remove_from_blacklist_by_token_admin(n: u32) -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(Weight::from_parts(4_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn remove_from_blacklist_by_lossless_admin(n: u32) -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(Weight::from_parts(4_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn transfer_out_blacklisted_funds(n: u32) -> Weight {
        Weight::from_parts(20_000_000, 3_500)
            .saturating_add(Weight::from_parts(9_000_000, 5_200).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().reads_writes(n.saturating_mul(2).into(), n.into()))
    }
    fn propose_ido_config(n: u32) -> Weight {
        Weight::from_parts(15_000_000, 3_500)
            .saturating_add(Weight::from_parts(60_000, 32).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads_writes(3, 1))
    }
    fn set_ido_config_confirm() -> Weight {
        Weight::from_parts(12_000_000, 5_000)
            .saturating_add(T::DbWeight::get().reads_writes(3, 1))
    }
    fn start_ido() -> Weight {
        Weight::from_parts(13_000_000, 5_000)
            .saturating_add(T::DbWeight::get().reads_writes(4, 1))
    }
    fn purge_blacklist(n: u32) -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(Weight::from_parts(3_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().reads_writes(n.into(), n.into()))
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn pause() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn unpause() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn set_admin() -> Weight {
        Weight::from_parts(11_000_000, 1_600).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn set_recovery_admin() -> Weight {
        Weight::from_parts(11_000_000, 1_600).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn set_pause_admin() -> Weight {
        Weight::from_parts(11_000_000, 1_600).saturating_add(RocksDbWeight::get().reads_writes(3, 1))
    }
    fn transfer_recovery_admin_ownership() -> Weight {
        Weight::from_parts(10_000_000, 1_600).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn accept_recovery_admin_ownership() -> Weight {
        Weight::from_parts(14_000_000, 1_600).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn register_token() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn deregister_token(n: u32) -> Weight {
        Weight::from_parts(20_000_000, 3_500)
            .saturating_add(Weight::from_parts(3_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads_writes(2, 2))
            .saturating_add(RocksDbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn set_token_admin() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_token_recovery_admin() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn transfer_token_recovery_admin_ownership() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn accept_token_recovery_admin_ownership() -> Weight {
        Weight::from_parts(15_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn propose_lossless_turn_off() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn execute_lossless_turn_off() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn execute_lossless_turn_on() -> Weight {
        Weight::from_parts(11_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn blacklist_addresses(n: u32) -> Weight {
        Weight::from_parts(18_000_000, 5_000)
            .saturating_add(Weight::from_parts(4_000_000, 2_600).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(5))
            .saturating_add(RocksDbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn remove_from_blacklist_by_token_admin(n: u32) -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(Weight::from_parts(4_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn remove_from_blacklist_by_lossless_admin(n: u32) -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(Weight::from_parts(4_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().reads_writes(n.into(), n.into()))
    }
    fn transfer_out_blacklisted_funds(n: u32) -> Weight {
        Weight::from_parts(20_000_000, 3_500)
            .saturating_add(Weight::from_parts(9_000_000, 5_200).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().reads_writes(n.saturating_mul(2).into(), n.into()))
    }
    fn propose_ido_config(n: u32) -> Weight {
        Weight::from_parts(15_000_000, 3_500)
            .saturating_add(Weight::from_parts(60_000, 32).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads_writes(3, 1))
    }
    fn set_ido_config_confirm() -> Weight {
        Weight::from_parts(12_000_000, 5_000).saturating_add(RocksDbWeight::get().reads_writes(3, 1))
    }
    fn start_ido() -> Weight {
        Weight::from_parts(13_000_000, 5_000).saturating_add(RocksDbWeight::get().reads_writes(4, 1))
    }
    fn purge_blacklist(n: u32) -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(Weight::from_parts(3_500_000, 2_600).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().reads_writes(n.into(), n.into()))
    }
}
