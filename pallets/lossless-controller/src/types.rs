//! Governance state machines and the seams towards the token ledger.
//!
//! Everything here is plain data plus the transition rules that operate on
//! it. The pallet loads these values from storage, applies a transition and
//! writes them back, so the rules can be exercised without a runtime.

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{
    pallet_prelude::*, CloneNoBound, EqNoBound, PartialEqNoBound, RuntimeDebugNoBound,
};
use scale_info::TypeInfo;
use sp_runtime::DispatchError;

use crate::Config;

/// Delay between proposing and executing a lossless turn-off, in seconds.
pub const LOSSLESS_TURN_OFF_TIMELOCK: u64 = 86_400;

/// Longest IDO whitelist window a token admin may propose, in seconds.
pub const MAX_IDO_DURATION: u64 = 3_600;

/// Longest secret a candidate may reveal to accept a recovery handover.
pub const MAX_KEY_LENGTH: u32 = 256;

/// Secret revealed by a recovery-admin candidate.
pub type RevealedKey = BoundedVec<u8, ConstU32<MAX_KEY_LENGTH>>;

/// Failures raised by the pure transition rules.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum PolicyError {
    Unauthorized,
    MustBeCandidate,
    InvalidKey,
    AlreadyProposed,
    NotProposed,
    TimelockActive,
}

/// Outstanding recovery-admin handover for one role slot.
///
/// The commitment is the digest of a secret only the proposer and the
/// candidate know; the candidate proves possession by revealing it.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Default, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum Handover<AccountId, Hash> {
    #[default]
    NoCandidate,
    Candidate { account: AccountId, commitment: Hash },
}

/// A role slot: operating admin, recovery admin and the recovery handover.
///
/// The controller holds one of these globally and every governed token holds
/// its own.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RoleSet<AccountId, Hash> {
    pub admin: AccountId,
    pub recovery_admin: AccountId,
    pub handover: Handover<AccountId, Hash>,
}

impl<AccountId: PartialEq + Clone, Hash: PartialEq> RoleSet<AccountId, Hash> {
    pub fn new(admin: AccountId, recovery_admin: AccountId) -> Self {
        Self { admin, recovery_admin, handover: Handover::NoCandidate }
    }

    pub fn is_admin(&self, who: &AccountId) -> bool {
        self.admin == *who
    }

    pub fn ensure_recovery_admin(&self, who: &AccountId) -> Result<(), PolicyError> {
        if self.recovery_admin == *who {
            Ok(())
        } else {
            Err(PolicyError::Unauthorized)
        }
    }

    /// Replaces the operating admin, returning the previous one.
    pub fn replace_admin(&mut self, new: AccountId) -> AccountId {
        core::mem::replace(&mut self.admin, new)
    }

    /// Replaces the recovery admin, returning the previous one.
    pub fn replace_recovery_admin(&mut self, new: AccountId) -> AccountId {
        core::mem::replace(&mut self.recovery_admin, new)
    }

    /// Records `candidate` as the only account able to take over the recovery
    /// role. A previous candidate is discarded.
    pub fn propose_recovery_admin(&mut self, candidate: AccountId, commitment: Hash) {
        self.handover = Handover::Candidate { account: candidate, commitment };
    }

    /// Completes the handover for `who`, given the digest of the revealed key.
    ///
    /// Returns the recovery admin that was replaced.
    pub fn accept_recovery_admin(
        &mut self,
        who: &AccountId,
        key_digest: &Hash,
    ) -> Result<AccountId, PolicyError> {
        let Handover::Candidate { account, commitment } = &self.handover else {
            return Err(PolicyError::MustBeCandidate);
        };
        if account != who {
            return Err(PolicyError::MustBeCandidate);
        }
        if commitment != key_digest {
            return Err(PolicyError::InvalidKey);
        }
        let previous = self.replace_recovery_admin(who.clone());
        self.handover = Handover::NoCandidate;
        Ok(previous)
    }

    pub fn candidate(&self) -> Option<&AccountId> {
        match &self.handover {
            Handover::NoCandidate => None,
            Handover::Candidate { account, .. } => Some(account),
        }
    }
}

/// Per-token enable flag for guard enforcement with its turn-off timelock.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct LosslessSwitch {
    pub is_on: bool,
    pub turn_off_proposed_at: Option<u64>,
}

impl Default for LosslessSwitch {
    fn default() -> Self {
        Self { is_on: true, turn_off_proposed_at: None }
    }
}

impl LosslessSwitch {
    pub fn is_turn_off_proposed(&self) -> bool {
        self.turn_off_proposed_at.is_some()
    }

    /// Earliest moment at which a pending turn-off may be executed.
    pub fn turn_off_executable_at(&self) -> Option<u64> {
        self.turn_off_proposed_at
            .map(|proposed_at| proposed_at.saturating_add(LOSSLESS_TURN_OFF_TIMELOCK))
    }

    /// Starts the timelock at `now` and returns when it elapses.
    pub fn propose_turn_off(&mut self, now: u64) -> Result<u64, PolicyError> {
        if self.is_turn_off_proposed() {
            return Err(PolicyError::AlreadyProposed);
        }
        self.turn_off_proposed_at = Some(now);
        Ok(now.saturating_add(LOSSLESS_TURN_OFF_TIMELOCK))
    }

    pub fn execute_turn_off(&mut self, now: u64) -> Result<(), PolicyError> {
        let executable_at = self.turn_off_executable_at().ok_or(PolicyError::NotProposed)?;
        if now < executable_at {
            return Err(PolicyError::TimelockActive);
        }
        self.is_on = false;
        self.turn_off_proposed_at = None;
        Ok(())
    }

    /// Re-enables protection and cancels any pending turn-off.
    pub fn turn_on(&mut self) {
        self.is_on = true;
        self.turn_off_proposed_at = None;
    }
}

/// Governance record of a registered token.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct TokenGovernance<AccountId, Hash> {
    pub roles: RoleSet<AccountId, Hash>,
    pub lossless: LosslessSwitch,
}

impl<AccountId: PartialEq + Clone, Hash: PartialEq> TokenGovernance<AccountId, Hash> {
    pub fn new(token_admin: AccountId, token_recovery_admin: AccountId) -> Self {
        Self {
            roles: RoleSet::new(token_admin, token_recovery_admin),
            lossless: LosslessSwitch::default(),
        }
    }
}

/// The two parties whose agreement is needed to lift a blacklisting.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum RemovalParty {
    TokenAdmin,
    LosslessAdmin,
}

#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Default, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RemovalConfirmations {
    pub by_token_admin: bool,
    pub by_lossless_admin: bool,
}

/// Blacklist state of one (token, address) pair.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Default, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct BlacklistEntry {
    pub blacklisted: bool,
    pub removal: RemovalConfirmations,
}

impl BlacklistEntry {
    /// Flags the address. Earlier removal confirmations no longer count.
    pub fn blacklist(&mut self) {
        self.blacklisted = true;
        self.removal = RemovalConfirmations::default();
    }

    /// Records the confirmation of `party`.
    ///
    /// Once both parties have confirmed, the entry is reset and `true` is
    /// returned if the address was blacklisted until now.
    pub fn confirm_removal(&mut self, party: RemovalParty) -> bool {
        match party {
            RemovalParty::TokenAdmin => self.removal.by_token_admin = true,
            RemovalParty::LosslessAdmin => self.removal.by_lossless_admin = true,
        }
        if self.removal.by_token_admin && self.removal.by_lossless_admin {
            let was_blacklisted = self.blacklisted;
            *self = Self::default();
            was_blacklisted
        } else {
            false
        }
    }

    /// Nothing left worth storing.
    pub fn is_vacant(&self) -> bool {
        *self == Self::default()
    }
}

/// Where an IDO stands relative to the clock.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum IdoPhase {
    /// Proposed or confirmed, but not started.
    NotStarted,
    Active,
    Ended,
}

/// The whitelist window of a token's initial distribution.
#[derive(
    Encode, Decode, CloneNoBound, PartialEqNoBound, EqNoBound, RuntimeDebugNoBound, TypeInfo, MaxEncodedLen,
)]
#[scale_info(skip_type_params(T))]
#[codec(mel_bound())]
pub struct IdoConfig<T: Config> {
    pub duration: u64,
    pub whitelist: BoundedVec<T::AccountId, T::MaxAddresses>,
    pub confirmed: bool,
    pub start_time: Option<u64>,
}

impl<T: Config> IdoConfig<T> {
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// The window is `[start_time, start_time + duration)`.
    pub fn phase(&self, now: u64) -> IdoPhase {
        match self.start_time {
            None => IdoPhase::NotStarted,
            Some(start) if now < start.saturating_add(self.duration) => IdoPhase::Active,
            Some(_) => IdoPhase::Ended,
        }
    }

    pub fn is_whitelisted(&self, who: &T::AccountId) -> bool {
        self.whitelist.contains(who)
    }
}

/// Why the guard refused a transfer.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum DenyReason {
    Paused,
    Blacklisted,
    IdoRestricted,
}

/// Verdict of [`TransferGuard::before_transfer`].
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum TransferDecision {
    Allow,
    Deny(DenyReason),
}

impl TransferDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, TransferDecision::Allow)
    }

    /// Whether the guard recorded state while denying, which the ledger has
    /// to commit by completing its dispatch successfully.
    pub fn must_commit(&self) -> bool {
        matches!(self, TransferDecision::Deny(DenyReason::IdoRestricted))
    }
}

/// Hook the token ledger must call, and honor, before moving funds.
///
/// The verdict is returned as a value so that state recorded while reaching
/// it survives a denied transfer. Ledger dispatchables run in a storage
/// layer, so a ledger must obey these rules:
///
/// * on [`TransferDecision::Allow`] it moves the funds;
/// * on `Deny(Paused)` or `Deny(Blacklisted)` it fails the dispatch;
/// * on `Deny(IdoRestricted)` it moves nothing and still returns `Ok`,
///   otherwise the recipient's auto-blacklisting is rolled back with it. See
///   [`TransferDecision::must_commit`].
pub trait TransferGuard<TokenId, AccountId> {
    fn before_transfer(
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> TransferDecision;
}

/// Bookkeeping operations the controller needs from the token ledger.
pub trait TokenLedger<TokenId, AccountId> {
    fn balance_of(token: &TokenId, who: &AccountId) -> u128;

    /// Moves the full balance of every account in `from` to `destination`
    /// without consulting the transfer guard, returning the total moved.
    fn sweep(token: &TokenId, from: &[AccountId], destination: &AccountId)
        -> Result<u128, DispatchError>;
}
