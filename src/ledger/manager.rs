//! Ledger manager: atomic account mutation.

use log::{debug, info};
use std::sync::{Mutex, PoisonError};

use super::models::{AccountSnapshot, Chips, LedgerDelta, WagerAccount, DEFAULT_XP_PER_LEVEL};
use crate::errors::{EngineResult, GameError};

/// The player account behind a mutex.
///
/// Validate-then-charge must be indivisible (two overlapping stakes must
/// not both pass a balance check that only one of them can afford), so
/// every read-modify-write goes through a single critical section here.
#[derive(Debug)]
pub struct Ledger {
    account: Mutex<WagerAccount>,
    xp_per_level: u64,
}

impl Ledger {
    #[must_use]
    pub fn new(starting_balance: Chips, xp_per_level: u64) -> Self {
        Self {
            account: Mutex::new(WagerAccount::new(starting_balance)),
            xp_per_level: xp_per_level.max(1),
        }
    }

    /// Current account state.
    #[must_use]
    pub fn snapshot(&self) -> AccountSnapshot {
        *self.lock()
    }

    /// Atomically validate and charge a stake.
    ///
    /// # Errors
    ///
    /// `GameError::InsufficientFunds` if the stake exceeds the balance;
    /// the account is left unchanged.
    pub fn debit(&self, amount: Chips) -> EngineResult<AccountSnapshot> {
        let mut account = self.lock();
        if amount > account.balance {
            return Err(GameError::InsufficientFunds {
                available: account.balance,
                required: amount,
            });
        }
        account.balance -= amount;
        debug!("charged {amount} chips, balance now {}", account.balance);
        Ok(*account)
    }

    /// Credit chips back to the account (stake refunds).
    pub fn credit(&self, amount: Chips) -> AccountSnapshot {
        let mut account = self.lock();
        account.balance = account.balance.saturating_add(amount);
        debug!("credited {amount} chips, balance now {}", account.balance);
        *account
    }

    /// Apply a settlement delta atomically and return the updated account.
    ///
    /// The level is recomputed from total experience after the delta is
    /// folded in.
    ///
    /// # Errors
    ///
    /// `GameError::InsufficientFunds` if a negative `balance_change`
    /// exceeds the balance; the account is left unchanged.
    pub fn apply(&self, delta: LedgerDelta) -> EngineResult<AccountSnapshot> {
        let mut account = self.lock();
        if delta.balance_change < 0 {
            let debit = delta.balance_change.unsigned_abs();
            if debit > account.balance {
                return Err(GameError::InsufficientFunds {
                    available: account.balance,
                    required: debit,
                });
            }
            account.balance -= debit;
        } else {
            account.balance = account
                .balance
                .saturating_add(delta.balance_change as Chips);
        }
        account.games_played += u64::from(delta.played_increment);
        account.games_won += u64::from(delta.won_increment);
        account.experience = account.experience.saturating_add(delta.experience_change);
        let level = 1 + (account.experience / self.xp_per_level) as u32;
        if level > account.level {
            info!("leveled up to {level}");
        }
        account.level = level;
        Ok(*account)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WagerAccount> {
        self.account
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(
            super::models::DEFAULT_STARTING_BALANCE,
            DEFAULT_XP_PER_LEVEL,
        )
    }
}
