//! Settlement-asset account book.
//!
//! Tracks per-address balances of the single settlement asset. All mutations
//! are atomic: either the full operation succeeds or the ledger is unchanged.
//! The engine custodies auction funds through its own address here; bidders
//! and routers are ordinary accounts.

use std::collections::HashMap;

use crate::{Result, SwiftfillError, UniversalAddress};

/// Single-asset balance ledger.
///
/// Stands in for the external fungible token ledger: the engine only ever
/// calls `transfer`, the burn-and-mint rail calls `burn` on departure and
/// `mint` on arrival.
#[derive(Debug, Default)]
pub struct TokenLedger {
    /// Per-address balances.
    accounts: HashMap<UniversalAddress, u128>,
}

impl TokenLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Credit newly minted tokens to an account.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::ArithmeticOverflow`] if the balance would
    /// wrap.
    pub fn mint(&mut self, to: UniversalAddress, amount: u128) -> Result<()> {
        let balance = self.accounts.entry(to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(SwiftfillError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Destroy tokens held by an account.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::InsufficientBalance`] if the account holds
    /// less than `amount`.
    pub fn burn(&mut self, from: UniversalAddress, amount: u128) -> Result<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(SwiftfillError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        self.accounts.insert(from, balance - amount);
        Ok(())
    }

    /// Move tokens between accounts. A self-transfer is a balance check
    /// and nothing else.
    ///
    /// # Errors
    /// - [`SwiftfillError::InsufficientBalance`] if `from` holds less than
    ///   `amount`
    /// - [`SwiftfillError::ArithmeticOverflow`] if the recipient balance
    ///   would wrap
    ///
    /// On error the ledger is unchanged.
    pub fn transfer(
        &mut self,
        from: UniversalAddress,
        to: UniversalAddress,
        amount: u128,
    ) -> Result<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(SwiftfillError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(SwiftfillError::ArithmeticOverflow)?;
        self.accounts.insert(from, from_balance - amount);
        self.accounts.insert(to, to_balance);
        Ok(())
    }

    /// Balance of an account. Unknown accounts hold zero.
    #[must_use]
    pub fn balance_of(&self, account: UniversalAddress) -> u128 {
        self.accounts.get(&account).copied().unwrap_or(0)
    }

    /// Total supply across all accounts.
    #[must_use]
    pub fn total_supply(&self) -> u128 {
        self.accounts
            .values()
            .fold(0u128, |acc, balance| acc.saturating_add(*balance))
    }
}
