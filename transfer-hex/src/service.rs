//! Transfer engine.
//!
//! Orchestrates a single transfer through the store and rate-source ports:
//! validation, balance check, optional conversion, atomic dual balance
//! mutation, ledger append. Contains NO infrastructure logic.

use rust_decimal::Decimal;

use transfer_types::{
    Account, AccountUpdate, Currency, ExchangeRate, LedgerEntry, NewLedgerEntry, OwnerId,
    RateSource, TransferError, TransferPlan, TransferStore, convert_amount, validate_amount,
};

/// Application service performing account-to-account transfers.
///
/// Generic over `S: TransferStore` and `R: RateSource` - the adapters are
/// injected at construction; there is no ambient configuration lookup.
pub struct TransferService<S: TransferStore, R: RateSource> {
    store: S,
    rates: R,
}

impl<S: TransferStore, R: RateSource> TransferService<S, R> {
    /// Creates a new transfer service with the given collaborators.
    pub fn new(store: S, rates: R) -> Self {
        Self { store, rates }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Performs a single transfer and returns the persisted ledger entry.
    ///
    /// Each step short-circuits on failure; no balance is mutated before the
    /// rate lookup, and the two balance writes plus the ledger append commit
    /// atomically or not at all. Failed transfers leave no ledger entry.
    pub async fn perform_transfer(
        &self,
        source_owner: OwnerId,
        target_owner: OwnerId,
        amount: Decimal,
    ) -> Result<LedgerEntry, TransferError> {
        tracing::info!(%amount, from = %source_owner, to = %target_owner, "perform transfer");

        validate_amount(amount)?;

        if source_owner == target_owner {
            return Err(TransferError::InvalidTransfer(source_owner));
        }

        let source = self.get_account(source_owner).await?;
        let target = self.get_account(target_owner).await?;

        if !source.has_sufficient_balance(amount) {
            return Err(TransferError::InsufficientBalance {
                available: source.balance,
                requested: amount,
            });
        }

        // The debited amount is always the caller-specified amount in the
        // source currency; only the credited side is converted.
        let (credited, rate) = if source.currency == target.currency {
            tracing::info!(currency = %source.currency, "same-currency transfer at parity");
            (amount, Decimal::ONE)
        } else {
            let quote = self
                .rates
                .rate(source.currency, target.currency)
                .await?;
            tracing::info!(
                from = %source.currency, to = %target.currency, rate = %quote.rate,
                "cross-currency transfer"
            );
            (convert_amount(amount, quote.rate), quote.rate)
        };

        let residual_balance = source.balance - amount;
        let plan = TransferPlan {
            source: AccountUpdate {
                owner_id: source.owner_id,
                observed_balance: source.balance,
                new_balance: residual_balance,
            },
            target: AccountUpdate {
                owner_id: target.owner_id,
                observed_balance: target.balance,
                new_balance: target.balance + credited,
            },
            entry: NewLedgerEntry::for_transfer(&source, &target, amount, residual_balance, rate),
        };

        let entry = self.store.commit_transfer(&plan).await?;
        tracing::info!(id = %entry.id, status = %entry.record.status, "ledger entry saved");
        Ok(entry)
    }

    /// Looks up the current spot rate for a currency pair.
    pub async fn exchange_rate(
        &self,
        from: Currency,
        to: Currency,
    ) -> Result<ExchangeRate, TransferError> {
        self.rates.rate(from, to).await.map_err(Into::into)
    }

    async fn get_account(&self, owner_id: OwnerId) -> Result<Account, TransferError> {
        self.store
            .get_account(owner_id)
            .await?
            .ok_or(TransferError::AccountNotFound(owner_id))
    }
}
