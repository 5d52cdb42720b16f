//! TransferService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use transfer_rates::FixedRateSource;
    use transfer_types::{
        Account, Currency, LedgerEntry, LedgerEntryId, OwnerId, RateError, RateSource, StoreError,
        TransferError, TransferPlan, TransferStore,
    };

    use crate::TransferService;

    fn usd() -> Currency {
        Currency::parse("USD").unwrap()
    }

    fn eur() -> Currency {
        Currency::parse("EUR").unwrap()
    }

    /// In-memory store for testing the engine. Applies plans with the same
    /// observed-balance guard and all-or-nothing behavior as the SQLite
    /// adapter, and can simulate a failing ledger append.
    pub struct MockStore {
        accounts: Mutex<HashMap<OwnerId, Account>>,
        entries: Mutex<Vec<LedgerEntry>>,
        fail_ledger_append: AtomicBool,
    }

    impl MockStore {
        pub fn new(accounts: Vec<Account>) -> Self {
            Self {
                accounts: Mutex::new(
                    accounts.into_iter().map(|a| (a.owner_id, a)).collect(),
                ),
                entries: Mutex::new(Vec::new()),
                fail_ledger_append: AtomicBool::new(false),
            }
        }

        pub fn fail_ledger_append(&self) {
            self.fail_ledger_append.store(true, Ordering::SeqCst);
        }

        pub fn balance_of(&self, owner_id: OwnerId) -> Decimal {
            self.accounts.lock().unwrap()[&owner_id].balance
        }

        pub fn entry_count(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TransferStore for MockStore {
        async fn get_account(&self, owner_id: OwnerId) -> Result<Option<Account>, StoreError> {
            Ok(self.accounts.lock().unwrap().get(&owner_id).cloned())
        }

        async fn commit_transfer(&self, plan: &TransferPlan) -> Result<LedgerEntry, StoreError> {
            let mut accounts = self.accounts.lock().unwrap();

            for update in [&plan.source, &plan.target] {
                let current = accounts
                    .get(&update.owner_id)
                    .ok_or_else(|| StoreError::Database("account vanished".into()))?;
                if current.balance != update.observed_balance {
                    return Err(StoreError::Conflict(format!(
                        "account {} was modified concurrently",
                        update.owner_id
                    )));
                }
            }

            // The ledger append is part of the same commit: if it fails,
            // neither balance moves.
            if self.fail_ledger_append.load(Ordering::SeqCst) {
                return Err(StoreError::Database("ledger append failed".into()));
            }

            for update in [&plan.source, &plan.target] {
                accounts.get_mut(&update.owner_id).unwrap().balance = update.new_balance;
            }

            let mut entries = self.entries.lock().unwrap();
            let id = LedgerEntryId::new(entries.len() as i64 + 1);
            let entry = LedgerEntry::from_new(id, plan.entry.clone());
            entries.push(entry.clone());
            Ok(entry)
        }

        async fn get_entry(&self, id: LedgerEntryId) -> Result<Option<LedgerEntry>, StoreError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned())
        }
    }

    /// Rate source that simulates a transport failure.
    struct DownRateSource;

    #[async_trait]
    impl RateSource for DownRateSource {
        async fn rate(
            &self,
            _from: Currency,
            _to: Currency,
        ) -> Result<transfer_types::ExchangeRate, RateError> {
            Err(RateError::Unavailable("connection refused".into()))
        }
    }

    fn service_with(
        accounts: Vec<Account>,
        rates: FixedRateSource,
    ) -> TransferService<MockStore, FixedRateSource> {
        TransferService::new(MockStore::new(accounts), rates)
    }

    fn two_usd_accounts() -> Vec<Account> {
        vec![
            Account::new(OwnerId::new(1), usd(), dec!(200.00)),
            Account::new(OwnerId::new(2), usd(), dec!(300.00)),
        ]
    }

    #[tokio::test]
    async fn test_same_owner_is_rejected_without_side_effects() {
        let service = service_with(two_usd_accounts(), FixedRateSource::new());

        let result = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(1), dec!(10.00))
            .await;

        assert!(matches!(result, Err(TransferError::InvalidTransfer(id)) if id == OwnerId::new(1)));
        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(200.00));
        assert_eq!(service.store().entry_count(), 0);
    }

    #[tokio::test]
    async fn test_same_currency_transfer_conserves_balances_exactly() {
        let service = service_with(two_usd_accounts(), FixedRateSource::new());

        let entry = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(100.00))
            .await
            .unwrap();

        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(100.00));
        assert_eq!(service.store().balance_of(OwnerId::new(2)), dec!(400.00));
        assert_eq!(entry.record.exchange_rate, dec!(1));
        assert_eq!(entry.record.available_balance, dec!(200.00));
        assert_eq!(entry.record.residual_balance, dec!(100.00));
        assert_eq!(entry.record.amount, dec!(100.00));
    }

    #[tokio::test]
    async fn test_cross_currency_transfer_converts_the_credited_side() {
        let accounts = vec![
            Account::new(OwnerId::new(1), usd(), dec!(200.00)),
            Account::new(OwnerId::new(2), eur(), dec!(300.00)),
        ];
        let rates = FixedRateSource::new().with_rate(usd(), eur(), dec!(1.10));
        let service = service_with(accounts, rates);

        let entry = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(100.00))
            .await
            .unwrap();

        // Debited in USD, credited in EUR at the fetched rate.
        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(100.00));
        assert_eq!(service.store().balance_of(OwnerId::new(2)), dec!(410.00));
        assert_eq!(entry.record.exchange_rate, dec!(1.10));
        assert_eq!(entry.record.residual_balance, dec!(100.00));
        assert_eq!(entry.record.base_currency, usd());
        assert_eq!(entry.record.target_currency, eur());
    }

    #[tokio::test]
    async fn test_conversion_rounds_half_up_once() {
        let accounts = vec![
            Account::new(OwnerId::new(1), usd(), dec!(10.00)),
            Account::new(OwnerId::new(2), eur(), dec!(0.00)),
        ];
        let rates = FixedRateSource::new().with_rate(usd(), eur(), dec!(0.5));
        let service = service_with(accounts, rates);

        // 0.25 * 0.5 = 0.125 -> 0.13 at the half-point
        service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(0.25))
            .await
            .unwrap();

        assert_eq!(service.store().balance_of(OwnerId::new(2)), dec!(0.13));
    }

    #[tokio::test]
    async fn test_full_balance_transfer_leaves_zero() {
        let service = service_with(two_usd_accounts(), FixedRateSource::new());

        let entry = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(200.00))
            .await
            .unwrap();

        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(0.00));
        assert_eq!(entry.record.residual_balance, dec!(0.00));
    }

    #[tokio::test]
    async fn test_one_cent_over_balance_is_insufficient() {
        let service = service_with(two_usd_accounts(), FixedRateSource::new());

        let result = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(200.01))
            .await;

        match result {
            Err(TransferError::InsufficientBalance {
                available,
                requested,
            }) => {
                assert_eq!(available, dec!(200.00));
                assert_eq!(requested, dec!(200.01));
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
        assert_eq!(service.store().entry_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_target_does_not_mutate_source() {
        let accounts = vec![Account::new(OwnerId::new(1), usd(), dec!(200.00))];
        let service = service_with(accounts, FixedRateSource::new());

        let result = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(42), dec!(10.00))
            .await;

        assert!(
            matches!(result, Err(TransferError::AccountNotFound(id)) if id == OwnerId::new(42))
        );
        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(200.00));
        assert_eq!(service.store().entry_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_source_reports_the_source_id() {
        let service = service_with(Vec::new(), FixedRateSource::new());

        let result = service
            .perform_transfer(OwnerId::new(7), OwnerId::new(8), dec!(10.00))
            .await;

        assert!(matches!(result, Err(TransferError::AccountNotFound(id)) if id == OwnerId::new(7)));
    }

    #[tokio::test]
    async fn test_missing_rate_fails_before_any_mutation() {
        let accounts = vec![
            Account::new(OwnerId::new(1), usd(), dec!(200.00)),
            Account::new(OwnerId::new(2), eur(), dec!(300.00)),
        ];
        let service = service_with(accounts, FixedRateSource::new());

        let result = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(100.00))
            .await;

        assert!(matches!(
            result,
            Err(TransferError::ExchangeRateNotFound { .. })
        ));
        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(200.00));
        assert_eq!(service.store().balance_of(OwnerId::new(2)), dec!(300.00));
        assert_eq!(service.store().entry_count(), 0);
    }

    #[tokio::test]
    async fn test_rate_source_outage_is_surfaced() {
        let accounts = vec![
            Account::new(OwnerId::new(1), usd(), dec!(200.00)),
            Account::new(OwnerId::new(2), eur(), dec!(300.00)),
        ];
        let service = TransferService::new(MockStore::new(accounts), DownRateSource);

        let result = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(100.00))
            .await;

        assert!(matches!(
            result,
            Err(TransferError::ExchangeRateUnavailable(_))
        ));
        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(200.00));
    }

    #[tokio::test]
    async fn test_failed_ledger_append_moves_no_balance() {
        let service = service_with(two_usd_accounts(), FixedRateSource::new());
        service.store().fail_ledger_append();

        let result = service
            .perform_transfer(OwnerId::new(1), OwnerId::new(2), dec!(100.00))
            .await;

        assert!(matches!(result, Err(TransferError::Storage(_))));
        assert_eq!(service.store().balance_of(OwnerId::new(1)), dec!(200.00));
        assert_eq!(service.store().balance_of(OwnerId::new(2)), dec!(300.00));
        assert_eq!(service.store().entry_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_amounts_are_rejected() {
        let service = service_with(two_usd_accounts(), FixedRateSource::new());

        for amount in [dec!(0), dec!(-5.00), dec!(1.001)] {
            let result = service
                .perform_transfer(OwnerId::new(1), OwnerId::new(2), amount)
                .await;
            assert!(
                matches!(result, Err(TransferError::InvalidAmount(_))),
                "amount {amount} should be rejected"
            );
        }
        assert_eq!(service.store().entry_count(), 0);
    }

    #[tokio::test]
    async fn test_exchange_rate_lookup_passthrough() {
        let rates = FixedRateSource::new().with_rate(usd(), eur(), dec!(0.92));
        let service = service_with(Vec::new(), rates);

        let rate = service.exchange_rate(usd(), eur()).await.unwrap();
        assert_eq!(rate.rate, dec!(0.92));
        assert_eq!(rate.from_currency, usd());
    }
}
