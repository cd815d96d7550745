//! Fetches everything a delivery report needs.

use chrono_tz::Tz;
use futures::future::try_join_all;
use pasok_core::domain::{Goods, Kitchen, Period, Supplier, Transaction, TransactionStatus};
use pasok_core::reports::{ReportFilter, ReportService};
use pasok_shared::AppError;
use tracing::{debug, info, instrument};

use crate::api::ListQuery;
use crate::api::transactions::TransactionQuery;
use crate::client::ApiClient;
use crate::error::ClientResult;

/// Raw material for one report.
#[derive(Debug, Clone)]
pub struct ReportInput {
    /// The kitchen the report is for.
    pub kitchen: Kitchen,
    /// The reporting period.
    pub period: Period,
    /// Completed transactions with their line items.
    pub transactions: Vec<Transaction>,
    /// Goods lookup list.
    pub goods: Vec<Goods>,
    /// Supplier lookup list.
    pub suppliers: Vec<Supplier>,
}

/// Pulls report transactions and lookups from the API.
pub struct TransactionFetcher<'a> {
    client: &'a ApiClient,
    tz: Tz,
}

impl<'a> TransactionFetcher<'a> {
    /// Creates a fetcher over `client`; date filters are matched in `tz`.
    #[must_use]
    pub fn new(client: &'a ApiClient, tz: Tz) -> Self {
        Self { client, tz }
    }

    /// Fetches the kitchen, period, completed transactions and lookups.
    ///
    /// The transaction list is walked page by page; details are then fetched
    /// one request per transaction, concurrently with the goods and supplier
    /// lists. Any failed request fails the whole fetch. Details outside the
    /// filter are dropped even if the server listed them.
    #[instrument(skip(self), fields(kitchen = %filter.kitchen_id, period = %filter.period_id))]
    pub async fn fetch(&self, filter: &ReportFilter) -> ClientResult<ReportInput> {
        let (kitchen, period) = tokio::try_join!(
            self.client.fetch::<Kitchen>(filter.kitchen_id),
            self.client.fetch::<Period>(filter.period_id),
        )?;
        ReportService::validate_filter(filter, &period).map_err(AppError::from)?;

        let query = TransactionQuery {
            kitchen_id: Some(filter.kitchen_id),
            period_id: Some(filter.period_id),
            status: Some(TransactionStatus::Completed),
            date: filter.date,
            ..TransactionQuery::default()
        };
        let listed: Vec<Transaction> = self.client.list_all(&query.to_list_query()).await?;
        debug!(count = listed.len(), "listed report transactions");

        let details = try_join_all(
            listed
                .iter()
                .map(|t| self.client.fetch::<Transaction>(t.id)),
        );
        let all = ListQuery::default();
        let (details, goods, suppliers) = tokio::try_join!(
            details,
            self.client.list_all::<Goods>(&all),
            self.client.list_all::<Supplier>(&all),
        )?;

        let transactions: Vec<Transaction> = details
            .into_iter()
            .filter(|t| filter.admits(t, self.tz))
            .collect();
        info!(
            transactions = transactions.len(),
            goods = goods.len(),
            suppliers = suppliers.len(),
            "report data fetched"
        );

        Ok(ReportInput {
            kitchen,
            period,
            transactions,
            goods,
            suppliers,
        })
    }
}
