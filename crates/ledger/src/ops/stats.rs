use crate::{DashboardStats, OwnerContext, ResultLedger, compute_stats};

use super::Ledger;

impl Ledger {
    /// Dashboard totals for the owner, recomputed from a full snapshot.
    ///
    /// Consumers call this again on every change notification; recomputing
    /// from `list` snapshots keeps the numbers correct under duplicate or
    /// out-of-order delivery.
    pub async fn dashboard_stats(&self, owner: &OwnerContext) -> ResultLedger<DashboardStats> {
        let transactions = self.all_transactions(owner).await?;
        let goals = self.all_goals(owner).await?;
        Ok(compute_stats(&transactions, &goals))
    }
}
