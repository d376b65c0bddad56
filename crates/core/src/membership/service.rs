//! Storage-driven membership operations.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use clubfin_shared::types::MemberId;

use super::compliance::{
    AdmissionDecision, ComplianceReport, MAX_OUTSIDE_PERCENTAGE, check_bylaw_compliance_with_limit,
    check_outside_admission,
};
use super::error::MembershipError;
use super::refund::validate_refund;
use super::sync::{LedgerChange, plan_ledger_sync};
use super::types::{Member, OutsideOverride, Residence};
use crate::fiscal::FiscalYear;
use crate::store::ClubStore;

/// Membership service keeping members, bylaw limits and the dues ledger in step.
pub struct MembershipService<S: ClubStore> {
    store: Arc<S>,
    max_outside_percentage: Decimal,
}

impl<S: ClubStore> MembershipService<S> {
    /// Create a new membership service using the bylaw default limit.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            max_outside_percentage: MAX_OUTSIDE_PERCENTAGE,
        }
    }

    /// Use a different outside-member limit.
    #[must_use]
    pub fn with_outside_limit(mut self, limit: Decimal) -> Self {
        self.max_outside_percentage = limit;
        self
    }

    /// Roster of a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn roster(&self, fiscal_year: FiscalYear) -> Result<Vec<Member>, MembershipError> {
        Ok(self.store.get_members(fiscal_year).await?)
    }

    /// Bylaw compliance of a fiscal year's roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn compliance(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<ComplianceReport, MembershipError> {
        let members = self.store.get_members(fiscal_year).await?;
        Ok(check_bylaw_compliance_with_limit(
            &members,
            self.max_outside_percentage,
        ))
    }

    /// Create or update a member.
    ///
    /// Dues totals are recomputed, refund data is validated, and a member
    /// becoming an outside resident is gated by the bylaw limit. The linked
    /// payment and refund transactions are then brought in line with the
    /// member before the member itself is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Refund data is incomplete or inconsistent
    /// - The outside-member limit would be exceeded without an override
    /// - The store fails
    pub async fn save_member(
        &self,
        mut member: Member,
        outside_override: Option<OutsideOverride>,
    ) -> Result<Member, MembershipError> {
        member.dues.recalculate();
        validate_refund(&member)?;

        let fiscal_year = member.fiscal_year;
        let roster = self.store.get_members(fiscal_year).await?;
        let previous = roster.iter().find(|m| m.id == member.id);

        let becomes_outside = member.residence == Residence::Outside
            && previous.is_none_or(|p| p.residence != Residence::Outside);
        if becomes_outside {
            let others: Vec<Member> = roster
                .iter()
                .filter(|m| m.id != member.id)
                .cloned()
                .collect();
            match check_outside_admission(&others, self.max_outside_percentage, outside_override)? {
                AdmissionDecision::WithinLimit => {}
                AdmissionDecision::Overridden(recorded) => {
                    info!(member_id = %member.id, "Outside member admitted by override");
                    member.outside_override = Some(recorded);
                }
            }
        }

        let payment = match member.payment_transaction_id {
            Some(id) => self.store.get_transaction(fiscal_year, id).await?,
            None => None,
        };
        let refund = match member.refund_transaction_id {
            Some(id) => self.store.get_transaction(fiscal_year, id).await?,
            None => None,
        };

        let plan = plan_ledger_sync(&member, payment.as_ref(), refund.as_ref());
        for change in &plan.changes {
            match change {
                LedgerChange::Create(tx) => self.store.add_transaction(tx).await?,
                LedgerChange::Update(tx) => self.store.update_transaction(tx).await?,
                LedgerChange::Delete(id) => {
                    self.store.delete_transaction(fiscal_year, *id).await?;
                }
            }
        }
        debug!(
            member_id = %member.id,
            changes = plan.changes.len(),
            "Dues ledger synchronized"
        );

        member.payment_transaction_id = plan.payment_transaction_id;
        member.refund_transaction_id = plan.refund_transaction_id;
        self.store.save_member(&member).await?;

        Ok(member)
    }

    /// Delete a member and the transactions linked to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the member does not exist or the store fails.
    pub async fn delete_member(
        &self,
        fiscal_year: FiscalYear,
        id: MemberId,
    ) -> Result<(), MembershipError> {
        let member = self
            .store
            .get_members(fiscal_year)
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or(MembershipError::NotFound(id))?;

        for linked in [member.refund_transaction_id, member.payment_transaction_id]
            .into_iter()
            .flatten()
        {
            self.store.delete_transaction(fiscal_year, linked).await?;
        }
        self.store.delete_member(fiscal_year, id).await?;

        info!(member_id = %id, %fiscal_year, "Member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ExpenseType, TransactionType};
    use crate::membership::types::{MemberDues, MemberStatus, MemberType};
    use crate::store::mock::MockClubStore;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const FY: FiscalYear = FiscalYear::new(2025);

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(residence: Residence) -> Member {
        Member::new(
            FY,
            "Nakamura",
            MemberType::New,
            MemberStatus::Family,
            residence,
            MemberDues::base(dec!(675)),
        )
    }

    #[tokio::test]
    async fn test_paid_member_gets_revenue_transaction() {
        let store = Arc::new(MockClubStore::new());
        let service = MembershipService::new(store.clone());

        let saved = service
            .save_member(member(Residence::Inside).paid_on(date(2025, 4, 2)), None)
            .await
            .unwrap();

        let transactions = store.all_transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_type, TransactionType::Revenue);
        assert_eq!(transactions[0].amount, dec!(675));
        assert_eq!(saved.payment_transaction_id, Some(transactions[0].id));
        assert_eq!(store.all_members(), vec![saved]);
    }

    #[tokio::test]
    async fn test_resave_keeps_single_linked_transaction() {
        let store = Arc::new(MockClubStore::new());
        let service = MembershipService::new(store.clone());

        let mut saved = service
            .save_member(member(Residence::Inside).paid_on(date(2025, 4, 2)), None)
            .await
            .unwrap();
        saved.dues.base_dues = dec!(475);
        let saved = service.save_member(saved, None).await.unwrap();

        let transactions = store.all_transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, dec!(475));
        assert_eq!(saved.dues.total_realized, dec!(475));
    }

    #[tokio::test]
    async fn test_refund_adds_opex_and_unpay_removes_both() {
        let store = Arc::new(MockClubStore::new());
        let service = MembershipService::new(store.clone());

        let refunded = service
            .save_member(
                member(Residence::Inside)
                    .paid_on(date(2025, 4, 2))
                    .refunded_on(date(2025, 6, 1), dec!(200), "Injury"),
                None,
            )
            .await
            .unwrap();
        let transactions = store.all_transactions();
        assert_eq!(transactions.len(), 2);
        assert!(
            transactions
                .iter()
                .any(|t| t.expense_type == Some(ExpenseType::Opex) && t.amount == dec!(200))
        );

        let mut cleared = refunded;
        cleared.date_paid = None;
        cleared.refunded = false;
        let cleared = service.save_member(cleared, None).await.unwrap();

        assert!(store.all_transactions().is_empty());
        assert_eq!(cleared.payment_transaction_id, None);
        assert_eq!(cleared.refund_transaction_id, None);
    }

    #[tokio::test]
    async fn test_invalid_refund_writes_nothing() {
        let store = Arc::new(MockClubStore::new());
        let service = MembershipService::new(store.clone());

        let result = service
            .save_member(
                member(Residence::Inside)
                    .paid_on(date(2025, 4, 2))
                    .refunded_on(date(2025, 6, 1), dec!(200), ""),
                None,
            )
            .await;

        assert!(matches!(result, Err(MembershipError::MissingRefundReason)));
        assert!(store.all_transactions().is_empty());
        assert!(store.all_members().is_empty());
    }

    #[tokio::test]
    async fn test_outside_member_over_limit_needs_override() {
        let store = Arc::new(MockClubStore::new().with_members(vec![
            member(Residence::Inside),
            member(Residence::Outside),
        ]));
        let service = MembershipService::new(store.clone());

        let rejected = service.save_member(member(Residence::Outside), None).await;
        assert!(matches!(
            rejected,
            Err(MembershipError::OutsideLimitExceeded { .. })
        ));

        let justification = OutsideOverride {
            justification: "Grandfathered household".into(),
            recorded_on: date(2025, 3, 1),
        };
        let admitted = service
            .save_member(member(Residence::Outside), Some(justification.clone()))
            .await
            .unwrap();
        assert_eq!(admitted.outside_override, Some(justification));

        let report = service.compliance(FY).await.unwrap();
        assert!(!report.compliant);
        assert_eq!(report.count.total, 3);
    }

    #[tokio::test]
    async fn test_existing_outside_member_is_not_regated() {
        let existing = member(Residence::Outside);
        let store = Arc::new(MockClubStore::new().with_members(vec![
            member(Residence::Outside),
            existing.clone(),
        ]));
        let service = MembershipService::new(store);

        let updated = service
            .save_member(existing.paid_on(date(2025, 4, 2)), None)
            .await;
        assert!(updated.is_ok());
    }

    #[tokio::test]
    async fn test_delete_member_removes_linked_transactions() {
        let store = Arc::new(MockClubStore::new());
        let service = MembershipService::new(store.clone());
        let saved = service
            .save_member(
                member(Residence::Inside)
                    .paid_on(date(2025, 4, 2))
                    .refunded_on(date(2025, 6, 1), dec!(100), "Moved"),
                None,
            )
            .await
            .unwrap();

        service.delete_member(FY, saved.id).await.unwrap();

        assert!(store.all_transactions().is_empty());
        assert!(store.all_members().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_member() {
        let service = MembershipService::new(Arc::new(MockClubStore::new()));
        let id = MemberId::new();
        let result = service.delete_member(FY, id).await;
        assert!(matches!(result, Err(MembershipError::NotFound(missing)) if missing == id));
    }
}
