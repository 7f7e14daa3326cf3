//! Read-only ledger source repository.
//!
//! Delivers the voucher lines and account classifications the movement
//! generator consumes. Only issued vouchers feed a statement; drafts and
//! voided vouchers are invisible here.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use provisoria_core::ledger::{AccountType, VoucherLineView};
use provisoria_shared::PeriodKey;
use provisoria_shared::types::{AccountId, VoucherId, VoucherLineId};

use crate::entities::{accounts, sea_orm_active_enums::VoucherStatus, voucher_lines, vouchers};

/// Read-only ledger source repository.
#[derive(Debug, Clone)]
pub struct LedgerSourceRepository {
    db: DatabaseConnection,
}

impl LedgerSourceRepository {
    /// Creates a new ledger source repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the classified-order voucher lines for one case and period.
    ///
    /// Vouchers are ordered by issue date then ID (v7 UUIDs keep insertion
    /// order for same-day vouchers); lines within a voucher follow their
    /// line order. The generator relies on this ordering being stable
    /// across regenerations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn voucher_lines_for_period(
        &self,
        case_id: Uuid,
        period: PeriodKey,
    ) -> Result<Vec<VoucherLineView>, DbErr> {
        let vouchers = vouchers::Entity::find()
            .filter(vouchers::Column::CaseId.eq(case_id))
            .filter(vouchers::Column::Status.eq(VoucherStatus::Issued))
            .filter(vouchers::Column::IssueDate.gte(period.first_day()))
            .filter(vouchers::Column::IssueDate.lte(period.last_day()))
            .order_by_asc(vouchers::Column::IssueDate)
            .order_by_asc(vouchers::Column::Id)
            .all(&self.db)
            .await?;

        let mut views = Vec::new();

        for voucher in vouchers {
            let lines = voucher_lines::Entity::find()
                .filter(voucher_lines::Column::VoucherId.eq(voucher.id))
                .order_by_asc(voucher_lines::Column::LineOrder)
                .all(&self.db)
                .await?;

            for line in lines {
                views.push(VoucherLineView {
                    line_id: VoucherLineId::from_uuid(line.id),
                    voucher_id: VoucherId::from_uuid(voucher.id),
                    account_id: AccountId::from_uuid(line.account_id),
                    issue_date: voucher.issue_date,
                    description: line.description,
                    document_type: Some(voucher.document_type.clone()),
                    folio_number: Some(voucher.folio_number.clone()),
                    total_amount: line.total_amount,
                    debit_amount: line.debit_amount,
                    credit_amount: line.credit_amount,
                    line_order: line.line_order,
                });
            }
        }

        Ok(views)
    }

    /// Loads the account classification map for the whole chart of
    /// accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn account_types(&self) -> Result<HashMap<AccountId, AccountType>, DbErr> {
        let accounts = accounts::Entity::find().all(&self.db).await?;

        Ok(accounts
            .into_iter()
            .map(|a| (AccountId::from_uuid(a.id), a.account_type.into()))
            .collect())
    }
}
