use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    require_non_negative, require_positive, require_text, ValidationReport,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountDraft {
    pub name: String,
    pub number: String,
    pub balance: f64,
}

impl AccountDraft {
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "name", &self.name, "account name");
        require_non_negative(&mut report, "balance", self.balance, "balance");
        report.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Transfer,
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::Deposit
    }
}

/// Fee charged on transfers, proportional to the amount.
pub fn transfer_fee(amount: f64, fee_rate: f64) -> f64 {
    amount * fee_rate
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionDraft {
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub fee: f64,
    pub destination_account_id: String,
}

impl TransactionDraft {
    /// Derived fee; only transfers carry one.
    pub fn recompute_fee(&mut self, fee_rate: f64) {
        self.fee = match self.kind {
            TransactionKind::Transfer => transfer_fee(self.amount, fee_rate),
            _ => 0.0,
        };
    }

    /// Money can only leave an account that covers the amount plus fee.
    pub fn validate(&self, balance: f64) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "accountId", &self.account_id, "account");
        require_positive(&mut report, "amount", self.amount, "amount");
        match self.kind {
            TransactionKind::Deposit => {}
            TransactionKind::Withdraw | TransactionKind::Transfer => {
                if balance < self.amount + self.fee {
                    report.push("amount", "account balance can't cover this transaction");
                }
            }
        }
        if self.kind == TransactionKind::Transfer {
            require_text(
                &mut report,
                "destinationAccountId",
                &self.destination_account_id,
                "destination account",
            );
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdrawal_needs_covering_balance() {
        let d = TransactionDraft {
            account_id: "a1".into(),
            kind: TransactionKind::Withdraw,
            amount: 5000.0,
            ..Default::default()
        };
        assert!(d.validate(5000.0).is_ok());
        assert!(d.validate(4999.0).is_err());
    }

    #[test]
    fn transfer_includes_fee_in_cover_check() {
        let mut d = TransactionDraft {
            account_id: "a1".into(),
            kind: TransactionKind::Transfer,
            amount: 10000.0,
            destination_account_id: "a2".into(),
            ..Default::default()
        };
        d.recompute_fee(0.01);
        assert_eq!(d.fee, 100.0);
        assert!(d.validate(10100.0).is_ok());
        assert!(d.validate(10099.0).is_err());
    }

    #[test]
    fn deposit_ignores_balance() {
        let mut d = TransactionDraft {
            account_id: "a1".into(),
            kind: TransactionKind::Deposit,
            amount: 100.0,
            ..Default::default()
        };
        d.recompute_fee(0.01);
        assert_eq!(d.fee, 0.0);
        assert!(d.validate(0.0).is_ok());
    }

    #[test]
    fn transfer_requires_destination() {
        let d = TransactionDraft {
            account_id: "a1".into(),
            kind: TransactionKind::Transfer,
            amount: 100.0,
            ..Default::default()
        };
        let report = d.validate(1000.0).unwrap_err();
        assert!(report.message_for("destinationAccountId").is_some());
    }
}
