//! Immutable ledger entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A record of money movement posted against an account. Rows generated by
/// the payment poster carry a `source_subscription` back-link and are not
/// edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub owner: Uuid,
    pub tx_type: TxType,
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_subscription: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        owner: Uuid,
        tx_type: TxType,
        date: NaiveDate,
        amount: f64,
        currency: impl Into<String>,
        account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            tx_type,
            date,
            amount,
            currency: currency.into(),
            account_id,
            project_id: None,
            category_id: None,
            payee_id: None,
            note: None,
            tags: Vec::new(),
            source_subscription: None,
        }
    }

    /// True for rows created by the payment poster.
    pub fn is_subscription_generated(&self) -> bool {
        self.source_subscription.is_some()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Transaction {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {:.2} {} ({})", self.tx_type, self.amount, self.currency, self.date)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Direction of a ledger entry.
pub enum TxType {
    Income,
    Expense,
    Transfer,
}

impl TxType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "income" | "in" => Some(TxType::Income),
            "expense" | "out" => Some(TxType::Expense),
            "transfer" | "xfer" => Some(TxType::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
            TxType::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}
