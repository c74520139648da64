//! Two-party settlement of shared expenses.
//!
//! Each shared expense was paid by one person. The person who paid less
//! transfers half the gap so both end up having contributed the same.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::fmt::yen;

/// One shared expense and who paid it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry<P> {
    pub payer_id: P,
    /// Refunds are not netted here; an entry is always money paid out.
    pub amount: u64,
}

impl<P> ExpenseEntry<P> {
    pub fn new(payer_id: P, amount: u64) -> Self {
        Self { payer_id, amount }
    }
}

/// Who pays whom, and how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult<P> {
    /// Sum per payer, in the order payers first appear in the input.
    /// Saturates at `u64::MAX` instead of overflowing.
    pub user_totals: Vec<(P, u64)>,
    pub more_payer_user_id: Option<P>,
    /// `None` when only one person paid anything.
    pub less_payer_user_id: Option<P>,
    /// What the lesser payer owes the greater one. Never negative, never rounded.
    pub difference: f64,
}

impl<P> Default for SettlementResult<P> {
    fn default() -> Self {
        Self {
            user_totals: Vec::new(),
            more_payer_user_id: None,
            less_payer_user_id: None,
            difference: 0.0,
        }
    }
}

/// Reduce shared expenses to a single balancing payment.
///
/// Only the first two payers encountered are compared. Later payers still
/// get a total but do not take part in the payment.
pub fn calculate_settlement<P>(entries: &[ExpenseEntry<P>]) -> SettlementResult<P>
where
    P: Clone + PartialEq + Debug,
{
    let mut user_totals: Vec<(P, u64)> = Vec::new();
    for entry in entries {
        match user_totals.iter_mut().find(|(id, _)| *id == entry.payer_id) {
            Some((_, total)) => *total = total.saturating_add(entry.amount),
            None => user_totals.push((entry.payer_id.clone(), entry.amount)),
        }
    }

    let (more_payer_user_id, less_payer_user_id, difference) = match user_totals.as_slice() {
        [] => return SettlementResult::default(),
        [(only, total)] => (Some(only.clone()), None, *total as f64 / 2.0),
        [(a, a_total), (b, b_total), rest @ ..] => {
            if !rest.is_empty() {
                warn!(
                    payers = user_totals.len(),
                    ignored = ?rest.iter().map(|(id, _)| id).collect::<Vec<_>>(),
                    "settlement compares the first two payers only"
                );
            }
            let (more, less) = if a_total >= b_total { (a, b) } else { (b, a) };
            let difference = a_total.abs_diff(*b_total) as f64 / 2.0;
            (Some(more.clone()), Some(less.clone()), difference)
        }
    };

    SettlementResult {
        user_totals,
        more_payer_user_id,
        less_payer_user_id,
        difference,
    }
}

impl<P: PartialEq> SettlementResult<P> {
    pub fn total_for(&self, payer_id: &P) -> u64 {
        self.user_totals
            .iter()
            .find(|(id, _)| id == payer_id)
            .map(|(_, total)| *total)
            .unwrap_or(0)
    }

    pub fn is_settled(&self) -> bool {
        self.difference == 0.0
    }
}

impl<P: Eq + Hash + std::fmt::Display> SettlementResult<P> {
    /// One-line summary using display names where known, ids otherwise.
    pub fn describe(&self, names: &HashMap<P, String>) -> String {
        let label = |id: &P| names.get(id).cloned().unwrap_or_else(|| id.to_string());
        match (&self.more_payer_user_id, &self.less_payer_user_id) {
            (None, _) => "No shared expenses".to_string(),
            _ if self.is_settled() => "Settled: nobody owes anything".to_string(),
            (Some(more), Some(less)) => {
                format!("{} pays {} {}", label(less), label(more), yen(self.difference))
            }
            (Some(more), None) => {
                format!("The other party pays {} {}", label(more), yen(self.difference))
            }
        }
    }
}
