//! Event summary with the greedy settlement mode.
//!
//! Unlike the optimized path, the summary only knows the people listed as
//! event participants: consumers or payers missing from that list are
//! ignored for balances, settlements and consumption details.

use crate::core::activity::Event;
use crate::core::amount::{round_cents, serialize_number};
use crate::core::ledger::Ledger;
use crate::core::person::PersonName;
use crate::optimization::consumption::{calculate_consumption_details, ConsumptionDetail};
use crate::optimization::greedy::settle_greedy;
use crate::optimization::settlement::SettlementTransaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A participant's net balance: paid minus consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub name: PersonName,
    #[serde(serialize_with = "serialize_number")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of every non-void item total, after tax and discount.
    #[serde(serialize_with = "serialize_number")]
    pub total_expense: Decimal,
    pub settlements: Vec<SettlementTransaction>,
    pub consumption_details: Vec<ConsumptionDetail>,
    /// One entry per participant, in participant order.
    pub balances: Vec<Balance>,
}

/// Summarize an event: total spend, balances and greedy settlements.
pub fn calculate_summary(event: &Event) -> Summary {
    let participants = event.participant_names();
    let known: HashSet<&PersonName> = participants.iter().collect();

    let mut ledger = Ledger::new();
    for name in &participants {
        ledger.touch(name);
    }

    let mut total_expense = Decimal::ZERO;
    for activity in &event.activities {
        let activity_total = activity.total();
        total_expense += activity_total;

        if known.contains(&activity.payer_name) {
            ledger.credit(&activity.payer_name, activity_total);
        }

        for item in activity.items.iter().filter(|item| !item.is_void()) {
            let share = item.share_per_consumer();
            for member in item.member_names.iter().filter(|m| known.contains(m)) {
                ledger.debit(member, share);
            }
        }
    }

    let balances = participants
        .iter()
        .map(|name| Balance {
            name: name.clone(),
            amount: round_cents(ledger.position(name)),
        })
        .collect();

    let consumption_details = calculate_consumption_details(&event.activities)
        .into_iter()
        .filter(|detail| known.contains(&detail.user_name))
        .filter(|detail| detail.total_consumption > Decimal::ZERO)
        .collect();

    Summary {
        total_expense,
        settlements: settle_greedy(&ledger),
        consumption_details,
        balances,
    }
}
