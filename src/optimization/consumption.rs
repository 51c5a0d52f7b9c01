use crate::core::activity::Activity;
use crate::core::amount::{round_cents, serialize_number};
use crate::core::person::PersonName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One line of a person's consumption breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedItem {
    pub item_name: String,
    pub activity_title: String,
    #[serde(serialize_with = "serialize_number")]
    pub price: Decimal,
    #[serde(serialize_with = "serialize_number")]
    pub quantity: Decimal,
    /// This person's share of the item, rounded to cents.
    #[serde(serialize_with = "serialize_number")]
    pub split_amount: Decimal,
}

/// Everything one person consumed, whoever paid for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionDetail {
    pub user_name: PersonName,
    #[serde(serialize_with = "serialize_number")]
    pub total_consumption: Decimal,
    pub items: Vec<ConsumedItem>,
}

/// Sum each person's share of every item they consumed.
///
/// Totals accumulate unrounded and are rounded to cents once at the end.
/// The result is sorted by total, largest first; people with equal totals
/// keep the order in which they first consumed something.
pub fn calculate_consumption_details(activities: &[Activity]) -> Vec<ConsumptionDetail> {
    let mut details: Vec<ConsumptionDetail> = Vec::new();
    let mut index: HashMap<PersonName, usize> = HashMap::new();

    for activity in activities {
        for item in activity.items.iter().filter(|item| !item.is_void()) {
            let per_person = item.share_per_consumer();

            for member in &item.member_names {
                let slot = *index.entry(member.clone()).or_insert_with(|| {
                    details.push(ConsumptionDetail {
                        user_name: member.clone(),
                        total_consumption: Decimal::ZERO,
                        items: Vec::new(),
                    });
                    details.len() - 1
                });

                let detail = &mut details[slot];
                detail.total_consumption += per_person;
                detail.items.push(ConsumedItem {
                    item_name: item.item_name.clone(),
                    activity_title: activity.title.clone(),
                    price: item.price,
                    quantity: item.quantity,
                    split_amount: round_cents(per_person),
                });
            }
        }
    }

    for detail in &mut details {
        detail.total_consumption = round_cents(detail.total_consumption);
    }
    details.sort_by(|a, b| b.total_consumption.cmp(&a.total_consumption));
    details
}
