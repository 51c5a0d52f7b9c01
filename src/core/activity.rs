use crate::core::error::ValidationError;
use crate::core::item::Item;
use crate::core::person::PersonName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One expense event: a single payer fronted the money for every item.
///
/// The payer may also appear among an item's consumers; that share is
/// a debt to oneself and never produces a settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Opaque identifier, not used in any computation.
    #[serde(default)]
    pub id: String,
    pub payer_name: PersonName,
    /// Display only.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Activity {
    pub fn new(id: impl Into<String>, title: impl Into<String>, payer: impl Into<PersonName>) -> Self {
        Self {
            id: id.into(),
            payer_name: payer.into(),
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Append an item, builder style.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Sum of the totals of every non-void item.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(Item::total).sum()
    }

    /// Reject values the engine would otherwise clamp or double count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let label = if self.title.is_empty() { &self.id } else { &self.title };
        if self.payer_name.is_blank() {
            return Err(ValidationError::MissingPayer {
                activity: label.clone(),
            });
        }
        for item in &self.items {
            let activity = label.clone();
            let name = item.item_name.clone();
            if item.price < Decimal::ZERO {
                return Err(ValidationError::NegativePrice {
                    activity,
                    item: name,
                    price: item.price,
                });
            }
            if item.quantity < Decimal::ZERO {
                return Err(ValidationError::NegativeQuantity {
                    activity,
                    item: name,
                    quantity: item.quantity,
                });
            }
            if item.tax_percentage < Decimal::ZERO {
                return Err(ValidationError::NegativeTax {
                    activity,
                    item: name,
                    tax: item.tax_percentage,
                });
            }
            if item.discount_amount < Decimal::ZERO {
                return Err(ValidationError::NegativeDiscount {
                    activity,
                    item: name,
                    discount: item.discount_amount,
                });
            }
            if item.checked_total().is_none() {
                return Err(ValidationError::AmountOverflow { activity, item: name });
            }
            let mut seen = HashSet::new();
            for member in &item.member_names {
                if !seen.insert(member) {
                    return Err(ValidationError::DuplicateMember {
                        activity,
                        item: name,
                        member: member.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Validate every activity, stopping at the first problem.
pub fn validate_activities(activities: &[Activity]) -> Result<(), ValidationError> {
    activities.iter().try_for_each(Activity::validate)
}

/// A participant entry in an event.
///
/// Older records store participants as bare names, newer ones as objects
/// with a `name` field; both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Participant {
    Name(PersonName),
    Record { name: PersonName },
}

impl Participant {
    pub fn name(&self) -> &PersonName {
        match self {
            Participant::Name(name) => name,
            Participant::Record { name } => name,
        }
    }
}

impl From<&str> for Participant {
    fn from(s: &str) -> Self {
        Participant::Name(PersonName::new(s))
    }
}

/// A shared outing: the people involved and everything they spent on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Event {
    pub fn new<I, P>(participants: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Participant>,
    {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            activities: Vec::new(),
        }
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    /// Participant names in declaration order, duplicates removed.
    pub fn participant_names(&self) -> Vec<PersonName> {
        let mut names: Vec<PersonName> = Vec::with_capacity(self.participants.len());
        for participant in &self.participants {
            if !names.contains(participant.name()) {
                names.push(participant.name().clone());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_activity_total_skips_void_items() {
        let activity = Activity::new("a1", "Dinner", "Alice")
            .with_item(Item::new("Steak", dec!(150_000), dec!(1), ["Alice"]))
            .with_item(Item::new("Unclaimed", dec!(40_000), dec!(1), Vec::<&str>::new()));
        assert_eq!(activity.total(), dec!(150_000));
    }

    #[test]
    fn test_participants_accept_both_shapes() {
        let json = r#"{
            "participants": ["Alice", { "name": "Bob" }],
            "activities": []
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        let names = event.participant_names();
        assert_eq!(names, vec![PersonName::new("Alice"), PersonName::new("Bob")]);
    }

    #[test]
    fn test_participant_names_dedup() {
        let event = Event::new(["Alice", "Bob", "Alice"]);
        assert_eq!(event.participant_names().len(), 2);
    }

    #[test]
    fn test_validate_accepts_clean_activity() {
        let activity = Activity::new("a1", "Dinner", "Alice")
            .with_item(Item::new("Steak", dec!(150_000), dec!(1), ["Alice", "Bob"]));
        assert!(validate_activities(&[activity]).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let activity = Activity::new("a1", "Dinner", "Alice")
            .with_item(Item::new("Refund", dec!(-1), dec!(1), ["Bob"]));
        let err = activity.validate().unwrap_err();
        assert!(matches!(err, ValidationError::NegativePrice { .. }));
        assert!(err.to_string().contains("Refund"));
    }

    #[test]
    fn test_validate_rejects_duplicate_member() {
        let activity = Activity::new("a1", "Dinner", "Alice")
            .with_item(Item::new("Soup", dec!(10), dec!(1), ["Bob", "Bob"]));
        assert_eq!(
            activity.validate(),
            Err(ValidationError::DuplicateMember {
                activity: "Dinner".to_string(),
                item: "Soup".to_string(),
                member: PersonName::new("Bob"),
            })
        );
    }

    #[test]
    fn test_validate_rejects_overflowing_item() {
        let activity = Activity::new("a1", "Typo", "Alice").with_item(Item::new(
            "Rice",
            dec!(1_000_000_000_000_000),
            dec!(1_000_000_000_000_000),
            ["Alice", "Bob"],
        ));
        assert_eq!(
            activity.validate(),
            Err(ValidationError::AmountOverflow {
                activity: "Typo".to_string(),
                item: "Rice".to_string(),
            })
        );
        assert_eq!(activity.total(), Decimal::ZERO);
    }

    #[test]
    fn test_validate_rejects_blank_payer() {
        let activity = Activity::new("a9", "", "  ");
        assert_eq!(
            activity.validate(),
            Err(ValidationError::MissingPayer {
                activity: "a9".to_string()
            })
        );
    }

    #[test]
    fn test_activity_deserialize() {
        let json = r#"{
            "id": "act-1",
            "payerName": "Alice",
            "title": "Lunch",
            "items": [
                { "itemName": "Soto", "price": 30000, "quantity": 2, "taxPercentage": 10, "memberNames": ["Alice", "Bob"] }
            ]
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.payer_name.as_str(), "Alice");
        assert_eq!(activity.total(), dec!(66_000));
    }
}
