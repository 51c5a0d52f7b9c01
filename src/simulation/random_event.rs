//! Random events for stress tests, benchmarks and the `generate` command.

use crate::core::activity::{Activity, Event, Participant};
use crate::core::item::Item;
use crate::core::person::PersonName;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random event.
#[derive(Debug, Clone)]
pub struct EventConfig {
    /// Number of participants.
    pub participant_count: usize,
    /// Number of activities (each with a random payer).
    pub activity_count: usize,
    /// Maximum items per activity; each activity gets at least one.
    pub max_items_per_activity: usize,
    /// Smallest unit price, in whole currency units.
    pub min_price: u32,
    /// Largest unit price, in whole currency units.
    pub max_price: u32,
    /// Chance that an item carries tax.
    pub tax_probability: f64,
    /// Chance that an item carries a discount.
    pub discount_probability: f64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            participant_count: 5,
            activity_count: 8,
            max_items_per_activity: 4,
            min_price: 5_000,
            max_price: 250_000,
            tax_probability: 0.3,
            discount_probability: 0.1,
        }
    }
}

/// Generate a random event with every participant listed.
pub fn generate_random_event(config: &EventConfig) -> Event {
    generate_with_rng(config, &mut rand::thread_rng())
}

/// Same as [`generate_random_event`] with a caller-supplied RNG, so tests
/// and benchmarks can use a seeded generator.
pub fn generate_with_rng<R: Rng>(config: &EventConfig, rng: &mut R) -> Event {
    let people: Vec<PersonName> = (0..config.participant_count.max(1))
        .map(|i| PersonName::new(format!("Person-{:02}", i)))
        .collect();

    let mut event = Event {
        participants: people
            .iter()
            .cloned()
            .map(Participant::Name)
            .collect(),
        activities: Vec::with_capacity(config.activity_count),
    };

    let max_price = config.max_price.max(config.min_price);
    for a in 0..config.activity_count {
        let payer = people[rng.gen_range(0..people.len())].clone();
        let mut activity = Activity::new(format!("act-{:03}", a), format!("Activity {}", a + 1), payer);

        let item_count = rng.gen_range(1..=config.max_items_per_activity.max(1));
        for n in 0..item_count {
            let consumers = rng.gen_range(1..=people.len());
            let members: Vec<PersonName> = people
                .choose_multiple(rng, consumers)
                .cloned()
                .collect();

            let price = Decimal::from(rng.gen_range(config.min_price..=max_price));
            let quantity = Decimal::from(rng.gen_range(1u32..=3));
            let mut item = Item::new(format!("Item {}", n + 1), price, quantity, members);

            if rng.gen_bool(config.tax_probability.clamp(0.0, 1.0)) {
                item = item.with_tax(Decimal::from(rng.gen_range(5u32..=11)));
            }
            if rng.gen_bool(config.discount_probability.clamp(0.0, 1.0)) {
                item = item.with_discount(price / Decimal::from(10));
            }
            activity.items.push(item);
        }
        event.activities.push(activity);
    }

    event
}
