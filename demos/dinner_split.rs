//! Splitting a group dinner item by item.
//!
//! Shows consumption details, the optimized settlements and the greedy
//! summary for the same event.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use split_engine::optimization::report::SettlementReport;
use split_engine::prelude::*;

fn main() {
    println!("╔════════════════════════════════════════╗");
    println!("║  split-engine: Group Dinner Example    ║");
    println!("╚════════════════════════════════════════╝\n");

    let event = Event::new(["Alice", "Bob", "Carol", "Dan"])
        .with_activity(
            Activity::new("1", "Dinner", "Alice")
                .with_item(
                    Item::new("Grilled Fish", dec!(180_000), dec!(1), ["Alice", "Bob", "Carol"])
                        .with_tax(dec!(10)),
                )
                .with_item(Item::new(
                    "Iced Tea",
                    dec!(15_000),
                    dec!(4),
                    ["Alice", "Bob", "Carol", "Dan"],
                )),
        )
        .with_activity(
            Activity::new("2", "Karaoke", "Bob").with_item(
                Item::new("Room", dec!(240_000), dec!(1), ["Bob", "Carol", "Dan"])
                    .with_discount(dec!(30_000)),
            ),
        )
        .with_activity(
            Activity::new("3", "Breakfast", "Dan")
                .with_item(Item::new("Toast", dec!(25_000), dec!(2), ["Alice", "Dan"])),
        );

    // --- Who consumed what ---
    println!("━━━ Consumption ━━━\n");
    for detail in SplitEngine::consumption_details(&event.activities) {
        println!("  {:<10} {:>12}", detail.user_name, detail.total_consumption);
        for item in &detail.items {
            println!(
                "      {:<14} ({:<9}) {:>12}",
                item.item_name, item.activity_title, item.split_amount
            );
        }
    }
    println!();

    // --- Optimized settlements ---
    println!("━━━ Optimized Settlements ━━━\n");
    let settlements = SplitEngine::smart_split_bill(&event.activities);
    for s in &settlements {
        println!("  {}", s);
    }
    println!();

    println!("{}", SettlementReport::from_activities(&event.activities));

    // --- Greedy summary ---
    println!("━━━ Summary (greedy) ━━━\n");
    let summary = SplitEngine::summarize(&event);
    println!("  Total expense: {}\n", summary.total_expense);
    for balance in &summary.balances {
        let status = if balance.amount > Decimal::ZERO {
            "OWED"
        } else if balance.amount < Decimal::ZERO {
            "OWES"
        } else {
            "SETTLED"
        };
        println!("  {:<10} {:>12}  [{}]", balance.name, balance.amount, status);
    }
    println!();
    for s in &summary.settlements {
        println!("  {}", s);
    }
}
