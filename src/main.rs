//! split-engine CLI
//!
//! Split a shared bill from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Who pays whom, as few payments as possible
//! split-engine split --input event.json
//!
//! # Same, using the greedy balance-matching mode, as JSON
//! split-engine split --input event.json --mode greedy --format json
//!
//! # What everybody consumed
//! split-engine consumption --input event.json
//!
//! # Generate a random event for testing
//! split-engine generate --participants 6 --activities 10
//! ```
//!
//! Set `RUST_LOG=split_engine=debug` to trace the optimization passes.

use rust_decimal::Decimal;
use serde::Serialize;
use split_engine::core::activity::{validate_activities, Event};
use split_engine::optimization::engine::{SettlementMode, SplitEngine};
use split_engine::optimization::report::SettlementReport;
use split_engine::simulation::random_event::{generate_random_event, EventConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — itemized bill splitting with optimized settlement

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    split        Compute the payments that settle an event
    consumption  Show what each person consumed, whoever paid
    summary      Total expense, balances and greedy settlements
    report       Compare raw debts with the optimized payments
    generate     Generate a random event (for testing)
    help         Show this message

OPTIONS (split, consumption, summary, report):
    --input <FILE>      Path to an event JSON file
    --format <FORMAT>   Output format: text (default) or json
    --strict            Reject negative amounts and duplicate consumers

OPTIONS (split):
    --mode <MODE>       optimized (default) or greedy

OPTIONS (generate):
    --participants <N>  Number of participants (default: 5)
    --activities <N>    Number of activities (default: 8)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine split --input event.json
    split-engine split --input event.json --mode greedy --format json
    split-engine summary --input event.json --strict
    split-engine generate --participants 6 --activities 12 --output event.json"#
    );
}

/// Options shared by the commands that read an event.
struct InputOptions {
    path: String,
    json: bool,
    strict: bool,
    mode: SettlementMode,
}

fn parse_input_options(args: &[String], allow_mode: bool) -> InputOptions {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut strict = false;
    let mut mode = SettlementMode::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--strict" => strict = true,
            "--mode" if allow_mode => {
                i += 1;
                mode = match args.get(i).map(|m| m.parse::<SettlementMode>()) {
                    Some(Ok(mode)) => mode,
                    Some(Err(e)) => {
                        eprintln!("{}", e);
                        process::exit(1);
                    }
                    None => {
                        eprintln!("--mode requires 'optimized' or 'greedy'");
                        process::exit(1);
                    }
                };
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    if format != "text" && format != "json" {
        eprintln!("Unknown format '{}': expected 'text' or 'json'", format);
        process::exit(1);
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    InputOptions {
        path,
        json: format == "json",
        strict,
        mode,
    }
}

fn load_event(options: &InputOptions) -> Event {
    let content = fs::read_to_string(&options.path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", options.path, e);
        process::exit(1);
    });

    let event: Event = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "participants": ["Alice", "Bob"],
  "activities": [
    {{
      "id": "1", "title": "Dinner", "payerName": "Alice",
      "items": [
        {{ "itemName": "Pizza", "price": 120000, "quantity": 1, "taxPercentage": 10, "memberNames": ["Alice", "Bob"] }}
      ]
    }}
  ]
}}"#
        );
        process::exit(1);
    });

    if options.strict {
        if let Err(e) = validate_activities(&event.activities) {
            eprintln!("Invalid input: {}", e);
            process::exit(1);
        }
    }

    log::info!(
        "loaded {} activities and {} participants from {}",
        event.activities.len(),
        event.participants.len(),
        options.path
    );
    event
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_split(args: &[String]) {
    let options = parse_input_options(args, true);
    let event = load_event(&options);
    let settlements = SplitEngine::settle(&event.activities, options.mode);

    if options.json {
        print_json(&settlements);
        return;
    }

    if settlements.is_empty() {
        println!("Everyone is settled up.");
        return;
    }
    println!("=== Settlements ({}) ===", options.mode);
    for s in &settlements {
        println!("  {:<15} → {:<15} {:>15}", s.from_name, s.to_name, s.amount);
    }
    let total: Decimal = settlements.iter().map(|s| s.amount).sum();
    println!("\n{} payments, {} in total", settlements.len(), total);
}

fn cmd_consumption(args: &[String]) {
    let options = parse_input_options(args, false);
    let event = load_event(&options);
    let details = SplitEngine::consumption_details(&event.activities);

    if options.json {
        print_json(&details);
        return;
    }

    if details.is_empty() {
        println!("Nothing was consumed.");
        return;
    }
    for detail in &details {
        println!("{:<20} {:>15}", detail.user_name, detail.total_consumption);
        for item in &detail.items {
            println!(
                "    {:<20} {:<20} x{:<5} {:>12}",
                item.item_name, item.activity_title, item.quantity, item.split_amount
            );
        }
    }
}

fn cmd_summary(args: &[String]) {
    let options = parse_input_options(args, false);
    let event = load_event(&options);
    let summary = SplitEngine::summarize(&event);

    if options.json {
        print_json(&summary);
        return;
    }

    println!("=== Summary ===");
    println!("Total expense: {}", summary.total_expense.round_dp(2));

    println!("\nBalances:");
    for balance in &summary.balances {
        let status = if balance.amount > Decimal::ZERO {
            "OWED"
        } else if balance.amount < Decimal::ZERO {
            "OWES"
        } else {
            "SETTLED"
        };
        println!("  {:<15} {:>15}  [{}]", balance.name, balance.amount, status);
    }

    println!("\nSettlements:");
    if summary.settlements.is_empty() {
        println!("  (none)");
    }
    for s in &summary.settlements {
        println!("  {}", s);
    }
}

fn cmd_report(args: &[String]) {
    let options = parse_input_options(args, false);
    let event = load_event(&options);
    let report = SettlementReport::from_activities(&event.activities);

    if options.json {
        print_json(&report);
    } else {
        println!("{}", report);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = EventConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                config.participant_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--participants requires a number");
                        process::exit(1);
                    });
            }
            "--activities" => {
                i += 1;
                config.activity_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--activities requires a number");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let event = generate_random_event(&config);
    let json = serde_json::to_string_pretty(&event).unwrap_or_else(|e| {
        eprintln!("Error serializing event: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} activities across {} participants → {}",
            event.activities.len(),
            event.participants.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "split" => cmd_split(rest),
        "consumption" => cmd_consumption(rest),
        "summary" => cmd_summary(rest),
        "report" => cmd_report(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
