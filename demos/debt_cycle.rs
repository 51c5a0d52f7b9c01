//! Cycle elimination and triangle rerouting, pass by pass.
//!
//! Builds a debt graph directly and prints it after each optimization
//! pass so the effect of every step is visible.

use rust_decimal_macros::dec;
use split_engine::graph::cycle_detection::find_cycle;
use split_engine::graph::debt_graph::DebtGraph;
use split_engine::optimization::cycles::eliminate_cycles;
use split_engine::optimization::netting::simplify_bilateral;
use split_engine::optimization::settlement::flatten;
use split_engine::optimization::triangle::{find_triangle, optimize_triangles};

fn print_graph(graph: &DebtGraph) {
    if graph.is_empty() {
        println!("  (no debts)");
    }
    for (from, to, amount) in graph.edges() {
        println!("  {:<6} → {:<6} {:>8}", from, to, amount);
    }
    println!("  gross: {}\n", graph.total_weight());
}

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  split-engine: Cycles and Triangles       ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let raw = DebtGraph::from_debts([
        ("Ana", "Budi", dec!(100)),
        ("Budi", "Citra", dec!(80)),
        ("Citra", "Ana", dec!(120)),
        ("Budi", "Ana", dec!(30)),
        ("Dewi", "Citra", dec!(50)),
        ("Citra", "Eko", dec!(40)),
        ("Dewi", "Eko", dec!(10)),
    ]);

    println!("━━━ Raw Debts ━━━\n");
    print_graph(&raw);

    println!("━━━ After Bilateral Netting ━━━\n");
    let netted = simplify_bilateral(&raw);
    print_graph(&netted);

    if let Some(cycle) = find_cycle(&netted) {
        let names: Vec<String> = cycle.people.iter().map(|p| p.to_string()).collect();
        println!("━━━ Cycle Found ━━━\n");
        println!("  Path:       {} → {}", names.join(" → "), names[0]);
        println!("  Bottleneck: {}", cycle.bottleneck);
        println!("  Savings:    {}\n", cycle.potential_savings());
    }

    println!("━━━ After Cycle Elimination ━━━\n");
    let acyclic = eliminate_cycles(&netted);
    print_graph(&acyclic);

    if let Some(triangle) = find_triangle(&acyclic) {
        println!("━━━ Triangle Found ━━━\n");
        println!(
            "  {} → {} → {} rerouted onto {} → {}: {}\n",
            triangle.debtor,
            triangle.middle,
            triangle.creditor,
            triangle.debtor,
            triangle.creditor,
            triangle.reroute
        );
    }

    println!("━━━ After Triangle Rerouting ━━━\n");
    let optimized = optimize_triangles(&acyclic);
    print_graph(&optimized);

    println!("━━━ Settlements ━━━\n");
    for s in flatten(&optimized) {
        println!("  {}", s);
    }

    let before = raw.net_positions();
    let after = optimized.net_positions();
    println!(
        "\nNet positions preserved: {}",
        if before.matches(&after, dec!(0.01)) { "yes" } else { "NO" }
    );
}
