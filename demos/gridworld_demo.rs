// Demonstration: solve the walled 5x5 grid with one of the five solvers.
//
// Run from the repo root:
//   cargo run --example gridworld_demo -- --solver mc-basic --gamma 0.5

use std::env;

use gridmdp::algorithms::{
    MonteCarloBasic, MonteCarloEpsilonGreedy, MonteCarloExploringStarts, PolicyIteration,
    Solver, ValueIteration,
};
use gridmdp::environment::{GridWorld, GridWorldConfig};

const DESIGN: [&str; 5] = ["00000", "0###0", "0#*#0", "0#0#0", "00000"];

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let solver_name = arg_value(&args, "--solver").unwrap_or("mc-basic");
    let gamma: f64 = arg_value(&args, "--gamma")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.5);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let solver: Box<dyn Solver> = match solver_name {
        "vi" => Box::new(ValueIteration {
            gamma,
            ..ValueIteration::default()
        }),
        "pi" => Box::new(PolicyIteration {
            gamma,
            seed,
            ..PolicyIteration::default()
        }),
        "mc-basic" => Box::new(MonteCarloBasic {
            gamma,
            seed,
            ..MonteCarloBasic::default()
        }),
        "mc-es" => Box::new(MonteCarloExploringStarts {
            gamma,
            seed,
            ..MonteCarloExploringStarts::default()
        }),
        "mc-eps" => Box::new(MonteCarloEpsilonGreedy {
            gamma,
            seed,
            ..MonteCarloEpsilonGreedy::default()
        }),
        other => {
            eprintln!(
                "Unknown --solver '{}'; expected vi, pi, mc-basic, mc-es or mc-eps.",
                other
            );
            std::process::exit(2);
        }
    };

    let world = match GridWorld::from_design(&DESIGN, &GridWorldConfig::default()) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Failed to build grid: {e}");
            std::process::exit(1);
        }
    };

    println!("=== Map ===");
    print!("{}", world);

    let solution = match solver.solve(&world) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("{} failed: {e}", solver.name());
            std::process::exit(1);
        }
    };

    println!(
        "\n=== {} ({} after {} iterations) ===",
        solver.name(),
        solution.termination,
        solution.iterations
    );
    match (
        world.render_values(&solution.value),
        world.render_policy(&solution.policy),
    ) {
        (Ok(values), Ok(policy)) => {
            println!("\n[Value]\n{}", values);
            println!("[Policy]\n{}", policy);
        }
        (Err(e), _) | (_, Err(e)) => eprintln!("Failed to render solution: {e}"),
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
