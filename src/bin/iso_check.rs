use clap::{ArgGroup, Parser};
use graph_isomorphism_checker::{
    isomorphism::search,
    loader::{load, load_pair},
    utils::{factorial, format_matrix, init_logging},
    Graph, MatrixPolicy,
};
use std::path::PathBuf;

/// Decide whether two graphs are isomorphic by exhaustive permutation search
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "first"])))]
struct Args {
    /// File holding both graphs back to back
    #[arg(short, long, conflicts_with_all = ["first", "second"])]
    input: Option<PathBuf>,

    /// File holding the first graph
    #[arg(long, requires = "second")]
    first: Option<PathBuf>,

    /// File holding the second graph
    #[arg(long, requires = "first")]
    second: Option<PathBuf>,

    /// Matrix policy: strict (0/1, symmetric) or weighted (non-negative, any shape)
    #[arg(short, long, default_value_t = MatrixPolicy::Strict)]
    policy: MatrixPolicy,

    /// Print the first vertex relabeling found
    #[arg(short, long)]
    witness: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_graphs(args: &Args) -> Result<(Graph, Graph), graph_isomorphism_checker::LoadError> {
    match (&args.input, &args.first, &args.second) {
        (Some(input), _, _) => load_pair(input, args.policy),
        (None, Some(first), Some(second)) => {
            let g1 = load(first, args.policy)?;
            let g2 = load(second, args.policy)?;
            Ok((g1, g2))
        }
        // clap enforces one of the two forms
        _ => unreachable!("no graph source given"),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("Graph Isomorphism Checker");
    println!("=========================");
    println!();

    let (g1, g2) = match load_graphs(&args) {
        Ok(graphs) => graphs,
        Err(e) => {
            eprintln!("Error loading graphs: {}", e);
            std::process::exit(1);
        }
    };

    println!("Policy: {}", args.policy);
    println!("Graph 1: {} vertices", g1.num_vertices());
    print!("{}", format_matrix(g1.rows(), 2));
    println!("Graph 2: {} vertices", g2.num_vertices());
    print!("{}", format_matrix(g2.rows(), 2));
    println!();

    if g1.num_vertices() == g2.num_vertices() && g1.num_vertices() > 10 {
        log::warn!(
            "{} vertices means up to {} permutations; this may take a long time",
            g1.num_vertices(),
            factorial(g1.num_vertices())
        );
    }

    let start_time = std::time::Instant::now();
    let outcome = search(&g1, &g2);
    let elapsed = start_time.elapsed();

    if outcome.is_isomorphic() {
        println!("Graphs are isomorphic.");
    } else {
        println!("Graphs are NOT isomorphic.");
    }

    if args.witness {
        match &outcome.witness {
            Some(perm) => println!("Witness (vertex i of graph 1 -> vertex p[i] of graph 2): {}", perm),
            None => println!("No witness."),
        }
    }
    println!("Permutations examined: {}", outcome.examined);
    println!("Computation time: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
}
