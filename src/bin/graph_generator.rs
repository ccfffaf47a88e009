use clap::Parser;
use graph_isomorphism_checker::{
    permutation::Permutation,
    utils::init_logging,
    Graph, MatrixPolicy,
};
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Instance generator for the isomorphism checker.
///
/// Writes two graphs back to back in the format `iso-check --input` reads:
///
/// <n>
/// <adjacency matrix of graph 1: n rows of n space-separated integers>
///
/// <n>
/// <adjacency matrix of graph 2>
///
/// Graph 2 is a random relabeling of graph 1, so the pair is isomorphic unless
/// `--perturb` toggles one of its entries afterwards.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate random graph pairs for the isomorphism checker"
)]
struct Args {
    /// Number of vertices in each graph
    #[arg(long)]
    vertices: usize,

    /// Probability of an edge between two distinct vertices
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// strict: simple undirected 0/1 graph; weighted: directed edges with weights
    #[arg(long, default_value_t = MatrixPolicy::Strict)]
    policy: MatrixPolicy,

    /// Largest edge weight under the weighted policy
    #[arg(long, default_value_t = 5)]
    max_weight: u64,

    /// Toggle one edge of the second graph after relabeling
    #[arg(long)]
    perturb: bool,

    /// Random seed (if omitted, uses entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path for the instance
    #[arg(long)]
    output: PathBuf,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Random simple undirected graph
fn generate_strict<R: Rng>(n: usize, density: f64, rng: &mut R) -> Graph {
    let mut g = Graph::new(n);
    for i in 0..n {
        for j in i + 1..n {
            if rng.gen::<f64>() < density {
                g.set_edge(i, j, 1);
                g.set_edge(j, i, 1);
            }
        }
    }
    g
}

/// Random directed graph with weights in `1..=max_weight`, self-loops included
fn generate_weighted<R: Rng>(n: usize, density: f64, max_weight: u64, rng: &mut R) -> Graph {
    let mut g = Graph::new(n);
    for i in 0..n {
        for j in 0..n {
            if rng.gen::<f64>() < density {
                g.set_edge(i, j, rng.gen_range(1..=max_weight));
            }
        }
    }
    g
}

fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Permutation {
    let mut values: Vec<usize> = (0..n).collect();
    values.shuffle(rng);
    // A shuffle of 0..n is always a bijection
    Permutation::new(values).unwrap_or_else(|| Permutation::identity(n))
}

/// Flip one off-diagonal entry, keeping the policy's invariants
fn perturb<R: Rng>(g: &mut Graph, policy: MatrixPolicy, max_weight: u64, rng: &mut R) -> (usize, usize) {
    let n = g.num_vertices();
    let u = rng.gen_range(0..n);
    let mut v = rng.gen_range(0..n - 1);
    if v >= u {
        v += 1;
    }
    match policy {
        MatrixPolicy::Strict => {
            let value = 1 - g.get_edge(u, v);
            g.set_edge(u, v, value);
            g.set_edge(v, u, value);
        }
        MatrixPolicy::Weighted => {
            let value = if g.get_edge(u, v) == 0 {
                rng.gen_range(1..=max_weight)
            } else {
                0
            };
            g.set_edge(u, v, value);
        }
    }
    (u, v)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Validate arguments
    if args.vertices == 0 {
        eprintln!("Error: vertices must be positive.");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&args.density) {
        eprintln!("Error: density must be in [0,1].");
        std::process::exit(1);
    }
    if args.policy == MatrixPolicy::Weighted && args.max_weight == 0 {
        eprintln!("Error: max_weight must be positive under the weighted policy.");
        std::process::exit(1);
    }
    if args.perturb && args.vertices < 2 {
        eprintln!("Error: --perturb needs at least two vertices.");
        std::process::exit(1);
    }

    let seed: u64 = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let g = match args.policy {
        MatrixPolicy::Strict => generate_strict(args.vertices, args.density, &mut rng),
        MatrixPolicy::Weighted => {
            generate_weighted(args.vertices, args.density, args.max_weight, &mut rng)
        }
    };

    let relabeling = random_permutation(args.vertices, &mut rng);
    let mut h = g.relabel(&relabeling);
    let toggled = if args.perturb {
        Some(perturb(&mut h, args.policy, args.max_weight, &mut rng))
    } else {
        None
    };

    info!("seed = {}", seed);
    println!("Generated instance:");
    println!("  vertices = {}", args.vertices);
    println!("  density = {:.3}", args.density);
    println!("  policy = {}", args.policy);
    println!("  seed = {}", seed);
    println!("  relabeling (graph 1 -> graph 2): {}", relabeling);
    println!("  edges: graph 1 = {}, graph 2 = {}", g.edge_count(), h.edge_count());
    match toggled {
        Some((u, v)) => println!("  toggled entry [{}][{}] of graph 2", u, v),
        None => println!("  graph 2 is an exact relabeling"),
    }
    println!("  output file: {:?}", args.output);

    let mut writer = io::BufWriter::new(File::create(&args.output)?);
    g.write_to(&mut writer)?;
    writeln!(writer)?;
    h.write_to(&mut writer)?;
    writer.flush()?;

    Ok(())
}
