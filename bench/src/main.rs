use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use neuronet_core::{CsrGraph, NodeId};

type Generator = fn(u32) -> Vec<(NodeId, NodeId)>;

const GENERATORS: [(&str, &str, Generator); 6] = [
    ("tree", "Branching tree (deep paths)", gen_tree),
    ("scalefree", "Scale-free (edge sampling)", gen_scale_free),
    ("smallworld", "Small-world (Watts-Strogatz)", gen_small_world),
    ("random", "Erdos-Renyi random", gen_random),
    ("barbell", "Barbell (clique-bridge-clique)", gen_barbell),
    ("dla", "DLA (organic branching)", gen_dla),
];

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");

    if mode == "help" || mode == "--help" {
        print_usage();
        return;
    }

    if mode == "write" {
        let (Some(kind), Some(count), Some(path)) = (args.get(2), args.get(3), args.get(4)) else {
            eprintln!("Usage: neuronet-bench write <mode> <node_count> <FILE>");
            std::process::exit(2);
        };
        let Some(node_count) = count.parse::<u32>().ok().filter(|&n| n > 0) else {
            eprintln!("Invalid node_count: {}", count);
            std::process::exit(2);
        };
        let Some(&(_, name, generator)) = GENERATORS
            .iter()
            .find(|(key, _, _)| *key == kind.as_str())
        else {
            eprintln!("Unknown mode: {}. Use --help for options.", kind);
            std::process::exit(2);
        };
        let edges = generator(node_count);
        if let Err(e) = write_edge_list(Path::new(path), &edges) {
            eprintln!("Failed to write {}: {}", path, e);
            std::process::exit(1);
        }
        println!("Wrote {} ({} edges) to {}", name, edges.len(), path);
        return;
    }

    let node_count: u32 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(5_000_000);

    let selected: Vec<_> = match mode {
        "all" => GENERATORS.iter().collect(),
        _ => match GENERATORS.iter().find(|(key, _, _)| *key == mode) {
            Some(g) => vec![g],
            None => {
                eprintln!("Unknown mode: {}. Use --help for options.", mode);
                return;
            }
        },
    };

    println!("neuronet-bench");
    println!("==============");
    println!();

    for &(_, name, generator) in selected {
        run_benchmark(name, generator, node_count);
    }
}

fn print_usage() {
    println!("Usage: neuronet-bench [mode] [node_count]");
    println!("       neuronet-bench write <mode> <node_count> <FILE>");
    println!();
    println!("Modes:");
    println!("  all         Run all generators and benchmark each (default)");
    println!("  tree        Branching tree (deep paths)");
    println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
    println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
    println!("  random      Erdos-Renyi uniform random edges");
    println!("  barbell     Two dense cliques connected by a thin bridge");
    println!("  dla         Diffusion-limited aggregation (organic branching)");
    println!();
    println!("write emits the generated graph as a `src dst` edge list.");
    println!("Default node_count: 5000000");
}

fn run_benchmark(name: &str, generator: Generator, node_count: u32) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    let gen_time = t.elapsed();

    let t = Instant::now();
    let graph = match CsrGraph::build(&edges, node_count as usize) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Build failed: {}", e);
            return;
        }
    };
    let build_time = t.elapsed();
    drop(edges);

    println!(
        "Generated in {:.2}s, built CSR in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        build_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let t = Instant::now();
    if let Ok(hub) = neuronet_core::node_of_max_degree(&graph) {
        let elapsed = t.elapsed();
        let degree = neuronet_core::degree_of(&graph, hub).unwrap_or(0);
        println!(
            "Max out-degree: node {} ({} edges) in {:.1}ms",
            hub,
            degree,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    // BFS from node 0 (a root or seed for every generator)
    println!();
    println!(
        "{:>8} {:>12} {:>12} {:>10}",
        "depth", "found", "induced", "time"
    );
    println!("{:->8} {:->12} {:->12} {:->10}", "", "", "", "");

    for depth in [1, 2, 3, 5, 10] {
        let t = Instant::now();
        let sub = match neuronet_core::extract_subgraph(&graph, 0, depth) {
            Ok(sub) => sub,
            Err(e) => {
                eprintln!("Traversal failed: {}", e);
                break;
            }
        };
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms",
            depth,
            sub.traversal.len(),
            sub.edges.len(),
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop if we already found everything
        if sub.traversal.len() >= graph.node_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }
    println!();
}

fn write_edge_list(path: &Path, edges: &[(NodeId, NodeId)]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (from, to) in edges {
        writeln!(out, "{} {}", from, to)?;
    }
    out.flush()
}

// ---------------------------------------------------------------------------
// Generators: O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u32) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as u32
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Branching tree: every node gets three children, breadth-first.
///
/// Produces log-depth paths with exponential width. Node 0 is the root.
fn gen_tree(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let branching = 3u32;
    let mut edges = Vec::with_capacity(node_count as usize);
    let mut next_id: u32 = 1;
    let mut frontier: Vec<u32> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                edges.push((parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random endpoint of an existing edge.
/// Edges point from the seed clique outward and from each newcomer to its
/// targets, so high in-degree hubs emerge alongside a reachable seed.
fn gen_scale_free(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let edges_per_node = 10u32;
    let mut edges = Vec::with_capacity(node_count as usize * edges_per_node as usize);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u32> =
        Vec::with_capacity(node_count as usize * edges_per_node as usize * 2);

    let seed = 5u32.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push((i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }
    if endpoints.is_empty() {
        return edges;
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            let idx = rng.next(endpoints.len() as u32) as usize;
            let target = endpoints[idx];
            if target != new_node {
                // Alternate direction.
                if rng.next(2) == 0 {
                    edges.push((target, new_node));
                } else {
                    edges.push((new_node, target));
                }
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    edges
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
fn gen_small_world(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let k = 10u32.min(node_count.saturating_sub(1));
    let p = 0.05f64;
    let mut edges = Vec::with_capacity(node_count as usize * k as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = ((i as u64 + j as u64) % node_count as u64) as u32;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                edges.push((i, if rewired != i { rewired } else { neighbor }));
            } else {
                edges.push((i, neighbor));
            }
        }
    }

    edges
}

/// Erdos-Renyi: ~10 uniform random out-edges per node, no structure.
fn gen_random(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let target_edges = node_count as usize * 10;
    let mut edges = Vec::with_capacity(target_edges);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push((from, to));
        }
    }

    edges
}

/// Barbell: two dense clusters joined by a one-way chain of ~10 bridge nodes.
///
/// Worst case for depth-limited reach: the far cluster only appears once the
/// traversal has crossed the whole bridge.
fn gen_barbell(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let bridge_len = 10u32.min(node_count);
    let clique_size = (node_count - bridge_len) / 2;
    let mut edges = Vec::with_capacity(clique_size as usize * 40 + bridge_len as usize);
    let mut rng = FastRng::new(99999);

    let mut cluster = |edges: &mut Vec<(NodeId, NodeId)>, base: u32| {
        for i in 0..clique_size {
            for _ in 0..20u32.min(clique_size.saturating_sub(1)) {
                let target = rng.next(clique_size);
                if target != i {
                    edges.push((base + i, base + target));
                }
            }
        }
    };

    cluster(&mut edges, 0);

    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let prev = if i == 0 { clique_size.saturating_sub(1) } else { id - 1 };
        if prev != id {
            edges.push((prev, id));
        }
    }

    let b_start = bridge_start + bridge_len;
    if clique_size > 0 {
        edges.push((b_start - 1, b_start));
        cluster(&mut edges, b_start);
    }

    edges
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node hangs off a random recent "surface" node, with an occasional
/// second link back to any earlier node (loops and shortcuts).
fn gen_dla(node_count: u32) -> Vec<(NodeId, NodeId)> {
    let mut edges = Vec::with_capacity(node_count as usize * 2);
    let mut rng = FastRng::new(77777);

    // Recent additions; growth stays at the frontier, like real DLA.
    let surface_max = 10000usize;
    let mut surface: VecDeque<u32> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u32) as usize];
        edges.push((attach_to, new_node));

        // 10% chance of a second connection
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                edges.push((new_node, other));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}
