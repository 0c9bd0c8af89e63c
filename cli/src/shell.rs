//! Interactive shell: one engine, many queries.
//!
//! Loading is the only command that mutates the engine; a failed load leaves
//! the previous graph in place. Command errors are reported inline and the
//! loop keeps going.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use neuronet_core::{GraphEngine, NodeId};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::output::OutputFormat;
use crate::{degree, load, neighborhood, status, subgraph};

const HELP: &str = "\
commands:
  load <FILE>           load an edge list, replacing the current graph (not -)
  stats                 show the loaded graph
  degree <NODE>         out-degree of a node
  max                   node with the highest out-degree
  top [N]               nodes ranked by out-degree (default 10)
  neighbors <NODE>      out-neighbors of a node
  bfs <NODE> <DEPTH>    nodes within DEPTH hops
  edges <NODE> <DEPTH>  induced edges within DEPTH hops
  subgraph <NODE> <DEPTH>
  help | quit";

/// Read commands from `input` until EOF or `quit`.
pub fn run_shell<R: BufRead>(
    engine: &mut GraphEngine,
    settings: &Settings,
    format: OutputFormat,
    input: R,
    out: &mut dyn Write,
    prompt: Option<&mut dyn Write>,
) -> Result<()> {
    let mut prompt = prompt;
    let mut lines = input.lines();
    loop {
        if let Some(p) = prompt.as_deref_mut() {
            write!(p, "neuronet> ")?;
            p.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading shell input")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            _ => {}
        }
        debug!(command = words[0], args = words.len() - 1, "shell command");
        if let Err(e) = dispatch(engine, settings, format, &words, out) {
            warn!(command = words[0], error = %format!("{e:#}"), "shell command failed");
            writeln!(out, "error: {e:#}")?;
        }
        out.flush()?;
    }
    Ok(())
}

fn dispatch(
    engine: &mut GraphEngine,
    settings: &Settings,
    format: OutputFormat,
    words: &[&str],
    out: &mut dyn Write,
) -> Result<()> {
    match words {
        ["help"] => {
            writeln!(out, "{HELP}")?;
            Ok(())
        }
        ["load", path] => {
            // Commands already come from stdin in the shell.
            if *path == load::STDIN_PATH {
                bail!("cannot load from stdin inside the shell; pass a file path");
            }
            let summary = load::load_into(engine, Path::new(path))?;
            load::write_summary(&summary, format, out)
        }
        ["stats"] | ["status"] => status::run_stats(engine, format, out),
        ["degree", node] => degree::run_degree(engine, parse_node(node)?, format, out),
        ["max"] => degree::run_max_degree(engine, format, out),
        ["top"] => degree::run_top(engine, 10, format, out),
        ["top", n] => {
            let n = n.parse().map_err(|_| anyhow!("invalid count '{n}'"))?;
            degree::run_top(engine, n, format, out)
        }
        ["neighbors", node] => neighborhood::run_neighbors(engine, parse_node(node)?, format, out),
        ["bfs", node, depth] => neighborhood::run_bfs(
            engine,
            settings,
            parse_node(node)?,
            parse_depth(depth)?,
            format,
            out,
        ),
        ["edges", node, depth] => subgraph::run_edges(
            engine,
            settings,
            parse_node(node)?,
            parse_depth(depth)?,
            format,
            out,
        ),
        ["subgraph", node, depth] => subgraph::run_subgraph(
            engine,
            settings,
            parse_node(node)?,
            parse_depth(depth)?,
            format,
            out,
        ),
        _ => bail!("unknown command '{}' (try 'help')", words.join(" ")),
    }
}

fn parse_node(s: &str) -> Result<NodeId> {
    s.parse().map_err(|_| anyhow!("invalid node id '{s}'"))
}

fn parse_depth(s: &str) -> Result<u32> {
    s.parse().map_err(|_| anyhow!("invalid depth '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (GraphEngine, String) {
        let mut engine = GraphEngine::new();
        let mut buf: Vec<u8> = Vec::new();
        run_shell(
            &mut engine,
            &Settings::default(),
            OutputFormat::Text,
            Cursor::new(script),
            &mut buf,
            None,
        )
        .unwrap();
        (engine, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_queries_before_load_report_errors() {
        let (_, out) = run("degree 0\nmax\n");
        assert_eq!(out, "error: no graph loaded\nerror: no graph loaded\n");
    }

    #[test]
    fn test_unknown_and_bad_arguments() {
        let (_, out) = run("frobnicate\ndegree x\nbfs 0 zero\n");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "error: unknown command 'frobnicate' (try 'help')");
        assert_eq!(lines[1], "error: invalid node id 'x'");
        assert_eq!(lines[2], "error: invalid depth 'zero'");
    }

    #[test]
    fn test_load_and_query_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.txt");
        std::fs::write(&path, "0 1\n1 2\n2 3\n0 3\n3 3\n").unwrap();
        let script = format!(
            "load {}\ndegree 0\nmax\nedges 0 1\nbfs 0 6\nquit\ndegree 1\n",
            path.display()
        );
        let (engine, out) = run(&script);
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("loaded 4 nodes, 5 edges"));
        assert_eq!(lines[1], "node 0: out-degree 2");
        assert_eq!(lines[2], "node 0 has the highest out-degree (2)");
        assert_eq!(&lines[3..6], &["0 -> 1", "0 -> 3", "3 -> 3"]);
        assert_eq!(lines[6], "error: depth must be between 1 and 5, got 6");
        // Nothing after quit runs.
        assert_eq!(lines.len(), 7);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_graph() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        std::fs::write(&good, "0 1\n").unwrap();
        std::fs::write(&bad, "0 1\nabc def\n").unwrap();
        let script = format!(
            "load {}\nload {}\nneighbors 0\n",
            good.display(),
            bad.display()
        );
        let (engine, out) = run(&script);
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[1].starts_with("error: loading edge list"));
        assert!(lines[1].contains(":2: invalid node id \"abc\""));
        assert_eq!(lines[2], "node 0 (1 out-neighbors): 1");
        assert_eq!(engine.edge_count().unwrap(), 1);
    }

    #[test]
    fn test_load_from_stdin_is_rejected() {
        let (engine, out) = run("load -\n0 1\nstats\n");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[0],
            "error: cannot load from stdin inside the shell; pass a file path"
        );
        assert_eq!(lines[1], "error: unknown command '0 1' (try 'help')");
        assert_eq!(lines[2], "status:      not_loaded");
        assert!(!engine.is_loaded());
    }
}
