//! Shared printing for command results

use anyhow::Result;
use serde::Serialize;

use hexcast_core::{Hex, PathNode, RayHit};

/// Print records as a JSON array or one formatted line each
pub fn print_records<T, F>(records: &[T], json: bool, line: F) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        for record in records {
            println!("{}", line(record));
        }
    }
    Ok(())
}

pub fn print_cells(cells: &[Hex], json: bool) -> Result<()> {
    print_records(cells, json, Hex::to_string)
}

pub fn print_nodes(nodes: &[PathNode], json: bool) -> Result<()> {
    print_records(nodes, json, format_node)
}

pub fn print_hits(hits: &[RayHit], json: bool) -> Result<()> {
    print_records(hits, json, format_hit)
}

/// `q,r<TAB>cost`
pub fn format_node(node: &PathNode) -> String {
    format!("{}\t{}", node.location, node.path_cost)
}

/// `q,r<TAB>intensity<TAB>bearing in degrees`
pub fn format_hit(hit: &RayHit) -> String {
    format!("{}\t{}\t{:.1}", hit.location, hit.intensity, hit.angle.to_degrees())
}
