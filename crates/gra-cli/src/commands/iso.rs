//! Isomorphism command implementation.

use std::path::Path;

use anyhow::Result;

use gra_core::IsomorphismChecker;

use super::load_graph;

/// Compare two graph files and print `isomorphic` or `not isomorphic`.
pub fn execute(first: &Path, second: &Path, mapping: bool) -> Result<bool> {
    let a = load_graph(first)?;
    let b = load_graph(second)?;

    let found = IsomorphismChecker::new().find_isomorphism(&a, &b);

    match &found {
        Some(map) => {
            println!("isomorphic");
            if mapping {
                for (v, image) in map.iter().enumerate() {
                    println!("{v} -> {image}");
                }
            }
        }
        None => println!("not isomorphic"),
    }

    Ok(found.is_some())
}
