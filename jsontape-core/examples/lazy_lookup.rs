//! Read one field out of a JSON document given on stdin or as a file.
//!
//! Usage: cargo run --example lazy_lookup -- <path> <key> [<key>...]
//!
//! Keys that parse as numbers index into arrays; everything else looks up
//! an object member.

use std::io::Read;

use jsontape_core::{Document, NodeView};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((path, keys)) = args.split_first() else {
        eprintln!("usage: lazy_lookup <path|-> <key>...");
        std::process::exit(2);
    };

    let input = if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).expect("read stdin");
        buf
    } else {
        std::fs::read(path).expect("read input file")
    };

    let doc = match Document::parse(&input) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    };
    println!("{} words, {} text bytes", doc.words().len(), doc.text().len());

    let mut node = doc.root();
    for key in keys {
        match step(node, key) {
            Some(next) => node = next,
            None => {
                eprintln!("no {key:?} under {}", node.tag());
                std::process::exit(1);
            }
        }
    }

    let value = node.materialize();
    println!("{}", serde_json::to_string_pretty(&value).expect("serialize"));
}

fn step<'a>(node: NodeView<'a>, key: &str) -> Option<NodeView<'a>> {
    if let (Some(array), Ok(index)) = (node.as_array(), key.parse::<usize>()) {
        return array.get(index);
    }
    node.as_object()?.get(key)
}
