//! Check sizes of the view and value types.

use std::mem::{align_of, size_of};

use jsontape_core::{ArrayView, Document, NodeView, ObjectView, ShallowValue, Value, Word};

fn main() {
    println!("=== Type Sizes ===");
    println!("Word: {} bytes", size_of::<Word>());
    println!("NodeView: {} bytes (align {})", size_of::<NodeView>(), align_of::<NodeView>());
    println!("ArrayView: {} bytes", size_of::<ArrayView>());
    println!("ObjectView: {} bytes", size_of::<ObjectView>());
    println!("ShallowValue: {} bytes", size_of::<ShallowValue>());
    println!("Option<NodeView>: {} bytes", size_of::<Option<NodeView>>());
    println!("Value: {} bytes", size_of::<Value>());
    println!("Document: {} bytes", size_of::<Document>());
}
