//! Tabular arrays: TOON's compact form for repeated structures.
//!
//! Run with: cargo run --example tabular_arrays

use serde::{Deserialize, Serialize};
use std::error::Error;
use toon::{from_str, to_string};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let inventory: Vec<Product> = (1..=5u32)
        .map(|i| Product {
            sku: format!("SKU-{i:03}"),
            name: format!("Product {i}"),
            price: f64::from(i) * 4.5,
            quantity: i * 10,
        })
        .collect();

    // A homogeneous array of objects collapses into one header plus one
    // comma-joined row per element.
    let text = to_string(&inventory)?;
    println!("Tabular TOON:\n{}\n", text);

    let inventory_back: Vec<Product> = from_str(&text)?;
    assert_eq!(inventory, inventory_back);
    println!("✓ {} products round-tripped", inventory_back.len());

    // Compare against JSON for the same data
    let json = serde_json::to_string_pretty(&inventory)?;
    println!(
        "\nSize comparison: TOON {} bytes vs JSON {} bytes",
        text.len(),
        json.len()
    );

    Ok(())
}
