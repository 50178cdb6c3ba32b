//! Working with dynamic `Value` trees: the `toon!` macro, parsing, and
//! accessors.
//!
//! Run with: cargo run --example dynamic_values

use std::error::Error;
use toon::{parse, to_value, toon, Value};

fn main() -> Result<(), Box<dyn Error>> {
    // Build a value tree without defining any structs
    let config = toon!({
        "name": "my-service",
        "port": 8080,
        "debug": false,
        "limits": {
            "max_connections": 512,
            "timeout_secs": 30
        },
        "hosts": ["alpha", "beta", "gamma"]
    });

    println!("Encoded config:\n{}\n", config);

    // Sentinel indexing never panics; misses come back as null
    println!("port     = {}", config["port"].integer());
    println!("debug    = {}", config["debug"].boolean());
    println!("timeout  = {}", config["limits"]["timeout_secs"].integer());
    println!("missing  = {}", config["no_such_key"]);
    println!("host[1]  = {}\n", config["hosts"][1].string());

    // Parse a hand-written document back into a tree
    let doc = parse(
        "# deployment notes\n\
         region: eu-west-1\n\
         replicas: 3\n\
         tags: [2]: stable, canary\n",
    )?;
    println!("region   = {}", doc["region"].string());
    println!("replicas = {}", doc["replicas"].integer());
    for tag in doc["tags"].elements() {
        println!("tag      = {}", tag.string());
    }

    // Option-returning accessors for when a miss should be visible
    match doc["replicas"].as_i64() {
        Some(n) => println!("\nas_i64 saw {n}"),
        None => println!("\nreplicas was not an integer"),
    }

    // Any Serialize type converts into a Value
    let point = to_value(&(3, 4))?;
    assert_eq!(point, Value::Array(vec![3.into(), 4.into()]));
    println!("point    = {point}");

    Ok(())
}
