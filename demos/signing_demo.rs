//! # Signing Demo
//!
//! RSA signatures under each supported digest, driven through the named
//! operation registry the way a host application would call it.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use serde_json::json;

fn call(method: &str, args: serde_json::Value) -> serde_json::Value {
    match seal_core::dispatch(method, &args.to_string()) {
        Ok(out) => serde_json::from_str(&out).unwrap_or(serde_json::Value::Null),
        Err((code, message)) => {
            println!("  [ERROR {}] {}", code, message);
            serde_json::Value::Null
        }
    }
}

fn main() {
    println!("=== Seal Core: Signing Demo ===\n");

    // Step 1: Create a keypair
    println!("Step 1: Creating a 2048-bit RSA keypair via crypto.rsa.create-key...");

    let keypair = call("crypto.rsa.create-key", json!({ "strength": 2048 }));
    println!("  Fingerprint: {}", keypair["fingerprint"]);
    println!();

    // Step 2: Sign with each digest
    println!("Step 2: Signing the same message with each digest...");

    let message = json!({ "text": "This message was sent by me and has not been tampered with." });
    for algorithm in ["SHA256", "SHA384", "SHA512", "SHA1", "MD5"] {
        let signed = call(
            "crypto.rsa.sign",
            json!({
                "private_key": keypair["private_key"],
                "message": message,
                "algorithm": algorithm,
            }),
        );
        let verified = call(
            "crypto.rsa.verify",
            json!({
                "public_key": keypair["public_key"],
                "message": message,
                "signature": signed["signature"],
                "algorithm": algorithm,
            }),
        );

        let weak = if matches!(algorithm, "SHA1" | "MD5") { " (legacy, weak)" } else { "" };
        println!("  {:<6} valid={}{}", algorithm, verified["valid"], weak);
    }
    println!();

    // Step 3: Forgery detection
    println!("Step 3: Verifying the signature against a modified message...");

    let signed = call(
        "crypto.rsa.sign",
        json!({ "private_key": keypair["private_key"], "message": message }),
    );
    let verified = call(
        "crypto.rsa.verify",
        json!({
            "public_key": keypair["public_key"],
            "message": { "text": "This message was sent by someone else." },
            "signature": signed["signature"],
        }),
    );
    match verified["valid"].as_bool() {
        Some(false) => println!("  [OK] Modified message rejected"),
        Some(true) => println!("  [UNEXPECTED] Modified message accepted!"),
        None => println!("  [FAILED] No result"),
    }
    println!();

    println!("=== Demo Complete ===");
}
