//! # Envelope Demo
//!
//! Alice seals a message for Bob; Bob finds the right key, opens it and
//! verifies Alice; Mallory's forgery and a tampered envelope are rejected.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example envelope_demo
//! ```

use seal_core::envelope::{recipient_fingerprint, Opener, Sealer};
use seal_core::{Error, KeyPair};

fn main() -> seal_core::Result<()> {
    println!("=== Seal Core: Envelope Demo ===\n");

    // Step 1: Create keypairs
    println!("Step 1: Generating 2048-bit RSA keypairs...");

    let alice = KeyPair::generate(2048)?;
    let bob = KeyPair::generate(2048)?;
    let mallory = KeyPair::generate(2048)?;

    println!("  Alice:   {}", alice.fingerprint());
    println!("  Bob:     {}", bob.fingerprint());
    println!("  Mallory: {}", mallory.fingerprint());
    println!();

    // Step 2: Explain the envelope
    println!("Step 2: Understanding the envelope");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                     ENVELOPE LAYOUT                         │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │  Bob's FP ‖ len ‖ RSA(Bob, K) ‖ AES-GCM(K, inner)           │");
    println!("  │                                                             │");
    println!("  │  inner = Alice's FP ‖ len ‖ Sign(Alice, msg) ‖ msg          │");
    println!("  │                                                             │");
    println!("  │  • K is fresh for every message                            │");
    println!("  │  • Only Bob can unwrap K                                   │");
    println!("  │  • Alice's identity is hidden inside the ciphertext        │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 3: Seal
    println!("Step 3: Alice seals a message for Bob...");

    let message = "The launch code is in the second drawer.";
    let sealer = Sealer::new(alice.private_key(), alice.fingerprint().as_bytes(), bob.public_key())?;
    let envelope = sealer.seal(message)?;

    println!("  Message:  \"{}\"", message);
    println!("  Envelope: {} bytes", envelope.len());
    println!();

    // Step 4: Pick the key
    println!("Step 4: Bob checks who the envelope is for...");

    let addressed_to = recipient_fingerprint(&envelope)?;
    println!("  Addressed to: {}", addressed_to);
    println!("  Bob's key?    {}", &addressed_to == bob.fingerprint());
    println!();

    // Step 5: Open and verify
    println!("Step 5: Bob opens the envelope and verifies the sender...");

    let opener = Opener::new(bob.private_key())?;
    let opened = opener.open(&envelope)?;
    println!("  Claimed sender: {}", opened.sender_fingerprint());

    match opened.verify(alice.public_key()) {
        Ok(()) => println!(
            "  [OK] Signed by Alice: \"{}\"",
            String::from_utf8_lossy(opened.plaintext())
        ),
        Err(e) => println!("  [FAILED] {}", e),
    }
    println!();

    // Step 6: Forgery
    println!("Step 6: Mallory seals a message claiming to be Alice...");

    let forged = Sealer::new(mallory.private_key(), alice.fingerprint().as_bytes(), bob.public_key())?
        .seal("Please wire the funds to Mallory.")?;
    let opened = opener.open(&forged)?;

    println!("  Claimed sender: {}", opened.sender_fingerprint());
    match opened.verify(alice.public_key()) {
        Ok(()) => println!("  [UNEXPECTED] Forgery verified!"),
        Err(Error::SignatureMismatch) => println!("  [OK] Forgery detected: signature does not match Alice"),
        Err(e) => println!("  [FAILED] {}", e),
    }
    println!();

    // Step 7: Tampering
    println!("Step 7: An attacker flips one byte of the ciphertext...");

    let mut tampered = envelope.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;

    match opener.open(&tampered) {
        Ok(_) => println!("  [UNEXPECTED] Tampered envelope opened!"),
        Err(e) if e.is_tamper_evidence() => println!("  [OK] Tampering detected: {}", e),
        Err(e) => println!("  [FAILED] {}", e),
    }
    println!();

    println!("=== Demo Complete ===");
    Ok(())
}
