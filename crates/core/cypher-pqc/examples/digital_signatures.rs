//! Digital signatures with ML-DSA
//!
//! This example demonstrates how to:
//! - Generate ML-DSA keypairs
//! - Sign and verify messages, with and without a context string
//! - Detect tampering
//! - Export a public key as hex and import it again

use std::time::Instant;

use cypher_pqc::prelude::*;
use cypher_pqc::random::OsRng;
use cypher_pqc::traits::HexEncodable;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Cypher PQC: Digital Signatures Example ===\n");
    let mut rng = OsRng::new();

    println!("1. Generating Dilithium3 keypair...");
    let start = Instant::now();
    let (public_key, secret_key) = Dilithium3::generate_keypair(&mut rng)?;
    println!("   ✓ Public key size: {} bytes", public_key.as_bytes().len());
    println!("   ✓ Secret key size: {} bytes", secret_key.as_bytes().len());
    println!("   ✓ Generation time: {:?}", start.elapsed());

    println!("\n2. Signing a message...");
    let message = b"Important document: Transfer 1000 units to account XYZ";
    let start = Instant::now();
    let signature = Dilithium3::sign(&secret_key, message, &mut rng)?;
    println!("   ✓ Signature size: {} bytes", signature.as_bytes().len());
    println!("   ✓ Signing time: {:?}", start.elapsed());

    println!("\n3. Verifying signature...");
    if Dilithium3::verify(&public_key, message, &signature) {
        println!("   ✓ Signature is valid!");
    } else {
        println!("   ✗ Signature is invalid");
    }

    println!("\n4. Testing tamper detection...");
    let mut tampered = message.to_vec();
    tampered[0] ^= 1;
    if Dilithium3::verify(&public_key, &tampered, &signature) {
        println!("   ✗ WARNING: Tampered message verified!");
    } else {
        println!("   ✓ Tampered message correctly rejected");
    }

    println!("\n5. Domain separation with a context string...");
    let signature = Dilithium3::sign_with_context(&secret_key, message, b"payments-v1", &mut rng)?;
    let same = Dilithium3::verify_with_context(&public_key, message, b"payments-v1", &signature);
    let other = Dilithium3::verify_with_context(&public_key, message, b"chat-v1", &signature);
    println!("   ✓ Same context: {same}, other context: {other}");

    println!("\n6. Exporting the public key as hex...");
    let exported = public_key.to_hex();
    let imported = <Dilithium3 as Signature>::PublicKey::from_hex(&exported)?;
    println!("   ✓ Hex length: {} characters", exported.len());
    println!(
        "   ✓ Imported key verifies: {}",
        Dilithium3::verify_with_context(&imported, message, b"payments-v1", &signature)
    );

    println!("\n7. Available security levels:");
    for level in [SecurityLevel::Standard, SecurityLevel::High, SecurityLevel::VeryHigh] {
        let alg = level.recommended_signature();
        println!(
            "   • {level:?} → {alg}: pk {} / sig {} bytes",
            alg.public_key_size(),
            alg.signature_size()
        );
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
