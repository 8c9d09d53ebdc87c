//! Key agreement with ML-KEM
//!
//! This example demonstrates how to:
//! - Generate an ML-KEM-768 keypair
//! - Encapsulate a shared secret to the public key
//! - Decapsulate it on the receiving side
//! - Derive a keystream from the shared secret
//! - Use the byte-level API that the mobile bridge calls

use cypher_pqc::prelude::*;
use cypher_pqc::random::OsRng;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Cypher PQC: Key Agreement Example ===\n");
    let mut rng = OsRng::new();

    println!("1. Generating Kyber768 keypair...");
    let (public_key, secret_key) = Kyber768::generate_keypair(&mut rng)?;
    println!("   ✓ Public key size: {} bytes", public_key.as_bytes().len());
    println!("   ✓ Secret key size: {} bytes", secret_key.as_bytes().len());

    println!("\n2. Encapsulating shared secret...");
    let (ciphertext, sender_secret) = Kyber768::encapsulate(&public_key, &mut rng)?;
    println!("   ✓ Ciphertext size: {} bytes", ciphertext.as_bytes().len());

    println!("\n3. Recipient decapsulating shared secret...");
    let recipient_secret = Kyber768::decapsulate(&secret_key, &ciphertext);
    assert_eq!(sender_secret, recipient_secret);
    println!("   ✓ Both parties hold the same 32-byte secret");

    println!("\n4. Encrypting with a SHAKE256 keystream...");
    let message = b"Hello, Post-Quantum World!";
    let encrypted = xor_keystream(message, sender_secret.as_ref());
    let decrypted = xor_keystream(&encrypted, recipient_secret.as_ref());
    println!("   ✓ Decrypted message: \"{}\"", String::from_utf8_lossy(&decrypted));

    println!("\n5. Byte-level API:");
    for alg in KemAlgorithm::ALL {
        let (pk, sk) = generate_keypair(alg, &mut rng)?;
        let (ct, ss) = encapsulate(alg, &pk, &mut rng)?;
        let recovered = decapsulate(alg, &sk, &ct)?;
        assert_eq!(*ss, *recovered);
        println!(
            "   • {alg} (level {}): pk {} / ct {} bytes",
            alg.security_level(),
            pk.len(),
            ct.len()
        );
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}

// Keystream XOR for demonstration only: no authentication, never reuse a key
fn xor_keystream(data: &[u8], key: &[u8]) -> Vec<u8> {
    let mut xof = Shake256::default();
    xof.update(key);
    let mut keystream = vec![0u8; data.len()];
    xof.finalize_xof().read(&mut keystream);

    data.iter().zip(keystream.iter()).map(|(d, k)| d ^ k).collect()
}
