//! Tests for the ML-DSA (Dilithium) parameter sets

use cypher_pqc::{
    dilithium::{Dilithium2, Dilithium3, Dilithium5, DilithiumSignature},
    random::TestRng,
    traits::{SeededSignature, Serializable, Signature},
    Error,
};

/// Route the engine's `tracing` events to the test output (`RUST_LOG=cypher_pqc=trace`)
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sign_verify<T: Signature>(seed: u64) {
    init_tracing();
    let mut rng = TestRng::new(seed);
    let message = b"Test message for ML-DSA";

    let (pk, sk) = T::generate_keypair(&mut rng).unwrap();
    assert_eq!(pk.as_ref().len(), T::PUBLIC_KEY_SIZE);
    assert_eq!(sk.as_ref().len(), T::SECRET_KEY_SIZE);

    let signature = T::sign(&sk, message, &mut rng).unwrap();
    assert_eq!(signature.as_ref().len(), T::SIGNATURE_SIZE);
    assert!(T::verify(&pk, message, &signature));

    // Verify with wrong message should fail
    assert!(!T::verify(&pk, b"Wrong message", &signature));
}

#[test]
fn test_dilithium2_sign_verify() {
    sign_verify::<Dilithium2>(42);
}

#[test]
fn test_dilithium3_sign_verify() {
    sign_verify::<Dilithium3>(43);
}

#[test]
fn test_dilithium5_sign_verify() {
    sign_verify::<Dilithium5>(44);
}

#[test]
fn test_dilithium_sizes() {
    assert_eq!(
        (Dilithium2::PUBLIC_KEY_SIZE, Dilithium2::SECRET_KEY_SIZE, Dilithium2::SIGNATURE_SIZE),
        (1312, 2560, 2420)
    );
    assert_eq!(
        (Dilithium3::PUBLIC_KEY_SIZE, Dilithium3::SECRET_KEY_SIZE, Dilithium3::SIGNATURE_SIZE),
        (1952, 4032, 3309)
    );
    assert_eq!(
        (Dilithium5::PUBLIC_KEY_SIZE, Dilithium5::SECRET_KEY_SIZE, Dilithium5::SIGNATURE_SIZE),
        (2592, 4896, 4627)
    );
}

#[test]
fn test_empty_and_large_messages() {
    let mut rng = TestRng::new(8);
    let (pk, sk) = Dilithium2::generate_keypair(&mut rng).unwrap();

    let empty = Dilithium2::sign(&sk, &[], &mut rng).unwrap();
    assert!(Dilithium2::verify(&pk, &[], &empty));
    assert!(!Dilithium2::verify(&pk, &[0], &empty));

    let large = vec![0xabu8; 1 << 16];
    let sig = Dilithium2::sign(&sk, &large, &mut rng).unwrap();
    assert!(Dilithium2::verify(&pk, &large, &sig));
}

#[test]
fn test_signature_byte_flips_rejected() {
    let mut rng = TestRng::new(77);
    let message = b"flip me";
    let (pk, sk) = Dilithium3::generate_keypair(&mut rng).unwrap();
    let signature = Dilithium3::sign(&sk, message, &mut rng).unwrap();
    let bytes = signature.to_bytes();

    // Challenge seed, start and end of z, and the hint region
    for index in [0, 47, 48, 3000, 3308] {
        let mut tampered = bytes.clone();
        tampered[index] ^= 0x04;
        let tampered = DilithiumSignature::<6>::from_bytes(&tampered).unwrap();
        assert!(
            !Dilithium3::verify(&pk, message, &tampered),
            "flip at byte {index} was accepted"
        );
    }
}

#[test]
fn test_cross_key_verification_fails() {
    let mut rng = TestRng::new(42);
    let message = b"Cross verification test";

    let (_, sk1) = Dilithium2::generate_keypair(&mut rng).unwrap();
    let (pk2, _) = Dilithium2::generate_keypair(&mut rng).unwrap();

    let signature = Dilithium2::sign(&sk1, message, &mut rng).unwrap();
    assert!(!Dilithium2::verify(&pk2, message, &signature));
}

#[test]
fn test_context_separates_signatures() {
    let mut rng = TestRng::new(3);
    let (pk, sk) = Dilithium5::generate_keypair(&mut rng).unwrap();
    let message = b"context bound";

    let sig = Dilithium5::sign_with_context(&sk, message, b"app-a", &mut rng).unwrap();
    assert!(Dilithium5::verify_with_context(&pk, message, b"app-a", &sig));
    assert!(!Dilithium5::verify_with_context(&pk, message, b"app-b", &sig));
    assert!(!Dilithium5::verify(&pk, message, &sig));
}

#[test]
fn test_context_length_limit() {
    let mut rng = TestRng::new(4);
    let (pk, sk) = Dilithium2::generate_keypair(&mut rng).unwrap();
    let longest = [0x11u8; 255];
    let too_long = [0x11u8; 256];

    let sig = Dilithium2::sign_with_context(&sk, b"m", &longest, &mut rng).unwrap();
    assert!(Dilithium2::verify_with_context(&pk, b"m", &longest, &sig));

    assert_eq!(
        Dilithium2::sign_with_context(&sk, b"m", &too_long, &mut rng).unwrap_err(),
        Error::InvalidContext { length: 256 }
    );
    // Verification reports false instead of an error
    assert!(!Dilithium2::verify_with_context(&pk, b"m", &too_long, &sig));
}

#[test]
fn test_seeded_signing_is_reproducible() {
    init_tracing();
    let seed = [9u8; 32];
    let (pk, sk) = Dilithium3::keypair_from_seed(&seed).unwrap();
    let (pk_again, _) = Dilithium3::keypair_from_seed(&seed).unwrap();
    assert_eq!(pk, pk_again);

    let sig1 = Dilithium3::sign_derand(&sk, b"msg", &[], &[0u8; 32]).unwrap();
    let sig2 = Dilithium3::sign_derand(&sk, b"msg", &[], &[0u8; 32]).unwrap();
    let sig3 = Dilithium3::sign_derand(&sk, b"msg", &[], &[1u8; 32]).unwrap();
    assert_eq!(sig1, sig2);
    assert_ne!(sig1, sig3);
    assert!(Dilithium3::verify(&pk, b"msg", &sig1));
    assert!(Dilithium3::verify(&pk, b"msg", &sig3));
}

#[test]
fn test_hedged_signatures_differ() {
    let mut rng = TestRng::new(10);
    let (pk, sk) = Dilithium2::generate_keypair(&mut rng).unwrap();
    let sig1 = Dilithium2::sign(&sk, b"same", &mut rng).unwrap();
    let sig2 = Dilithium2::sign(&sk, b"same", &mut rng).unwrap();
    if cfg!(feature = "deterministic-signing") {
        assert_eq!(sig1, sig2);
    } else {
        assert_ne!(sig1, sig2);
    }
    assert!(Dilithium2::verify(&pk, b"same", &sig1));
    assert!(Dilithium2::verify(&pk, b"same", &sig2));
}

#[test]
fn test_all_zero_signature_rejected() {
    let mut rng = TestRng::new(12);
    let (pk, _) = Dilithium2::generate_keypair(&mut rng).unwrap();
    let zeros = DilithiumSignature::<4>::from_bytes(&[0u8; 2420]).unwrap();
    assert!(!Dilithium2::verify(&pk, b"anything", &zeros));
}

#[test]
fn test_dilithium_performance() {
    use std::time::Instant;

    let mut rng = TestRng::new(42);
    let (pk, sk) = Dilithium3::generate_keypair(&mut rng).unwrap();
    let start = Instant::now();
    for i in 0..10u8 {
        let sig = Dilithium3::sign(&sk, &[i], &mut rng).unwrap();
        assert!(Dilithium3::verify(&pk, &[i], &sig));
    }
    println!("10 Dilithium3 sign/verify: {:?}", start.elapsed());
}
