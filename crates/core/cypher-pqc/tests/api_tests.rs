//! Tests for the byte-level API

use cypher_pqc::prelude::*;
use cypher_pqc::random::TestRng;

#[test]
fn test_kem_algorithms_basic_operations() {
    let mut rng = TestRng::new(42);

    for alg in KemAlgorithm::ALL {
        let (pk, sk) = generate_keypair(alg, &mut rng).unwrap();
        assert_eq!(pk.len(), alg.public_key_size());
        assert_eq!(sk.len(), alg.secret_key_size());

        let (ct, ss1) = encapsulate(alg, &pk, &mut rng).unwrap();
        assert_eq!(ct.len(), alg.ciphertext_size());
        assert_eq!(ss1.len(), alg.shared_secret_size());

        let ss2 = decapsulate(alg, &sk, &ct).unwrap();
        assert_eq!(*ss1, *ss2, "{alg} shared secrets differ");
    }
}

#[test]
fn test_signature_algorithms_basic_operations() {
    let mut rng = TestRng::new(42);
    let message = b"byte api message";

    for alg in SignatureAlgorithm::ALL {
        let (pk, sk) = generate_signing_keypair(alg, &mut rng).unwrap();
        assert_eq!(pk.len(), alg.public_key_size());
        assert_eq!(sk.len(), alg.secret_key_size());

        let sig = sign(alg, &sk, message, &mut rng).unwrap();
        assert_eq!(sig.len(), alg.signature_size());
        assert!(verify(alg, &pk, message, &sig), "{alg} rejected its own signature");
        assert!(!verify(alg, &pk, b"other message", &sig));
    }
}

#[test]
fn test_kem_length_errors() {
    let mut rng = TestRng::new(1);
    let alg = KemAlgorithm::Kyber768;
    let (pk, sk) = generate_keypair(alg, &mut rng).unwrap();
    let (ct, _) = encapsulate(alg, &pk, &mut rng).unwrap();

    assert_eq!(
        encapsulate(alg, &pk[..100], &mut rng).unwrap_err(),
        Error::InvalidPublicKey { expected: 1184, actual: 100 }
    );
    assert_eq!(
        decapsulate(alg, &sk[1..], &ct).unwrap_err(),
        Error::InvalidSecretKey { expected: 2400, actual: 2399 }
    );
    assert_eq!(
        decapsulate(alg, &sk, &ct[..ct.len() - 1]).unwrap_err(),
        Error::InvalidCiphertext { expected: 1088, actual: 1087 }
    );

    // A key from a different parameter set is a length error, not a silent failure
    assert!(decapsulate(KemAlgorithm::Kyber512, &sk, &ct).unwrap_err().is_invalid_length());
}

#[test]
fn test_signature_length_errors() {
    let mut rng = TestRng::new(2);
    let alg = SignatureAlgorithm::Dilithium2;
    let (pk, sk) = generate_signing_keypair(alg, &mut rng).unwrap();
    let sig = sign(alg, &sk, b"m", &mut rng).unwrap();

    assert_eq!(
        sign(alg, &sk[..32], b"m", &mut rng).unwrap_err(),
        Error::InvalidSecretKey { expected: 2560, actual: 32 }
    );
    // verify never errors: bad lengths read as an invalid signature
    assert!(!verify(alg, &pk[..10], b"m", &sig));
    assert!(!verify(alg, &pk, b"m", &sig[..sig.len() - 1]));
    assert!(!verify(SignatureAlgorithm::Dilithium3, &pk, b"m", &sig));
}

#[test]
fn test_decapsulate_garbage_ciphertext_succeeds() {
    let mut rng = TestRng::new(3);
    let alg = KemAlgorithm::Kyber1024;
    let (pk, sk) = generate_keypair(alg, &mut rng).unwrap();
    let (_, ss) = encapsulate(alg, &pk, &mut rng).unwrap();

    let garbage = vec![0x5au8; alg.ciphertext_size()];
    let rejected = decapsulate(alg, &sk, &garbage).unwrap();
    assert_eq!(rejected.len(), 32);
    assert_ne!(*rejected, *ss);
}

#[test]
fn test_seeded_keypairs() {
    let seed64 = [7u8; 64];
    let a = generate_keypair_from_seed(KemAlgorithm::Kyber512, &seed64).unwrap();
    let b = generate_keypair_from_seed(KemAlgorithm::Kyber512, &seed64).unwrap();
    assert_eq!(a.0, b.0);
    assert_eq!(*a.1, *b.1);
    assert_eq!(
        generate_keypair_from_seed(KemAlgorithm::Kyber512, &seed64[..32]).unwrap_err(),
        Error::InvalidSeed { expected: 64, actual: 32 }
    );

    let seed32 = [7u8; 32];
    let (pk1, _) = generate_signing_keypair_from_seed(SignatureAlgorithm::Dilithium5, &seed32).unwrap();
    let (pk2, _) = generate_signing_keypair_from_seed(SignatureAlgorithm::Dilithium5, &seed32).unwrap();
    assert_eq!(pk1, pk2);
    assert_eq!(
        generate_signing_keypair_from_seed(SignatureAlgorithm::Dilithium5, &seed64).unwrap_err(),
        Error::InvalidSeed { expected: 32, actual: 64 }
    );
}

#[test]
fn test_context_round_trip() {
    let mut rng = TestRng::new(4);
    let alg = SignatureAlgorithm::Dilithium3;
    let (pk, sk) = generate_signing_keypair(alg, &mut rng).unwrap();

    let sig = sign_with_context(alg, &sk, b"m", b"ctx", &mut rng).unwrap();
    assert!(verify_with_context(alg, &pk, b"m", b"ctx", &sig));
    assert!(!verify(alg, &pk, b"m", &sig));
    assert_eq!(
        sign_with_context(alg, &sk, b"m", &[0u8; 300], &mut rng).unwrap_err(),
        Error::InvalidContext { length: 300 }
    );
}

#[test]
fn test_security_levels() {
    assert_eq!(SecurityLevel::Standard.recommended_kem(), KemAlgorithm::Kyber512);
    assert_eq!(SecurityLevel::High.recommended_kem(), KemAlgorithm::Kyber768);
    assert_eq!(SecurityLevel::VeryHigh.recommended_kem(), KemAlgorithm::Kyber1024);

    assert_eq!(SecurityLevel::Standard.recommended_signature(), SignatureAlgorithm::Dilithium2);
    assert_eq!(SecurityLevel::High.recommended_signature(), SignatureAlgorithm::Dilithium3);
    assert_eq!(SecurityLevel::VeryHigh.recommended_signature(), SignatureAlgorithm::Dilithium5);
    assert_eq!(SecurityLevel::default(), SecurityLevel::High);
}

#[test]
fn test_keypair_struct() {
    let mut rng = TestRng::new(5);
    let kp = KeyPair::generate(Algorithm::Kem(KemAlgorithm::Kyber512), &mut rng).unwrap();
    assert_eq!(kp.public_key().len(), 800);
    assert_eq!(kp.secret_key().len(), 1632);

    let debug = format!("{kp:?}");
    assert!(debug.contains("REDACTED"));
    assert!(!debug.contains(&format!("{:?}", &kp.secret_key()[..8])));

    let kp = KeyPair::generate(Algorithm::Signature(SignatureAlgorithm::Dilithium2), &mut rng).unwrap();
    let sig = sign(SignatureAlgorithm::Dilithium2, kp.secret_key(), b"hi", &mut rng).unwrap();
    assert!(verify(SignatureAlgorithm::Dilithium2, kp.public_key(), b"hi", &sig));
}

#[test]
fn test_algorithm_display() {
    assert_eq!(KemAlgorithm::Kyber768.to_string(), "ML-KEM-768 (Kyber768)");
    assert_eq!(
        Algorithm::Signature(SignatureAlgorithm::Dilithium5).to_string(),
        SignatureAlgorithm::Dilithium5.to_string()
    );
    assert_eq!(KemAlgorithm::default(), KemAlgorithm::Kyber768);
    assert_eq!(SignatureAlgorithm::default(), SignatureAlgorithm::Dilithium3);
}

#[cfg(feature = "serde")]
#[test]
fn test_algorithm_serde_round_trip() {
    for alg in KemAlgorithm::ALL {
        let json = serde_json::to_string(&alg).unwrap();
        assert_eq!(serde_json::from_str::<KemAlgorithm>(&json).unwrap(), alg);
    }
    let tagged = Algorithm::Signature(SignatureAlgorithm::Dilithium2);
    let json = serde_json::to_string(&tagged).unwrap();
    assert_eq!(serde_json::from_str::<Algorithm>(&json).unwrap(), tagged);
}

#[test]
fn test_seeded_keygen_is_not_a_default_feature() {
    let manifest = include_str!("../Cargo.toml");
    let default = manifest
        .lines()
        .find(|line| line.trim_start().starts_with("default ="))
        .expect("manifest declares default features");
    assert!(!default.contains("test-utils"), "seeded key generation must stay opt-in: {default}");
    assert!(manifest.contains("test-utils = []"));
}
