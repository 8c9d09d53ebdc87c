//! Known-answer tests
//!
//! ML-KEM is checked against the NIST `PQCgenKAT_kem` transcript for the
//! first vector (count = 0), produced by the AES-256-CTR DRBG seeded with
//! bytes `0..48`. The transcript is long, so only its SHA-256 is pinned.
//!
//! ML-DSA is checked against digests of keys and signatures derived from a
//! fixed seed, with and without a context string.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes256;
use cypher_pqc::{
    dilithium::{Dilithium2, Dilithium3, Dilithium5},
    kyber::{Kyber1024, Kyber512, Kyber768},
    Kem, Result, SecureRandom, SeededKem, SeededSignature, Signature,
};
use hex_literal::hex;
use sha2::{Digest, Sha256};

/// The CTR_DRBG from the NIST submission package (no derivation function)
struct NistDrbg {
    key: [u8; 32],
    v: [u8; 16],
}

impl NistDrbg {
    fn new(entropy: &[u8; 48]) -> Self {
        let mut drbg = Self { key: [0u8; 32], v: [0u8; 16] };
        drbg.update(Some(entropy));
        drbg
    }

    fn increment(&mut self) {
        for byte in self.v.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
    }

    fn next_block(&mut self) -> [u8; 16] {
        self.increment();
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        let mut block = GenericArray::clone_from_slice(&self.v);
        cipher.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(&block);
        out
    }

    fn update(&mut self, provided: Option<&[u8; 48]>) {
        let mut temp = [0u8; 48];
        for chunk in temp.chunks_mut(16) {
            chunk.copy_from_slice(&self.next_block());
        }
        if let Some(data) = provided {
            for (t, d) in temp.iter_mut().zip(data) {
                *t ^= d;
            }
        }
        self.key.copy_from_slice(&temp[..32]);
        self.v.copy_from_slice(&temp[32..]);
    }
}

impl SecureRandom for NistDrbg {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        for chunk in dest.chunks_mut(16) {
            let block = self.next_block();
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        self.update(None);
        Ok(())
    }
}

/// Reproduce the `count = 0` record of the `.rsp` file and hash it
fn kem_transcript_digest<T: Kem>() -> [u8; 32] {
    let mut entropy = [0u8; 48];
    for (i, byte) in entropy.iter_mut().enumerate() {
        *byte = i as u8;
    }
    let mut master = NistDrbg::new(&entropy);
    let mut seed = [0u8; 48];
    master.fill_bytes(&mut seed).unwrap();

    let mut rng = NistDrbg::new(&seed);
    let (pk, sk) = T::generate_keypair(&mut rng).unwrap();
    let (ct, ss) = T::encapsulate(&pk, &mut rng).unwrap();
    assert_eq!(T::decapsulate(&sk, &ct), ss);

    let record = format!(
        "count = 0\nseed = {}\npk = {}\nsk = {}\nct = {}\nss = {}\n",
        hex::encode_upper(seed),
        hex::encode_upper(pk.as_ref()),
        hex::encode_upper(sk.as_ref()),
        hex::encode_upper(ct.as_ref()),
        hex::encode_upper(ss.as_ref()),
    );
    sha256(record.as_bytes())
}

fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(bytes));
    out
}

#[test]
fn test_kyber512_nist_kat() {
    assert_eq!(
        kem_transcript_digest::<Kyber512>(),
        hex!("c70041a761e01cd6426fa60e9fd6a4412c2be817386c8d0f3334898082512782")
    );
}

#[test]
fn test_kyber768_nist_kat() {
    assert_eq!(
        kem_transcript_digest::<Kyber768>(),
        hex!("5352539586b6c3df58be6158a6250aeff402bd73060b0a3de68850ac074c17c3")
    );
}

#[test]
fn test_kyber1024_nist_kat() {
    assert_eq!(
        kem_transcript_digest::<Kyber1024>(),
        hex!("f580d851e5fb27e6876e5e203fa18be4cdbfd49e05d48fec3d3992c8f43a13e6")
    );
}

#[test]
fn test_seeded_kem_matches_rng_path() {
    // generate_keypair draws d || z in one call, encapsulate draws m in one call
    let mut seed = [0u8; 64];
    seed.iter_mut().enumerate().for_each(|(i, b)| *b = (i * 7) as u8);
    let coins = [0x5au8; 32];

    struct Replay<'a>(&'a [&'a [u8]], usize);
    impl SecureRandom for Replay<'_> {
        fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
            dest.copy_from_slice(self.0[self.1]);
            self.1 += 1;
            Ok(())
        }
    }

    let draws: [&[u8]; 2] = [&seed, &coins];
    let mut replay = Replay(&draws, 0);
    let (pk, sk) = Kyber768::generate_keypair(&mut replay).unwrap();
    let (ct, ss) = Kyber768::encapsulate(&pk, &mut replay).unwrap();

    let (pk2, sk2) = Kyber768::keypair_from_seed(&seed).unwrap();
    let (ct2, ss2) = Kyber768::encapsulate_derand(&pk2, &coins).unwrap();
    assert_eq!(pk, pk2);
    assert_eq!(sk.as_ref(), sk2.as_ref());
    assert_eq!(ct, ct2);
    assert_eq!(ss, ss2);
}

struct DsaDigests {
    pk: [u8; 32],
    sk: [u8; 32],
    sig: [u8; 32],
    sig_ctx: [u8; 32],
}

fn check_dsa_vector<T: SeededSignature>(expected: DsaDigests) {
    let mut seed = [0u8; 32];
    seed.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);
    let message = b"interoperability check";
    let mut rnd = [0u8; 32];
    rnd.iter_mut().enumerate().for_each(|(i, b)| *b = 0xa0 + i as u8);

    let (pk, sk) = T::keypair_from_seed(&seed).unwrap();
    let sig = T::sign_derand(&sk, message, &[], &[0u8; 32]).unwrap();
    let sig_ctx = T::sign_derand(&sk, message, b"chat!", &rnd).unwrap();

    assert_eq!(sha256(pk.as_ref()), expected.pk, "public key");
    assert_eq!(sha256(sk.as_ref()), expected.sk, "secret key");
    assert_eq!(sha256(sig.as_ref()), expected.sig, "signature");
    assert_eq!(sha256(sig_ctx.as_ref()), expected.sig_ctx, "signature with context");

    assert!(T::verify(&pk, message, &sig));
    assert!(T::verify_with_context(&pk, message, b"chat!", &sig_ctx));
    assert!(!T::verify(&pk, message, &sig_ctx));
}

#[test]
fn test_dilithium2_kat() {
    check_dsa_vector::<Dilithium2>(DsaDigests {
        pk: hex!("9f107644c1084526af3bc8098680b05499a2325a644e388fb4f970e058d19d46"),
        sk: hex!("04bf6b9f579166a627961dfc5c3bf9717df868db88863856356c4668c8b56b0b"),
        sig: hex!("9363af7051e5b26f9b90ccf6e0f95ff1da68545c717a6d238268365dcac2e753"),
        sig_ctx: hex!("5e2105e1c91b1398abc4b2f860060d8014197e160767c3eb31a951bc675ca936"),
    });
}

#[test]
fn test_dilithium3_kat() {
    check_dsa_vector::<Dilithium3>(DsaDigests {
        pk: hex!("d666806e11cee19a7c989f7445f90dd419cf4d2d51db8c0fdb4c0f0a542238c9"),
        sk: hex!("9f1e24f47795fe50040384e3d6183988047170fa2d866406b70fe0a3f8216063"),
        sig: hex!("e542427bdb2958f30d673608f4d7ff052ac446431ae5dd2aeca099557033e6ef"),
        sig_ctx: hex!("3e4210a0cdb14166d973779b7668777bccb830e93663375c656ab02154f39477"),
    });
}

#[test]
fn test_dilithium5_kat() {
    check_dsa_vector::<Dilithium5>(DsaDigests {
        pk: hex!("91dc389cfaa01470b7f66eee45a4ae9026d154817c754dfe22298b3fa241ffcd"),
        sk: hex!("764d3e223ed90c07bc91a0ab6ecd170e5c66ffe39f7039298596039a36005435"),
        sig: hex!("f297329ad110f71f7fd14687048ab349620c1a5f619e8c8649846152fcbc8dba"),
        sig_ctx: hex!("dd9ada95b1f751f9a0ac6853b8597bf1e348a64c0ef6af103ea8e8fbdeabc0bc"),
    });
}
