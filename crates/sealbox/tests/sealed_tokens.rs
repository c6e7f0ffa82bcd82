//! End-to-end behaviour of sealed tokens through the public API.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;

use sealbox::codec::{MIN_SEALED_LEN, NONCE_LEN, TAG_LEN};
use sealbox::{Config, EncryptionKey, TokenCodec, UnsealError};

fn zero_key_codec() -> TokenCodec {
    TokenCodec::new(EncryptionKey::from_bytes(&[0u8; 32]).unwrap())
}

#[test]
fn zero_key_hello_world_scenario() {
    let codec = zero_key_codec();
    let sealed = codec.seal("hello-world").unwrap();

    // 28 bytes of nonce+tag plus 11 bytes of ciphertext, base64-expanded.
    assert!(sealed.len() >= 40);
    assert_eq!(codec.unseal(&sealed).unwrap(), "hello-world");

    // Mutating the last character must be caught one way or the other.
    let mut mutated = sealed.clone();
    let last = mutated.pop().unwrap();
    mutated.push(if last == 'A' { 'B' } else { 'A' });
    assert!(codec.unseal(&mutated).is_err());
}

#[test]
fn every_single_byte_flip_is_detected() {
    let codec = zero_key_codec();
    let sealed = codec.seal("hello-world").unwrap();
    let blob = URL_SAFE.decode(&sealed).unwrap();
    assert_eq!(blob.len(), MIN_SEALED_LEN + "hello-world".len());

    // Flip each byte in turn: positions cover the nonce, tag, and
    // ciphertext regions. Every flip must fail authentication and none may
    // leak altered plaintext.
    for i in 0..blob.len() {
        let mut tampered = blob.clone();
        tampered[i] ^= 0x01;
        let result = codec.unseal(&URL_SAFE.encode(&tampered));
        assert!(
            matches!(result, Err(UnsealError::AuthenticationFailed)),
            "byte {i} flip went undetected"
        );
    }
}

#[test]
fn tamper_regions_are_all_covered() {
    // Sanity-check the region arithmetic used by the sweep above.
    assert_eq!(NONCE_LEN, 12);
    assert_eq!(TAG_LEN, 16);
    assert_eq!(MIN_SEALED_LEN, 28);
}

#[test]
fn tokens_survive_storage_as_text() {
    let codec = zero_key_codec();
    let sealed = codec.seal("api-token-xyz").unwrap();

    // The sealed form must be printable and safe for a text column.
    assert!(sealed.chars().all(|c| c.is_ascii_alphanumeric()
        || c == '-'
        || c == '_'
        || c == '='));

    // Unsealing is idempotent: reading the stored token twice works.
    assert_eq!(codec.unseal(&sealed).unwrap(), "api-token-xyz");
    assert_eq!(codec.unseal(&sealed).unwrap(), "api-token-xyz");
}

#[test]
fn config_built_components_interoperate() {
    let cfg = Config {
        sealbox_key: URL_SAFE.encode([7u8; 32]),
        pseudonym_salt: "integration-salt".into(),
        pseudonym_iterations: 1_000,
        log_level: "debug".into(),
    };

    let codec = cfg.codec().unwrap();
    let pseudonymizer = cfg.pseudonymizer().unwrap();

    // Typical record flow: pseudonymize the customer id, seal the credential,
    // bind the sealed credential to the pseudonym so tokens cannot migrate
    // between records.
    let pseudonym = pseudonymizer.pseudonymize("kunde-10045");
    let sealed = codec
        .seal_bound("billbee-api-key", pseudonym.as_bytes())
        .unwrap();

    assert_eq!(
        codec.unseal_bound(&sealed, pseudonym.as_bytes()).unwrap(),
        "billbee-api-key"
    );

    let other = pseudonymizer.pseudonymize("kunde-10046");
    assert!(matches!(
        codec.unseal_bound(&sealed, other.as_bytes()),
        Err(UnsealError::AuthenticationFailed)
    ));
}

#[test]
fn codec_is_shareable_across_threads() {
    let codec = std::sync::Arc::new(zero_key_codec());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let codec = std::sync::Arc::clone(&codec);
            std::thread::spawn(move || {
                let plaintext = format!("token-{i}");
                let sealed = codec.seal(&plaintext).unwrap();
                assert_eq!(codec.unseal(&sealed).unwrap(), plaintext);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
