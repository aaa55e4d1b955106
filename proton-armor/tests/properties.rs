//! Property tests for the armor codec.
//!
//! Case count defaults to 256, override with the `PROPTEST_CASES` env var.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use proptest::prelude::*;

use proton_armor::{
    crc24, ArmorError, ArmorHeaders, ArmorSettings, Armorer, BlockType, LineEnding,
};

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn block_type_strategy() -> impl Strategy<Value = BlockType> {
    prop_oneof![
        Just(BlockType::PublicKey),
        Just(BlockType::PrivateKey),
        Just(BlockType::Message),
        Just(BlockType::Signature),
        Just(BlockType::File),
        "[A-Z][A-Z ]{0,20}[A-Z]".prop_map(|label| BlockType::from_label(&label)),
    ]
}

fn settings_strategy() -> impl Strategy<Value = ArmorSettings> {
    (1_usize..=19, any::<bool>()).prop_map(|(quads, crlf)| {
        ArmorSettings::default()
            .with_line_length(quads * 4)
            .with_line_ending(if crlf { LineEnding::CrLf } else { LineEnding::Lf })
    })
}

fn headers_strategy() -> impl Strategy<Value = ArmorHeaders> {
    prop::collection::vec(("[A-Za-z][A-Za-z0-9-]{0,10}", "[ -~]{0,30}"), 0..5)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Builds an armored message from `body` with a checksum computed over `checksum_of`.
fn armor_with_checksum_of(body: &[u8], checksum_of: &[u8]) -> String {
    let [_, b0, b1, b2] = crc24(checksum_of).to_be_bytes();
    format!(
        "-----BEGIN PGP MESSAGE-----\n\n{}\n={}\n-----END PGP MESSAGE-----\n",
        STANDARD.encode(body),
        STANDARD.encode([b0, b1, b2])
    )
}

proptest! {
    #[test]
    fn prop_roundtrip_preserves_payload(
        payload in prop::collection::vec(any::<u8>(), 0..4096),
        block_type in block_type_strategy(),
        settings in settings_strategy(),
    ) {
        let armorer = Armorer::new(settings).unwrap();
        let armored = armorer.encode(&payload, &block_type, &ArmorHeaders::new()).unwrap();
        let block = armorer.decode_block(&armored).unwrap();
        prop_assert_eq!(block.block_type, block_type);
        prop_assert_eq!(block.payload, payload);
    }

    #[test]
    fn prop_roundtrip_preserves_header_order(
        payload in prop::collection::vec(any::<u8>(), 0..256),
        headers in headers_strategy(),
    ) {
        let armorer = Armorer::default();
        let armored = armorer.encode(&payload, &BlockType::Message, &headers).unwrap();
        let block = armorer.decode_block(&armored).unwrap();
        prop_assert_eq!(block.headers, headers);
    }

    #[test]
    fn prop_single_bit_flip_fails_checksum(
        payload in prop::collection::vec(any::<u8>(), 1..512),
        index in any::<prop::sample::Index>(),
        bit in 0_u8..8,
    ) {
        let mut corrupted = payload.clone();
        let position = index.index(corrupted.len());
        corrupted[position] ^= 1 << bit;
        let armored = armor_with_checksum_of(&corrupted, &payload);
        let result = Armorer::default().decode(&armored);
        prop_assert!(
            matches!(result, Err(ArmorError::ChecksumMismatch { .. })),
            "expected checksum mismatch"
        );
    }

    #[test]
    fn prop_substituted_body_character_fails_checksum(
        payload in prop::collection::vec(any::<u8>(), 4..512),
        index in any::<prop::sample::Index>(),
        shift in 1_usize..64,
    ) {
        let armored = Armorer::default().armor_message(&payload).unwrap();
        let mut lines: Vec<String> = armored.lines().map(str::to_owned).collect();

        // Only characters outside the final quantum, so padding stays valid.
        let encoded_len = STANDARD.encode(&payload).len();
        let position = index.index(encoded_len - 4);
        let line_length = ArmorSettings::default().line_length;
        let line = &mut lines[2 + position / line_length];
        let column = position % line_length;

        let original = line.as_bytes()[column];
        let alphabet_index = BASE64_ALPHABET
            .iter()
            .position(|&c| c == original)
            .unwrap();
        let replacement = BASE64_ALPHABET[(alphabet_index + shift) % 64];
        line.replace_range(column..=column, &char::from(replacement).to_string());

        let tampered = format!("{}\n", lines.join("\n"));
        let result = Armorer::default().decode(&tampered);
        prop_assert!(
            matches!(result, Err(ArmorError::ChecksumMismatch { .. })),
            "expected checksum mismatch, got {:?}",
            result
        );
    }

    #[test]
    fn prop_label_mismatch_detected(
        payload in prop::collection::vec(any::<u8>(), 0..256),
        label in "[A-Z]{1,12}",
    ) {
        let armored = Armorer::default().armor_message(&payload).unwrap();
        let end = format!("-----END PGP {label}X-----");
        let tampered = armored.replace("-----END PGP MESSAGE-----", &end);
        let is_label_mismatch = matches!(
            Armorer::default().decode(&tampered),
            Err(ArmorError::LabelMismatch { .. })
        );
        prop_assert!(is_label_mismatch);
    }

    #[test]
    fn prop_embedding_tolerance(
        payload in prop::collection::vec(any::<u8>(), 0..512),
        prefix in "[a-zA-Z0-9 .,:]{0,200}",
        suffix in "[a-zA-Z0-9 .,:\n]{0,200}",
    ) {
        let armored = Armorer::default().armor_message(&payload).unwrap();
        let embedded = format!("{prefix}\n{armored}{suffix}");
        prop_assert_eq!(Armorer::default().decode(&embedded).unwrap(), payload);
    }
}
