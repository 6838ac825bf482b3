use num_bigint::BigUint;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use shamir_chunks::{
    build_per_chunk_point_maps, codec, combine, reconstruct, split, PrimeField, SecretSharer,
    ShareBundle, SharingConfig, SharingError,
};

fn sample_secrets() -> Vec<&'static [u8]> {
    vec![
        &b"a"[..],
        b"Hello, World!",
        b"exactly fifteen",
        b"sixteen bytes!!!",
        b"The quick brown fox jumps over the lazy dog, several times over.",
    ]
}

#[test]
fn round_trip_for_every_threshold_subset() {
    let sharer = SecretSharer::default();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for secret in sample_secrets() {
        for (n, t) in [(2, 2), (3, 2), (5, 3), (7, 7)] {
            let bundles = sharer.split_with_rng(secret, n, t, &mut rng).unwrap();
            assert_eq!(bundles.len(), n);

            for _ in 0..5 {
                let subset: Vec<ShareBundle> =
                    bundles.choose_multiple(&mut rng, t).cloned().collect();
                assert_eq!(sharer.combine(&subset).unwrap(), secret);
            }
        }
    }
}

#[test]
fn round_trip_through_text_form() {
    let secret = b"correct horse battery staple";
    let lines: Vec<String> = split(secret, 5, 3)
        .unwrap()
        .iter()
        .map(|b| b.to_string())
        .collect();

    let parsed: Vec<ShareBundle> = [&lines[4], &lines[0], &lines[2]]
        .iter()
        .map(|line| line.parse().unwrap())
        .collect();
    assert_eq!(combine(&parsed).unwrap(), secret);
}

#[test]
fn bundles_hold_one_value_per_fifteen_bytes() {
    let secret = [b'x'; 46];
    let bundles = split(&secret, 3, 2).unwrap();
    for bundle in &bundles {
        assert_eq!(bundle.values.len(), 4);
        assert_eq!(bundle.values_string().matches('+').count(), 3);
        let field = PrimeField::mersenne_127();
        assert!(bundle.values.iter().all(|v| field.contains(v)));
    }
}

#[test]
fn fewer_than_threshold_bundles_give_wrong_secret() {
    let sharer = SecretSharer::default();
    let mut rng = StdRng::seed_from_u64(17);
    let secret = b"below threshold";
    for _ in 0..10 {
        let bundles = sharer.split_with_rng(secret, 5, 3, &mut rng).unwrap();
        let recovered = sharer.combine(&bundles[..2]).unwrap();
        assert_ne!(recovered, secret);
    }
}

#[test]
fn raw_pairs_drive_interpolation() {
    let sharer = SecretSharer::default();
    let mut rng = StdRng::seed_from_u64(3);
    let secret = b"pairs of x and bundle text";
    let bundles = sharer.split_with_rng(secret, 4, 2, &mut rng).unwrap();

    let inputs: Vec<(u32, String)> = bundles[2..]
        .iter()
        .map(|b| (b.x, b.values_string()))
        .collect();
    let maps = build_per_chunk_point_maps(&inputs).unwrap();
    assert_eq!(maps.len(), 2);

    let field = sharer.field();
    let recovered: Vec<u8> = maps
        .iter()
        .flat_map(|points| codec::decode(&reconstruct(field, points).unwrap()))
        .collect();
    assert_eq!(recovered, secret);
}

#[test]
fn mismatched_bundles_are_rejected() {
    let short = split(b"short", 3, 2).unwrap();
    let long = split(b"a much longer secret than fifteen bytes", 3, 2).unwrap();
    let mixed = vec![short[0].clone(), long[1].clone()];
    assert!(matches!(
        combine(&mixed),
        Err(SharingError::ShareCountMismatch { .. })
    ));

    let duplicated = vec![short[0].clone(), short[0].clone()];
    assert!(matches!(
        combine(&duplicated),
        Err(SharingError::DuplicateIdentifier(1))
    ));
}

#[test]
fn configured_small_field() {
    let config =
        SharingConfig::from_json(r#"{"modulus": [65537], "chunk_size": 2}"#).unwrap();
    let sharer = SecretSharer::new(&config).unwrap();
    assert_eq!(sharer.chunk_size(), 2);
    assert_eq!(sharer.field().modulus(), &BigUint::from(65537u32));

    let mut rng = StdRng::seed_from_u64(8);
    let secret = b"tiny field, many chunks";
    let bundles = sharer.split_with_rng(secret, 6, 4, &mut rng).unwrap();
    let mut subset = bundles.clone();
    subset.shuffle(&mut rng);
    assert_eq!(sharer.combine(&subset[..4]).unwrap(), secret);
}

#[test]
fn tiny_field_caps_participant_count() {
    let config = SharingConfig::from_json(r#"{"modulus": [257], "chunk_size": 1}"#).unwrap();
    let sharer = SecretSharer::new(&config).unwrap();
    let mut rng = StdRng::seed_from_u64(257);

    for n in [257, 258] {
        assert!(matches!(
            sharer.split_with_rng(b"hunter2", n, 3, &mut rng),
            Err(SharingError::InvalidThreshold { .. })
        ));
    }

    let bundles = sharer.split_with_rng(b"hunter2", 256, 3, &mut rng).unwrap();
    assert_eq!(bundles.len(), 256);
    assert!(bundles.iter().all(|b| b.x != 0 && b.x < 257));
    let picked: Vec<ShareBundle> = bundles.choose_multiple(&mut rng, 3).cloned().collect();
    assert_eq!(sharer.combine(&picked).unwrap(), b"hunter2");
}
