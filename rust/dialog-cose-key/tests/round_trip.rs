//! End-to-end conversions through the native provider.
//!
//! Keys are derived from fixed secrets so the points are real curve points;
//! each test walks raw point → COSE_Key → imported key → raw point, or builds
//! COSE_Key maps by hand the way an authenticator would report them.

#![cfg(all(
    feature = "es256",
    feature = "es384",
    feature = "es512",
    feature = "ed25519",
    feature = "rsa"
))]

use dialog_cose_key::{
    CoseAlgorithm, CoseKey, CoseKeyError, EcCurve, KeyType, NativePublicKey, PublicKeyMaterial,
    cose_key::label, ec_public_key_to_raw, raw_ec_key_to_cose,
};
use p256::elliptic_curve::sec1::ToEncodedPoint as _;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use testresult::TestResult;

fn p256_point(secret: &[u8]) -> Option<Vec<u8>> {
    let key = p256::SecretKey::from_slice(secret).ok()?;
    Some(key.public_key().to_encoded_point(false).as_bytes().to_vec())
}

fn curve_points() -> TestResult<Vec<(EcCurve, Vec<u8>)>> {
    let p256 = p256::SecretKey::from_slice(&[42u8; 32])?
        .public_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();
    let p384 = p384::SecretKey::from_slice(&[42u8; 48])?
        .public_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();
    let mut p521_secret = [0x2au8; 66];
    p521_secret[0] = 0x00;
    let p521 = p521::SecretKey::from_slice(&p521_secret)?
        .public_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();

    Ok(vec![
        (EcCurve::P256, p256),
        (EcCurve::P384, p384),
        (EcCurve::P521, p521),
    ])
}

#[test]
fn raw_points_survive_a_round_trip() -> TestResult {
    for (curve, prefixed) in curve_points()? {
        assert_eq!(prefixed.len(), 1 + 2 * curve.field_size_bytes());

        for input in [&prefixed[..], &prefixed[1..]] {
            let cose = raw_ec_key_to_cose(input)?;
            let key = NativePublicKey::from_cose(&cose)?;

            assert_eq!(key.curve(), Some(curve));
            assert_eq!(key.to_raw_ec_point()?, prefixed);
        }
    }
    Ok(())
}

#[test]
fn the_algorithm_label_follows_the_curve() -> TestResult {
    let expected = [CoseAlgorithm::ES256, CoseAlgorithm::ES384, CoseAlgorithm::ES512];

    for ((_, point), algorithm) in curve_points()?.into_iter().zip(expected) {
        let key = CoseKey::from_cbor(&raw_ec_key_to_cose(&point)?)?;
        assert_eq!(key.algorithm()?, Some(algorithm));
        assert_eq!(key.len(), 5);
    }
    Ok(())
}

#[test]
fn a_65_byte_point_needs_the_marker() -> TestResult {
    let mut point = p256_point(&[42u8; 32]).ok_or("fixed secret is valid")?;
    point[0] = 0x05;

    let error = raw_ec_key_to_cose(&point).err().ok_or("expected an error")?;
    assert!(matches!(
        error,
        CoseKeyError::InvalidKeyLength {
            length: 65,
            leading_byte: Some(0x05)
        }
    ));
    assert!(error.to_string().contains("0x05"));
    Ok(())
}

#[test]
fn points_off_the_curve_are_rejected_by_the_provider() -> TestResult {
    let mut point = p256_point(&[42u8; 32]).ok_or("fixed secret is valid")?;
    point[40] ^= 0xff;

    // The COSE form is produced without curve checks.
    let cose = raw_ec_key_to_cose(&point)?;
    let error = NativePublicKey::from_cose(&cose)
        .err()
        .ok_or("expected an error")?;

    match error {
        CoseKeyError::KeyImportRejected { key_type, source } => {
            assert_eq!(key_type, KeyType::Ec2);
            assert!(!source.to_string().is_empty());
        }
        other => panic!("expected KeyImportRejected, got {other}"),
    }
    Ok(())
}

#[test]
fn ed25519_keys_import_from_okp_maps() -> TestResult {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
    let public_key = signing_key.verifying_key();

    let cose = CoseKey::new()
        .with(label::KEY_TYPE, 1_i64)
        .with(label::ALGORITHM, CoseAlgorithm::EdDSA.code())
        .with(label::CURVE, 6_i64)
        .with(label::X, public_key.to_bytes().to_vec())
        .to_cbor()?;

    assert_eq!(
        NativePublicKey::from_cose(&cose)?,
        NativePublicKey::Ed25519(public_key)
    );

    let PublicKeyMaterial::Ed25519 { spki } = PublicKeyMaterial::from_cose(&cose)? else {
        panic!("expected Ed25519 material");
    };
    assert_eq!(&spki[..12], &[0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00]);
    assert_eq!(&spki[12..], public_key.as_bytes());
    Ok(())
}

#[test]
fn unknown_key_types_are_refused() -> TestResult {
    let cose = CoseKey::new()
        .with(label::KEY_TYPE, 4_i64)
        .with(label::X, vec![0u8; 32])
        .to_cbor()?;

    assert!(matches!(
        NativePublicKey::from_cose(&cose),
        Err(CoseKeyError::UnsupportedKeyType(4))
    ));
    Ok(())
}

#[test]
fn garbage_is_malformed() {
    for bytes in [&[][..], &[0xff][..], &[0x01][..], &[0xa1, 0x01][..]] {
        assert!(matches!(
            NativePublicKey::from_cose(bytes),
            Err(CoseKeyError::MalformedCoseKey(_))
        ));
    }
}

proptest! {
    #[test]
    fn any_valid_p256_secret_round_trips(secret in prop::array::uniform32(any::<u8>())) {
        let point = p256_point(&secret);
        prop_assume!(point.is_some());
        let Some(point) = point else { return Ok(()) };

        let cose = raw_ec_key_to_cose(&point[1..]).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let key = NativePublicKey::from_cose(&cose).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let exported = key.to_raw_ec_point().map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(exported, point);
    }

    #[test]
    fn exported_coordinates_are_fixed_width(
        x in prop::collection::vec(any::<u8>(), 0..70),
        y in prop::collection::vec(any::<u8>(), 0..70),
        curve in prop::sample::select(EcCurve::ALL.to_vec()),
    ) {
        let width = curve.field_size_bytes();
        let raw = ec_public_key_to_raw(&x, &y, curve.field_size_bits());

        prop_assert_eq!(raw.len(), 1 + 2 * width);
        prop_assert_eq!(raw[0], 0x04);

        let (raw_x, raw_y) = raw[1..].split_at(width);
        let kept_x = x.len().min(width);
        let kept_y = y.len().min(width);
        prop_assert_eq!(&raw_x[width - kept_x..], &x[x.len() - kept_x..]);
        prop_assert_eq!(&raw_y[width - kept_y..], &y[y.len() - kept_y..]);
        prop_assert!(raw_x[..width - kept_x].iter().all(|byte| *byte == 0));
        prop_assert!(raw_y[..width - kept_y].iter().all(|byte| *byte == 0));
    }
}
