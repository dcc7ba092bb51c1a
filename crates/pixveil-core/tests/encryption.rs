mod common;

use std::fs;

use pixveil_core::api;
use pixveil_core::commands::{hide, unveil};
use pixveil_core::{Algorithm, CodecOptions, EdgeMode, StegoError, StegoStatus};
use tempfile::TempDir;

use common::*;

#[test]
fn should_unveil_encrypted_data_with_the_right_password() {
    let dir = TempDir::new().unwrap();
    let carrier = save(&textured_image(64, 64, 4), &dir.path().join("carrier.png"));
    let (data_file, data) = write_payload(dir.path(), "diary.txt", 120);
    let secret = dir.path().join("secret.png");
    let options = CodecOptions::new(Algorithm::Pvd, EdgeMode::Sobel);

    api::hide::prepare()
        .with_options(options)
        .with_image(&carrier)
        .with_file(&data_file)
        .with_output(&secret)
        .with_password("correct horse")
        .execute()
        .unwrap();

    let unveiled = api::unveil::prepare()
        .from_secret_file(&secret)
        .into_output_folder(dir.path().join("out"))
        .using_password("correct horse")
        .execute()
        .unwrap();

    assert_eq!(fs::read(unveiled).unwrap(), data);
}

#[test]
fn should_fail_decryption_with_a_wrong_password() {
    let dir = TempDir::new().unwrap();
    let carrier = save(&textured_image(64, 64, 5), &dir.path().join("carrier.png"));
    let (data_file, _) = write_payload(dir.path(), "diary.txt", 100);
    let secret = dir.path().join("secret.png");

    let (password, options) = (Some("right".into()), CodecOptions::default());
    hide(&carrier, &secret, &data_file, password, options).unwrap();
    let result = unveil(&secret, &dir.path().join("out"), Some("wrong".into()));

    assert!(matches!(result, Err(StegoError::DecryptionFailed(_))));
    assert_eq!(StegoStatus::of(&result), StegoStatus::DecryptionFailed);
    assert!(!dir.path().join("out").join("diary.txt").exists());
}

#[test]
fn should_ask_for_a_password_when_data_is_encrypted() {
    let dir = TempDir::new().unwrap();
    let carrier = save(&textured_image(64, 64, 6), &dir.path().join("carrier.png"));
    let (data_file, _) = write_payload(dir.path(), "diary.txt", 100);
    let secret = dir.path().join("secret.png");

    let (password, options) = (Some("right".into()), CodecOptions::default());
    hide(&carrier, &secret, &data_file, password, options).unwrap();
    let result = unveil(&secret, &dir.path().join("out"), None);

    assert_eq!(StegoStatus::of(&result), StegoStatus::DecryptionFailed);
}

#[test]
fn should_reject_a_password_for_unencrypted_data() {
    let dir = TempDir::new().unwrap();
    let carrier = save(&textured_image(64, 64, 7), &dir.path().join("carrier.png"));
    let (data_file, _) = write_payload(dir.path(), "diary.txt", 100);
    let secret = dir.path().join("secret.png");

    hide(&carrier, &secret, &data_file, None, CodecOptions::default()).unwrap();
    let result = unveil(&secret, &dir.path().join("out"), Some("anything".into()));

    assert!(matches!(result, Err(StegoError::DataNotEncrypted)));
    assert_eq!(StegoStatus::of(&result), StegoStatus::DataNotEncrypted);
}

#[test]
fn should_count_the_cipher_overhead_against_the_capacity() {
    let dir = TempDir::new().unwrap();
    let carrier = save(&textured_image(20, 20, 8), &dir.path().join("carrier.png"));
    let available = pixveil_core::commands::capacity(&carrier, CodecOptions::default()).unwrap();
    let (data_file, _) = write_payload(dir.path(), "x", available as usize - 1);
    let secret = dir.path().join("secret.png");

    let options = CodecOptions::default();
    hide(&carrier, &secret, &data_file, None, options).unwrap();
    let result = hide(&carrier, &secret, &data_file, Some("pw".into()), options);

    assert_eq!(StegoStatus::of(&result), StegoStatus::FileTooLarge);
}
