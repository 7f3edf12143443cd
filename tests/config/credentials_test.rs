//! Credentials from `.env` files with demo fallback.

use std::collections::BTreeMap;

use adcraft::credentials::{read_env_file, ClientCredentials, CLIENT_ID_KEY, CLIENT_SECRET_KEY};

#[test]
fn env_file_values_are_read() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join(".env");
    std::fs::write(
        &path,
        "ADCRAFT_CLIENT_ID=acme\nADCRAFT_CLIENT_SECRET=\"s3cret\"\nOTHER=1\n",
    )
    .expect("should write env file");

    let vars = read_env_file(&path).expect("env file should parse");
    assert_eq!(vars.get(CLIENT_ID_KEY).map(String::as_str), Some("acme"));
    assert_eq!(vars.get(CLIENT_SECRET_KEY).map(String::as_str), Some("s3cret"));

    let creds = ClientCredentials::resolve(&[&vars]);
    assert_eq!(creds.client_id, "acme");
    assert_eq!(creds.client_secret, "s3cret");
}

#[test]
fn missing_env_file_is_empty() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let vars = read_env_file(&tmp.path().join("nope.env")).expect("missing is fine");
    assert!(vars.is_empty());
    assert_eq!(ClientCredentials::resolve(&[&vars]), ClientCredentials::demo());
}

#[test]
fn earlier_sources_win_and_blanks_fall_through() {
    let file: BTreeMap<String, String> = [
        (CLIENT_ID_KEY.to_owned(), "from-file".to_owned()),
        (CLIENT_SECRET_KEY.to_owned(), "  ".to_owned()),
    ]
    .into_iter()
    .collect();
    let process: BTreeMap<String, String> = [
        (CLIENT_ID_KEY.to_owned(), "from-env".to_owned()),
        (CLIENT_SECRET_KEY.to_owned(), "env-secret".to_owned()),
    ]
    .into_iter()
    .collect();

    let creds = ClientCredentials::resolve(&[&file, &process]);
    assert_eq!(creds.client_id, "from-file");
    assert_eq!(creds.client_secret, "env-secret");
}
