use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use gateway_signer::signing::{hmac, joinai};
use gateway_signer::{GatewayConfig, HeaderSigner, SignContext, SigningError};

fn new_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn decode_server_param(value: &str) -> serde_json::Value {
    let bytes = STANDARD.decode(value).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ── HMAC scheme ──────────────────────────────────────────────────────

#[test]
fn hmac_vector_matches_gateway_format() {
    let headers = hmac::sign_headers("example.com", "id1", "secret1", new_year()).unwrap();

    assert_eq!(headers.get("date"), Some("Mon, 01 Jan 2024 00:00:00 GMT"));
    assert!(headers.get("authorization").unwrap().starts_with(
        "hmac api_key=id1, algorithm=hmac-sha256, headers=host date request-line, signature="
    ));
}

#[test]
fn hmac_signature_is_base64_sha256_mac() {
    let headers = hmac::sign_headers("example.com", "id1", "secret1", new_year()).unwrap();
    let authorization = headers.get("authorization").unwrap();
    let signature = authorization.rsplit("signature=").next().unwrap();

    let raw = STANDARD.decode(signature).unwrap();
    assert_eq!(raw.len(), 32);
}

#[test]
fn hmac_signature_tracks_the_clock() {
    let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
    let a = hmac::sign_headers("example.com", "id1", "secret1", new_year()).unwrap();
    let b = hmac::sign_headers("example.com", "id1", "secret1", later).unwrap();
    assert_ne!(a.get("authorization"), b.get("authorization"));
    assert_eq!(b.get("date"), Some("Mon, 01 Jan 2024 00:00:01 GMT"));
}

// ── JoinAI scheme ────────────────────────────────────────────────────

#[test]
fn joinai_is_deterministic_for_fixed_inputs() {
    let a = joinai::sign_headers("app1", "key1", Some("/chat/foo"), new_year(), "nonce-1").unwrap();
    let b = joinai::sign_headers("app1", "key1", Some("/chat/foo"), new_year(), "nonce-1").unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn joinai_server_param_decodes_to_appid_and_csid() {
    let headers = joinai::sign_headers("app1", "key1", Some("/chat/foo"), new_year(), "nonce-1").unwrap();
    let value = decode_server_param(headers.get("X-Server-Param").unwrap());

    assert_eq!(
        value,
        json!({"appid": "app1", "csid": "app1chat00000000000000000000nonce-1"})
    );
}

#[test]
fn joinai_server_param_keeps_appid_first() {
    let headers = joinai::sign_headers("app1", "key1", None, new_year(), "n").unwrap();
    let bytes = STANDARD.decode(headers.get("X-Server-Param").unwrap()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, r#"{"appid":"app1","csid":"app1default00000000000000000n"}"#);
}

#[test]
fn joinai_checksum_matches_reference_md5() {
    let headers = joinai::sign_headers("app1", "key1", Some("/chat/foo"), new_year(), "nonce-1").unwrap();

    // md5("key1" + "1704067200" + X-Server-Param), computed independently.
    assert_eq!(headers.get("X-CurTime"), Some("1704067200"));
    assert_eq!(headers.get("X-CheckSum"), Some("50cf2b844fb5ca8ae65fb5f6fa94d0e9"));
}

#[test]
fn joinai_long_app_name_is_not_truncated() {
    let name = "a-very-long-application-name-indeed";
    let headers =
        joinai::sign_headers("app1", "key1", Some(&format!("/{name}/run")), new_year(), "n").unwrap();
    let value = decode_server_param(headers.get("X-Server-Param").unwrap());
    assert_eq!(value["csid"], format!("app1{name}n"));
}

#[test]
fn joinai_rejects_relative_path() {
    let err = joinai::sign_headers("app1", "key1", Some("chat/foo"), new_year(), "n").unwrap_err();
    assert!(matches!(err, SigningError::InvalidPath { .. }));
    assert!(err.to_string().contains("chat/foo"));
}

// ── Signers built from config ────────────────────────────────────────

#[test]
fn config_signers_match_pure_functions() {
    let config = GatewayConfig::from_pairs([
        ("APP_ID", "app1"),
        ("APP_SECRET", "secret1"),
        ("APP_HOST", "example.com"),
        ("APP_KEY", "key1"),
        ("APP_PATH", "/chat/foo"),
    ]);
    let context = SignContext {
        now: new_year(),
        nonce: "nonce-1",
        path: None,
    };

    let hmac_headers = config.hmac_signer().unwrap().sign_at(&context).unwrap();
    assert_eq!(
        hmac_headers,
        hmac::sign_headers("example.com", "app1", "secret1", new_year()).unwrap()
    );

    let joinai_headers = config.joinai_signer().unwrap().sign_at(&context).unwrap();
    assert_eq!(
        joinai_headers,
        joinai::sign_headers("app1", "key1", Some("/chat/foo"), new_year(), "nonce-1").unwrap()
    );
}

#[test]
fn signed_headers_convert_for_http_clients() {
    let headers = joinai::sign_headers("app1", "key1", None, new_year(), "n").unwrap();
    let map = headers.to_header_map().unwrap();
    assert_eq!(map.get("x-curtime").unwrap(), "1704067200");
    assert_eq!(map.get("content-type").unwrap(), "application/json");
}

#[test]
fn signers_are_shareable_across_threads() {
    let signer = std::sync::Arc::new(gateway_signer::JoinAiSigner::new("app1", "key1"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let signer = signer.clone();
            std::thread::spawn(move || {
                let nonce = format!("nonce-{i}");
                signer
                    .sign_at(&SignContext { now: new_year(), nonce: &nonce, path: None })
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let headers = handle.join().unwrap();
        let expected = joinai::sign_headers("app1", "key1", None, new_year(), &format!("nonce-{i}")).unwrap();
        assert_eq!(headers, expected);
    }
}
