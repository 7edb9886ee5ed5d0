use mnprofile::types::{AuthOptions, TimeRange, Track, TrackLimit};
use mnprofile::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, artist: &str) -> Track {
    Track {
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

#[test]
fn test_encode_decode_tracks_keeps_order() {
    let tracks = vec![
        create_test_track("Song A", "Artist 1"),
        create_test_track("Song B", "Artist 2"),
    ];

    let encoded = encode_tracks(&tracks);
    assert_eq!(
        encoded,
        r#"[{"name":"Song A","artist":"Artist 1"},{"name":"Song B","artist":"Artist 2"}]"#
    );

    let decoded = decode_tracks(&encoded).unwrap();
    assert_eq!(decoded, tracks);
}

#[test]
fn test_encode_tracks_empty() {
    assert_eq!(encode_tracks(&[]), "[]");
    assert!(decode_tracks("[]").unwrap().is_empty());
}

#[test]
fn test_decode_tracks_percent_encoded() {
    let tracks = vec![create_test_track("Hyperballad", "Björk")];
    let encoded = urlencoding::encode(&encode_tracks(&tracks)).into_owned();

    // The percent-encoded form is not valid JSON itself
    assert!(encoded.starts_with("%5B"));

    let decoded = decode_tracks(&encoded).unwrap();
    assert_eq!(decoded, tracks);
}

#[test]
fn test_decode_tracks_is_idempotent() {
    let raw = encode_tracks(&[create_test_track("Teardrop", "Massive Attack")]);

    let first = decode_tracks(&raw).unwrap();
    let second = decode_tracks(&raw).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_decode_tracks_malformed() {
    assert!(decode_tracks("not json").is_err());
    assert!(decode_tracks("%7Bbroken").is_err());
    assert!(decode_tracks(r#"[{"name":"no artist"}]"#).is_err());
    assert!(decode_tracks("").is_err());
}

#[test]
fn test_encode_state_shape() {
    let options = AuthOptions::new(TimeRange::LongTerm, TrackLimit::new(25));
    assert_eq!(
        encode_state(&options),
        r#"{"timeRange":"long_term","trackLimit":25}"#
    );
}

#[test]
fn test_decode_state_round_trip() {
    let options = AuthOptions::new(TimeRange::MediumTerm, TrackLimit::new(42));
    let decoded = decode_state(Some(&encode_state(&options)));
    assert_eq!(decoded, options);
}

#[test]
fn test_decode_state_defaults() {
    let defaults = AuthOptions::new(TimeRange::ShortTerm, TrackLimit::new(10));

    assert_eq!(decode_state(None), defaults);
    assert_eq!(decode_state(Some("")), defaults);
    assert_eq!(decode_state(Some("garbage")), defaults);
    assert_eq!(decode_state(Some("{}")), defaults);
}

#[test]
fn test_decode_state_lenient_fields() {
    // Limits may arrive as strings and are clamped
    let decoded = decode_state(Some(r#"{"timeRange":"long_term","trackLimit":"99"}"#));
    assert_eq!(decoded.time_range, TimeRange::LongTerm);
    assert_eq!(decoded.track_limit.get(), 50);

    // Unknown ranges fall back without discarding the limit
    let decoded = decode_state(Some(r#"{"timeRange":"forever","trackLimit":3}"#));
    assert_eq!(decoded.time_range, TimeRange::ShortTerm);
    assert_eq!(decoded.track_limit.get(), 3);

    let decoded = decode_state(Some(r#"{"trackLimit":"lots"}"#));
    assert_eq!(decoded.track_limit, TrackLimit::default());
}

#[test]
fn test_time_range_parsing() {
    assert_eq!("short_term".parse::<TimeRange>().unwrap(), TimeRange::ShortTerm);
    assert_eq!("medium-term".parse::<TimeRange>().unwrap(), TimeRange::MediumTerm);
    assert_eq!(" LONG_TERM ".parse::<TimeRange>().unwrap(), TimeRange::LongTerm);
    assert!("yesterday".parse::<TimeRange>().is_err());

    assert_eq!(TimeRange::parse_or_default("nope"), TimeRange::ShortTerm);
    assert_eq!(TimeRange::LongTerm.to_string(), "long_term");
}

#[test]
fn test_track_limit_clamps() {
    assert_eq!(TrackLimit::new(0).get(), 1);
    assert_eq!(TrackLimit::new(10).get(), 10);
    assert_eq!(TrackLimit::new(500).get(), 50);

    assert_eq!("7".parse::<TrackLimit>().unwrap().get(), 7);
    assert!("seven".parse::<TrackLimit>().is_err());
    assert_eq!(TrackLimit::parse_or_default("seven").get(), 10);
}

#[test]
fn test_basic_auth_header() {
    // base64("id:secret")
    assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_preview_truncates() {
    assert_eq!(preview("AQDabcdefghijklmnop"), "AQDabcdefg...");
    assert_eq!(preview("short"), "short...");
}

#[test]
fn test_format_tracks() {
    let tracks = vec![
        create_test_track("Song A", "Artist 1"),
        create_test_track("Song B", "Artist 2"),
    ];

    assert_eq!(
        format_track_list(&tracks),
        "1. Song A by Artist 1\n2. Song B by Artist 2"
    );
    assert_eq!(
        format_track_inline(&tracks),
        "Song A by Artist 1, Song B by Artist 2"
    );

    let rows = tracks_to_rows(&tracks);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].name, "Song B");
}

#[test]
fn test_fit_tracks_keeps_short_lists() {
    let tracks = vec![
        create_test_track("Song A", "Artist 1"),
        create_test_track("Song B", "Artist 2"),
    ];
    assert_eq!(fit_tracks(&tracks), &tracks[..]);
    assert!(fit_tracks(&[]).is_empty());
}

#[test]
fn test_fit_tracks_trims_to_budget() {
    let tracks: Vec<Track> = (1..=50)
        .map(|i| create_test_track(&format!("Some Typical Song Title {}", i), "The Artist Name"))
        .collect();

    let kept = fit_tracks(&tracks);
    assert!(!kept.is_empty() && kept.len() < tracks.len());
    assert!(urlencoding::encode(&encode_tracks(kept)).len() <= MAX_TRACKS_COOKIE_BYTES);

    // One more track would not fit
    let next = &tracks[..kept.len() + 1];
    assert!(urlencoding::encode(&encode_tracks(next)).len() > MAX_TRACKS_COOKIE_BYTES);
}

#[test]
fn test_token_expires_at() {
    let token = mnprofile::types::Token {
        access_token: "access".to_string(),
        refresh_token: None,
        scope: "user-top-read".to_string(),
        expires_in: 3600,
        obtained_at: 1_700_000_000,
    };
    assert_eq!(token.expires_at().unwrap().timestamp(), 1_700_003_600);
}
