use crate::{DawaTime, TimeFormatError};
use chrono::{TimeZone, Utc};

#[test]
fn test_parse_dawa_layout() {
    let t = DawaTime::parse("2000-02-05T20:17:59.000").unwrap();
    assert_eq!(t.timestamp(), 949778279);
    assert_eq!(t.to_rfc3339(), "2000-02-05T20:17:59+01:00");
}

#[test]
fn test_parse_summer_time() {
    let t = DawaTime::parse("2021-07-01T12:00:00.000").unwrap();
    assert_eq!(t.timestamp(), 1625133600);
    assert_eq!(t.to_string(), "2021-07-01T12:00:00+02:00");
}

#[test]
fn test_parse_quoted_value() {
    let t = DawaTime::parse("\"2009-11-25T01:07:37.000\"").unwrap();
    assert_eq!(t.timestamp(), 1259107657);
}

#[test]
fn test_parse_rfc3339_fallback() {
    let utc = DawaTime::parse("2000-02-05T19:17:59Z").unwrap();
    let offset = DawaTime::parse("2000-02-05T20:17:59+01:00").unwrap();
    assert_eq!(utc.timestamp(), 949778279);
    assert_eq!(utc, offset);
}

#[test]
fn test_rendered_time_parses_back_to_same_instant() {
    for text in [
        "2000-02-05T20:17:59.000",
        "2021-07-01T12:00:00.000",
        "2014-03-05T10:32:31.250",
    ] {
        let t = DawaTime::parse(text).unwrap();
        let again: DawaTime = t.to_rfc3339().parse().unwrap();
        assert_eq!(t, again, "{text}");
    }
}

#[test]
fn test_ambiguous_local_time_picks_earliest() {
    // 02:30 occurs twice when summer time ends.
    let t = DawaTime::parse("2021-10-31T02:30:00.000").unwrap();
    assert_eq!(t.timestamp(), 1635640200);
}

#[test]
fn test_local_time_in_spring_gap_is_accepted() {
    // 02:30 does not exist on this day; the value is still usable.
    let t = DawaTime::parse("2021-03-28T02:30:00.000").unwrap();
    let before = DawaTime::parse("2021-03-28T01:59:59.000").unwrap();
    let after = DawaTime::parse("2021-03-28T04:00:00.000").unwrap();
    assert!(before < t && t < after);
}

#[test]
fn test_invalid_time() {
    let err = DawaTime::parse("05/02/2000 20:17").unwrap_err();
    assert_eq!(
        err,
        TimeFormatError {
            text: "05/02/2000 20:17".into()
        }
    );
    assert!(DawaTime::parse("").is_err());
}

#[test]
fn test_ordering_follows_instant() {
    let a = DawaTime::parse("2000-02-05T20:17:59.000").unwrap();
    let b = DawaTime::parse("2009-11-25T01:07:37.000").unwrap();
    assert!(a < b);
    assert_eq!(
        a,
        DawaTime::from_instant(Utc.timestamp_opt(949778279, 0).unwrap())
    );
}

#[test]
fn test_serde_round_trip() {
    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Stamped {
        at: DawaTime,
    }

    let decoded: Stamped = serde_json::from_str(r#"{"at":"2000-02-05T20:17:59.000"}"#).unwrap();
    let encoded = serde_json::to_string(&decoded).unwrap();
    assert_eq!(encoded, r#"{"at":"2000-02-05T20:17:59+01:00"}"#);

    let again: Stamped = serde_json::from_str(&encoded).unwrap();
    assert_eq!(again, decoded);
}

#[test]
fn test_default_is_epoch() {
    assert_eq!(DawaTime::default().timestamp(), 0);
}
