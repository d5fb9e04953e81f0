//! Tests for stream definitions and request parameters

use super::*;
use crate::config::{StartDate, TapConfig};
use crate::pagination::Paginator;
use crate::schema::JsonType;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pairs(params: &[(&str, &str)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn stream(kind: StreamKind) -> &'static StreamDefinition {
    kind.definition()
}

#[test]
fn test_streams_in_sync_order() {
    let names: Vec<_> = all_streams().iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            "whatconverts_accounts",
            "whatconverts_profiles",
            "whatconverts_leads",
            "whatconverts_tracking_phone_numbers",
            "whatconverts_tracking_web_forms",
        ]
    );
}

#[test]
fn test_kind_definition_matches_table() {
    for def in all_streams() {
        assert_eq!(def.kind.definition(), def);
    }
}

#[test]
fn test_find_stream() {
    let leads = find_stream("whatconverts_leads").unwrap();
    assert_eq!(leads.kind, StreamKind::Leads);
    assert_eq!(leads.primary_keys, &["lead_id"]);
    assert!(find_stream("whatconverts_calls").is_none());
}

#[test_case(StreamKind::Accounts, 7 ; "accounts")]
#[test_case(StreamKind::Profiles, 7 ; "profiles")]
#[test_case(StreamKind::Leads, 81 ; "leads")]
#[test_case(StreamKind::PhoneTracking, 22 ; "phone numbers")]
#[test_case(StreamKind::WebFormTracking, 9 ; "web forms")]
fn test_schema_field_counts(kind: StreamKind, expected: usize) {
    let schema = stream(kind).schema();
    assert_eq!(schema.properties.len(), expected);
}

#[test]
fn test_schema_includes_primary_keys() {
    for def in all_streams() {
        let schema = def.schema();
        for key in def.primary_keys {
            assert!(
                schema.get_property(key).is_some(),
                "{} schema lacks {key}",
                def.name
            );
        }
    }
}

#[test]
fn test_lead_schema_types() {
    let schema = stream(StreamKind::Leads).schema();

    let spam = schema.get_property("spam").unwrap();
    assert_eq!(spam.json_type.primary_type(), Some(JsonType::Boolean));
    assert!(spam.is_nullable());

    let created = schema.get_property("date_created").unwrap();
    assert_eq!(created.json_type.primary_type(), Some(JsonType::String));
    assert_eq!(created.format.as_deref(), Some("date-time"));

    let lead_id = schema.get_property("lead_id").unwrap();
    assert_eq!(lead_id.json_type.primary_type(), Some(JsonType::Integer));
}

#[test]
fn test_paginators() {
    assert_eq!(stream(StreamKind::Leads).paginator(), Paginator::total_pages());
    for kind in [
        StreamKind::Accounts,
        StreamKind::Profiles,
        StreamKind::PhoneTracking,
        StreamKind::WebFormTracking,
    ] {
        assert_eq!(stream(kind).paginator(), Paginator::SinglePage);
    }
}

#[test]
fn test_request_path() {
    let profiles = stream(StreamKind::Profiles);
    assert_eq!(profiles.request_path(Some(42)), "/accounts/42/profiles");

    let leads = stream(StreamKind::Leads);
    assert_eq!(leads.request_path(None), "/leads");
}

#[test]
fn test_extractor_stamps_profile_id() {
    let config = TapConfig::new("key", "secret").with_profile_id(9);
    let extractor = stream(StreamKind::PhoneTracking).extractor(&config);
    assert_eq!(extractor.record_path(), "$.numbers[*]");

    let body = json!({"numbers": [{"phone_number_id": 1, "profile_id": 3}]});
    let records: Vec<_> = extractor.extract(&body).unwrap().collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["profile_id"], json!(9));
}

#[test]
fn test_leads_params_with_all_options() {
    let config = TapConfig::new("key", "secret")
        .with_account_id(11)
        .with_profile_id(22)
        .with_start_date(StartDate::new(date(2024, 1, 15)));

    let params = build_params(stream(StreamKind::Leads), &config, None, date(2024, 3, 1));

    assert_eq!(
        params,
        pairs(&[
            ("leads_per_page", "250"),
            ("order", "asc"),
            ("account_id", "11"),
            ("profile_id", "22"),
            ("start_date", "2024-01-15"),
            ("end_date", "2024-03-01"),
        ])
    );
}

#[test]
fn test_leads_params_next_page() {
    let config = TapConfig::new("key", "secret");
    let params = build_params(stream(StreamKind::Leads), &config, Some(3), date(2024, 3, 1));

    assert_eq!(
        params,
        pairs(&[
            ("leads_per_page", "250"),
            ("order", "asc"),
            ("end_date", "2024-03-01"),
            ("page_number", "3"),
        ])
    );
}

#[test_case(StreamKind::Accounts ; "accounts")]
#[test_case(StreamKind::PhoneTracking ; "phone numbers")]
#[test_case(StreamKind::WebFormTracking ; "web forms")]
fn test_non_lead_params_carry_filters_only(kind: StreamKind) {
    let config = TapConfig::new("key", "secret")
        .with_account_id(5)
        .with_profile_id(6)
        .with_start_date(StartDate::new(date(2024, 1, 1)));

    let params = build_params(stream(kind), &config, Some(2), date(2024, 3, 1));

    assert_eq!(
        params,
        pairs(&[
            ("leads_per_page", "250"),
            ("account_id", "5"),
            ("profile_id", "6"),
        ])
    );
}

#[test]
fn test_profiles_params_send_only_page() {
    let config = TapConfig::new("key", "secret")
        .with_account_id(5)
        .with_profile_id(6)
        .with_start_date(StartDate::new(date(2024, 1, 1)));
    let def = stream(StreamKind::Profiles);

    assert_eq!(build_params(def, &config, None, date(2024, 3, 1)), pairs(&[]));
    assert_eq!(
        build_params(def, &config, Some(2), date(2024, 3, 1)),
        pairs(&[("page", "2")])
    );
}
