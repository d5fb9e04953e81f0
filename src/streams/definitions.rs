//! Static stream definitions

use crate::config::TapConfig;
use crate::decode::RecordExtractor;
use crate::pagination::Paginator;
use crate::schema::{Field, JsonSchema};

/// Which of the five WhatConverts resources a stream reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Accounts,
    Profiles,
    Leads,
    PhoneTracking,
    WebFormTracking,
}

/// Immutable description of one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDefinition {
    /// Resource this stream reads
    pub kind: StreamKind,
    /// Stream name in the catalog and in emitted messages
    pub name: &'static str,
    /// URL path template relative to the API root
    pub path: &'static str,
    /// Primary key fields
    pub primary_keys: &'static [&'static str],
    /// JSONPath locating records in a response
    pub records_path: &'static str,
    /// Declared fields
    pub fields: &'static [Field],
}

impl StreamDefinition {
    /// JSON schema of the stream's records
    pub fn schema(&self) -> JsonSchema {
        JsonSchema::from_fields(self.fields)
    }

    /// Pagination strategy
    pub fn paginator(&self) -> Paginator {
        match self.kind {
            StreamKind::Leads => Paginator::total_pages(),
            _ => Paginator::SinglePage,
        }
    }

    /// Query parameter carrying the page cursor, if the endpoint takes one
    pub fn page_param(&self) -> Option<&'static str> {
        match self.kind {
            StreamKind::Leads => Some("page_number"),
            StreamKind::Profiles => Some("page"),
            _ => None,
        }
    }

    /// Record extractor, stamping the configured profile id
    pub fn extractor(&self, config: &TapConfig) -> RecordExtractor {
        RecordExtractor::new(self.records_path).with_profile_id(config.profile_id)
    }

    /// Request path, with `{account_id}` filled in for per-account streams
    pub fn request_path(&self, account_id: Option<i64>) -> String {
        match account_id {
            Some(id) => self.path.replace("{account_id}", &id.to_string()),
            None => self.path.to_string(),
        }
    }
}

/// All streams, in sync order
pub static STREAMS: [StreamDefinition; 5] = [
    StreamDefinition {
        kind: StreamKind::Accounts,
        name: "whatconverts_accounts",
        path: "/accounts",
        primary_keys: &["account_id"],
        records_path: "$.accounts[*]",
        fields: ACCOUNT_FIELDS,
    },
    StreamDefinition {
        kind: StreamKind::Profiles,
        name: "whatconverts_profiles",
        path: "/accounts/{account_id}/profiles",
        primary_keys: &["profile_id"],
        records_path: "$.profiles[*]",
        fields: PROFILE_FIELDS,
    },
    StreamDefinition {
        kind: StreamKind::Leads,
        name: "whatconverts_leads",
        path: "/leads",
        primary_keys: &["lead_id"],
        records_path: "$.leads[*]",
        fields: LEAD_FIELDS,
    },
    StreamDefinition {
        kind: StreamKind::PhoneTracking,
        name: "whatconverts_tracking_phone_numbers",
        path: "/tracking/numbers",
        primary_keys: &["phone_number_id"],
        records_path: "$.numbers[*]",
        fields: PHONE_NUMBER_FIELDS,
    },
    StreamDefinition {
        kind: StreamKind::WebFormTracking,
        name: "whatconverts_tracking_web_forms",
        path: "/tracking/forms",
        primary_keys: &["form_id"],
        records_path: "$.forms[*]",
        fields: WEB_FORM_FIELDS,
    },
];

/// All stream definitions, in sync order
pub fn all_streams() -> &'static [StreamDefinition] {
    &STREAMS
}

/// Look up a stream by name
pub fn find_stream(name: &str) -> Option<&'static StreamDefinition> {
    STREAMS.iter().find(|s| s.name == name)
}

/// Look up the definition for a kind
impl StreamKind {
    pub fn definition(self) -> &'static StreamDefinition {
        match self {
            StreamKind::Accounts => &STREAMS[0],
            StreamKind::Profiles => &STREAMS[1],
            StreamKind::Leads => &STREAMS[2],
            StreamKind::PhoneTracking => &STREAMS[3],
            StreamKind::WebFormTracking => &STREAMS[4],
        }
    }
}

// ============================================================================
// Field Lists
// ============================================================================

const ACCOUNT_FIELDS: &[Field] = &[
    Field::integer("account_id"),
    Field::string("account_name"),
    Field::string("account_status"),
    Field::string("account_type"),
    Field::date_time("account_created"),
    Field::date_time("account_updated"),
    Field::date_time("date_created"),
];

const PROFILE_FIELDS: &[Field] = &[
    Field::integer("profile_id"),
    Field::integer("account_id"),
    Field::string("profile_name"),
    Field::string("profile_status"),
    Field::date_time("profile_created"),
    Field::date_time("profile_updated"),
    Field::date_time("date_created"),
];

const LEAD_FIELDS: &[Field] = &[
    Field::integer("account_id"),
    Field::integer("profile_id"),
    Field::string("profile"),
    Field::integer("lead_id"),
    Field::string("user_id"),
    Field::string("lead_type"),
    Field::string("lead_status"),
    Field::date_time("date_created"),
    Field::string("quotable"),
    Field::integer("quote_value"),
    Field::integer("sales_value"),
    Field::string("spotted_keywords"),
    Field::integer("lead_score"),
    Field::string("lead_state"),
    Field::string("lead_source"),
    Field::string("lead_medium"),
    Field::string("lead_campaign"),
    Field::string("lead_content"),
    Field::string("lead_keyword"),
    Field::string("lead_url"),
    Field::string("landing_url"),
    Field::string("operating_system"),
    Field::string("browser"),
    Field::string("device_type"),
    Field::string("device_make"),
    Field::boolean("spam"),
    Field::boolean("duplicate"),
    Field::string("tracking_number"),
    Field::string("destination_number"),
    Field::string("caller_country"),
    Field::string("caller_state"),
    Field::string("caller_zip"),
    Field::string("caller_name"),
    Field::string("call_duration"),
    Field::integer("call_duration_seconds"),
    Field::string("caller_city"),
    Field::string("answer_status"),
    Field::string("call_status"),
    Field::string("line_type"),
    Field::string("caller_number"),
    Field::string("phone_name"),
    Field::string("message"),
    Field::string("ip_address"),
    Field::string("notes"),
    Field::string("contact_name"),
    Field::string("contact_company_name"),
    Field::string("contact_email_address"),
    Field::string("contact_phone_number"),
    Field::string("email_address"),
    Field::string("phone_number"),
    Field::string("gclid"),
    Field::string("msclkid"),
    Field::string("unbounce_page_id"),
    Field::string("unbounce_variant_id"),
    Field::string("unbounce_visitor_id"),
    Field::integer("salesforce_user_id"),
    Field::string("roistat_visit_id"),
    Field::string("hubspot_visitor_id"),
    Field::string("facebook_browser_id"),
    Field::string("facebook_click_id"),
    Field::string("vwo_account_id"),
    Field::string("vwo_experiment_id"),
    Field::string("vwo_variant_id"),
    Field::string("vwo_user_id"),
    Field::string("google_analytics_client_id"),
    Field::string("recording"),
    Field::string("play_recording"),
    Field::string("voicemail"),
    Field::string("play_voicemail"),
    Field::string("call_transcription"),
    Field::string("voicemail_transcription"),
    Field::string("account"),
    Field::string("lead_analysis"),
    Field::date_time("last_updated"),
    Field::string("additional_fields"),
    Field::string("city"),
    Field::string("country"),
    Field::string("state"),
    Field::string("zip"),
    Field::string("form_name"),
    Field::string("google_analytics_session_id"),
];

const PHONE_NUMBER_FIELDS: &[Field] = &[
    Field::integer("phone_number_id"),
    Field::string("phone_name"),
    Field::string("tracking_number"),
    Field::string("tracking_number_iso_country"),
    Field::string("destination_number"),
    Field::string("destination_number_iso_country"),
    Field::string("swap_number"),
    Field::string("call_flow"),
    Field::string("trigger"),
    Field::string("source"),
    Field::string("medium"),
    Field::date_time("last_used"),
    Field::boolean("call_recording"),
    Field::boolean("voice"),
    Field::boolean("messaging"),
    Field::boolean("pending_activation"),
    Field::integer("account_id"),
    Field::integer("profile_id"),
    Field::string("profile"),
    Field::string("campaign"),
    Field::string("content"),
    Field::string("keyword"),
];

const WEB_FORM_FIELDS: &[Field] = &[
    Field::integer("form_id"),
    Field::string("form_name"),
    Field::string("attribute_type"),
    Field::string("attribute_type_value"),
    Field::string("submit_attribute_type"),
    Field::string("submit_attribute_type_value"),
    Field::string("profile"),
    Field::integer("profile_id"),
    Field::integer("account_id"),
];
