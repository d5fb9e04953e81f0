//! Query parameters for a page request

use super::definitions::{StreamDefinition, StreamKind};
use crate::config::TapConfig;
use crate::types::QueryParams;
use chrono::NaiveDate;

/// Page size requested from the API
pub const LEADS_PER_PAGE: u32 = 250;

/// Build the query parameters for one page request.
///
/// `cursor` is the page number to request, unset for the first page.
/// `today` is the current UTC date and becomes the leads `end_date`.
pub fn build_params(
    stream: &StreamDefinition,
    config: &TapConfig,
    cursor: Option<u32>,
    today: NaiveDate,
) -> QueryParams {
    let page = cursor
        .zip(stream.page_param())
        .map(|(page, param)| (param.to_string(), page.to_string()));

    // Profiles are scoped by the account in the path and take only the cursor
    if stream.kind == StreamKind::Profiles {
        return page.into_iter().collect();
    }

    let mut params: QueryParams = vec![("leads_per_page".to_string(), LEADS_PER_PAGE.to_string())];

    if stream.kind == StreamKind::Leads {
        params.push(("order".to_string(), "asc".to_string()));
    }

    if let Some(account_id) = config.account_id {
        params.push(("account_id".to_string(), account_id.to_string()));
    }
    if let Some(profile_id) = config.profile_id {
        params.push(("profile_id".to_string(), profile_id.to_string()));
    }

    if stream.kind == StreamKind::Leads {
        if let Some(start_date) = config.start_date {
            params.push(("start_date".to_string(), start_date.to_query_value()));
        }
        params.push((
            "end_date".to_string(),
            today.format("%Y-%m-%d").to_string(),
        ));
    }

    params.extend(page);

    params
}
