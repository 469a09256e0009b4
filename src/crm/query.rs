//! List query parameters for the customer and transaction listings.
//!
//! Absent values are left out of the query string entirely.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomersListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "is_blank")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(rename = "loginWith", skip_serializing_if = "is_blank")]
    pub login_with: Option<String>,
    #[serde(rename = "sortBy", skip_serializing_if = "is_blank")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionsListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "is_blank")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub subscription_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub transaction_type: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub transaction_status: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub is_test: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub date_to: Option<String>,
    #[serde(rename = "sortBy", skip_serializing_if = "is_blank")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Appends `params` to `path`, leaving the path bare when nothing is set.
pub fn with_query<P: Serialize>(
    path: &str,
    params: &P,
) -> Result<String, serde_urlencoded::ser::Error> {
    let query = serde_urlencoded::to_string(params)?;
    if query.is_empty() {
        return Ok(path.to_owned());
    }
    Ok(format!("{path}?{query}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_keys_are_sent() {
        let params = CustomersListParams {
            page: Some(1),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(with_query("/users", &params).unwrap(), "/users?page=1&limit=20");
    }

    #[test]
    fn empty_params_leave_bare_path() {
        let params = TransactionsListParams::default();
        assert_eq!(with_query("/transactions", &params).unwrap(), "/transactions");
    }

    #[test]
    fn blank_strings_are_omitted() {
        let params = CustomersListParams {
            search: Some(String::new()),
            email_verified: Some(false),
            ..Default::default()
        };
        assert_eq!(
            with_query("/users", &params).unwrap(),
            "/users?email_verified=false"
        );
    }

    #[test]
    fn customer_keys_keep_backend_names() {
        let params = CustomersListParams {
            search: Some("ada lovelace".into()),
            login_with: Some("Google".into()),
            sort_by: Some("created_at".into()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        assert_eq!(
            with_query("/users", &params).unwrap(),
            "/users?search=ada+lovelace&loginWith=Google&sortBy=created_at&sortOrder=desc"
        );
    }

    #[test]
    fn transaction_filters_in_declared_order() {
        let params = TransactionsListParams {
            page: Some(2),
            customer_id: Some("c1".into()),
            transaction_status: Some("failed".into()),
            is_test: Some("false".into()),
            date_from: Some("2024-01-01".into()),
            date_to: Some("2024-01-31".into()),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        assert_eq!(
            with_query("/transactions", &params).unwrap(),
            "/transactions?page=2&customer_id=c1&transaction_status=failed&is_test=false\
             &date_from=2024-01-01&date_to=2024-01-31&sortOrder=asc"
        );
    }
}
