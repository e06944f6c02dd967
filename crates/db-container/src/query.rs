//! JDBC URL query string helpers.

/// Appends `query_string` to `url` unchanged.
pub fn append_query(url: &str, query_string: &str) -> String {
    format!("{url}{query_string}")
}

/// Splits `?key=value&key2=value2` into pairs. A leading `?` is optional and
/// keys without a value map to an empty string.
pub fn parse_query(query_string: &str) -> Vec<(String, String)> {
    let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
    query_string
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Returns the value of `key` in `query_string`, if present.
pub fn query_param(query_string: &str, key: &str) -> Option<String> {
    parse_query(query_string)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}
