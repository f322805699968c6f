//! Endpoint wrappers for the marketplace REST surface.
//!
//! One module per resource, all calls routed through the gateway. Listing
//! endpoints accept filter structs that serialize to query strings.

pub mod auth;
pub mod commissions;
pub mod orders;
pub mod products;
pub mod users;

pub use auth::AuthApi;
pub use commissions::CommissionApi;
pub use orders::OrderApi;
pub use products::ProductApi;
pub use users::UserApi;

use url::form_urlencoded;

/// Append non-empty `(key, value)` pairs to a path as a query string.
fn with_query(path: &str, pairs: &[(&str, Option<String>)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value {
            query.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("{path}?{}", query.finish())
    } else {
        path.to_string()
    }
}
