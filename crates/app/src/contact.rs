//! Out-of-band contact with sellers.

use reqwest::Url;
use thiserror::Error;
use voltcart::orders::Order;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("invalid seller email address: {0:?}")]
    InvalidEmail(String),
}

/// Build a `mailto:` link asking the seller about `order`.
///
/// # Errors
///
/// Returns [`ContactError::InvalidEmail`] for blank or malformed addresses.
pub fn seller_mailto(order: &Order, seller_email: &str) -> Result<Url, ContactError> {
    let email = seller_email.trim();

    if email.is_empty() || !email.contains('@') || email.contains(['?', '&', '#']) {
        return Err(ContactError::InvalidEmail(seller_email.to_string()));
    }

    let mut url = Url::parse(&format!("mailto:{email}"))
        .map_err(|_| ContactError::InvalidEmail(seller_email.to_string()))?;

    let reference = order.order_number.as_deref().unwrap_or(order.id.as_str());

    url.query_pairs_mut()
        .append_pair("subject", &format!("Question about order {reference}"))
        .append_pair(
            "body",
            &format!(
                "Hello,\n\nI have a question about my order {reference} ({}).\n\n",
                order.product_name
            ),
        );

    // Form encoding writes spaces as '+', which mail clients show literally.
    let query = url.query().map(|query| query.replace('+', "%20"));

    url.set_query(query.as_deref());

    Ok(url)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use voltcart::orders::OrderStatus;

    use crate::test::order_fixture;

    use super::*;

    #[test]
    fn mailto_carries_order_reference() -> TestResult {
        let order = order_fixture("o-1", OrderStatus::Shipped);

        let url = seller_mailto(&order, "sales@sunrise.example")?;

        assert_eq!(url.scheme(), "mailto");
        assert_eq!(url.path(), "sales@sunrise.example");

        let query = url.query().ok_or("missing query")?;

        assert!(query.starts_with("subject=Question%20about%20order%20ORD-o-1"));
        assert!(!query.contains('+'));

        Ok(())
    }

    #[test]
    fn rejects_addresses_that_would_inject_headers() {
        let order = order_fixture("o-1", OrderStatus::Shipped);

        assert!(seller_mailto(&order, "a@b.example?cc=evil@x.example").is_err());
        assert!(seller_mailto(&order, "  ").is_err());
    }
}
