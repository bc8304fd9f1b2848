use serde::{Deserialize, Serialize};

use crate::customer::CustomerId;

const RECOMMENDED_PRODUCTS: [&str; 3] = ["Premium Plan", "Exclusive Offer", "VIP Membership"];
const RECOMMENDED_CONTENT: &str = "Exclusive personalized offer just for you!";
const RECOMMENDED_URGENCY: &str = "Limited time - 24 hours left!";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecommendationBundle {
    pub products: Vec<String>,
    pub content: String,
    pub urgency: String,
}

/// Produces the recommendation bundle for a customer that has already been
/// resolved. The bundle is currently the same for everyone; callers should
/// still invoke this once per customer.
#[tracing::instrument(level = "trace")]
pub fn generate_recommendations(customer_id: CustomerId) -> RecommendationBundle {
    RecommendationBundle {
        products: RECOMMENDED_PRODUCTS.iter().map(|p| p.to_string()).collect(),
        content: RECOMMENDED_CONTENT.to_string(),
        urgency: RECOMMENDED_URGENCY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_has_three_products() {
        let bundle = generate_recommendations(CustomerId::new());

        assert_eq!(
            bundle.products,
            vec!["Premium Plan", "Exclusive Offer", "VIP Membership"]
        );
        assert_eq!(bundle.urgency, "Limited time - 24 hours left!");
    }

    #[test]
    fn bundle_does_not_depend_on_customer() {
        assert_eq!(
            generate_recommendations(CustomerId::new()),
            generate_recommendations(CustomerId::new())
        );
    }
}
