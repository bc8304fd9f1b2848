use crate::campaign::ChannelType;
use crate::customer::Customer;

const FALLBACK_CONTENT: &str = "Personalized campaign content";

/// Renders the campaign message for one customer on the given channel.
///
/// Returns `None` when the profile has no preferences tag; such a profile
/// is not personalizable and the caller is expected to skip the customer.
pub fn personalize_content(customer: &Customer, channel_type: &ChannelType) -> Option<String> {
    let preferences = customer.preferences.as_deref()?;
    let name = &customer.name;

    let content = match channel_type {
        ChannelType::Email => format!(
            "Hi {}, {} lovers unite! Get 30% OFF our premium collection.",
            name, preferences
        ),
        ChannelType::Sms => format!("{}! Flash sale: 50% OFF your favorites. Tap now!", name),
        ChannelType::Push => format!("\u{1F680} {}, your VIP deal awaits!", name),
        ChannelType::Other(_) => FALLBACK_CONTENT.to_string(),
    };

    Some(content)
}
