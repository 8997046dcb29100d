use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mandatory privacy topics plus anything else the platform sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookTopic {
    CustomersDataRequest,
    CustomersRedact,
    ShopRedact,
    Other(String),
}

impl WebhookTopic {
    pub fn parse(topic: &str) -> Self {
        match topic.trim().to_ascii_lowercase().replace('_', "/").as_str() {
            "customers/data/request" => WebhookTopic::CustomersDataRequest,
            "customers/redact" => WebhookTopic::CustomersRedact,
            "shop/redact" => WebhookTopic::ShopRedact,
            _ => WebhookTopic::Other(topic.to_string()),
        }
    }

    pub fn is_mandatory(&self) -> bool {
        !matches!(self, WebhookTopic::Other(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookNotification {
    pub topic: String,
    #[serde(default)]
    pub shop_domain: Option<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub status: u16,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

/// Acknowledges a verified webhook. EcoCharge keeps no customer personal
/// data, so data requests and redactions have nothing to export or erase.
pub fn acknowledge(notification: &WebhookNotification) -> Acknowledgement {
    let topic = WebhookTopic::parse(&notification.topic);
    let shop = notification.shop_domain.as_deref().unwrap_or("unknown");

    match &topic {
        WebhookTopic::CustomersDataRequest
        | WebhookTopic::CustomersRedact
        | WebhookTopic::ShopRedact => {
            tracing::info!(
                topic = %notification.topic,
                shop,
                "📩 Compliance webhook received; no personal data stored"
            );
        }
        WebhookTopic::Other(raw) => {
            tracing::info!(topic = %raw, shop, "📩 Webhook received");
        }
    }

    Acknowledgement {
        status: 200,
        body: "OK".to_string(),
        received_at: Utc::now(),
    }
}
