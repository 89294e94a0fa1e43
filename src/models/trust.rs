use serde::{Deserialize, Serialize};

/// Handling-risk classification, ordered from least to most sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Standard,
    Sensitive,
    HighRisk,
}

/// Pre-rendered WhatsApp notification the orderer forwards to the receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverNotification {
    pub wa_number: String,
    pub message: String,
    pub deep_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustEvaluation {
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub receiver_notification_required: bool,
    pub notification: Option<ReceiverNotification>,
    pub verification_requirements: Vec<String>,
}
