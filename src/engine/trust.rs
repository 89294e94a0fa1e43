use url::Url;
use uuid::Uuid;

use crate::error::TrustMechanismError;
use crate::models::order::PlacementRequest;
use crate::models::service::ServiceConfig;
use crate::models::trust::{ReceiverNotification, RiskLevel, TrustEvaluation};

/// True iff the order triggers at least one trust condition: a talangan
/// request, or the sensitive-item condition (service default or explicit
/// barang-penting flag). Usable without running the full evaluation.
pub fn requires_enhanced_verification(config: &ServiceConfig, request: &PlacementRequest) -> bool {
    request.talangan_requested() > 0.0 || sensitive_item(config, request)
}

fn sensitive_item(config: &ServiceConfig, request: &PlacementRequest) -> bool {
    config.default_barang_penting || request.is_barang_penting
}

/// Classifies the order's handling risk and, when the order needs it,
/// renders the receiver notification. Pure string templating; nothing is
/// sent anywhere.
pub fn evaluate_trust(
    config: &ServiceConfig,
    request: &PlacementRequest,
    order_id: Uuid,
) -> Result<TrustEvaluation, TrustMechanismError> {
    let talangan = request.talangan_requested();
    let mut risk_level = RiskLevel::Standard;
    let mut reasons = Vec::new();
    let mut verification_requirements = Vec::new();

    if talangan > 0.0 {
        risk_level = RiskLevel::Sensitive;
        reasons.push(format!("Talangan sebesar Rp{talangan:.0} diminta oleh pemesan"));
    }

    if sensitive_item(config, request) {
        risk_level = if risk_level == RiskLevel::Sensitive {
            RiskLevel::HighRisk
        } else {
            RiskLevel::Sensitive
        };
        reasons.push("Pesanan ditandai sebagai barang penting".to_string());
    }

    let receiver_notification_required = risk_level > RiskLevel::Standard;

    let notification = if receiver_notification_required {
        let wa_number = receiver_number(request)?;
        let message = render_message(request, order_id);
        let deep_link = wa_deep_link(&wa_number, &message);

        verification_requirements
            .push("Pemesan wajib meneruskan notifikasi ini ke penerima".to_string());
        if talangan > 0.0 {
            verification_requirements
                .push("Driver akan menalangi pembayaran atas nama pemesan".to_string());
        }
        if sensitive_item(config, request) {
            verification_requirements
                .push("Penanganan ekstra diperlukan untuk barang penting".to_string());
        }

        Some(ReceiverNotification {
            wa_number,
            message,
            deep_link,
        })
    } else {
        None
    };

    Ok(TrustEvaluation {
        risk_level,
        reasons,
        receiver_notification_required,
        notification,
        verification_requirements,
    })
}

fn receiver_number(request: &PlacementRequest) -> Result<String, TrustMechanismError> {
    let Some(raw) = &request.receiver_wa else {
        return Err(TrustMechanismError::ReceiverWaRequired);
    };

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(TrustMechanismError::MissingReceiverWa {
            supplied: raw.clone(),
        });
    }

    // Local 08xx numbers become the international 628xx form wa.me expects.
    if let Some(rest) = digits.strip_prefix('0') {
        Ok(format!("62{rest}"))
    } else {
        Ok(digits)
    }
}

fn render_message(request: &PlacementRequest, order_id: Uuid) -> String {
    let details = &request.details;
    let mut message = format!(
        "Halo! Anda akan menerima kiriman.\n\n\
         No. pesanan: {order_id}\n\
         Penjemputan: {}\n\
         Tujuan: {}\n",
        details.pickup.text, details.dropoff.text
    );

    if let Some(notes) = details.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        message.push_str(&format!("Catatan: {notes}\n"));
    }

    message.push_str(&format!(
        "\nLacak kiriman Anda dengan kode: {order_id}\n\
         Demi keamanan: pastikan identitas driver sebelum menerima paket, \
         dan jangan melakukan pembayaran di luar yang sudah disepakati."
    ));

    message
}

fn wa_deep_link(wa_number: &str, message: &str) -> String {
    // wa_number is a validated non-empty digit string, so the base URL is
    // always parseable.
    let mut link = Url::parse(&format!("https://wa.me/{wa_number}"))
        .expect("wa.me deep link base is a valid url");
    link.query_pairs_mut().append_pair("text", message);
    link.into()
}
