//! Order notification input and the memo payload built from it.

// self
use crate::{_prelude::*, auth::OptionId};

/// Order data read by the notification flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotification {
	/// Option that was ordered.
	pub option_id: OptionId,
	/// Ordered quantity.
	pub quantity: u32,
	/// Order timestamp, already formatted for display.
	pub order_date_time: String,
	/// Free-text message left by the buyer.
	pub message: String,
}
impl OrderNotification {
	/// Creates a new notification input.
	pub fn new(
		option_id: u64,
		quantity: u32,
		order_date_time: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		Self {
			option_id: OptionId::new(option_id),
			quantity,
			order_date_time: order_date_time.into(),
			message: message.into(),
		}
	}

	/// Renders the fixed order-complete text for the resolved option name.
	pub fn format_text(&self, option_name: &str) -> String {
		format!(
			"주문이 완료되었습니다! \n옵션: {}\n수량: {}\n주문 시간: {}\n메시지: {}",
			option_name, self.quantity, self.order_date_time, self.message
		)
	}
}

/// Link block attached to a text template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLink {
	/// Destination opened from the memo.
	pub web_url: Url,
}

/// Kakao `text` message template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextTemplate {
	/// Template discriminator; always `text`.
	pub object_type: TextObjectType,
	/// Formatted message body.
	pub text: String,
	/// Link attached to the memo.
	pub link: TemplateLink,
}
impl TextTemplate {
	/// Wraps `text` with the configured link.
	pub fn new(text: impl Into<String>, web_url: Url) -> Self {
		Self { object_type: TextObjectType::Text, text: text.into(), link: TemplateLink { web_url } }
	}
}

/// Only `text` templates are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextObjectType {
	#[default]
	/// Plain text memo.
	Text,
}

/// JSON envelope posted to the memo endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoRequest {
	/// Template rendered by the provider.
	pub template_object: TextTemplate,
}
impl MemoRequest {
	/// Serializes the envelope.
	pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
		serde_json::to_vec(self)
	}
}
