#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use kakao_order_notify::{
	_preludet::*,
	auth::{AccessToken, OptionId, UserId},
	config::KakaoConfig,
	error::{FailureKind, TransportError},
	lookup::ProductOption,
	message::OrderNotification,
};

const MEMO_PATH: &str = "/v2/api/talk/memo/default/send";
const MUG_TEXT: &str =
	"주문이 완료되었습니다! \n옵션: Mug\n수량: 3\n주문 시간: 2024-01-01T10:00\n메시지: thanks";

fn build_config(server: &MockServer) -> KakaoConfig {
	KakaoConfig::builder("app-key-memo")
		.token_endpoint(
			Url::parse(&server.url("/oauth/token"))
				.expect("Mock token endpoint should parse successfully."),
		)
		.message_endpoint(
			Url::parse(&server.url(MEMO_PATH))
				.expect("Mock message endpoint should parse successfully."),
		)
		.build()
		.expect("Configuration should build successfully.")
}

fn user() -> UserId {
	UserId::new("buyer-1").expect("User identifier should be valid for notification tests.")
}

fn mug_order() -> OrderNotification {
	OrderNotification::new(42, 3, "2024-01-01T10:00", "thanks")
}

fn memo_body(text: &str, web_url: &str) -> serde_json::Value {
	json!({
		"template_object": {
			"object_type": "text",
			"text": text,
			"link": { "web_url": web_url }
		}
	})
}

#[tokio::test]
async fn notification_posts_formatted_memo_with_user_token() {
	let server = MockServer::start_async().await;
	let (client, options, tokens) = build_reqwest_test_client(build_config(&server));

	options.insert(ProductOption::new(42, "Mug"));
	tokens.insert(user(), AccessToken::new("buyer-token"));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(MEMO_PATH)
				.header("authorization", "Bearer buyer-token")
				.header("content-type", "application/json")
				.json_body(memo_body(MUG_TEXT, "http://yourwebsite.com/"));
			then.status(200).header("content-type", "application/json").body("{\"result_code\":0}");
		})
		.await;
	let receipt = client
		.send_order_notification(&user(), &mug_order())
		.await
		.expect("Notification should be delivered.");

	mock.assert_async().await;

	assert_eq!(receipt.status, 200);
	assert_eq!(receipt.result_code, Some(0));
}

#[tokio::test]
async fn identical_notifications_are_sent_twice() {
	let server = MockServer::start_async().await;
	let (client, options, _tokens) = build_reqwest_test_client(build_config(&server));

	options.insert(ProductOption::new(42, "Mug"));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(MEMO_PATH)
				.json_body(memo_body(MUG_TEXT, "http://yourwebsite.com/"));
			then.status(200).body("{\"result_code\":0}");
		})
		.await;
	let token = AccessToken::new("explicit-token");
	let order = mug_order();

	client
		.send_order_notification_with_token(&token, &order)
		.await
		.expect("First notification should be delivered.");
	client
		.send_order_notification_with_token(&token, &order)
		.await
		.expect("Second notification should be delivered.");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn configured_web_url_is_attached() {
	let server = MockServer::start_async().await;
	let config = KakaoConfig {
		web_url: Url::parse("https://shop.example.com/orders/42")
			.expect("Custom memo link should parse successfully."),
		..build_config(&server)
	};
	let (client, options, _tokens) = build_reqwest_test_client(config);

	options.insert(ProductOption::new(42, "Mug"));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(MEMO_PATH)
				.json_body(memo_body(MUG_TEXT, "https://shop.example.com/orders/42"));
			then.status(200).body("{\"result_code\":0}");
		})
		.await;

	client
		.send_order_notification_with_token(&AccessToken::new("token"), &mug_order())
		.await
		.expect("Notification with a custom link should be delivered.");

	mock.assert_async().await;
}

#[tokio::test]
async fn missing_option_fails_without_a_request() {
	let server = MockServer::start_async().await;
	let (client, _options, tokens) = build_reqwest_test_client(build_config(&server));

	tokens.insert(user(), AccessToken::new("buyer-token"));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(MEMO_PATH);
			then.status(200).body("{\"result_code\":0}");
		})
		.await;
	let err = client
		.send_order_notification(&user(), &mug_order())
		.await
		.expect_err("Unknown options must not be sent.");

	assert!(matches!(err, Error::OptionNotFound { option_id } if option_id == OptionId::new(42)));
	assert_eq!(err.kind(), FailureKind::LookupFailure);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn missing_token_fails_without_a_request() {
	let server = MockServer::start_async().await;
	let (client, options, _tokens) = build_reqwest_test_client(build_config(&server));

	options.insert(ProductOption::new(42, "Mug"));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(MEMO_PATH);
			then.status(200).body("{\"result_code\":0}");
		})
		.await;
	let err = client
		.send_order_notification(&user(), &mug_order())
		.await
		.expect_err("Users without a token must not be sent.");

	assert!(matches!(&err, Error::TokenNotFound { user: missing } if missing == &user()));
	assert_eq!(err.kind(), FailureKind::TokenMissing);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn provider_rejections_are_surfaced() {
	let server = MockServer::start_async().await;
	let (client, options, _tokens) = build_reqwest_test_client(build_config(&server));

	options.insert(ProductOption::new(42, "Mug"));

	let expired = server
		.mock_async(|when, then| {
			when.method(POST).path(MEMO_PATH).header("authorization", "Bearer expired");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"msg\":\"this access token does not exist\",\"code\":-401}");
		})
		.await;
	let unconsented = server
		.mock_async(|when, then| {
			when.method(POST).path(MEMO_PATH).header("authorization", "Bearer no-consent");
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"msg\":\"insufficient scopes.\",\"code\":-402}");
		})
		.await;
	let broken = server
		.mock_async(|when, then| {
			when.method(POST).path(MEMO_PATH).header("authorization", "Bearer broken");
			then.status(500).body("internal error");
		})
		.await;
	let order = mug_order();
	let err = client
		.send_order_notification_with_token(&AccessToken::new("expired"), &order)
		.await
		.expect_err("Expired tokens should be rejected.");

	assert!(matches!(
		&err,
		Error::Client { status: 401, reason } if reason.contains("does not exist")
	));

	let err = client
		.send_order_notification_with_token(&AccessToken::new("no-consent"), &order)
		.await
		.expect_err("Missing consent should be rejected.");

	assert!(matches!(err, Error::AccessDenied { status: 403, .. }));

	let err = client
		.send_order_notification_with_token(&AccessToken::new("broken"), &order)
		.await
		.expect_err("Server errors should be surfaced.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::UnexpectedStatus { endpoint: "message", status: 500, .. })
	));

	expired.assert_async().await;
	unconsented.assert_async().await;
	broken.assert_async().await;
}
