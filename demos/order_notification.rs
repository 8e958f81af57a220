//! Walks through a full order notification against a local mock of the Kakao endpoints:
//! exchange an authorization code, register the issued token, then send the memo.
//!
//! Set `RUST_LOG=kakao_order_notify=debug` to see the flow spans and outcome events.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use tracing_subscriber::EnvFilter;
use url::Url;
// self
use kakao_order_notify::{
	auth::UserId,
	config::KakaoConfig,
	flows::ReqwestKakaoClient,
	lookup::{MemoryOptionLookup, OptionLookup, ProductOption},
	message::OrderNotification,
	store::{MemoryTokenStore, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body_includes("code=demo-code");
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"bearer\",\"access_token\":\"demo-access\",\"expires_in\":21599}",
			);
		})
		.await;
	let memo_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v2/api/talk/memo/default/send")
				.header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body("{\"result_code\":0}");
		})
		.await;
	let app_key = std::env::var("KAKAO_APP_KEY").unwrap_or_else(|_| "demo-app-key".into());
	let config = KakaoConfig::builder(app_key)
		.token_endpoint(Url::parse(&server.url("/oauth/token"))?)
		.message_endpoint(Url::parse(&server.url("/v2/api/talk/memo/default/send"))?)
		.build()?;
	let options: Arc<dyn OptionLookup> =
		Arc::new(MemoryOptionLookup::from_iter([ProductOption::new(7, "Ceramic Mug")]));
	let tokens = Arc::new(MemoryTokenStore::default());
	let client = ReqwestKakaoClient::new(config, options, tokens.clone())?;
	let Some(response) = client.exchange_code("demo-code").await else {
		color_eyre::eyre::bail!("The authorization code was not exchanged.");
	};
	let user = UserId::new("demo-buyer")?;

	tokens.save(user.clone(), response.access_token()?).await?;

	let order = OrderNotification::new(7, 2, "2024-06-01 14:05", "Please gift wrap it.");
	let receipt = client.send_order_notification(&user, &order).await?;

	println!("Memo delivered with status {} at {}.", receipt.status, receipt.sent_at);

	token_mock.assert_async().await;
	memo_mock.assert_async().await;

	Ok(())
}
