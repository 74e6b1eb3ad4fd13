// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use ticket_desk::config::parse_config;
use ticket_desk::discord::{run_bot, set_up_client};

#[tokio::main]
async fn main() -> miette::Result<()> {
	tracing_subscriber::fmt::init();

	let config = Arc::new(parse_config("config.kdl").await?);
	let http_client = set_up_client(&config);

	run_bot(config, http_client).await
}
