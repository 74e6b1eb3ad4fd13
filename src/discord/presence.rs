// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::platform::Platform;
use crate::log_sink::LogSink;
use std::sync::Arc;

pub fn presence_text(open_tickets: usize) -> String {
	if open_tickets == 1 {
		String::from("1 ticket open")
	} else {
		format!("{} tickets open", open_tickets)
	}
}

/// Shows how many tickets are open as the bot's activity.
pub struct PresenceReporter {
	platform: Arc<dyn Platform>,
	log: Arc<LogSink>,
}

impl PresenceReporter {
	pub fn new(platform: Arc<dyn Platform>, log: Arc<LogSink>) -> Self {
		Self { platform, log }
	}

	pub async fn refresh(&self, open_tickets: usize) {
		let activity_text = presence_text(open_tickets);
		if let Err(error) = self.platform.set_presence(&activity_text).await {
			tracing::warn!(source = ?error, "Failed to update the bot's activity");
		}
		self.log
			.notify(&format!("Activity status updated: {}", activity_text))
			.await;
	}
}
