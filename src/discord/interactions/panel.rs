// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Dispatcher;
use crate::discord::utils::tickets::ticket_panel_message;
use chrono::{Duration, Utc};
use miette::IntoDiagnostic;
use twilight_model::id::marker::MessageMarker;
use twilight_model::id::Id;

const PANEL_CLEAR_LIMIT: u16 = 100;
/// Messages older than this can't be bulk deleted.
const BULK_DELETE_MAX_AGE_DAYS: i64 = 14;

impl Dispatcher {
	/// Clears the ticket panel channel and posts a fresh panel in it.
	pub(super) async fn post_ticket_panel(&self) -> miette::Result<()> {
		self.log.record("Bot is ready.").await;
		let panel_channel = self.config.channels.ticket_panel;

		match self.platform.fetch_messages(panel_channel, PANEL_CLEAR_LIMIT).await {
			Ok(messages) => {
				let bulk_cutoff = Utc::now() - Duration::days(BULK_DELETE_MAX_AGE_DAYS);
				let (recent, old): (Vec<_>, Vec<_>) =
					messages.into_iter().partition(|message| message.sent_at > bulk_cutoff);
				let recent: Vec<Id<MessageMarker>> = recent.iter().map(|message| message.id).collect();

				let mut result = self.platform.delete_messages(panel_channel, &recent).await;
				for message in old.iter() {
					if result.is_err() {
						break;
					}
					result = self.platform.delete_messages(panel_channel, &[message.id]).await;
				}
				match result {
					Ok(()) => self.log.record("Deleted messages in ticketing panel channel").await,
					Err(error) => tracing::warn!(source = ?error, "Failed to clear the ticket panel channel"),
				}
			}
			Err(error) => tracing::warn!(source = ?error, "Failed to read the ticket panel channel"),
		}

		let panel = ticket_panel_message().into_diagnostic()?;
		self.platform
			.send_message(panel_channel, &panel)
			.await
			.into_diagnostic()?;
		self.log.record("Sent ticket form panel to target channel").await;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::super::InboundEvent;
	use super::super::tests::Harness;
	use chrono::{Duration, Utc};
	use twilight_model::id::Id;

	#[tokio::test]
	async fn ready_replaces_the_panel() {
		let mut harness = Harness::new();
		let panel_channel = Id::new(2);
		harness.platform.add_history(panel_channel, "bot", "old panel");
		harness.platform.add_history(panel_channel, "someone", "hello?");

		harness.dispatcher.dispatch(InboundEvent::Ready).await;

		assert_eq!(harness.platform.deleted_messages().len(), 2);
		let panels: Vec<_> = harness
			.platform
			.sent_message_data()
			.into_iter()
			.filter(|(channel_id, _)| *channel_id == panel_channel)
			.collect();
		assert_eq!(panels.len(), 1);
		assert_eq!(panels[0].1.embeds[0].title.as_deref(), Some("Ticket Form"));
		assert_eq!(harness.platform.presences(), vec!["0 tickets open"]);
	}

	#[tokio::test]
	async fn recent_panel_messages_are_deleted_in_one_batch() {
		let mut harness = Harness::new();
		let panel_channel = Id::new(2);
		harness.platform.add_history(panel_channel, "bot", "old panel");
		harness.platform.add_history(panel_channel, "someone", "old question");
		harness
			.platform
			.add_history_at(panel_channel, "bot", "yesterday's panel", Utc::now() - Duration::days(1));
		harness
			.platform
			.add_history_at(panel_channel, "someone", "hello?", Utc::now() - Duration::hours(1));

		harness.dispatcher.dispatch(InboundEvent::Ready).await;

		let calls = harness.platform.message_delete_calls();
		assert_eq!(calls.len(), 3);
		assert_eq!(calls[0].len(), 2);
		assert!(calls[1..].iter().all(|call| call.len() == 1));
		assert_eq!(harness.platform.deleted_messages().len(), 4);
	}

	#[tokio::test]
	async fn panel_clearing_stops_at_the_first_failed_delete() {
		let mut harness = Harness::new();
		let panel_channel = Id::new(2);
		harness.platform.add_history(panel_channel, "bot", "first");
		harness.platform.add_history(panel_channel, "bot", "second");
		harness.platform.add_history(panel_channel, "bot", "third");
		harness.platform.fail_message_deletes_after(1);

		harness.dispatcher.dispatch(InboundEvent::Ready).await;

		assert_eq!(harness.platform.message_delete_calls().len(), 1);
		let panels = harness
			.platform
			.sent_message_data()
			.into_iter()
			.filter(|(channel_id, _)| *channel_id == panel_channel)
			.count();
		assert_eq!(panels, 1);
	}
}
