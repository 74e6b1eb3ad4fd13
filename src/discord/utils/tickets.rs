// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::shared_components::{new_ticket_button, ticket_controls};
use crate::config::Topic;
use twilight_http::request::channel::message::create_message::CreateMessage;
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;
use twilight_model::id::marker::UserMarker;
use twilight_model::id::Id;
use twilight_util::builder::embed::EmbedBuilder;
use twilight_validate::embed::EmbedValidationError;

/// The longest message content the platform accepts.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

const PANEL_COLOR: u32 = 0xFFD700;
const TICKET_COLOR: u32 = 0xFFA500;

/// Contains data necessary to post a message
#[derive(Clone, Debug, Default)]
pub struct TicketMessageData {
	pub content: Option<String>,
	pub embeds: Vec<Embed>,
	pub components: Vec<Component>,
	pub allowed_mentions: AllowedMentions,
}

impl TicketMessageData {
	/// A text-only message that doesn't ping anyone
	pub fn plain(content: impl Into<String>) -> Self {
		Self {
			content: Some(content.into()),
			..Self::default()
		}
	}

	/// A text-only message that may ping the given user
	pub fn to_user(user_id: Id<UserMarker>, content: impl Into<String>) -> Self {
		let mut allowed_mentions = AllowedMentions::default();
		allowed_mentions.users.push(user_id);
		Self {
			content: Some(content.into()),
			allowed_mentions,
			..Self::default()
		}
	}

	/// Adds all of the message data to a [CreateMessage] builder
	pub fn set_create_message_data<'a>(&'a self, mut create_message: CreateMessage<'a>) -> CreateMessage<'a> {
		if let Some(content) = &self.content {
			create_message = create_message.content(content);
		}
		create_message
			.embeds(&self.embeds)
			.components(&self.components)
			.allowed_mentions(Some(&self.allowed_mentions))
	}
}

/// Generates the panel message from which users open tickets
pub fn ticket_panel_message() -> Result<TicketMessageData, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.title("Ticket Form")
		.description("Click the button below to open the ticket form.")
		.color(PANEL_COLOR)
		.validate()?
		.build();
	Ok(TicketMessageData {
		content: None,
		embeds: vec![embed],
		components: vec![new_ticket_button()],
		allowed_mentions: AllowedMentions::default(),
	})
}

/// Generates the first message in a new ticket channel, pinging the requester
pub fn ticket_greeting_message(
	requester: Id<UserMarker>,
	topics: &[Topic],
) -> Result<TicketMessageData, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.title("Ticket Created")
		.description(format!(
			"Ticket of {}.\n\nUse this channel to communicate your issue.",
			requester.mention()
		))
		.color(TICKET_COLOR)
		.validate()?
		.build();
	let mut allowed_mentions = AllowedMentions::default();
	allowed_mentions.users.push(requester);
	Ok(TicketMessageData {
		content: Some(format!("{} here's your ticket!", requester.mention())),
		embeds: vec![embed],
		components: ticket_controls(topics),
		allowed_mentions,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::default_topics;

	#[test]
	fn greeting_pings_only_the_requester() {
		let requester = Id::new(42);
		let message = ticket_greeting_message(requester, &default_topics()).unwrap();
		assert_eq!(message.content.as_deref(), Some("<@42> here's your ticket!"));
		assert_eq!(message.allowed_mentions.users, vec![requester]);
		assert!(message.allowed_mentions.roles.is_empty());
		assert_eq!(message.embeds[0].title.as_deref(), Some("Ticket Created"));
		assert_eq!(message.embeds[0].color, Some(TICKET_COLOR));
		assert_eq!(message.components.len(), 1);
	}

	#[test]
	fn panel_has_open_button() {
		let message = ticket_panel_message().unwrap();
		assert!(message.content.is_none());
		assert_eq!(message.embeds[0].title.as_deref(), Some("Ticket Form"));
		assert_eq!(message.components.len(), 1);
	}

	#[test]
	fn plain_messages_ping_nobody() {
		let message = TicketMessageData::plain("Activity status updated: 0 tickets open");
		assert!(message.allowed_mentions.users.is_empty());
		assert!(message.embeds.is_empty());
	}
}
