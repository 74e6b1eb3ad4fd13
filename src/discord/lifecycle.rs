// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::discord::platform::{Actor, NewChannel, Platform, PlatformError};
use crate::discord::state::tickets::{Ticket, TicketRegistry};
use crate::discord::transcript::Transcript;
use crate::discord::utils::permissions::ticket_channel_overwrites;
use crate::discord::utils::responses::TRANSCRIPT_HEADER;
use crate::discord::utils::tickets::{MAX_MESSAGE_LENGTH, TicketMessageData, ticket_greeting_message};
use crate::log_sink::LogSink;
use miette::Diagnostic;
use std::fmt;
use std::sync::Arc;
use twilight_model::id::marker::{ChannelMarker, UserMarker};
use twilight_model::id::Id;

const MAX_CHANNEL_NAME_LENGTH: usize = 100;
const CHANNEL_NAME_PREFIX: &str = "ticket-";

/// Error data for opening and closing tickets
#[derive(Debug, Diagnostic)]
pub enum TicketError {
	/// The configured ticket category isn't a category the bot can see.
	CategoryNotFound(Id<ChannelMarker>),
	/// A direct message to the requester was refused.
	Delivery(PlatformError),
	Platform(PlatformError),
}

impl std::error::Error for TicketError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::CategoryNotFound(_) => None,
			Self::Delivery(error) => Some(error),
			Self::Platform(error) => Some(error),
		}
	}
}

impl fmt::Display for TicketError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CategoryNotFound(category_id) => write!(f, "ticket category {} not found", category_id),
			Self::Delivery(error) => write!(f, "direct message couldn't be delivered: {}", error),
			Self::Platform(error) => write!(f, "platform call failed: {}", error),
		}
	}
}

/// The channel backing a ticket that [TicketLifecycle::open] produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenedTicket {
	pub channel_id: Id<ChannelMarker>,
	pub channel_name: String,
	/// Whether an existing ticket channel was handed back instead of creating one.
	pub reused: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClosedTicket {
	/// Whether the transcript reached the requester by DM. If not, it was posted in the ticket channel before deletion.
	pub transcript_delivered: bool,
}

/// Creates and tears down ticket channels.
pub struct TicketLifecycle {
	platform: Arc<dyn Platform>,
	log: Arc<LogSink>,
	config: Arc<ConfigData>,
}

impl TicketLifecycle {
	pub fn new(platform: Arc<dyn Platform>, log: Arc<LogSink>, config: Arc<ConfigData>) -> Self {
		Self { platform, log, config }
	}

	pub async fn open(&self, requester: &Actor, registry: &TicketRegistry) -> Result<OpenedTicket, TicketError> {
		let category_id = self.config.channels.ticket_category;
		let Some(category) = self.platform.ticket_category(category_id) else {
			return Err(TicketError::CategoryNotFound(category_id));
		};

		if let Some(existing_ticket) = registry.get(requester.id) {
			if self.platform.channel_exists(existing_ticket.channel_id) {
				return Ok(OpenedTicket {
					channel_id: existing_ticket.channel_id,
					channel_name: existing_ticket.channel_name.clone(),
					reused: true,
				});
			}
		}

		let new_channel = NewChannel {
			guild_id: category.guild_id,
			parent_id: category.id,
			name: ticket_channel_name(requester),
			permission_overwrites: ticket_channel_overwrites(category.guild_id, requester.id, &self.config.staff_roles),
		};
		let channel = self
			.platform
			.create_channel(&new_channel)
			.await
			.map_err(TicketError::Platform)?;

		let greeting_result = match ticket_greeting_message(requester.id, &self.config.topics) {
			Ok(greeting) => self.platform.send_message(channel.id, &greeting).await,
			Err(error) => Err(error.into()),
		};
		if let Err(error) = greeting_result {
			// A ticket channel never outlives a failed greeting.
			if let Err(delete_error) = self.platform.delete_channel(channel.id).await {
				tracing::error!(source = ?delete_error, channel = %channel.id, "Failed to remove a ticket channel that couldn't be set up");
			}
			return Err(TicketError::Platform(error));
		}

		self.log
			.notify(&format!("Created ticket channel for {}", requester.username))
			.await;
		Ok(OpenedTicket {
			channel_id: channel.id,
			channel_name: channel.name,
			reused: false,
		})
	}

	/// Produces the ticket's transcript, delivers it to the requester, and deletes the ticket channel. The ticket is
	/// only gone once this returns `Ok`.
	pub async fn close(&self, ticket: &Ticket) -> Result<ClosedTicket, TicketError> {
		let messages = self
			.platform
			.fetch_messages(ticket.channel_id, self.config.transcript_limit)
			.await
			.map_err(TicketError::Platform)?;
		let transcript = Transcript::from_messages(messages);
		let transcript_messages = transcript.to_messages(TRANSCRIPT_HEADER, MAX_MESSAGE_LENGTH);

		let username = &ticket.created_by.username;
		let transcript_delivered = match self.send_direct(ticket.requester_id, &transcript_messages).await {
			Ok(()) => {
				self.log.record(&format!("Sent transcript to {} in DM", username)).await;
				true
			}
			Err(error) => {
				tracing::warn!(source = ?error, "Couldn't send a transcript by DM");
				for content in transcript_messages.iter() {
					let message = TicketMessageData::plain(content.as_str());
					if let Err(error) = self.platform.send_message(ticket.channel_id, &message).await {
						tracing::warn!(source = ?error, "Couldn't post a transcript in the ticket channel");
						break;
					}
				}
				self.log
					.record(&format!(
						"Transcript DM couldn't be sent to {}, posted it in the ticket channel",
						username
					))
					.await;
				false
			}
		};

		self.platform
			.delete_channel(ticket.channel_id)
			.await
			.map_err(TicketError::Platform)?;
		Ok(ClosedTicket { transcript_delivered })
	}

	/// Sends each of the messages to the user by DM, stopping at the first failure.
	pub async fn send_direct(&self, user_id: Id<UserMarker>, contents: &[String]) -> Result<(), TicketError> {
		let direct_channel = self
			.platform
			.create_direct_channel(user_id)
			.await
			.map_err(TicketError::Delivery)?;
		for content in contents.iter() {
			let message = TicketMessageData::plain(content.as_str());
			self.platform
				.send_message(direct_channel, &message)
				.await
				.map_err(TicketError::Delivery)?;
		}
		Ok(())
	}
}

/// Names the ticket channel after the requester the way the platform would normalize it anyway.
pub fn ticket_channel_name(requester: &Actor) -> String {
	let mut slug = String::new();
	for character in requester.display_name.chars() {
		if character.is_ascii_alphanumeric() || character == '_' {
			slug.push(character.to_ascii_lowercase());
		} else if !slug.is_empty() && !slug.ends_with('-') {
			slug.push('-');
		}
	}
	let slug = slug.trim_end_matches('-');

	let mut name = if slug.is_empty() {
		format!("{}{}", CHANNEL_NAME_PREFIX, requester.id)
	} else {
		format!("{}{}", CHANNEL_NAME_PREFIX, slug)
	};
	// Everything in the name is ASCII at this point.
	name.truncate(MAX_CHANNEL_NAME_LENGTH);
	name
}
