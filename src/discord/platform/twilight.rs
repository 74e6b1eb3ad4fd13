// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{CreatedChannel, FetchedMessage, InteractionHandle, NewChannel, Platform, PlatformError, TicketCategory};
use crate::discord::utils::tickets::TicketMessageData;
use crate::discord::utils::timestamp::message_sent_at;
use async_trait::async_trait;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_gateway::MessageSender;
use twilight_http::client::Client;
use twilight_model::channel::ChannelType;
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::outgoing::UpdatePresence;
use twilight_model::gateway::presence::{Activity, ActivityType, MinimalActivity, Status};
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker, MessageMarker, UserMarker};
use twilight_model::id::Id;
use twilight_util::builder::InteractionResponseDataBuilder;

/// The platform as reached through twilight: HTTP for requests, the gateway for presence, the cache for lookups.
pub struct TwilightPlatform {
	http_client: Arc<Client>,
	application_id: Id<ApplicationMarker>,
	cache: Arc<DefaultInMemoryCache>,
	gateway: MessageSender,
}

impl TwilightPlatform {
	pub fn new(
		http_client: Arc<Client>,
		application_id: Id<ApplicationMarker>,
		cache: Arc<DefaultInMemoryCache>,
		gateway: MessageSender,
	) -> Self {
		Self {
			http_client,
			application_id,
			cache,
			gateway,
		}
	}
}

#[async_trait]
impl Platform for TwilightPlatform {
	fn ticket_category(&self, category_id: Id<ChannelMarker>) -> Option<TicketCategory> {
		let channel = self.cache.channel(category_id)?;
		if channel.kind != ChannelType::GuildCategory {
			return None;
		}
		let guild_id = channel.guild_id?;
		Some(TicketCategory {
			id: category_id,
			guild_id,
		})
	}

	fn channel_exists(&self, channel_id: Id<ChannelMarker>) -> bool {
		self.cache.channel(channel_id).is_some()
	}

	async fn create_channel(&self, channel: &NewChannel) -> Result<CreatedChannel, PlatformError> {
		let created_channel = self
			.http_client
			.create_guild_channel(channel.guild_id, &channel.name)
			.kind(ChannelType::GuildText)
			.parent_id(channel.parent_id)
			.permission_overwrites(&channel.permission_overwrites)
			.await?
			.model()
			.await?;
		Ok(CreatedChannel {
			id: created_channel.id,
			name: created_channel.name.unwrap_or_else(|| channel.name.clone()),
		})
	}

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> Result<(), PlatformError> {
		self.http_client.delete_channel(channel_id).await?;
		Ok(())
	}

	async fn send_message(&self, channel_id: Id<ChannelMarker>, message: &TicketMessageData) -> Result<(), PlatformError> {
		let create_message = self.http_client.create_message(channel_id);
		message.set_create_message_data(create_message).await?;
		Ok(())
	}

	async fn fetch_messages(&self, channel_id: Id<ChannelMarker>, limit: u16) -> Result<Vec<FetchedMessage>, PlatformError> {
		let messages = self
			.http_client
			.channel_messages(channel_id)
			.limit(limit)
			.await?
			.models()
			.await?;
		let messages = messages
			.into_iter()
			.map(|message| FetchedMessage {
				id: message.id,
				sent_at: message_sent_at(message.id, &message.timestamp),
				author_name: message.author.name,
				content: message.content,
			})
			.collect();
		Ok(messages)
	}

	async fn delete_messages(
		&self,
		channel_id: Id<ChannelMarker>,
		message_ids: &[Id<MessageMarker>],
	) -> Result<(), PlatformError> {
		match message_ids {
			[] => (),
			// Bulk deletion needs at least two messages.
			[message_id] => {
				self.http_client.delete_message(channel_id, *message_id).await?;
			}
			_ => {
				self.http_client.delete_messages(channel_id, message_ids).await?;
			}
		}
		Ok(())
	}

	async fn create_direct_channel(&self, user_id: Id<UserMarker>) -> Result<Id<ChannelMarker>, PlatformError> {
		let channel = self
			.http_client
			.create_private_channel(user_id)
			.await?
			.model()
			.await?;
		Ok(channel.id)
	}

	async fn set_presence(&self, text: &str) -> Result<(), PlatformError> {
		let activity: Activity = MinimalActivity {
			kind: ActivityType::Watching,
			name: text.to_string(),
			url: None,
		}
		.into();
		let presence = UpdatePresence::new(vec![activity], false, None::<u64>, Status::Online)?;
		self.gateway.command(&presence)?;
		Ok(())
	}

	async fn reply_ephemeral(&self, interaction: &InteractionHandle, content: &str) -> Result<(), PlatformError> {
		let response = InteractionResponseDataBuilder::new()
			.content(content)
			.flags(MessageFlags::EPHEMERAL)
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::ChannelMessageWithSource,
			data: Some(response),
		};
		self.http_client
			.interaction(self.application_id)
			.create_response(interaction.id, &interaction.token, &response)
			.await?;
		Ok(())
	}
}
