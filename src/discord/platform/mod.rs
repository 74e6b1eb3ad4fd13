// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::utils::tickets::TicketMessageData;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use twilight_model::channel::permission_overwrite::PermissionOverwrite;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, InteractionMarker, MessageMarker, UserMarker};
use twilight_model::id::Id;

mod error;
#[cfg(test)]
pub mod fake;
mod twilight;

pub use error::PlatformError;
pub use twilight::TwilightPlatform;

/// The user who triggered an interaction.
#[derive(Clone, Debug)]
pub struct Actor {
	pub id: Id<UserMarker>,
	pub username: String,
	/// Server nickname, falling back to the global display name and then the username.
	pub display_name: String,
}

/// What's needed to respond to an interaction.
#[derive(Clone, Debug)]
pub struct InteractionHandle {
	pub id: Id<InteractionMarker>,
	pub token: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TicketCategory {
	pub id: Id<ChannelMarker>,
	pub guild_id: Id<GuildMarker>,
}

/// A text channel to be created, with its entire access control list.
#[derive(Clone, Debug)]
pub struct NewChannel {
	pub guild_id: Id<GuildMarker>,
	pub parent_id: Id<ChannelMarker>,
	pub name: String,
	pub permission_overwrites: Vec<PermissionOverwrite>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatedChannel {
	pub id: Id<ChannelMarker>,
	pub name: String,
}

/// A message read back from a channel.
#[derive(Clone, Debug)]
pub struct FetchedMessage {
	pub id: Id<MessageMarker>,
	pub author_name: String,
	pub content: String,
	pub sent_at: DateTime<Utc>,
}

/// Every call the bot makes out to the chat platform.
///
/// Lookups of the category and of channel existence are answered from the gateway cache, so they don't fail.
#[async_trait]
pub trait Platform: Send + Sync {
	fn ticket_category(&self, category_id: Id<ChannelMarker>) -> Option<TicketCategory>;

	fn channel_exists(&self, channel_id: Id<ChannelMarker>) -> bool;

	async fn create_channel(&self, channel: &NewChannel) -> Result<CreatedChannel, PlatformError>;

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> Result<(), PlatformError>;

	async fn send_message(&self, channel_id: Id<ChannelMarker>, message: &TicketMessageData) -> Result<(), PlatformError>;

	/// Gets up to `limit` of the most recent messages in the channel, in whatever order the platform returns them.
	async fn fetch_messages(&self, channel_id: Id<ChannelMarker>, limit: u16) -> Result<Vec<FetchedMessage>, PlatformError>;

	async fn delete_messages(
		&self,
		channel_id: Id<ChannelMarker>,
		message_ids: &[Id<MessageMarker>],
	) -> Result<(), PlatformError>;

	async fn create_direct_channel(&self, user_id: Id<UserMarker>) -> Result<Id<ChannelMarker>, PlatformError>;

	async fn set_presence(&self, text: &str) -> Result<(), PlatformError>;

	async fn reply_ephemeral(&self, interaction: &InteractionHandle, content: &str) -> Result<(), PlatformError>;
}
