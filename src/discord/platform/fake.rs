// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A recording stand-in for the chat platform.

use super::{
	CreatedChannel, FetchedMessage, InteractionHandle, NewChannel, Platform, PlatformError, TicketCategory,
};
use crate::discord::utils::tickets::TicketMessageData;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, InteractionMarker, MessageMarker, UserMarker};
use twilight_model::id::Id;

pub const GUILD_ID: u64 = 10;

#[derive(Default)]
struct FakeState {
	next_id: u64,
	category_missing: bool,
	direct_messages_refused: bool,
	deletes_fail: bool,
	existing_channels: HashSet<Id<ChannelMarker>>,
	direct_channels: HashMap<Id<UserMarker>, Id<ChannelMarker>>,
	refused_channels: HashSet<Id<ChannelMarker>>,
	channel_history: HashMap<Id<ChannelMarker>, Vec<FetchedMessage>>,
	created: Vec<NewChannel>,
	deleted: Vec<Id<ChannelMarker>>,
	message_deletes: Vec<Vec<Id<MessageMarker>>>,
	message_deletes_allowed: Option<usize>,
	sent: Vec<(Id<ChannelMarker>, TicketMessageData)>,
	replies: Vec<(Id<InteractionMarker>, String)>,
	presences: Vec<String>,
}

pub struct FakePlatform {
	state: Mutex<FakeState>,
}

impl FakePlatform {
	pub fn new() -> Self {
		let state = FakeState {
			next_id: 1000,
			..FakeState::default()
		};
		Self {
			state: Mutex::new(state),
		}
	}

	fn allocate_id(state: &mut FakeState) -> u64 {
		state.next_id += 1;
		state.next_id
	}

	pub fn remove_category(&self) {
		self.state.lock().unwrap().category_missing = true;
	}

	pub fn refuse_direct_messages(&self) {
		self.state.lock().unwrap().direct_messages_refused = true;
	}

	pub fn fail_deletes(&self) {
		self.state.lock().unwrap().deletes_fail = true;
	}

	/// Lets the given number of message deletion calls succeed and fails every later one.
	pub fn fail_message_deletes_after(&self, successful_calls: usize) {
		self.state.lock().unwrap().message_deletes_allowed = Some(successful_calls);
	}

	pub fn refuse_messages_to(&self, channel_id: Id<ChannelMarker>) {
		self.state.lock().unwrap().refused_channels.insert(channel_id);
	}

	/// Makes a channel disappear without the bot being involved.
	pub fn vanish_channel(&self, channel_id: Id<ChannelMarker>) {
		self.state.lock().unwrap().existing_channels.remove(&channel_id);
	}

	pub fn add_existing_channel(&self, channel_id: Id<ChannelMarker>) {
		self.state.lock().unwrap().existing_channels.insert(channel_id);
	}

	pub fn add_history(&self, channel_id: Id<ChannelMarker>, author_name: &str, content: &str) {
		let position = self
			.state
			.lock()
			.unwrap()
			.channel_history
			.get(&channel_id)
			.map_or(0, Vec::len);
		let sent_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(position as i64);
		self.add_history_at(channel_id, author_name, content, sent_at);
	}

	pub fn add_history_at(&self, channel_id: Id<ChannelMarker>, author_name: &str, content: &str, sent_at: DateTime<Utc>) {
		let mut state = self.state.lock().unwrap();
		let id = Self::allocate_id(&mut state);
		state.channel_history.entry(channel_id).or_default().push(FetchedMessage {
			id: Id::new(id),
			author_name: author_name.to_string(),
			content: content.to_string(),
			sent_at,
		});
	}

	pub fn created_channels(&self) -> Vec<NewChannel> {
		self.state.lock().unwrap().created.clone()
	}

	pub fn deleted_channels(&self) -> Vec<Id<ChannelMarker>> {
		self.state.lock().unwrap().deleted.clone()
	}

	pub fn deleted_messages(&self) -> Vec<Id<MessageMarker>> {
		self.state.lock().unwrap().message_deletes.concat()
	}

	/// Message deletion calls that succeeded, one entry per call.
	pub fn message_delete_calls(&self) -> Vec<Vec<Id<MessageMarker>>> {
		self.state.lock().unwrap().message_deletes.clone()
	}

	/// Messages sent so far, as (channel, content) pairs.
	pub fn sent_messages(&self) -> Vec<(Id<ChannelMarker>, String)> {
		self.state
			.lock()
			.unwrap()
			.sent
			.iter()
			.map(|(channel_id, message)| (*channel_id, message.content.clone().unwrap_or_default()))
			.collect()
	}

	pub fn sent_message_data(&self) -> Vec<(Id<ChannelMarker>, TicketMessageData)> {
		self.state.lock().unwrap().sent.clone()
	}

	pub fn direct_channel(&self, user_id: Id<UserMarker>) -> Option<Id<ChannelMarker>> {
		self.state.lock().unwrap().direct_channels.get(&user_id).copied()
	}

	pub fn replies(&self) -> Vec<(Id<InteractionMarker>, String)> {
		self.state.lock().unwrap().replies.clone()
	}

	pub fn presences(&self) -> Vec<String> {
		self.state.lock().unwrap().presences.clone()
	}
}

#[async_trait]
impl Platform for FakePlatform {
	fn ticket_category(&self, category_id: Id<ChannelMarker>) -> Option<TicketCategory> {
		if self.state.lock().unwrap().category_missing {
			return None;
		}
		let guild_id: Id<GuildMarker> = Id::new(GUILD_ID);
		Some(TicketCategory {
			id: category_id,
			guild_id,
		})
	}

	fn channel_exists(&self, channel_id: Id<ChannelMarker>) -> bool {
		self.state.lock().unwrap().existing_channels.contains(&channel_id)
	}

	async fn create_channel(&self, channel: &NewChannel) -> Result<CreatedChannel, PlatformError> {
		let mut state = self.state.lock().unwrap();
		let id = Id::new(Self::allocate_id(&mut state));
		state.existing_channels.insert(id);
		state.created.push(channel.clone());
		Ok(CreatedChannel {
			id,
			name: channel.name.clone(),
		})
	}

	async fn delete_channel(&self, channel_id: Id<ChannelMarker>) -> Result<(), PlatformError> {
		let mut state = self.state.lock().unwrap();
		if state.deletes_fail {
			return Err(PlatformError::Rejected(String::from("missing permissions")));
		}
		state.existing_channels.remove(&channel_id);
		state.deleted.push(channel_id);
		Ok(())
	}

	async fn send_message(&self, channel_id: Id<ChannelMarker>, message: &TicketMessageData) -> Result<(), PlatformError> {
		let mut state = self.state.lock().unwrap();
		let is_direct_channel = state.direct_channels.values().any(|id| *id == channel_id);
		if state.refused_channels.contains(&channel_id) || (is_direct_channel && state.direct_messages_refused) {
			return Err(PlatformError::Rejected(String::from("cannot send messages to this user")));
		}
		state.sent.push((channel_id, message.clone()));
		Ok(())
	}

	async fn fetch_messages(&self, channel_id: Id<ChannelMarker>, limit: u16) -> Result<Vec<FetchedMessage>, PlatformError> {
		let state = self.state.lock().unwrap();
		let history = state.channel_history.get(&channel_id).cloned().unwrap_or_default();
		// Newest first, as the platform returns them.
		Ok(history.into_iter().rev().take(usize::from(limit)).collect())
	}

	async fn delete_messages(
		&self,
		_channel_id: Id<ChannelMarker>,
		message_ids: &[Id<MessageMarker>],
	) -> Result<(), PlatformError> {
		if message_ids.is_empty() {
			return Ok(());
		}
		let mut state = self.state.lock().unwrap();
		if state.message_deletes_allowed == Some(state.message_deletes.len()) {
			return Err(PlatformError::Rejected(String::from("unknown message")));
		}
		state.message_deletes.push(message_ids.to_vec());
		Ok(())
	}

	async fn create_direct_channel(&self, user_id: Id<UserMarker>) -> Result<Id<ChannelMarker>, PlatformError> {
		let mut state = self.state.lock().unwrap();
		if let Some(channel_id) = state.direct_channels.get(&user_id) {
			return Ok(*channel_id);
		}
		let channel_id = Id::new(Self::allocate_id(&mut state));
		state.direct_channels.insert(user_id, channel_id);
		Ok(channel_id)
	}

	async fn set_presence(&self, text: &str) -> Result<(), PlatformError> {
		self.state.lock().unwrap().presences.push(text.to_string());
		Ok(())
	}

	async fn reply_ephemeral(&self, interaction: &InteractionHandle, content: &str) -> Result<(), PlatformError> {
		self.state
			.lock()
			.unwrap()
			.replies
			.push((interaction.id, content.to_string()));
		Ok(())
	}
}
