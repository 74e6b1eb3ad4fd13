// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::interactions::{Dispatcher, InboundEvent, InboundInteraction};
use super::platform::{Actor, InteractionHandle, Platform, TwilightPlatform};
use crate::config::ConfigData;
use crate::log_sink::LogSink;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::interaction::InteractionData;
use twilight_model::channel::message::component::ComponentType;
use twilight_model::gateway::event::Event;
use twilight_model::gateway::payload::incoming::InteractionCreate;

/// How many events may wait for the dispatcher before the gateway loop waits too.
const EVENT_QUEUE_CAPACITY: usize = 64;

pub fn set_up_client(config: &ConfigData) -> Arc<Client> {
	Arc::new(Client::new(config.discord.bot_token.clone()))
}

pub async fn run_bot(config: Arc<ConfigData>, http_client: Arc<Client>) -> miette::Result<()> {
	let intents = Intents::GUILDS | Intents::GUILD_MESSAGES;

	let mut shard = Shard::new(ShardId::ONE, config.discord.bot_token.clone(), intents);

	let cache = Arc::new(
		DefaultInMemoryCache::builder()
			.resource_types(ResourceType::CHANNEL | ResourceType::GUILD)
			.build(),
	);

	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};

	let platform: Arc<dyn Platform> = Arc::new(TwilightPlatform::new(
		Arc::clone(&http_client),
		application_id,
		Arc::clone(&cache),
		shard.sender(),
	));
	let log = Arc::new(LogSink::new(
		config.log_file.clone(),
		config.channels.log,
		Arc::clone(&platform),
	));
	let dispatcher = Dispatcher::new(platform, log, Arc::clone(&config));

	let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_CAPACITY);
	let dispatcher_task = tokio::spawn(dispatcher.run(event_receiver));

	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		tracing::debug!("Incoming gateway message: {:?}", event.kind());
		cache.update(&event);

		let Some(inbound_event) = inbound_event(event) else {
			continue;
		};
		forward_event(&event_sender, inbound_event)?;
	}

	drop(event_sender);
	dispatcher_task.await.into_diagnostic()?;
	Ok(())
}

/// Hands an event to the dispatcher without blocking, so the shard keeps being polled while the dispatcher is busy.
/// Events that arrive while the queue is full are dropped.
fn forward_event(event_sender: &mpsc::Sender<InboundEvent>, event: InboundEvent) -> miette::Result<()> {
	match event_sender.try_send(event) {
		Ok(()) => Ok(()),
		Err(TrySendError::Full(_)) => {
			tracing::warn!("The event queue is full; dropping an event");
			Ok(())
		}
		Err(TrySendError::Closed(_)) => bail!("The event dispatcher stopped unexpectedly"),
	}
}

/// Picks out the gateway events the dispatcher handles.
fn inbound_event(event: Event) -> Option<InboundEvent> {
	match event {
		Event::Ready(_) => {
			tracing::info!("Discord gateway is ready");
			Some(InboundEvent::Ready)
		}
		Event::InteractionCreate(interaction) => button_interaction(&interaction).map(InboundEvent::Interaction),
		Event::ChannelDelete(channel) => Some(InboundEvent::ChannelDeleted(channel.id)),
		_ => None,
	}
}

fn button_interaction(interaction: &InteractionCreate) -> Option<InboundInteraction> {
	let Some(InteractionData::MessageComponent(component_data)) = &interaction.data else {
		return None;
	};
	if component_data.component_type != ComponentType::Button {
		return None;
	}
	let Some(user) = interaction.author() else {
		tracing::warn!("Button interaction without a user");
		return None;
	};

	let nickname = interaction.member.as_ref().and_then(|member| member.nick.clone());
	let display_name = nickname
		.or_else(|| user.global_name.clone())
		.unwrap_or_else(|| user.name.clone());
	Some(InboundInteraction {
		handle: InteractionHandle {
			id: interaction.id,
			token: interaction.token.clone(),
		},
		actor: Actor {
			id: user.id,
			username: user.name.clone(),
			display_name,
		},
		action: component_data.custom_id.clone(),
	})
}
