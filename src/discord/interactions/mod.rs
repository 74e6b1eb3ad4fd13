// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::discord::lifecycle::TicketLifecycle;
use crate::discord::platform::{Actor, InteractionHandle, Platform};
use crate::discord::presence::PresenceReporter;
use crate::discord::state::tickets::TicketRegistry;
use crate::discord::utils::shared_components::{CLOSE_TICKET_ACTION, OPEN_TICKET_ACTION, TOPIC_QUERY_ACTION};
use crate::log_sink::LogSink;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use twilight_model::id::marker::ChannelMarker;
use twilight_model::id::Id;

mod close_ticket;
mod open_ticket;
mod panel;
mod topic_query;

/// An event from the platform that the dispatcher acts on.
#[derive(Debug)]
pub enum InboundEvent {
	/// The gateway session is ready.
	Ready,
	/// A button was clicked.
	Interaction(InboundInteraction),
	ChannelDeleted(Id<ChannelMarker>),
}

#[derive(Debug)]
pub struct InboundInteraction {
	pub handle: InteractionHandle,
	pub actor: Actor,
	/// The custom ID of the clicked button.
	pub action: String,
}

#[derive(Debug, Eq, PartialEq)]
enum Action<'a> {
	OpenTicket,
	CloseTicket,
	TopicQuery(&'a str),
}

impl<'a> Action<'a> {
	fn parse(custom_id: &'a str) -> Option<Self> {
		match custom_id {
			OPEN_TICKET_ACTION => Some(Self::OpenTicket),
			CLOSE_TICKET_ACTION => Some(Self::CloseTicket),
			_ => match custom_id.split_once(':') {
				Some((TOPIC_QUERY_ACTION, topic)) if !topic.is_empty() => Some(Self::TopicQuery(topic)),
				_ => None,
			},
		}
	}
}

/// Routes platform events to the ticket handlers. The dispatcher owns the ticket registry, and handles one event at a
/// time to completion.
pub struct Dispatcher {
	platform: Arc<dyn Platform>,
	log: Arc<LogSink>,
	config: Arc<ConfigData>,
	lifecycle: TicketLifecycle,
	presence: PresenceReporter,
	registry: TicketRegistry,
}

impl Dispatcher {
	pub fn new(platform: Arc<dyn Platform>, log: Arc<LogSink>, config: Arc<ConfigData>) -> Self {
		let lifecycle = TicketLifecycle::new(Arc::clone(&platform), Arc::clone(&log), Arc::clone(&config));
		let presence = PresenceReporter::new(Arc::clone(&platform), Arc::clone(&log));
		Self {
			platform,
			log,
			config,
			lifecycle,
			presence,
			registry: TicketRegistry::new(),
		}
	}

	pub fn registry(&self) -> &TicketRegistry {
		&self.registry
	}

	/// Handles queued events until every sender is gone.
	pub async fn run(mut self, mut events: Receiver<InboundEvent>) {
		while let Some(event) = events.recv().await {
			self.dispatch(event).await;
		}
		tracing::info!("Event queue closed; dispatcher stopping");
	}

	pub async fn dispatch(&mut self, event: InboundEvent) {
		let refresh_presence = match event {
			InboundEvent::Ready => {
				if let Err(error) = self.post_ticket_panel().await {
					tracing::error!(source = ?error, "Failed to set up the ticket panel");
				}
				true
			}
			InboundEvent::Interaction(interaction) => {
				if let Err(error) = self.route_interaction(&interaction).await {
					tracing::error!(source = ?error, "An error occurred handling an interaction");
				}
				true
			}
			InboundEvent::ChannelDeleted(channel_id) => self.handle_channel_deleted(channel_id).await,
		};

		if refresh_presence {
			self.presence.refresh(self.registry.len()).await;
		}
	}

	async fn route_interaction(&mut self, interaction: &InboundInteraction) -> miette::Result<()> {
		match Action::parse(&interaction.action) {
			Some(Action::OpenTicket) => self.open_ticket(interaction).await,
			Some(Action::CloseTicket) => self.close_ticket(interaction).await,
			Some(Action::TopicQuery(topic)) => self.topic_query(interaction, topic).await,
			None => {
				tracing::debug!(action = %interaction.action, "Ignoring unrecognized interaction");
				Ok(())
			}
		}
	}

	/// Forgets a ticket whose channel was deleted out from under it. Returns whether a ticket was removed.
	async fn handle_channel_deleted(&mut self, channel_id: Id<ChannelMarker>) -> bool {
		let Some(ticket) = self.registry.remove_by_channel(channel_id) else {
			return false;
		};
		self.log
			.record(&format!(
				"Ticket channel {} for {} was deleted; removed the ticket",
				ticket.channel_name, ticket.created_by.username
			))
			.await;
		true
	}
}
