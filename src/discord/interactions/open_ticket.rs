// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Dispatcher, InboundInteraction};
use crate::discord::state::tickets::{Ticket, TicketCreator};
use crate::discord::utils::responses::{
	TICKET_ALREADY_OPEN, TICKET_CREATE_FAILED, TICKET_CREATED, ticket_created_dm, ticket_created_in_channel,
};
use crate::discord::utils::tickets::TicketMessageData;
use miette::IntoDiagnostic;

impl Dispatcher {
	pub(super) async fn open_ticket(&mut self, interaction: &InboundInteraction) -> miette::Result<()> {
		let actor = &interaction.actor;
		self.log
			.record(&format!("{} clicked the Open Ticket Form button.", actor.username))
			.await;

		if self.registry.has_open_ticket(actor.id) {
			self.log
				.record(&format!("{} already has an open ticket.", actor.username))
				.await;
			self.platform
				.reply_ephemeral(&interaction.handle, TICKET_ALREADY_OPEN)
				.await
				.into_diagnostic()?;
			return Ok(());
		}

		let opened = match self.lifecycle.open(actor, &self.registry).await {
			Ok(opened) => opened,
			Err(error) => {
				tracing::error!(source = ?error, "Failed to open a ticket");
				self.log
					.record(&format!("Couldn't open a ticket for {}: {}", actor.username, error))
					.await;
				self.platform
					.reply_ephemeral(&interaction.handle, TICKET_CREATE_FAILED)
					.await
					.into_diagnostic()?;
				return Ok(());
			}
		};

		self.registry.put(Ticket {
			requester_id: actor.id,
			channel_id: opened.channel_id,
			channel_name: opened.channel_name.clone(),
			created_by: TicketCreator {
				user_id: actor.id,
				username: actor.username.clone(),
			},
		});

		let confirmation = [ticket_created_dm(opened.channel_id)];
		match self.lifecycle.send_direct(actor.id, &confirmation).await {
			Ok(()) => {
				self.log
					.record(&format!("Sent DM to {} about ticket creation", actor.username))
					.await;
			}
			Err(error) => {
				tracing::warn!(source = ?error, "Couldn't send a ticket confirmation by DM");
				let notice = TicketMessageData::to_user(actor.id, ticket_created_in_channel(actor.id));
				if let Err(error) = self.platform.send_message(opened.channel_id, &notice).await {
					tracing::warn!(source = ?error, "Couldn't post a ticket confirmation in the ticket channel");
				}
				self.log
					.record(&format!(
						"DM couldn't be sent, notified {} in ticket channel",
						actor.username
					))
					.await;
			}
		}

		self.platform
			.reply_ephemeral(&interaction.handle, TICKET_CREATED)
			.await
			.into_diagnostic()?;
		Ok(())
	}
}
