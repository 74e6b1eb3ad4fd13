// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Dispatcher, InboundInteraction};
use crate::discord::utils::responses::{TICKET_CLOSE_FAILED, TICKET_CLOSED, TICKET_CLOSED_TRANSCRIPT_UNDELIVERED};
use miette::IntoDiagnostic;

impl Dispatcher {
	pub(super) async fn close_ticket(&mut self, interaction: &InboundInteraction) -> miette::Result<()> {
		let actor = &interaction.actor;
		let Some(ticket) = self.registry.get(actor.id).cloned() else {
			return Ok(());
		};
		self.log
			.record(&format!("{} clicked the Close Ticket button.", actor.username))
			.await;

		if !self.platform.channel_exists(ticket.channel_id) {
			self.registry.remove(actor.id);
			self.log
				.record(&format!(
					"Ticket channel {} for {} no longer exists; closed the ticket",
					ticket.channel_name, actor.username
				))
				.await;
			self.platform
				.reply_ephemeral(&interaction.handle, TICKET_CLOSED)
				.await
				.into_diagnostic()?;
			return Ok(());
		}

		match self.lifecycle.close(&ticket).await {
			Ok(closed) => {
				self.registry.remove(actor.id);
				let response = if closed.transcript_delivered {
					TICKET_CLOSED
				} else {
					TICKET_CLOSED_TRANSCRIPT_UNDELIVERED
				};
				self.platform
					.reply_ephemeral(&interaction.handle, response)
					.await
					.into_diagnostic()?;
				self.log
					.record(&format!("Closed ticket and notified {} about closure", actor.username))
					.await;
			}
			Err(error) => {
				tracing::error!(source = ?error, "Failed to close a ticket");
				self.log
					.record(&format!("Couldn't close the ticket for {}: {}", actor.username, error))
					.await;
				self.platform
					.reply_ephemeral(&interaction.handle, TICKET_CLOSE_FAILED)
					.await
					.into_diagnostic()?;
			}
		}
		Ok(())
	}
}
