// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Dispatcher, InboundInteraction};
use crate::discord::utils::responses::topic_query_prompt;
use miette::IntoDiagnostic;

impl Dispatcher {
	pub(super) async fn topic_query(&mut self, interaction: &InboundInteraction, topic_id: &str) -> miette::Result<()> {
		let Some(topic) = self.config.topic(topic_id) else {
			tracing::debug!(topic = topic_id, "Ignoring query for an unknown topic");
			return Ok(());
		};
		let actor = &interaction.actor;
		let Some(ticket) = self.registry.get(actor.id) else {
			return Ok(());
		};
		if !self.platform.channel_exists(ticket.channel_id) {
			return Ok(());
		}

		self.platform
			.reply_ephemeral(&interaction.handle, &topic_query_prompt(actor.id, &topic.id))
			.await
			.into_diagnostic()?;
		self.log
			.record(&format!("{} clicked the {} button.", actor.username, topic.id))
			.await;
		Ok(())
	}
}
