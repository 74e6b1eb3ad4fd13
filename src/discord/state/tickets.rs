// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use twilight_model::id::marker::{ChannelMarker, UserMarker};
use twilight_model::id::Id;

/// An open support ticket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ticket {
	pub requester_id: Id<UserMarker>,
	/// The private channel backing this ticket.
	pub channel_id: Id<ChannelMarker>,
	pub channel_name: String,
	pub created_by: TicketCreator,
}

/// Who opened the ticket, kept for log lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketCreator {
	pub user_id: Id<UserMarker>,
	pub username: String,
}

/// The set of open tickets, keyed by requester. A requester has an open ticket exactly when they have an entry here.
#[derive(Debug, Default)]
pub struct TicketRegistry {
	tickets: HashMap<Id<UserMarker>, Ticket>,
}

impl TicketRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn has_open_ticket(&self, requester_id: Id<UserMarker>) -> bool {
		self.tickets.contains_key(&requester_id)
	}

	pub fn get(&self, requester_id: Id<UserMarker>) -> Option<&Ticket> {
		self.tickets.get(&requester_id)
	}

	/// Inserts a ticket. Callers check [Self::has_open_ticket] first; an existing entry for the same requester is
	/// replaced and returned.
	pub fn put(&mut self, ticket: Ticket) -> Option<Ticket> {
		self.tickets.insert(ticket.requester_id, ticket)
	}

	pub fn remove(&mut self, requester_id: Id<UserMarker>) -> Option<Ticket> {
		self.tickets.remove(&requester_id)
	}

	/// Removes the ticket backed by the given channel, if any.
	pub fn remove_by_channel(&mut self, channel_id: Id<ChannelMarker>) -> Option<Ticket> {
		let requester_id = self
			.tickets
			.values()
			.find(|ticket| ticket.channel_id == channel_id)
			.map(|ticket| ticket.requester_id)?;
		self.tickets.remove(&requester_id)
	}

	pub fn len(&self) -> usize {
		self.tickets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tickets.is_empty()
	}
}
