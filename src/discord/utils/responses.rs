// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_mention::fmt::Mention;
use twilight_model::id::marker::{ChannelMarker, UserMarker};
use twilight_model::id::Id;

pub const TICKET_ALREADY_OPEN: &str = "You already have a ticket open. Please wait for it to be resolved.";
pub const TICKET_CREATED: &str = "Ticket creation successful! Check your DMs for more details.";
pub const TICKET_CREATE_FAILED: &str = "An error occurred while creating your ticket.";
pub const TICKET_CLOSED: &str = "Ticket closed successfully.";
pub const TICKET_CLOSED_TRANSCRIPT_UNDELIVERED: &str =
	"Ticket closed, but your transcript couldn't be delivered by DM.";
pub const TICKET_CLOSE_FAILED: &str = "An error occurred while closing the ticket.";
pub const TRANSCRIPT_HEADER: &str = "Here is a transcript of your closed ticket:";

pub fn ticket_created_dm(channel_id: Id<ChannelMarker>) -> String {
	format!("Ticket created in {}!", channel_id.mention())
}

pub fn ticket_created_in_channel(user_id: Id<UserMarker>) -> String {
	format!("{}, Ticket created! Please wait for assistance.", user_id.mention())
}

pub fn topic_query_prompt(user_id: Id<UserMarker>, topic: &str) -> String {
	format!("{}, What is your query related to {}?", user_id.mention(), topic)
}
