// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::Topic;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

pub const OPEN_TICKET_ACTION: &str = "open-ticket";
pub const CLOSE_TICKET_ACTION: &str = "close-ticket";
pub const TOPIC_QUERY_ACTION: &str = "topic-query";

const BUTTONS_PER_ROW: usize = 5;

pub fn topic_query_action(topic_id: &str) -> String {
	format!("{}:{}", TOPIC_QUERY_ACTION, topic_id)
}

fn button(custom_id: String, label: &str, style: ButtonStyle) -> Button {
	Button {
		custom_id: Some(custom_id),
		disabled: false,
		emoji: None,
		label: Some(label.to_string()),
		style,
		url: None,
		sku_id: None,
	}
}

pub fn new_ticket_button() -> Component {
	let open_button = button(String::from(OPEN_TICKET_ACTION), "Open Ticket Form", ButtonStyle::Primary);
	Component::ActionRow(ActionRow {
		components: vec![Component::Button(open_button)],
	})
}

/// Builds the controls posted in a new ticket channel: one button per topic, then the close button.
pub fn ticket_controls(topics: &[Topic]) -> Vec<Component> {
	let mut buttons: Vec<Component> = topics
		.iter()
		.map(|topic| {
			Component::Button(button(
				topic_query_action(&topic.id),
				&topic.label,
				ButtonStyle::Primary,
			))
		})
		.collect();
	buttons.push(Component::Button(button(
		String::from(CLOSE_TICKET_ACTION),
		"Close Ticket",
		ButtonStyle::Danger,
	)));

	buttons
		.chunks(BUTTONS_PER_ROW)
		.map(|row| {
			Component::ActionRow(ActionRow {
				components: row.to_vec(),
			})
		})
		.collect()
}
