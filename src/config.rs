// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlNode, KdlValue};
use miette::{IntoDiagnostic, bail, ensure, miette};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs::read_to_string;
use twilight_model::id::marker::{ChannelMarker, RoleMarker};
use twilight_model::id::Id;

const TOKEN_ENVIRONMENT_VARIABLE: &str = "DISCORD_TOKEN";
const DEFAULT_LOG_FILE: &str = "bot.log";
const MAX_TRANSCRIPT_LIMIT: u16 = 100;
/// Ticket controls are laid out five to a row across at most five rows, and one slot is taken by the close button.
pub const MAX_TOPICS: usize = 24;

pub async fn parse_config(config_path: &str) -> miette::Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let mut config = parse_config_document(&config_file_contents)?;
	if let Ok(token) = std::env::var(TOKEN_ENVIRONMENT_VARIABLE) {
		config.discord.bot_token = token;
	}
	ensure!(
		!config.discord.bot_token.is_empty(),
		"No bot token configured; set `discord.bot_token` or the {} environment variable",
		TOKEN_ENVIRONMENT_VARIABLE
	);
	Ok(config)
}

#[derive(Debug)]
pub struct ConfigData {
	pub discord: DiscordConfig,
	pub channels: ChannelConfig,
	/// Roles given view access to every ticket channel.
	pub staff_roles: Vec<Id<RoleMarker>>,
	pub topics: Vec<Topic>,
	/// The append-only file the log sink writes to.
	pub log_file: PathBuf,
	/// How many of the most recent messages in a ticket channel make it into the transcript.
	pub transcript_limit: u16,
}

#[derive(Debug)]
pub struct DiscordConfig {
	pub bot_token: String,
}

#[derive(Debug)]
pub struct ChannelConfig {
	/// The channel to which operational notices are mirrored.
	pub log: Id<ChannelMarker>,
	/// The channel holding the "open a ticket" panel.
	pub ticket_panel: Id<ChannelMarker>,
	/// The category under which ticket channels are created.
	pub ticket_category: Id<ChannelMarker>,
}

/// A subject the requester can pick from inside their ticket channel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Topic {
	/// Used in the button's action identifier and the reply text.
	pub id: String,
	pub label: String,
}

impl Topic {
	pub fn new(id: &str, label: &str) -> Self {
		Self {
			id: id.to_string(),
			label: label.to_string(),
		}
	}
}

impl ConfigData {
	pub fn topic(&self, id: &str) -> Option<&Topic> {
		self.topics.iter().find(|topic| topic.id == id)
	}
}

pub fn default_topics() -> Vec<Topic> {
	vec![
		Topic::new("ksp", "KSP"),
		Topic::new("minecraft", "Minecraft"),
		Topic::new("csgo", "CSGO"),
	]
}

pub fn parse_config_document(contents: &str) -> miette::Result<ConfigData> {
	let document: KdlDocument = contents.parse()?;

	let discord_node = required_child(&document, "discord")?;
	let bot_token = match child_document(discord_node).and_then(|children| first_argument_of(children, "bot_token")) {
		Some(value) => match value.as_string() {
			Some(token) => token.to_string(),
			None => bail!("`discord.bot_token` must be a string"),
		},
		None => String::new(),
	};

	let channels_node = required_child(&document, "channels")?;
	let Some(channels_document) = child_document(channels_node) else {
		bail!("`channels` must contain the `log`, `ticket_panel`, and `ticket_category` channels");
	};
	let channels = ChannelConfig {
		log: required_id(channels_document, "log")?,
		ticket_panel: required_id(channels_document, "ticket_panel")?,
		ticket_category: required_id(channels_document, "ticket_category")?,
	};

	let staff_roles_node = required_child(&document, "staff_roles")?;
	let staff_roles = arguments(staff_roles_node)
		.map(|value| id_from_value(value, "staff_roles"))
		.collect::<miette::Result<Vec<Id<RoleMarker>>>>()?;
	ensure!(!staff_roles.is_empty(), "`staff_roles` must list at least one role");

	let topics = match document.get("topics") {
		Some(node) => parse_topics(node)?,
		None => default_topics(),
	};

	let log_file = match first_argument_of(&document, "log_file") {
		Some(value) => match value.as_string() {
			Some(path) => PathBuf::from(path),
			None => bail!("`log_file` must be a string"),
		},
		None => PathBuf::from(DEFAULT_LOG_FILE),
	};

	let transcript_limit = match first_argument_of(&document, "transcript_limit") {
		Some(value) => {
			let limit = value
				.as_integer()
				.and_then(|limit| u16::try_from(limit).ok())
				.ok_or_else(|| miette!("`transcript_limit` must be a positive integer"))?;
			ensure!(
				(1..=MAX_TRANSCRIPT_LIMIT).contains(&limit),
				"`transcript_limit` must be between 1 and {}",
				MAX_TRANSCRIPT_LIMIT
			);
			limit
		}
		None => MAX_TRANSCRIPT_LIMIT,
	};

	Ok(ConfigData {
		discord: DiscordConfig { bot_token },
		channels,
		staff_roles,
		topics,
		log_file,
		transcript_limit,
	})
}

fn parse_topics(topics_node: &KdlNode) -> miette::Result<Vec<Topic>> {
	let Some(topics_document) = child_document(topics_node) else {
		bail!("`topics` must contain at least one `topic`");
	};

	let mut topics = Vec::new();
	let mut seen_ids = HashSet::new();
	for node in topics_document.nodes() {
		ensure!(
			node.name().value() == "topic",
			"Unexpected node `{}` in `topics`",
			node.name().value()
		);
		let Some(id) = arguments(node).next().and_then(|value| value.as_string()) else {
			bail!("Each `topic` needs a string identifier");
		};
		ensure!(
			!id.is_empty() && !id.contains(':'),
			"Topic identifier {:?} must be non-empty and may not contain `:`",
			id
		);
		ensure!(seen_ids.insert(id.to_string()), "Topic {:?} is configured twice", id);

		let label = node
			.entries()
			.iter()
			.find(|entry| entry.name().map(|name| name.value()) == Some("label"))
			.and_then(|entry| entry.value().as_string())
			.unwrap_or(id);
		topics.push(Topic::new(id, label));
	}

	ensure!(!topics.is_empty(), "`topics` must contain at least one `topic`");
	ensure!(
		topics.len() <= MAX_TOPICS,
		"At most {} topics can be configured ({} given)",
		MAX_TOPICS,
		topics.len()
	);
	Ok(topics)
}

fn required_child<'a>(document: &'a KdlDocument, name: &str) -> miette::Result<&'a KdlNode> {
	document
		.get(name)
		.ok_or_else(|| miette!("Missing `{}` in configuration", name))
}

fn child_document(node: &KdlNode) -> Option<&KdlDocument> {
	node.children()
}

/// Positional arguments of a node, skipping properties.
fn arguments(node: &KdlNode) -> impl Iterator<Item = &KdlValue> {
	node.entries()
		.iter()
		.filter(|entry| entry.name().is_none())
		.map(|entry| entry.value())
}

fn first_argument_of<'a>(document: &'a KdlDocument, name: &str) -> Option<&'a KdlValue> {
	document.get(name).and_then(|node| arguments(node).next())
}

fn required_id<T>(document: &KdlDocument, name: &str) -> miette::Result<Id<T>> {
	let Some(value) = first_argument_of(document, name) else {
		bail!("Missing channel `{}` in `channels`", name);
	};
	id_from_value(value, name)
}

fn id_from_value<T>(value: &KdlValue, name: &str) -> miette::Result<Id<T>> {
	value
		.as_integer()
		.and_then(|id| u64::try_from(id).ok())
		.and_then(Id::new_checked)
		.ok_or_else(|| miette!("`{}` must be a non-zero Discord ID", name))
}
