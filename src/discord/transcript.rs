// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::platform::FetchedMessage;

const CODE_FENCE: &str = "```";
const EMPTY_TRANSCRIPT: &str = "(no messages)";

/// The rendered contents of a ticket channel, one `author: content` line per message, oldest first.
#[derive(Debug, Default)]
pub struct Transcript {
	lines: Vec<String>,
}

impl Transcript {
	pub fn from_messages(mut messages: Vec<FetchedMessage>) -> Self {
		// The platform doesn't promise any particular order.
		messages.sort_by_key(|message| (message.sent_at, message.id));
		let lines = messages
			.iter()
			.map(|message| format!("{}: {}", message.author_name, neutralize_code_fences(&message.content)))
			.collect();
		Self { lines }
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Splits the transcript into message contents no longer than `max_length` bytes. Each one holds a complete code
	/// block; the first also starts with `header` on its own line. Lines are only broken when a single line can't fit.
	pub fn to_messages(&self, header: &str, max_length: usize) -> Vec<String> {
		let header_length = header.len() + 1;
		let fence_overhead = CODE_FENCE.len() * 2 + 2;
		let piece_budget = max_length.saturating_sub(header_length + fence_overhead).max(1);

		let lines: Vec<&str> = if self.lines.is_empty() {
			vec![EMPTY_TRANSCRIPT]
		} else {
			self.lines.iter().map(|line| line.as_str()).collect()
		};

		let mut messages: Vec<String> = Vec::new();
		let mut body = String::new();
		for piece in lines.into_iter().flat_map(|line| split_to_fit(line, piece_budget)) {
			let prefix_length = if messages.is_empty() { header_length } else { 0 };
			let budget = max_length.saturating_sub(prefix_length + fence_overhead);
			let needed = if body.is_empty() {
				piece.len()
			} else {
				body.len() + 1 + piece.len()
			};
			if needed > budget && !body.is_empty() {
				let header = if messages.is_empty() { Some(header) } else { None };
				messages.push(code_block(header, &body));
				body.clear();
			}
			if !body.is_empty() {
				body.push('\n');
			}
			body.push_str(piece);
		}
		let header = if messages.is_empty() { Some(header) } else { None };
		messages.push(code_block(header, &body));
		messages
	}
}

fn code_block(header: Option<&str>, body: &str) -> String {
	match header {
		Some(header) => format!("{}\n{}\n{}\n{}", header, CODE_FENCE, body, CODE_FENCE),
		None => format!("{}\n{}\n{}", CODE_FENCE, body, CODE_FENCE),
	}
}

/// Breaks a line into pieces of at most `budget` bytes without splitting a character.
fn split_to_fit(line: &str, budget: usize) -> Vec<&str> {
	let mut pieces = Vec::new();
	let mut rest = line;
	while rest.len() > budget {
		let mut split_at = budget;
		while !rest.is_char_boundary(split_at) {
			split_at -= 1;
		}
		if split_at == 0 {
			split_at = rest.chars().next().map(char::len_utf8).unwrap_or(rest.len());
		}
		let (piece, remainder) = rest.split_at(split_at);
		pieces.push(piece);
		rest = remainder;
	}
	pieces.push(rest);
	pieces
}

/// Keeps message content from closing the transcript's code block early.
fn neutralize_code_fences(content: &str) -> String {
	content.replace('`', "`\u{200B}")
}
