// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::platform::Platform;
use crate::discord::utils::tickets::TicketMessageData;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use twilight_model::id::marker::ChannelMarker;
use twilight_model::id::Id;

/// Records bot activity to the console, an append-only log file, and (for notices) a log channel.
pub struct LogSink {
	file_path: PathBuf,
	notify_channel: Id<ChannelMarker>,
	platform: Arc<dyn Platform>,
}

impl LogSink {
	pub fn new(file_path: PathBuf, notify_channel: Id<ChannelMarker>, platform: Arc<dyn Platform>) -> Self {
		Self {
			file_path,
			notify_channel,
			platform,
		}
	}

	pub fn file_path(&self) -> &Path {
		&self.file_path
	}

	/// Writes the message to the console and the log file. Failing to write the file is reported to the console only.
	pub async fn record(&self, message: &str) {
		tracing::info!("{}", message);
		let line = format_log_line(Utc::now(), message);
		if let Err(error) = append_line(&self.file_path, &line).await {
			tracing::error!(source = ?error, path = %self.file_path.display(), "Failed to write to the log file");
		}
	}

	/// Records the message, and also posts it to the log channel.
	pub async fn notify(&self, message: &str) {
		self.record(message).await;
		let notice = TicketMessageData::plain(message);
		if let Err(error) = self.platform.send_message(self.notify_channel, &notice).await {
			tracing::warn!(source = ?error, "Failed to send a notice to the log channel");
		}
	}
}

pub fn format_log_line(timestamp: DateTime<Utc>, message: &str) -> String {
	format!("[{}] {}\n", timestamp.to_rfc3339_opts(SecondsFormat::Millis, true), message)
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
	let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
	file.write_all(line.as_bytes()).await?;
	file.flush().await
}
