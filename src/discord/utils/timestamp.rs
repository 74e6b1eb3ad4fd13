// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, TimeZone, Utc};
use twilight_model::id::marker::MessageMarker;
use twilight_model::id::Id;
use twilight_model::util::datetime::Timestamp;
use twilight_util::snowflake::Snowflake;

/// Gets the timestamp from the ID snowflake. If any failures occur in the conversion, returns `None`.
pub fn datetime_from_id(id: impl Snowflake) -> Option<DateTime<Utc>> {
	let timestamp = id.timestamp();
	Utc.timestamp_millis_opt(timestamp).single()
}

/// Gets the [DateTime] object for a timestamp from Discord. If any failures occur in the conversion, returns `None`.
pub fn datetime_from_timestamp(timestamp: &Timestamp) -> Option<DateTime<Utc>> {
	let micros = timestamp.as_micros();
	Utc.timestamp_micros(micros).single()
}

/// Gets when a message was sent, preferring the message's own timestamp over the one encoded in its ID.
pub fn message_sent_at(message_id: Id<MessageMarker>, timestamp: &Timestamp) -> DateTime<Utc> {
	datetime_from_timestamp(timestamp)
		.or_else(|| datetime_from_id(message_id))
		.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
