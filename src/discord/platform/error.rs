// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use std::fmt;
use twilight_gateway::error::ChannelError;
use twilight_http::error::Error;
use twilight_http::response::DeserializeBodyError;
use twilight_model::gateway::payload::outgoing::update_presence::UpdatePresenceError;
use twilight_validate::embed::EmbedValidationError;

/// Error data for a failed call to the chat platform
#[derive(Debug, Diagnostic)]
pub enum PlatformError {
	Http(Error),
	Deserialize(DeserializeBodyError),
	Gateway(ChannelError),
	Presence(UpdatePresenceError),
	Embed(EmbedValidationError),
	/// The platform refused the request without a more specific error.
	Rejected(String),
}

impl From<Error> for PlatformError {
	fn from(error: Error) -> Self {
		Self::Http(error)
	}
}

impl From<DeserializeBodyError> for PlatformError {
	fn from(error: DeserializeBodyError) -> Self {
		Self::Deserialize(error)
	}
}

impl From<ChannelError> for PlatformError {
	fn from(error: ChannelError) -> Self {
		Self::Gateway(error)
	}
}

impl From<UpdatePresenceError> for PlatformError {
	fn from(error: UpdatePresenceError) -> Self {
		Self::Presence(error)
	}
}

impl From<EmbedValidationError> for PlatformError {
	fn from(error: EmbedValidationError) -> Self {
		Self::Embed(error)
	}
}

impl std::error::Error for PlatformError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Http(error) => Some(error),
			Self::Deserialize(error) => Some(error),
			Self::Gateway(error) => Some(error),
			Self::Presence(error) => Some(error),
			Self::Embed(error) => Some(error),
			Self::Rejected(_) => None,
		}
	}
}

impl fmt::Display for PlatformError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http(error) => write!(f, "HTTP error: {}", error),
			Self::Deserialize(error) => write!(f, "deserialization error: {}", error),
			Self::Gateway(error) => write!(f, "gateway error: {}", error),
			Self::Presence(error) => write!(f, "invalid presence: {}", error),
			Self::Embed(error) => write!(f, "invalid embed: {}", error),
			Self::Rejected(reason) => write!(f, "request rejected: {}", reason),
		}
	}
}
