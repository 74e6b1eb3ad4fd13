// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::guild::Permissions;
use twilight_model::id::marker::{GuildMarker, RoleMarker, UserMarker};
use twilight_model::id::Id;

/// Generates the access control list for a ticket channel: the requester and staff can see it, nobody else can.
pub fn ticket_channel_overwrites(
	guild_id: Id<GuildMarker>,
	requester: Id<UserMarker>,
	staff_roles: &[Id<RoleMarker>],
) -> Vec<PermissionOverwrite> {
	let mut overwrites = vec![PermissionOverwrite {
		allow: Permissions::VIEW_CHANNEL,
		deny: Permissions::empty(),
		id: requester.cast(),
		kind: PermissionOverwriteType::Member,
	}];
	overwrites.extend(staff_roles.iter().map(|role_id| PermissionOverwrite {
		allow: Permissions::VIEW_CHANNEL,
		deny: Permissions::empty(),
		id: role_id.cast(),
		kind: PermissionOverwriteType::Role,
	}));

	// The @everyone role shares its ID with the guild.
	let everyone_role_id: Id<RoleMarker> = guild_id.cast();
	overwrites.push(PermissionOverwrite {
		allow: Permissions::empty(),
		deny: Permissions::VIEW_CHANNEL,
		id: everyone_role_id.cast(),
		kind: PermissionOverwriteType::Role,
	});
	overwrites
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn everyone_is_denied_and_staff_allowed() {
		let guild_id = Id::new(10);
		let overwrites = ticket_channel_overwrites(guild_id, Id::new(1), &[Id::new(2), Id::new(3)]);
		assert_eq!(overwrites.len(), 4);

		assert_eq!(overwrites[0].id.get(), 1);
		assert_eq!(overwrites[0].kind, PermissionOverwriteType::Member);
		assert_eq!(overwrites[0].allow, Permissions::VIEW_CHANNEL);
		for staff in &overwrites[1..3] {
			assert_eq!(staff.kind, PermissionOverwriteType::Role);
			assert_eq!(staff.allow, Permissions::VIEW_CHANNEL);
			assert!(staff.deny.is_empty());
		}

		let everyone = &overwrites[3];
		assert_eq!(everyone.id.get(), 10);
		assert_eq!(everyone.deny, Permissions::VIEW_CHANNEL);
		assert!(everyone.allow.is_empty());
	}
}
