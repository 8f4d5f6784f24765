//! Verification gate: unverified members are redirected into the
//! verification flow before their messages reach command routing.

use serenity::model::channel::Message;
use serenity::model::id::{ChannelId, RoleId};
use serenity::prelude::Context;

use crate::constants::GuildConstants;

/// True iff the author must be sent through verification: there is a guild
/// member context, the member lacks the verified role, and the message is
/// not already in the introductions channel. Direct messages carry no member
/// context and never gate.
pub fn should_verify(
    member_roles: Option<&[RoleId]>,
    channel: ChannelId,
    constants: &GuildConstants,
) -> bool {
    let Some(roles) = member_roles else {
        return false;
    };
    !roles.contains(&constants.verified_role) && channel != constants.introductions_channel
}

/// Hand the author off to the verification flow. The flow itself lives
/// outside this process; the hand-off points the author at the
/// introductions channel.
pub async fn begin_verification(ctx: &Context, msg: &Message, constants: &GuildConstants) {
    let text = format!(
        "Welcome! Before chatting anywhere else, introduce yourself in <#{}> to get verified.",
        constants.introductions_channel
    );
    if let Err(e) = msg.reply(&ctx.http, text).await {
        tracing::warn!(target: "verify", user_id = %msg.author.id, error = ?e, "failed to send verification hand-off");
    }
}
