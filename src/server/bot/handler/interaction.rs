use serenity::all::{Context, Interaction};

use crate::server::bot::{command, handler::Handler};

/// Routes a slash command to its implementation.
///
/// Errors are logged and reported back to the user; the interaction is never left without a
/// response if it can be helped.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    tracing::debug!(
        "Slash command /{} from {}",
        command.data.name,
        command.user.name
    );

    if let Err(e) = command::run(handler, &ctx, &command).await {
        tracing::error!("Slash command /{} failed: {}", command.data.name, e);
        command::report_failure(&ctx, &command, &e).await;
    }
}
