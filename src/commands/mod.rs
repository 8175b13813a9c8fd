
pub mod command_manager;

pub mod command;
pub use command::{Command, CommandParams, UserDecorator};

// ---- src/commands/allowlist/ ---- //

pub mod allowlist;

pub use allowlist::apply::ApplyCommand;
pub use allowlist::add::DirectAddCommand;
pub use allowlist::remove::RemoveCommand;
pub use allowlist::check::CheckCommand;
pub use allowlist::list::ListCommand;
pub use allowlist::review::ReviewCommand;
pub use allowlist::configure::ConfigureCommand;

// ---- src/commands/moderation/ ---- //

pub mod moderation;

pub use moderation::warn::WarnCommand;
pub use moderation::warnings::WarningsCommand;
pub use moderation::clear_warnings::ClearWarningsCommand;
pub use moderation::ban::BanCommand;
pub use moderation::unban::UnbanCommand;
pub use moderation::kick::KickCommand;
pub use moderation::mute::MuteCommand;
pub use moderation::unmute::UnmuteCommand;

// ---- src/commands/suggestions/ ---- //

#[cfg(feature = "suggestions")]
pub mod suggestions;

#[cfg(feature = "suggestions")]
pub use suggestions::suggest::SuggestCommand;
#[cfg(feature = "suggestions")]
pub use suggestions::resolve::ResolveSuggestionCommand;

// ---- src/commands/announcements/ ---- //

#[cfg(feature = "announcements")]
pub mod announcements;

#[cfg(feature = "announcements")]
pub use announcements::announce::AnnounceCommand;
#[cfg(feature = "announcements")]
pub use announcements::embed::EmbedCommand;

// ---- src/commands/casual/ ---- //

pub mod casual;

pub use casual::about::AboutCommand;
