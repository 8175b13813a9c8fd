
pub mod warn;
pub mod warnings;
pub mod clear_warnings;
pub mod ban;
pub mod unban;
pub mod kick;
pub mod mute;
pub mod unmute;
