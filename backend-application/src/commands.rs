pub mod hint_commands;
pub mod moderation_commands;
pub mod promotion_commands;
pub mod report_commands;
pub mod request_commands;
pub mod sweep_commands;
