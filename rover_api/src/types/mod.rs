pub mod de;
pub mod discord;
pub mod error_body;
pub mod rate_limit;
pub mod roblox;
pub mod update;

// Re-export the main types commonly used
pub use discord::{DiscordGuildMember, DiscordInfo, DiscordUser};
pub use error_body::ErrorBody;
pub use rate_limit::RateLimitInfo;
pub use roblox::RobloxInfo;
pub use update::{UpdateActions, UpdateResult};
