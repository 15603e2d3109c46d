pub mod gateway;
pub mod latency;
pub mod rest;
pub mod types;

pub use gateway::{run_gateway, GatewayConfig};
pub use latency::GatewayStatus;
pub use rest::{ChannelReply, DiscordRest};
