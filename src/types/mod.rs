mod ids;
mod timestamp;

pub use ids::{TransactionId, UserId};
pub use timestamp::{parse_timestamp, Timestamp};

pub(crate) use timestamp::deserialize_timestamp;
