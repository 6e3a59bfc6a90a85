/// A message claimed from a durable queue by a consumer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QueueMessage {
    pub id: i64,
    pub queue: String,
    pub body: Vec<u8>,
    /// How many times this message has been handed to a consumer, including this one.
    pub delivery_count: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Ready,
    Delivered,
    Rejected,
}

impl MessageStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Rejected => "rejected",
        }
    }
}
