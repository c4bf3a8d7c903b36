use serde::{Deserialize, Serialize};
use serde_json::Value;

/// On-disk record for one cache key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    /// Epoch seconds.
    pub created_at: f64,
    /// Seconds.
    pub ttl: u64,
}

impl CacheEntry {
    pub fn new(key: String, value: Value, ttl: u64) -> Self {
        Self {
            key,
            value,
            created_at: Self::current_timestamp(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Self::current_timestamp())
    }

    pub fn is_expired_at(&self, now: f64) -> bool {
        now > self.created_at + self.ttl as f64
    }

    pub fn current_timestamp() -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expiry_boundary() {
        let entry = CacheEntry {
            key: "k".to_string(),
            value: json!(1),
            created_at: 1000.0,
            ttl: 60,
        };

        assert!(!entry.is_expired_at(1000.0));
        assert!(!entry.is_expired_at(1060.0));
        assert!(entry.is_expired_at(1060.5));
    }
}
