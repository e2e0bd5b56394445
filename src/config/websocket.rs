//! WebSocket configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound on per-room broadcast buffers.
const MAX_CHANNEL_CAPACITY: usize = 4096;

/// WebSocket relay configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    /// Buffer size for each flat room's broadcast channel.
    ///
    /// Larger values absorb bursts at the cost of memory; clients that lag
    /// past the buffer miss the oldest frames (delivery is best-effort).
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl WebSocketConfig {
    /// Validate websocket configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        if self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(ValidationError::ChannelCapacityTooLarge);
        }
        Ok(())
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_valid() {
        let config = WebSocketConfig::default();
        assert_eq!(config.channel_capacity, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_fails_validation() {
        let config = WebSocketConfig {
            channel_capacity: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidChannelCapacity)
        ));
    }

    #[test]
    fn oversized_capacity_fails_validation() {
        let config = WebSocketConfig {
            channel_capacity: 10_000,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ChannelCapacityTooLarge)
        ));
    }
}
