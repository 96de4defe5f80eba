//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to               |
//! |-------------|---------------------|---------------------------|
//! | `hardware`  | LinePort            | ESP32 GPIO (shadow latch) |
//! |             | DelayNs             | forwards to `delay`       |
//! | `delay`     | DelayNs             | ESP-IDF delay / sleep     |
//! | `log_sink`  | EventSink           | Serial log output         |

pub mod delay;
pub mod hardware;
pub mod log_sink;
