//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                      |
//! |----------------|--------------------|----------------------------------|
//! | `hardware`     | InputPort          | Buttons (GPIO), encoder decoder  |
//! |                | DisplayPort        | TM1637 4-digit display           |
//! |                | OutputPort         | UV relay, buzzer                 |
//! | `log_sink`     | EventSink          | Serial log output                |
//! | `time`         | —                  | ESP32 system timer               |

pub mod hardware;
pub mod log_sink;
pub mod time;
