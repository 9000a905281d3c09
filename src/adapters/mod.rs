//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements | Connects to                      |
//! |------------|------------|----------------------------------|
//! | `log_sink` | EventSink  | Serial log output / test capture |
//! | `radio`    | RadioPort  | Log output (no radio stack)      |
//! | `time`     | —          | ESP32 system timer / host clock  |

pub mod log_sink;
pub mod radio;
pub mod time;
