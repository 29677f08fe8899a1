//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                               | Connects to           |
//! |------------|------------------------------------------|-----------------------|
//! | `log_sink` | EventSink                                | `log` facade          |
//! | `sim`      | Motor, valve, sensor, telemetry, driver  | In-memory plant model |
//! |            | ports; embedded-hal InputPin / OutputPin |                       |

pub mod log_sink;
pub mod sim;
