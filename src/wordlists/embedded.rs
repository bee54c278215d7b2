//! Embedded fallback vocabulary
//!
//! Compiled into the binary at build time so a round can always start.

// Include generated word list from build script
include!(concat!(env!("OUT_DIR"), "/fallback.rs"));
