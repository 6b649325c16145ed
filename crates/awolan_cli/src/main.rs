//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `awolan_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("awolan_core ping={}", awolan_core::ping());
    println!("awolan_core version={}", awolan_core::core_version());
}
