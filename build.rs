//! Build script for the Parchment host layer
//!
//! Embeds build-time information (git commit, dirty status, build timestamp)
//! shown by `parchment status`.

fn main() {
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build info");
}
