/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune.toml
    let config = rune_config::RuneConfig::load();

    println!("=== Rune Stack Configuration ===\n");

    println!("Stack Settings:");
    println!("  Mode: {:?}", config.stack.mode);
    println!("  Header Mode: {:?}", config.stack.header_mode);
    println!("  Platform: {:?}", config.stack.platform);
    println!("  Gestures Enabled: {}", config.gestures_enabled());
    println!("  Native Driver Available: {}", config.stack.native_driver_available);
    println!("  Seed: {:?}", config.stack.seed);
    println!();

    println!("Gesture Settings:");
    println!("  Response Distance: {}", config.gesture.response_distance);
    println!("  Position Threshold: {}", config.gesture.position_threshold);
    println!("  Velocity Threshold: {}", config.gesture.velocity_threshold);
    println!("  Settle Duration: {}ms", config.gesture.settle_duration_ms);
    println!();

    println!("Timing Settings:");
    println!("  Duration: {}ms", config.timing.duration_ms);
    println!("  Easing: {:?}", config.timing.easing);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
