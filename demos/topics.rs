//! Builds an MQTT matcher from a TOML config and routes a few topics through it.
//!
//! Run with `cargo run --example topics [config.toml]`; set `RUST_LOG` to
//! change what is logged.
use segmatch::{Matcher, MatcherConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG: &str = r#"
strategy = "mqtt"

[[patterns]]
pattern = "iot/bms/things/+/up/props"

[[patterns]]
pattern = "iot/bms/things/+/up/ota/+"

[[patterns]]
pattern = "iot/bms/things/gateway/#"
priority = -1

[[patterns]]
pattern = "iot/bms/#"
priority = 10
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "segmatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => MatcherConfig::load(path)?,
        None => MatcherConfig::from_toml(CONFIG)?,
    };

    let mut matcher = Matcher::from_config(&config)?;
    matcher.insert_with_payload("iot/bms/things/+/up/props", "store properties")?;
    matcher.insert_with_payload("iot/bms/things/+/up/ota/+", "forward to ota service")?;
    matcher.insert_with_payload("iot/bms/#", "archive")?;

    println!("{matcher:?}");

    for topic in [
        "iot/bms/things/edge1/up/props",
        "iot/bms/things/edge1/up/ota/upgradePost",
        "iot/bms/things/gateway/up/props",
        "iot/bms/meters/m1",
        "sys/broker/uptime",
    ] {
        match matcher.match_positional(topic) {
            Some(matched) => println!(
                "{topic} -> {} {:?} {:?}",
                matched.pattern, matched.params, matched.payloads
            ),
            None => println!("{topic} -> no match"),
        }

        for matched in matcher.match_all(topic).iter().skip(1) {
            println!("    also {} {:?}", matched.pattern, matched.params);
        }
    }

    Ok(())
}
