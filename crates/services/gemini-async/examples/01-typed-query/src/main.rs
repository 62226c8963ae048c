//! Typed query example: asks for prefecture populations and prints the typed result.
//!
//! Requires `GEMINI_API_KEY` in the environment. Retry warnings are printed by the
//! default `tracing_subscriber` formatter.

use gemini_async::{Client, GeminiConfig, TypedValue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = Client::with_config(GeminiConfig::new());

    let query = "Return the current population of Kyoto, Osaka, Aichi, Fukuoka, Tokyo in Japan \
                 as JSON data with the format that the key and values are the prefecture name \
                 and the population, respectively.";

    println!("Asking Gemini...");
    match client.typed().run(query).await? {
        TypedValue::Object(map) => {
            for (prefecture, population) in &map {
                println!("{prefecture}: {population}");
            }
        }
        TypedValue::Lines(lines) => {
            println!("Model answered in plain text:");
            for line in lines {
                println!("  {line}");
            }
        }
        TypedValue::NoValues => println!("No values."),
        other => println!("{}", serde_json::to_string_pretty(&other.into_json())?),
    }

    Ok(())
}
