//! Command execution.

use crate::Commands;
use colored::Colorize;
use vdx_client::VdxClient;
use vdx_data::{Channel, Dataset};
use vdx_protocol::Command;

/// Executes a command and returns the formatted output.
pub async fn execute(
    client: &mut VdxClient,
    cmd: Commands,
) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Repl => unreachable!(),

        Commands::Text { params } => {
            let command = parse_params(&params)?;
            let lines = client.get_text_data(&command).await?;
            if lines.is_empty() {
                return Ok("No lines returned".yellow().to_string());
            }
            Ok(lines.join("\n"))
        }

        Commands::Binary { params } => {
            let command = parse_params(&params)?;
            let dataset = client.get_binary_data(&command).await?;
            Ok(format_dataset(&dataset))
        }

        Commands::Channels { source, json } => {
            let command = Command::new()
                .with("source", source.as_str())
                .with("action", "channels");
            let lines = client.get_text_data(&command).await?;
            let mut channels = lines
                .iter()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.parse::<Channel>())
                .collect::<Result<Vec<_>, _>>()?;
            channels.sort_by_key(|c| c.id);

            if json {
                return Ok(serde_json::to_string_pretty(&channels)?);
            }
            if channels.is_empty() {
                return Ok(format!("No channels for {}", source).yellow().to_string());
            }

            let mut output = String::new();
            for channel in &channels {
                output.push_str(&format!(
                    "  [{:>4}] {:<8} {} ({:.4}, {:.4})\n",
                    channel.id.to_string().cyan(),
                    channel.code.yellow(),
                    channel.name,
                    channel.lon,
                    channel.lat
                ));
            }
            Ok(output)
        }
    }
}

/// Builds a protocol command from key=value arguments.
pub fn parse_params<I, S>(pairs: I) -> Result<Command, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut command = Command::new();
    for pair in pairs {
        let pair = pair.as_ref();
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => command.set(key, value),
            _ => return Err(format!("expected key=value, got {:?}", pair).into()),
        }
    }
    Ok(command)
}

/// Formats a short human-readable summary of a decoded dataset.
pub fn format_dataset(dataset: &Dataset) -> String {
    match dataset {
        Dataset::Wave(wave) => {
            let range = match (wave.min(), wave.max()) {
                (Some(min), Some(max)) => format!(", range {} to {}", min, max),
                _ => String::new(),
            };
            format!(
                "{}: {} samples @ {} Hz starting {}{}",
                "wave".cyan(),
                wave.len(),
                wave.sampling_rate,
                wave.start_time,
                range
            )
        }
        Dataset::Hypocenters(list) => {
            let magnitude = list
                .max_magnitude()
                .map(|m| format!(", max magnitude {:.1}", m))
                .unwrap_or_default();
            format!(
                "{}: {} events{}",
                "hypocenters".cyan(),
                list.len(),
                magnitude
            )
        }
        // Everything else is matrix-backed.
        other => format!("{}: {} rows", other.type_tag().cyan(), other.len()),
    }
}
