//! Interactive console.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use vdx_client::VdxClient;
use vdx_data::Channel;
use vdx_protocol::Command;

use crate::commands::{format_dataset, parse_params};

const HELP_TEXT: &str = r#"
Available commands:
  help                        Show this help
  types                       List registered data types

  text key=value [...]        Run a text query and print the lines
  binary key=value [...]      Run a binary query and summarize the dataset
  channels <source>           List the channels of a data source

  quit, exit                  Exit the console
"#;

pub async fn run(mut client: VdxClient, server: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "VDX console".bold().cyan());
    println!("Connecting to {}...", server);

    client.connect().await?;
    println!("{}", "Connected!".green());

    // Create readline editor
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    // Load history
    let history_path = std::env::var("HOME")
        .map(|h| std::path::PathBuf::from(h).join(".vdx_history"))
        .unwrap_or_else(|_| ".vdx_history".into());
    let _ = rl.load_history(&history_path);

    println!("Type 'help' for available commands.\n");

    loop {
        let prompt = format!("{} ", "vdx>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match execute_repl_command(&mut client, line).await {
                    Ok(Some(output)) => println!("{}\n", output),
                    Ok(None) => break, // Exit command
                    Err(e) => println!("{}: {}\n", "Error".red(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&history_path);

    client.close().await;
    println!("{}", "Disconnected.".dimmed());

    Ok(())
}

async fn execute_repl_command(
    client: &mut VdxClient,
    line: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(Some(String::new()));
    }

    let cmd = parts[0].to_lowercase();
    let args = &parts[1..];

    match cmd.as_str() {
        "help" | "?" => Ok(Some(HELP_TEXT.to_string())),

        "quit" | "exit" | "q" => Ok(None),

        "types" => {
            let tags = client.registry().tags();
            Ok(Some(tags.join("\n")))
        }

        "text" | "t" => {
            if args.is_empty() {
                return Ok(Some("Usage: text key=value [key=value ...]".to_string()));
            }
            let command = parse_params(args)?;
            let lines = client.get_text_data(&command).await?;
            if lines.is_empty() {
                return Ok(Some("No lines returned".yellow().to_string()));
            }
            Ok(Some(lines.join("\n")))
        }

        "binary" | "b" => {
            if args.is_empty() {
                return Ok(Some("Usage: binary key=value [key=value ...]".to_string()));
            }
            let command = parse_params(args)?;
            let dataset = client.get_binary_data(&command).await?;
            Ok(Some(format_dataset(&dataset)))
        }

        "channels" | "ch" => {
            if args.is_empty() {
                return Ok(Some("Usage: channels <source>".to_string()));
            }
            let command = Command::new()
                .with("source", args[0])
                .with("action", "channels");
            let lines = client.get_text_data(&command).await?;

            let mut output = String::new();
            for line in lines.iter().filter(|l| !l.trim().is_empty()) {
                let channel: Channel = line.parse()?;
                output.push_str(&format!(
                    "  [{:>4}] {:<8} {}\n",
                    channel.id.to_string().cyan(),
                    channel.code.yellow(),
                    channel.name
                ));
            }
            if output.is_empty() {
                return Ok(Some("No channels".yellow().to_string()));
            }
            Ok(Some(output))
        }

        _ => Ok(Some(format!(
            "Unknown command: {}. Type 'help' for help.",
            cmd
        ))),
    }
}
