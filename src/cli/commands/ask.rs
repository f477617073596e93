//! Ask command implementation.

use super::build_engine;
use crate::cli::Output;
use crate::config::Settings;
use crate::language::Language;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(question: &str, language: Option<String>, settings: Settings) -> Result<()> {
    let language_override = match language {
        Some(code) => Some(
            code.parse::<Language>()
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        ),
        None => None,
    };

    let engine = build_engine(&settings)?;

    let spinner = Output::spinner("Seeking guidance...");
    match engine.ask(question, language_override).await {
        Ok(answer) => {
            spinner.finish_and_clear();

            println!("\n{}\n", answer.answer);

            if !answer.sources.is_empty() {
                Output::header("Sources");
                for source in &answer.sources {
                    Output::list_item(source);
                }
            }

            Output::header("Disclaimer");
            println!("  {}", answer.disclaimer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to answer question: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
