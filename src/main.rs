mod batch;
mod config;
mod error;
mod mail;
mod recipient;
mod render;
mod template;
mod tools;

#[macro_use]
extern crate log;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::batch::orchestrator::Orchestrator;
use crate::config::arguments::RunArguments;
use crate::config::{Config, load_config};
use crate::error::ApplicationError::{Confirmation, MailerSetup, NoRecipients};
use crate::error::Result;
use crate::mail::smtp::SmtpMailer;
use crate::recipient::Recipient;
use crate::recipient::load::load_recipients;
use crate::render::Renderer;
use crate::render::font::FontResolver;
use crate::tools::log_message_and_return;

const DEFAULT_OUTPUT_DIR: &str = "output";
const CONFIRMATION_PROMPT: &str = "Proceed to generate and send certificates? (yes/no) [no]: ";

fn main() -> ExitCode {
    env_logger::init();

    println!("Certificate Mailer - starting...\n");
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#?}");
            println!("ERROR: {e}");
            if let Some(hint) = e.hint() {
                println!("\n{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let arguments = RunArguments::from_env_args();
    debug!("Running with {arguments:?}");

    let config = load_config(arguments.config_path())?;
    let recipients = load_recipients(arguments.recipients_path())?;
    if recipients.is_empty() {
        return Err(NoRecipients(arguments.recipients_path().clone()));
    }

    let output_dir = arguments
        .output_dir()
        .clone()
        .or_else(|| config.output_dir().clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let renderer = Renderer::new(output_dir, FontResolver::system());
    print_pre_run_summary(&config, &recipients, renderer.output_dir());

    if !*arguments.assume_yes() && !ask_confirmation()? {
        println!("Aborted by user.");
        return Ok(());
    }

    let mailer = SmtpMailer::new(config.smtp()).map_err(MailerSetup)?;
    let result = Orchestrator::new(config.registry(), &renderer, &mailer).run(&recipients);

    println!("\n--- Summary ---\n{result}\nFinished.");
    if !result.is_complete_success() {
        warn!("{} certificate(s) couldn't be delivered.", result.failed());
    }
    Ok(())
}

fn print_pre_run_summary(config: &Config, recipients: &[Recipient], output_dir: &Path) {
    for (group, descriptor) in config.registry().descriptors() {
        println!("Template [{group}]: {}", descriptor.image().display());
    }
    println!("Recipients found: {}", recipients.len());
    println!("Output folder: {}", display_absolute(output_dir));
    println!("Sending as: {}\n", config.smtp().sender_address());
}

fn display_absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(log_message_and_return(
            "Can't resolve output folder",
            path.to_path_buf(),
        ))
        .display()
        .to_string()
}

fn ask_confirmation() -> Result<bool> {
    print!("{CONFIRMATION_PROMPT}");
    std::io::stdout().flush().map_err(Confirmation)?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(Confirmation)?;
    Ok(is_confirmation(&answer))
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    #[parameterized(
        answer = {"yes", "y", "YES", " Y\n", "Yes\r\n"}
    )]
    fn should_accept_confirmation(answer: &str) {
        assert!(is_confirmation(answer));
    }

    #[parameterized(
        answer = {"", "\n", "no", "n", "yep", "sure"}
    )]
    fn should_refuse_anything_else(answer: &str) {
        assert!(!is_confirmation(answer));
    }
}
