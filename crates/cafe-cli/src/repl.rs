//! Console channel.
//!
//! Turns each line typed at the prompt into a message activity, runs it
//! through the bot and prints the replies.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use cafe_core::router;
use cafe_core::{Activity, Bot, ChannelAccount, TurnContext};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::error;

/// rustyline helper completing and hinting the phrases the bot understands.
#[derive(Clone)]
struct CliHelper {
    phrases: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            phrases: router::known_phrases()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    fn is_phrase(&self, line: &str) -> bool {
        let normalized = router::normalize(line);
        self.phrases.iter().any(|phrase| *phrase == normalized)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = line[..pos].to_lowercase();
        if line.trim().is_empty() {
            return Ok((0, vec![]));
        }

        let candidates = self
            .phrases
            .iter()
            .filter(|phrase| phrase.starts_with(&line))
            .map(|phrase| Pair {
                display: phrase.clone(),
                replacement: phrase.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.is_phrase(line) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || line.trim().is_empty() {
            return None;
        }
        let lower = line.to_lowercase();
        self.phrases
            .iter()
            .find(|phrase| phrase.starts_with(&lower) && phrase.len() > lower.len())
            .map(|phrase| phrase[lower.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Interactive session between one console user and a bot.
pub struct Repl {
    bot: Arc<dyn Bot>,
    conversation_id: String,
    user: ChannelAccount,
    bot_account: ChannelAccount,
}

impl Repl {
    pub fn new(bot: Arc<dyn Bot>, conversation_id: impl Into<String>, user_name: &str) -> Self {
        Self {
            bot,
            conversation_id: conversation_id.into(),
            user: ChannelAccount::new("console-user", user_name),
            bot_account: ChannelAccount::new("bot", "Contoso Cafe"),
        }
    }

    async fn turn(&self, activity: Activity) {
        let mut ctx = TurnContext::new(activity);
        match self.bot.on_turn(&mut ctx).await {
            Ok(()) => {
                for reply in ctx.into_responses() {
                    for line in reply.lines() {
                        println!("{}", line.bright_blue());
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "turn failed");
                eprintln!("{}", format!("Error: {}", e).red());
            }
        }
    }

    pub async fn run(&self) -> Result<()> {
        let mut rl = Editor::new()?;
        rl.set_helper(Some(CliHelper::new()));

        println!("{}", "=== Contoso Cafe ===".bright_magenta().bold());
        println!(
            "{}",
            "Type 'help' to see what I can do, or 'quit' to exit.".bright_black()
        );
        println!();

        self.turn(Activity::conversation_update(
            self.conversation_id.clone(),
            self.user.clone(),
            self.bot_account.clone(),
            vec![self.user.clone()],
        ))
        .await;

        loop {
            match rl.readline(">> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == "quit" || trimmed == "exit" {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(&line);

                    self.turn(Activity::message(
                        self.conversation_id.clone(),
                        self.user.clone(),
                        self.bot_account.clone(),
                        trimmed,
                    ))
                    .await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "CTRL-D detected. Exiting...".bright_green());
                    break;
                }
                Err(err) => {
                    eprintln!("{}", format!("Error: {:?}", err).red());
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_recognizes_router_phrases() {
        let helper = CliHelper::new();
        assert!(helper.is_phrase("Book a table!"));
        assert!(helper.is_phrase("start over"));
        assert!(!helper.is_phrase("book a tab"));
    }
}
