//! services/client/src/adapters/console.rs
//!
//! Terminal stand-ins for the browser's alert and confirm dialogs.

use skimmly_core::ports::{Confirmer, Notifier};
use std::io::{self, BufRead, Write};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, message: &str) {
        println!("{}", message);
    }
}

pub struct ConsoleConfirmer {
    /// Answer yes without asking.
    pub assume_yes: bool,
}

impl Confirmer for ConsoleConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}
