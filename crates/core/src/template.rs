//! The greeting/sign-off wrapper around an accepted devotional body.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub greeting: String,
    pub sign_off: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            greeting: "Olá, irmãos e irmãs!🙏\n\nHoje preparei uma palavra de Deus para vocês:"
                .to_owned(),
            sign_off: "Reserve um momento pra meditar.\nDeus é contigo.🤍".to_owned(),
        }
    }
}

impl MessageTemplate {
    /// Wrap `body` into the user-facing message. Blank-line separated, trimmed.
    #[must_use]
    pub fn render(&self, body: &str) -> String {
        format!("{}\n\n{}\n\n{}", self.greeting.trim(), body.trim(), self.sign_off.trim())
            .trim()
            .to_owned()
    }
}
