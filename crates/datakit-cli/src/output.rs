//! Human vs machine-readable printing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print `value` as pretty JSON, or the `human` rendering.
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        human: impl FnOnce() -> String,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            let text = human();
            if text.ends_with('\n') {
                print!("{text}");
            } else {
                println!("{text}");
            }
        }
        Ok(())
    }

    /// Report a failed command on the matching stream.
    pub fn error(&self, e: &anyhow::Error) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": true,
                    "message": format!("{e:#}"),
                })
            );
        } else {
            eprintln!("  Error: {e:#}");
        }
    }
}
