use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

/// Ask a yes/no question on stderr and read the answer from stdin.
///
/// Anything but an explicit yes counts as no, including end of input.
pub async fn ask(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{prompt} [s/N] ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(is_affirmative(&line))
}

#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}
