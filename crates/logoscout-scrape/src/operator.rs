use async_trait::async_trait;
use console::{style, Term};
use std::io;

/// A named synchronization point where the pipeline suspends until a human
/// signals completion. There is deliberately no timeout: the run cannot make
/// progress past a CAPTCHA or an unselected image without the operator, so
/// it waits as long as it takes.
#[async_trait]
pub trait OperatorPrompt: Send + Sync {
    /// Show the instruction and block until the operator acknowledges it.
    async fn acknowledge(&self, message: &str) -> io::Result<()>;
}

/// Prompts on the controlling terminal, resumed by Enter. The read happens on
/// a blocking thread so the CDP handler keeps servicing the browser while the
/// pipeline waits.
pub struct TerminalPrompt;

#[async_trait]
impl OperatorPrompt for TerminalPrompt {
    async fn acknowledge(&self, message: &str) -> io::Result<()> {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            let term = Term::stdout();
            term.write_line(&style(message).bold().yellow().to_string())?;
            term.write_line("Press Enter when done...")?;
            term.read_line()?;
            Ok(())
        })
        .await
        .map_err(io::Error::other)?
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Auto-acknowledging operator for tests: never blocks, counts prompts.
    pub struct AutoAck {
        pub prompts: AtomicUsize,
    }

    impl AutoAck {
        pub fn new() -> Self {
            Self {
                prompts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl OperatorPrompt for AutoAck {
        async fn acknowledge(&self, _message: &str) -> io::Result<()> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
