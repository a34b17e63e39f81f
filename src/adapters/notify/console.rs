//! Console notifier. Local-alert analog: prints a colored alert line to
//! the terminal.

use crate::domain::DomainError;
use crate::ports::NotifierPort;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;
use std::io::{stdout, Write};

pub struct ConsoleNotifier;

#[async_trait::async_trait]
impl NotifierPort for ConsoleNotifier {
    async fn notify(&self, title: &str, body: &str) -> Result<(), DomainError> {
        let mut out = stdout();
        out.execute(SetForegroundColor(Color::Yellow))
            .map_err(dispatch_err)?;
        out.execute(Print(format!("\r\n[{}] ", title)))
            .map_err(dispatch_err)?;
        out.execute(ResetColor).map_err(dispatch_err)?;
        out.execute(Print(format!("{}\r\n", body)))
            .map_err(dispatch_err)?;
        out.flush().map_err(dispatch_err)?;
        Ok(())
    }
}

fn dispatch_err(e: std::io::Error) -> DomainError {
    DomainError::Dispatch(e.to_string())
}
