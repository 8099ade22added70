//! Permission providers
//!
//! Concrete answers to the permission gate: constant ones for platforms
//! without a permission model, and an interactive prompt for the terminal.

use async_trait::async_trait;
use log::{info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::config::PermissionMode;
use crate::permission::gate::{PermissionProvider, StorageAccess};

/// Provider with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission {
    granted: bool,
}

impl StaticPermission {
    pub fn granted() -> Self {
        Self { granted: true }
    }

    pub fn denied() -> Self {
        Self { granted: false }
    }
}

#[async_trait]
impl PermissionProvider for StaticPermission {
    async fn check(&self, _access: StorageAccess) -> bool {
        self.granted
    }

    async fn request(&self, _access: StorageAccess) -> bool {
        self.granted
    }
}

type PromptInput = Box<dyn AsyncBufRead + Send + Unpin>;
type PromptOutput = Box<dyn AsyncWrite + Send + Unpin>;

/// Asks the user on a terminal-like stream.
///
/// Grants are remembered for the life of the provider, like an OS keeps
/// them for the life of the app. Refusals are not remembered.
pub struct PromptPermission {
    io: Mutex<(PromptInput, PromptOutput)>,
    granted: Mutex<HashSet<StorageAccess>>,
}

impl PromptPermission {
    pub fn new(input: PromptInput, output: PromptOutput) -> Self {
        Self {
            io: Mutex::new((input, output)),
            granted: Mutex::new(HashSet::new()),
        }
    }

    /// Prompt on the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(
            Box::new(BufReader::new(tokio::io::stdin())),
            Box::new(tokio::io::stdout()),
        )
    }

    async fn ask(&self, access: StorageAccess) -> std::io::Result<bool> {
        let mut io = self.io.lock().await;
        let (input, output) = &mut *io;

        output
            .write_all(format!("Allow {access} access to device storage? [y/N] ").as_bytes())
            .await?;
        output.flush().await?;

        let mut line = String::new();
        input.read_line(&mut line).await?;
        let answer = line.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

#[async_trait]
impl PermissionProvider for PromptPermission {
    async fn check(&self, access: StorageAccess) -> bool {
        self.granted.lock().await.contains(&access)
    }

    async fn request(&self, access: StorageAccess) -> bool {
        match self.ask(access).await {
            Ok(true) => {
                info!("User granted storage {} access", access);
                self.granted.lock().await.insert(access);
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("Permission prompt failed: {}", e);
                false
            }
        }
    }
}

/// Build the provider selected by configuration
pub fn provider_for(mode: PermissionMode) -> Arc<dyn PermissionProvider> {
    match mode {
        PermissionMode::Granted => Arc::new(StaticPermission::granted()),
        PermissionMode::Denied => Arc::new(StaticPermission::denied()),
        PermissionMode::Prompt => Arc::new(PromptPermission::stdio()),
    }
}
