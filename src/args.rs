use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(about = "Load the user center for the stored session")]
pub struct Args {
    /// Base URL of the annotation API.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub host: String,

    /// Short-lived session scope. Defaults to a file in the
    /// temporary directory, so it does not survive a reboot.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Persistent ("remember me") session scope. Defaults to a
    /// file in the user's local data directory.
    #[arg(long)]
    local_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the profile and project list.
    Show,
    /// Request a verification mail for a new address.
    SaveEmail { email: String },
    /// Forget the session in both scopes.
    Logout,
    /// Adopt a session issued by the login page.
    StoreSession {
        user_id: String,
        token: String,
        /// Keep it in the persistent scope.
        #[arg(short, long)]
        remember: bool,
    },
}

impl Args {
    pub fn session_file(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("usercenter-session.txt"))
    }

    pub fn local_file(&self) -> Option<PathBuf> {
        self.local_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("usercenter").join("local.txt")))
    }
}
