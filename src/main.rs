use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

mod api;
mod args;
mod auth;
mod email;
mod location;
mod profile_view;
mod project;
mod session;
mod storage;
mod user;

use api::HttpApi;
use args::{Args, Command};
use profile_view::{MountError, ProfileView};
use session::{ScopedSessionStore, Session, SessionStore};
use storage::FileScope;

type Store = ScopedSessionStore<FileScope, FileScope>;

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let Some(local_file) = args.local_file() else {
        error!("no local data directory, pass --local-file");
        return ExitCode::FAILURE;
    };
    let store = ScopedSessionStore::new(FileScope::new(args.session_file()), FileScope::new(local_file));

    let ok = run(args.command, &args.host, store).await;

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(command: Command, host: &str, store: Store) -> bool {
    match command {
        Command::StoreSession {
            user_id,
            token,
            remember,
        } => store_session(&store, Session::new(user_id, token), remember),
        Command::Logout => logout(ProfileView::new(HttpApi::new(host), store)),
        Command::Show => {
            let mut view = ProfileView::new(HttpApi::new(host), store);
            match mount(&mut view).await {
                Ok(()) => {
                    show(&view);
                    true
                }
                // the profile is already loaded
                Err(MountError::Projects(_)) => {
                    show(&view);
                    false
                }
                Err(_) => false,
            }
        }
        Command::SaveEmail { email } => {
            let mut view = ProfileView::new(HttpApi::new(host), store);
            match mount(&mut view).await {
                Err(e) if e.redirect().is_some() => false,
                _ => save_email(&mut view, &email).await,
            }
        }
    }
}

fn store_session(store: &Store, session: Session, remember: bool) -> bool {
    match store.save(&session, remember) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("couldn't store session: {e}");
            false
        }
    }
}

/// Reports a failed mount; only a redirect means leaving the page.
async fn mount(view: &mut ProfileView<HttpApi, Store>) -> Result<(), MountError> {
    view.mount().await.map_err(|e| {
        match e.redirect() {
            Some(location) => println!("redirect: {location}"),
            None => eprintln!("error: {e}"),
        }
        e
    })
}

fn show(view: &ProfileView<HttpApi, Store>) {
    let profile = &view.profile;

    println!("user:     {} (id {})", profile.username, profile.user_id);
    println!("mobile:   {}", profile.mobile);
    println!(
        "email:    {} ({})",
        if profile.email.is_empty() { "-" } else { &profile.email },
        if profile.email_active { "verified" } else { "unverified" },
    );
    println!("projects: {}", view.projects.len());
    for project in &view.projects {
        println!(
            "  {:>6}  {:<24} {}",
            project.id,
            project.name().unwrap_or("-"),
            project.url
        );
    }
}

async fn save_email(view: &mut ProfileView<HttpApi, Store>, email: &str) -> bool {
    view.email_form.open();

    match view.save_email(email).await {
        Ok(()) => {
            println!("{}", view.email_form.tip);
            true
        }
        Err(e) => {
            eprintln!("error: {e}");
            false
        }
    }
}

fn logout(mut view: ProfileView<HttpApi, Store>) -> bool {
    match view.logout() {
        Ok(location) => {
            println!("redirect: {location}");
            true
        }
        Err(e) => {
            eprintln!("couldn't clear session: {e}");
            false
        }
    }
}
