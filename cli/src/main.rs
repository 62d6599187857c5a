//! Terminal client for the blog service.
//!
//! Drives the same session store, post synchronizer and auth flow as the web
//! app, over `reqwest`, with the token persisted to a file.


mod token_file;
mod transport;

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use blog_client::config::{ApiConfig, DEFAULT_API_BASE_URL};
use blog_client::error::ClientError;
use blog_client::net::api::ApiClient;
use blog_client::net::types::{Post, SignUpRequest};
use blog_client::services::auth;
use blog_client::services::posts::{DeleteOutcome, PostSync};
use blog_client::state::posts::PostsState;
use blog_client::state::session::Session;
use clap::{Parser, Subcommand};

use crate::token_file::{FileTokenStore, default_token_path};
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("no home directory; pass --token-file or set BLOG_TOKEN_FILE")]
    MissingTokenPath,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Parser, Debug)]
#[command(name = "blog-cli", about = "Blog service terminal client")]
struct Cli {
    #[arg(long, env = "BLOG_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    #[arg(long, env = "BLOG_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Log requests and state transitions to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Register a new account (does not sign in).
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone_number: String,
        #[arg(long)]
        address: String,
    },
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignOut,
    /// Print the identity carried by the stored token.
    Whoami,
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

/// Session and page state for one invocation.
struct CliContext {
    api: ApiClient<ReqwestTransport>,
    session: RefCell<Session>,
    posts: RefCell<PostsState>,
}

impl CliContext {
    fn new(cli: &Cli) -> Result<Self, CliError> {
        let path = match &cli.token_file {
            Some(path) => path.clone(),
            None => default_token_path().ok_or(CliError::MissingTokenPath)?,
        };
        tracing::debug!(path = %path.display(), "using token file");
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            api: ApiClient::new(ReqwestTransport::new(client), ApiConfig::with_base_url(&cli.base_url)),
            session: RefCell::new(Session::open(Arc::new(FileTokenStore::new(path)))),
            posts: RefCell::new(PostsState::default()),
        })
    }

    fn sync(&self) -> PostSync<'_, ReqwestTransport, RefCell<Session>, RefCell<PostsState>> {
        PostSync::new(&self.api, &self.session, &self.posts)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::new(&cli)?;
    match cli.command {
        Command::SignUp { name, email, password, phone_number, address } => {
            let form = SignUpRequest { name, email, password, phone_number, address };
            auth::sign_up(&ctx.api, &form).await?;
            println!("registered; sign in with `blog-cli sign-in`");
        }
        Command::SignIn { email, password } => {
            auth::sign_in(&ctx.api, &ctx.session, &email, &password).await?;
            println!("signed in as {}", email.trim());
        }
        Command::SignOut => {
            ctx.sync().logout();
            println!("signed out");
        }
        Command::Whoami => println!("{}", describe_session(&ctx.session.borrow())),
        Command::List { page } => run_list(&ctx, page).await?,
        Command::Create { title, content } => {
            let post = ctx.sync().create_post(&title, &content).await?;
            println!("created {}", post.id);
        }
        Command::Edit { id, title, content } => {
            let post = ctx.sync().update_post(&id, &title, &content).await?;
            println!("updated {}", post.id);
        }
        Command::Delete { id, yes } => {
            let confirm = || yes || prompt_confirm(&format!("Delete post {id}?"));
            match ctx.sync().delete_post(&id, confirm).await? {
                DeleteOutcome::Deleted => println!("deleted {id}"),
                DeleteOutcome::Cancelled => println!("cancelled"),
            }
        }
    }
    Ok(())
}

async fn run_list(ctx: &CliContext, page: u32) -> Result<(), CliError> {
    ctx.sync().load_page(page).await?;

    let posts = ctx.posts.borrow();
    let session = ctx.session.borrow();
    if posts.items.is_empty() {
        println!("no posts");
    }
    for post in &posts.items {
        println!("{}", format_post_line(post, session.can_modify(post)));
    }
    println!("{}", page_footer(posts.page, posts.total_pages));
    Ok(())
}

fn describe_session(session: &Session) -> String {
    if !session.is_authenticated() {
        return "not signed in".to_owned();
    }
    match (session.user_email(), session.user_id()) {
        (Some(email), Some(id)) => format!("{email} ({id})"),
        (Some(email), None) => email,
        (None, Some(id)) => id,
        (None, None) => "signed in (token carries no identity)".to_owned(),
    }
}

/// One list row; `*` marks posts the signed-in user may edit or delete.
fn format_post_line(post: &Post, mine: bool) -> String {
    let marker = if mine { '*' } else { ' ' };
    format!("{marker} {}  {}  by {}", post.id, post.title, post.author_name())
}

fn page_footer(page: u32, total_pages: u32) -> String {
    format!("page {page} of {total_pages}")
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ask on stderr, read one line from stdin. Any I/O failure counts as "no".
fn prompt_confirm(question: &str) -> bool {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "{question} [y/N] ");
    let _ = stderr.flush();
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(error) => {
            tracing::warn!(%error, "could not read confirmation");
            false
        }
    }
}
