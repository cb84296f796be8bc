//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::new::{read_content, PostFields};
use folio_rs::content::PostQuery;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A personal portfolio and blog kept in a local post store", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Post fields shared by `new` and `edit`
#[derive(clap::Args)]
struct PostArgs {
    /// URL slug (derived from the title when empty)
    #[arg(short, long)]
    slug: Option<String>,

    /// Read the markdown body from this file
    #[arg(short = 'f', long)]
    content_file: Option<PathBuf>,

    /// Short summary (derived from the content when empty)
    #[arg(short, long)]
    excerpt: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    tags: Option<String>,

    /// Publication date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,

    /// Cover image URL
    #[arg(long)]
    cover_image: Option<String>,
}

impl PostArgs {
    fn into_fields(self, title: Option<String>, read_stdin: bool) -> Result<PostFields> {
        let content = match (&self.content_file, read_stdin) {
            (Some(file), _) => Some(read_content(Some(file))?),
            (None, true) => Some(read_content(None)?),
            (None, false) => None,
        };

        Ok(PostFields {
            title,
            content,
            slug: self.slug,
            excerpt: self.excerpt,
            tags: self.tags,
            date: self.date,
            cover_image: self.cover_image,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post; the body is read from stdin without --content-file
    New {
        /// Title of the new post
        title: String,

        #[command(flatten)]
        post: PostArgs,
    },

    /// Edit an existing post
    Edit {
        /// Id of the post
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        post: PostArgs,
    },

    /// Delete a post
    Delete {
        /// Id of the post
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts whose title, excerpt or content contain this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Print a post
    Show {
        /// Slug of the post
        slug: String,

        /// Print the markdown instead of HTML
        #[arg(long)]
        raw: bool,
    },

    /// Render a markdown file to HTML
    Preview {
        /// Markdown file
        file: PathBuf,
    },

    /// Log in as admin
    Login {
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out
    Logout,

    /// Show whether the admin is logged in
    Status,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Remove all stored posts and the login state
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, post } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let fields = post.into_fields(Some(title), true)?;
            folio_rs::commands::new::create_post(&folio, &fields)?;
        }

        Commands::Edit { id, title, post } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let fields = post.into_fields(title, false)?;
            folio_rs::commands::new::edit_post(&folio, &id, &fields)?;
        }

        Commands::Delete { id, yes } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::delete::run(&folio, &id, yes)?;
        }

        Commands::List {
            r#type,
            search,
            tag,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let query = PostQuery::new(search, tag);
            folio_rs::commands::list::run(&folio, &r#type, &query)?;
        }

        Commands::Show { slug, raw } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::show::run(&folio, &slug, raw)?;
        }

        Commands::Preview { file } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::preview::run(&folio, &file)?;
        }

        Commands::Login { password } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            if !folio_rs::commands::session::login(&folio, password.as_deref())? {
                std::process::exit(1);
            }
        }

        Commands::Logout => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::session::logout(&folio)?;
        }

        Commands::Status => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::session::status(&folio)?;
        }

        Commands::Server { port, ip, open } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port, open).await?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Removing stored posts...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
