use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

use coursedesk_cli::{admin, seeder};
use coursedesk_config::{DatabaseConfig, EnvSource, PasswordConfig};
use coursedesk_db::{init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "coursedesk-cli")]
#[command(about = "Coursedesk CLI - Administrative tools for Coursedesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with a fake course catalog
    SeedCourses {
        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "10")]
        count: usize,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let source = EnvSource::system();
    let database = DatabaseConfig::from_source(&source)?;
    let pool = init_db_pool(&database)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin { username, password } => {
            let passwords = PasswordConfig::from_source(&source)?;
            handle_create_admin(&pool, username, password, passwords.bcrypt_cost).await
        }
        Commands::SeedCourses { count } => {
            seeder::seed_courses(&pool, count).await?;
            Ok(())
        }
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    password: Option<String>,
    bcrypt_cost: u32,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let user_id = admin::create_admin(pool, &username, &password, bcrypt_cost)
        .await
        .context("Error creating admin")?;

    println!("\n✅ Admin created successfully!");
    println!("   Username: {}", username.trim());
    println!("   User ID: {}", user_id);
    Ok(())
}
