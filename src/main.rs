use clap::Parser;
use small_library::app::views;
use small_library::config::{Command, View};
use small_library::utils::error::{ErrorSeverity, LibraryError};
use small_library::utils::validation::{self, Validate};
use small_library::{CliConfig, LibraryRepository, LocalStorage};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config '{}': {}", cli.config.display(), e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        small_library::utils::logger::init_json_logger();
    } else {
        small_library::utils::logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
    if config.uses_default_key() {
        tracing::warn!("Using the built-in encryption key; data is obfuscated, not protected");
    }

    let storage = LocalStorage::new(".");
    let mut repo = LibraryRepository::from_config(storage, &config)?;

    if let Err(e) = run(&mut repo, cli.command) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 64,
            ErrorSeverity::High => 78,
            ErrorSeverity::Critical => 74,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run(
    repo: &mut LibraryRepository<LocalStorage>,
    command: Command,
) -> Result<(), LibraryError> {
    match command {
        Command::AddBook { title, author } => {
            validation::validate_non_empty_string("title", &title)?;
            validation::validate_non_empty_string("author", &author)?;
            let book = repo.add_book(title.trim(), author.trim());
            println!("✅ Added book {}. {} by {}", book.id, book.title, book.author);
        }
        Command::AddMember { name } => {
            validation::validate_non_empty_string("name", &name)?;
            let member = repo.add_member(name.trim());
            println!("✅ Added member {} ({})", member.id, member.name);
        }
        Command::Issue { book_id, member_id } => {
            let book_id = validation::parse_id("book_id", &book_id)?;
            let member_id = validation::parse_id("member_id", &member_id)?;
            repo.issue_book(book_id, member_id)?;
            println!("✅ Book Issued!");
        }
        Command::Return { book_id, member_id } => {
            let book_id = validation::parse_id("book_id", &book_id)?;
            let member_id = validation::parse_id("member_id", &member_id)?;
            repo.return_book(book_id, member_id)?;
            println!("✅ Book Returned!");
        }
        Command::List { view } => {
            let library = repo.library();
            let rendered = match view {
                View::Available => views::render_available(library),
                View::Issued => views::render_issued(library),
                View::History => views::render_history(library),
                View::Members => views::render_members(library),
                View::All => views::render_all(library),
            };
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
        }
    }
    Ok(())
}
