use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;
use tracing_subscriber::EnvFilter;

use resume_pdf::config::Config;
use resume_pdf::layout::PaperSize;
use resume_pdf::model::{Resume, ResumeContent};
use resume_pdf::store::{AuthError, AuthResponse, JsonFileStorage, Session};
use resume_pdf::{suggestions, DesignTemplate};

/// Build resumes, keep them in a local account store and export them as PDF.
///
/// The store lives in `$RESUME_PDF_DATA_DIR` (default: `resume_pdf` in the platform data
/// directory); an optional `config.toml` there sets paper size, margins and the default output
/// file.
#[derive(Parser)]
#[command(author, version, about = "Resume builder with PDF export")]
struct Cli {
    /// Log more detail (repeat for trace output). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Account(AccountCommand),

    /// List the available design templates.
    Templates,

    /// Print sample resume content as JSON.
    Sample,
}

/// Commands that work on the account store.
#[derive(Subcommand)]
enum AccountCommand {
    /// Create an account and sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in to an existing account.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out.
    Logout,

    /// Show the signed-in account.
    Whoami,

    /// Set or clear the profile picture.
    Avatar {
        /// Image file path or `data:` URI.
        #[arg(required_unless_present = "clear")]
        image: Option<String>,
        #[arg(long, conflicts_with = "image")]
        clear: bool,
    },

    /// List saved resumes.
    #[command(alias = "ls")]
    List,

    /// Save resume content from a JSON file.
    Save {
        /// File holding the resume content (`formData`, `sections`, `styleOptions`, ...).
        content: PathBuf,
        /// Id of the resume to overwrite; a new id is generated when omitted.
        #[arg(long)]
        id: Option<String>,
        /// Design template key.
        #[arg(long, short)]
        template: Option<String>,
        /// Resume type, which selects the suggestion set (e.g. `software-engineer`).
        #[arg(long = "type")]
        resume_type: Option<String>,
    },

    /// Show content suggestions for a saved resume, or apply one.
    Suggest {
        id: String,
        /// Apply the suggestion with this number and save the resume.
        #[arg(long)]
        apply: Option<usize>,
    },

    /// Delete a saved resume.
    #[command(alias = "rm")]
    Delete { id: String },

    /// Render a resume to PDF.
    Render {
        /// Saved resume to render.
        #[arg(long, conflicts_with = "content")]
        id: Option<String>,
        /// Render content from a JSON file instead of a saved resume.
        #[arg(long)]
        content: Option<PathBuf>,
        /// Design template key; defaults to the saved resume's template.
        #[arg(long, short)]
        template: Option<String>,
        /// Output file; defaults to the configured output file.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Paper size (`a4` or `letter`).
        #[arg(long, value_parser = parse_paper)]
        paper: Option<PaperSize>,
    },
}

fn parse_paper(value: &str) -> Result<PaperSize, String> {
    match value.to_ascii_lowercase().as_str() {
        "a4" => Ok(PaperSize::A4),
        "letter" => Ok(PaperSize::Letter),
        other => Err(format!("unknown paper size '{other}' (expected a4 or letter)")),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(err.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

type CliResult = Result<ExitCode, Box<dyn Error>>;

fn run(command: Commands) -> CliResult {
    match command {
        Commands::Templates => {
            for template in DesignTemplate::ALL {
                println!("{:<20} {}", template.key(), template.label());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Sample => {
            println!("{}", serde_json::to_string_pretty(&ResumeContent::sample())?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Account(command) => {
            let config = Config::load()?;
            let session = Session::open(config.storage()?)?;
            run_account(command, session, &config)
        }
    }
}

fn run_account(
    command: AccountCommand,
    mut session: Session<JsonFileStorage>,
    config: &Config,
) -> CliResult {
    match command {
        AccountCommand::Signup {
            name,
            email,
            password,
        } => auth_response(session.signup(&name, &email, &password).into()),
        AccountCommand::Login { email, password } => {
            auth_response(session.login(&email, &password).into())
        }
        AccountCommand::Logout => {
            session.logout()?;
            println!("Signed out.");
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::Whoami => {
            match session.current_user() {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("Not signed in."),
            }
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::Avatar { image, clear: _ } => {
            let profile = session.update_user_image(image)?;
            match profile.image {
                Some(image) => println!("Profile picture set to {image}."),
                None => println!("Profile picture cleared."),
            }
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::List => {
            let resumes = session.saved_resumes();
            if resumes.is_empty() {
                println!("No saved resumes.");
            }
            for resume in resumes {
                println!(
                    "{}  {:<30} {:<20} {:>3}%  {}",
                    resume.id,
                    resume.title,
                    resume.design_template,
                    resume.progress,
                    resume.last_modified.format("%Y-%m-%d %H:%M"),
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::Save {
            content,
            id,
            template,
            resume_type,
        } => {
            let content = read_content(&content)?;
            let existing = id.as_deref().and_then(|id| session.find_resume(id)).cloned();
            let template = template
                .as_deref()
                .map(DesignTemplate::resolve)
                .or(existing.as_ref().map(|resume| resume.design_template))
                .unwrap_or_default();

            let mut resume = match (existing, id) {
                (Some(mut resume), _) => {
                    resume.content = content;
                    resume.design_template = template;
                    resume
                }
                (None, Some(id)) => Resume::with_id(id, content, template),
                (None, None) => Resume::new(content, template),
            };
            if let Some(resume_type) = resume_type {
                resume.resume_type = resume_type;
            }
            resume.touch();

            let id = resume.id.clone();
            session.save_resume(resume)?;
            println!("{id}");
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::Suggest { id, apply } => {
            let mut resume = session
                .find_resume(&id)
                .cloned()
                .ok_or(AuthError::ResumeNotFound(id))?;
            let found = suggestions::suggestions(&resume.resume_type, &resume.content);

            let Some(number) = apply else {
                println!(
                    "Suggestions for {} Resume:",
                    suggestions::resume_type_label(&resume.resume_type)
                );
                for (number, suggestion) in found.iter().enumerate() {
                    println!("\n[{}] {}", number + 1, suggestion.field);
                    println!("{}", suggestion.value);
                    println!("  ({})", suggestion.explanation);
                }
                return Ok(ExitCode::SUCCESS);
            };

            let suggestion = number
                .checked_sub(1)
                .and_then(|index| found.get(index))
                .ok_or_else(|| format!("no suggestion {number} (1-{})", found.len()))?;
            resume
                .content
                .apply_suggestion(&suggestion.field, &suggestion.value)?;
            resume.touch();
            session.save_resume(resume)?;
            println!("Applied suggestion for {}.", suggestion.field);
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::Delete { id } => {
            let removed = session.delete_resume(&id)?;
            println!("Deleted '{}'.", removed.title);
            Ok(ExitCode::SUCCESS)
        }
        AccountCommand::Render {
            id,
            content,
            template,
            output,
            paper,
        } => {
            let (content, saved_template) = match (id, content) {
                (Some(id), _) => {
                    let resume = session
                        .find_resume(&id)
                        .ok_or(AuthError::ResumeNotFound(id))?;
                    (resume.content.clone(), Some(resume.design_template))
                }
                (None, Some(path)) => (read_content(&path)?, None),
                (None, None) => return Err("pass --id or --content".into()),
            };
            let template = template
                .as_deref()
                .map(DesignTemplate::resolve)
                .or(saved_template)
                .unwrap_or_default();

            let mut builder = config.pdf_builder().with_template(template);
            if let Some(paper) = paper {
                builder = builder.with_paper(paper);
            }
            let output = output.unwrap_or_else(|| config.output_file.clone());

            match render(&builder, &content, &output) {
                Ok(pages) => {
                    println!("Wrote {} ({} page(s)).", output.display(), pages);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    error!("Error generating PDF: {err}");
                    eprintln!("Failed to generate PDF");
                    print_error_sources(err.as_ref());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

#[cfg(not(feature = "bookmarks"))]
fn render(
    builder: &resume_pdf::ResumePdfBuilder,
    content: &ResumeContent,
    output: &Path,
) -> Result<usize, Box<dyn Error>> {
    let rendered = builder.render(content)?;
    rendered.write_to(output)?;
    Ok(rendered.page_count)
}

#[cfg(feature = "bookmarks")]
fn render(
    builder: &resume_pdf::ResumePdfBuilder,
    content: &ResumeContent,
    output: &Path,
) -> Result<usize, Box<dyn Error>> {
    let rendered = builder.render_with_bookmarks(content)?;
    rendered.write_to(output)?;
    Ok(rendered.page_count)
}

fn read_content(path: &Path) -> Result<ResumeContent, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

fn auth_response(response: AuthResponse) -> CliResult {
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
