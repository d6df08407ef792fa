use crate::cli::OutputFormat;
use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use colored::Colorize;
use model_map::{Authorization, DecodeTarget, Decoded, EncodeTarget, MapError, Repository, User};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

pub fn output_decoded(decoded: &Decoded, format: OutputFormat, pretty: bool) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(decoded, pretty),
        OutputFormat::Text => {
            match decoded {
                Decoded::User(user) => println!("{}", user.display()),
                Decoded::Authorization(auth) => println!("{}", auth.display()),
                Decoded::Repository(repo) => println!("{}", repo.display()),
                Decoded::AuthorizationList(auths) => output_list(auths),
                Decoded::RepositoryList(repos) => output_list(repos),
            }
            Ok(())
        }
    }
}

fn output_list<T: Displayable>(items: &[T]) {
    for item in items {
        println!("{}", item.display());
        println!();
    }
}

#[derive(Serialize)]
struct TargetList {
    decode: Vec<&'static str>,
    encode: Vec<&'static str>,
}

pub fn output_targets(format: OutputFormat, pretty: bool) -> Result<()> {
    let targets = TargetList {
        decode: DecodeTarget::ALL.iter().map(|t| t.name()).collect(),
        encode: EncodeTarget::ALL.iter().map(|t| t.name()).collect(),
    };

    match format {
        OutputFormat::Json => print_json(&targets, pretty),
        OutputFormat::Text => {
            println!("{}", "Decode targets:".bold());
            for name in &targets.decode {
                println!("  {}", name.cyan());
            }
            println!("{}", "Encode targets:".bold());
            for name in &targets.encode {
                println!("  {}", name.cyan());
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let code = err
        .downcast_ref::<MapError>()
        .map(MapError::kind)
        .unwrap_or("error");

    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: code.to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err).unwrap_or_else(|_| {
                format!(r#"{{"error": true, "message": "{}"}}"#, err)
            })
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

fn timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S %:z").to_string()
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "None"
    } else {
        value
    }
}

impl Displayable for User {
    fn display(&self) -> String {
        let mut output = format!(
            "{} ({})\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {} / {}\n  {}: {} repos, {} gists\n  {}: {}",
            self.login.cyan().bold(),
            or_none(&self.name).white().bold(),
            "Id".dimmed(),
            self.id,
            "Type".dimmed(),
            or_none(&self.user_type),
            "Profile".dimmed(),
            or_none(&self.html_url),
            "Followers / Following".dimmed(),
            self.followers,
            self.following,
            "Public".dimmed(),
            self.public_repos,
            self.public_gists,
            "Created".dimmed(),
            timestamp(&self.created_at).dimmed()
        );

        for (label, value) in [
            ("Company", &self.company),
            ("Location", &self.location),
            ("Email", &self.email),
            ("Blog", &self.blog),
            ("Bio", &self.bio),
        ] {
            if !value.is_empty() {
                output.push_str(&format!("\n  {}: {}", label.dimmed(), value));
            }
        }

        if self.hireable {
            output.push_str(&format!("\n  {}", "Available for hire".green()));
        }

        if let Some(plan) = &self.plan {
            output.push_str(&format!(
                "\n  {}: {} ({} private repos, {} collaborators, {} space)",
                "Plan".dimmed(),
                plan.name.magenta(),
                plan.private_repos,
                plan.collaborators,
                plan.space
            ));
        }

        output
    }
}

impl Displayable for Authorization {
    fn display(&self) -> String {
        let mut output = format!(
            "{} {}\n  {}: {}\n  {}: {}\n  {}: {}",
            "Authorization".cyan().bold(),
            self.id.to_string().white().bold(),
            "Note".dimmed(),
            or_none(&self.note),
            "Created".dimmed(),
            timestamp(&self.created_at).dimmed(),
            "Updated".dimmed(),
            timestamp(&self.updated_at).dimmed()
        );

        let scopes = match &self.scopes {
            Some(scopes) if scopes.is_empty() => "(empty)".to_string(),
            Some(scopes) => scopes
                .iter()
                .map(|s| s.magenta().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            None => "None".to_string(),
        };
        output.push_str(&format!("\n  {}: {}", "Scopes".dimmed(), scopes));

        if let Some(app) = &self.application {
            output.push_str(&format!(
                "\n  {}: {} <{}>",
                "App".dimmed(),
                app.name,
                app.url
            ));
        }

        output
    }
}

impl Displayable for Repository {
    fn display(&self) -> String {
        let visibility = if self.is_private {
            "private".yellow()
        } else {
            "public".green()
        };

        let mut output = format!(
            "{} [{}]\n  {}: {}\n  {}: {}\n  {}: {} watchers, {} forks, {} open issues\n  {}: {}",
            self.full_name.cyan().bold(),
            visibility,
            "Language".dimmed(),
            or_none(&self.language),
            "Clone".dimmed(),
            or_none(&self.clone_url),
            "Stats".dimmed(),
            self.watchers_count,
            self.forks_count,
            self.open_issues_count,
            "Pushed".dimmed(),
            timestamp(&self.pushed_at).dimmed()
        );

        if !self.description.is_empty() {
            output.push_str(&format!("\n  {}: {}", "Description".dimmed(), self.description));
        }
        if self.is_fork {
            output.push_str(&format!("\n  {}", "Fork".dimmed()));
        }
        if let Some(owner) = &self.owner {
            output.push_str(&format!("\n  {}: {}", "Owner".dimmed(), owner.login));
        }

        output
    }
}
