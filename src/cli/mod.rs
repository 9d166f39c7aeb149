use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::application::SocialLedger;
use crate::domain::{LedgerEvent, Post, PostId, Principal};

/// Agora - in-memory social ledger shell
///
/// Runs one ledger instance for the lifetime of the process and applies
/// commands against it, either interactively or from a script file. Type
/// `help` inside the shell for the command list.
#[derive(Parser)]
#[command(name = "agora")]
#[command(about = "An in-memory social-network ledger shell")]
#[command(version)]
pub struct Cli {
    /// Run commands from a script file instead of an interactive session
    #[arg(short, long)]
    pub script: Option<String>,

    /// Echo events emitted by each command
    #[arg(short, long)]
    pub verbose: bool,
}

/// Shell state around the ledger: the handle -> principal table plays the
/// caller-identity source role (the ledger itself never mints principals),
/// and `seen_events` tracks how much of the event log was already echoed.
struct Shell {
    ledger: SocialLedger,
    identities: HashMap<String, Principal>,
    current: Option<String>,
    seen_events: usize,
    verbose: bool,
}

#[derive(Serialize)]
struct LedgerDump<'a> {
    total_users: u64,
    total_posts: u64,
    posts: Vec<Post>,
    events: &'a [LedgerEvent],
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut shell = Shell {
            ledger: SocialLedger::new(),
            identities: HashMap::new(),
            current: None,
            seen_events: 0,
            verbose: self.verbose,
        };

        match self.script {
            Some(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("Cannot open script file '{}'", path))?;
                for line in BufReader::new(file).lines() {
                    if !shell.step(&line?)? {
                        break;
                    }
                }
            }
            None => {
                let stdin = io::stdin();
                loop {
                    print!("agora> ");
                    io::stdout().flush()?;
                    let mut line = String::new();
                    if stdin.lock().read_line(&mut line)? == 0 {
                        break;
                    }
                    if !shell.step(&line)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Shell {
    /// Apply one input line. Returns false when the session should end.
    /// Ledger errors are printed and the shell keeps going: a failed call
    /// never poisons the ledger.
    fn step(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(true);
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let outcome = match command {
            "quit" | "exit" => return Ok(false),
            "help" => {
                print_help();
                Ok(())
            }
            "as" => self.switch_identity(rest),
            "whoami" => self.whoami(),
            "register" => self.register(rest),
            "post" => self.post(rest),
            "like" => self.like(rest),
            "user" => self.show_user(rest),
            "show" => self.show_post(rest),
            "latest" => self.latest(rest),
            "posts" => self.list_user_posts(rest),
            "stats" => self.stats(),
            "events" => self.events(),
            "dump" => self.dump(),
            _ => {
                eprintln!("Unknown command '{}'. Type 'help' for the list.", command);
                Ok(())
            }
        };

        if let Err(err) = outcome {
            eprintln!("error: {:#}", err);
        }
        if self.verbose {
            self.echo_new_events();
        }
        Ok(true)
    }

    /// Switch to a handle, minting a fresh principal on first use.
    fn switch_identity(&mut self, handle: &str) -> Result<()> {
        anyhow::ensure!(!handle.is_empty(), "Usage: as <handle>");
        let principal = *self
            .identities
            .entry(handle.to_string())
            .or_insert_with(Principal::new);
        self.current = Some(handle.to_string());
        println!("Acting as {} ({})", handle, principal);
        Ok(())
    }

    fn whoami(&self) -> Result<()> {
        match &self.current {
            Some(handle) => {
                println!("{} ({})", handle, self.identities[handle]);
            }
            None => println!("No active identity. Use 'as <handle>' first."),
        }
        Ok(())
    }

    fn register(&mut self, args: &str) -> Result<()> {
        let caller = self.caller()?;
        let (username, bio) = match args.split_once(char::is_whitespace) {
            Some((username, bio)) => (username, bio.trim()),
            None => (args, ""),
        };
        anyhow::ensure!(!username.is_empty(), "Usage: register <username> [bio]");

        self.ledger.register_user(caller, username, bio)?;
        println!("Registered {} as \"{}\"", caller, username);
        Ok(())
    }

    fn post(&mut self, content: &str) -> Result<()> {
        let caller = self.caller()?;
        let post_id = self.ledger.create_post(caller, content)?;
        println!("Created post #{}", post_id);
        Ok(())
    }

    fn like(&mut self, args: &str) -> Result<()> {
        let caller = self.caller()?;
        let post_id = parse_post_id(args)?;

        self.ledger.toggle_like(caller, post_id)?;
        if self.ledger.has_liked(post_id, caller) {
            println!("Liked post #{}", post_id);
        } else {
            println!("Unliked post #{}", post_id);
        }
        Ok(())
    }

    fn show_user(&self, args: &str) -> Result<()> {
        let principal = match args {
            "" => self.caller()?,
            other => self.resolve_principal(other)?,
        };
        let user = self.ledger.get_user(principal)?;
        println!("{} ({})", user.username, user.principal);
        if !user.bio.is_empty() {
            println!("  bio: {}", user.bio);
        }
        println!("  posts: {}", user.post_count);
        println!("  registered: {}", user.registered_at.to_rfc3339());
        Ok(())
    }

    fn show_post(&self, args: &str) -> Result<()> {
        let post = self.ledger.get_post(parse_post_id(args)?)?;
        print_post(&post);
        Ok(())
    }

    fn latest(&self, args: &str) -> Result<()> {
        let count = match args {
            "" => 10,
            other => other
                .parse()
                .with_context(|| format!("Invalid count '{}'", other))?,
        };

        let posts = self.ledger.latest_posts(count)?;
        if posts.is_empty() {
            println!("No posts yet.");
        }
        for post in posts {
            print_post(&post);
        }
        Ok(())
    }

    fn list_user_posts(&self, args: &str) -> Result<()> {
        let principal = match args {
            "" => self.caller()?,
            other => self.resolve_principal(other)?,
        };
        let ids = self.ledger.user_posts(principal);
        if ids.is_empty() {
            println!("No posts.");
        } else {
            let ids: Vec<String> = ids.iter().map(|id| format!("#{}", id)).collect();
            println!("{}", ids.join(" "));
        }
        Ok(())
    }

    fn stats(&self) -> Result<()> {
        println!(
            "{} user(s), {} post(s), {} event(s)",
            self.ledger.total_users(),
            self.ledger.total_posts(),
            self.ledger.events().len()
        );
        Ok(())
    }

    fn events(&self) -> Result<()> {
        if self.ledger.events().is_empty() {
            println!("No events yet.");
        }
        for (index, event) in self.ledger.events().iter().enumerate() {
            println!("{:>4}  {}", index + 1, event);
        }
        Ok(())
    }

    /// Full JSON snapshot of the ledger: counters, every post, the event log.
    fn dump(&self) -> Result<()> {
        let posts = (1..=self.ledger.total_posts())
            .filter_map(|id| self.ledger.get_post(id).ok())
            .collect();
        let dump = LedgerDump {
            total_users: self.ledger.total_users(),
            total_posts: self.ledger.total_posts(),
            posts,
            events: self.ledger.events(),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        Ok(())
    }

    fn caller(&self) -> Result<Principal> {
        let handle = self
            .current
            .as_ref()
            .context("No active identity. Use 'as <handle>' first.")?;
        Ok(self.identities[handle])
    }

    /// Resolve a shell handle or a literal principal string.
    fn resolve_principal(&self, input: &str) -> Result<Principal> {
        if let Some(principal) = self.identities.get(input) {
            return Ok(*principal);
        }
        input
            .parse()
            .with_context(|| format!("Unknown handle or invalid principal '{}'", input))
    }

    fn echo_new_events(&mut self) {
        for event in &self.ledger.events()[self.seen_events..] {
            eprintln!("[event] {}", event);
        }
        self.seen_events = self.ledger.events().len();
    }
}

fn parse_post_id(input: &str) -> Result<PostId> {
    input
        .trim_start_matches('#')
        .parse()
        .with_context(|| format!("Invalid post id '{}'", input))
}

fn print_post(post: &Post) {
    println!(
        "#{} [{} like(s)] {}: {}",
        post.id,
        post.like_count,
        post.created_at.format("%Y-%m-%d %H:%M:%S"),
        post.content
    );
    println!("      by {}", post.author);
}

fn print_help() {
    println!("Identity:");
    println!("  as <handle>            switch identity (mints a principal on first use)");
    println!("  whoami                 show the active identity");
    println!("Ledger:");
    println!("  register <name> [bio]  register the active identity");
    println!("  post <content>         publish a post");
    println!("  like <id>              toggle a like on a post");
    println!("Queries:");
    println!("  user [handle]          show a user record");
    println!("  show <id>              show a post");
    println!("  latest [n]             latest posts, newest first (default 10, max 50)");
    println!("  posts [handle]         post ids authored by a user, oldest first");
    println!("  stats                  registry counters");
    println!("  events                 the event log");
    println!("  dump                   JSON snapshot of the ledger");
    println!("Session:");
    println!("  quit | exit            leave the shell");
}
