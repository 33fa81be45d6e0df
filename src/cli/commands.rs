//! Command dispatch and rendering.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::debug;

use crate::application::{FamilyService, FamilyStore, NewMember};
use crate::cli::args::{
    Cli, Commands, ConfigCommands, EventCommands, FamilyCommands, MemberCommands,
};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{AlertEntry, Forest, TreeNavigator};
use generational_arena::Index;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.data_dir.clone());
    debug!(data_dir = %data_dir.display(), "using data directory");
    let service = FamilyService::new(FamilyStore::new(data_dir));

    match &cli.command {
        Some(Commands::Family { command }) => family_command(&service, command),
        Some(Commands::Member { command }) => member_command(&service, command),
        Some(Commands::Tree { family }) => tree(&service, family),
        Some(Commands::Browse { family }) => browse(&service, family),
        Some(Commands::Alerts { family, window, on }) => {
            alerts(&service, &settings, family, *window, on.as_deref())
        }
        Some(Commands::Calendar {
            family,
            month,
            year,
        }) => calendar(&service, family, *month, *year),
        Some(Commands::Event { command }) => event_command(&service, command),
        Some(Commands::Config { command }) => config_command(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn family_command(service: &FamilyService, command: &FamilyCommands) -> CliResult<()> {
    match command {
        FamilyCommands::List => {
            let families = service.list_families()?;
            if families.is_empty() {
                output::info("no families yet, create one with: famtree family add <name>");
            }
            for name in families {
                output::info(&name);
            }
            Ok(())
        }
        FamilyCommands::Add { name } => {
            service.create_family(name)?;
            output::success(&format!("created family: {name}"));
            Ok(())
        }
        FamilyCommands::Remove { name } => {
            service.remove_family(name)?;
            output::success(&format!("removed family: {name}"));
            Ok(())
        }
    }
}

fn member_command(service: &FamilyService, command: &MemberCommands) -> CliResult<()> {
    match command {
        MemberCommands::List { family } => {
            let snapshot = service.snapshot(family)?;
            output::header(&format!("{} ({} members)", snapshot.name, snapshot.members.len()));
            for member in &snapshot.members {
                let mut line = format!("{}  [{}]", member.full_name(), member.id);
                if let Some(birthday) = member.birthday {
                    line.push_str(&format!("  *{birthday}"));
                }
                output::detail(&line);
            }
            Ok(())
        }
        MemberCommands::Add {
            family,
            first_name,
            last_name,
            email,
            address,
            birthday,
            anniversary,
            comments,
            father,
            mother,
            photo,
        } => {
            let member = service.add_member(
                family,
                NewMember {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    email: email.clone(),
                    address: address.clone(),
                    birthday: parse_cli_date_opt(birthday.as_deref())?,
                    anniversary: parse_cli_date_opt(anniversary.as_deref())?,
                    comments: comments.clone(),
                    father_id: father.clone(),
                    mother_id: mother.clone(),
                    photo: photo.clone(),
                },
            )?;
            output::success(&format!("added {} [{}]", member.full_name(), member.id));
            Ok(())
        }
        MemberCommands::Remove { family, id } => {
            service.remove_member(family, id)?;
            output::success(&format!("removed member: {id}"));
            Ok(())
        }
    }
}

fn event_command(service: &FamilyService, command: &EventCommands) -> CliResult<()> {
    match command {
        EventCommands::List { family } => {
            let snapshot = service.snapshot(family)?;
            for event in &snapshot.events {
                output::detail(&format!(
                    "{}  {}  [{}]",
                    event.event_date, event.event_name, event.id
                ));
            }
            Ok(())
        }
        EventCommands::Add {
            family,
            name,
            date,
            member,
        } => {
            let event_date = parse_cli_date(date)?;
            let event = service.add_event(family, name.clone(), event_date, member.clone())?;
            output::success(&format!("added event {} [{}]", event.event_name, event.id));
            Ok(())
        }
        EventCommands::Remove { family, id } => {
            service.remove_event(family, id)?;
            output::success(&format!("removed event: {id}"));
            Ok(())
        }
    }
}

fn tree(service: &FamilyService, family: &str) -> CliResult<()> {
    let (snapshot, forest) = service.forest(family)?;
    output::header(&format!(
        "{}: {} members, {} lineages, depth {}",
        snapshot.name,
        forest.len(),
        forest.roots().len(),
        forest.depth()
    ));
    for &root in forest.roots() {
        println!("{}", render_subtree(&forest, root));
    }
    Ok(())
}

/// Convert one subtree into a termtree for display.
fn render_subtree(forest: &Forest, idx: Index) -> Tree<String> {
    let label = forest
        .get(idx)
        .map(|node| node.to_string())
        .unwrap_or_default();
    let leaves: Vec<_> = forest
        .get(idx)
        .map(|node| {
            node.children
                .iter()
                .map(|&child| render_subtree(forest, child))
                .collect()
        })
        .unwrap_or_default();
    Tree::new(label).with_leaves(leaves)
}

/// Interactive drill-down driven by the navigator.
///
/// Input per line: a list number to descend into that member's children,
/// `..` to go back, `q` to quit.
fn browse(service: &FamilyService, family: &str) -> CliResult<()> {
    let (snapshot, forest) = service.forest(family)?;
    let mut navigator = TreeNavigator::new();
    let stdin = io::stdin();

    loop {
        let level = navigator.current_level(&forest);
        match navigator.current_id().and_then(|id| forest.node_by_id(id)) {
            Some(node) => output::header(&format!("{} > children of {}", snapshot.name, node)),
            None => output::header(&format!("{} > roots", snapshot.name)),
        }
        for (i, node) in level.iter().enumerate() {
            let marker = if node.children.is_empty() {
                " "
            } else {
                "+"
            };
            output::detail(&format!("{:>2}. {} {}", i + 1, marker, node));
        }
        output::prompt("number to descend, '..' back, 'q' quit:");

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let input = line.trim();
        match input {
            "q" | "quit" => break,
            ".." | "b" => navigator.go_back(),
            _ => {
                if let Ok(n) = input.parse::<usize>() {
                    if let Some(node) = level.get(n.wrapping_sub(1)) {
                        let id = node.member.id.clone();
                        navigator.view_children(&forest, &id);
                    }
                }
            }
        }
    }
    io::stdout().flush().ok();
    Ok(())
}

fn alerts(
    service: &FamilyService,
    settings: &Settings,
    family: &str,
    window: Option<i64>,
    on: Option<&str>,
) -> CliResult<()> {
    let reference = match on {
        Some(raw) => parse_cli_date(raw)?,
        // The core never reads the clock; today is resolved here at the edge
        None => chrono::Local::now().date_naive(),
    };
    let window_days = window.unwrap_or(settings.alert_window_days);
    let buckets = service.alerts(family, reference, window_days)?;

    if buckets.upcoming.is_empty() && buckets.later.is_empty() {
        output::info("no upcoming events");
        return Ok(());
    }

    if !buckets.upcoming.is_empty() {
        output::header(&format!("This week (within {window_days} days)"));
        for alert in &buckets.upcoming {
            print_alert(alert);
        }
    }
    if !buckets.later.is_empty() {
        output::header("Coming up");
        for alert in &buckets.later {
            print_alert(alert);
        }
    }
    Ok(())
}

fn print_alert(alert: &AlertEntry) {
    let due = match alert.days_until {
        0 => "today!".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {n} days"),
    };
    let line = format!(
        "{}  {}  ({}, {})",
        alert.date,
        alert.title,
        alert.kind.as_str(),
        due
    );
    if alert.days_until == 0 {
        output::highlight(&line);
    } else {
        output::detail(&line);
    }
}

fn calendar(
    service: &FamilyService,
    family: &str,
    month: Option<u32>,
    year: Option<i32>,
) -> CliResult<()> {
    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            return Err(CliError::InvalidArgs(format!("month out of range: {m}")));
        }
    }
    let entries = service.calendar(family, month, year)?;
    for entry in &entries {
        output::detail(&format!(
            "{}  {}  ({})",
            entry.date.format("%b %d"),
            entry.title,
            entry.kind.as_str()
        ));
    }
    Ok(())
}

fn config_command(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            let path = crate::config::global_config_path().ok_or_else(|| {
                CliError::InvalidArgs("cannot determine config directory".to_string())
            })?;
            if path.exists() {
                output::info(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CliError::Application(crate::application::ApplicationError::Config {
                        message: format!("create {}: {}", parent.display(), e),
                    })
                })?;
            }
            std::fs::write(&path, Settings::template()).map_err(|e| {
                CliError::Application(crate::application::ApplicationError::Config {
                    message: format!("write {}: {}", path.display(), e),
                })
            })?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match crate::config::global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::info("no config directory available"),
            }
            Ok(())
        }
    }
}

/// Strict date parsing for CLI input (stored data is parsed leniently by the
/// store instead).
fn parse_cli_date(raw: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArgs(format!("invalid date: {raw} (expected YYYY-MM-DD)")))
}

fn parse_cli_date_opt(raw: Option<&str>) -> CliResult<Option<NaiveDate>> {
    raw.map(parse_cli_date).transpose()
}
