use super::logging::init_tracing;
use super::render::{print_messages, render_book_table, render_text_list};
use super::setup::{Cli, Commands};
use bookshelf::api::{CmdResult, SearchFilter};
use bookshelf::error::Result;
use bookshelf::init::{initialize, BookshelfContext, Overrides};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.effective_log_level());

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let overrides = Overrides {
        store: cli.store.clone(),
        config_file: cli.config.clone(),
    };
    let mut ctx = initialize(&cwd, &overrides)?;

    let result = match cli.command {
        Some(Commands::Add {
            title,
            author,
            year,
        }) => handle_add(&mut ctx, title, author, year)?,
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id)?,
        Some(Commands::Search {
            title,
            author,
            year,
        }) => handle_search(
            &ctx,
            SearchFilter {
                title,
                author,
                year,
            },
        )?,
        Some(Commands::Status { id, status }) => handle_status(&mut ctx, &id, &status)?,
        Some(Commands::Config) => handle_config(&ctx),
        Some(Commands::List) | None => handle_list(&ctx)?,
    };

    Ok(if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn handle_add(
    ctx: &mut BookshelfContext,
    title: String,
    author: String,
    year: i64,
) -> Result<CmdResult> {
    let result = ctx.api.add_book(title, author, year)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_delete(ctx: &mut BookshelfContext, id: &str) -> Result<CmdResult> {
    let result = ctx.api.delete_book(id)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_search(ctx: &BookshelfContext, filter: SearchFilter) -> Result<CmdResult> {
    let result = ctx.api.search_books(&filter)?;
    // An empty table would claim the catalog is empty; the message covers it.
    if !result.listed_books.is_empty() {
        print!("{}", render_book_table(&result.listed_books));
    }
    print_messages(&result.messages);
    Ok(result)
}

fn handle_list(ctx: &BookshelfContext) -> Result<CmdResult> {
    let result = ctx.api.list_books()?;
    // The table prints the empty-catalog notice itself.
    print!("{}", render_book_table(&result.listed_books));
    Ok(result)
}

fn handle_status(ctx: &mut BookshelfContext, id: &str, status: &str) -> Result<CmdResult> {
    let result = ctx.api.change_status(id, status)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_config(ctx: &BookshelfContext) -> CmdResult {
    let mut lines: Vec<String> = ctx
        .config
        .list_all()
        .into_iter()
        .map(|(k, v)| format!("{} = {}", k, v))
        .collect();
    lines.push(format!("config file = {}", ctx.config_path.display()));
    lines.push(format!("store file = {}", ctx.store_path.display()));
    print!("{}", render_text_list(&lines, "No configuration values."));
    CmdResult::default()
}
