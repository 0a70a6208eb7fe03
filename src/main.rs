//! Application entry point for subtrack.
//!
//! Runs an interactive terminal session over the page controller: commands
//! map to the same events the web page would emit, and the rendered HTML
//! fragments are printed after each one.

use std::io::BufRead;
use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use dotenv::dotenv;
use log::info;

use subtrack::api::SubscriptionApi;
use subtrack::config::Config;
use subtrack::logging::setup_logging;
use subtrack::page::ConfirmPrompt;
use subtrack::page::Nav;
use subtrack::page::SubscriptionPage;

/// Blocking yes/no prompt on the terminal.
struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N]: ");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::new();
    setup_logging(&config)?;
    info!("Starting subtrack...");

    let api = SubscriptionApi::new(config.api_base_url.clone());
    let mut page = SubscriptionPage::new(api, config.login_url.clone());

    if navigate(page.load().await?) {
        return Ok(());
    }
    print_page(&mut page)?;
    print_help();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.trim().split_whitespace();

        let nav = match (parts.next(), parts.next()) {
            (None, _) => continue,
            (Some("quit" | "exit"), _) => break,
            (Some("list"), _) => page.load().await?,
            (Some("add"), _) => {
                page.open_create();
                fill_form(&mut page);
                page.submit().await?
            }
            (Some("edit"), Some(id)) => match id.parse::<i64>() {
                Ok(id) => {
                    page.open_edit(id).await?;
                    if page.modal().is_open() {
                        fill_form(&mut page);
                        page.submit().await?
                    } else {
                        Nav::Stay
                    }
                }
                Err(_) => {
                    println!("Некорректный идентификатор: {id}");
                    Nav::Stay
                }
            },
            (Some("del"), Some(id)) => match id.parse::<i64>() {
                Ok(id) => page.delete(id, &StdinPrompt).await?,
                Err(_) => {
                    println!("Некорректный идентификатор: {id}");
                    Nav::Stay
                }
            },
            (Some("edit" | "del"), None) => {
                print_help();
                Nav::Stay
            }
            (Some("close"), _) => {
                page.close_modal();
                Nav::Stay
            }
            (Some(cmd), _) => {
                println!("Неизвестная команда: {cmd}");
                print_help();
                Nav::Stay
            }
        };

        if navigate(nav) {
            break;
        }
        print_page(&mut page)?;
    }

    info!("Shutting down.");
    Ok(())
}

/// Returns true when the session must leave for the login page.
fn navigate(nav: Nav) -> bool {
    match nav {
        Nav::Redirect(url) => {
            println!("Требуется вход: {url}");
            true
        }
        Nav::Stay => false,
    }
}

fn print_page(page: &mut SubscriptionPage<SubscriptionApi>) -> Result<()> {
    let view = page.render(Utc::now())?;

    if !view.status_html.trim().is_empty() {
        println!("{}", view.status_html.trim());
    }
    if !view.messages_html.trim().is_empty() {
        println!("{}", view.messages_html.trim());
    }
    println!("{}", view.table_html.trim());
    if !view.modal_html.is_empty() {
        println!("{}", view.modal_html.trim());
    }
    Ok(())
}

fn print_help() {
    println!("Команды: list | add | edit <id> | del <id> | close | quit");
}

/// Reads the form fields one by one; empty input keeps the current value.
fn fill_form(page: &mut SubscriptionPage<SubscriptionApi>) {
    let Some(form) = page.form_mut() else {
        return;
    };

    form.name = prompt_field("Название", &form.name);
    form.amount = prompt_field("Сумма", &form.amount);
    form.interval = prompt_field("Интервал (monthly/yearly)", &form.interval);
    form.next_billing_date =
        prompt_field("Дата следующего списания (YYYY-MM-DD)", &form.next_billing_date);
}

fn prompt_field(label: &str, current: &str) -> String {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    let _ = std::io::stdout().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return current.to_string();
    }

    let input = input.trim();
    if input.is_empty() {
        current.to_string()
    } else {
        input.to_string()
    }
}
