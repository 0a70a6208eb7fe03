//! HTML fragment rendering.
//!
//! Templates are compiled in at build time and rendered through minijinja.
//! All templates carry an `.html` name so the engine HTML-escapes every
//! interpolation; user-supplied strings never reach the markup unescaped.

use minijinja::Environment;
use minijinja::context;
use serde::Serialize;

use crate::api::model::Subscription;
use crate::view::format::format_amount;
use crate::view::format::format_date;
use crate::view::format::format_interval;

/// One rendered table row. Display fields are pre-formatted; the name stays
/// raw and is escaped by the template engine.
#[derive(Serialize)]
struct RowContext {
    id: i64,
    name: String,
    amount: String,
    interval: String,
    next_billing_date: String,
}

impl RowContext {
    fn from_subscription(sub: &Subscription) -> Self {
        Self {
            id: sub.id,
            name: sub.name.clone(),
            amount: format_amount(sub.amount),
            interval: format_interval(&sub.interval).to_string(),
            next_billing_date: format_date(sub.next_billing_date.as_deref()),
        }
    }
}

/// Field values for the modal form. All values are raw input strings; the
/// hidden `id` is empty when the form is in create mode.
#[derive(Serialize)]
pub struct ModalContext {
    pub title: String,
    pub id: String,
    pub name: String,
    pub amount: String,
    pub interval: String,
    pub next_billing_date: String,
    pub in_flight: bool,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("table.html", include_str!("../../assets/templates/table.html"))
            .unwrap();
        env.add_template(
            "table_error.html",
            include_str!("../../assets/templates/table_error.html"),
        )
        .unwrap();
        env.add_template("modal.html", include_str!("../../assets/templates/modal.html"))
            .unwrap();
        env.add_template(
            "messages.html",
            include_str!("../../assets/templates/messages.html"),
        )
        .unwrap();
        env.add_template(
            "status.html",
            include_str!("../../assets/templates/status.html"),
        )
        .unwrap();

        Self { env }
    }

    /// Renders the full table body. An empty collection yields the
    /// placeholder row.
    pub fn table(&self, subscriptions: &[Subscription]) -> Result<String, minijinja::Error> {
        let rows: Vec<RowContext> = subscriptions
            .iter()
            .map(RowContext::from_subscription)
            .collect();

        self.env
            .get_template("table.html")?
            .render(context! { subscriptions => rows })
    }

    /// Placeholder body shown when the list could not be loaded.
    pub fn table_error(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("table_error.html")?.render(())
    }

    pub fn modal(&self, ctx: &ModalContext) -> Result<String, minijinja::Error> {
        self.env.get_template("modal.html")?.render(ctx)
    }

    /// Success messages region: one node per visible notice.
    pub fn messages(&self, messages: &[&str]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("messages.html")?
            .render(context! { messages => messages })
    }

    /// Dedicated error status element. Holds a single message; a newer error
    /// replaces an older one.
    pub fn status(&self, message: Option<&str>) -> Result<String, minijinja::Error> {
        self.env
            .get_template("status.html")?
            .render(context! { message => message })
    }
}
