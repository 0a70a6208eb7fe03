//! Page controller: the state machine behind the subscription list page.
//!
//! Holds the rendered table, the modal form and the active notices, and maps
//! user events onto API calls. Every mutation is followed by a full list
//! reload rather than a local patch.

use anyhow::Context;
use chrono::DateTime;
use chrono::Utc;
use log::debug;
use log::error;
use log::info;
use log::warn;

use crate::api::ApiError;
use crate::api::SubscriptionBackend;
use crate::page::ClickTarget;
use crate::page::ConfirmPrompt;
use crate::page::FormFields;
use crate::page::ModalState;
use crate::page::Nav;
use crate::page::PageView;
use crate::view::Notice;
use crate::view::NoticeKind;
use crate::view::Renderer;
use crate::view::render::ModalContext;

const TITLE_ADD: &str = "Добавить подписку";
const TITLE_EDIT: &str = "Редактировать подписку";

const MSG_CREATED: &str = "Подписка добавлена";
const MSG_UPDATED: &str = "Подписка обновлена";
const MSG_DELETED: &str = "Подписка удалена";

const ERR_LOAD_LIST: &str = "Не удалось загрузить подписки";
const ERR_LOAD_ITEM: &str = "Не удалось загрузить данные подписки";
const ERR_SAVE: &str = "Ошибка при сохранении подписки";
const ERR_DELETE: &str = "Не удалось удалить подписку";

const CONFIRM_DELETE: &str = "Вы уверены, что хотите удалить эту подписку?";

pub struct SubscriptionPage<B: SubscriptionBackend> {
    backend: B,
    renderer: Renderer,
    login_url: String,
    modal: ModalState,
    notices: Vec<Notice>,
    table_html: String,
    in_flight: bool,
}

impl<B: SubscriptionBackend> SubscriptionPage<B> {
    pub fn new(backend: B, login_url: impl Into<String>) -> Self {
        Self {
            backend,
            renderer: Renderer::new(),
            login_url: login_url.into(),
            modal: ModalState::Hidden,
            notices: Vec::new(),
            table_html: String::new(),
            in_flight: false,
        }
    }

    /// Fetches the collection and replaces the table body wholesale.
    ///
    /// An unauthorized response aborts rendering and asks the caller to
    /// navigate to the login page.
    pub async fn load(&mut self) -> anyhow::Result<Nav> {
        debug!("Loading subscription list");

        match self.backend.list().await {
            Ok(subscriptions) => {
                self.table_html = self.renderer.table(&subscriptions)?;
                Ok(Nav::Stay)
            }
            Err(ApiError::Unauthorized) => {
                info!("Session unauthorized, redirecting to {}", self.login_url);
                Ok(Nav::Redirect(self.login_url.clone()))
            }
            Err(e) => {
                error!("Failed to load subscriptions: {e}");
                self.table_html = self.renderer.table_error()?;
                self.show_error(ERR_LOAD_LIST);
                Ok(Nav::Stay)
            }
        }
    }

    /// Opens the modal with a blank form. The empty id field puts the
    /// upcoming submission on the create path.
    pub fn open_create(&mut self) {
        self.modal = ModalState::Open {
            form: FormFields::blank(),
        };
    }

    /// Fetches a single record and opens the modal pre-populated. On fetch
    /// failure the modal stays hidden; a half-populated form never appears.
    pub async fn open_edit(&mut self, id: i64) -> anyhow::Result<()> {
        match self.backend.get(id).await {
            Ok(subscription) => {
                self.modal = ModalState::Open {
                    form: FormFields::from_subscription(&subscription),
                };
            }
            Err(e) => {
                error!("Failed to load subscription {id}: {e}");
                self.show_error(ERR_LOAD_ITEM);
            }
        }
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Hidden;
    }

    /// A click on the backdrop closes the modal; clicks on the modal content
    /// or anywhere else leave it alone.
    pub fn handle_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close_modal();
        }
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// Mutable access to the open form, for field edits. None when hidden.
    pub fn form_mut(&mut self) -> Option<&mut FormFields> {
        match &mut self.modal {
            ModalState::Open { form } => Some(form),
            ModalState::Hidden => None,
        }
    }

    /// Submits the open form: POST when the hidden id field is empty, PUT to
    /// the item otherwise. On success the modal closes and the list reloads;
    /// on failure the modal stays open so the input can be corrected.
    ///
    /// A submit that arrives while a previous one is still in flight is
    /// dropped, so rapid repeated clicks cannot issue duplicate requests.
    pub async fn submit(&mut self) -> anyhow::Result<Nav> {
        if self.in_flight {
            warn!("Submit ignored: a request is already in flight");
            return Ok(Nav::Stay);
        }

        let ModalState::Open { form } = &self.modal else {
            return Ok(Nav::Stay);
        };
        let form = form.clone();
        let draft = form.to_draft();
        let is_edit = form.is_edit();

        self.in_flight = true;
        let result = if is_edit {
            let id: i64 = form
                .id
                .parse()
                .context("Form id field holds a non-numeric id")?;
            self.backend.update(id, &draft).await
        } else {
            self.backend.create(&draft).await
        };
        self.in_flight = false;

        match result {
            Ok(saved) => {
                debug!("Saved subscription {}", saved.id);
                self.close_modal();
                let nav = self.load().await?;
                self.show_success(if is_edit { MSG_UPDATED } else { MSG_CREATED });
                Ok(nav)
            }
            Err(e) => {
                error!("Failed to save subscription: {e}");
                self.show_error(&e.user_message(ERR_SAVE));
                Ok(Nav::Stay)
            }
        }
    }

    /// Deletes a subscription after an explicit confirmation. Declining the
    /// prompt sends nothing and changes nothing.
    pub async fn delete(
        &mut self,
        id: i64,
        prompt: &dyn ConfirmPrompt,
    ) -> anyhow::Result<Nav> {
        if !prompt.confirm(CONFIRM_DELETE) {
            debug!("Deletion of subscription {id} cancelled");
            return Ok(Nav::Stay);
        }

        match self.backend.delete(id).await {
            Ok(()) => {
                let nav = self.load().await?;
                self.show_success(MSG_DELETED);
                Ok(nav)
            }
            Err(e) => {
                error!("Failed to delete subscription {id}: {e}");
                self.show_error(&e.user_message(ERR_DELETE));
                Ok(Nav::Stay)
            }
        }
    }

    fn show_success(&mut self, text: &str) {
        self.notices.push(Notice::success(text, Utc::now()));
    }

    fn show_error(&mut self, text: &str) {
        self.notices.push(Notice::error(text, Utc::now()));
    }

    fn prune_notices(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|n| !n.is_expired(now));
    }

    /// Renders the current state into page fragments, dropping expired
    /// notices first.
    pub fn render(&mut self, now: DateTime<Utc>) -> anyhow::Result<PageView> {
        self.prune_notices(now);

        let modal_html = match &self.modal {
            ModalState::Hidden => String::new(),
            ModalState::Open { form } => {
                let title = if form.is_edit() { TITLE_EDIT } else { TITLE_ADD };
                self.renderer.modal(&ModalContext {
                    title: title.to_string(),
                    id: form.id.clone(),
                    name: form.name.clone(),
                    amount: form.amount.clone(),
                    interval: form.interval.clone(),
                    next_billing_date: form.next_billing_date.clone(),
                    in_flight: self.in_flight,
                })?
            }
        };

        let success_texts: Vec<&str> = self
            .notices
            .iter()
            .filter(|n| n.kind == NoticeKind::Success)
            .map(|n| n.text.as_str())
            .collect();
        let latest_error = self
            .notices
            .iter()
            .rev()
            .find(|n| n.kind == NoticeKind::Error)
            .map(|n| n.text.as_str());

        Ok(PageView {
            table_html: self.table_html.clone(),
            modal_html,
            messages_html: self.renderer.messages(&success_texts)?,
            status_html: self.renderer.status(latest_error)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSubscriptionBackend;
    use crate::api::Subscription;
    use crate::page::MockConfirmPrompt;

    fn sample(id: i64, name: &str) -> Subscription {
        Subscription {
            id,
            name: name.to_string(),
            amount: 299.0,
            interval: "monthly".to_string(),
            next_billing_date: Some("2026-09-01".to_string()),
            ..Default::default()
        }
    }

    fn page(backend: MockSubscriptionBackend) -> SubscriptionPage<MockSubscriptionBackend> {
        SubscriptionPage::new(backend, "/login")
    }

    #[tokio::test]
    async fn test_load_renders_rows() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![sample(1, "Яндекс Плюс")]));

        let mut page = page(backend);
        let nav = page.load().await.unwrap();

        assert_eq!(nav, Nav::Stay);
        assert!(page.table_html.contains("Яндекс Плюс"));
        assert!(page.table_html.contains("299,00\u{a0}₽"));
    }

    #[tokio::test]
    async fn test_load_unauthorized_redirects_without_rendering() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_list()
            .returning(|| Err(ApiError::Unauthorized));

        let mut page = page(backend);
        let nav = page.load().await.unwrap();

        assert_eq!(nav, Nav::Redirect("/login".to_string()));
        assert!(page.table_html.is_empty());
        assert_eq!(page.notices.len(), 0);
    }

    #[tokio::test]
    async fn test_load_failure_renders_error_placeholder_and_notice() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_list()
            .returning(|| Err(ApiError::UnexpectedStatus { status: 500 }));

        let mut page = page(backend);
        let nav = page.load().await.unwrap();

        assert_eq!(nav, Nav::Stay);
        assert!(page.table_html.contains("Ошибка загрузки данных"));
        assert_eq!(page.notices.len(), 1);
        assert_eq!(page.notices[0].kind, NoticeKind::Error);
        assert_eq!(page.notices[0].text, ERR_LOAD_LIST);
    }

    #[tokio::test]
    async fn test_open_create_has_blank_form_with_empty_id() {
        let mut page = page(MockSubscriptionBackend::new());
        page.open_create();

        let ModalState::Open { form } = page.modal() else {
            panic!("Modal should be open");
        };
        assert!(form.id.is_empty());
        assert!(form.name.is_empty());
    }

    #[tokio::test]
    async fn test_open_edit_populates_form() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_get()
            .withf(|id| *id == 7)
            .returning(|_| Ok(sample(7, "Кинопоиск")));

        let mut page = page(backend);
        page.open_edit(7).await.unwrap();

        let ModalState::Open { form } = page.modal() else {
            panic!("Modal should be open");
        };
        assert_eq!(form.id, "7");
        assert_eq!(form.name, "Кинопоиск");
    }

    #[tokio::test]
    async fn test_open_edit_failure_keeps_modal_hidden() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_get()
            .returning(|_| Err(ApiError::UnexpectedStatus { status: 404 }));

        let mut page = page(backend);
        page.open_edit(7).await.unwrap();

        assert!(!page.modal().is_open());
        assert_eq!(page.notices[0].text, ERR_LOAD_ITEM);
    }

    #[tokio::test]
    async fn test_submit_with_empty_id_creates() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_create()
            .times(1)
            .withf(|draft| draft.name == "Netflix" && draft.amount == 9.99)
            .returning(|_| Ok(sample(1, "Netflix")));
        backend.expect_update().times(0);
        backend.expect_list().returning(|| Ok(vec![]));

        let mut page = page(backend);
        page.open_create();
        {
            let form = page.form_mut().unwrap();
            form.name = "  Netflix  ".to_string();
            form.amount = "9.99".to_string();
        }
        page.submit().await.unwrap();

        assert!(!page.modal().is_open());
        assert_eq!(page.notices.last().unwrap().text, MSG_CREATED);
    }

    #[tokio::test]
    async fn test_submit_with_id_updates_that_record() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_get()
            .returning(|_| Ok(sample(5, "Spotify")));
        backend
            .expect_update()
            .times(1)
            .withf(|id, _| *id == 5)
            .returning(|_, _| Ok(sample(5, "Spotify")));
        backend.expect_create().times(0);
        backend.expect_list().returning(|| Ok(vec![]));

        let mut page = page(backend);
        page.open_edit(5).await.unwrap();
        page.submit().await.unwrap();

        assert!(!page.modal().is_open());
        assert_eq!(page.notices.last().unwrap().text, MSG_UPDATED);
    }

    #[tokio::test]
    async fn test_submit_validation_failure_keeps_modal_open() {
        let mut backend = MockSubscriptionBackend::new();
        backend.expect_create().returning(|_| {
            Err(ApiError::Validation {
                messages: vec![
                    "Название подписки обязательно".to_string(),
                    "Сумма обязательна".to_string(),
                ],
            })
        });
        backend.expect_list().times(0);

        let mut page = page(backend);
        page.open_create();
        page.submit().await.unwrap();

        assert!(page.modal().is_open());
        assert_eq!(
            page.notices.last().unwrap().text,
            "Название подписки обязательно, Сумма обязательна"
        );
    }

    #[tokio::test]
    async fn test_submit_transport_failure_uses_generic_message() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_create()
            .returning(|_| Err(ApiError::UnexpectedStatus { status: 502 }));

        let mut page = page(backend);
        page.open_create();
        page.submit().await.unwrap();

        assert!(page.modal().is_open());
        assert_eq!(page.notices.last().unwrap().text, ERR_SAVE);
    }

    #[tokio::test]
    async fn test_submit_ignored_while_request_in_flight() {
        let mut backend = MockSubscriptionBackend::new();
        backend.expect_create().times(0);
        backend.expect_update().times(0);

        let mut page = page(backend);
        page.open_create();
        page.in_flight = true;

        let nav = page.submit().await.unwrap();
        assert_eq!(nav, Nav::Stay);
        assert!(page.modal().is_open());
    }

    #[tokio::test]
    async fn test_submit_noop_when_modal_hidden() {
        let mut backend = MockSubscriptionBackend::new();
        backend.expect_create().times(0);
        backend.expect_update().times(0);

        let mut page = page(backend);
        page.submit().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_declined_sends_no_request() {
        let mut backend = MockSubscriptionBackend::new();
        backend.expect_delete().times(0);
        backend.expect_list().times(0);

        let mut prompt = MockConfirmPrompt::new();
        prompt.expect_confirm().return_const(false);

        let mut page = page(backend);
        let nav = page.delete(3, &prompt).await.unwrap();

        assert_eq!(nav, Nav::Stay);
        assert_eq!(page.notices.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_confirmed_reloads_and_notifies() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_delete()
            .times(1)
            .withf(|id| *id == 3)
            .returning(|_| Ok(()));
        backend.expect_list().times(1).returning(|| Ok(vec![]));

        let mut prompt = MockConfirmPrompt::new();
        prompt.expect_confirm().return_const(true);

        let mut page = page(backend);
        page.delete(3, &prompt).await.unwrap();

        assert_eq!(page.notices.last().unwrap().text, MSG_DELETED);
        assert!(page.table_html.contains("Нет активных подписок"));
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces_server_message() {
        let mut backend = MockSubscriptionBackend::new();
        backend.expect_delete().returning(|_| {
            Err(ApiError::Server {
                message: "Доступ запрещен".to_string(),
            })
        });
        backend.expect_list().times(0);

        let mut prompt = MockConfirmPrompt::new();
        prompt.expect_confirm().return_const(true);

        let mut page = page(backend);
        page.delete(3, &prompt).await.unwrap();

        assert_eq!(page.notices.last().unwrap().text, "Доступ запрещен");
    }

    #[tokio::test]
    async fn test_backdrop_click_closes_modal() {
        let mut page = page(MockSubscriptionBackend::new());
        page.open_create();

        page.handle_click(ClickTarget::ModalContent);
        assert!(page.modal().is_open());

        page.handle_click(ClickTarget::Elsewhere);
        assert!(page.modal().is_open());

        page.handle_click(ClickTarget::Backdrop);
        assert!(!page.modal().is_open());
    }

    #[tokio::test]
    async fn test_render_assembles_fragments() {
        let mut backend = MockSubscriptionBackend::new();
        backend
            .expect_list()
            .returning(|| Ok(vec![sample(1, "Netflix")]));

        let mut page = page(backend);
        page.load().await.unwrap();
        page.open_create();
        page.show_success(MSG_CREATED);
        page.show_error(ERR_SAVE);

        let view = page.render(Utc::now()).unwrap();
        assert!(view.table_html.contains("Netflix"));
        assert!(view.modal_html.contains(TITLE_ADD));
        assert!(view.messages_html.contains(MSG_CREATED));
        assert!(view.status_html.contains(ERR_SAVE));
    }

    #[tokio::test]
    async fn test_render_drops_expired_notices() {
        let mut page = page(MockSubscriptionBackend::new());
        page.show_success(MSG_CREATED);

        let later = Utc::now() + chrono::Duration::seconds(6);
        let view = page.render(later).unwrap();

        assert!(!view.messages_html.contains(MSG_CREATED));
        assert_eq!(page.notices.len(), 0);
    }
}
