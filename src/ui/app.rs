use super::navigation::{Navigator, Route};
use super::notifier::Notifier;
use super::views::{CreateView, DetailView, HomeView};
use crate::config::AppConfig;
use crate::services::HafalanService;
use anyhow::Result;
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

/// Line-driven front end over the three screens.
pub struct HafalanApp {
    service: HafalanService,
    notifier: Arc<dyn Notifier>,
    navigator: Navigator,
    home: HomeView,
    create: Option<CreateView>,
    detail: Option<DetailView>,
}

impl HafalanApp {
    pub fn new(service: HafalanService, config: &AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        let home = HomeView::new(&service, config);
        Self {
            service,
            notifier,
            navigator: Navigator::new(),
            home,
            create: None,
            detail: None,
        }
    }

    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    pub fn home(&self) -> &HomeView {
        &self.home
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub async fn handle_command(&mut self, line: &str) -> Result<AppControl> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (line, ""),
        };
        debug!(command, route = ?self.navigator.current(), "handling command");

        if matches!(command, "quit" | "keluar") {
            return Ok(AppControl::Quit);
        }

        match self.navigator.current() {
            Route::Home => self.handle_home(command, rest).await,
            Route::Create => self.handle_create(command, rest).await,
            Route::Detail { .. } => self.handle_detail(command).await,
        }

        Ok(AppControl::Continue)
    }

    async fn handle_home(&mut self, command: &str, rest: &str) {
        match command {
            "cari" | "search" => self.home.handle_search(rest),
            "lagi" | "more" => self.home.on_end_reached().await,
            "buka" | "open" => {
                let route = rest
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|index| self.home.select(index));
                if let Some(route) = route {
                    self.open(route).await;
                }
            }
            "tambah" | "new" => {
                let route = self.home.open_create();
                self.open(route).await;
            }
            _ => {}
        }
    }

    async fn handle_create(&mut self, command: &str, rest: &str) {
        let Some(view) = self.create.as_mut() else {
            return;
        };
        match command {
            "nama" | "name" => view.set_nama(rest),
            "ayat" => view.set_ayat(rest),
            "simpan" | "save" => {
                if view.submit(self.notifier.as_ref()).await.is_some() {
                    self.back().await;
                }
            }
            "kembali" | "back" => self.back().await,
            _ => {}
        }
    }

    async fn handle_detail(&mut self, command: &str) {
        let Some(view) = self.detail.as_mut() else {
            return;
        };
        match command {
            "+" => view.increment(),
            "-" => view.decrement(),
            "update" => {
                view.handle_update(self.notifier.as_ref()).await;
            }
            "hapus" | "delete" => {
                if view.handle_delete(self.notifier.as_ref()).await {
                    self.back().await;
                }
            }
            "kembali" | "back" => self.back().await,
            _ => {}
        }
    }

    async fn open(&mut self, route: Route) {
        match route {
            Route::Home => {}
            Route::Create => self.create = Some(CreateView::new(self.service.clone())),
            Route::Detail { doc_id } => {
                let mut view = DetailView::new(self.service.clone(), doc_id);
                view.load().await;
                self.detail = Some(view);
            }
        }
        self.navigator.navigate(route);
    }

    async fn back(&mut self) {
        if !self.navigator.go_back() {
            return;
        }
        self.create = None;
        self.detail = None;
        if self.navigator.current() == Route::Home {
            self.home.refresh().await;
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let route = self.navigator.current();
        let _ = writeln!(out, "== {} ==", route.title());

        match route {
            Route::Home => {
                self.home.show(&mut out);
                let _ = writeln!(out, "(cari <teks> | lagi | buka <no> | tambah | keluar)");
            }
            Route::Create => {
                if let Some(view) = &self.create {
                    view.show(&mut out);
                }
                let _ = writeln!(out, "(nama <teks> | ayat <angka> | simpan | kembali)");
            }
            Route::Detail { .. } => {
                if let Some(view) = &self.detail {
                    view.show(&mut out);
                }
                let _ = writeln!(out, "(+ | - | update | hapus | kembali)");
            }
        }
        out
    }

    pub fn shutdown(&self) {
        self.home.unmount();
    }
}
