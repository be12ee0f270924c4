use crate::domain::hafalan::NewHafalan;
use crate::services::error_handling::{LogHelper, UserErrorFormatter};
use crate::services::validation::InputValidator;
use crate::services::HafalanService;
use crate::ui::notifier::{Alert, Notifier};
use anyhow::Result;
use std::fmt::Write;
use uuid::Uuid;

pub const SAVED_MESSAGE: &str = "Data berhasil disimpan";
pub const SAVE_FAILED_MESSAGE: &str = "Gagal menyimpan data";

/// Form for a new record.
pub struct CreateView {
    service: HafalanService,
    nama: String,
    ayat: String,
}

impl CreateView {
    pub fn new(service: HafalanService) -> Self {
        Self {
            service,
            nama: String::new(),
            ayat: String::new(),
        }
    }

    pub fn set_nama(&mut self, nama: &str) {
        self.nama = nama.to_string();
    }

    pub fn set_ayat(&mut self, ayat: &str) {
        self.ayat = ayat.to_string();
    }

    /// Validates the form and creates the record. Returns the new id when the
    /// screen should close; every outcome is reported through `notifier`.
    pub async fn submit(&self, notifier: &dyn Notifier) -> Option<Uuid> {
        let record = match self.validated() {
            Ok(record) => record,
            Err(e) => {
                notifier.alert(&Alert::error(UserErrorFormatter::format_for_ui(&e)));
                return None;
            }
        };

        match self.service.create(record).await {
            Ok(id) => {
                notifier.alert(&Alert::success(SAVED_MESSAGE));
                Some(id)
            }
            Err(e) => {
                LogHelper::log_error_with_context("Error adding document", &e);
                notifier.alert(&Alert::error(SAVE_FAILED_MESSAGE));
                None
            }
        }
    }

    fn validated(&self) -> Result<NewHafalan> {
        InputValidator::validate_required(&self.nama, &self.ayat)?;
        let nama = InputValidator::validate_nama(&self.nama)?;
        let ayat = InputValidator::validate_ayat(&self.ayat)?;
        Ok(NewHafalan::new(nama, ayat))
    }

    pub fn show(&self, out: &mut String) {
        let _ = writeln!(out, "Tambah Data Hafalan");
        let _ = writeln!(out, "  Nama: {}", self.nama);
        let _ = writeln!(out, "  Jumlah Ayat: {}", self.ayat);
    }
}
