//! The saved state of an estimate's form pages.

use crate::error::StoreError;
use estimate_types::{FormDataBag, FormValue, PageKey, bag_from_json_str};
use std::fs;
use std::path::Path;

/// Every page of an estimate, keyed by page key.
///
/// The backing bag is what [`Assembler::assemble`](crate::Assembler::assemble)
/// takes as form data; page and field order are preserved on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStore {
    pages: FormDataBag,
}

impl FormStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses a JSON object whose keys are page keys.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Ok(Self {
            pages: bag_from_json_str(json)?,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn page(&self, key: &str) -> Option<&FormValue> {
        self.pages.get(key)
    }

    pub fn page_keys(&self) -> impl Iterator<Item = PageKey> + '_ {
        self.pages.keys().map(|key| PageKey::from(key.as_str()))
    }

    /// Sets one field, creating the page if it does not exist yet.
    ///
    /// Fails if the page already holds something other than a set of fields.
    pub fn set_field(
        &mut self,
        page: &str,
        field: impl Into<String>,
        value: impl Into<FormValue>,
    ) -> Result<(), StoreError> {
        let entry = self
            .pages
            .entry(page.to_string())
            .or_insert_with(|| FormValue::Bag(FormDataBag::new()));
        if entry.is_null() {
            *entry = FormValue::Bag(FormDataBag::new());
        }
        let type_name = entry.type_name();
        let bag = entry
            .as_bag_mut()
            .ok_or_else(|| StoreError::PageNotABag(page.to_string(), type_name))?;
        bag.insert(field.into(), value.into());
        Ok(())
    }

    pub fn remove_page(&mut self, key: &str) -> Option<FormValue> {
        self.pages.shift_remove(key)
    }

    pub fn as_bag(&self) -> &FormDataBag {
        &self.pages
    }

    pub fn to_json_string(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.pages)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
