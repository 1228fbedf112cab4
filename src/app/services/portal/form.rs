//! HTML form model
//!
//! Captures a form found on a fetched page together with the values its
//! fields would submit, so that individual fields can be overwritten before
//! resubmitting it.

use crate::{Error, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// HTTP method declared by a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

/// One named, successful form control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// A form selected from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlForm {
    id: String,
    action: Option<String>,
    method: FormMethod,
    fields: Vec<FormField>,
}

impl HtmlForm {
    /// Find the form with the given `id` in a page
    ///
    /// Returns `Ok(None)` when the page has no such form.
    pub fn from_page(html: &str, form_id: &str) -> Result<Option<Self>> {
        let document = Html::parse_document(html);
        let selector = parse_selector(&format!("form[id=\"{}\"]", form_id))?;

        Ok(document
            .select(&selector)
            .next()
            .map(|form| Self::from_element(form_id, form)))
    }

    fn from_element(form_id: &str, form: ElementRef<'_>) -> Self {
        let element = form.value();
        let method = match element.attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => FormMethod::Post,
            _ => FormMethod::Get,
        };

        // Static selectors; parsing them cannot fail
        let controls = Selector::parse("input[name], select[name], textarea[name]").unwrap();
        let options = Selector::parse("option").unwrap();

        let mut fields = Vec::new();
        for control in form.select(&controls) {
            let el = control.value();
            let Some(name) = el.attr("name") else {
                continue;
            };

            let value = match el.name() {
                "select" => {
                    let mut chosen = None;
                    let mut first = None;
                    for option in control.select(&options) {
                        let value = option_value(option);
                        if first.is_none() {
                            first = Some(value.clone());
                        }
                        if option.value().attr("selected").is_some() {
                            chosen = Some(value);
                        }
                    }
                    chosen.or(first).unwrap_or_default()
                }
                "textarea" => control.text().collect::<String>(),
                _ => {
                    let kind = el.attr("type").unwrap_or("text").to_ascii_lowercase();
                    match kind.as_str() {
                        "submit" | "button" | "image" | "reset" | "file" => continue,
                        "checkbox" | "radio" if el.attr("checked").is_none() => continue,
                        "checkbox" | "radio" => el.attr("value").unwrap_or("on").to_string(),
                        _ => el.attr("value").unwrap_or_default().to_string(),
                    }
                }
            };

            fields.push(FormField {
                name: name.to_string(),
                value,
            });
        }

        Self {
            id: form_id.to_string(),
            action: element.attr("action").map(str::to_string),
            method,
            fields,
        }
    }

    /// Form identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared method
    pub fn method(&self) -> FormMethod {
        self.method
    }

    /// Current value of a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Overwrite the value of an existing field
    ///
    /// Fails with [`Error::FormFieldNotFound`] when the form has no control
    /// of that name, which usually means the portal markup changed.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                Ok(())
            }
            None => Err(Error::form_field_not_found(&self.id, name)),
        }
    }

    /// Name/value pairs in document order
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Absolute submission URL, resolved against the page the form came from
    pub fn action_url(&self, base: &Url) -> Result<Url> {
        match self.action.as_deref() {
            None | Some("") => Ok(base.clone()),
            Some(action) => base.join(action).map_err(|e| {
                Error::configuration(format!("Invalid form action '{}': {}", action, e))
            }),
        }
    }
}

fn option_value(option: ElementRef<'_>) -> String {
    match option.value().attr("value") {
        Some(v) => v.to_string(),
        None => option.text().collect::<String>().trim().to_string(),
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::configuration(format!("Invalid CSS selector '{}': {}", selector, e)))
}
