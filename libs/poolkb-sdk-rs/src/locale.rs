//! Language preference sources and the locale-injecting request stage.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use poolkb_types::{LANGUAGE_KEY, Language};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SettingsError;
use crate::request::{ApiRequest, HttpMethod};

/// Provider of the user's language preference.
///
/// Queried once per request, so a change applies to the next request and
/// never to one already in flight.
pub trait LocaleSource: Send + Sync {
    /// The stored preference, or `None` when the user never chose one.
    fn preference(&self) -> Option<Language>;
}

/// Always reports the same language.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocale(pub Language);

impl LocaleSource for FixedLocale {
    fn preference(&self) -> Option<Language> {
        Some(self.0)
    }
}

/// In-process preference that can be changed while clients hold it.
#[derive(Debug, Clone, Default)]
pub struct SharedLocale {
    inner: Arc<RwLock<Option<Language>>>,
}

impl SharedLocale {
    pub fn new(initial: Option<Language>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn set(&self, language: Option<Language>) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = language;
    }
}

impl LocaleSource for SharedLocale {
    fn preference(&self) -> Option<Language> {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Preference persisted as the `language` key of a JSON settings file.
///
/// The file is read on every query. A missing or malformed file, or an
/// unsupported value, counts as "no preference".
#[derive(Debug, Clone)]
pub struct FileLocaleStore {
    path: PathBuf,
}

impl FileLocaleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `language`, keeping any other keys already in the file.
    ///
    /// Refuses to touch a file that exists but does not hold a JSON object.
    pub fn set(&self, language: Language) -> Result<(), SettingsError> {
        let mut settings = self.read_settings()?.unwrap_or_default();
        settings.insert(
            LANGUAGE_KEY.to_string(),
            Value::String(language.as_str().to_string()),
        );
        self.write_settings(&settings)
    }

    /// A missing or blank file reads as `None`.
    fn read_settings(&self) -> Result<Option<Map<String, Value>>, SettingsError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_settings(&self, settings: &Map<String, Value>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let rendered = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, rendered)?;
        Ok(())
    }
}

impl LocaleSource for FileLocaleStore {
    fn preference(&self) -> Option<Language> {
        let settings = match self.read_settings() {
            Ok(settings) => settings?,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "ignoring unreadable settings file");
                return None;
            }
        };
        let raw = settings.get(LANGUAGE_KEY)?.as_str()?;
        Language::parse(raw)
    }
}

/// Preference of `source`, or `zh-CN` when there is none.
pub fn effective_language(source: &dyn LocaleSource) -> Language {
    source.preference().unwrap_or_default()
}

/// Add `language` to an outgoing request.
///
/// - GET: added to the query parameters unless the caller already set one.
/// - Object body without a usable `language` (missing, null or ""): added.
/// - No body (or a `null` body): the body becomes `{"language": ...}`.
/// - Any other body (string, array, number, bool) is left untouched.
pub fn inject_language(request: &mut ApiRequest, language: Language) {
    let tag = Value::String(language.as_str().to_string());

    if request.method == HttpMethod::Get {
        let present = request
            .query
            .get(LANGUAGE_KEY)
            .is_some_and(|value| !value.is_null());
        if !present {
            request.query.insert(LANGUAGE_KEY.to_string(), tag);
        }
        return;
    }

    match request.body.as_mut() {
        None | Some(Value::Null) => {
            let mut body = Map::new();
            body.insert(LANGUAGE_KEY.to_string(), tag);
            request.body = Some(Value::Object(body));
        }
        Some(Value::Object(body)) => {
            if !has_language(body) {
                body.insert(LANGUAGE_KEY.to_string(), tag);
            }
        }
        Some(_) => {
            debug!(
                method = %request.method,
                path = %request.path,
                "request body is not an object; language not injected"
            );
        }
    }
}

fn has_language(body: &Map<String, Value>) -> bool {
    match body.get(LANGUAGE_KEY) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
