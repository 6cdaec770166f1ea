use std::sync::Arc;

use poolkb_sdk::{AdminApi, FileLocaleStore, FixedLocale, Language, LocaleSource, WebApi, effective_language};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::infra::config::CliConfig;

/// Everything a command needs.
pub struct AppContext {
    pub config: CliConfig,
    pub locale_store: FileLocaleStore,
    /// Language for CLI output, resolved once at startup.
    pub language: Language,
    pub web: WebApi,
    pub admin: AdminApi,
}

/// Build the API clients. `lang_override` pins the language for this run
/// instead of reading the settings file.
pub fn init_app(mut config: CliConfig, lang_override: Option<Language>) -> anyhow::Result<AppContext> {
    let locale_store = FileLocaleStore::new(config.settings_path.clone());

    let locale: Arc<dyn LocaleSource> = match lang_override {
        Some(language) => Arc::new(FixedLocale(language)),
        None => Arc::new(locale_store.clone()),
    };
    let language = effective_language(locale.as_ref());

    let client_config = config.client_config();
    let web = WebApi::new(&client_config, locale)?;
    let admin = AdminApi::new(&client_config)?;

    if let Some(token) = config.admin_token.take() {
        admin.client().set_token(token);
    }

    Ok(AppContext {
        config,
        locale_store,
        language,
        web,
        admin,
    })
}

/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "poolkb_cli=info,poolkb_sdk=warn".into());

    // Console (pretty logs)
    let console_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .pretty()
    });

    // Structured JSON logs
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
